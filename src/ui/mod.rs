//! UI module - text rendering for the terminal front end

pub mod display;

pub use display::{format_clock, render_event, render_rejection, render_report, render_status};
