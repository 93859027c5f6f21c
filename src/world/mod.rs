//! World graph: locations, their exits and time effects

pub mod graph;
pub mod location;

pub use graph::{LocationGraph, PortalAssignment, WorldLayout};
pub use location::{Location, Riddle, TimeEffect};
