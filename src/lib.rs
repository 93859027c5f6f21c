//! Chronos - a time-distorted location graph game engine

pub mod auth;
pub mod command;
pub mod core;
pub mod persistence;
pub mod scoring;
pub mod session;
pub mod simulation;
pub mod ui;
pub mod world;
