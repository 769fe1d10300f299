//! Step definitions for task location trigger scenarios.

pub mod world;

mod given;
mod then;
mod when;
