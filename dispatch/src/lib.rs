//! Elevator dispatch: request scheduling and car state machines for one
//! passenger car and one service car.
//!
//! The passenger car serves stops in sweeps (all upward stops in ascending
//! order, then all downward stops in descending order); the service car
//! serves requests strictly in arrival order. [`modules::controller`] drives
//! both cars on the caller's thread, [`modules::workers`] gives each car its
//! own thread.

pub mod modules;
pub mod utilities;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
