//! Value types shared by the dispatch controller, its workers and the
//! status output: requests, directions, car snapshots, narration events,
//! errors and configuration.

pub mod car_status;
pub mod config;
pub mod direction;
pub mod error;
pub mod origin;
pub mod request;
