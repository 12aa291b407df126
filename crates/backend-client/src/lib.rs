//! Typed HTTP client for the drone backend REST API (spec §6, component D).
//! No internal retry loop and no caching — both are the Drone Service's job.

pub mod client;
pub mod error;
pub mod wire;

pub use client::{into_command_result, BackendClient};
pub use error::BackendError;
