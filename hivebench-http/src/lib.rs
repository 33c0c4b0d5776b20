//! HTTP client functionality for hivebench
//!
//! A bee is reached with a single `POST` to
//! `http://<host>:<port>/apps/beehive-app/<unit>/<work_size>` and answers
//! with a plain-text count. This crate owns that request shape and the
//! `BeeClient` seam the request runner calls through.

pub mod client;
pub mod config;
pub mod errors;
pub mod types;

// Re-export main types for convenience
pub use client::{BeeClient, HttpBeeClient};
pub use config::HttpConfig;
pub use errors::HttpError;
pub use types::{BeeRequest, BEEHIVE_APP_PATH};
