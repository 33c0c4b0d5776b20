//! Core domain models for hivebench
//!
//! This crate defines the vocabulary shared by the rest of the workspace:
//! the traffic pattern loaded from disk, the per-request measurement record,
//! and the recorder that concurrent request runners append into.

pub mod error;
pub mod pattern;
pub mod record;

// Re-export commonly used types at the crate root
pub use error::{ParseError, ParseErrorKind, PatternError};
pub use pattern::{PatternStore, Target};
pub use record::{Record, Recorder};
