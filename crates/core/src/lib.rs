//! Quiz domain model and validation.
//!
//! Everything here is synchronous and free of I/O; the session state machine
//! lives in the `services` crate.

#![forbid(unsafe_code)]

pub mod model;
pub mod time;
pub mod validate;

pub use time::Clock;
pub use validate::{ValidationError, validate_quiz};
