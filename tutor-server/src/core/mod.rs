//! Core pieces shared by the service: error type and logger.

pub mod error;
pub mod logger;

pub use error::{Result, TutorError};
pub use logger::init_tracing;
