//! # Domain Layer

pub mod entities;
pub mod errors;

pub use entities::OutputsValidator;
pub use errors::{NodeError, SubmissionError};
