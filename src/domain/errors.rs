//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("AI analysis failed: {0}")]
    Ai(String),

    #[error("Drive error: {0}")]
    Drive(String),

    #[error("Media error: {0}")]
    Media(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Input error: {0}")]
    Input(String),

    /// Illegal session transition, e.g. starting an analysis while one is in flight.
    #[error("Invalid state: {0}")]
    State(String),
}
