//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod session;

pub use entities::{DriveFolder, ExtractedLog, VideoClip, REGION_UNKNOWN};
pub use errors::DomainError;
pub use session::{AnalysisSession, ProcessingState};
