//! Analysis service. Drives one session through the analyzer.
//!
//! Exactly one request in flight; the session guards reject anything else.
//! There is no retry: a failed call lands the session in ERROR and the user
//! decides what happens next.

use crate::domain::{AnalysisSession, DomainError};
use crate::ports::AnalyzerPort;
use std::sync::Arc;
use tracing::{info, warn};

/// Service for AI-powered screen-recording analysis.
///
/// Orchestrates the flow: begin the session, send the clip to the analyzer,
/// record completion or failure.
pub struct AnalysisService {
    analyzer: Arc<dyn AnalyzerPort>,
}

impl AnalysisService {
    /// Create a new analysis service.
    ///
    /// # Arguments
    /// * `analyzer` - Analyzer port implementation (Gemini, Mock, etc.)
    pub fn new(analyzer: Arc<dyn AnalyzerPort>) -> Self {
        Self { analyzer }
    }

    /// Run the analysis for the session's selected clip.
    ///
    /// On success the session ends in `Completed` with the result stored; on
    /// failure it ends in `Error` with the message stored, and the error is
    /// also returned to the caller.
    pub async fn run(&self, session: &mut AnalysisSession) -> Result<(), DomainError> {
        session.begin()?;

        let Some(clip) = session.clip() else {
            // begin() guarantees a clip; keep the session consistent anyway
            session.fail("no video selected")?;
            return Err(DomainError::State("no video selected".to_string()));
        };

        info!(file = %clip.file_name, "analysis started");
        let outcome = self.analyzer.analyze(clip).await;

        match outcome {
            Ok(log) => {
                info!(
                    range = %log.date_range(),
                    filename = %log.suggested_filename,
                    "analysis succeeded"
                );
                session.complete(log)?;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "analysis failed");
                session.fail(e.to_string())?;
                Err(e)
            }
        }
    }
}
