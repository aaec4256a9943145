//! Analysis session state machine.
//!
//! One session, four states: IDLE → ANALYZING → COMPLETED | ERROR.
//! A single request is in flight at a time; there is no retry and no queue.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::entities::{ExtractedLog, VideoClip};
use super::errors::DomainError;

/// The four states of an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessingState {
    Idle,
    Analyzing,
    Completed,
    Error,
}

impl fmt::Display for ProcessingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingState::Idle => write!(f, "IDLE"),
            ProcessingState::Analyzing => write!(f, "ANALYZING"),
            ProcessingState::Completed => write!(f, "COMPLETED"),
            ProcessingState::Error => write!(f, "ERROR"),
        }
    }
}

/// Holds the current run: selected clip, state, and outcome.
///
/// Invariants maintained by the guarded transitions:
/// - `result()` is `Some` exactly in `Completed`
/// - `error_message()` is `Some` exactly in `Error`
/// - a clip is present whenever the state is `Analyzing`
pub struct AnalysisSession {
    state: ProcessingState,
    clip: Option<VideoClip>,
    result: Option<ExtractedLog>,
    error: Option<String>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self {
            state: ProcessingState::Idle,
            clip: None,
            result: None,
            error: None,
        }
    }

    pub fn state(&self) -> ProcessingState {
        self.state
    }

    pub fn clip(&self) -> Option<&VideoClip> {
        self.clip.as_ref()
    }

    pub fn result(&self) -> Option<&ExtractedLog> {
        self.result.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Select (or replace) the video for this session. Allowed from any state;
    /// any previous outcome is discarded and the session returns to `Idle`.
    pub fn select_video(&mut self, clip: VideoClip) {
        self.clip = Some(clip);
        self.result = None;
        self.error = None;
        self.state = ProcessingState::Idle;
    }

    /// Start the analysis. Only valid from `Idle` with a clip selected.
    ///
    /// Calling this while `Analyzing` is an error, never a queue: the session
    /// enforces the single-request-in-flight rule.
    pub fn begin(&mut self) -> Result<(), DomainError> {
        if self.state != ProcessingState::Idle {
            return Err(DomainError::State(format!(
                "cannot start analysis from {}",
                self.state
            )));
        }
        if self.clip.is_none() {
            return Err(DomainError::State("no video selected".to_string()));
        }
        self.state = ProcessingState::Analyzing;
        Ok(())
    }

    /// Record a successful analysis. Only valid from `Analyzing`.
    pub fn complete(&mut self, log: ExtractedLog) -> Result<(), DomainError> {
        if self.state != ProcessingState::Analyzing {
            return Err(DomainError::State(format!(
                "cannot complete from {}",
                self.state
            )));
        }
        self.result = Some(log);
        self.state = ProcessingState::Completed;
        Ok(())
    }

    /// Record a failed analysis. Only valid from `Analyzing`.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), DomainError> {
        if self.state != ProcessingState::Analyzing {
            return Err(DomainError::State(format!(
                "cannot fail from {}",
                self.state
            )));
        }
        self.error = Some(message.into());
        self.state = ProcessingState::Error;
        Ok(())
    }

    /// Discard everything and return to `Idle`. Allowed from any state.
    pub fn reset(&mut self) {
        self.clip = None;
        self.result = None;
        self.error = None;
        self.state = ProcessingState::Idle;
    }
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip() -> VideoClip {
        VideoClip {
            file_name: "rec.mp4".to_string(),
            mime_type: "video/mp4".to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    fn log() -> ExtractedLog {
        ExtractedLog {
            content: "text".to_string(),
            start_date: "20240101".to_string(),
            end_date: "20240102".to_string(),
            region: "HK".to_string(),
            suggested_filename: "HK-20240101-to-20240102".to_string(),
        }
    }

    #[test]
    fn happy_path_walks_all_states() {
        let mut session = AnalysisSession::new();
        assert_eq!(session.state(), ProcessingState::Idle);

        session.select_video(clip());
        assert_eq!(session.state(), ProcessingState::Idle);

        session.begin().unwrap();
        assert_eq!(session.state(), ProcessingState::Analyzing);

        session.complete(log()).unwrap();
        assert_eq!(session.state(), ProcessingState::Completed);
        assert!(session.result().is_some());
        assert!(session.error_message().is_none());
    }

    #[test]
    fn failure_path_records_message() {
        let mut session = AnalysisSession::new();
        session.select_video(clip());
        session.begin().unwrap();

        session.fail("API error 500").unwrap();
        assert_eq!(session.state(), ProcessingState::Error);
        assert_eq!(session.error_message(), Some("API error 500"));
        assert!(session.result().is_none());
    }

    #[test]
    fn begin_without_video_is_rejected() {
        let mut session = AnalysisSession::new();
        let err = session.begin().unwrap_err();
        assert!(matches!(err, DomainError::State(_)));
        assert_eq!(session.state(), ProcessingState::Idle);
    }

    #[test]
    fn begin_while_analyzing_is_rejected() {
        let mut session = AnalysisSession::new();
        session.select_video(clip());
        session.begin().unwrap();

        // Second request while one is in flight — rejected, state unchanged.
        let err = session.begin().unwrap_err();
        assert!(matches!(err, DomainError::State(_)));
        assert_eq!(session.state(), ProcessingState::Analyzing);
    }

    #[test]
    fn complete_from_idle_is_rejected() {
        let mut session = AnalysisSession::new();
        assert!(matches!(
            session.complete(log()),
            Err(DomainError::State(_))
        ));
    }

    #[test]
    fn fail_from_completed_is_rejected() {
        let mut session = AnalysisSession::new();
        session.select_video(clip());
        session.begin().unwrap();
        session.complete(log()).unwrap();

        assert!(matches!(session.fail("late"), Err(DomainError::State(_))));
        assert_eq!(session.state(), ProcessingState::Completed);
    }

    #[test]
    fn selecting_a_new_video_clears_previous_outcome() {
        let mut session = AnalysisSession::new();
        session.select_video(clip());
        session.begin().unwrap();
        session.complete(log()).unwrap();

        session.select_video(clip());
        assert_eq!(session.state(), ProcessingState::Idle);
        assert!(session.result().is_none());
        assert!(session.error_message().is_none());
        assert!(session.clip().is_some());
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = AnalysisSession::new();
        session.select_video(clip());
        session.begin().unwrap();
        session.fail("boom").unwrap();

        session.reset();
        assert_eq!(session.state(), ProcessingState::Idle);
        assert!(session.clip().is_none());
        assert!(session.result().is_none());
        assert!(session.error_message().is_none());
    }

    #[test]
    fn state_display() {
        assert_eq!(ProcessingState::Idle.to_string(), "IDLE");
        assert_eq!(ProcessingState::Analyzing.to_string(), "ANALYZING");
        assert_eq!(ProcessingState::Completed.to_string(), "COMPLETED");
        assert_eq!(ProcessingState::Error.to_string(), "ERROR");
    }
}
