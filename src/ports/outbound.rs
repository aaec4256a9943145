//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, DriveFolder, ExtractedLog, VideoClip};

/// AI analyzer gateway. Sends a clip for OCR and content analysis.
#[async_trait::async_trait]
pub trait AnalyzerPort: Send + Sync {
    /// Analyze a screen recording: extract all visible text (including diagram
    /// OCR), resolve the referenced date range, infer the region, and suggest
    /// a filename. One call per clip; the whole clip goes in one request.
    async fn analyze(&self, clip: &VideoClip) -> Result<ExtractedLog, DomainError>;
}

/// Cloud drive gateway. List folders and upload converted documents.
///
/// When not configured, the export service only offers the local `.txt` path.
#[async_trait::async_trait]
pub trait DrivePort: Send + Sync {
    /// List folder candidates, optionally filtered by a name substring.
    async fn list_folders(&self, search: Option<&str>) -> Result<Vec<DriveFolder>, DomainError>;

    /// Upload `content` as a document named `file_name`, converted to the
    /// drive's native document format. `folder_id` of `None` uploads to the
    /// root. Returns the created file id.
    ///
    /// # Errors
    /// Returns `DomainError::Drive` if the API call fails.
    async fn upload_document(
        &self,
        file_name: &str,
        content: &str,
        folder_id: Option<&str>,
    ) -> Result<String, DomainError>;
}
