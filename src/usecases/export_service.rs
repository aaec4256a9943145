//! Export service. Delivers an extracted log to its destination.
//!
//! Local path: write `{suggested_filename}.txt` under the output directory.
//! Drive path: delegate to the DrivePort (when configured).

use crate::domain::{DomainError, DriveFolder, ExtractedLog};
use crate::ports::DrivePort;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tracing::info;

/// Service for exporting analysis results.
///
/// Drive is optional: when no access token is configured, only the local
/// `.txt` export is offered.
pub struct ExportService {
    drive: Option<Arc<dyn DrivePort>>,
    output_dir: PathBuf,
}

impl ExportService {
    /// Create a new export service.
    ///
    /// # Arguments
    /// * `drive` - Drive port implementation, if configured
    /// * `output_dir` - Directory for local `.txt` exports
    pub fn new(drive: Option<Arc<dyn DrivePort>>, output_dir: PathBuf) -> Self {
        Self { drive, output_dir }
    }

    /// True when a cloud-drive destination is configured.
    pub fn drive_available(&self) -> bool {
        self.drive.is_some()
    }

    /// Write the extracted content as `{suggested_filename}.txt` under the
    /// output directory. Creates the directory on demand. Returns the path.
    pub async fn save_txt(&self, log: &ExtractedLog) -> Result<PathBuf, DomainError> {
        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| DomainError::Export(format!("Failed to create output dir: {}", e)))?;

        let path = self
            .output_dir
            .join(format!("{}.txt", log.suggested_filename));

        fs::write(&path, &log.content)
            .await
            .map_err(|e| DomainError::Export(format!("Failed to write file: {}", e)))?;

        info!(path = %path.display(), "log exported");
        Ok(path)
    }

    /// List Drive folder candidates, optionally filtered by a search term.
    pub async fn list_drive_folders(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<DriveFolder>, DomainError> {
        let drive = self.require_drive()?;
        drive.list_folders(search).await
    }

    /// Upload the extracted content to Drive as a converted document.
    /// Returns the created file id.
    pub async fn save_to_drive(
        &self,
        log: &ExtractedLog,
        folder_id: Option<&str>,
    ) -> Result<String, DomainError> {
        let drive = self.require_drive()?;
        drive
            .upload_document(&log.suggested_filename, &log.content, folder_id)
            .await
    }

    fn require_drive(&self) -> Result<&Arc<dyn DrivePort>, DomainError> {
        self.drive
            .as_ref()
            .ok_or_else(|| DomainError::Drive("Drive is not configured".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn log() -> ExtractedLog {
        ExtractedLog {
            content: "# Extracted\nAlice: hi".to_string(),
            start_date: "20240101".to_string(),
            end_date: "20240102".to_string(),
            region: "HK".to_string(),
            suggested_filename: "HK-20240101-to-20240102".to_string(),
        }
    }

    /// Records uploads instead of talking to a real API.
    struct StubDrive {
        uploads: Mutex<Vec<(String, Option<String>)>>,
    }

    impl StubDrive {
        fn new() -> Self {
            Self {
                uploads: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl DrivePort for StubDrive {
        async fn list_folders(
            &self,
            _search: Option<&str>,
        ) -> Result<Vec<DriveFolder>, DomainError> {
            Ok(vec![DriveFolder {
                id: "f1".to_string(),
                name: "Logs".to_string(),
            }])
        }

        async fn upload_document(
            &self,
            file_name: &str,
            _content: &str,
            folder_id: Option<&str>,
        ) -> Result<String, DomainError> {
            self.uploads
                .lock()
                .unwrap()
                .push((file_name.to_string(), folder_id.map(String::from)));
            Ok("doc-1".to_string())
        }
    }

    #[tokio::test]
    async fn test_save_txt_writes_content() {
        let dir = tempfile::tempdir().unwrap();
        let service = ExportService::new(None, dir.path().to_path_buf());

        let path = service.save_txt(&log()).await.unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "HK-20240101-to-20240102.txt"
        );
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "# Extracted\nAlice: hi");
    }

    #[tokio::test]
    async fn test_save_txt_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports").join("deep");
        let service = ExportService::new(None, nested.clone());

        let path = service.save_txt(&log()).await.unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_save_to_drive_delegates() {
        let stub = Arc::new(StubDrive::new());
        let service = ExportService::new(Some(stub.clone()), PathBuf::from("."));

        let id = service.save_to_drive(&log(), Some("f1")).await.unwrap();

        assert_eq!(id, "doc-1");
        let uploads = stub.uploads.lock().unwrap();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].0, "HK-20240101-to-20240102");
        assert_eq!(uploads[0].1.as_deref(), Some("f1"));
    }

    #[tokio::test]
    async fn test_drive_unconfigured_is_an_error() {
        let service = ExportService::new(None, PathBuf::from("."));
        assert!(!service.drive_available());

        let err = service.save_to_drive(&log(), None).await.unwrap_err();
        assert!(matches!(err, DomainError::Drive(_)));

        let err = service.list_drive_folders(None).await.unwrap_err();
        assert!(matches!(err, DomainError::Drive(_)));
    }
}
