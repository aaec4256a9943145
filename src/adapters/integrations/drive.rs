//! Google Drive adapter. Implements DrivePort via the Drive v3 REST API.
//!
//! Uploads use a multipart/related body with Google-Doc conversion, so the
//! extracted text lands in Drive as an editable document.

use crate::domain::{DomainError, DriveFolder};
use crate::ports::DrivePort;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

const FOLDER_MIME: &str = "application/vnd.google-apps.folder";
const DOC_MIME: &str = "application/vnd.google-apps.document";

/// Fixed boundary for the multipart/related upload body.
const MULTIPART_BOUNDARY: &str = "-------314159265358979323846";

/// Folder candidates returned per listing request.
const FOLDER_PAGE_SIZE: u32 = 10;

/// Google Drive API adapter.
///
/// Requires an OAuth access token with the `drive.file` scope. The base URL
/// is injectable for tests.
pub struct GoogleDriveAdapter {
    client: Arc<Client>,
    base_url: String,
    access_token: String,
}

impl GoogleDriveAdapter {
    /// Create a new Drive adapter against the production endpoint.
    pub fn new(access_token: String) -> Self {
        Self::with_base_url(access_token, DEFAULT_BASE_URL.to_string())
    }

    /// Create an adapter pointing at a custom base URL (useful for testing).
    pub fn with_base_url(access_token: String, base_url: String) -> Self {
        Self {
            client: Arc::new(Client::new()),
            base_url,
            access_token,
        }
    }

    /// Build the files.list query. Single quotes in the search term are
    /// escaped per the Drive query syntax.
    fn folder_query(search: Option<&str>) -> String {
        let mut query = format!("mimeType = '{}' and trashed = false", FOLDER_MIME);
        if let Some(term) = search {
            let escaped = term.replace('\'', "\\'");
            query.push_str(&format!(" and name contains '{}'", escaped));
        }
        query
    }

    /// Build the multipart/related body: JSON metadata part + text content part.
    /// Drive converts the text to a Google Doc because of the metadata MIME type.
    fn multipart_body(metadata: &serde_json::Value, content: &str) -> String {
        let delimiter = format!("\r\n--{}\r\n", MULTIPART_BOUNDARY);
        let close_delimiter = format!("\r\n--{}--", MULTIPART_BOUNDARY);

        format!(
            "{}Content-Type: application/json\r\n\r\n{}{}Content-Type: text/plain\r\n\r\n{}{}",
            delimiter, metadata, delimiter, content, close_delimiter
        )
    }
}

#[derive(Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFolder>,
}

#[derive(Deserialize)]
struct CreatedFile {
    id: String,
}

#[async_trait::async_trait]
impl DrivePort for GoogleDriveAdapter {
    async fn list_folders(&self, search: Option<&str>) -> Result<Vec<DriveFolder>, DomainError> {
        let url = format!("{}/drive/v3/files", self.base_url);
        let query = Self::folder_query(search);
        debug!(query = %query, "listing Drive folders");

        let page_size = FOLDER_PAGE_SIZE.to_string();
        let res = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id, name)"),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DomainError::Drive(format!("Request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_else(|_| "unknown".to_string());
            return Err(DomainError::Drive(format!(
                "Drive API error {}: {}",
                status, text
            )));
        }

        let list: FileList = res
            .json()
            .await
            .map_err(|e| DomainError::Drive(format!("Failed to parse folder list: {}", e)))?;

        info!(folders = list.files.len(), "Drive folders listed");
        Ok(list.files)
    }

    async fn upload_document(
        &self,
        file_name: &str,
        content: &str,
        folder_id: Option<&str>,
    ) -> Result<String, DomainError> {
        let mut metadata = serde_json::json!({
            "name": file_name,
            "mimeType": DOC_MIME,
        });
        if let Some(id) = folder_id {
            metadata["parents"] = serde_json::json!([id]);
        }

        let body = Self::multipart_body(&metadata, content);
        let url = format!("{}/upload/drive/v3/files", self.base_url);

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .query(&[("uploadType", "multipart")])
            .header(
                "Content-Type",
                format!("multipart/related; boundary=\"{}\"", MULTIPART_BOUNDARY),
            )
            .body(body)
            .send()
            .await
            .map_err(|e| DomainError::Drive(format!("Request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_else(|_| "unknown".to_string());
            return Err(DomainError::Drive(format!(
                "Drive API error {}: {}",
                status, text
            )));
        }

        let created: CreatedFile = res
            .json()
            .await
            .map_err(|e| DomainError::Drive(format!("Failed to parse upload response: {}", e)))?;

        info!(file_id = %created.id, name = %file_name, "document uploaded to Drive");
        Ok(created.id)
    }
}
