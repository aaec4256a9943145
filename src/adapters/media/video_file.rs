//! Loads screen recordings from disk into domain clips.
//!
//! No decoding or frame extraction happens here: the clip is read as-is and
//! the MIME type is guessed from the extension.

use crate::domain::{DomainError, VideoClip};
use std::path::Path;
use tokio::fs;
use tracing::info;

/// Guess the MIME type from a file extension. Unknown extensions default to
/// `video/mp4`, which Gemini accepts for most screen recordings.
pub fn mime_from_extension(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("mp4") | Some("m4v") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        Some("mkv") => "video/x-matroska",
        Some("avi") => "video/x-msvideo",
        _ => "video/mp4",
    }
}

/// Read a video file into a [`VideoClip`].
///
/// # Errors
/// Returns `DomainError::Media` if the path does not exist, is not a file, or
/// cannot be read.
pub async fn load_clip(path: impl AsRef<Path>) -> Result<VideoClip, DomainError> {
    let path = path.as_ref();

    let meta = fs::metadata(path)
        .await
        .map_err(|e| DomainError::Media(format!("cannot access {}: {}", path.display(), e)))?;
    if !meta.is_file() {
        return Err(DomainError::Media(format!(
            "{} is not a file",
            path.display()
        )));
    }

    let bytes = fs::read(path)
        .await
        .map_err(|e| DomainError::Media(format!("cannot read {}: {}", path.display(), e)))?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("recording")
        .to_string();
    let mime_type = mime_from_extension(path).to_string();

    let clip = VideoClip {
        file_name,
        mime_type,
        bytes,
    };

    info!(
        file = %clip.file_name,
        mime = %clip.mime_type,
        size_mb = format!("{:.2}", clip.size_mb()),
        "video loaded"
    );

    Ok(clip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_from_extension(Path::new("a.mp4")), "video/mp4");
        assert_eq!(mime_from_extension(Path::new("a.MOV")), "video/quicktime");
        assert_eq!(mime_from_extension(Path::new("a.webm")), "video/webm");
        assert_eq!(mime_from_extension(Path::new("a.mkv")), "video/x-matroska");
        // Unknown extensions fall back to mp4
        assert_eq!(mime_from_extension(Path::new("a.bin")), "video/mp4");
        assert_eq!(mime_from_extension(Path::new("noext")), "video/mp4");
    }

    #[tokio::test]
    async fn test_load_clip_reads_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.mov");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"not really a video").unwrap();

        let clip = load_clip(&path).await.unwrap();
        assert_eq!(clip.file_name, "capture.mov");
        assert_eq!(clip.mime_type, "video/quicktime");
        assert_eq!(clip.bytes, b"not really a video");
    }

    #[tokio::test]
    async fn test_load_clip_missing_file() {
        let err = load_clip("/definitely/not/here.mp4").await.unwrap_err();
        assert!(matches!(err, DomainError::Media(_)));
    }

    #[tokio::test]
    async fn test_load_clip_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_clip(dir.path()).await.unwrap_err();
        assert!(matches!(err, DomainError::Media(_)));
    }
}
