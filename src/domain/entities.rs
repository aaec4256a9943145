//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/filesystem types here — these are mapped from adapters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fallback region code when the content gives no geographic clue.
pub const REGION_UNKNOWN: &str = "XX";

/// A screen-recording video loaded into memory, ready to be sent for analysis.
///
/// The whole clip is held as bytes: the analyzer inlines it into a single
/// request (no chunking, no decoding).
#[derive(Debug, Clone)]
pub struct VideoClip {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl VideoClip {
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    pub fn size_mb(&self) -> f64 {
        self.bytes.len() as f64 / (1024.0 * 1024.0)
    }

    /// True when the clip is larger than `limit_mb` megabytes.
    pub fn exceeds_mb(&self, limit_mb: u64) -> bool {
        self.bytes.len() as u64 > limit_mb * 1024 * 1024
    }
}

/// A Google Drive folder candidate for upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveFolder {
    pub id: String,
    pub name: String,
}

/// Result of analyzing one screen recording.
///
/// Dates are `YYYYMMDD` strings; `suggested_filename` follows
/// `{REGION}-{START}-to-{END}` (without extension). Instances built through
/// [`ExtractedLog::from_model_output`] always satisfy those invariants —
/// raw model output does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedLog {
    /// Full extracted text, Markdown-formatted, including diagram OCR.
    pub content: String,
    /// Earliest date referenced in the recording (`YYYYMMDD`).
    pub start_date: String,
    /// Latest date referenced in the recording (`YYYYMMDD`).
    pub end_date: String,
    /// Two-letter region code inferred from the content (`XX` if unknown).
    pub region: String,
    /// `{REGION}-{START}-to-{END}`, reduced to filesystem-safe characters.
    pub suggested_filename: String,
}

impl ExtractedLog {
    /// Normalize raw model output into a valid log.
    ///
    /// The model is asked for this exact shape but is not trusted to deliver
    /// it: dates that do not parse fall back to `today`, a reversed range is
    /// swapped, and a malformed filename is rebuilt from the normalized parts.
    pub fn from_model_output(
        content: String,
        start_date: &str,
        end_date: &str,
        suggested_filename: &str,
        today: NaiveDate,
    ) -> Self {
        let mut start = normalize_date(start_date, today);
        let mut end = normalize_date(end_date, today);
        if parse_compact(&start) > parse_compact(&end) {
            std::mem::swap(&mut start, &mut end);
        }

        let region = region_from_filename(suggested_filename);

        let filename = if filename_matches(suggested_filename, &region, &start, &end) {
            sanitize_filename(suggested_filename)
        } else {
            format!("{}-{}-to-{}", region, start, end)
        };

        Self {
            content,
            start_date: start,
            end_date: end,
            region,
            suggested_filename: filename,
        }
    }

    /// Human-readable date range for display, e.g. `20220905 → 20230503`.
    pub fn date_range(&self) -> String {
        format!("{} → {}", self.start_date, self.end_date)
    }
}

/// Keep a date only if it is a real `YYYYMMDD` calendar date.
fn normalize_date(raw: &str, today: NaiveDate) -> String {
    let trimmed = raw.trim();
    match NaiveDate::parse_from_str(trimmed, "%Y%m%d") {
        Ok(_) => trimmed.to_string(),
        Err(_) => today.format("%Y%m%d").to_string(),
    }
}

/// Parse an already-normalized `YYYYMMDD` string. Invalid input sorts first.
fn parse_compact(date: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date, "%Y%m%d").unwrap_or(NaiveDate::MIN)
}

/// Extract the leading region code from a `{REGION}-...` filename.
/// Anything that is not exactly two ASCII letters becomes `XX`.
fn region_from_filename(filename: &str) -> String {
    let prefix = filename.trim().split('-').next().unwrap_or_default();
    if prefix.len() == 2 && prefix.chars().all(|c| c.is_ascii_alphabetic()) {
        prefix.to_ascii_uppercase()
    } else {
        REGION_UNKNOWN.to_string()
    }
}

/// True when the model's filename already is `{region}-{start}-to-{end}`.
fn filename_matches(filename: &str, region: &str, start: &str, end: &str) -> bool {
    filename.trim() == format!("{}-{}-to-{}", region, start, end)
}

/// Reduce a filename to characters safe on every filesystem we export to.
fn sanitize_filename(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn valid_output_passes_through() {
        let log = ExtractedLog::from_model_output(
            "# Chat log".to_string(),
            "20220905",
            "20230503",
            "HK-20220905-to-20230503",
            today(),
        );
        assert_eq!(log.start_date, "20220905");
        assert_eq!(log.end_date, "20230503");
        assert_eq!(log.region, "HK");
        assert_eq!(log.suggested_filename, "HK-20220905-to-20230503");
    }

    #[test]
    fn invalid_dates_fall_back_to_today() {
        let log = ExtractedLog::from_model_output(
            String::new(),
            "yesterday",
            "20231301", // month 13 does not exist
            "AU-yesterday-to-20231301",
            today(),
        );
        assert_eq!(log.start_date, "20240615");
        assert_eq!(log.end_date, "20240615");
        assert_eq!(log.suggested_filename, "AU-20240615-to-20240615");
    }

    #[test]
    fn reversed_range_is_swapped() {
        let log = ExtractedLog::from_model_output(
            String::new(),
            "20230503",
            "20220905",
            "GB-20230503-to-20220905",
            today(),
        );
        assert_eq!(log.start_date, "20220905");
        assert_eq!(log.end_date, "20230503");
        assert_eq!(log.suggested_filename, "GB-20220905-to-20230503");
    }

    #[test]
    fn bad_region_becomes_xx() {
        let log = ExtractedLog::from_model_output(
            String::new(),
            "20240101",
            "20240102",
            "Hong Kong-20240101-to-20240102",
            today(),
        );
        assert_eq!(log.region, "XX");
        assert_eq!(log.suggested_filename, "XX-20240101-to-20240102");
    }

    #[test]
    fn lowercase_region_is_uppercased() {
        let log = ExtractedLog::from_model_output(
            String::new(),
            "20240101",
            "20240102",
            "hk-20240101-to-20240102",
            today(),
        );
        assert_eq!(log.region, "HK");
        // Rebuilt: the raw filename did not match the normalized form.
        assert_eq!(log.suggested_filename, "HK-20240101-to-20240102");
    }

    #[test]
    fn garbage_filename_is_rebuilt() {
        let log = ExtractedLog::from_model_output(
            String::new(),
            "20240101",
            "20240102",
            "../../etc/passwd",
            today(),
        );
        assert_eq!(log.suggested_filename, "XX-20240101-to-20240102");
    }

    #[test]
    fn equal_dates_repeat_the_date() {
        let log = ExtractedLog::from_model_output(
            String::new(),
            "20240101",
            "20240101",
            "US-20240101-to-20240101",
            today(),
        );
        assert_eq!(log.suggested_filename, "US-20240101-to-20240101");
    }

    #[test]
    fn clip_size_helpers() {
        let clip = VideoClip {
            file_name: "rec.mp4".to_string(),
            mime_type: "video/mp4".to_string(),
            bytes: vec![0u8; 3 * 1024 * 1024],
        };
        assert_eq!(clip.size_bytes(), 3 * 1024 * 1024);
        assert!((clip.size_mb() - 3.0).abs() < f64::EPSILON);
        assert!(clip.exceeds_mb(2));
        assert!(!clip.exceeds_mb(3));
    }
}
