//! Application configuration. API credentials, destinations, thresholds.

use serde::Deserialize;

/// Default model pinned for screen-recording OCR.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-pro-preview";

/// Default Gemini REST base URL.
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Clip size (MB) above which the user is asked to confirm before sending.
/// Inline uploads get slow past this point.
pub const DEFAULT_SIZE_WARN_MB: u64 = 50;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Gemini API key. Read from LONGSHOT_GEMINI_API_KEY.
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Gemini model name. Read from LONGSHOT_GEMINI_MODEL.
    #[serde(default)]
    pub gemini_model: Option<String>,

    /// Gemini REST base URL. Read from LONGSHOT_GEMINI_API_URL.
    #[serde(default)]
    pub gemini_api_url: Option<String>,

    /// OAuth access token with drive.file scope. Read from LONGSHOT_DRIVE_TOKEN.
    #[serde(default)]
    pub drive_token: Option<String>,

    /// Directory for local .txt exports. Read from LONGSHOT_OUTPUT_DIR.
    #[serde(default)]
    pub output_dir: Option<String>,

    /// Size warning threshold in MB. Read from LONGSHOT_SIZE_WARN_MB.
    #[serde(default)]
    pub size_warn_mb: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("LONGSHOT"));
        if let Ok(path) = std::env::var("LONGSHOT_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let cfg: Self = c.build()?.try_deserialize()?;
        Ok(cfg)
    }

    /// Returns the Gemini API key if configured.
    pub fn gemini_api_key(&self) -> Option<String> {
        self.gemini_api_key
            .clone()
            .or_else(|| std::env::var("LONGSHOT_GEMINI_API_KEY").ok())
    }

    /// Returns the model name. Defaults to the pinned preview model.
    pub fn gemini_model_or_default(&self) -> String {
        self.gemini_model
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string())
    }

    /// Returns the Gemini REST base URL.
    pub fn gemini_api_url_or_default(&self) -> String {
        self.gemini_api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string())
    }

    /// Returns true if AI analysis is configured (API key present).
    pub fn is_ai_configured(&self) -> bool {
        self.gemini_api_key().is_some()
    }

    /// Returns the Drive access token if configured.
    pub fn drive_token(&self) -> Option<String> {
        self.drive_token
            .clone()
            .or_else(|| std::env::var("LONGSHOT_DRIVE_TOKEN").ok())
    }

    /// Returns true if the Drive destination is configured.
    pub fn is_drive_configured(&self) -> bool {
        self.drive_token().is_some()
    }

    /// Returns the local export directory. Defaults to "./exports".
    pub fn output_dir_or_default(&self) -> String {
        self.output_dir
            .clone()
            .unwrap_or_else(|| "./exports".to_string())
    }

    /// Returns the clip-size warning threshold in MB. Defaults to 50.
    pub fn size_warn_mb_or_default(&self) -> u64 {
        self.size_warn_mb.unwrap_or(DEFAULT_SIZE_WARN_MB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.gemini_model_or_default(), DEFAULT_GEMINI_MODEL);
        assert_eq!(cfg.gemini_api_url_or_default(), DEFAULT_GEMINI_API_URL);
        assert_eq!(cfg.output_dir_or_default(), "./exports");
        assert_eq!(cfg.size_warn_mb_or_default(), DEFAULT_SIZE_WARN_MB);
    }

    #[test]
    fn explicit_values_win() {
        let cfg = AppConfig {
            gemini_api_key: Some("k".into()),
            gemini_model: Some("gemini-x".into()),
            gemini_api_url: None,
            drive_token: Some("t".into()),
            output_dir: Some("/tmp/out".into()),
            size_warn_mb: Some(10),
        };
        assert!(cfg.is_ai_configured());
        assert!(cfg.is_drive_configured());
        assert_eq!(cfg.gemini_model_or_default(), "gemini-x");
        assert_eq!(cfg.output_dir_or_default(), "/tmp/out");
        assert_eq!(cfg.size_warn_mb_or_default(), 10);
    }
}
