//! Gemini adapter for video analysis.
//!
//! Sends the whole clip inline (base64) to the `generateContent` endpoint with
//! a structured response schema. Implements `AnalyzerPort` with robust JSON
//! parsing and markdown stripping.

use crate::domain::{DomainError, ExtractedLog, VideoClip};
use crate::ports::AnalyzerPort;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Token budget reserved for the model's reasoning pass over timestamps and
/// content flow.
const THINKING_BUDGET: u32 = 10240;

/// Gemini API adapter.
///
/// Talks to `generativelanguage.googleapis.com`; the base URL is injectable
/// for tests.
pub struct GeminiAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiAdapter {
    /// Create a new Gemini adapter against the production endpoint.
    ///
    /// # Arguments
    /// * `api_key` - Gemini API key
    /// * `model` - Model name (e.g., "gemini-3-pro-preview")
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL.to_string())
    }

    /// Create an adapter pointing at a custom base URL (useful for testing).
    pub fn with_base_url(api_key: String, model: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            model,
        }
    }

    /// Build the analysis prompt. The model does all the heavy lifting: OCR,
    /// date resolution, region inference, filename generation.
    fn analysis_prompt() -> &'static str {
        r#"You are an expert OCR and content analysis engine. Analyze this screen recording video frame by frame.

**Task 1: Full Content Extraction (Text & Diagrams)**
- Extract ALL text content visible in the video, including chats, emails, and documents.
- **CRITICAL - Diagram OCR:** For any diagrams, charts, flowcharts, or whiteboards, perform detailed OCR. Transcribe all text labels, node content, connection labels, and legends found within these visual elements. Do not just summarize the diagram; extract the specific text inside it.
- Organize the output logically (e.g., chronological flow of conversation or document structure).

**Task 2: Date Detection**
- Scan the video for any date indicators (System clocks, Message timestamps, Document dates).
- **Date Resolution:**
  - Convert all found dates to YYYYMMDD format.
  - Resolve relative dates (e.g., "Yesterday") using any absolute dates found.
- Determine the **Earliest Date** and **Latest Date** referenced.

**Task 3: Region Detection**
- Analyze the content for geographic clues to determine a 2-letter Region Code (ISO 3166-1 alpha-2 style).
- Look for:
  - Phone prefixes (e.g., +852 = HK, +61 = AU, +44 = GB, +1 = US/CA).
  - Currencies (e.g., HKD, AUD, USD, GBP).
  - City/Location names (e.g., "Sydney" -> AU, "Mong Kok" -> HK).
  - Language context (e.g., Traditional Chinese with English typically indicates HK).
- If no specific region is found, use "GL" (Global) or "XX".

**Task 4: Filename Generation**
- **Rule:** Create a filename string strictly in "[RegionCode]-YYYYMMDD-to-YYYYMMDD" format.
- **Examples:**
  - Hong Kong context: "HK-20220905-to-20230503"
  - Australia context: "AU-20220905-to-20230503"
- If earliest and latest dates are the same, repeat the date.
- If no dates are found, use today's date.

Format the output as a structured JSON object."#
    }

    /// Structured-output schema for the four response fields.
    fn response_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "OBJECT",
            "properties": {
                "extractedContent": {
                    "type": "STRING",
                    "description": "The full extracted log formatted in Markdown, including text from diagrams.",
                },
                "startDate": {
                    "type": "STRING",
                    "description": "The earliest date found in YYYYMMDD format.",
                },
                "endDate": {
                    "type": "STRING",
                    "description": "The latest date found in YYYYMMDD format.",
                },
                "suggestedFilename": {
                    "type": "STRING",
                    "description": "The filename in format Region-YYYYMMDD-to-YYYYMMDD.",
                },
            },
            "required": ["extractedContent", "startDate", "endDate", "suggestedFilename"],
        })
    }

    /// Sanitize JSON response from the model.
    ///
    /// Structured output should arrive clean, but models sometimes wrap JSON
    /// in markdown code blocks anyway. This strips them.
    fn sanitize_json(raw_text: &str) -> String {
        let trimmed = raw_text.trim();

        // Handle markdown code blocks: ```json ... ``` or ``` ... ```
        if trimmed.starts_with("```") {
            let without_prefix = if trimmed.starts_with("```json") {
                trimmed.strip_prefix("```json").unwrap_or(trimmed)
            } else {
                trimmed.strip_prefix("```").unwrap_or(trimmed)
            };

            // Find closing backticks
            if let Some(end_idx) = without_prefix.rfind("```") {
                return without_prefix[..end_idx].trim().to_string();
            }
            return without_prefix.trim().to_string();
        }

        // Handle cases where JSON might be wrapped in other text
        if let Some(start) = trimmed.find('{') {
            if let Some(end) = trimmed.rfind('}') {
                if start < end {
                    return trimmed[start..=end].to_string();
                }
            }
        }

        trimmed.to_string()
    }
}

/// Gemini API request structure (camelCase on the wire).
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
    thinking_config: ThinkingConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

/// Gemini API response structure.
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Parsed model response (matches the response schema).
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelExtraction {
    extracted_content: String,
    start_date: String,
    end_date: String,
    suggested_filename: String,
}

#[async_trait::async_trait]
impl AnalyzerPort for GeminiAdapter {
    async fn analyze(&self, clip: &VideoClip) -> Result<ExtractedLog, DomainError> {
        info!(
            file = %clip.file_name,
            mime = %clip.mime_type,
            size_mb = format!("{:.2}", clip.size_mb()),
            model = %self.model,
            "sending clip to Gemini for analysis"
        );

        let encoded = STANDARD.encode(&clip.bytes);

        // Build request: inline video first, then the prompt
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        inline_data: Some(InlineData {
                            mime_type: clip.mime_type.clone(),
                            data: encoded,
                        }),
                        text: None,
                    },
                    Part {
                        inline_data: None,
                        text: Some(Self::analysis_prompt().to_string()),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Self::response_schema(),
                thinking_config: ThinkingConfig {
                    thinking_budget: THINKING_BUDGET,
                },
            },
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        // Send request (key goes in the query string, never in logs)
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::Ai(format!("HTTP request failed: {}", e)))?;

        // Check status
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "Gemini API returned error");
            return Err(DomainError::Ai(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        // Parse response
        let content_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Ai(format!("Failed to parse API response: {}", e)))?;

        let raw_content = content_response
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .filter(|text| !text.is_empty())
            .ok_or_else(|| DomainError::Ai("No response candidates returned".to_string()))?;

        debug!(raw_len = raw_content.len(), "received Gemini response");

        // Sanitize and parse JSON
        let clean_json = Self::sanitize_json(&raw_content);
        let extraction: ModelExtraction = serde_json::from_str(&clean_json).map_err(|e| {
            warn!(error = %e, json = %clean_json.chars().take(200).collect::<String>(), "JSON parse failed");
            DomainError::Ai(format!("Failed to parse model JSON: {}", e))
        })?;

        // Convert to domain entity; the normalizer enforces the contract
        let log = ExtractedLog::from_model_output(
            extraction.extracted_content,
            &extraction.start_date,
            &extraction.end_date,
            &extraction.suggested_filename,
            Utc::now().date_naive(),
        );

        info!(
            content_len = log.content.len(),
            range = %log.date_range(),
            filename = %log.suggested_filename,
            "analysis complete"
        );

        Ok(log)
    }
}
