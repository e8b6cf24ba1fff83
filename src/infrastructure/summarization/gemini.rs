//! Gemini API summarizer adapter
//!
//! Audio goes through the Files API (resumable upload) and is then
//! referenced from a `generateContent` request alongside the prompt.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ports::{
    DownloadedRecording, SummarizationError, Summarizer, UploadedAudio,
};
use crate::domain::config::DEFAULT_GEMINI_MODEL;
use crate::domain::summary::SummaryPrompt;

/// Gemini API base URL
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Response header carrying the session URL of a resumable upload
const UPLOAD_URL_HEADER: &str = "x-goog-upload-url";

/// Request header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Display name attached to uploaded recordings
const UPLOAD_DISPLAY_NAME: &str = "call-recording";

const PROCESSING_POLL_INTERVAL: Duration = Duration::from_secs(2);
const PROCESSING_MAX_POLLS: u32 = 15;

// Request types for Gemini API

#[derive(Debug, Serialize)]
struct StartUploadRequest<'a> {
    file: FileMetadata<'a>,
}

#[derive(Debug, Serialize)]
struct FileMetadata<'a> {
    display_name: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_data: Option<FileData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileData {
    mime_type: String,
    file_uri: String,
}

// Response types for Gemini API

#[derive(Debug, Deserialize)]
struct UploadFileResponse {
    file: RemoteFile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteFile {
    name: String,
    uri: String,
    mime_type: Option<String>,
    state: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Gemini API summarizer
pub struct GeminiSummarizer {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiSummarizer {
    /// Create a new Gemini summarizer with the given API key.
    ///
    /// A blank key is accepted here and reported by `ensure_ready`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(api_key, DEFAULT_GEMINI_MODEL)
    }

    /// Create a new Gemini summarizer with a custom model
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into().trim().to_string(),
            model: model.into(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Point the adapter at a different host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn upload_url(&self) -> String {
        format!("{}/upload/v1beta/files", self.base_url)
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn file_url(&self, name: &str) -> String {
        format!("{}/v1beta/{}", self.base_url, name)
    }

    /// Build the request body
    fn build_request(&self, audio: &UploadedAudio, prompt: &SummaryPrompt) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part {
                        text: None,
                        file_data: Some(FileData {
                            mime_type: audio.mime_type.clone(),
                            file_uri: audio.uri.clone(),
                        }),
                    },
                    Part {
                        text: Some(prompt.content().to_string()),
                        file_data: None,
                    },
                ],
            }],
        }
    }

    /// Extract text from response
    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        let parts: Vec<&str> = response
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(""))
        }
    }

    /// Map HTTP failures onto summarization errors
    async fn check_status(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, SummarizationError> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SummarizationError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SummarizationError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SummarizationError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        Ok(response)
    }

    /// Wait for a freshly uploaded file to leave the PROCESSING state
    async fn wait_until_active(&self, mut file: RemoteFile) -> Result<RemoteFile, SummarizationError> {
        for _ in 0..PROCESSING_MAX_POLLS {
            let state = file.state.clone();
            match state.as_deref() {
                Some("PROCESSING") => {}
                Some("FAILED") => {
                    return Err(SummarizationError::UploadFailed(format!(
                        "{} failed server-side processing",
                        file.name
                    )))
                }
                _ => return Ok(file),
            }

            debug!(file = %file.name, "Waiting for uploaded file to become active");
            tokio::time::sleep(PROCESSING_POLL_INTERVAL).await;

            let response = self
                .client
                .get(self.file_url(&file.name))
                .header(API_KEY_HEADER, &self.api_key)
                .send()
                .await
                .map_err(|e| SummarizationError::RequestFailed(transport_error(e)))?;
            file = Self::check_status(response)
                .await?
                .json()
                .await
                .map_err(|e| SummarizationError::ParseError(transport_error(e)))?;
        }

        Err(SummarizationError::UploadFailed(format!(
            "{} still processing after {} checks",
            file.name, PROCESSING_MAX_POLLS
        )))
    }
}

/// Describe a reqwest failure without the request URL
fn transport_error(e: reqwest::Error) -> String {
    e.without_url().to_string()
}

#[async_trait]
impl Summarizer for GeminiSummarizer {
    fn ensure_ready(&self) -> Result<(), SummarizationError> {
        if self.api_key.is_empty() {
            Err(SummarizationError::MissingApiKey)
        } else {
            Ok(())
        }
    }

    async fn upload(
        &self,
        recording: &DownloadedRecording,
    ) -> Result<UploadedAudio, SummarizationError> {
        self.ensure_ready()?;

        let bytes = tokio::fs::read(recording.path())
            .await
            .map_err(|e| SummarizationError::Io(e.to_string()))?;
        let mime_type = recording.format().mime_type();

        let start = self
            .client
            .post(self.upload_url())
            .header(API_KEY_HEADER, &self.api_key)
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", bytes.len().to_string())
            .header("X-Goog-Upload-Header-Content-Type", mime_type)
            .json(&StartUploadRequest {
                file: FileMetadata {
                    display_name: UPLOAD_DISPLAY_NAME,
                },
            })
            .send()
            .await
            .map_err(|e| SummarizationError::RequestFailed(transport_error(e)))?;
        let start = Self::check_status(start).await?;

        let session_url = start
            .headers()
            .get(UPLOAD_URL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                SummarizationError::UploadFailed("no upload session URL in response".to_string())
            })?;

        let response = self
            .client
            .post(&session_url)
            .header("X-Goog-Upload-Offset", "0")
            .header("X-Goog-Upload-Command", "upload, finalize")
            .body(bytes)
            .send()
            .await
            .map_err(|e| SummarizationError::UploadFailed(transport_error(e)))?;

        let uploaded: UploadFileResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| SummarizationError::ParseError(transport_error(e)))?;

        let pending = UploadedAudio {
            name: uploaded.file.name.clone(),
            uri: uploaded.file.uri.clone(),
            mime_type: mime_type.to_string(),
        };

        let file = match self.wait_until_active(uploaded.file).await {
            Ok(file) => file,
            Err(e) => {
                if let Err(delete_error) = self.delete(&pending).await {
                    debug!(file = %pending.name, error = %delete_error, "Failed to delete unprocessed upload");
                }
                return Err(e);
            }
        };
        debug!(file = %file.name, "Uploaded recording");

        Ok(UploadedAudio {
            mime_type: file.mime_type.unwrap_or_else(|| mime_type.to_string()),
            name: file.name,
            uri: file.uri,
        })
    }

    async fn summarize(
        &self,
        audio: &UploadedAudio,
        prompt: &SummaryPrompt,
    ) -> Result<String, SummarizationError> {
        let response = self
            .client
            .post(self.generate_url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&self.build_request(audio, prompt))
            .send()
            .await
            .map_err(|e| SummarizationError::RequestFailed(transport_error(e)))?;

        // Parse response
        let response: GenerateContentResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| SummarizationError::ParseError(transport_error(e)))?;

        // Check for API error in response body
        if let Some(error) = response.error {
            return Err(SummarizationError::ApiError(error.message));
        }

        let text = Self::extract_text(&response).ok_or(SummarizationError::EmptyResponse)?;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SummarizationError::EmptyResponse);
        }

        Ok(trimmed.to_string())
    }

    async fn delete(&self, audio: &UploadedAudio) -> Result<(), SummarizationError> {
        let response = self
            .client
            .delete(self.file_url(&audio.name))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| SummarizationError::RequestFailed(transport_error(e)))?;
        Self::check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uploaded() -> UploadedAudio {
        UploadedAudio {
            name: "files/abc123".to_string(),
            uri: "https://generativelanguage.googleapis.com/v1beta/files/abc123".to_string(),
            mime_type: "audio/mp3".to_string(),
        }
    }

    #[test]
    fn build_request_references_file_then_prompt() {
        let summarizer = GeminiSummarizer::new("test-key");
        let request = summarizer.build_request(&uploaded(), &SummaryPrompt::default());

        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.contents[0].role, "user");
        let parts = &request.contents[0].parts;
        assert_eq!(parts.len(), 2);
        assert!(parts[0].file_data.is_some());
        assert!(parts[1].text.as_deref().unwrap().contains("ネクストアクション"));
    }

    #[test]
    fn request_serializes_camel_case_file_data() {
        let summarizer = GeminiSummarizer::new("test-key");
        let json = serde_json::to_value(summarizer.build_request(&uploaded(), &SummaryPrompt::default()))
            .unwrap();

        let file_data = &json["contents"][0]["parts"][0]["fileData"];
        assert_eq!(file_data["mimeType"], "audio/mp3");
        assert_eq!(file_data["fileUri"], uploaded().uri);
        assert!(json["contents"][0]["parts"][0].get("text").is_none());
    }

    #[test]
    fn urls_carry_model_but_not_key() {
        let summarizer = GeminiSummarizer::new("test-api-key");

        let url = summarizer.generate_url();
        assert!(url.contains(DEFAULT_GEMINI_MODEL));
        assert!(url.contains("generateContent"));
        assert!(!url.contains("test-api-key"));

        assert_eq!(
            summarizer.upload_url(),
            "https://generativelanguage.googleapis.com/upload/v1beta/files"
        );
        assert_eq!(
            summarizer.file_url("files/abc"),
            "https://generativelanguage.googleapis.com/v1beta/files/abc"
        );
    }

    #[test]
    fn custom_model_and_base_url() {
        let summarizer =
            GeminiSummarizer::with_model("key", "custom-model").with_base_url("http://localhost:1234/");
        assert_eq!(
            summarizer.generate_url(),
            "http://localhost:1234/v1beta/models/custom-model:generateContent"
        );
    }

    #[tokio::test]
    async fn transport_errors_do_not_expose_key() {
        let summarizer =
            GeminiSummarizer::new("secret-key-123").with_base_url("http://127.0.0.1:1");
        let err = summarizer.delete(&uploaded()).await.unwrap_err();

        assert!(matches!(err, SummarizationError::RequestFailed(_)));
        assert!(!err.to_string().contains("secret-key-123"));
    }

    #[test]
    fn blank_key_is_not_ready() {
        assert!(matches!(
            GeminiSummarizer::new("  ").ensure_ready(),
            Err(SummarizationError::MissingApiKey)
        ));
        assert!(GeminiSummarizer::new("key").ensure_ready().is_ok());
    }

    #[test]
    fn extract_text_joins_parts() {
        let response = GenerateContentResponse {
            candidates: Some(vec![Candidate {
                content: Some(CandidateContent {
                    parts: Some(vec![
                        ResponsePart {
                            text: Some("発信者: 田中".to_string()),
                        },
                        ResponsePart {
                            text: Some("\n用件: 予約".to_string()),
                        },
                    ]),
                }),
            }]),
            error: None,
        };

        let text = GeminiSummarizer::extract_text(&response);
        assert_eq!(text, Some("発信者: 田中\n用件: 予約".to_string()));
    }

    #[test]
    fn extract_text_empty_response() {
        let response = GenerateContentResponse {
            candidates: None,
            error: None,
        };

        assert!(GeminiSummarizer::extract_text(&response).is_none());
    }

    #[test]
    fn upload_response_parses_file() {
        let json = r#"{"file":{"name":"files/x1","uri":"https://g/files/x1","mimeType":"audio/mp3","state":"ACTIVE"}}"#;
        let parsed: UploadFileResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.file.name, "files/x1");
        assert_eq!(parsed.file.state.as_deref(), Some("ACTIVE"));
    }
}
