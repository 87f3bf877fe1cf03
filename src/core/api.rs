//! Typed client for the AI helper backend (chat, knowledge base, TTS).
//!
//! Every endpoint wraps its payload in a `{success, error}` envelope;
//! `success: false` surfaces as [`ApiError::Backend`] with the server's
//! message, regardless of HTTP status.

use std::path::Path;

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::core::config::Config;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Backend(String),
    #[error("reading file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid audio payload: {0}")]
    AudioDecode(#[from] base64::DecodeError),
    #[error("unexpected response shape: {0}")]
    UnexpectedResponse(&'static str),
    #[error("request cancelled")]
    Cancelled,
}

/// Role of a history entry, serialized as the backend's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    User,
    Bot,
}

/// One past conversation turn, sent back with each chat request for context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub role: HistoryRole,
    pub content: String,
}

/// Token accounting returned alongside chat replies, for display only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokensInfo {
    #[serde(default)]
    pub estimated_input_tokens: u64,
    #[serde(default)]
    pub max_tokens_used: u64,
    #[serde(default)]
    pub estimated_output_tokens: u64,
}

#[derive(Debug, Clone)]
pub struct ChatReply {
    pub response: String,
    pub tokens_info: Option<TokensInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageInfo {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Metadata for a document accepted into the knowledge base.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedDocument {
    pub file_id: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub pages_count: u64,
    #[serde(default)]
    pub text_length: u64,
    #[serde(default)]
    pub upload_time: String,
    #[serde(default)]
    pub description: String,
}

/// Where a knowledge-base answer chunk came from.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SourceRef {
    #[serde(default)]
    pub file_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub chunk_index: u64,
}

/// One citation backing a knowledge-base answer. `similarity_score` is in [0, 1].
#[derive(Debug, Clone, Deserialize)]
pub struct KbSource {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub similarity_score: f64,
    #[serde(default)]
    pub source: SourceRef,
}

#[derive(Debug, Clone)]
pub struct KbAnswer {
    pub response: String,
    pub sources: Vec<KbSource>,
}

/// Synthesized speech, decoded from the backend's base64 payload.
#[derive(Debug, Clone)]
pub struct SpeechAudio {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Shared `{success, error, message, ...}` envelope. Body fields all carry
/// defaults so failure responses (which omit them) still deserialize.
#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(flatten)]
    body: T,
}

impl<T> Envelope<T> {
    fn into_result(self) -> Result<T, ApiError> {
        if self.success {
            Ok(self.body)
        } else {
            let reason = self
                .error
                .or(self.message)
                .unwrap_or_else(|| "backend reported failure".to_string());
            Err(ApiError::Backend(reason))
        }
    }
}

#[derive(Deserialize, Default)]
struct ChatBody {
    #[serde(default)]
    response: String,
    #[serde(default)]
    tokens_info: Option<TokensInfo>,
}

#[derive(Deserialize, Default)]
struct LanguagesBody {
    #[serde(default)]
    languages: Vec<LanguageInfo>,
}

#[derive(Deserialize, Default)]
struct UploadBody {
    #[serde(default)]
    data: Option<UploadedDocument>,
}

#[derive(Deserialize, Default)]
struct FilesData {
    #[serde(default)]
    files: Vec<UploadedDocument>,
}

#[derive(Deserialize, Default)]
struct FilesBody {
    #[serde(default)]
    data: Option<FilesData>,
}

#[derive(Deserialize, Default)]
struct KbChatBody {
    #[serde(default)]
    response: String,
    #[serde(default)]
    sources: Vec<KbSource>,
}

fn default_mime_type() -> String {
    "audio/mpeg".to_string()
}

#[derive(Deserialize)]
struct TtsBody {
    #[serde(default)]
    audio_base64: String,
    #[serde(default = "default_mime_type")]
    mime_type: String,
}

impl Default for TtsBody {
    fn default() -> Self {
        Self {
            audio_base64: String::new(),
            mime_type: default_mime_type(),
        }
    }
}

/// HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /chat`: send a message with history context. Quick actions get a
    /// lower-temperature, code-only reply on the server side.
    pub async fn chat(
        &self,
        message: &str,
        history: &[HistoryEntry],
        is_quick_action: bool,
    ) -> Result<ChatReply, ApiError> {
        log::debug!(
            "chat request: {} chars, {} history entries, quick_action={}",
            message.len(),
            history.len(),
            is_quick_action
        );
        let env: Envelope<ChatBody> = self
            .http
            .post(self.url("/chat"))
            .json(&json!({
                "message": message,
                "history": history,
                "is_quick_action": is_quick_action,
            }))
            .send()
            .await?
            .json()
            .await?;
        let body = env.into_result()?;
        Ok(ChatReply {
            response: body.response,
            tokens_info: body.tokens_info,
        })
    }

    /// `GET /supported-languages`: the backend's language selector entries.
    pub async fn supported_languages(&self) -> Result<Vec<LanguageInfo>, ApiError> {
        let env: Envelope<LanguagesBody> = self
            .http
            .get(self.url("/supported-languages"))
            .send()
            .await?
            .json()
            .await?;
        Ok(env.into_result()?.languages)
    }

    /// `POST /knowledge-base/upload`: multipart file upload with title and
    /// optional description. Returns the stored document's metadata.
    pub async fn upload_document(
        &self,
        file: &Path,
        title: &str,
        description: &str,
    ) -> Result<UploadedDocument, ApiError> {
        let bytes = tokio::fs::read(file).await?;
        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document.pdf")
            .to_string();
        log::info!("uploading {} ({} bytes)", file_name, bytes.len());

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("title", title.to_string())
            .text("description", description.to_string());

        let env: Envelope<UploadBody> = self
            .http
            .post(self.url("/knowledge-base/upload"))
            .multipart(form)
            .send()
            .await?
            .json()
            .await?;
        env.into_result()?
            .data
            .ok_or(ApiError::UnexpectedResponse("upload reply without data"))
    }

    /// `GET /knowledge-base/files`: metadata for every uploaded document.
    pub async fn list_documents(&self) -> Result<Vec<UploadedDocument>, ApiError> {
        let env: Envelope<FilesBody> = self
            .http
            .get(self.url("/knowledge-base/files"))
            .send()
            .await?
            .json()
            .await?;
        Ok(env
            .into_result()?
            .data
            .map(|d| d.files)
            .unwrap_or_default())
    }

    /// `POST /knowledge-base/chat`: retrieval-augmented question answering
    /// over uploaded documents, optionally restricted to specific files.
    pub async fn ask_knowledge_base(
        &self,
        question: &str,
        file_ids: &[String],
        max_results: u32,
    ) -> Result<KbAnswer, ApiError> {
        let mut payload = json!({
            "message": question,
            "max_results": max_results,
        });
        if !file_ids.is_empty() {
            payload["file_ids"] = json!(file_ids);
        }
        let env: Envelope<KbChatBody> = self
            .http
            .post(self.url("/knowledge-base/chat"))
            .json(&payload)
            .send()
            .await?
            .json()
            .await?;
        let body = env.into_result()?;
        Ok(KbAnswer {
            response: body.response,
            sources: body.sources,
        })
    }

    /// `POST /tts`: synthesize speech for a text, decoded from base64.
    pub async fn synthesize_speech(&self, text: &str) -> Result<SpeechAudio, ApiError> {
        let env: Envelope<TtsBody> = self
            .http
            .post(self.url("/tts"))
            .json(&json!({ "text": text }))
            .send()
            .await?
            .json()
            .await?;
        let body = env.into_result()?;
        let bytes = decode_audio(&body.audio_base64)?;
        Ok(SpeechAudio {
            bytes,
            mime_type: body.mime_type,
        })
    }
}

fn decode_audio(audio_base64: &str) -> Result<Vec<u8>, base64::DecodeError> {
    base64::engine::general_purpose::STANDARD.decode(audio_base64.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_envelope_success() {
        let env: Envelope<ChatBody> = serde_json::from_str(
            r#"{"success": true, "response": "hi", "tokens_info": {
                "estimated_input_tokens": 10,
                "max_tokens_used": 800,
                "estimated_output_tokens": 5
            }}"#,
        )
        .unwrap();
        let body = env.into_result().unwrap();
        assert_eq!(body.response, "hi");
        assert_eq!(body.tokens_info.unwrap().max_tokens_used, 800);
    }

    #[test]
    fn chat_envelope_failure_surfaces_error() {
        let env: Envelope<ChatBody> =
            serde_json::from_str(r#"{"success": false, "error": "Message is required"}"#).unwrap();
        match env.into_result() {
            Err(ApiError::Backend(msg)) => assert_eq!(msg, "Message is required"),
            other => panic!("expected backend error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn failure_envelope_falls_back_to_message_field() {
        let env: Envelope<UploadBody> =
            serde_json::from_str(r#"{"success": false, "message": "File too large"}"#).unwrap();
        match env.into_result() {
            Err(ApiError::Backend(msg)) => assert_eq!(msg, "File too large"),
            other => panic!("expected backend error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn kb_sources_deserialize_with_nested_ref() {
        let env: Envelope<KbChatBody> = serde_json::from_str(
            r#"{"success": true, "response": "answer", "sources": [
                {"content": "chunk text", "similarity_score": 0.87,
                 "source": {"file_id": "u1", "title": "Guide", "filename": "g.pdf", "chunk_index": 2}}
            ]}"#,
        )
        .unwrap();
        let body = env.into_result().unwrap();
        assert_eq!(body.sources.len(), 1);
        assert_eq!(body.sources[0].source.title, "Guide");
        assert!((body.sources[0].similarity_score - 0.87).abs() < 1e-9);
    }

    #[test]
    fn files_envelope_lists_documents() {
        let env: Envelope<FilesBody> = serde_json::from_str(
            r#"{"success": true, "message": "Files retrieved successfully", "data": {
                "files": [
                    {"file_id": "u1", "filename": "guide.pdf", "title": "Guide",
                     "file_size": 2048, "pages_count": 3, "upload_time": "2026-08-01",
                     "description": "style guide"},
                    {"file_id": "u2", "filename": "notes.pdf", "title": "Notes"}
                ],
                "total_files": 2
            }}"#,
        )
        .unwrap();
        let files = env.into_result().unwrap().data.unwrap().files;
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].file_id, "u1");
        assert_eq!(files[0].description, "style guide");
        assert_eq!(files[1].title, "Notes");
    }

    #[test]
    fn files_envelope_without_data_is_empty() {
        let env: Envelope<FilesBody> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        let files = env.into_result().unwrap().data.map(|d| d.files);
        assert!(files.is_none());
    }

    #[test]
    fn history_entry_serializes_type_field() {
        let entry = HistoryEntry {
            role: HistoryRole::Bot,
            content: "ok".into(),
        };
        let v = serde_json::to_value(&entry).unwrap();
        assert_eq!(v["type"], "bot");
        assert_eq!(v["content"], "ok");
    }

    #[test]
    fn audio_decodes_from_base64() {
        let bytes = decode_audio("UklGRg==").unwrap();
        assert_eq!(bytes, b"RIFF");
        assert!(decode_audio("not base64!!").is_err());
    }

    #[test]
    fn tts_body_defaults_mime_type() {
        let env: Envelope<TtsBody> =
            serde_json::from_str(r#"{"success": true, "audio_base64": "UklGRg=="}"#).unwrap();
        let body = env.into_result().unwrap();
        assert_eq!(body.mime_type, "audio/mpeg");
    }
}
