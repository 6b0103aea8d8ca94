use crate::services::voice::VoiceProfile;
use async_trait::async_trait;
use thiserror::Error;

pub mod gemini;

/// Everything a synthesis backend needs for one utterance. The language tag
/// rides along for backends with per-request locale support; the Gemini
/// endpoint infers locale from the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    pub text: String,
    pub voice_id: String,
    pub style_text: String,
    pub language: String,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>, profile: &VoiceProfile, language: impl Into<String>) -> Self {
        SpeechRequest {
            text: text.into(),
            voice_id: profile.voice_id.clone(),
            style_text: profile.style_text.clone(),
            language: language.into(),
        }
    }
}

/// Terminal failure classes for one synthesis attempt. None of these are
/// retried; the orchestrator logs and discards.
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("speech API error ({status}): {body}")]
    Remote {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("no audio data in speech API response")]
    EmptyResponse,

    #[error("speech request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize one utterance, returning decoded audio bytes.
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, SpeechError>;
}
