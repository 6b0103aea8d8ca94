use crate::services::tts::{SpeechError, SpeechRequest, SpeechSynthesizer};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use log::debug;
use serde::{Deserialize, Serialize};
use url::Url;

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.5-pro-preview-tts";

// --- Request wire types ---

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct GenerateSpeechRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct GenerationConfig {
    #[serde(rename = "responseModalities")]
    response_modalities: Vec<String>,
    #[serde(rename = "speechConfig")]
    speech_config: SpeechConfig,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct SpeechConfig {
    #[serde(rename = "voiceConfig")]
    voice_config: VoiceConfig,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct VoiceConfig {
    #[serde(rename = "prebuiltVoiceConfig")]
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct PrebuiltVoiceConfig {
    #[serde(rename = "voiceName")]
    voice_name: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct SystemInstruction {
    parts: Vec<Part>,
}

// --- Response wire types ---

#[derive(Debug, Deserialize)]
struct GenerateSpeechResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(rename = "inlineData")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType", default)]
    mime_type: String,
    #[serde(default)]
    data: String,
}

/// Pure payload construction. The style directive becomes a system
/// instruction only when non-blank; the endpoint rejects empty instruction
/// parts. The request language is not part of this wire format.
pub fn build_request(request: &SpeechRequest) -> GenerateSpeechRequest {
    let system_instruction = if request.style_text.trim().is_empty() {
        None
    } else {
        Some(SystemInstruction {
            parts: vec![Part {
                text: request.style_text.clone(),
            }],
        })
    };

    GenerateSpeechRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: request.text.clone(),
            }],
        }],
        generation_config: GenerationConfig {
            response_modalities: vec!["AUDIO".to_string()],
            speech_config: SpeechConfig {
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig {
                        voice_name: request.voice_id.clone(),
                    },
                },
            },
        },
        system_instruction,
    }
}

// --- Client ---

pub struct GeminiSpeechClient {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiSpeechClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    pub fn with_model(api_key: &str, model: &str) -> Self {
        GeminiSpeechClient {
            api_key: api_key.to_string(),
            model: model.to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> Url {
        let mut url = Url::parse(API_BASE_URL).expect("constant base URL is valid");
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(&format!("{}:generateContent", self.model));
        }
        url.query_pairs_mut().append_pair("key", &self.api_key);
        url
    }

    /// Pull the first audio part out of a parsed response. A candidate may
    /// carry several parts; only ones whose mime type declares audio count.
    fn extract_audio(response: GenerateSpeechResponse) -> Result<Vec<u8>, SpeechError> {
        let parts = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default();

        for part in parts {
            if let Some(inline) = part.inline_data {
                if inline.mime_type.starts_with("audio/") {
                    return general_purpose::STANDARD
                        .decode(&inline.data)
                        .map_err(|_| SpeechError::EmptyResponse);
                }
            }
        }

        Err(SpeechError::EmptyResponse)
    }
}

#[async_trait]
impl SpeechSynthesizer for GeminiSpeechClient {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, SpeechError> {
        if self.api_key.trim().is_empty() {
            return Err(SpeechError::MissingApiKey);
        }

        let url = self.endpoint();
        let body = build_request(request);

        debug!(
            "Requesting speech synthesis: voice={}, text_len={}",
            request.voice_id,
            request.text.len()
        );

        let resp = self.client.post(url).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(SpeechError::Remote { status, body });
        }

        let parsed: GenerateSpeechResponse = resp.json().await?;
        let audio = Self::extract_audio(parsed)?;
        debug!("Received {} bytes of audio", audio.len());
        Ok(audio)
    }
}
