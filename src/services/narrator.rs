use crate::core::catalog;
use crate::core::config::Settings;
use crate::core::event::ChatEvent;
use crate::services::text::{FilterFlags, TextNormalizer};
use crate::services::tts::{SpeechError, SpeechRequest, SpeechSynthesizer};
use crate::services::voice::{self, VoiceProfile};
use async_trait::async_trait;
use log::{debug, error, info};
use std::sync::Arc;

/// Playback collaborator. The host owns the actual audio element/device;
/// this crate only hands over decoded bytes.
#[async_trait]
pub trait AudioSink: Send + Sync {
    async fn play(&self, audio: Vec<u8>) -> anyhow::Result<()>;
}

/// Terminal state of one narration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationOutcome {
    /// Policy gate short-circuited the attempt; nothing was sent anywhere.
    Skipped(SkipReason),
    Played,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Disabled,
    NoSpeaker,
    UserMessage,
    EmptyText,
}

/// Drives raw chat events through normalization, voice resolution, request
/// construction, synthesis and playback. Every attempt reads one immutable
/// settings snapshot; updates from the settings UI swap in a new snapshot
/// without disturbing attempts already in flight.
pub struct NarrationController {
    settings: Arc<Settings>,
    normalizer: TextNormalizer,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    sink: Arc<dyn AudioSink>,
}

impl NarrationController {
    pub fn new(
        settings: Settings,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        sink: Arc<dyn AudioSink>,
    ) -> Self {
        NarrationController {
            settings: Arc::new(settings),
            normalizer: TextNormalizer::new(),
            synthesizer,
            sink,
        }
    }

    /// Replace the settings snapshot. In-flight attempts keep the snapshot
    /// they started with.
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = Arc::new(settings);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Entry point for host message events. Fire-and-forget: failures are
    /// logged, never propagated, and never retried.
    pub async fn handle(&self, event: &ChatEvent) -> NarrationOutcome {
        let settings = Arc::clone(&self.settings);

        if !settings.enabled {
            return NarrationOutcome::Skipped(SkipReason::Disabled);
        }

        let speaker = match event.speaker() {
            Some(speaker) => speaker.to_string(),
            None => {
                debug!("No identifiable speaker, skipping narration");
                return NarrationOutcome::Skipped(SkipReason::NoSpeaker);
            }
        };

        if event.is_user && !settings.include_narration {
            return NarrationOutcome::Skipped(SkipReason::UserMessage);
        }

        let text = self
            .normalizer
            .normalize(&event.message, &FilterFlags::from(settings.as_ref()));
        if text.is_empty() {
            debug!("Nothing to narrate after filtering");
            return NarrationOutcome::Skipped(SkipReason::EmptyText);
        }

        let profile = voice::resolve(Some(speaker.as_str()), &settings);
        self.speak(text, &profile, &settings.language).await
    }

    /// Narrate explicitly requested text (message replay button, test
    /// command). Skips the enabled and user-message gates but still filters
    /// the text.
    pub async fn narrate(&self, text: &str, character: Option<&str>) -> NarrationOutcome {
        let settings = Arc::clone(&self.settings);

        let text = self
            .normalizer
            .normalize(text, &FilterFlags::from(settings.as_ref()));
        if text.is_empty() {
            return NarrationOutcome::Skipped(SkipReason::EmptyText);
        }

        let profile = voice::resolve(character, &settings);
        self.speak(text, &profile, &settings.language).await
    }

    /// Connectivity probe: one short synthesis with the default voice and no
    /// style directive. The audio is discarded.
    pub async fn test_connection(&self) -> Result<(), SpeechError> {
        let request = SpeechRequest::new(
            "Hello",
            &VoiceProfile {
                voice_id: catalog::default_voice().id.to_string(),
                style_text: String::new(),
            },
            &self.settings.language,
        );
        self.synthesizer.synthesize(&request).await.map(|_| ())
    }

    async fn speak(
        &self,
        text: String,
        profile: &VoiceProfile,
        language: &str,
    ) -> NarrationOutcome {
        let request = SpeechRequest::new(text, profile, language);

        let audio = match self.synthesizer.synthesize(&request).await {
            Ok(audio) => audio,
            Err(e) => {
                error!("Speech synthesis failed: {}", e);
                return NarrationOutcome::Failed;
            }
        };

        info!(
            "Narrating {} chars with voice {}",
            request.text.len(),
            request.voice_id
        );

        match self.sink.play(audio).await {
            Ok(()) => NarrationOutcome::Played,
            Err(e) => {
                error!("Audio playback failed: {}", e);
                NarrationOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSynthesizer {
        calls: AtomicUsize,
        requests: Mutex<Vec<SpeechRequest>>,
        fail_with_empty: bool,
    }

    #[async_trait]
    impl SpeechSynthesizer for RecordingSynthesizer {
        async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, SpeechError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            if self.fail_with_empty {
                Err(SpeechError::EmptyResponse)
            } else {
                Ok(vec![1, 2, 3])
            }
        }
    }

    #[derive(Default)]
    struct CountingSink {
        plays: AtomicUsize,
    }

    #[async_trait]
    impl AudioSink for CountingSink {
        async fn play(&self, _audio: Vec<u8>) -> anyhow::Result<()> {
            self.plays.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn controller(
        settings: Settings,
    ) -> (
        NarrationController,
        Arc<RecordingSynthesizer>,
        Arc<CountingSink>,
    ) {
        let synth = Arc::new(RecordingSynthesizer::default());
        let sink = Arc::new(CountingSink::default());
        let controller =
            NarrationController::new(settings, synth.clone() as Arc<dyn SpeechSynthesizer>, sink.clone() as Arc<dyn AudioSink>);
        (controller, synth, sink)
    }

    fn enabled_settings() -> Settings {
        Settings {
            enabled: true,
            api_key: "k".to_string(),
            ..Settings::default()
        }
    }

    fn character_event(message: &str) -> ChatEvent {
        ChatEvent {
            message: message.to_string(),
            character_id: Some("avatar_7".to_string()),
            speaker_name: Some("Seraphina".to_string()),
            is_user: false,
        }
    }

    #[tokio::test]
    async fn test_disabled_skips_without_side_effects() {
        let (controller, synth, sink) = controller(Settings::default());
        let outcome = controller.handle(&character_event("Hello")).await;
        assert_eq!(outcome, NarrationOutcome::Skipped(SkipReason::Disabled));
        assert_eq!(synth.calls.load(Ordering::SeqCst), 0);
        assert_eq!(sink.plays.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_user_message_gated_by_include_narration() {
        let mut settings = enabled_settings();
        settings.include_narration = false;
        let (controller, synth, sink) = controller(settings);

        let event = ChatEvent {
            message: "Hello".to_string(),
            character_id: Some("user".to_string()),
            speaker_name: None,
            is_user: true,
        };
        let outcome = controller.handle(&event).await;
        assert_eq!(outcome, NarrationOutcome::Skipped(SkipReason::UserMessage));
        assert_eq!(synth.calls.load(Ordering::SeqCst), 0);
        assert_eq!(sink.plays.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_speaker_skips() {
        let (controller, synth, _) = controller(enabled_settings());
        let event = ChatEvent {
            message: "Hello".to_string(),
            ..ChatEvent::default()
        };
        let outcome = controller.handle(&event).await;
        assert_eq!(outcome, NarrationOutcome::Skipped(SkipReason::NoSpeaker));
        assert_eq!(synth.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_after_filtering_skips() {
        let (controller, synth, _) = controller(enabled_settings());
        let outcome = controller.handle(&character_event("```only code```")).await;
        assert_eq!(outcome, NarrationOutcome::Skipped(SkipReason::EmptyText));
        assert_eq!(synth.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_tagged_block_filtered_and_voice_resolved() {
        let mut settings = enabled_settings();
        settings
            .character_voices
            .insert("avatar_7".to_string(), "Fenrir".to_string());
        let (controller, synth, sink) = controller(settings);

        let outcome = controller
            .handle(&character_event("Hello <b>world</b>"))
            .await;
        assert_eq!(outcome, NarrationOutcome::Played);
        assert_eq!(synth.calls.load(Ordering::SeqCst), 1);
        assert_eq!(sink.plays.load(Ordering::SeqCst), 1);

        let requests = synth.requests.lock().unwrap();
        assert_eq!(requests[0].text, "Hello");
        assert_eq!(requests[0].voice_id, "Fenrir");
        assert_eq!(requests[0].language, "en-US");
    }

    #[tokio::test]
    async fn test_synthesis_failure_never_reaches_playback() {
        let synth = Arc::new(RecordingSynthesizer {
            fail_with_empty: true,
            ..RecordingSynthesizer::default()
        });
        let sink = Arc::new(CountingSink::default());
        let controller = NarrationController::new(
            enabled_settings(),
            synth.clone() as Arc<dyn SpeechSynthesizer>,
            sink.clone() as Arc<dyn AudioSink>,
        );

        let outcome = controller.handle(&character_event("Hello")).await;
        assert_eq!(outcome, NarrationOutcome::Failed);
        assert_eq!(synth.calls.load(Ordering::SeqCst), 1);
        assert_eq!(sink.plays.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_narrate_bypasses_enabled_gate() {
        let (controller, synth, sink) = controller(Settings::default());
        let outcome = controller.narrate("Hello", Some("avatar_7")).await;
        assert_eq!(outcome, NarrationOutcome::Played);
        assert_eq!(synth.calls.load(Ordering::SeqCst), 1);
        assert_eq!(sink.plays.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_narrate_without_character_uses_default_voice() {
        let (controller, synth, _) = controller(Settings::default());
        controller.narrate("Hello", None).await;
        let requests = synth.requests.lock().unwrap();
        assert_eq!(requests[0].voice_id, catalog::default_voice().id);
        assert!(requests[0].style_text.is_empty());
    }

    #[tokio::test]
    async fn test_connection_probe_uses_default_voice() {
        let (controller, synth, sink) = controller(Settings::default());
        controller.test_connection().await.unwrap();
        let requests = synth.requests.lock().unwrap();
        assert_eq!(requests[0].text, "Hello");
        assert_eq!(requests[0].voice_id, catalog::default_voice().id);
        assert!(requests[0].style_text.is_empty());
        assert_eq!(sink.plays.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_settings_swaps_snapshot() {
        let (mut controller, synth, _) = controller(Settings::default());
        assert_eq!(
            controller.handle(&character_event("Hello")).await,
            NarrationOutcome::Skipped(SkipReason::Disabled)
        );

        controller.update_settings(enabled_settings());
        assert_eq!(
            controller.handle(&character_event("Hello")).await,
            NarrationOutcome::Played
        );
        assert_eq!(synth.calls.load(Ordering::SeqCst), 1);
    }
}
