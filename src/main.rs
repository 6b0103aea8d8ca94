use anyhow::{Context, Result};
use chat2speech::core::config::Settings;
use chat2speech::services::narrator::{AudioSink, NarrationController, NarrationOutcome};
use chat2speech::services::tts::gemini::GeminiSpeechClient;
use chat2speech::services::tts::SpeechSynthesizer;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// Writes synthesized audio to a file instead of playing it. Stands in for
/// the host application's playback layer.
struct FileSink {
    path: PathBuf,
}

#[async_trait]
impl AudioSink for FileSink {
    async fn play(&self, audio: Vec<u8>) -> Result<()> {
        tokio::fs::write(&self.path, &audio)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        println!("Wrote {} bytes to {}", audio.len(), self.path.display());
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let text = match args.next() {
        Some(text) => text,
        None => {
            eprintln!("Usage: chat2speech <text> [character] [output.wav]");
            eprintln!("Reads settings from config.yml; narrates <text> to the output file.");
            std::process::exit(2);
        }
    };
    let character = args.next();
    let output = args.next().unwrap_or_else(|| "narration.wav".to_string());

    let settings = Settings::load("config.yml")?;
    if settings.api_key.trim().is_empty() {
        anyhow::bail!("api_key missing in config.yml");
    }

    let synthesizer =
        Arc::new(GeminiSpeechClient::new(&settings.api_key)) as Arc<dyn SpeechSynthesizer>;
    let sink = Arc::new(FileSink {
        path: PathBuf::from(output),
    }) as Arc<dyn AudioSink>;

    let controller = NarrationController::new(settings, synthesizer, sink);

    match controller.narrate(&text, character.as_deref()).await {
        NarrationOutcome::Played => Ok(()),
        NarrationOutcome::Skipped(reason) => {
            anyhow::bail!("Nothing narrated: {:?}", reason)
        }
        NarrationOutcome::Failed => anyhow::bail!("Narration failed, see log output"),
    }
}
