use crate::core::catalog;
use crate::core::config::Settings;

/// Voice id plus the composed delivery directive for one character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceProfile {
    pub voice_id: String,
    pub style_text: String,
}

/// Look up the voice and style configuration for a character. Absent or
/// unknown characters get the catalog default voice and blank style text;
/// this never fails.
pub fn resolve(character: Option<&str>, settings: &Settings) -> VoiceProfile {
    let voice_id = character
        .and_then(|c| settings.character_voices.get(c))
        .cloned()
        .unwrap_or_else(|| catalog::default_voice().id.to_string());

    let style_text = match character {
        Some(c) => compose_style_text(
            settings.character_instructions.get(c).map(String::as_str),
            settings.character_personality.get(c).map(String::as_str),
            settings.character_vocal_traits.get(c).map(String::as_str),
        ),
        None => String::new(),
    };

    VoiceProfile { voice_id, style_text }
}

/// Concatenates the instruction text with optional personality and vocal
/// sections. Sections are appended only when non-blank after trimming.
fn compose_style_text(
    instructions: Option<&str>,
    personality: Option<&str>,
    vocal_traits: Option<&str>,
) -> String {
    let mut prompt = instructions.unwrap_or("").to_string();

    if let Some(personality) = personality {
        if !personality.trim().is_empty() {
            prompt.push_str("\n\n### CHARACTER PERSONALITY\n");
            prompt.push_str(personality);
        }
    }

    if let Some(vocal) = vocal_traits {
        if !vocal.trim().is_empty() {
            prompt.push_str("\n\n### VOCAL CHARACTERISTICS\n");
            prompt.push_str(vocal);
        }
    }

    prompt
}
