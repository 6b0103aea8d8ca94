//! Fixed voice and language catalogs for the Gemini speech models.
//!
//! The first catalog entry is the default voice used whenever a character
//! has no explicit assignment.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Voice {
    pub id: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub display_name: &'static str,
}

pub const VOICES: &[Voice] = &[
    Voice { id: "Kore", description: "Firm" },
    Voice { id: "Orus", description: "Firm" },
    Voice { id: "Autonoe", description: "Bright" },
    Voice { id: "Umbriel", description: "Easy-going" },
    Voice { id: "Erinome", description: "Clear" },
    Voice { id: "Laomedeia", description: "Upbeat" },
    Voice { id: "Schedar", description: "Even" },
    Voice { id: "Achird", description: "Friendly" },
    Voice { id: "Sadachbia", description: "Lively" },
    Voice { id: "Fenrir", description: "Excitable" },
    Voice { id: "Aoede", description: "Breezy" },
    Voice { id: "Enceladus", description: "Breathy" },
    Voice { id: "Algieba", description: "Smooth" },
    Voice { id: "Algenib", description: "Gravelly" },
    Voice { id: "Achernar", description: "Soft" },
    Voice { id: "Gacrux", description: "Mature" },
    Voice { id: "Zubenelgenubi", description: "Casual" },
    Voice { id: "Sadaltager", description: "Knowledgeable" },
    Voice { id: "Leda", description: "Youthful" },
    Voice { id: "Callirrhoe", description: "Easy-going" },
    Voice { id: "Iapetus", description: "Clear" },
    Voice { id: "Despina", description: "Smooth" },
    Voice { id: "Rasalgethi", description: "Informative" },
    Voice { id: "Alnilam", description: "Firm" },
    Voice { id: "Pulcherrima", description: "Forward" },
    Voice { id: "Vindemiatrix", description: "Gentle" },
    Voice { id: "Sulafat", description: "Warm" },
];

pub const LANGUAGES: &[Language] = &[
    Language { code: "en-US", display_name: "English (US)" },
    Language { code: "en-GB", display_name: "English (UK)" },
    Language { code: "es-ES", display_name: "Spanish (Spain)" },
    Language { code: "es-US", display_name: "Spanish (US)" },
    Language { code: "fr-FR", display_name: "French" },
    Language { code: "de-DE", display_name: "German" },
    Language { code: "it-IT", display_name: "Italian" },
    Language { code: "ja-JP", display_name: "Japanese" },
    Language { code: "ko-KR", display_name: "Korean" },
    Language { code: "pt-BR", display_name: "Portuguese (Brazil)" },
    Language { code: "zh-CN", display_name: "Chinese (Simplified)" },
    Language { code: "hi-IN", display_name: "Hindi" },
    Language { code: "ru-RU", display_name: "Russian" },
];

/// Voice used when a character has no configured assignment.
pub fn default_voice() -> &'static Voice {
    &VOICES[0]
}

/// Directive block offered to hosts as the starting point for a character's
/// narration instructions. The resolver itself never injects this; an
/// unconfigured character simply gets blank style text.
pub const DEFAULT_INSTRUCTIONS: &str = r#"### INSTRUCTION
You are an advanced Audio Engine creating an immersive First-Person roleplay experience.
Your goal is to perform the script below with extreme emotional realism and physical presence.

### HOW TO HANDLE BRACKETS [Action/Tone: ...]
The text inside brackets is your DIRECTORIAL CUE. You must interpret it intelligently:

1. **If it describes a Sound (e.g., [chewing, fabric rustling, moan]):**
   -> GENERATE that sound audibly.

2. **If it describes a Vocal Tone (e.g., [voice drops to a whisper, condescending purr]):**
   -> DO NOT read these words. Instead, APPLY that specific tone to the dialogue that follows.

3. **If it describes a Physical Action (e.g., [chewing slowly, kissing]):**
   -> Perform the action *while* speaking or in between words (e.g., speak with your mouth full, or breathe heavily)."#;
