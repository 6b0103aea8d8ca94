use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// User-facing settings, loaded once and handed to the pipeline as an
/// immutable snapshot per narration attempt. The settings UI owns mutation;
/// this crate only reads. Unknown keys in the file are ignored.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_language")]
    pub language: String,

    /// Narrate user-authored messages too.
    #[serde(default = "default_true")]
    pub include_narration: bool,

    /// Leave literal asterisk characters in the narrated text.
    #[serde(default)]
    pub pass_asterisks: bool,

    /// Narrate only double-quoted spans.
    #[serde(default)]
    pub only_quotes: bool,

    #[serde(default = "default_true")]
    pub skip_codeblocks: bool,

    #[serde(default = "default_true")]
    pub skip_tagged_blocks: bool,

    /// Drop everything inside *...* spans, quotes included.
    #[serde(default)]
    pub ignore_asterisks: bool,

    #[serde(default)]
    pub character_voices: HashMap<String, String>,

    #[serde(default)]
    pub character_instructions: HashMap<String, String>,

    #[serde(default)]
    pub character_personality: HashMap<String, String>,

    #[serde(default)]
    pub character_vocal_traits: HashMap<String, String>,
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            enabled: false,
            api_key: String::new(),
            language: default_language(),
            include_narration: true,
            pass_asterisks: false,
            only_quotes: false,
            skip_codeblocks: true,
            skip_tagged_blocks: true,
            ignore_asterisks: false,
            character_voices: HashMap::new(),
            character_instructions: HashMap::new(),
            character_personality: HashMap::new(),
            character_vocal_traits: HashMap::new(),
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("{} not found. Please create one.", path.display());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let settings: Settings = serde_yaml_ng::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path.as_ref(), content).context("Failed to write settings file")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_settings() {
        let s = Settings::default();
        assert!(!s.enabled);
        assert!(s.api_key.is_empty());
        assert_eq!(s.language, "en-US");
        assert!(s.include_narration);
        assert!(!s.pass_asterisks);
        assert!(!s.only_quotes);
        assert!(s.skip_codeblocks);
        assert!(s.skip_tagged_blocks);
        assert!(!s.ignore_asterisks);
        assert!(s.character_voices.is_empty());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let s: Settings =
            serde_yaml_ng::from_str("enabled: true\nsome_future_flag: 42\n").unwrap();
        assert!(s.enabled);
    }

    #[test]
    fn test_load_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yml");

        let mut settings = Settings::default();
        settings.enabled = true;
        settings.language = "ja-JP".to_string();
        settings
            .character_voices
            .insert("avatar_42".to_string(), "Fenrir".to_string());
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert!(loaded.enabled);
        assert_eq!(loaded.language, "ja-JP");
        assert_eq!(
            loaded.character_voices.get("avatar_42").map(String::as_str),
            Some("Fenrir")
        );
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load(dir.path().join("nope.yml")).is_err());
    }
}
