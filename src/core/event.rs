use serde::{Deserialize, Serialize};

/// A message notification from the host chat application. Both the
/// message-received and the message-rendered hooks produce this shape.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ChatEvent {
    pub message: String,

    /// Stable character identifier (avatar id or similar).
    #[serde(default)]
    pub character_id: Option<String>,

    /// Display name, only useful when the host has no stable id.
    #[serde(default)]
    pub speaker_name: Option<String>,

    #[serde(default)]
    pub is_user: bool,
}

impl ChatEvent {
    /// Identity key for per-character lookups. The stable id wins over the
    /// display name; blank values count as absent.
    pub fn speaker(&self) -> Option<&str> {
        non_blank(self.character_id.as_deref()).or_else(|| non_blank(self.speaker_name.as_deref()))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
