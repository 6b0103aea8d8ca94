pub mod narrator;
pub mod text;
pub mod tts;
pub mod voice;
