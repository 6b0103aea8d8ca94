use crate::core::config::Settings;
use regex::Regex;

/// The six text filters, extracted from [`Settings`] so the normalizer can be
/// driven without a full settings snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterFlags {
    pub skip_codeblocks: bool,
    pub skip_tagged_blocks: bool,
    pub ignore_asterisks: bool,
    pub only_quotes: bool,
    pub pass_asterisks: bool,
}

impl From<&Settings> for FilterFlags {
    fn from(settings: &Settings) -> Self {
        FilterFlags {
            skip_codeblocks: settings.skip_codeblocks,
            skip_tagged_blocks: settings.skip_tagged_blocks,
            ignore_asterisks: settings.ignore_asterisks,
            only_quotes: settings.only_quotes,
            pass_asterisks: settings.pass_asterisks,
        }
    }
}

/// Strips markup a speech engine should not read aloud. Filters are applied
/// in a fixed order, each narrowing the candidate text further; unbalanced
/// delimiters simply fail to match and pass through untouched.
pub struct TextNormalizer {
    fenced_code: Regex,
    inline_code: Regex,
    tagged_block: Regex,
    asterisk_span: Regex,
    quoted_span: Regex,
}

impl TextNormalizer {
    pub fn new() -> Self {
        // Literal patterns; compilation cannot fail.
        TextNormalizer {
            fenced_code: Regex::new(r"(?s)```.*?```").unwrap(),
            inline_code: Regex::new(r"`[^`]+`").unwrap(),
            tagged_block: Regex::new(r"(?s)<[^>]+>.*?</[^>]+>").unwrap(),
            asterisk_span: Regex::new(r"\*[^*]+\*").unwrap(),
            quoted_span: Regex::new(r#""[^"]+""#).unwrap(),
        }
    }

    pub fn normalize(&self, text: &str, flags: &FilterFlags) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut processed = text.to_string();

        if flags.skip_codeblocks {
            processed = self.fenced_code.replace_all(&processed, "").into_owned();
            processed = self.inline_code.replace_all(&processed, "").into_owned();
        }

        if flags.skip_tagged_blocks {
            processed = self.tagged_block.replace_all(&processed, "").into_owned();
        }

        if flags.ignore_asterisks {
            processed = self.asterisk_span.replace_all(&processed, "").into_owned();
        }

        if flags.only_quotes {
            let quotes: Vec<&str> = self
                .quoted_span
                .find_iter(&processed)
                .map(|m| m.as_str())
                .collect();
            processed = quotes.join(" ");
        }

        if !flags.pass_asterisks {
            processed = processed.replace('*', "");
        }

        processed.trim().to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
