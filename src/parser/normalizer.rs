// file: src/parser/normalizer.rs
// description: whitespace normalization for chunk text, previews and dedup keys
// reference: extracted pdf text has arbitrary line wrapping

use crate::extractor::patterns::WHITESPACE_RUN;

pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Collapses every whitespace run to a single space and trims the ends.
    pub fn normalize(&self, content: &str) -> String {
        WHITESPACE_RUN.replace_all(content, " ").trim().to_string()
    }

    /// First `max_chars` characters of the normalized text.
    pub fn preview(&self, content: &str, max_chars: usize) -> String {
        self.normalize(content).chars().take(max_chars).collect()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
