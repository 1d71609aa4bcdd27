// file: src/parser/segmenter.rs
// description: splits extracted page text into paragraph-like chunks
// reference: pdf text carries no paragraph markup, only line breaks and typographic cues

use crate::config::{HeuristicProfile, HeuristicsConfig};
use crate::extractor::patterns::LIST_MARKER;

pub struct TextSegmenter {
    profile: HeuristicProfile,
    min_length: usize,
    max_length: usize,
    soft_cap: usize,
    boilerplate_terms: Vec<String>,
}

impl TextSegmenter {
    pub fn new(config: &HeuristicsConfig) -> Self {
        Self {
            profile: config.profile,
            min_length: config.min_subsection_length,
            max_length: config.max_subsection_length,
            soft_cap: config.paragraph_soft_cap,
            boilerplate_terms: config
                .boilerplate_terms
                .iter()
                .map(|t| t.to_lowercase())
                .collect(),
        }
    }

    /// Splits `text` into chunks and keeps those that pass the length and
    /// boilerplate filters.
    pub fn segment(&self, text: &str) -> Vec<String> {
        self.split_paragraphs(text)
            .into_iter()
            .filter(|p| self.is_valid(p))
            .collect()
    }

    fn split_paragraphs(&self, text: &str) -> Vec<String> {
        let mut paragraphs = Vec::new();
        let mut current = String::new();

        for line in text.lines() {
            let stripped = line.trim();
            if stripped.is_empty() {
                flush(&mut current, &mut paragraphs);
                continue;
            }

            if self.starts_new_paragraph(stripped, &current) {
                flush(&mut current, &mut paragraphs);
                current.push_str(stripped);
            } else {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(stripped);
            }
        }

        flush(&mut current, &mut paragraphs);
        paragraphs
    }

    fn starts_new_paragraph(&self, line: &str, current: &str) -> bool {
        if LIST_MARKER.is_match(line) || is_all_caps(line) {
            return true;
        }

        match self.profile {
            HeuristicProfile::Permissive => {
                !current.is_empty() && current.chars().count() > self.soft_cap
            }
            HeuristicProfile::Strict => is_title_case(line),
        }
    }

    fn is_valid(&self, paragraph: &str) -> bool {
        let len = paragraph.chars().count();
        if len < self.min_length || len > self.max_length {
            return false;
        }

        if self.profile == HeuristicProfile::Permissive && !self.boilerplate_terms.is_empty() {
            let lower = paragraph.to_lowercase();
            if self.boilerplate_terms.iter().any(|t| lower.contains(t.as_str())) {
                return false;
            }
        }

        true
    }
}

fn flush(current: &mut String, paragraphs: &mut Vec<String>) {
    if !current.is_empty() {
        paragraphs.push(std::mem::take(current));
    }
}

/// At least one cased letter and no lowercase ones.
fn is_all_caps(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase)
}

/// Every cased run starts with an uppercase letter followed only by lowercase ones.
fn is_title_case(line: &str) -> bool {
    let mut previous_cased = false;
    let mut seen_cased = false;

    for c in line.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            seen_cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            seen_cased = true;
        } else {
            previous_cased = false;
        }
    }

    seen_cased
}
