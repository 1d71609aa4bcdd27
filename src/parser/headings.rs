// file: src/parser/headings.rs
// description: outline heading filter producing section records with page spans
// reference: headings delimit sections; each section runs until the next heading starts

use crate::config::{HeuristicProfile, HeuristicsConfig};
use crate::extractor::patterns::{HEADING_MARKERS, PURE_NUMERAL};
use crate::models::{HeadingLevel, HeadingRecord, OutlineSpec, RawHeading};
use tracing::debug;

const UNTITLED: &str = "Untitled";

pub struct HeadingFilter {
    profile: HeuristicProfile,
    min_heading_length: usize,
}

impl HeadingFilter {
    pub fn new(config: &HeuristicsConfig) -> Self {
        Self {
            profile: config.profile,
            min_heading_length: config.min_heading_length,
        }
    }

    /// Cleans the outline and assigns every heading the page span of its section.
    ///
    /// The first record is always the document title at level `H0`, page 1.
    /// `end_page` is the page before the next heading, and `page_count` for
    /// the last one.
    pub fn filter(&self, outline: &OutlineSpec, page_count: u32) -> Vec<HeadingRecord> {
        let title = outline.title.trim();
        let mut headings = vec![HeadingRecord {
            text: if title.is_empty() { UNTITLED } else { title }.to_string(),
            level: HeadingLevel::TITLE,
            page: 1,
            end_page: 0,
        }];

        for raw in &outline.outline {
            match self.clean(&raw.text) {
                Some(text) => headings.push(HeadingRecord {
                    text,
                    level: Self::level_of(raw),
                    page: raw.page.max(1),
                    end_page: 0,
                }),
                None => debug!("Dropped heading {:?} (page {})", raw.text, raw.page),
            }
        }

        let next_pages: Vec<u32> = headings.iter().skip(1).map(|h| h.page).collect();
        for (i, heading) in headings.iter_mut().enumerate() {
            heading.end_page = match next_pages.get(i) {
                Some(next) => next.saturating_sub(1),
                None => page_count,
            };
        }

        headings
    }

    /// Returns the cleaned heading text, or `None` when the entry is rejected.
    fn clean(&self, raw: &str) -> Option<String> {
        let text = raw.trim();

        let text = match self.profile {
            HeuristicProfile::Permissive => text
                .strip_prefix(HEADING_MARKERS)
                .map(str::trim)
                .unwrap_or(text),
            HeuristicProfile::Strict => {
                if PURE_NUMERAL.is_match(text)
                    || text.starts_with(HEADING_MARKERS)
                    || text.ends_with(['.', ',', ';'])
                    || !text.chars().any(char::is_uppercase)
                {
                    return None;
                }
                text
            }
        };

        if text.chars().count() < self.min_heading_length {
            return None;
        }

        Some(text.to_string())
    }

    fn level_of(raw: &RawHeading) -> HeadingLevel {
        match HeadingLevel::parse(&raw.level) {
            Some(level) if !level.is_title() => level,
            Some(_) => HeadingLevel(1),
            None => {
                debug!("Unknown heading level {:?}, treating as H1", raw.level);
                HeadingLevel(1)
            }
        }
    }
}
