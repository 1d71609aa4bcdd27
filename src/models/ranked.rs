// file: src/models/ranked.rs
// description: scored items produced by the ranker and the per-document results built from them
// reference: Used for vector similarity ranking results

use crate::models::HeadingRecord;
use serde::{Deserialize, Serialize};

/// An item paired with its cosine similarity to the query (in `[-1, 1]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem<T> {
    pub item: T,
    pub score: f32,
}

impl<T> RankedItem<T> {
    pub fn new(item: T, score: f32) -> Self {
        Self { item, score }
    }

    pub fn into_item(self) -> T {
        self.item
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionResult {
    /// Source PDF file name
    pub document: String,
    pub section: HeadingRecord,
    pub score: f32,
}

impl SectionResult {
    pub fn from_ranked(document: &str, ranked: RankedItem<HeadingRecord>) -> Self {
        Self {
            document: document.to_string(),
            section: ranked.item,
            score: ranked.score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionResult {
    pub document: String,
    pub refined_text: String,
    pub page_number: u32,
}
