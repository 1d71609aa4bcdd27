// file: src/models/outline.rs
// description: per-document outline input and the filtered heading records built from it
// reference: challenge 1a outline json layout

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Heading depth. `H0` is reserved for the synthetic document title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HeadingLevel(pub u8);

impl HeadingLevel {
    pub const TITLE: HeadingLevel = HeadingLevel(0);

    /// Parses `H1`, `h2`, ... Returns `None` for anything else.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let digits = raw.strip_prefix('H').or_else(|| raw.strip_prefix('h'))?;
        digits.parse::<u8>().ok().map(HeadingLevel)
    }

    pub fn is_title(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.0)
    }
}

impl TryFrom<String> for HeadingLevel {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        HeadingLevel::parse(&value).ok_or_else(|| format!("invalid heading level: {}", value))
    }
}

impl From<HeadingLevel> for String {
    fn from(level: HeadingLevel) -> Self {
        level.to_string()
    }
}

fn default_level() -> String {
    "H1".to_string()
}

fn default_page() -> u32 {
    1
}

/// Outline entry as produced by the upstream heading detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawHeading {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_page")]
    pub page: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutlineSpec {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub outline: Vec<RawHeading>,
}

impl OutlineSpec {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(PipelineError::MissingInputFile {
                path: path.to_path_buf(),
            });
        }

        let raw = fs::read_to_string(path).map_err(|source| PipelineError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(serde_json::from_str(&raw)?)
    }
}

/// A heading that survived filtering, with the page span of its section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingRecord {
    pub text: String,
    pub level: HeadingLevel,
    pub page: u32,
    pub end_page: u32,
}

impl HeadingRecord {
    /// Last page to read for this section. A heading followed by another on
    /// the same page still owns its own start page.
    pub fn last_content_page(&self) -> u32 {
        self.end_page.max(self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_parse() {
        assert_eq!(HeadingLevel::parse("H2"), Some(HeadingLevel(2)));
        assert_eq!(HeadingLevel::parse(" h3 "), Some(HeadingLevel(3)));
        assert_eq!(HeadingLevel::parse("Title"), None);
        assert!(HeadingLevel::TITLE.is_title());
        assert_eq!(HeadingLevel(1).to_string(), "H1");
    }

    #[test]
    fn test_outline_deserialize_with_defaults() {
        let outline: OutlineSpec = serde_json::from_str(
            r#"{"title": "Widget Manual", "outline": [{"text": "Intro", "page": 2}, {"text": "Setup", "level": "H2", "page": 4}]}"#,
        )
        .unwrap();

        assert_eq!(outline.title, "Widget Manual");
        assert_eq!(outline.outline.len(), 2);
        assert_eq!(outline.outline[0].level, "H1");
        assert_eq!(outline.outline[1].page, 4);
    }

    #[test]
    fn test_heading_record_serializes_level_as_string() {
        let record = HeadingRecord {
            text: "Setup".to_string(),
            level: HeadingLevel(2),
            page: 3,
            end_page: 2,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["level"], "H2");
        assert_eq!(record.last_content_page(), 3);
    }
}
