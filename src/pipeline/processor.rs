// file: src/pipeline/processor.rs
// description: ranks a document's sections and a section's chunks against the persona
// reference: heading filter + page text + ranker for sections, segmenter + ranker for chunks

use crate::config::Config;
use crate::embedding::Embedder;
use crate::extractor::{self, TextExtractor};
use crate::models::{HeadingRecord, OutlineSpec, PersonaContext, RankedItem};
use crate::parser::{HeadingFilter, TextNormalizer, TextSegmenter};
use crate::ranking::SemanticRanker;
use std::path::Path;
use tracing::{debug, error};

pub struct SectionProcessor<'a> {
    ranker: SemanticRanker<'a>,
    extractor: &'a dyn TextExtractor,
    heading_filter: HeadingFilter,
    segmenter: TextSegmenter,
    normalizer: TextNormalizer,
    preview_chars: usize,
}

impl<'a> SectionProcessor<'a> {
    pub fn new(
        config: &Config,
        embedder: &'a dyn Embedder,
        extractor: &'a dyn TextExtractor,
    ) -> Self {
        Self {
            ranker: SemanticRanker::new(embedder),
            extractor,
            heading_filter: HeadingFilter::new(&config.heuristics),
            segmenter: TextSegmenter::new(&config.heuristics),
            normalizer: TextNormalizer::new(),
            preview_chars: config.ranking.section_preview_chars,
        }
    }

    /// Ranks every surviving heading of a document by relevance to the persona.
    ///
    /// Each heading is scored on its text plus the opening characters of its
    /// section. Ranking failures are logged and yield an empty list.
    pub fn rank_sections(
        &self,
        pdf_path: &Path,
        outline: &OutlineSpec,
        persona: &PersonaContext,
    ) -> Vec<RankedItem<HeadingRecord>> {
        let page_count = extractor::total_pages(self.extractor, pdf_path);
        let headings = self.heading_filter.filter(outline, page_count);
        if headings.is_empty() {
            return Vec::new();
        }

        let ranking_texts: Vec<String> = headings
            .iter()
            .map(|h| {
                format!(
                    "{}: {}",
                    h.text,
                    self.section_preview(pdf_path, h, page_count)
                )
            })
            .collect();

        let indexed: Vec<(usize, HeadingRecord)> = headings.into_iter().enumerate().collect();
        let ranked = self
            .ranker
            .embed_query(persona)
            .and_then(|query| self.ranker.rank(&query, indexed, |(i, _)| ranking_texts[*i].clone()));

        match ranked {
            Ok(ranked) => ranked
                .into_iter()
                .map(|r| RankedItem::new(r.item.1, r.score))
                .collect(),
            Err(e) => {
                error!("Error processing document {}: {}", pdf_path.display(), e);
                Vec::new()
            }
        }
    }

    /// Full text of a section's page span.
    pub fn section_text(&self, pdf_path: &Path, section: &HeadingRecord) -> String {
        extractor::section_content(
            self.extractor,
            pdf_path,
            section.page,
            section.last_content_page(),
        )
    }

    /// Splits a section's text into chunks and ranks them by relevance to the persona.
    pub fn rank_subsections(
        &self,
        section: &HeadingRecord,
        content: &str,
        persona: &PersonaContext,
    ) -> Vec<RankedItem<String>> {
        if content.trim().is_empty() {
            return Vec::new();
        }

        let chunks = self.segmenter.segment(content);
        if chunks.is_empty() {
            debug!("No valid chunks in section '{}'", section.text);
            return Vec::new();
        }

        let ranked = self
            .ranker
            .embed_query(persona)
            .and_then(|query| self.ranker.rank(&query, chunks, |c| c.clone()));

        match ranked {
            Ok(ranked) => ranked,
            Err(e) => {
                error!("Error extracting subsections for '{}': {}", section.text, e);
                Vec::new()
            }
        }
    }

    /// First `preview_chars` characters of the section, reading page by page
    /// until enough text is gathered. Pages past `page_count` are never read,
    /// whatever page the outline claims the section ends on.
    fn section_preview(&self, pdf_path: &Path, heading: &HeadingRecord, page_count: u32) -> String {
        if self.preview_chars == 0 {
            return String::new();
        }

        let last_page = heading.last_content_page().min(page_count);
        let mut parts: Vec<String> = Vec::new();
        let mut gathered_chars = 0;

        for page in heading.page..=last_page {
            let text = extractor::section_content(self.extractor, pdf_path, page, page);
            let text = self.normalizer.normalize(&text);
            if text.is_empty() {
                continue;
            }

            if !parts.is_empty() {
                gathered_chars += 1;
            }
            gathered_chars += text.chars().count();
            parts.push(text);

            if gathered_chars >= self.preview_chars {
                break;
            }
        }

        self.normalizer.preview(&parts.join(" "), self.preview_chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashingEmbedder;
    use crate::error::{PipelineError, Result};
    use crate::extractor::testing::CannedExtractor;
    use crate::models::{HeadingLevel, RawHeading};

    struct FailingEmbedder;

    impl Embedder for FailingEmbedder {
        fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Err(PipelineError::Ranking("backend offline".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    /// Records the texts it is asked to embed.
    struct RecordingEmbedder {
        inner: HashingEmbedder,
        seen: std::cell::RefCell<Vec<String>>,
    }

    impl Embedder for RecordingEmbedder {
        fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            self.seen.borrow_mut().extend(texts.iter().cloned());
            self.inner.embed(texts)
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn test_config() -> Config {
        let mut config = Config::default_config();
        config.heuristics.min_subsection_length = 20;
        config
    }

    fn outline() -> OutlineSpec {
        OutlineSpec {
            title: "Coastal Guide".to_string(),
            outline: vec![
                RawHeading { text: "Beaches and Coves".to_string(), level: "H1".to_string(), page: 2 },
                RawHeading { text: "Museum Opening Hours".to_string(), level: "H1".to_string(), page: 3 },
            ],
        }
    }

    fn pages() -> CannedExtractor {
        CannedExtractor::new(&[
            (1, "Welcome to the guide"),
            (2, "Sandy beaches and quiet coves line the coast, ideal for swimming"),
            (3, "Museum hours vary by season and holidays"),
        ])
    }

    #[test]
    fn test_rank_sections_returns_all_headings() {
        let config = test_config();
        let embedder = HashingEmbedder::new(256);
        let extractor = pages();
        let processor = SectionProcessor::new(&config, &embedder, &extractor);
        let persona = PersonaContext::new("Tourist", "find beaches and coves for swimming");

        let ranked = processor.rank_sections(Path::new("guide.pdf"), &outline(), &persona);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].item.text, "Beaches and Coves");
        assert_eq!(ranked[0].item.end_page, 2);
        assert!(ranked.iter().any(|r| r.item.level == HeadingLevel::TITLE));
    }

    #[test]
    fn test_ranking_text_uses_heading_and_preview() {
        let mut config = test_config();
        config.ranking.section_preview_chars = 12;
        let embedder = RecordingEmbedder {
            inner: HashingEmbedder::new(64),
            seen: std::cell::RefCell::new(Vec::new()),
        };
        let extractor = pages();
        let processor = SectionProcessor::new(&config, &embedder, &extractor);
        let persona = PersonaContext::new("Tourist", "swim");

        processor.rank_sections(Path::new("guide.pdf"), &outline(), &persona);

        let seen = embedder.seen.borrow();
        assert!(seen.contains(&"As a Tourist, swim".to_string()));
        assert!(seen.contains(&"Beaches and Coves: Sandy beache".to_string()));
        assert!(seen.contains(&"Coastal Guide: Welcome to t".to_string()));
    }

    #[test]
    fn test_preview_spans_pages_until_filled() {
        let mut config = test_config();
        config.ranking.section_preview_chars = 30;
        let embedder = HashingEmbedder::new(16);
        let extractor = CannedExtractor::new(&[(1, "Short."), (2, "Second page text here and more")]);
        let processor = SectionProcessor::new(&config, &embedder, &extractor);
        let heading = HeadingRecord {
            text: "Intro".to_string(),
            level: HeadingLevel(1),
            page: 1,
            end_page: 2,
        };

        let preview = processor.section_preview(Path::new("doc.pdf"), &heading, 2);
        assert_eq!(preview, "Short. Second page text here a");
    }

    /// Three-page document that counts every page read.
    struct CountingPages {
        reads: std::cell::Cell<u32>,
    }

    impl TextExtractor for CountingPages {
        fn page_count(&self, _path: &Path) -> Result<u32> {
            Ok(3)
        }

        fn extract_pages(&self, _path: &Path, start: u32, end: u32) -> Result<String> {
            self.reads.set(self.reads.get() + end.saturating_sub(start) + 1);
            Ok(String::new())
        }
    }

    #[test]
    fn test_preview_stops_at_page_count_for_bogus_outline_page() {
        let config = test_config();
        let embedder = HashingEmbedder::new(64);
        let extractor = CountingPages {
            reads: std::cell::Cell::new(0),
        };
        let processor = SectionProcessor::new(&config, &embedder, &extractor);
        let outline = OutlineSpec {
            title: "Short Report".to_string(),
            outline: vec![
                RawHeading { text: "First Part".to_string(), level: "H1".to_string(), page: 2 },
                RawHeading { text: "Bogus Page".to_string(), level: "H1".to_string(), page: 200000 },
            ],
        };
        let persona = PersonaContext::new("Analyst", "summarise the report");

        let ranked = processor.rank_sections(Path::new("report.pdf"), &outline, &persona);

        assert_eq!(ranked.len(), 3);
        // Title reads page 1, "First Part" pages 2-3, "Bogus Page" nothing.
        assert_eq!(extractor.reads.get(), 3);
    }

    #[test]
    fn test_embedding_failure_degrades_to_empty() {
        let config = test_config();
        let extractor = pages();
        let processor = SectionProcessor::new(&config, &FailingEmbedder, &extractor);
        let persona = PersonaContext::new("Tourist", "swim");

        assert!(processor.rank_sections(Path::new("guide.pdf"), &outline(), &persona).is_empty());

        let section = HeadingRecord {
            text: "Beaches and Coves".to_string(),
            level: HeadingLevel(1),
            page: 2,
            end_page: 2,
        };
        let content = "Sandy beaches and quiet coves line the coast, ideal for swimming";
        assert!(processor.rank_subsections(&section, content, &persona).is_empty());
    }

    #[test]
    fn test_rank_subsections() {
        let config = test_config();
        let embedder = HashingEmbedder::new(256);
        let extractor = pages();
        let processor = SectionProcessor::new(&config, &embedder, &extractor);
        let persona = PersonaContext::new("Foodie", "find seafood restaurants");
        let section = HeadingRecord {
            text: "Eating Out".to_string(),
            level: HeadingLevel(1),
            page: 4,
            end_page: 5,
        };
        let content = "The old town has narrow streets and small galleries to browse.\n\n\
                       Seafood restaurants by the harbour serve fresh catch daily.\n\n\
                       tiny";

        let ranked = processor.rank_subsections(&section, content, &persona);

        assert_eq!(ranked.len(), 2);
        assert_eq!(
            ranked[0].item,
            "Seafood restaurants by the harbour serve fresh catch daily."
        );
    }

    #[test]
    fn test_rank_subsections_empty_inputs() {
        let config = test_config();
        let embedder = HashingEmbedder::new(32);
        let extractor = pages();
        let processor = SectionProcessor::new(&config, &embedder, &extractor);
        let persona = PersonaContext::new("Foodie", "eat");
        let section = HeadingRecord {
            text: "Empty".to_string(),
            level: HeadingLevel(1),
            page: 1,
            end_page: 1,
        };

        assert!(processor.rank_subsections(&section, "   \n", &persona).is_empty());
        assert!(processor.rank_subsections(&section, "too short", &persona).is_empty());
    }

    #[test]
    fn test_section_text_covers_span() {
        let config = test_config();
        let embedder = HashingEmbedder::new(32);
        let extractor = pages();
        let processor = SectionProcessor::new(&config, &embedder, &extractor);
        let heading = HeadingRecord {
            text: "Middle".to_string(),
            level: HeadingLevel(1),
            page: 2,
            end_page: 3,
        };

        let text = processor.section_text(Path::new("guide.pdf"), &heading);
        assert!(text.starts_with("Sandy beaches"));
        assert!(text.ends_with("holidays"));
    }
}
