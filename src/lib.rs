// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod embedding;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod ranking;
pub mod utils;

pub use config::{
    Config, EmbeddingBackend, HeuristicProfile, HeuristicsConfig, ModelConfig, PathsConfig,
    RankingConfig,
};
pub use embedding::{Embedder, HashingEmbedder, ModelSource, OnnxEmbedder, load_embedder};
pub use error::{PipelineError, Result};
pub use exporter::ReportWriter;
pub use extractor::{PdfTextExtractor, TextExtractor};
pub use models::{
    HeadingLevel, HeadingRecord, JobSpec, OutlineSpec, PersonaContext, RankedItem, Report,
    SectionResult, SubsectionResult,
};
pub use parser::{HeadingFilter, TextNormalizer, TextSegmenter};
pub use pipeline::{PipelineOrchestrator, PipelineStats, ProgressTracker, RunSummary, SectionProcessor};
pub use ranking::{SemanticRanker, cosine_similarity};
pub use utils::{OperationTimer, PerformanceMetrics, Validator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        let _filter = HeadingFilter::new(&config.heuristics);
        let _segmenter = TextSegmenter::new(&config.heuristics);
        let _extractor = PdfTextExtractor::new();
    }
}
