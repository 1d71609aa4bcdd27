// file: src/parser/mod.rs
// description: outline and page text heuristics module exports
// reference: internal module structure

pub mod headings;
pub mod normalizer;
pub mod segmenter;

pub use headings::HeadingFilter;
pub use normalizer::TextNormalizer;
pub use segmenter::TextSegmenter;
