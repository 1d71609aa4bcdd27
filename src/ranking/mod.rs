// file: src/ranking/mod.rs
// description: embedding similarity ranking module exports
// reference: internal module structure

pub mod ranker;
pub mod similarity;

pub use ranker::SemanticRanker;
pub use similarity::cosine_similarity;
