// file: src/embedding/mod.rs
// description: text embedding collaborator and model loading
// reference: internal module structure

pub mod hashing;
pub mod loader;
pub mod onnx;

pub use hashing::HashingEmbedder;
pub use loader::{load_embedder, load_with_fallback, ModelSource};
pub use onnx::OnnxEmbedder;

use crate::error::Result;

/// Turns texts into fixed-dimension vectors. Identical input must give
/// identical output.
pub trait Embedder {
    /// Embeds every text in one batch, returning vectors in input order.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    fn name(&self) -> &str;
}
