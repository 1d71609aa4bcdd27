// file: src/embedding/loader.rs
// description: ordered model load attempts ending in a fatal error
// reference: configured local model first, well-known fallback second

use crate::config::{EmbeddingBackend, ModelConfig};
use crate::embedding::{Embedder, HashingEmbedder, OnnxEmbedder};
use crate::error::{PipelineError, Result};
use std::fmt;
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    LocalDirectory(PathBuf),
    Named(String),
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSource::LocalDirectory(path) => write!(f, "local model {}", path.display()),
            ModelSource::Named(name) => write!(f, "model {}", name),
        }
    }
}

impl ModelSource {
    /// Load order for a config: the configured path, then the named fallback.
    pub fn chain(config: &ModelConfig) -> Vec<ModelSource> {
        let mut sources = vec![ModelSource::LocalDirectory(config.model_path.clone())];
        if !config.fallback_model.trim().is_empty() {
            sources.push(ModelSource::Named(config.fallback_model.clone()));
        }
        sources
    }
}

/// Tries each source in order and returns the first model that loads.
///
/// Every failure is logged; exhausting the list is a `ModelLoad` error
/// naming all attempts.
pub fn load_with_fallback<M, F>(sources: &[ModelSource], mut load: F) -> Result<M>
where
    F: FnMut(&ModelSource) -> Result<M>,
{
    let mut failures = Vec::new();

    for (attempt, source) in sources.iter().enumerate() {
        if attempt == 0 {
            info!("Loading {}", source);
        } else {
            info!("Loading fallback {}", source);
        }

        match load(source) {
            Ok(model) => return Ok(model),
            Err(e) => {
                warn!("Failed to load {}: {}", source, e);
                failures.push(format!("{} ({})", source, e));
            }
        }
    }

    error!("No embedding model could be loaded");
    Err(PipelineError::ModelLoad(if failures.is_empty() {
        "no model sources configured".to_string()
    } else {
        failures.join("; ")
    }))
}

pub fn load_embedder(config: &ModelConfig) -> Result<Box<dyn Embedder>> {
    match config.backend {
        EmbeddingBackend::Hashing => {
            info!(
                "Using feature-hashing embedder ({} dimensions)",
                config.hashing_dimension
            );
            Ok(Box::new(HashingEmbedder::new(config.hashing_dimension)))
        }
        EmbeddingBackend::Fastembed => {
            let sources = ModelSource::chain(config);
            let embedder = load_with_fallback(&sources, |source| match source {
                ModelSource::LocalDirectory(path) => {
                    OnnxEmbedder::from_directory(path, config.batch_size)
                }
                ModelSource::Named(name) => {
                    OnnxEmbedder::from_name(name, config.cache_dir.as_deref(), config.batch_size)
                }
            })?;
            info!("Embedding model ready: {}", embedder.name());
            Ok(Box::new(embedder))
        }
    }
}
