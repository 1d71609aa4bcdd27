// file: src/embedding/onnx.rs
// description: sentence-transformer embeddings through fastembed (ONNX runtime)
// reference: https://docs.rs/fastembed

use crate::embedding::Embedder;
use crate::error::{PipelineError, Result};
use fastembed::{
    EmbeddingModel, InitOptions, InitOptionsUserDefined, Pooling, TextEmbedding, TokenizerFiles,
    UserDefinedEmbeddingModel,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct OnnxEmbedder {
    model: TextEmbedding,
    name: String,
    batch_size: Option<usize>,
}

impl OnnxEmbedder {
    /// Loads an exported sentence-transformer from a local directory holding
    /// `model.onnx` (or `onnx/model.onnx`) and its tokenizer files.
    pub fn from_directory(dir: &Path, batch_size: Option<usize>) -> Result<Self> {
        if !dir.is_dir() {
            return Err(PipelineError::ModelLoad(format!(
                "model directory not found: {}",
                dir.display()
            )));
        }

        let onnx_path = [dir.join("model.onnx"), dir.join("onnx").join("model.onnx")]
            .into_iter()
            .find(|p| p.is_file())
            .ok_or_else(|| {
                PipelineError::ModelLoad(format!("no model.onnx under {}", dir.display()))
            })?;

        let tokenizer_files = TokenizerFiles {
            tokenizer_file: read_model_file(&dir.join("tokenizer.json"))?,
            config_file: read_model_file(&dir.join("config.json"))?,
            special_tokens_map_file: read_model_file(&dir.join("special_tokens_map.json"))?,
            tokenizer_config_file: read_model_file(&dir.join("tokenizer_config.json"))?,
        };

        let user_model =
            UserDefinedEmbeddingModel::new(read_model_file(&onnx_path)?, tokenizer_files)
                .with_pooling(Pooling::Mean);

        let model =
            TextEmbedding::try_new_from_user_defined(user_model, InitOptionsUserDefined::default())
                .map_err(|e| PipelineError::ModelLoad(format!("{}: {}", dir.display(), e)))?;

        Ok(Self {
            model,
            name: dir.display().to_string(),
            batch_size,
        })
    }

    /// Loads one of the well-known models fastembed can download by name.
    pub fn from_name(
        name: &str,
        cache_dir: Option<&Path>,
        batch_size: Option<usize>,
    ) -> Result<Self> {
        let known = known_model(name)
            .ok_or_else(|| PipelineError::ModelLoad(format!("unknown model name: {}", name)))?;

        let mut options = InitOptions::new(known).with_show_download_progress(false);
        if let Some(dir) = cache_dir {
            options = options.with_cache_dir(PathBuf::from(dir));
        }

        let model = TextEmbedding::try_new(options)
            .map_err(|e| PipelineError::ModelLoad(format!("{}: {}", name, e)))?;

        Ok(Self {
            model,
            name: name.to_string(),
            batch_size,
        })
    }
}

impl Embedder for OnnxEmbedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        debug!("Embedding {} texts with {}", texts.len(), self.name);
        self.model
            .embed(texts.to_vec(), self.batch_size)
            .map_err(|e| PipelineError::Ranking(format!("embedding failed: {}", e)))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn read_model_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| PipelineError::ModelLoad(format!("{}: {}", path.display(), e)))
}

/// Maps sentence-transformers style names onto fastembed's model catalogue.
fn known_model(name: &str) -> Option<EmbeddingModel> {
    let short = name.rsplit('/').next().unwrap_or(name).to_lowercase();
    match short.as_str() {
        "all-minilm-l6-v2" => Some(EmbeddingModel::AllMiniLML6V2),
        "all-minilm-l12-v2" => Some(EmbeddingModel::AllMiniLML12V2),
        "bge-small-en-v1.5" => Some(EmbeddingModel::BGESmallENV15),
        "bge-base-en-v1.5" => Some(EmbeddingModel::BGEBaseENV15),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_known_model_names() {
        assert!(matches!(
            known_model("all-MiniLM-L6-v2"),
            Some(EmbeddingModel::AllMiniLML6V2)
        ));
        assert!(matches!(
            known_model("sentence-transformers/all-MiniLM-L6-v2"),
            Some(EmbeddingModel::AllMiniLML6V2)
        ));
        assert!(known_model("my-private-model").is_none());
    }

    #[test]
    fn test_missing_directory_is_model_load_error() {
        let result = OnnxEmbedder::from_directory(Path::new("/nonexistent/model"), None);
        assert!(matches!(result, Err(PipelineError::ModelLoad(_))));
    }

    #[test]
    fn test_directory_without_onnx_is_model_load_error() {
        let dir = TempDir::new().unwrap();
        let result = OnnxEmbedder::from_directory(dir.path(), None);
        assert!(matches!(result, Err(PipelineError::ModelLoad(_))));
    }

    #[test]
    fn test_unknown_name_is_model_load_error() {
        let result = OnnxEmbedder::from_name("my-private-model", None, None);
        assert!(matches!(result, Err(PipelineError::ModelLoad(_))));
    }
}
