// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub paths: PathsConfig,
    pub model: ModelConfig,
    pub ranking: RankingConfig,
    pub heuristics: HeuristicsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub job_file: String,
    pub output_file: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// ONNX sentence-transformer through fastembed
    Fastembed,
    /// Deterministic feature hashing, no model files required
    Hashing,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    pub backend: EmbeddingBackend,
    pub model_path: PathBuf,
    pub fallback_model: String,
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    #[serde(default)]
    pub batch_size: Option<usize>,
    pub hashing_dimension: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RankingConfig {
    pub top_sections: usize,
    pub top_subsections: usize,
    pub section_preview_chars: usize,
}

/// Which generation of the heading/paragraph heuristics is active.
///
/// Exactly one profile applies to a run; the two are never combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicProfile {
    Permissive,
    Strict,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HeuristicsConfig {
    pub profile: HeuristicProfile,
    pub min_heading_length: usize,
    pub min_subsection_length: usize,
    pub max_subsection_length: usize,
    pub paragraph_soft_cap: usize,
    #[serde(default)]
    pub boilerplate_terms: Vec<String>,
}

impl HeuristicsConfig {
    pub fn permissive() -> Self {
        Self {
            profile: HeuristicProfile::Permissive,
            min_heading_length: 5,
            min_subsection_length: 50,
            max_subsection_length: 1000,
            paragraph_soft_cap: 200,
            boilerplate_terms: vec![
                "copyright".to_string(),
                "page".to_string(),
                "confidential".to_string(),
            ],
        }
    }

    pub fn strict() -> Self {
        Self {
            profile: HeuristicProfile::Strict,
            min_heading_length: 5,
            min_subsection_length: 30,
            max_subsection_length: 300,
            paragraph_soft_cap: 200,
            boilerplate_terms: vec![],
        }
    }

    /// Preset thresholds for a profile.
    pub fn for_profile(profile: HeuristicProfile) -> Self {
        match profile {
            HeuristicProfile::Permissive => Self::permissive(),
            HeuristicProfile::Strict => Self::strict(),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();
        let path = path.unwrap_or_else(|| Path::new("config/default.toml"));
        Self::from_sources(path, Self::environment())
    }

    /// Environment overrides: `SECTION_RANK__<SECTION>__<KEY>`, with
    /// comma-separated values for list keys.
    fn environment() -> config::Environment {
        config::Environment::with_prefix("SECTION_RANK")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("heuristics.boilerplate_terms")
    }

    fn from_sources(path: &Path, environment: config::Environment) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(environment)
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            paths: PathsConfig {
                input_dir: PathBuf::from("/app/input"),
                output_dir: PathBuf::from("/app/output"),
                job_file: "challenge1b_input.json".to_string(),
                output_file: "output.json".to_string(),
            },
            model: ModelConfig {
                backend: EmbeddingBackend::Fastembed,
                model_path: PathBuf::from("/app/models/local-model"),
                fallback_model: "all-MiniLM-L6-v2".to_string(),
                cache_dir: None,
                batch_size: None,
                hashing_dimension: 384,
            },
            ranking: RankingConfig {
                top_sections: 5,
                top_subsections: 5,
                section_preview_chars: 50,
            },
            heuristics: HeuristicsConfig::permissive(),
        }
    }

    /// Switches the heuristic profile, resetting thresholds to that profile's presets.
    pub fn with_profile(mut self, profile: HeuristicProfile) -> Self {
        if self.heuristics.profile != profile {
            self.heuristics = HeuristicsConfig::for_profile(profile);
        }
        self
    }

    pub fn job_path(&self) -> PathBuf {
        self.paths.input_dir.join(&self.paths.job_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.paths.output_dir.join(&self.paths.output_file)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ranking.top_sections == 0 {
            return Err(PipelineError::Config(
                "top_sections must be greater than 0".to_string(),
            ));
        }

        if self.ranking.top_subsections == 0 {
            return Err(PipelineError::Config(
                "top_subsections must be greater than 0".to_string(),
            ));
        }

        if self.heuristics.min_subsection_length > self.heuristics.max_subsection_length {
            return Err(PipelineError::Config(format!(
                "min_subsection_length ({}) exceeds max_subsection_length ({})",
                self.heuristics.min_subsection_length, self.heuristics.max_subsection_length
            )));
        }

        if self.model.backend == EmbeddingBackend::Hashing && self.model.hashing_dimension == 0 {
            return Err(PipelineError::Config(
                "hashing_dimension must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
