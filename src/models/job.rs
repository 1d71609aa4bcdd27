// file: src/models/job.rs
// description: job specification input and the persona context derived from it
// reference: challenge input json layout

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobToBeDone {
    pub task: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRef {
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl DocumentRef {
    /// File name without its extension; outlines are stored as `<stem>.json`.
    pub fn stem(&self) -> &str {
        Path::new(&self.filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.filename)
    }

    pub fn pdf_path(&self, input_dir: &Path) -> PathBuf {
        input_dir.join(&self.filename)
    }

    pub fn outline_path(&self, input_dir: &Path) -> PathBuf {
        input_dir.join(format!("{}.json", self.stem()))
    }
}

/// Top-level job description. Extra fields such as `challenge_info` are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSpec {
    pub persona: Persona,
    pub job_to_be_done: JobToBeDone,
    pub documents: Vec<DocumentRef>,
}

impl JobSpec {
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

    pub fn persona_context(&self) -> PersonaContext {
        PersonaContext::new(&self.persona.role, &self.job_to_be_done.task)
    }

    pub fn filenames(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.filename.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaContext {
    pub role: String,
    pub task: String,
}

impl PersonaContext {
    pub fn new(role: &str, task: &str) -> Self {
        Self {
            role: role.to_string(),
            task: task.to_string(),
        }
    }

    /// The natural-language query every section and chunk is ranked against.
    pub fn query_text(&self) -> String {
        format!("As a {}, {}", self.role, self.task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_query_text() {
        let ctx = PersonaContext::new("Travel Planner", "plan a 4 day trip");
        assert_eq!(ctx.query_text(), "As a Travel Planner, plan a 4 day trip");
    }

    #[test]
    fn test_document_paths() {
        let doc = DocumentRef {
            filename: "South of France - Cities.pdf".to_string(),
            title: None,
        };
        let dir = Path::new("/in");
        assert_eq!(doc.stem(), "South of France - Cities");
        assert_eq!(
            doc.outline_path(dir),
            PathBuf::from("/in/South of France - Cities.json")
        );
        assert_eq!(doc.pdf_path(dir), PathBuf::from("/in/South of France - Cities.pdf"));
    }

    #[test]
    fn test_load_ignores_unknown_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("job.json");
        fs::write(
            &path,
            r#"{
                "challenge_info": {"challenge_id": "round_1b_002"},
                "documents": [{"filename": "a.pdf", "title": "A"}, {"filename": "b.pdf"}],
                "persona": {"role": "HR professional"},
                "job_to_be_done": {"task": "Create fillable forms"}
            }"#,
        )
        .unwrap();

        let job = JobSpec::load(&path).unwrap();
        assert_eq!(job.filenames(), vec!["a.pdf", "b.pdf"]);
        assert_eq!(job.documents[0].title.as_deref(), Some("A"));
        assert_eq!(
            job.persona_context().query_text(),
            "As a HR professional, Create fillable forms"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = JobSpec::load(Path::new("/nonexistent/job.json")).unwrap_err();
        assert!(matches!(err, PipelineError::MissingInputFile { .. }));
    }
}
