// file: src/exporter/json.rs
// description: json export of the ranking report

use crate::error::{PipelineError, Result};
use crate::models::Report;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| PipelineError::FileOperation {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir })
    }

    /// Writes `report` to `<output_dir>/<file_name>` and returns the path.
    pub fn write(&self, report: &Report, file_name: &str, pretty: bool) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);

        let json = if pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };

        fs::write(&path, json).map_err(|source| PipelineError::FileOperation {
            path: path.clone(),
            source,
        })?;

        info!(
            "Report written to {} ({} sections, {} subsections)",
            path.display(),
            report.extracted_sections.len(),
            report.subsection_analysis.len()
        );
        Ok(path)
    }
}
