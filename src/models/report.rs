// file: src/models/report.rs
// description: final json report model
// reference: challenge output json layout

use crate::models::{SectionResult, SubsectionResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    pub processing_timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub section_title: String,
    /// 1-based position in the merged ranking
    pub importance_rank: usize,
    pub page_number: u32,
}

impl ExtractedSection {
    pub fn from_result(result: &SectionResult, importance_rank: usize) -> Self {
        Self {
            document: result.document.clone(),
            section_title: result.section.text.clone(),
            importance_rank,
            page_number: result.section.page,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub refined_text: String,
    pub page_number: u32,
}

impl From<SubsectionResult> for SubsectionAnalysis {
    fn from(result: SubsectionResult) -> Self {
        Self {
            document: result.document,
            refined_text: result.refined_text,
            page_number: result.page_number,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

impl Report {
    pub fn new(metadata: ReportMetadata) -> Self {
        Self {
            metadata,
            extracted_sections: Vec::new(),
            subsection_analysis: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_json_shape() {
        let mut report = Report::new(ReportMetadata {
            input_documents: vec!["a.pdf".to_string()],
            persona: "Engineer".to_string(),
            job_to_be_done: "assemble a widget".to_string(),
            processing_timestamp: "2025-07-10T15:31:22.632389".to_string(),
        });
        report.extracted_sections.push(ExtractedSection {
            document: "a.pdf".to_string(),
            section_title: "Assembly".to_string(),
            importance_rank: 1,
            page_number: 2,
        });

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["metadata"]["persona"], "Engineer");
        assert_eq!(json["extracted_sections"][0]["importance_rank"], 1);
        assert_eq!(json["extracted_sections"][0]["section_title"], "Assembly");
        assert!(json["subsection_analysis"].as_array().unwrap().is_empty());
    }
}
