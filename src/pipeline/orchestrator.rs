// file: src/pipeline/orchestrator.rs
// description: end-to-end run over a job: rank sections per document, merge, refine, report
// reference: documents are processed one at a time; a failing document never aborts the run

use crate::config::Config;
use crate::embedding::Embedder;
use crate::error::Result;
use crate::exporter::ReportWriter;
use crate::extractor::TextExtractor;
use crate::models::{
    DocumentRef, ExtractedSection, JobSpec, OutlineSpec, PersonaContext, Report, ReportMetadata,
    SectionResult, SubsectionAnalysis, SubsectionResult,
};
use crate::parser::TextNormalizer;
use crate::pipeline::processor::SectionProcessor;
use crate::pipeline::progress::{PipelineStats, ProgressTracker};
use crate::utils::Validator;
use chrono::Local;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{error, info, warn};

pub struct RunSummary {
    pub report: Report,
    pub report_path: PathBuf,
    pub stats: PipelineStats,
}

pub struct PipelineOrchestrator<'a> {
    config: &'a Config,
    processor: SectionProcessor<'a>,
    normalizer: TextNormalizer,
    show_progress: bool,
    colored: bool,
}

impl<'a> PipelineOrchestrator<'a> {
    pub fn new(
        config: &'a Config,
        embedder: &'a dyn Embedder,
        extractor: &'a dyn TextExtractor,
    ) -> Self {
        Self {
            config,
            processor: SectionProcessor::new(config, embedder, extractor),
            normalizer: TextNormalizer::new(),
            show_progress: false,
            colored: true,
        }
    }

    pub fn with_progress(mut self, show_progress: bool, colored: bool) -> Self {
        self.show_progress = show_progress;
        self.colored = colored;
        self
    }

    /// Loads the job, runs it, and writes the report to the configured output path.
    pub fn execute(&self, pretty: bool) -> Result<RunSummary> {
        let job_path = self.config.job_path();
        info!("Loading job specification from: {}", job_path.display());
        let job = JobSpec::load(&job_path)?;

        info!("Persona: {}", job.persona.role);
        info!("Job: {}", job.job_to_be_done.task);
        info!("Documents to process: {}", job.documents.len());

        let (report, stats) = self.run(&job);

        let writer = ReportWriter::new(&self.config.paths.output_dir)?;
        let report_path = writer.write(&report, &self.config.paths.output_file, pretty)?;

        Ok(RunSummary {
            report,
            report_path,
            stats,
        })
    }

    /// Runs the ranking pipeline for `job` and builds the report in memory.
    pub fn run(&self, job: &JobSpec) -> (Report, PipelineStats) {
        let persona = job.persona_context();
        let tracker = if self.show_progress {
            ProgressTracker::with_color(job.documents.len(), self.colored)
        } else {
            ProgressTracker::hidden()
        };

        let top_sections = self.collect_sections(job, &persona, &tracker);
        info!("Selected top {} sections", top_sections.len());

        let mut report = Report::new(ReportMetadata {
            input_documents: job.filenames(),
            persona: job.persona.role.clone(),
            job_to_be_done: job.job_to_be_done.task.clone(),
            processing_timestamp: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        });

        report.extracted_sections = top_sections
            .iter()
            .enumerate()
            .map(|(i, result)| ExtractedSection::from_result(result, i + 1))
            .collect();

        report.subsection_analysis = self
            .refine_sections(&top_sections, &persona)
            .into_iter()
            .map(SubsectionAnalysis::from)
            .collect();

        tracker.finish();
        let mut stats = tracker.get_stats();
        stats.sections_reported = report.extracted_sections.len();
        stats.subsections_reported = report.subsection_analysis.len();

        (report, stats)
    }

    /// Ranks sections of every document and keeps the global top-N.
    pub fn collect_sections(
        &self,
        job: &JobSpec,
        persona: &PersonaContext,
        tracker: &ProgressTracker,
    ) -> Vec<SectionResult> {
        let mut all_sections = Vec::new();

        for doc in &job.documents {
            tracker.start_document(&doc.filename);
            info!("Processing document: {}", doc.filename);

            let Some((pdf_path, outline)) = self.load_document(doc) else {
                tracker.document_skipped();
                continue;
            };

            let ranked = self.processor.rank_sections(&pdf_path, &outline, persona);
            info!("Found {} relevant sections in {}", ranked.len(), doc.filename);
            tracker.document_processed(ranked.len());

            all_sections.extend(
                ranked
                    .into_iter()
                    .map(|r| SectionResult::from_ranked(&doc.filename, r)),
            );
        }

        all_sections.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        all_sections.truncate(self.config.ranking.top_sections);
        all_sections
    }

    /// Ranks chunks inside each top section, keeping at most `top_subsections`
    /// per section and never repeating a chunk anywhere in the report.
    pub fn refine_sections(
        &self,
        top_sections: &[SectionResult],
        persona: &PersonaContext,
    ) -> Vec<SubsectionResult> {
        let input_dir = &self.config.paths.input_dir;
        let limit = self.config.ranking.top_subsections;
        let mut seen_texts = HashSet::new();
        let mut results = Vec::new();

        for item in top_sections {
            let pdf_path = input_dir.join(&item.document);
            let content = self.processor.section_text(&pdf_path, &item.section);
            let subsections = self.processor.rank_subsections(&item.section, &content, persona);

            let mut added = 0;
            for ranked in subsections {
                if added >= limit {
                    break;
                }

                let clean_text = self.normalizer.normalize(&ranked.item);
                if clean_text.is_empty() || !seen_texts.insert(clean_text.clone()) {
                    continue;
                }

                results.push(SubsectionResult {
                    document: item.document.clone(),
                    refined_text: clean_text,
                    page_number: item.section.page,
                });
                added += 1;
            }

            info!("Extracted {} subsections for '{}'", added, item.section.text);
        }

        results
    }

    /// Resolves and loads a document's outline, or logs why it is skipped.
    fn load_document(&self, doc: &DocumentRef) -> Option<(PathBuf, OutlineSpec)> {
        let input_dir = &self.config.paths.input_dir;
        let outline_path = doc.outline_path(input_dir);
        let pdf_path = doc.pdf_path(input_dir);

        for path in [&outline_path, &pdf_path] {
            if let Err(e) = Validator::require_file(path) {
                error!("Skipping {}: {}", doc.filename, e);
                return None;
            }
        }

        if let Err(e) = Validator::validate_within_base_dir(&pdf_path, input_dir) {
            error!("Skipping {}: {}", doc.filename, e);
            return None;
        }

        if Validator::validate_pdf_extension(&pdf_path).is_err() {
            warn!("{} does not have a .pdf extension", doc.filename);
        }

        match OutlineSpec::load(&outline_path) {
            Ok(outline) => {
                info!(
                    "Outline loaded: {} headings from {}",
                    outline.outline.len(),
                    outline_path.display()
                );
                Some((pdf_path, outline))
            }
            Err(e) => {
                error!("Skipping {}: cannot read outline: {}", doc.filename, e);
                None
            }
        }
    }
}
