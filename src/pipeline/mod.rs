// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

mod orchestrator;
mod processor;
mod progress;

pub use orchestrator::{PipelineOrchestrator, RunSummary};
pub use processor::SectionProcessor;
pub use progress::{PipelineStats, ProgressTracker};
