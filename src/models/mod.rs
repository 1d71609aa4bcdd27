// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod job;
pub mod outline;
pub mod ranked;
pub mod report;

pub use job::{DocumentRef, JobSpec, JobToBeDone, Persona, PersonaContext};
pub use outline::{HeadingLevel, HeadingRecord, OutlineSpec, RawHeading};
pub use ranked::{RankedItem, SectionResult, SubsectionResult};
pub use report::{ExtractedSection, Report, ReportMetadata, SubsectionAnalysis};
