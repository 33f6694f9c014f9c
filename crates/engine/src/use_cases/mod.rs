//! Use cases - the import run and the steps it is made of.

pub mod pipeline;
pub mod populate;


pub use pipeline::{build_store, run, ImportReport, PipelineStep, StepReport};
pub use populate::StepOutcome;
