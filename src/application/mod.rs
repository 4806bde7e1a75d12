pub mod pipeline;

pub use pipeline::{PipelineConfig, PipelineKind, PipelineReport, PipelineRunner};
