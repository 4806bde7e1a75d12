use serde::Serialize;
use tracing::Span;
use uuid::Uuid;

/// Identity of one pipeline run.
///
/// Created once per invocation and passed down explicitly. [`RunContext::span`] opens the
/// root span whose `run_id` field tags every event logged inside the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunContext {
    run_id: String,
    pipeline: String,
}

impl RunContext {
    /// Context with a freshly generated v4 UUID
    pub fn new(pipeline: impl Into<String>) -> Self {
        Self::with_run_id(pipeline, Uuid::new_v4().to_string())
    }

    /// Context with a caller-supplied run identifier
    pub fn with_run_id(pipeline: impl Into<String>, run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            pipeline: pipeline.into(),
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn pipeline(&self) -> &str {
        &self.pipeline
    }

    pub fn span(&self) -> Span {
        tracing::info_span!("run", run_id = %self.run_id, pipeline = %self.pipeline)
    }
}
