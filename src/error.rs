use thiserror::Error;

/// Errors that can abort an analysis run.
///
/// Per-block geometry failures are not represented here: a block whose
/// outline cannot be classified is skipped and reported, and the run
/// continues with the remaining blocks.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AnalyzeError {
    #[error("failed to load mask image: {0}")]
    ImageLoad(String),

    #[error("no course groups under {0}")]
    NoCourses(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode report: {0}")]
    Report(#[from] serde_json::Error),
}
