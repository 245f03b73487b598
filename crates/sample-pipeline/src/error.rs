#[derive(Debug, thiserror::Error)]
pub enum SamplePipelineError {
    #[error("file not found: {0}")]
    FileNotFound(String),
    #[error("external tool missing: {0}")]
    ExternalToolMissing(String),
    #[error("audio processor exited with {code:?}: {stderr}")]
    ToolFailed { stderr: String, code: Option<i32> },
    #[error("audio processor invocation timed out")]
    Timeout,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
