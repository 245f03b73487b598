//! Invoking the external audio processor (§4.10): argv built explicitly, no
//! shell, stderr is informational, only a non-zero exit signals failure.

use std::time::Duration;

use tracing::debug;

use crate::error::SamplePipelineError;

/// Generous default so large files don't spuriously time out (§5).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

pub async fn run_sox(sox_path: &str, args: &[String], timeout: Duration) -> Result<(), SamplePipelineError> {
    let mut command = tokio::process::Command::new(sox_path);
    command.args(args);

    let spawn_result = tokio::time::timeout(timeout, command.output())
        .await
        .map_err(|_| SamplePipelineError::Timeout)?;

    let output = spawn_result.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SamplePipelineError::ExternalToolMissing(sox_path.to_string())
        } else {
            SamplePipelineError::Io(e)
        }
    })?;

    if !output.stderr.is_empty() {
        debug!(stderr = %String::from_utf8_lossy(&output.stderr), "sox stderr (informational, not an error)");
    }

    if !output.status.success() {
        return Err(SamplePipelineError::ToolFailed {
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            code: output.status.code(),
        });
    }

    Ok(())
}
