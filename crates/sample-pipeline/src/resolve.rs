//! Input resolution order (§4.10): registry -> absolute path -> default
//! render dir -> default sample dir. First hit wins.

use std::path::{Path, PathBuf};

use render_watch::RenderRegistry;

use crate::error::SamplePipelineError;

pub fn resolve_input(
    input: &str,
    registry: &RenderRegistry,
    render_dir: &Path,
    sample_dir: &Path,
) -> Result<PathBuf, SamplePipelineError> {
    if let Some(entry) = registry.find_by_filename(input) {
        let path = PathBuf::from(&entry.absolute_path);
        if path.exists() {
            return Ok(path);
        }
    }

    let as_path = Path::new(input);
    if as_path.is_absolute() && as_path.exists() {
        return Ok(as_path.to_path_buf());
    }

    let in_render_dir = render_dir.join(input);
    if in_render_dir.exists() {
        return Ok(in_render_dir);
    }

    let in_sample_dir = sample_dir.join(input);
    if in_sample_dir.exists() {
        return Ok(in_sample_dir);
    }

    Err(SamplePipelineError::FileNotFound(input.to_string()))
}
