//! Sample operations (§4.10). Multi-step pipelines build their intermediate
//! files as `tempfile` temp paths, so cleanup happens via `Drop` on every
//! exit path — success, sox failure, or an early `?` — without a manual
//! try/finally.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use render_watch::RenderRegistry;
use tempfile::Builder as TempFileBuilder;

use crate::error::SamplePipelineError;
use crate::resolve::resolve_input;
use crate::sox::{run_sox, DEFAULT_TIMEOUT};

/// Everything a sample operation needs to resolve inputs and find the
/// processor; cheap to clone, shared across tool invocations.
#[derive(Clone)]
pub struct PipelineContext {
    pub sox_path: String,
    pub render_dir: PathBuf,
    pub sample_dir: PathBuf,
    pub registry: Arc<RenderRegistry>,
}

fn stem_and_ext(path: &Path) -> (String, String) {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("sample").to_string();
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("wav").to_string();
    (stem, ext)
}

/// Pitch-shift a sample by `semitones` (signed; negative is down). Writes
/// `{stem}_pitch_{up|down}_{N}st.{ext}` into the sample directory.
pub async fn sample_pitch(
    ctx: &PipelineContext,
    input: &str,
    semitones: f64,
) -> Result<PathBuf, SamplePipelineError> {
    let input_path = resolve_input(input, &ctx.registry, &ctx.render_dir, &ctx.sample_dir)?;
    let (stem, ext) = stem_and_ext(&input_path);
    let direction = if semitones < 0.0 { "down" } else { "up" };
    let output = ctx
        .sample_dir
        .join(format!("{stem}_pitch_{direction}_{}st.{ext}", semitones.abs().round() as i64));

    let cents = (semitones * 100.0).round() as i64;
    run_sox(
        &ctx.sox_path,
        &[
            input_path.to_string_lossy().to_string(),
            output.to_string_lossy().to_string(),
            "pitch".to_string(),
            cents.to_string(),
        ],
        DEFAULT_TIMEOUT,
    )
    .await?;

    Ok(output)
}

/// Pitch-split both channels, optionally apply a micro-delay to one,
/// merge back to stereo, and normalise (§4.10). Writes
/// `{stem}_widened.{ext}` into the sample directory.
pub async fn widen(
    ctx: &PipelineContext,
    input: &str,
    semitones: f64,
    micro_delay_ms: Option<f64>,
) -> Result<PathBuf, SamplePipelineError> {
    let input_path = resolve_input(input, &ctx.registry, &ctx.render_dir, &ctx.sample_dir)?;
    let (stem, ext) = stem_and_ext(&input_path);
    let cents = (semitones * 100.0).round() as i64;

    let work_dir = ctx.sample_dir.clone();
    let left = TempFileBuilder::new().prefix(".widen-left-").suffix(".wav").tempfile_in(&work_dir)?.into_temp_path();
    let right = TempFileBuilder::new().prefix(".widen-right-").suffix(".wav").tempfile_in(&work_dir)?.into_temp_path();
    let merged = TempFileBuilder::new().prefix(".widen-merged-").suffix(".wav").tempfile_in(&work_dir)?.into_temp_path();

    run_sox(
        &ctx.sox_path,
        &[
            input_path.to_string_lossy().to_string(),
            left.to_string_lossy().to_string(),
            "remix".to_string(),
            "1".to_string(),
            "pitch".to_string(),
            cents.to_string(),
        ],
        DEFAULT_TIMEOUT,
    )
    .await?;

    let mut right_args = vec![
        input_path.to_string_lossy().to_string(),
        right.to_string_lossy().to_string(),
        "remix".to_string(),
        "2".to_string(),
        "pitch".to_string(),
        cents.to_string(),
    ];
    if let Some(ms) = micro_delay_ms {
        right_args.push("delay".to_string());
        right_args.push(format!("{:.6}", ms / 1000.0));
    }
    run_sox(&ctx.sox_path, &right_args, DEFAULT_TIMEOUT).await?;

    run_sox(
        &ctx.sox_path,
        &[
            "-M".to_string(),
            left.to_string_lossy().to_string(),
            right.to_string_lossy().to_string(),
            merged.to_string_lossy().to_string(),
        ],
        DEFAULT_TIMEOUT,
    )
    .await?;

    let output = ctx.sample_dir.join(format!("{stem}_widened.{ext}"));
    run_sox(
        &ctx.sox_path,
        &[
            merged.to_string_lossy().to_string(),
            output.to_string_lossy().to_string(),
            "norm".to_string(),
        ],
        DEFAULT_TIMEOUT,
    )
    .await?;

    // `left`, `right`, and `merged` are `TempPath`s; they delete themselves
    // here regardless of which branch above returned early.
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_and_ext_split_a_typical_filename() {
        let (stem, ext) = stem_and_ext(Path::new("/renders/Pattern_1.wav"));
        assert_eq!(stem, "Pattern_1");
        assert_eq!(ext, "wav");
    }

    #[test]
    fn stem_and_ext_defaults_for_extensionless_input() {
        let (stem, ext) = stem_and_ext(Path::new("noext"));
        assert_eq!(stem, "noext");
        assert_eq!(ext, "wav");
    }

    #[tokio::test]
    async fn sample_pitch_reports_file_not_found_without_touching_sox() {
        let sample_dir = tempfile::tempdir().unwrap();
        let render_dir = tempfile::tempdir().unwrap();
        let ctx = PipelineContext {
            sox_path: "sox".to_string(),
            render_dir: render_dir.path().to_path_buf(),
            sample_dir: sample_dir.path().to_path_buf(),
            registry: Arc::new(RenderRegistry::new()),
        };
        let err = sample_pitch(&ctx, "nope.wav", -12.0).await.unwrap_err();
        assert!(matches!(err, SamplePipelineError::FileNotFound(_)));
    }
}
