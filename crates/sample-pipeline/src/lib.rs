//! Sample pipeline (§4.10): builds argument vectors for an external audio
//! processor and invokes it without a shell, resolving inputs against the
//! render registry before falling back to the filesystem.

pub mod error;
pub mod pipeline;
pub mod resolve;
pub mod sox;

pub use error::SamplePipelineError;
pub use pipeline::{sample_pitch, widen, PipelineContext};
pub use resolve::resolve_input;
pub use sox::{run_sox, DEFAULT_TIMEOUT};
