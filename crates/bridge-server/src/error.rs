//! Tool-handler errors (§7). Each kind maps to a distinct MCP error so a
//! client can tell "try again" (timeout/disconnect) apart from "fix your
//! input" (ambiguous/not found) apart from "do something first" (the
//! external tool is missing).

#[derive(Debug, thiserror::Error)]
pub enum BridgeServerError {
    #[error(transparent)]
    MidiLink(#[from] midi_link::MidiLinkError),
    #[error(transparent)]
    Resolver(#[from] param_resolver::ResolverError),
    #[error(transparent)]
    SamplePipeline(#[from] sample_pipeline::SamplePipelineError),
    #[error("invalid tool parameters: {0}")]
    InvalidParams(String),
}
