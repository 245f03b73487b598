#[derive(Debug, thiserror::Error)]
pub enum BridgeScriptError {
    #[error("no handler registered for action {0:?}")]
    RouterUnknownAction(String),
    #[error("handler failed: {0}")]
    HandlerFailed(String),
    #[error(transparent)]
    Frame(#[from] sysex_proto::FrameError),
    #[error(transparent)]
    Chunk(#[from] sysex_proto::ChunkError),
    #[error(transparent)]
    Ipc(#[from] note_ipc::NoteIpcError),
    #[error("handler panicked: {0}")]
    HandlerPanicked(String),
}
