use sysex_proto::FrameError;

#[derive(Debug, thiserror::Error)]
pub enum MidiLinkError {
    #[error("MIDI link is not connected")]
    Disconnected,
    #[error("request for action {action:?} timed out after {timeout_ms}ms")]
    Timeout { action: String, timeout_ms: u64 },
    #[error("frame malformed: {0}")]
    FrameMalformed(#[from] FrameError),
    #[error("no correlation ids available, {in_flight} already in flight")]
    ResourceExhausted { in_flight: usize },
    #[error("no MIDI port matching {0:?}")]
    PortNotFound(String),
    #[error("MIDI backend error: {0}")]
    Backend(String),
    #[error("the Inner Bridge reported an error: {0}")]
    HandlerFailed(String),
}
