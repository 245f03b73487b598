//! Wire protocol for the MIDI SysEx link between the Outer Server (the
//! MCP-facing process) and the Inner Bridge (the host-side controller
//! script).
//!
//! ## Wire format
//!
//! ```text
//! start(1) | manufacturer(1) | origin(1) | correlation_id(1) | continuation(1) | type(1) | status(1) | payload(n) | end(1)
//! ```
//!
//! Every payload byte is in `[0,127]`. The payload is a JSON value,
//! base64-encoded before byte expansion, so it stays 7-bit safe and remains
//! human-debuggable in a trace. Frames whose payload would exceed the
//! transport MTU are split into an ordered chunk set sharing a correlation
//! id (`chunk` module); chunking is transparent to anything above the
//! frame/chunk layer.

pub mod chunk;
pub mod domain;
pub mod frame;
pub mod request;

pub use chunk::{ChunkError, Reassembler, DEFAULT_MTU, MAX_CHUNKS};
pub use domain::{NoteData, ParameterEntry, RenderRegistryEntry, ShadowSource};
pub use frame::{Frame, FrameError, FrameType, Origin, Status, END, MANUFACTURER, START};
pub use request::{Request, Response, ResponseStatus};

/// The top of the correlation id space; ids wrap at this value (§3).
pub const CORRELATION_ID_SPACE: u8 = 127;
