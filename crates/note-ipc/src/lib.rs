//! Cross-interpreter file staging (§4.5): the MIDI-side Inner Bridge and the
//! host's note-editor script don't share an API, only a directory on disk.

pub mod error;
pub mod request;
pub mod staging;

pub use error::NoteIpcError;
pub use request::RequestFile;
pub use staging::Staging;
