//! The staging directory itself (§4.5, §6): at most one outstanding request
//! file, reads of the state file tolerant of its absence.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::NoteIpcError;
use crate::request::RequestFile;

const REQUEST_FILE_NAME: &str = "note_request.json";
const STATE_FILE_NAME: &str = "piano_roll_state.json";

/// A handle to the fixed staging directory used to hand work to the
/// piano-roll interpreter and read back what it did.
pub struct Staging {
    dir: PathBuf,
}

impl Staging {
    /// Open (creating if absent) the staging directory at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, NoteIpcError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| NoteIpcError::CreateDir {
            path: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn request_path(&self) -> PathBuf {
        self.dir.join(REQUEST_FILE_NAME)
    }

    pub fn state_path(&self) -> PathBuf {
        self.dir.join(STATE_FILE_NAME)
    }

    /// Write the request file, overwriting any prior outstanding request —
    /// only one may exist at a time (§4.5 invariants).
    pub fn write_request(&self, request: &RequestFile) -> Result<(), NoteIpcError> {
        let path = self.request_path();
        let text = serde_json::to_string_pretty(request).map_err(|source| NoteIpcError::Json {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(&path, text).map_err(|source| NoteIpcError::Write {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), "wrote note-ipc request file");
        Ok(())
    }

    /// Read back the state file the piano-roll script last wrote. Returns
    /// `Ok(None)` if it doesn't exist yet — absence is not an error.
    pub fn read_state(&self) -> Result<Option<Value>, NoteIpcError> {
        read_json_tolerant(&self.state_path())
    }

    /// Read back the outstanding request file, if any. Mainly useful for
    /// tests and diagnostics; the piano-roll script is the normal reader.
    pub fn read_request(&self) -> Result<Option<RequestFile>, NoteIpcError> {
        let path = self.request_path();
        match fs::read_to_string(&path) {
            Ok(text) => {
                let request = serde_json::from_str(&text).map_err(|source| NoteIpcError::Json {
                    path: path.display().to_string(),
                    source,
                })?;
                Ok(Some(request))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(NoteIpcError::Read { path: path.display().to_string(), source }),
        }
    }
}

fn read_json_tolerant(path: &Path) -> Result<Option<Value>, NoteIpcError> {
    match fs::read_to_string(path) {
        Ok(text) => {
            let value = serde_json::from_str(&text).map_err(|source| NoteIpcError::Json {
                path: path.display().to_string(),
                source,
            })?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(NoteIpcError::Read { path: path.display().to_string(), source }),
    }
}
