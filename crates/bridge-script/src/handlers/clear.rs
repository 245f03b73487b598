//! `clear` (§4.5): stage a clear request for the piano-roll interpreter,
//! same file-IPC contract as `add_notes`.

use note_ipc::{RequestFile, Staging};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::BridgeScriptError;
use crate::host_api::HostApi;

#[derive(Deserialize)]
struct Params {
    #[serde(default)]
    pattern: Option<i64>,
    #[serde(default)]
    channel: Option<i64>,
}

pub fn handle(_host: &mut dyn HostApi, staging: &Staging, params: Value) -> Result<Value, BridgeScriptError> {
    let params: Params = serde_json::from_value(params)
        .map_err(|e| BridgeScriptError::HandlerFailed(e.to_string()))?;
    staging.write_request(&RequestFile::Clear { pattern: params.pattern, channel: params.channel })?;
    Ok(json!({
        "success": true,
        "trigger": "run the piano-roll script to apply the staged clear",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubHostApi;

    #[test]
    fn overwrites_any_prior_outstanding_request() {
        let mut host = StubHostApi::default();
        let dir = tempfile::tempdir().unwrap();
        let staging = Staging::open(dir.path()).unwrap();
        staging
            .write_request(&RequestFile::AddNotes { notes: vec![], pattern: None, channel: None })
            .unwrap();
        handle(&mut host, &staging, json!({"pattern": 2})).unwrap();
        let staged = staging.read_request().unwrap().unwrap();
        assert_eq!(staged, RequestFile::Clear { pattern: Some(2), channel: None });
    }
}
