//! `read_state` (§4.5): hand back whatever the piano-roll interpreter last
//! wrote. Absence of the state file is not an error — it just means the
//! script hasn't run yet.

use note_ipc::Staging;
use serde_json::{json, Value};

use crate::error::BridgeScriptError;
use crate::host_api::HostApi;

pub fn handle(_host: &mut dyn HostApi, staging: &Staging, _params: Value) -> Result<Value, BridgeScriptError> {
    let state = staging.read_state()?;
    Ok(json!({ "success": true, "state": state }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubHostApi;

    #[test]
    fn null_state_when_nothing_has_been_written() {
        let mut host = StubHostApi::default();
        let dir = tempfile::tempdir().unwrap();
        let staging = Staging::open(dir.path()).unwrap();
        let result = handle(&mut host, &staging, Value::Null).unwrap();
        assert_eq!(result["state"], Value::Null);
    }

    #[test]
    fn returns_whatever_the_piano_roll_script_wrote() {
        let mut host = StubHostApi::default();
        let dir = tempfile::tempdir().unwrap();
        let staging = Staging::open(dir.path()).unwrap();
        std::fs::write(staging.state_path(), r#"{"applied": true}"#).unwrap();
        let result = handle(&mut host, &staging, Value::Null).unwrap();
        assert_eq!(result["state"]["applied"], true);
    }
}
