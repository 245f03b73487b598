//! Inner Bridge entry point (§4.4): safe init, SysEx receive, dispatch,
//! immediate reply. Strictly single-threaded — nothing here spawns a
//! thread, task, or timer (§5); the host pumps every call on its own
//! audio/UI thread and a blocked handler is an audio glitch.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;

use note_ipc::Staging;
use sysex_proto::chunk::{encode_chunked, Reassembler, DEFAULT_MTU};
use sysex_proto::{Frame, FrameType, Origin, Request, Response, Status};
use tracing::{error, warn};

use crate::error::BridgeScriptError;
use crate::host_api::HostApi;
use crate::router::Router;

pub struct Bridge {
    router: Router,
    host: Box<dyn HostApi>,
    staging: Staging,
    reassembler: Reassembler,
}

impl Bridge {
    /// All load-time work wrapped in `catch_unwind`: a panic during load
    /// would otherwise crash the host process, and a crashed load causes
    /// the host to refuse to reload the script on subsequent starts (§4.4).
    pub fn safe_init(host: Box<dyn HostApi>, staging_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let staging_dir = staging_dir.into();
        match catch_unwind(AssertUnwindSafe(|| Staging::open(&staging_dir))) {
            Ok(Ok(staging)) => Ok(Self {
                router: Router::with_defaults(),
                host,
                staging,
                reassembler: Reassembler::new(),
            }),
            Ok(Err(e)) => Err(anyhow::anyhow!("staging directory init failed: {e}")),
            Err(panic) => {
                let message = panic_message(&panic);
                error!(message, "bridge init panicked; script will not load");
                Err(anyhow::anyhow!("bridge init panicked: {message}"))
            }
        }
    }

    /// Handle one inbound SysEx message (already stripped of its transport
    /// envelope) and return the wire bytes of the reply, itself possibly
    /// chunked by the codec. Returns an empty vec for traffic that isn't
    /// addressed to this link (§4.3's "drop silently" extends here too), and
    /// for a chunk that isn't yet the final piece of its logical frame
    /// (§4.1: the decoder only surfaces a complete frame on `continues =
    /// false`; a command chunked by the Outer Server arrives as several
    /// separate SysEx messages and must be reassembled the same way the
    /// correlator reassembles chunked responses).
    pub fn on_sysex_received(&mut self, bytes: &[u8]) -> Vec<u8> {
        let chunk = match Frame::from_bytes(bytes) {
            Ok(f) => f,
            Err(e) => {
                warn!(error = %e, "dropping malformed inbound frame");
                return Vec::new();
            }
        };
        if chunk.origin != Origin::Client || chunk.frame_type != FrameType::Command {
            return Vec::new();
        }

        let frame = match self.reassembler.feed(chunk) {
            Ok(Some(complete)) => complete,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "dropping oversized chunk set");
                return Vec::new();
            }
        };

        let request: Request = match frame.decode_payload() {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "dropping undecodable request payload");
                return Vec::new();
            }
        };
        let correlation_id = request.correlation_id;

        let response = match catch_unwind(AssertUnwindSafe(|| {
            self.router.dispatch(&request.action, self.host.as_mut(), &self.staging, request.params)
        })) {
            Ok(Ok(data)) => Response::ok(correlation_id, data),
            Ok(Err(e)) => Response::error(correlation_id, handler_error_message(&e)),
            Err(panic) => {
                let message = panic_message(&panic);
                error!(action = %request.action, message, "handler panicked");
                Response::error(correlation_id, format!("handler panicked: {message}"))
            }
        };

        let status = if response.is_ok() { Status::Ok } else { Status::Error };
        match encode_chunked(&response, correlation_id, Origin::Server, FrameType::Response, status, DEFAULT_MTU) {
            Ok(frames) => frames.iter().flat_map(|f| f.to_bytes()).collect(),
            Err(e) => {
                error!(error = %e, "failed to encode response frame");
                Vec::new()
            }
        }
    }
}

fn handler_error_message(e: &BridgeScriptError) -> String {
    e.to_string()
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubHostApi;
    use sysex_proto::Origin as FrameOrigin;

    fn encode_command(action: &str, params: serde_json::Value, correlation_id: u8) -> Vec<u8> {
        let request = Request { correlation_id, action: action.to_string(), params };
        Frame::encode(&request, correlation_id, FrameOrigin::Client, FrameType::Command, Status::Ok)
            .unwrap()
            .to_bytes()
    }

    #[test]
    fn unknown_action_replies_with_error_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = Bridge::safe_init(Box::new(StubHostApi::default()), dir.path()).unwrap();
        let bytes = encode_command("nonexistent", serde_json::json!({}), 7);
        let reply = bridge.on_sysex_received(&bytes);
        let frame = Frame::from_bytes(&reply).unwrap();
        assert_eq!(frame.status, Status::Error);
        assert_eq!(frame.correlation_id, 7);
    }

    #[test]
    fn non_command_frames_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = Bridge::safe_init(Box::new(StubHostApi::default()), dir.path()).unwrap();
        let response = Response::ok(1, serde_json::json!({}));
        let bytes = Frame::encode(&response, 1, FrameOrigin::Server, FrameType::Response, Status::Ok)
            .unwrap()
            .to_bytes();
        assert!(bridge.on_sysex_received(&bytes).is_empty());
    }

    #[test]
    fn discover_round_trips_through_the_frame_codec() {
        let dir = tempfile::tempdir().unwrap();
        let host = StubHostApi::with_params(vec![("Filter 1 Freq".to_string(), 0.5)]);
        let mut bridge = Bridge::safe_init(Box::new(host), dir.path()).unwrap();
        let bytes = encode_command("discover", serde_json::json!({"channel": 0, "slot": 0}), 3);
        let reply = bridge.on_sysex_received(&bytes);
        let frame = Frame::from_bytes(&reply).unwrap();
        assert_eq!(frame.status, Status::Ok);
        let response: Response = frame.decode_payload().unwrap();
        assert_eq!(response.data.unwrap()["parameters"][0]["raw_name"], "Filter 1 Freq");
    }

    #[test]
    fn malformed_bytes_are_dropped_without_a_reply() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = Bridge::safe_init(Box::new(StubHostApi::default()), dir.path()).unwrap();
        assert!(bridge.on_sysex_received(b"not a frame").is_empty());
    }

    #[test]
    fn reassembles_a_chunked_command_before_dispatch() {
        use sysex_proto::chunk::{encode_chunked, DEFAULT_MTU};

        let dir = tempfile::tempdir().unwrap();
        let mut bridge = Bridge::safe_init(Box::new(StubHostApi::default()), dir.path()).unwrap();

        // Enough notes that the request's base64 payload exceeds a small
        // MTU, forcing the Outer Server's encoder to split it the same way
        // `add_notes`'s tool does through `correlator.execute`.
        let notes: Vec<sysex_proto::NoteData> =
            (0..60).map(|i| sysex_proto::NoteData::new(60, i as f64 * 0.25, 0.25, 0.8)).collect();
        let request = Request {
            correlation_id: 9,
            action: "add_notes".to_string(),
            params: serde_json::json!({"notes": notes}),
        };
        let chunks = encode_chunked(&request, 9, FrameOrigin::Client, FrameType::Command, Status::Ok, 200).unwrap();
        assert!(chunks.len() > 1, "test setup should actually exercise chunking");

        let mut reply = Vec::new();
        for (i, chunk) in chunks.iter().enumerate() {
            let out = bridge.on_sysex_received(&chunk.to_bytes());
            if i + 1 < chunks.len() {
                assert!(out.is_empty(), "no reply until the final chunk arrives");
            } else {
                reply = out;
            }
        }

        assert!(!reply.is_empty());
        let frame = Frame::from_bytes(&reply).unwrap();
        assert_eq!(frame.status, Status::Ok);
        assert_eq!(frame.correlation_id, 9);
        let response: Response = frame.decode_payload().unwrap();
        assert_eq!(response.data.unwrap()["success"], true);
    }

    #[test]
    fn handles_multiple_interleaved_command_correlation_ids() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = Bridge::safe_init(Box::new(StubHostApi::default()), dir.path()).unwrap();
        let a = encode_command("nonexistent", serde_json::json!({}), 1);
        let b = encode_command("clear", serde_json::json!({}), 2);
        let reply_a = bridge.on_sysex_received(&a);
        let reply_b = bridge.on_sysex_received(&b);
        assert_eq!(Frame::from_bytes(&reply_a).unwrap().correlation_id, 1);
        assert_eq!(Frame::from_bytes(&reply_b).unwrap().correlation_id, 2);
    }
}
