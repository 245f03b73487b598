//! The correlator (§4.2): turns the asynchronous, unordered SysEx byte
//! stream into request/response pairs with timeouts.
//!
//! Single reactor task owns the port manager's output and the reassembly
//! buffer, so nothing needs a lock; callers talk to it over an mpsc channel
//! and get their answer back via a oneshot, mirroring the Outer Server's
//! single-threaded, cooperative-concurrency model (§5).

use std::collections::HashMap;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, trace, warn};

use sysex_proto::{
    chunk::{encode_chunked, DEFAULT_MTU},
    Frame, FrameType, Origin, Reassembler, Response, ResponseStatus, Status,
};

use crate::error::MidiLinkError;
use crate::ports::{PortManager, RawSysex};
use crate::wire::wrap_sysex;

const DEFAULT_TIMEOUT_MS: u64 = 5_000;

enum Cmd {
    Execute {
        action: String,
        params: serde_json::Value,
        timeout: Duration,
        reply: oneshot::Sender<Result<Response, MidiLinkError>>,
    },
}

struct Pending {
    reply: oneshot::Sender<Result<Response, MidiLinkError>>,
    action: String,
    timeout_ms: u64,
    deadline: Instant,
}

/// Allocates correlation ids round-robin over `[1,127]`, wrapping at 128 and
/// never reusing an id that's still in flight (§3).
struct IdAllocator {
    next: AtomicU8,
}

impl IdAllocator {
    fn new() -> Self {
        Self { next: AtomicU8::new(1) }
    }

    /// Find the next free id not present in `in_flight`. Returns `None` if
    /// every one of the 127 ids is currently outstanding.
    fn allocate(&self, in_flight: &HashMap<u8, Pending>) -> Option<u8> {
        if in_flight.len() >= sysex_proto::CORRELATION_ID_SPACE as usize {
            return None;
        }
        for _ in 0..sysex_proto::CORRELATION_ID_SPACE {
            let candidate = self.next.fetch_add(1, Ordering::Relaxed);
            let wrapped = if candidate == 0 || candidate > sysex_proto::CORRELATION_ID_SPACE {
                self.next.store(1, Ordering::Relaxed);
                1
            } else {
                candidate
            };
            if !in_flight.contains_key(&wrapped) {
                return Some(wrapped);
            }
        }
        None
    }
}

/// Public handle to the correlator; cheap to clone, all state lives in the
/// reactor task.
pub struct Correlator {
    cmd_tx: mpsc::UnboundedSender<Cmd>,
}

impl Correlator {
    /// Spawn the reactor task bound to `port_manager`'s inbound stream.
    pub fn spawn(
        port_manager: Arc<PortManager>,
        inbound: mpsc::UnboundedReceiver<RawSysex>,
    ) -> Arc<Self> {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let disconnect_rx = port_manager.subscribe_disconnect();
        tokio::spawn(reactor(port_manager, inbound, cmd_rx, disconnect_rx));
        Arc::new(Self { cmd_tx })
    }

    /// Execute one request and await its response, or time out.
    pub async fn execute(
        &self,
        action: impl Into<String>,
        params: serde_json::Value,
    ) -> Result<Response, MidiLinkError> {
        self.execute_with_timeout(action, params, Duration::from_millis(DEFAULT_TIMEOUT_MS))
            .await
    }

    pub async fn execute_with_timeout(
        &self,
        action: impl Into<String>,
        params: serde_json::Value,
        timeout: Duration,
    ) -> Result<Response, MidiLinkError> {
        let (reply, rx) = oneshot::channel();
        self.cmd_tx
            .send(Cmd::Execute {
                action: action.into(),
                params,
                timeout,
                reply,
            })
            .map_err(|_| MidiLinkError::Disconnected)?;
        rx.await.map_err(|_| MidiLinkError::Disconnected)?
    }
}

async fn reactor(
    port_manager: Arc<PortManager>,
    mut inbound: mpsc::UnboundedReceiver<RawSysex>,
    mut cmd_rx: mpsc::UnboundedReceiver<Cmd>,
    mut disconnect_rx: broadcast::Receiver<()>,
) {
    let ids = IdAllocator::new();
    let mut pending: HashMap<u8, Pending> = HashMap::new();
    let mut reassembler = Reassembler::new();

    let mut cleanup = tokio::time::interval(Duration::from_millis(250));
    cleanup.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;

            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(Cmd::Execute { action, params, timeout, reply }) => {
                        let Some(correlation_id) = ids.allocate(&pending) else {
                            let _ = reply.send(Err(MidiLinkError::ResourceExhausted { in_flight: pending.len() }));
                            continue;
                        };
                        let request = sysex_proto::Request { correlation_id, action: action.clone(), params };
                        let value = match serde_json::to_value(&request) {
                            Ok(v) => v,
                            Err(e) => {
                                let _ = reply.send(Err(MidiLinkError::Backend(e.to_string())));
                                continue;
                            }
                        };
                        let frames = match encode_chunked(&value, correlation_id, Origin::Client, FrameType::Command, Status::Ok, DEFAULT_MTU) {
                            Ok(f) => f,
                            Err(e) => {
                                let _ = reply.send(Err(MidiLinkError::FrameMalformed(sysex_proto::FrameError::Malformed { offset: 0, reason: "chunk encode failed" })));
                                warn!("chunk encode failed: {}", e);
                                continue;
                            }
                        };
                        let mut send_failed = false;
                        for frame in frames {
                            let wire = wrap_sysex(&frame.to_bytes());
                            if let Err(e) = port_manager.send(&wire) {
                                warn!("send failed for {}: {}", correlation_id, e);
                                send_failed = true;
                                break;
                            }
                        }
                        if send_failed {
                            let _ = reply.send(Err(MidiLinkError::Disconnected));
                            continue;
                        }
                        trace!(correlation_id, action = %request.action, "request sent");
                        pending.insert(correlation_id, Pending {
                            reply,
                            action: request.action,
                            timeout_ms: timeout.as_millis() as u64,
                            deadline: Instant::now() + timeout,
                        });
                    }
                    None => break,
                }
            }

            incoming = inbound.recv() => {
                let Some(RawSysex(bytes)) = incoming else { break };
                match Frame::from_bytes(&bytes) {
                    Ok(frame) => {
                        if frame.origin != sysex_proto::Origin::Server || frame.frame_type != FrameType::Response {
                            continue;
                        }
                        let correlation_id = frame.correlation_id;
                        match reassembler.feed(frame) {
                            Ok(Some(complete)) => {
                                if let Some(p) = pending.remove(&correlation_id) {
                                    match complete.decode_payload::<Response>() {
                                        Ok(mut response) => {
                                            if complete.status == Status::Error {
                                                response.status = ResponseStatus::Error;
                                            }
                                            let _ = p.reply.send(Ok(response));
                                        }
                                        Err(e) => {
                                            let _ = p.reply.send(Err(MidiLinkError::FrameMalformed(e)));
                                        }
                                    }
                                } else {
                                    debug!(correlation_id, "discarding response with no pending request");
                                }
                            }
                            Ok(None) => {}
                            Err(e) => warn!("chunk reassembly failed: {}", e),
                        }
                    }
                    Err(e) => {
                        debug!("dropping malformed frame: {}", e);
                    }
                }
            }

            _ = cleanup.tick() => {
                let now = Instant::now();
                let expired: Vec<u8> = pending.iter().filter(|(_, p)| now > p.deadline).map(|(id, _)| *id).collect();
                for id in expired {
                    if let Some(p) = pending.remove(&id) {
                        let _ = p.reply.send(Err(MidiLinkError::Timeout { action: p.action, timeout_ms: p.timeout_ms }));
                    }
                }
            }

            _ = disconnect_rx.recv() => {
                for (_, p) in pending.drain() {
                    let _ = p.reply.send(Err(MidiLinkError::Disconnected));
                }
            }
        }
    }
}
