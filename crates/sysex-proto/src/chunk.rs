//! Chunker/reassembler: splits oversize frames into an ordered chunk set
//! below the transport MTU, and reassembles them on receive (§3, §4.1).

use std::collections::HashMap;

use crate::frame::{Frame, FrameError, FrameType, Origin, Status};

/// Conservative default MTU in payload bytes, comfortably under the
/// transport's receive buffer (§3).
pub const DEFAULT_MTU: usize = 1800;

/// Hard cap on chunks per logical frame, to bound reassembly memory (§4.1).
pub const MAX_CHUNKS: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum ChunkError {
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("chunk set for correlation id {0} exceeded {MAX_CHUNKS} chunks")]
    TooManyChunks(u8),
    #[error("mtu must be at least 1 byte, got {0}")]
    InvalidMtu(usize),
}

/// Split a frame's already-base64'd payload into an ordered sequence of
/// frames sharing `correlation_id`, each under `mtu` payload bytes. All but
/// the last have `continues = true`.
pub fn split_frame(frame: &Frame, mtu: usize) -> Result<Vec<Frame>, ChunkError> {
    if mtu == 0 {
        return Err(ChunkError::InvalidMtu(mtu));
    }
    if frame.payload.len() <= mtu {
        return Ok(vec![frame.clone()]);
    }
    let chunks: Vec<&[u8]> = frame.payload.chunks(mtu).collect();
    if chunks.len() > MAX_CHUNKS {
        return Err(ChunkError::TooManyChunks(frame.correlation_id));
    }
    let last = chunks.len() - 1;
    Ok(chunks
        .into_iter()
        .enumerate()
        .map(|(i, piece)| Frame {
            origin: frame.origin,
            correlation_id: frame.correlation_id,
            continues: i != last,
            frame_type: frame.frame_type,
            status: frame.status,
            payload: piece.to_vec(),
        })
        .collect())
}

/// Encode a value directly into an ordered, possibly-chunked frame set.
pub fn encode_chunked<T: serde::Serialize>(
    value: &T,
    correlation_id: u8,
    origin: Origin,
    frame_type: FrameType,
    status: Status,
    mtu: usize,
) -> Result<Vec<Frame>, ChunkError> {
    let frame = Frame::encode(value, correlation_id, origin, frame_type, status)?;
    split_frame(&frame, mtu)
}

/// Buffers partial chunk sets per correlation id and surfaces a complete
/// logical frame only once the final (`continues = false`) chunk arrives.
/// The transport guarantees in-order delivery per correlation id, so no
/// sequence number is carried on the wire.
#[derive(Debug, Default)]
pub struct Reassembler {
    pending: HashMap<u8, Vec<u8>>,
}

impl Reassembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one received frame. Returns `Some(Frame)` once the logical frame
    /// this chunk belongs to is complete (a single un-chunked frame
    /// completes immediately).
    pub fn feed(&mut self, chunk: Frame) -> Result<Option<Frame>, ChunkError> {
        let buf = self.pending.entry(chunk.correlation_id).or_default();
        if buf.len() + chunk.payload.len() > MAX_CHUNKS * DEFAULT_MTU {
            self.pending.remove(&chunk.correlation_id);
            return Err(ChunkError::TooManyChunks(chunk.correlation_id));
        }
        buf.extend_from_slice(&chunk.payload);

        if chunk.continues {
            return Ok(None);
        }

        let payload = self.pending.remove(&chunk.correlation_id).unwrap_or_default();
        Ok(Some(Frame {
            origin: chunk.origin,
            correlation_id: chunk.correlation_id,
            continues: false,
            frame_type: chunk.frame_type,
            status: chunk.status,
            payload,
        }))
    }

    /// Drop any in-flight chunk set for a correlation id (e.g. on timeout).
    pub fn discard(&mut self, correlation_id: u8) {
        self.pending.remove(&correlation_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn small_payload_is_a_single_chunk() {
        let frame = Frame::encode(&json!({"a": 1}), 1, Origin::Client, FrameType::Command, Status::Ok).unwrap();
        let chunks = split_frame(&frame, DEFAULT_MTU).unwrap();
        assert_eq!(chunks.len(), 1);
        assert!(!chunks[0].continues);
    }

    #[test]
    fn oversize_payload_splits_with_correct_continuation_flags() {
        let big = "x".repeat(4000);
        let frame = Frame::encode(&json!({"data": big}), 7, Origin::Server, FrameType::Response, Status::Ok).unwrap();
        let chunks = split_frame(&frame, 1800).unwrap();
        assert!(chunks.len() >= 3);
        for c in &chunks[..chunks.len() - 1] {
            assert!(c.continues);
            assert_eq!(c.correlation_id, 7);
        }
        assert!(!chunks.last().unwrap().continues);
    }

    #[test]
    fn reassembly_recovers_exact_payload() {
        let big = "y".repeat(5000);
        let value = json!({"render": big});
        let frames = encode_chunked(&value, 3, Origin::Server, FrameType::Response, Status::Ok, 1800).unwrap();
        assert!(frames.len() > 1);

        let mut reassembler = Reassembler::new();
        let mut complete = None;
        for frame in frames {
            if let Some(f) = reassembler.feed(frame).unwrap() {
                complete = Some(f);
            }
        }
        let complete = complete.expect("should reassemble");
        let recovered: serde_json::Value = complete.decode_payload().unwrap();
        assert_eq!(recovered, value);
    }

    #[test]
    fn too_many_chunks_is_rejected() {
        let frame = Frame {
            origin: Origin::Client,
            correlation_id: 1,
            continues: false,
            frame_type: FrameType::Command,
            status: Status::Ok,
            payload: vec![0u8; 1],
        };
        let err = split_frame(&frame, 0).unwrap_err();
        assert!(matches!(err, ChunkError::InvalidMtu(0)));
    }
}
