//! SysEx frame codec.
//!
//! A frame is a sentinel-delimited, 7-bit-safe byte sequence carrying one
//! piece of a logical request or response. See the module-level docs in
//! `lib.rs` for the wire diagram.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Fixed manufacturer id for this link. Chosen from the non-commercial
/// (educational/hobbyist) SysEx id range, distinct from any registered
/// manufacturer.
pub const MANUFACTURER: u8 = 0x7D;

/// Frame start sentinel. Base64's alphabet (`A-Za-z0-9+/=`) never encodes to
/// a byte above `0x7A`, so `0x7E`/`0x7F` are free to reserve as sentinels
/// even though the payload itself lives in `[0,127]`.
pub const START: u8 = 0x7E;

/// Frame end sentinel.
pub const END: u8 = 0x7F;

/// Which side of the link originated a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Client = 0x00,
    Server = 0x01,
}

impl Origin {
    fn from_byte(b: u8) -> Result<Self, FrameError> {
        match b {
            0x00 => Ok(Origin::Client),
            0x01 => Ok(Origin::Server),
            other => Err(FrameError::InvalidOrigin(other)),
        }
    }
}

/// Whether a frame carries a command or a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    Command = 0x01,
    Response = 0x02,
}

impl FrameType {
    fn from_byte(b: u8) -> Result<Self, FrameError> {
        match b {
            0x01 => Ok(FrameType::Command),
            0x02 => Ok(FrameType::Response),
            other => Err(FrameError::InvalidFrameType(other)),
        }
    }
}

/// Transport-level status. Independent of any `success` field the payload's
/// own JSON may carry — on mismatch the transport status wins (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok = 0x00,
    Error = 0x01,
}

impl Status {
    fn from_byte(b: u8) -> Result<Self, FrameError> {
        match b {
            0x00 => Ok(Status::Ok),
            0x01 => Ok(Status::Error),
            other => Err(FrameError::InvalidStatus(other)),
        }
    }
}

/// A single wire frame: one chunk of one logical request or response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub origin: Origin,
    pub correlation_id: u8,
    pub continues: bool,
    pub frame_type: FrameType,
    pub status: Status,
    /// 7-bit-safe payload bytes (base64 of a JSON-encoded value, or a
    /// fragment thereof when part of a chunk set).
    pub payload: Vec<u8>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame malformed at offset {offset}: {reason}")]
    Malformed { offset: usize, reason: &'static str },
    #[error("invalid origin byte {0:#04x}")]
    InvalidOrigin(u8),
    #[error("invalid frame type byte {0:#04x}")]
    InvalidFrameType(u8),
    #[error("invalid status byte {0:#04x}")]
    InvalidStatus(u8),
    #[error("payload byte {value:#04x} at offset {offset} is not 7-bit safe")]
    PayloadByteOutOfRange { offset: usize, value: u8 },
    #[error("base64 decode failed: {0}")]
    Base64(String),
    #[error("json decode failed: {0}")]
    Json(String),
}

impl Frame {
    /// Encode a serializable value as a single un-chunked frame. Callers
    /// that need chunking should use `crate::chunk::split_frames` instead.
    pub fn encode<T: Serialize>(
        value: &T,
        correlation_id: u8,
        origin: Origin,
        frame_type: FrameType,
        status: Status,
    ) -> Result<Self, FrameError> {
        let json = serde_json::to_vec(value).map_err(|e| FrameError::Json(e.to_string()))?;
        let payload = STANDARD.encode(json).into_bytes();
        for (offset, &b) in payload.iter().enumerate() {
            if b > 0x7F {
                return Err(FrameError::PayloadByteOutOfRange { offset, value: b });
            }
        }
        Ok(Frame {
            origin,
            correlation_id,
            continues: false,
            frame_type,
            status,
            payload,
        })
    }

    /// Decode the payload back into a JSON value of type `T`.
    pub fn decode_payload<T: DeserializeOwned>(&self) -> Result<T, FrameError> {
        let json = STANDARD
            .decode(&self.payload)
            .map_err(|e| FrameError::Base64(e.to_string()))?;
        serde_json::from_slice(&json).map_err(|e| FrameError::Json(e.to_string()))
    }

    /// Serialize this frame to its on-wire byte sequence.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.payload.len() + 7);
        out.push(START);
        out.push(MANUFACTURER);
        out.push(self.origin as u8);
        out.push(self.correlation_id);
        out.push(self.continues as u8);
        out.push(self.frame_type as u8);
        out.push(self.status as u8);
        out.extend_from_slice(&self.payload);
        out.push(END);
        out
    }

    /// Parse a raw byte sequence into a `Frame`. Any structural failure
    /// raises `FrameError::Malformed` with the offending offset (§4.1).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FrameError> {
        const HEADER_LEN: usize = 7; // start, manufacturer, origin, id, continuation, type, status
        if bytes.len() < HEADER_LEN + 1 {
            return Err(FrameError::Malformed {
                offset: bytes.len(),
                reason: "frame shorter than fixed header",
            });
        }
        if bytes[0] != START {
            return Err(FrameError::Malformed {
                offset: 0,
                reason: "missing start sentinel",
            });
        }
        if bytes[bytes.len() - 1] != END {
            return Err(FrameError::Malformed {
                offset: bytes.len() - 1,
                reason: "missing end sentinel",
            });
        }
        if bytes[1] != MANUFACTURER {
            return Err(FrameError::Malformed {
                offset: 1,
                reason: "unknown manufacturer id",
            });
        }
        let origin = Origin::from_byte(bytes[2])?;
        let correlation_id = bytes[3];
        let continues = match bytes[4] {
            0 => false,
            1 => true,
            _ => {
                return Err(FrameError::Malformed {
                    offset: 4,
                    reason: "continuation flag not 0/1",
                })
            }
        };
        let frame_type = FrameType::from_byte(bytes[5])?;
        let status = Status::from_byte(bytes[6])?;
        let payload = bytes[HEADER_LEN..bytes.len() - 1].to_vec();
        for (i, &b) in payload.iter().enumerate() {
            if b > 0x7F {
                return Err(FrameError::PayloadByteOutOfRange {
                    offset: HEADER_LEN + i,
                    value: b,
                });
            }
        }
        Ok(Frame {
            origin,
            correlation_id,
            continues,
            frame_type,
            status,
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trip_preserves_value() {
        let value = json!({"action": "discover", "channel": 1, "slot": 2});
        let frame = Frame::encode(&value, 5, Origin::Client, FrameType::Command, Status::Ok)
            .expect("encode");
        let bytes = frame.to_bytes();
        let decoded = Frame::from_bytes(&bytes).expect("decode");
        assert_eq!(decoded.correlation_id, 5);
        assert_eq!(decoded.origin, Origin::Client);
        let back: serde_json::Value = decoded.decode_payload().expect("payload");
        assert_eq!(back, value);
    }

    #[test]
    fn every_payload_byte_is_seven_bit_safe() {
        let value = json!({"big": "x".repeat(5000), "bytes": [1,2,3,255,0]});
        let frame = Frame::encode(&value, 1, Origin::Server, FrameType::Response, Status::Ok)
            .expect("encode");
        for b in &frame.payload {
            assert!(*b <= 0x7F);
        }
        let bytes = frame.to_bytes();
        // sentinels only appear at the boundaries
        assert_eq!(bytes[0], START);
        assert_eq!(*bytes.last().unwrap(), END);
        for b in &bytes[1..bytes.len() - 1] {
            assert!(*b != START || *b != END);
        }
    }

    #[test]
    fn rejects_missing_start_sentinel() {
        let mut bytes = Frame::encode(&json!(1), 1, Origin::Client, FrameType::Command, Status::Ok)
            .unwrap()
            .to_bytes();
        bytes[0] = 0x00;
        let err = Frame::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, FrameError::Malformed { offset: 0, .. }));
    }

    #[test]
    fn server_response_origin_and_type_are_explicit() {
        let frame = Frame::encode(&json!({"ok": true}), 9, Origin::Server, FrameType::Response, Status::Ok)
            .unwrap();
        assert_eq!(frame.origin, Origin::Server);
        assert_eq!(frame.frame_type, FrameType::Response);
    }

    #[test]
    fn status_byte_wins_over_payload_success_field() {
        // The payload claims success, but transport status says error; callers
        // must trust `status`, not the payload's own field (§3).
        let value = json!({"success": true, "data": 42});
        let frame = Frame::encode(&value, 1, Origin::Server, FrameType::Response, Status::Error)
            .unwrap();
        assert_eq!(frame.status, Status::Error);
    }
}
