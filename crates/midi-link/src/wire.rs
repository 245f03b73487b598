//! MIDI SysEx framing: wraps/unwraps the standard `0xF0 ... 0xF7` envelope
//! around a `sysex-proto` frame's bytes.

/// Wrap a sysex-proto frame's bytes in the standard MIDI SysEx envelope.
pub fn wrap_sysex(frame_bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(frame_bytes.len() + 2);
    out.push(0xF0);
    out.extend_from_slice(frame_bytes);
    out.push(0xF7);
    out
}
