//! MIDI Port Manager (§4.3).
//!
//! Opens named input/output ports by case-insensitive partial name match,
//! makes sure SysEx reception is enabled (several MIDI backends ignore SysEx
//! by default), and dispatches only frames from the expected manufacturer.
//! Everything else on the wire is dropped silently.

use std::sync::Mutex;

use midir::{Ignore, MidiInput, MidiInputConnection, MidiOutput, MidiOutputConnection};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, trace, warn};

use sysex_proto::MANUFACTURER;

use crate::error::MidiLinkError;

/// A MIDI port discovered during a scan.
#[derive(Debug, Clone)]
pub struct PortInfo {
    pub index: usize,
    pub name: String,
}

fn find_port_by_pattern<T: midir::MidiIO>(
    io: &T,
    pattern: &str,
) -> Result<T::Port, MidiLinkError> {
    let needle = pattern.to_lowercase();
    io.ports()
        .into_iter()
        .find(|p| {
            io.port_name(p)
                .map(|n| n.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
        .ok_or_else(|| MidiLinkError::PortNotFound(pattern.to_string()))
}

/// Raw SysEx bytes received from the input port, tagged with nothing else —
/// filtering and decoding happen one layer up in `Correlator`.
pub struct RawSysex(pub Vec<u8>);

/// Holds the open input/output connections for the link.
///
/// Reception is handled on midir's own callback thread; incoming messages
/// are forwarded to `inbound` so the async correlator can consume them
/// without ever blocking the MIDI thread.
pub struct PortManager {
    _input: MidiInputConnection<()>,
    output: Mutex<MidiOutputConnection>,
    pub output_port_name: String,
    pub input_port_name: String,
    disconnect_tx: broadcast::Sender<()>,
}

impl PortManager {
    /// Open the first input port matching `input_pattern` and the first
    /// output port matching `output_pattern` (case-insensitive substring).
    pub fn open(
        input_pattern: &str,
        output_pattern: &str,
    ) -> Result<(Self, mpsc::UnboundedReceiver<RawSysex>), MidiLinkError> {
        let mut midi_in =
            MidiInput::new("daw-bridge-in").map_err(|e| MidiLinkError::Backend(e.to_string()))?;
        // Many backends ignore SysEx by default; this link is SysEx-only.
        midi_in.ignore(Ignore::None);
        let in_port = find_port_by_pattern(&midi_in, input_pattern)?;
        let input_port_name = midi_in
            .port_name(&in_port)
            .map_err(|e| MidiLinkError::Backend(e.to_string()))?;

        let (tx, rx) = mpsc::unbounded_channel();
        let input = midi_in
            .connect(
                &in_port,
                "daw-bridge-input",
                move |_timestamp_us, data, _| {
                    if data.first() == Some(&0xF0) {
                        // Strip the leading 0xF0/trailing 0xF7 MIDI framing;
                        // the manufacturer check happens on our own sentinel
                        // byte just inside it.
                        let inner = data
                            .strip_prefix(&[0xF0])
                            .and_then(|d| d.strip_suffix(&[0xF7]))
                            .unwrap_or(data);
                        if inner.get(1) == Some(&MANUFACTURER) {
                            let _ = tx.send(RawSysex(inner.to_vec()));
                        } else {
                            trace!("dropping sysex from unexpected manufacturer");
                        }
                    }
                },
                (),
            )
            .map_err(|e| MidiLinkError::Backend(e.to_string()))?;

        let midi_out =
            MidiOutput::new("daw-bridge-out").map_err(|e| MidiLinkError::Backend(e.to_string()))?;
        let out_port = find_port_by_pattern(&midi_out, output_pattern)?;
        let output_port_name = midi_out
            .port_name(&out_port)
            .map_err(|e| MidiLinkError::Backend(e.to_string()))?;
        let output = midi_out
            .connect(&out_port, "daw-bridge-output")
            .map_err(|e| MidiLinkError::Backend(e.to_string()))?;

        debug!(input_port_name, output_port_name, "MIDI link opened");

        let (disconnect_tx, _) = broadcast::channel(4);

        Ok((
            Self {
                _input: input,
                output: Mutex::new(output),
                output_port_name,
                input_port_name,
                disconnect_tx,
            },
            rx,
        ))
    }

    /// Send a raw SysEx byte sequence (already 0xF0/0xF7 wrapped by the
    /// caller's frame encoder — see `crate::wire::wrap_sysex`).
    pub fn send(&self, bytes: &[u8]) -> Result<(), MidiLinkError> {
        let mut out = self.output.lock().expect("output mutex poisoned");
        out.send(bytes).map_err(|e| MidiLinkError::Backend(e.to_string()))
    }

    /// Subscribe to the disconnect event. All downstream components treat a
    /// disconnect as invalidating every pending request.
    pub fn subscribe_disconnect(&self) -> broadcast::Receiver<()> {
        self.disconnect_tx.subscribe()
    }

    /// Signal that the link has gone down (called from the port's error
    /// path, e.g. a closed/unplugged device).
    pub fn notify_disconnected(&self) {
        warn!("MIDI link disconnected");
        let _ = self.disconnect_tx.send(());
    }
}

/// List all MIDI input ports currently visible to the backend.
pub fn list_input_ports() -> Result<Vec<PortInfo>, MidiLinkError> {
    let midi_in = MidiInput::new("daw-bridge-scan").map_err(|e| MidiLinkError::Backend(e.to_string()))?;
    Ok(midi_in
        .ports()
        .iter()
        .enumerate()
        .filter_map(|(i, p)| midi_in.port_name(p).ok().map(|name| PortInfo { index: i, name }))
        .collect())
}

/// List all MIDI output ports currently visible to the backend.
pub fn list_output_ports() -> Result<Vec<PortInfo>, MidiLinkError> {
    let midi_out = MidiOutput::new("daw-bridge-scan").map_err(|e| MidiLinkError::Backend(e.to_string()))?;
    Ok(midi_out
        .ports()
        .iter()
        .enumerate()
        .filter_map(|(i, p)| midi_out.port_name(p).ok().map(|name| PortInfo { index: i, name }))
        .collect())
}
