//! MIDI transport and request/response correlation for the DAW bridge link
//! (§4.2, §4.3): owns the physical MIDI ports, the SysEx envelope, and the
//! correlator that turns the raw byte stream into awaitable responses.

pub mod correlator;
pub mod error;
pub mod ports;
pub mod wire;

pub use correlator::Correlator;
pub use error::MidiLinkError;
pub use ports::{list_input_ports, list_output_ports, PortInfo, PortManager, RawSysex};
pub use wire::wrap_sysex;
