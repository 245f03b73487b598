//! The host's native parameter API (§4.4, §9 "Plugin parameter indices").
//!
//! A trait rather than a concrete binding because the host's scripting
//! surface is not something this crate can call directly in a test run —
//! handlers are written against `dyn HostApi` and a real bridge plugs in
//! the host's actual callback table at load time.
//!
//! Every method is synchronous and must return quickly: the host pumps the
//! script's callback on its audio/UI thread (§5), so a handler that blocks
//! here stalls the host.

use sysex_proto::ParameterEntry;

pub trait HostApi {
    /// Return the current parameter list for the plugin loaded at
    /// `(channel, slot)`. Indices are positional and may shift across
    /// plugin versions or reloads — never persist one (§9).
    fn discover_parameters(&mut self, channel: u8, slot: u8) -> Result<Vec<ParameterEntry>, String>;

    /// Set a parameter's value, `[0,1]`. The caller (the Outer Server, via
    /// `param-resolver`) is responsible for recording this in shadow state
    /// on success; this trait only performs the host call.
    fn set_parameter(&mut self, channel: u8, slot: u8, index: u32, value: f64) -> Result<(), String>;

    /// Read a parameter's current value directly from the host. Read-back
    /// is unreliable for many plugins (§9); callers should prefer shadow
    /// state and treat this as "live, possibly stale".
    fn get_parameter(&mut self, channel: u8, slot: u8, index: u32) -> Result<f64, String>;
}
