//! A canned `HostApi` for router and handler tests — stands in for the
//! host's native parameter callbacks, which this crate has no way to
//! exercise outside the real host.

use sysex_proto::ParameterEntry;

use crate::host_api::HostApi;

#[derive(Default)]
pub struct StubHostApi {
    parameters: Vec<ParameterEntry>,
    pub last_set: Option<(u8, u8, u32, f64)>,
    fail: bool,
}

impl StubHostApi {
    pub fn with_params(named: Vec<(String, f64)>) -> Self {
        let parameters = named
            .into_iter()
            .enumerate()
            .map(|(index, (raw_name, value))| ParameterEntry { index: index as u32, raw_name, value })
            .collect();
        Self { parameters, last_set: None, fail: false }
    }

    pub fn failing() -> Self {
        Self { parameters: Vec::new(), last_set: None, fail: true }
    }
}

impl HostApi for StubHostApi {
    fn discover_parameters(&mut self, _channel: u8, _slot: u8) -> Result<Vec<ParameterEntry>, String> {
        if self.fail {
            return Err("no plugin loaded".to_string());
        }
        Ok(self.parameters.clone())
    }

    fn set_parameter(&mut self, channel: u8, slot: u8, index: u32, value: f64) -> Result<(), String> {
        if self.fail {
            return Err("host rejected the write".to_string());
        }
        self.last_set = Some((channel, slot, index, value));
        Ok(())
    }

    fn get_parameter(&mut self, _channel: u8, _slot: u8, index: u32) -> Result<f64, String> {
        if self.fail {
            return Err("host rejected the read".to_string());
        }
        self.parameters
            .iter()
            .find(|p| p.index == index)
            .map(|p| p.value)
            .ok_or_else(|| "no such parameter".to_string())
    }
}
