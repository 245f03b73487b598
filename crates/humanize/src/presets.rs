//! Named humanization presets (§4.8). Presets are deep-copied before being
//! handed to a caller, and individual field overrides win over preset
//! defaults rather than replacing the whole preset.

use crate::drift::DriftParams;
use crate::length::LengthParams;
use crate::swing::SwingParams;
use crate::velocity::{Instrument, VelocityProfile};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HumanizeParams {
    pub swing: SwingParams,
    pub drift: DriftParams,
    pub instrument: Instrument,
    pub velocity: VelocityProfile,
    pub length: LengthParams,
}

/// Every field is optional; `None` leaves the preset's value untouched —
/// this is the "deep merge, not replacement" semantics from §4.8.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HumanizeOverrides {
    pub swing_amount: Option<f64>,
    pub swing_grid: Option<f64>,
    pub drift_theta: Option<f64>,
    pub drift_sigma: Option<f64>,
    pub drift_context_aware: Option<bool>,
    pub instrument: Option<Instrument>,
    pub velocity_variation_amount: Option<f64>,
    pub velocity_downbeat_boost: Option<f64>,
    pub length_amount: Option<f64>,
}

impl HumanizeParams {
    pub fn with_overrides(mut self, overrides: &HumanizeOverrides) -> Self {
        if let Some(v) = overrides.swing_amount {
            self.swing.amount = v;
        }
        if let Some(v) = overrides.swing_grid {
            self.swing.grid = v;
        }
        if let Some(v) = overrides.drift_theta {
            self.drift.theta = v;
        }
        if let Some(v) = overrides.drift_sigma {
            self.drift.sigma = v;
        }
        if let Some(v) = overrides.drift_context_aware {
            self.drift.context_aware = v;
        }
        if let Some(v) = overrides.instrument {
            self.instrument = v;
        }
        if let Some(v) = overrides.velocity_variation_amount {
            self.velocity.variation_amount = v;
        }
        if let Some(v) = overrides.velocity_downbeat_boost {
            self.velocity.downbeat_boost = v;
        }
        if let Some(v) = overrides.length_amount {
            self.length.amount = v;
        }
        self
    }
}

/// Look up a named preset. Returns `None` for unknown names — callers fall
/// back to `HumanizeParams`'s field defaults.
pub fn preset(name: &str) -> Option<HumanizeParams> {
    let params = match name {
        "tight" => HumanizeParams {
            swing: SwingParams { amount: 52.0, grid: 0.25 },
            drift: DriftParams { theta: 0.85, sigma: 0.003, context_aware: true },
            instrument: Instrument::Generic,
            velocity: VelocityProfile { base_range: (0.55, 0.78), variation_amount: 0.06, downbeat_boost: 0.08 },
            length: LengthParams { amount: 0.15 },
        },
        "loose" => HumanizeParams {
            swing: SwingParams { amount: 58.0, grid: 0.25 },
            drift: DriftParams { theta: 0.35, sigma: 0.015, context_aware: true },
            instrument: Instrument::Generic,
            velocity: VelocityProfile { base_range: (0.45, 0.85), variation_amount: 0.14, downbeat_boost: 0.10 },
            length: LengthParams { amount: 0.35 },
        },
        "jazz" => HumanizeParams {
            swing: SwingParams { amount: 66.0, grid: 0.25 },
            drift: DriftParams { theta: 0.4, sigma: 0.012, context_aware: true },
            instrument: Instrument::Piano,
            velocity: VelocityProfile::piano(),
            length: LengthParams { amount: 0.4 },
        },
        "lo-fi" => HumanizeParams {
            swing: SwingParams { amount: 60.0, grid: 0.5 },
            drift: DriftParams { theta: 0.2, sigma: 0.025, context_aware: false },
            instrument: Instrument::Generic,
            velocity: VelocityProfile { base_range: (0.4, 0.85), variation_amount: 0.2, downbeat_boost: 0.06 },
            length: LengthParams { amount: 0.5 },
        },
        _ => return None,
    };
    Some(params)
}
