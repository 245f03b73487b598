//! Humanization engine (§4.8): a pure `notes -> notes` transform with a
//! fixed stage order and seeded, replayable randomness.

pub mod beat;
pub mod drift;
pub mod length;
pub mod pipeline;
pub mod presets;
pub mod rng;
pub mod swing;
pub mod velocity;

pub use drift::DriftParams;
pub use length::LengthParams;
pub use pipeline::{humanize, HumanizeResult};
pub use presets::{preset, HumanizeOverrides, HumanizeParams};
pub use rng::HumanizeRng;
pub use swing::SwingParams;
pub use velocity::{Instrument, NoiseField, VelocityProfile};
