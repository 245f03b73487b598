//! Note-length articulation (§4.8, final stage — depends on the beat
//! classification computed from the final, post-drift timing).

use sysex_proto::NoteData;

use crate::beat::{classify, BeatClass};
use crate::rng::HumanizeRng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthParams {
    /// Overall articulation strength, typically `[0,1]`.
    pub amount: f64,
}

impl Default for LengthParams {
    fn default() -> Self {
        Self { amount: 0.3 }
    }
}

const MAX_RELATIVE_CHANGE: f64 = 0.30;

pub fn apply_length(notes: &mut [NoteData], params: &LengthParams, rng: &mut HumanizeRng) {
    for note in notes.iter_mut() {
        let base = rng.uniform_signed() * params.amount * 0.15;
        let bias = match classify(note.time) {
            BeatClass::Downbeat => 0.05 * params.amount,
            BeatClass::Offbeat => -0.03 * params.amount,
            BeatClass::Backbeat => 0.0,
        };
        let change = (base + bias).clamp(-MAX_RELATIVE_CHANGE, MAX_RELATIVE_CHANGE);
        note.duration = (note.duration * (1.0 + change)).max(0.01);
    }
}
