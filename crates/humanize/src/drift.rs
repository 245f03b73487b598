//! Ornstein–Uhlenbeck timing drift (§4.8, second stage — perturbs around
//! the already-swung positions).

use sysex_proto::NoteData;

use crate::rng::HumanizeRng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftParams {
    /// Mean-reversion speed, `(0,1]`.
    pub theta: f64,
    /// Volatility in beats, `>= 0`.
    pub sigma: f64,
    /// Scale `sigma` per note by local note density in a ±2-beat window.
    pub context_aware: bool,
}

impl Default for DriftParams {
    fn default() -> Self {
        Self { theta: 0.5, sigma: 0.01, context_aware: false }
    }
}

const DENSITY_WINDOW_BEATS: f64 = 2.0;

fn local_density(notes: &[NoteData], idx: usize) -> usize {
    let t = notes[idx].time;
    notes
        .iter()
        .enumerate()
        .filter(|&(i, n)| i != idx && (n.time - t).abs() <= DENSITY_WINDOW_BEATS)
        .count()
}

fn density_scale(neighbours: usize) -> f64 {
    match neighbours {
        0..=3 => 1.5,
        4..=8 => 1.0,
        _ => 0.5,
    }
}

/// Walks notes once in time order (restoring each offset to its original
/// index), so later notes' drift depends on earlier ones, not on note-array
/// position.
pub fn apply_drift(notes: &mut [NoteData], params: &DriftParams, rng: &mut HumanizeRng) {
    let mut order: Vec<usize> = (0..notes.len()).collect();
    order.sort_by(|&a, &b| notes[a].time.partial_cmp(&notes[b].time).unwrap());

    let dt = 1.0_f64;
    let mut x = 0.0_f64;
    for idx in order {
        let sigma = if params.context_aware {
            params.sigma * density_scale(local_density(notes, idx))
        } else {
            params.sigma
        };
        x += params.theta * (0.0 - x) * dt + sigma * dt.sqrt() * rng.gaussian();
        notes[idx].time = (notes[idx].time + x).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evenly_spaced(n: usize, step: f64) -> Vec<NoteData> {
        (0..n).map(|i| NoteData::new(60, i as f64 * step, 0.25, 0.8)).collect()
    }

    #[test]
    fn same_seed_is_deterministic() {
        let params = DriftParams { theta: 0.5, sigma: 0.008, context_aware: false };
        let mut a = evenly_spaced(16, 0.25);
        let mut b = a.clone();
        apply_drift(&mut a, &params, &mut HumanizeRng::from_seed("abc"));
        apply_drift(&mut b, &params, &mut HumanizeRng::from_seed("abc"));
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.time, y.time);
        }
    }

    #[test]
    fn never_produces_negative_time() {
        let params = DriftParams { theta: 0.9, sigma: 5.0, context_aware: false };
        let mut notes = evenly_spaced(8, 0.1);
        apply_drift(&mut notes, &params, &mut HumanizeRng::from_seed("stress"));
        for n in &notes {
            assert!(n.time >= 0.0);
        }
    }

    #[test]
    fn context_aware_scales_sigma_by_local_density() {
        assert_eq!(density_scale(0), 1.5);
        assert_eq!(density_scale(5), 1.0);
        assert_eq!(density_scale(12), 0.5);
    }
}
