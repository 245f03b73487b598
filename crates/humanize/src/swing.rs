//! MPC-style swing (§4.8, first stage — it redefines the rhythmic grid
//! that every later stage reasons about).

use sysex_proto::NoteData;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingParams {
    /// `[50,75]`; `50` is a no-op.
    pub amount: f64,
    /// Grid unit in beats: `0.5` for eighths, `0.25` for sixteenths.
    pub grid: f64,
}

impl Default for SwingParams {
    fn default() -> Self {
        Self { amount: 50.0, grid: 0.25 }
    }
}

pub fn apply_swing(notes: &mut [NoteData], params: &SwingParams) {
    if params.amount == 50.0 {
        return;
    }
    let cell = params.grid * 2.0;
    let tolerance = 0.1 * params.grid;
    let delay = params.grid * (params.amount - 50.0) / 25.0;
    for note in notes.iter_mut() {
        let pos = note.time.rem_euclid(cell);
        if (pos - params.grid).abs() <= tolerance {
            note.time += delay;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes(times: &[f64]) -> Vec<NoteData> {
        times.iter().map(|&t| NoteData::new(60, t, 0.25, 0.8)).collect()
    }

    #[test]
    fn amount_fifty_is_a_no_op() {
        let mut notes = notes(&[0.0, 0.25, 0.5, 0.75]);
        let before = notes.clone();
        apply_swing(&mut notes, &SwingParams { amount: 50.0, grid: 0.25 });
        for (a, b) in notes.iter().zip(before.iter()) {
            assert_eq!(a.time, b.time);
        }
    }

    #[test]
    fn sixty_six_percent_swing_on_sixteenths_matches_reference() {
        let mut notes = notes(&[0.0, 0.25, 0.5, 0.75]);
        apply_swing(&mut notes, &SwingParams { amount: 66.0, grid: 0.25 });
        let expected = [0.000, 0.410, 0.500, 0.910];
        for (note, exp) in notes.iter().zip(expected.iter()) {
            assert!((note.time - exp).abs() < 1e-3, "{} vs {}", note.time, exp);
        }
    }
}
