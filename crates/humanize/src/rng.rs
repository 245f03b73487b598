//! Seeded PRNG plumbing (§4.8). Every stage accepts the same PRNG instance
//! so a run is fully determined by its seed string.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::distributions::Alphanumeric;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

/// Derive a numeric seed from an arbitrary string via FNV-1a, so replay
/// doesn't depend on the standard library's unspecified hasher.
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

/// A fresh seed: timestamp plus a short random suffix, returned to the
/// caller so a humanize run can be replayed exactly (§4.8).
pub fn derive_seed() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(4)
        .map(char::from)
        .collect();
    format!("{millis}-{suffix}")
}

pub struct HumanizeRng {
    inner: StdRng,
}

impl HumanizeRng {
    pub fn from_seed(seed: &str) -> Self {
        Self { inner: StdRng::seed_from_u64(fnv1a(seed.as_bytes())) }
    }

    /// Uniform sample in `[0,1)`.
    pub fn uniform(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Uniform sample in `[-1,1]`.
    pub fn uniform_signed(&mut self) -> f64 {
        self.inner.gen_range(-1.0..=1.0)
    }

    /// One standard-normal sample via the Box–Muller transform.
    pub fn gaussian(&mut self) -> f64 {
        let u1: f64 = self.inner.gen::<f64>().max(f64::EPSILON);
        let u2: f64 = self.inner.gen();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}
