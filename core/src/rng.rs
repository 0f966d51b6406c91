//! Deterministic random number generation.
//!
//! RULE: Token serials never call a platform RNG. Everything
//! reproducible flows through a PortalRng derived from one master seed,
//! so the same seed always issues the same token sequence.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG stream.
pub struct PortalRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl PortalRng {
    /// Create a stream from the master seed and a stable stream index.
    /// The index must never change once assigned.
    pub fn new(master_seed: u64, stream_index: u64) -> Self {
        let derived_seed = master_seed ^ (stream_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries — only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum RngStream {
    Intake = 0,
    // Add new streams here — append only.
}

impl RngStream {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Intake => "intake",
        }
    }

    pub fn rng(self, master_seed: u64) -> PortalRng {
        PortalRng::new(master_seed, self as u64).with_name(self.name())
    }
}
