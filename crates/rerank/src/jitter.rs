//! Injectable randomness for the heuristic reranker.
//!
//! The simulated reranker perturbs every score slightly so repeated demo runs
//! do not look canned. Tests and reproducible runs swap in [`NoJitter`] or a
//! seeded [`UniformJitter`].

use std::sync::Mutex;

/// Source of the symmetric score perturbation.
pub trait JitterSource: Send + Sync {
    /// Returns a value in `[-amplitude, +amplitude]`.
    fn sample(&self) -> f64;
}

/// Always zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn sample(&self) -> f64 {
        0.0
    }
}

/// Uniform jitter in `[-amplitude, +amplitude]` backed by `fastrand`.
#[derive(Debug)]
pub struct UniformJitter {
    amplitude: f64,
    rng: Mutex<fastrand::Rng>,
}

impl UniformJitter {
    /// Randomly seeded.
    pub fn new(amplitude: f64) -> Self {
        Self {
            amplitude,
            rng: Mutex::new(fastrand::Rng::new()),
        }
    }

    /// Same seed, same sequence.
    pub fn seeded(amplitude: f64, seed: u64) -> Self {
        Self {
            amplitude,
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
        }
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }
}

impl JitterSource for UniformJitter {
    fn sample(&self) -> f64 {
        let unit = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .f64();
        (unit * 2.0 - 1.0) * self.amplitude
    }
}

impl<J: JitterSource + ?Sized> JitterSource for Box<J> {
    fn sample(&self) -> f64 {
        (**self).sample()
    }
}

impl<J: JitterSource + ?Sized> JitterSource for std::sync::Arc<J> {
    fn sample(&self) -> f64 {
        (**self).sample()
    }
}
