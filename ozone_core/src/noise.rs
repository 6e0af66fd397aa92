//! Disturbance jitter applied to the process inputs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::NoiseCfg;
use ozone_traits::NoiseSource;

/// One tick's worth of sensor/process jitter.
///
/// `temp_offset`/`ph_offset` are added to the nominal inputs; `pressure`
/// multiplies into the oxidation index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disturbance {
    pub temp_offset: f64,
    pub ph_offset: f64,
    pub pressure: f64,
}

impl Disturbance {
    /// No jitter: offsets are zero and the pressure factor is exactly 1.0.
    pub const NOMINAL: Self = Self {
        temp_offset: 0.0,
        ph_offset: 0.0,
        pressure: 1.0,
    };

    /// Sample independent uniform jitter for each field from `noise`,
    /// scaled by the configured half-widths.
    pub fn draw(noise: &mut dyn NoiseSource, cfg: &NoiseCfg) -> Self {
        Self {
            temp_offset: noise.next_unit() * cfg.temp_half_width,
            ph_offset: noise.next_unit() * cfg.ph_half_width,
            pressure: 1.0 + noise.next_unit() * cfg.pressure_half_width,
        }
    }
}

/// Default noise source: a seedable PRNG producing uniform values in
/// `[-1.0, 1.0)`.
#[derive(Debug)]
pub struct SeededNoise {
    rng: StdRng,
}

impl SeededNoise {
    /// Deterministic stream for a given seed; used by tests and replays.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// OS-entropy stream for normal operation.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl NoiseSource for SeededNoise {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen_range(-1.0..1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SeededNoise::from_seed(42);
        let mut b = SeededNoise::from_seed(42);
        for _ in 0..64 {
            assert_eq!(a.next_unit(), b.next_unit());
        }
    }

    #[test]
    fn units_stay_in_range() {
        let mut n = SeededNoise::from_seed(7);
        for _ in 0..1024 {
            let v = n.next_unit();
            assert!((-1.0..1.0).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn draw_respects_half_widths() {
        let cfg = NoiseCfg::default();
        let mut n = SeededNoise::from_seed(3);
        for _ in 0..256 {
            let d = Disturbance::draw(&mut n, &cfg);
            assert!(d.temp_offset.abs() <= cfg.temp_half_width);
            assert!(d.ph_offset.abs() <= cfg.ph_half_width);
            assert!((d.pressure - 1.0).abs() <= cfg.pressure_half_width);
        }
    }
}
