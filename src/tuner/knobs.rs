use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::planner::constants::{DEFAULT_SAMPLE_SIZE, DEFAULT_TRIALS};
use crate::planner::PlannerConfig;

/// Day-selection knobs explored by the tuner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunerKnobs {
    pub trials: usize,
    pub sample_size: usize,
}

impl Default for TunerKnobs {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl TunerKnobs {
    /// Number of tunable knobs.
    pub const NUM_KNOBS: usize = 2;

    /// Generate random knobs within the given ranges.
    pub fn random(rng: &mut impl Rng, ranges: &KnobRanges) -> Self {
        Self {
            trials: rng.gen_range(ranges.trials.0..=ranges.trials.1),
            sample_size: rng.gen_range(ranges.sample_size.0..=ranges.sample_size.1),
        }
    }

    /// Copy with one knob shifted by `step`, clamped to the ranges.
    ///
    /// `knob_idx`: 0 = trials, 1 = sample_size.
    pub fn perturb(&self, knob_idx: usize, step: isize, ranges: &KnobRanges) -> Self {
        let shift = |value: usize, (lo, hi): (usize, usize)| {
            value.saturating_add_signed(step).clamp(lo, hi)
        };

        let mut new = *self;
        match knob_idx {
            0 => new.trials = shift(self.trials, ranges.trials),
            1 => new.sample_size = shift(self.sample_size, ranges.sample_size),
            _ => {}
        }
        new
    }

    /// Candidate evaluations per slot across all trials.
    pub fn cost(&self) -> usize {
        self.trials * self.sample_size
    }

    pub fn to_config(&self) -> PlannerConfig {
        PlannerConfig {
            trials: self.trials,
            sample_size: self.sample_size,
        }
    }

    /// Format knobs as a compact string for display.
    pub fn display(&self) -> String {
        format!("trials={} sample={}", self.trials, self.sample_size)
    }
}

/// Inclusive (min, max) ranges for each knob.
#[derive(Debug, Clone)]
pub struct KnobRanges {
    pub trials: (usize, usize),
    pub sample_size: (usize, usize),
}

impl Default for KnobRanges {
    fn default() -> Self {
        Self {
            trials: (1, 40),
            sample_size: (1, 10),
        }
    }
}
