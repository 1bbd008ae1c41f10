use serde::{Deserialize, Serialize};

use super::mode::TreeMode;
use crate::error::{self, Result};

/// Garland reveal speed (per second). Slow, so the ribbon reads as unwinding.
pub const RIBBON_REVEAL_RATE: f32 = 1.0;
/// Garland hide speed (per second). Fast, so no half-formed ribbon lingers.
pub const RIBBON_HIDE_RATE: f32 = 10.0;
/// Particle chaos/snowfall blend speed, same in both directions
pub const PARTICLE_BLEND_RATE: f32 = 1.5;

/// Per-object animation state, owned by the host and passed in each frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationState {
    /// Always in [0,1]
    pub progress: f32,
    /// Host clock at the last update, for time-varying shading terms
    pub elapsed: f32,
}

impl AnimationState {
    pub fn new(progress: f32) -> Self {
        Self {
            progress: progress.clamp(0.0, 1.0),
            elapsed: 0.0,
        }
    }
}

/// Convergence speeds toward progress 1 (`reveal`) and toward 0 (`hide`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressRates {
    pub reveal: f32,
    pub hide: f32,
}

impl ProgressRates {
    pub const RIBBON: ProgressRates = ProgressRates {
        reveal: RIBBON_REVEAL_RATE,
        hide: RIBBON_HIDE_RATE,
    };

    pub const PARTICLES: ProgressRates = ProgressRates::symmetric(PARTICLE_BLEND_RATE);

    pub const fn symmetric(rate: f32) -> Self {
        Self {
            reveal: rate,
            hide: rate,
        }
    }

    pub fn validate(&self) -> Result<()> {
        error::positive("reveal rate", self.reveal)?;
        error::positive("hide rate", self.hide)?;
        Ok(())
    }

    fn toward(&self, target: f32) -> f32 {
        if target > 0.5 {
            self.reveal
        } else {
            self.hide
        }
    }
}

/// Eases an object's progress toward the target of the current mode.
///
/// Call `update` exactly once per frame per object. A second call in the
/// same frame applies the smoothing twice; that is not detected here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressController {
    rates: ProgressRates,
}

impl ProgressController {
    pub fn new(rates: ProgressRates) -> Self {
        Self { rates }
    }

    pub fn ribbon() -> Self {
        Self::new(ProgressRates::RIBBON)
    }

    pub fn particles() -> Self {
        Self::new(ProgressRates::PARTICLES)
    }

    pub fn rates(&self) -> &ProgressRates {
        &self.rates
    }

    /// Advance `state` by one frame of `delta` seconds.
    ///
    /// The step is `min(1, rate * delta)` of the remaining distance, so a
    /// long frame lands on the target instead of overshooting it. A negative
    /// `delta` is treated as zero.
    pub fn update(
        &self,
        state: AnimationState,
        mode: TreeMode,
        elapsed: f32,
        delta: f32,
    ) -> AnimationState {
        let target = mode.target();
        let rate = self.rates.toward(target);
        let step = (rate * delta.max(0.0)).min(1.0);
        let progress = state.progress + (target - state.progress) * step;

        AnimationState {
            progress: progress.clamp(0.0, 1.0),
            elapsed,
        }
    }
}
