//! Per-frame progress toward the state selected by the tree mode.
//!
//! The host owns both the mode and the clock; this module only turns them
//! into a progress value per animated object.

mod mode;
mod progress;

pub use mode::TreeMode;
pub use progress::{
    AnimationState, ProgressController, ProgressRates, PARTICLE_BLEND_RATE, RIBBON_HIDE_RATE,
    RIBBON_REVEAL_RATE,
};
