//! Scene configuration loaded from YAML.
//!
//! Every field has a default, so a document only needs to name what it
//! changes. Validation runs once after parsing; nothing is clamped.

use serde::{Deserialize, Serialize};

use crate::animation::ProgressRates;
use crate::error::{self, ConfigError, Result};
use crate::garland::{SpiralCurve, SpiralParams};
use crate::mesh::{RibbonSurface, TubeParams};
use crate::particles::SnowParams;

/// Particle field settings
pub type SnowConfig = SnowParams;

/// Spiral shape plus the tube swept along it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GarlandConfig {
    pub turns: f32,
    pub height: f32,
    pub base_radius: f32,
    pub samples: usize,
    pub vertical_start: f32,
    pub radial_offset: f32,
    pub tube_radius: f32,
    pub radial_segments: usize,
    /// Ribbon slices per curve segment
    pub tubular_multiplier: usize,
    /// Vertical placement of the whole ribbon
    pub offset_y: f32,
}

impl Default for GarlandConfig {
    fn default() -> Self {
        let spiral = SpiralParams::default();
        Self {
            turns: spiral.turns,
            height: spiral.height,
            base_radius: spiral.base_radius,
            samples: spiral.samples,
            vertical_start: spiral.vertical_start,
            radial_offset: spiral.radial_offset,
            tube_radius: 0.12,
            radial_segments: 12,
            tubular_multiplier: 2,
            offset_y: -5.0,
        }
    }
}

impl GarlandConfig {
    pub fn spiral(&self) -> SpiralParams {
        SpiralParams {
            turns: self.turns,
            height: self.height,
            base_radius: self.base_radius,
            samples: self.samples,
            vertical_start: self.vertical_start,
            radial_offset: self.radial_offset,
        }
    }

    pub fn tube(&self, curve: &SpiralCurve) -> TubeParams {
        TubeParams::for_curve(
            curve,
            self.tubular_multiplier,
            self.tube_radius,
            self.radial_segments,
        )
    }

    pub fn validate(&self) -> Result<()> {
        self.spiral().validate()?;
        error::positive("tube_radius", self.tube_radius)?;
        error::finite("offset_y", self.offset_y)?;

        if self.radial_segments < 3 {
            return Err(ConfigError::TooFewSamples {
                name: "radial_segments",
                got: self.radial_segments,
                min: 3,
            });
        }
        if self.tubular_multiplier < 2 {
            return Err(ConfigError::TooFewSamples {
                name: "tubular_multiplier",
                got: self.tubular_multiplier,
                min: 2,
            });
        }
        Ok(())
    }

    /// Build the curve and the ribbon mesh around it
    pub fn build(&self) -> Result<(SpiralCurve, RibbonSurface)> {
        let curve = SpiralCurve::generate(self.spiral())?;
        let ribbon = RibbonSurface::extrude(&curve, self.tube(&curve))?;
        Ok((curve, ribbon))
    }
}

/// Convergence rates for each animated object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub ribbon: ProgressRates,
    pub particles: ProgressRates,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            ribbon: ProgressRates::RIBBON,
            particles: ProgressRates::PARTICLES,
        }
    }
}

impl AnimationConfig {
    pub fn validate(&self) -> Result<()> {
        self.ribbon.validate()?;
        self.particles.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub garland: GarlandConfig,
    pub snow: SnowConfig,
    pub animation: AnimationConfig,
    /// Seed for particle generation
    pub seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            garland: GarlandConfig::default(),
            snow: SnowConfig::default(),
            animation: AnimationConfig::default(),
            seed: 0x5eed,
        }
    }
}

impl SceneConfig {
    /// Parse and validate. An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: SceneConfig = if yaml.trim().is_empty() {
            SceneConfig::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.garland.validate()?;
        self.snow.validate()?;
        self.animation.validate()
    }
}
