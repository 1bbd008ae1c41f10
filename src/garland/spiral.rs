use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::{self, ConfigError, Result};
use crate::math::{CatmullRomCurve, Vec3};

/// Shape of the spiral path around the tree cone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralParams {
    /// Full revolutions between the ground and the tip
    pub turns: f32,
    /// Tree height
    pub height: f32,
    /// Cone radius at ground level
    pub base_radius: f32,
    /// Number of curve segments; the curve has `samples + 1` control points
    pub samples: usize,
    /// Fraction of the height where the spiral begins
    pub vertical_start: f32,
    /// Constant outward push so the ribbon sits outside the foliage
    pub radial_offset: f32,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            turns: 8.0,
            height: 12.0,
            base_radius: 8.0,
            samples: 384,
            vertical_start: 0.55,
            radial_offset: 3.5,
        }
    }
}

impl SpiralParams {
    pub fn validate(&self) -> Result<()> {
        error::positive("turns", self.turns)?;
        error::positive("height", self.height)?;
        error::non_negative("base_radius", self.base_radius)?;
        error::finite("radial_offset", self.radial_offset)?;

        if self.samples < 2 {
            return Err(ConfigError::TooFewSamples {
                name: "samples",
                got: self.samples,
                min: 2,
            });
        }

        error::finite("vertical_start", self.vertical_start)?;
        if !(0.0..1.0).contains(&self.vertical_start) {
            return Err(ConfigError::FractionOutOfRange {
                name: "vertical_start",
                value: self.vertical_start,
            });
        }

        Ok(())
    }

    /// Normalized height of control point `i`
    pub fn y_norm(&self, i: usize) -> f32 {
        let t = i as f32 / self.samples as f32;
        self.vertical_start + t * (1.0 - self.vertical_start)
    }

    /// Distance from the trunk axis at normalized height `y_norm`
    pub fn radius_at(&self, y_norm: f32) -> f32 {
        self.base_radius * (1.0 - y_norm) + self.radial_offset
    }

    /// Winding angle at normalized height `y_norm`
    pub fn angle_at(&self, y_norm: f32) -> f32 {
        y_norm * self.turns * TAU
    }

    /// Control point at normalized height `y_norm`
    pub fn position_at(&self, y_norm: f32) -> Vec3 {
        let r = self.radius_at(y_norm);
        let (sin, cos) = self.angle_at(y_norm).sin_cos();
        Vec3::new(r * cos, y_norm * self.height, r * sin)
    }
}

/// Smooth spiral through `samples + 1` control points.
///
/// A pure function of its parameters; rebuild it when they change.
#[derive(Debug, Clone)]
pub struct SpiralCurve {
    params: SpiralParams,
    curve: CatmullRomCurve,
}

impl SpiralCurve {
    pub fn generate(params: SpiralParams) -> Result<Self> {
        params.validate()?;

        let points: Vec<Vec3> = (0..=params.samples)
            .map(|i| params.position_at(params.y_norm(i)))
            .collect();
        let curve = CatmullRomCurve::centripetal(points)?;

        log::debug!(
            "spiral: {} control points, {:.2} turns, length {:.2}",
            params.samples + 1,
            params.turns,
            curve.length()
        );

        Ok(Self { params, curve })
    }

    pub fn params(&self) -> &SpiralParams {
        &self.params
    }

    pub fn control_points(&self) -> &[Vec3] {
        self.curve.control_points()
    }

    pub fn sample_count(&self) -> usize {
        self.params.samples
    }

    /// Evaluate by segment parameter; control point `i` is at `i / samples`
    pub fn point(&self, t: f32) -> Vec3 {
        self.curve.point(t)
    }

    /// Evaluate by normalized arc length
    pub fn point_at(&self, u: f32) -> Vec3 {
        self.curve.point_at(u)
    }

    pub fn tangent_at(&self, u: f32) -> Vec3 {
        self.curve.tangent_at(u)
    }

    pub fn length(&self) -> f32 {
        self.curve.length()
    }
}
