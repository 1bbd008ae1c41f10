use std::f32::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{self, ConfigError, Result};
use crate::math::Vec3;

/// Interleaved layout: chaos(3) + fall_xz(2) + fall_start_y(1) + speed(1) + random(1)
pub const FLOATS_PER_PARTICLE: usize = 8;

/// Generation parameters for the particle field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowParams {
    pub count: usize,
    /// Inner radius of the scatter shell around the tree
    pub chaos_inner_radius: f32,
    pub chaos_outer_radius: f32,
    /// Fall columns are spread over `[-half, half]` in x and z
    pub fall_half_extent: f32,
    /// Height range where each particle starts its fall loop
    pub fall_start: [f32; 2],
    pub speed: [f32; 2],
}

impl Default for SnowParams {
    fn default() -> Self {
        Self {
            count: 0,
            chaos_inner_radius: 8.0,
            chaos_outer_radius: 30.0,
            fall_half_extent: 18.0,
            fall_start: [14.0, 24.0],
            speed: [0.1, 0.6],
        }
    }
}

impl SnowParams {
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn validate(&self) -> Result<()> {
        error::non_negative("chaos_inner_radius", self.chaos_inner_radius)?;
        error::non_negative("chaos_outer_radius", self.chaos_outer_radius)?;
        if self.chaos_outer_radius < self.chaos_inner_radius {
            return Err(ConfigError::InvertedRange {
                name: "chaos radius",
                min: self.chaos_inner_radius,
                max: self.chaos_outer_radius,
            });
        }

        error::non_negative("fall_half_extent", self.fall_half_extent)?;
        error::ordered("fall_start", self.fall_start[0], self.fall_start[1])?;
        error::ordered("speed", self.speed[0], self.speed[1])?;
        error::non_negative("speed", self.speed[0])?;
        Ok(())
    }
}

/// One particle's static attributes, as the vertex program receives them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub chaos: Vec3,
    pub fall_xz: [f32; 2],
    pub fall_start_y: f32,
    pub speed: f32,
    /// Uniform in [0,1); drives sway, size, alpha and phase offsets
    pub random: f32,
}

/// Struct-of-arrays attribute buffers for `count` particles.
///
/// Generated once per count and never mutated; a different count means a
/// new set.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleAttributeSet {
    params: SnowParams,
    pub chaos_positions: Vec<f32>,
    pub fall_xz: Vec<f32>,
    pub fall_start_y: Vec<f32>,
    pub speeds: Vec<f32>,
    pub randoms: Vec<f32>,
}

impl ParticleAttributeSet {
    pub fn generate<R: Rng + ?Sized>(params: SnowParams, rng: &mut R) -> Result<Self> {
        params.validate()?;

        let n = params.count;
        let mut set = Self {
            params,
            chaos_positions: Vec::with_capacity(n * 3),
            fall_xz: Vec::with_capacity(n * 2),
            fall_start_y: Vec::with_capacity(n),
            speeds: Vec::with_capacity(n),
            randoms: Vec::with_capacity(n),
        };

        for _ in 0..n {
            let chaos = chaos_position(&params, rng);
            set.chaos_positions.extend_from_slice(&chaos.to_array());

            let half = params.fall_half_extent;
            set.fall_xz.push((rng.gen::<f32>() - 0.5) * half * 2.0);
            set.fall_xz.push((rng.gen::<f32>() - 0.5) * half * 2.0);

            set.fall_start_y.push(in_range(rng, params.fall_start));
            set.speeds.push(in_range(rng, params.speed));
            set.randoms.push(rng.gen::<f32>());
        }

        log::debug!("snowfield: generated {} particles", n);
        Ok(set)
    }

    pub fn params(&self) -> &SnowParams {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.randoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.randoms.is_empty()
    }

    /// Whether this set must be regenerated for `count` particles
    pub fn is_stale(&self, count: usize) -> bool {
        self.params.count != count
    }

    pub fn chaos_position(&self, i: usize) -> Vec3 {
        let c = &self.chaos_positions[i * 3..i * 3 + 3];
        Vec3::new(c[0], c[1], c[2])
    }

    pub fn particle(&self, i: usize) -> Particle {
        Particle {
            chaos: self.chaos_position(i),
            fall_xz: [self.fall_xz[i * 2], self.fall_xz[i * 2 + 1]],
            fall_start_y: self.fall_start_y[i],
            speed: self.speeds[i],
            random: self.randoms[i],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Particle> + '_ {
        (0..self.len()).map(move |i| self.particle(i))
    }

    /// Single interleaved buffer for GPU upload
    pub fn interleaved(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.len() * FLOATS_PER_PARTICLE);
        for p in self.iter() {
            data.extend_from_slice(&p.chaos.to_array());
            data.extend_from_slice(&p.fall_xz);
            data.push(p.fall_start_y);
            data.push(p.speed);
            data.push(p.random);
        }
        data
    }
}

/// Point in the spherical shell between the inner and outer radius.
///
/// The cube root keeps the point density even per unit volume instead of
/// piling up near the inner radius.
fn chaos_position<R: Rng + ?Sized>(params: &SnowParams, rng: &mut R) -> Vec3 {
    let inner = params.chaos_inner_radius;
    let outer = params.chaos_outer_radius;

    let radius = inner + rng.gen::<f32>().cbrt() * (outer - inner);
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();

    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}

fn in_range<R: Rng + ?Sized>(rng: &mut R, range: [f32; 2]) -> f32 {
    range[0] + rng.gen::<f32>() * (range[1] - range[0])
}
