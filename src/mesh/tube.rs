use std::f32::consts::TAU;

use super::geometry::{Mesh, Vertex};
use crate::error::{self, ConfigError, Result};
use crate::garland::{SpiralCurve, SpiralParams};
use crate::math::Vec3;

/// Cross products shorter than this mean consecutive tangents are parallel
const PARALLEL_EPSILON: f32 = 1e-6;

/// Tube extrusion settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeParams {
    /// Slices along the path; the mesh has `tubular_segments + 1` rings
    pub tubular_segments: usize,
    pub tube_radius: f32,
    /// Points around each ring, not counting the seam duplicate
    pub radial_segments: usize,
    pub closed: bool,
}

impl TubeParams {
    /// Ribbon settings for a given curve: `multiplier` slices per curve segment
    pub fn for_curve(
        curve: &SpiralCurve,
        multiplier: usize,
        tube_radius: f32,
        radial_segments: usize,
    ) -> Self {
        Self {
            tubular_segments: curve.sample_count() * multiplier,
            tube_radius,
            radial_segments,
            closed: false,
        }
    }

    fn validate(&self, curve: &SpiralCurve) -> Result<()> {
        error::positive("tube_radius", self.tube_radius)?;

        if self.radial_segments < 3 {
            return Err(ConfigError::TooFewSamples {
                name: "radial_segments",
                got: self.radial_segments,
                min: 3,
            });
        }

        // Fewer slices than curve segments would facet the spiral
        let min = curve.sample_count() + 1;
        if self.tubular_segments < min {
            return Err(ConfigError::TooFewSamples {
                name: "tubular_segments",
                got: self.tubular_segments,
                min,
            });
        }

        Ok(())
    }
}

/// Rotation-minimizing frames sampled along a curve by arc length
#[derive(Debug, Clone)]
pub struct FrenetFrames {
    pub tangents: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub binormals: Vec<Vec3>,
}

impl FrenetFrames {
    /// `segments + 1` frames. Each normal is the previous one carried over by
    /// the rotation between consecutive tangents, so the tube does not twist.
    pub fn compute(curve: &SpiralCurve, segments: usize, closed: bool) -> Self {
        let tangents: Vec<Vec3> = (0..=segments)
            .map(|i| curve.tangent_at(i as f32 / segments as f32))
            .collect();

        let mut normals = Vec::with_capacity(segments + 1);
        let mut binormals = Vec::with_capacity(segments + 1);

        let t0 = tangents[0];
        let side = t0.cross(&t0.least_dominant_axis()).normalize();
        let n0 = t0.cross(&side);
        normals.push(n0);
        binormals.push(t0.cross(&n0));

        for i in 1..=segments {
            let prev_t = tangents[i - 1];
            let t = tangents[i];
            let mut normal = normals[i - 1];

            let axis = prev_t.cross(&t);
            if axis.length() > PARALLEL_EPSILON {
                let theta = prev_t.dot(&t).clamp(-1.0, 1.0).acos();
                normal = normal.rotate_around(&axis.normalize(), theta);
            }

            normals.push(normal);
            binormals.push(t.cross(&normal));
        }

        if closed {
            // Spread the residual twist between the end frames over the loop
            let first = normals[0];
            let last = normals[segments];
            let mut theta = first.dot(&last).clamp(-1.0, 1.0).acos() / segments as f32;
            if tangents[0].dot(&first.cross(&last)) > 0.0 {
                theta = -theta;
            }

            for i in 1..=segments {
                normals[i] = normals[i].rotate_around(&tangents[i], theta * i as f32);
                binormals[i] = tangents[i].cross(&normals[i]);
            }
        }

        Self {
            tangents,
            normals,
            binormals,
        }
    }

    pub fn len(&self) -> usize {
        self.tangents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tangents.is_empty()
    }
}

/// Tube surface around the spiral; immutable once built.
///
/// `uv.y` runs 0 to 1 along the path and drives the reveal.
/// `uv.x` runs 0 to 1 around the cross-section and drives edge softening.
#[derive(Debug, Clone)]
pub struct RibbonSurface {
    source: SpiralParams,
    tube: TubeParams,
    mesh: Mesh,
}

impl RibbonSurface {
    pub fn extrude(curve: &SpiralCurve, tube: TubeParams) -> Result<Self> {
        tube.validate(curve)?;

        let tubular = tube.tubular_segments;
        let radial = tube.radial_segments;
        let ring = radial + 1;

        let frames = FrenetFrames::compute(curve, tubular, tube.closed);
        let mut mesh = Mesh::with_capacity((tubular + 1) * ring, tubular * radial * 6);

        for i in 0..=tubular {
            // A closed tube reuses the first slice for the last ring
            let slice = if tube.closed && i == tubular { 0 } else { i };
            let center = curve.point_at(slice as f32 / tubular as f32);
            let n = frames.normals[slice];
            let b = frames.binormals[slice];
            let v = i as f32 / tubular as f32;

            mesh.add_vertices((0..=radial).map(|j| {
                let u = j as f32 / radial as f32;
                let (sin, cos) = (u * TAU).sin_cos();
                let normal = (n * -cos + b * sin).normalize();
                Vertex::new(center + normal * tube.tube_radius, normal).with_uv(u, v)
            }));
        }

        for i in 1..=tubular {
            for j in 1..=radial {
                let a = (ring * (i - 1) + (j - 1)) as u32;
                let b = (ring * i + (j - 1)) as u32;
                let c = (ring * i + j) as u32;
                let d = (ring * (i - 1) + j) as u32;
                mesh.add_quad(a, b, c, d);
            }
        }

        log::debug!(
            "ribbon: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        Ok(Self {
            source: *curve.params(),
            tube,
            mesh,
        })
    }

    /// Parameters of the curve this surface was extruded from
    pub fn source(&self) -> &SpiralParams {
        &self.source
    }

    pub fn tube(&self) -> &TubeParams {
        &self.tube
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Whether this surface must be rebuilt for `params`
    pub fn is_stale(&self, params: &SpiralParams) -> bool {
        self.source != *params
    }

    /// Vertex at ring `i` (along the path) and column `j` (around it)
    pub fn vertex(&self, i: usize, j: usize) -> &Vertex {
        &self.mesh.vertices[i * (self.tube.radial_segments + 1) + j]
    }
}
