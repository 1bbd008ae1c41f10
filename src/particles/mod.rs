//! Static per-particle attributes for the chaos/snowfall point cloud.

pub mod snowfield;

pub use snowfield::{Particle, ParticleAttributeSet, SnowParams, FLOATS_PER_PARTICLE};
