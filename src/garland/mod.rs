//! Spiral garland path wrapped around the upper part of the tree cone.

pub mod spiral;

pub use spiral::{SpiralCurve, SpiralParams};
