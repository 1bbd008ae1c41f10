pub mod geometry;
pub mod tube;

pub use geometry::{Mesh, Vertex, FLOATS_PER_VERTEX};
pub use tube::{FrenetFrames, RibbonSurface, TubeParams};
