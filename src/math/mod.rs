pub mod vec3;
pub mod matrix;
pub mod spline;
pub mod shading;

pub use vec3::Vec3;
pub use matrix::Mat4;
pub use spline::CatmullRomCurve;
pub use shading::{clamp01, fract, mix, smoothstep};
