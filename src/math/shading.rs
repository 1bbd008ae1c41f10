//! Scalar helpers with GLSL semantics, so the CPU evaluators and the shader
//! programs compute the same values.

/// Hermite step between two edges. Edges may be given in either order.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear blend, `mix(a, b, 0) == a`
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// `x - floor(x)`, always in [0,1) for finite input
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

pub fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}
