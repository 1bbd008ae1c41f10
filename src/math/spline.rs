use super::Vec3;
use crate::error::{ConfigError, Result};

/// Centripetal knot exponent. 0.0 would be uniform, 1.0 chordal.
pub const CENTRIPETAL_ALPHA: f32 = 0.5;

/// Lower bound on the number of arc-length table divisions
const MIN_ARC_DIVISIONS: usize = 200;
/// Arc-length table divisions per curve segment
const ARC_DIVISIONS_PER_SEGMENT: usize = 4;
/// Knot spacing below this is treated as coincident points
const KNOT_EPSILON: f32 = 1e-4;
/// Parameter offset for finite-difference tangents
const TANGENT_DELTA: f32 = 1e-4;

/// Interpolating Catmull-Rom curve with centripetal knot spacing.
///
/// Passes through every control point. Centripetal spacing avoids the cusps
/// and self-intersections uniform Catmull-Rom produces on tight turns, which
/// would otherwise show up as pinches once the curve is extruded.
#[derive(Debug, Clone)]
pub struct CatmullRomCurve {
    points: Vec<Vec3>,
    /// Cumulative length at evenly spaced parameter values
    arc_lengths: Vec<f32>,
}

impl CatmullRomCurve {
    /// Fit an open curve through `points` (at least two).
    pub fn centripetal(points: Vec<Vec3>) -> Result<Self> {
        if points.len() < 2 {
            return Err(ConfigError::TooFewSamples {
                name: "control points",
                got: points.len(),
                min: 2,
            });
        }

        let mut curve = Self {
            points,
            arc_lengths: Vec::new(),
        };
        curve.arc_lengths = curve.compute_arc_lengths();
        Ok(curve)
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Evaluate at `t` in [0,1], where each segment spans an equal share of `t`.
    ///
    /// Control point `i` sits exactly at `t = i / (n - 1)`.
    pub fn point(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        let p = (n - 1) as f32 * t.clamp(0.0, 1.0);
        let mut segment = p.floor() as usize;
        let mut weight = p - segment as f32;

        if segment >= n - 1 {
            segment = n - 2;
            weight = 1.0;
        }

        self.evaluate_segment(segment, weight)
    }

    fn evaluate_segment(&self, segment: usize, weight: f32) -> Vec3 {
        let pts = &self.points;
        let n = pts.len();

        let p1 = pts[segment];
        let p2 = pts[segment + 1];
        // Open ends get phantom points mirrored through the end point
        let p0 = if segment > 0 {
            pts[segment - 1]
        } else {
            p1.scale(2.0) - p2
        };
        let p3 = if segment + 2 < n {
            pts[segment + 2]
        } else {
            p2.scale(2.0) - p1
        };

        let exponent = CENTRIPETAL_ALPHA / 2.0;
        let mut dt0 = (p1 - p0).length_squared().powf(exponent);
        let mut dt1 = (p2 - p1).length_squared().powf(exponent);
        let mut dt2 = (p3 - p2).length_squared().powf(exponent);

        if dt1 < KNOT_EPSILON {
            dt1 = 1.0;
        }
        if dt0 < KNOT_EPSILON {
            dt0 = dt1;
        }
        if dt2 < KNOT_EPSILON {
            dt2 = dt1;
        }

        evaluate_nonuniform(p0, p1, p2, p3, dt0, dt1, dt2, weight)
    }

    /// Unit tangent at segment parameter `t`
    pub fn tangent(&self, t: f32) -> Vec3 {
        let t1 = (t - TANGENT_DELTA).max(0.0);
        let t2 = (t + TANGENT_DELTA).min(1.0);
        (self.point(t2) - self.point(t1)).normalize()
    }

    /// Evaluate at normalized arc length `u` in [0,1]
    pub fn point_at(&self, u: f32) -> Vec3 {
        self.point(self.u_to_t(u))
    }

    /// Unit tangent at normalized arc length `u`
    pub fn tangent_at(&self, u: f32) -> Vec3 {
        self.tangent(self.u_to_t(u))
    }

    /// Approximate total length of the curve
    pub fn length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Map normalized arc length to segment parameter
    pub fn u_to_t(&self, u: f32) -> f32 {
        let lengths = &self.arc_lengths;
        let last = lengths.len() - 1;
        let total = self.length();
        if total <= 0.0 {
            return u.clamp(0.0, 1.0);
        }

        let target = u.clamp(0.0, 1.0) * total;
        let hi = lengths.partition_point(|&l| l < target);

        if hi == 0 {
            return 0.0;
        }
        if hi > last {
            return 1.0;
        }
        if lengths[hi] == target {
            return hi as f32 / last as f32;
        }

        let lo = hi - 1;
        let before = lengths[lo];
        let span = lengths[hi] - before;
        let fraction = if span > 0.0 { (target - before) / span } else { 0.0 };
        (lo as f32 + fraction) / last as f32
    }

    fn compute_arc_lengths(&self) -> Vec<f32> {
        let segments = self.points.len() - 1;
        let divisions = (segments * ARC_DIVISIONS_PER_SEGMENT).max(MIN_ARC_DIVISIONS);

        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut previous = self.point(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);

        for i in 1..=divisions {
            let current = self.point(i as f32 / divisions as f32);
            sum += current.distance(&previous);
            lengths.push(sum);
            previous = current;
        }

        lengths
    }
}

/// Non-uniform Catmull-Rom between `p1` and `p2` with knot spacings `dt0..dt2`.
#[allow(clippy::too_many_arguments)]
pub fn evaluate_nonuniform(
    p0: Vec3,
    p1: Vec3,
    p2: Vec3,
    p3: Vec3,
    dt0: f32,
    dt1: f32,
    dt2: f32,
    t: f32,
) -> Vec3 {
    // Tangents at p1 and p2, rescaled to [0,1] over the middle segment
    let m1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
    let m2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

    let c0 = p1;
    let c1 = m1;
    let c2 = p1 * -3.0 + p2 * 3.0 - m1 * 2.0 - m2;
    let c3 = p1 * 2.0 - p2 * 2.0 + m1 + m2;

    let t2 = t * t;
    let t3 = t2 * t;
    c0 + c1 * t + c2 * t2 + c3 * t3
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(2.0, 0.0, 1.0),
            Vec3::new(3.0, 2.0, 1.0),
        ]
    }

    #[test]
    fn test_passes_through_control_points() {
        let points = zigzag();
        let curve = CatmullRomCurve::centripetal(points.clone()).unwrap();
        for (i, p) in points.iter().enumerate() {
            let t = i as f32 / (points.len() - 1) as f32;
            assert!(curve.point(t).distance(p) < 1e-4, "point {} missed", i);
        }
    }

    #[test]
    fn test_collinear_points_stay_on_line() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
        ];
        let curve = CatmullRomCurve::centripetal(points).unwrap();
        for i in 0..=20 {
            let p = curve.point(i as f32 / 20.0);
            assert!(p.y.abs() < 1e-5 && p.z.abs() < 1e-5);
        }
        assert!((curve.length() - 3.0).abs() < 1e-3);
    }

    #[test]
    fn test_arc_length_parameter_is_even() {
        // Unevenly spaced control points on a line
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.5, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
        ];
        let curve = CatmullRomCurve::centripetal(points).unwrap();
        let mid = curve.point_at(0.5);
        assert!((mid.x - 2.0).abs() < 0.02, "got {}", mid.x);
    }

    #[test]
    fn test_u_to_t_monotonic_and_bounded() {
        let curve = CatmullRomCurve::centripetal(zigzag()).unwrap();
        assert_eq!(curve.u_to_t(0.0), 0.0);
        assert!((curve.u_to_t(1.0) - 1.0).abs() < 1e-5);
        let mut prev = 0.0;
        for i in 0..=100 {
            let t = curve.u_to_t(i as f32 / 100.0);
            assert!(t >= prev);
            prev = t;
        }
    }

    #[test]
    fn test_coincident_points_are_finite() {
        let points = vec![Vec3::ZERO, Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0)];
        let curve = CatmullRomCurve::centripetal(points).unwrap();
        for i in 0..=10 {
            let p = curve.point(i as f32 / 10.0);
            assert!(p.x.is_finite() && p.y.is_finite() && p.z.is_finite());
        }
    }

    #[test]
    fn test_tangent_along_line() {
        let points = vec![Vec3::ZERO, Vec3::RIGHT, Vec3::RIGHT * 2.0];
        let curve = CatmullRomCurve::centripetal(points).unwrap();
        let tangent = curve.tangent_at(0.5);
        assert!((tangent.x - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_single_point_rejected() {
        let err = CatmullRomCurve::centripetal(vec![Vec3::ZERO]).unwrap_err();
        assert!(matches!(err, ConfigError::TooFewSamples { got: 1, .. }));
    }
}
