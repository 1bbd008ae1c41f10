use std::f32::consts::TAU;

use rand::rngs::StdRng;
use rand::SeedableRng;

use tree_ornaments::animation::{AnimationState, ProgressController, TreeMode};
use tree_ornaments::config::SceneConfig;
use tree_ornaments::garland::{SpiralCurve, SpiralParams};
use tree_ornaments::math::{Mat4, Vec3};
use tree_ornaments::mesh::{RibbonSurface, TubeParams};
use tree_ornaments::particles::{ParticleAttributeSet, SnowParams};
use tree_ornaments::render::evaluator::SurfaceSample;
use tree_ornaments::render::{RibbonShading, SnowShading};

const FRAME: f32 = 1.0 / 60.0;

fn radius_xz(p: Vec3) -> f32 {
    (p.x * p.x + p.z * p.z).sqrt()
}

#[test]
fn spiral_with_default_shape() {
    let params = SpiralParams {
        turns: 8.0,
        height: 12.0,
        base_radius: 8.0,
        samples: 384,
        ..Default::default()
    };
    let curve = SpiralCurve::generate(params).unwrap();
    let points = curve.control_points();
    assert_eq!(points.len(), 385);

    assert!((params.y_norm(0) - 0.55).abs() < 1e-6);
    assert!((radius_xz(points[0]) - 7.1).abs() < 1e-4);

    assert!((params.y_norm(384) - 1.0).abs() < 1e-6);
    assert!((radius_xz(points[384]) - 3.5).abs() < 1e-4);
    assert!((params.angle_at(1.0) - 8.0 * TAU).abs() < 1e-3);

    // Unwrapped angle grows monotonically from start to end
    let mut unwrapped = 0.0;
    let mut prev = points[0].z.atan2(points[0].x);
    for p in &points[1..] {
        let a = p.z.atan2(p.x);
        let mut d = a - prev;
        if d < -std::f32::consts::PI {
            d += TAU;
        } else if d > std::f32::consts::PI {
            d -= TAU;
        }
        assert!(d.abs() > 0.0);
        unwrapped += d;
        prev = a;
    }
    assert!((unwrapped.abs() - (1.0 - 0.55) * 8.0 * TAU).abs() < 1e-2);
}

#[test]
fn zero_particles_is_not_an_error() {
    let mut rng = StdRng::seed_from_u64(1);
    let set = ParticleAttributeSet::generate(SnowParams::default().with_count(0), &mut rng).unwrap();
    assert!(set.is_empty());
    assert!(set.chaos_positions.is_empty());
    assert!(set.fall_xz.is_empty());
    assert!(set.fall_start_y.is_empty());
    assert!(set.speeds.is_empty());
    assert!(set.randoms.is_empty());
}

#[test]
fn mode_flips_over_consecutive_frames() {
    let ribbon = ProgressController::ribbon();
    let mut state = AnimationState::default();
    let mut elapsed = 0.0;

    let mut history = Vec::new();
    for mode in [TreeMode::Chaos, TreeMode::Formed, TreeMode::Chaos] {
        elapsed += FRAME;
        state = ribbon.update(state, mode, elapsed, FRAME);
        assert!((0.0..=1.0).contains(&state.progress));
        history.push(state.progress);
    }
    assert_eq!(history[0], 0.0);
    assert!(history[1] > history[0]);
    assert!(history[2] < history[1]);

    // Rising to near one takes longer than falling to near zero
    let frames_until = |start: f32, mode: TreeMode, done: &dyn Fn(f32) -> bool| {
        let mut s = AnimationState::new(start);
        let mut n = 0;
        while !done(s.progress) {
            s = ribbon.update(s, mode, n as f32 * FRAME, FRAME);
            assert!((0.0..=1.0).contains(&s.progress));
            n += 1;
        }
        n
    };
    let rise = frames_until(0.0, TreeMode::Formed, &|p| p > 0.99);
    let fall = frames_until(1.0, TreeMode::Chaos, &|p| p < 0.01);
    assert!(fall < rise, "fall {} frames, rise {} frames", fall, rise);
}

#[test]
fn rebuilding_from_same_config_is_identical() {
    let config = SceneConfig::from_yaml("garland:\n  samples: 64\nsnow:\n  count: 32\n").unwrap();

    let (curve_a, ribbon_a) = config.garland.build().unwrap();
    let (curve_b, ribbon_b) = config.garland.build().unwrap();
    assert_eq!(curve_a.control_points(), curve_b.control_points());
    assert_eq!(ribbon_a.mesh().vertex_data(), ribbon_b.mesh().vertex_data());
    assert_eq!(ribbon_a.mesh().index_data(), ribbon_b.mesh().index_data());

    let a = tree_ornaments::generate_particles(&config, config.snow.count).unwrap();
    let b = tree_ornaments::generate_particles(&config, config.snow.count).unwrap();
    assert_eq!(a, b);
}

#[test]
fn ribbon_reveal_follows_progress() {
    let curve = SpiralCurve::generate(SpiralParams {
        samples: 64,
        ..Default::default()
    })
    .unwrap();
    let ribbon = RibbonSurface::extrude(&curve, TubeParams::for_curve(&curve, 2, 0.12, 12)).unwrap();
    let shading = RibbonShading::default();

    // Middle of the tube, facing the camera
    let vertex = ribbon.vertex(ribbon.tube().tubular_segments / 2, 6);
    let sample = SurfaceSample {
        uv: vertex.uv,
        normal: vertex.normal,
        view_dir: vertex.normal,
    };

    let hidden = shading.shade(&sample, 0.0, 1.0);
    let shown = shading.shade(&sample, 1.0, 1.0);
    assert!(hidden.alpha < 1e-3);
    assert!(shown.alpha > 0.5);
}

#[test]
fn snow_blends_from_chaos_to_fall() {
    let mut rng = StdRng::seed_from_u64(3);
    let set = ParticleAttributeSet::generate(SnowParams::default().with_count(16), &mut rng).unwrap();
    let shading = SnowShading::default();
    let view = Mat4::look_at(Vec3::new(0.0, 4.0, 60.0), Vec3::new(0.0, 4.0, 0.0), Vec3::UP);

    for p in set.iter() {
        let chaos = shading.position(&p, 0.0, 2.0);
        assert!(chaos.distance(&p.chaos) < 0.05);

        let formed = shading.position(&p, 1.0, 2.0);
        assert!(formed.y <= p.fall_start_y + 0.05);
        assert!(formed.y >= p.fall_start_y - 16.05);

        let v = shading.vertex(&p, 1.0, 2.0, &view);
        assert!(v.point_size > 0.0);
        assert!(v.alpha > 0.0 && v.alpha <= 0.6);
    }
}

#[test]
fn ribbon_normals_are_unit_across_shapes() {
    for &vertical_start in &[0.0, 0.3, 0.55, 0.9] {
        for &turns in &[1.0, 4.0, 8.0] {
            for &samples in &[8, 48] {
                for &base_radius in &[0.0, 8.0] {
                    let curve = SpiralCurve::generate(SpiralParams {
                        turns,
                        samples,
                        base_radius,
                        vertical_start,
                        ..Default::default()
                    })
                    .unwrap();
                    let tube = TubeParams::for_curve(&curve, 2, 0.12, 8);
                    let ribbon = RibbonSurface::extrude(&curve, tube).unwrap();

                    for v in &ribbon.mesh().vertices {
                        assert!(v.position.x.is_finite() && v.position.y.is_finite());
                        assert!((v.normal.length() - 1.0).abs() < 1e-3);
                    }
                }
            }
        }
    }
}
