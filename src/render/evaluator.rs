//! CPU reference of the ribbon and snow programs.
//!
//! Every term here mirrors a line of the GLSL in `shaders.rs`; keeping a
//! Rust copy makes the visual rules testable without a GPU.

use crate::math::{clamp01, fract, mix, smoothstep, Mat4, Vec3};
use crate::particles::snowfield::Particle;

/// Tunable constants of the garland surface program
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibbonShading {
    /// Stripe bands along the path
    pub stripe_count: f32,
    /// Stripe scroll speed in bands per second
    pub stripe_speed: f32,
    pub color_a: Vec3,
    pub color_b: Vec3,
    pub light_dir: Vec3,
    pub shininess: f32,
    pub specular_strength: f32,
    pub fresnel_strength: f32,
    /// Softness of the moving reveal threshold; higher is crisper
    pub reveal_sharpness: f32,
    pub base_alpha: f32,
    /// Scales progress before clamping so the ribbon reaches full opacity
    /// slightly before progress reaches 1
    pub overshoot: f32,
    /// Width of the soft ramp at each circumferential edge, in uv.x units
    pub edge_width: f32,
}

impl Default for RibbonShading {
    fn default() -> Self {
        Self {
            stripe_count: 6.0,
            stripe_speed: 0.4,
            color_a: Vec3::new(0.85, 0.18, 0.25),
            color_b: Vec3::new(0.98, 0.85, 0.25),
            light_dir: Vec3::new(0.3, 0.8, 0.6).normalize(),
            shininess: 60.0,
            specular_strength: 0.25,
            fresnel_strength: 0.12,
            reveal_sharpness: 6.0,
            base_alpha: 0.9,
            overshoot: 1.2,
            edge_width: 0.15,
        }
    }
}

/// Interpolated inputs for one ribbon fragment
#[derive(Debug, Clone, Copy)]
pub struct SurfaceSample {
    pub uv: [f32; 2],
    /// Unit surface normal
    pub normal: Vec3,
    /// Unit vector from the surface toward the eye
    pub view_dir: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadedFragment {
    pub color: Vec3,
    pub alpha: f32,
}

// Matches the literal used by the fragment program
const STRIPE_PI: f32 = 3.1415;

impl RibbonShading {
    /// Two-colour stripes scrolling along the path
    pub fn stripe_color(&self, v: f32, elapsed: f32) -> Vec3 {
        let s = ((v * self.stripe_count + elapsed * self.stripe_speed) * STRIPE_PI).sin();
        let k = smoothstep(-0.2, 0.2, s);
        self.color_a.lerp(&self.color_b, k)
    }

    /// Blinn specular for the silk sheen
    pub fn specular(&self, normal: Vec3, view_dir: Vec3) -> f32 {
        let half = (self.light_dir + view_dir).normalize();
        let n_dot_l = normal.dot(&self.light_dir).max(0.0);
        let n_dot_h = normal.dot(&half).max(0.0);
        n_dot_h.powf(self.shininess) * n_dot_l
    }

    /// Rim term, 0 facing the eye and 1 at grazing angles
    pub fn fresnel(&self, normal: Vec3, view_dir: Vec3) -> f32 {
        (1.0 - normal.dot(&view_dir).max(0.0)).powi(3)
    }

    /// Visibility along the path. The threshold sits at `v = 1 - progress`.
    pub fn reveal(&self, v: f32, progress: f32) -> f32 {
        smoothstep(0.0, 1.0, (v - (1.0 - progress)) * self.reveal_sharpness)
    }

    /// Softens the two circumferential edges near u = 0 and u = 1
    pub fn edge_falloff(&self, u: f32) -> f32 {
        smoothstep(0.0, self.edge_width, u) * smoothstep(1.0, 1.0 - self.edge_width, u)
    }

    pub fn shade(&self, sample: &SurfaceSample, progress: f32, elapsed: f32) -> ShadedFragment {
        let [u, v] = sample.uv;
        let base = self.stripe_color(v, elapsed);
        let spec = self.specular(sample.normal, sample.view_dir);
        let fresnel = self.fresnel(sample.normal, sample.view_dir);
        let color = base
            + Vec3::splat(spec * self.specular_strength)
            + Vec3::splat(fresnel * self.fresnel_strength);

        let alpha = self.base_alpha
            * self.reveal(v, progress)
            * clamp01(progress * self.overshoot)
            * mix(0.7, 1.0, fresnel)
            * self.edge_falloff(u);

        ShadedFragment { color, alpha }
    }
}

/// Tunable constants of the snow point program
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnowShading {
    /// Height travelled in one fall loop
    pub fall_distance: f32,
    /// Loop rate is `speed * speed_scale + speed_bias` loops per second
    pub speed_scale: f32,
    pub speed_bias: f32,
    /// Spreads loop phases so particles don't fall in lockstep
    pub phase_spread: f32,
    pub sway_amplitude: f32,
    pub sway_frequency_x: f32,
    pub sway_frequency_z: f32,
    pub jitter_amplitude: f32,
    pub base_size: f32,
    pub size_variance: f32,
    /// Point size at unit view depth
    pub size_attenuation: f32,
    pub base_alpha: f32,
    pub alpha_variance: f32,
    pub glow_exponent: f32,
}

impl Default for SnowShading {
    fn default() -> Self {
        Self {
            fall_distance: 16.0,
            speed_scale: 0.3,
            speed_bias: 0.2,
            phase_spread: 10.0,
            sway_amplitude: 0.2,
            sway_frequency_x: 0.3,
            sway_frequency_z: 0.25,
            jitter_amplitude: 0.02,
            base_size: 1.5,
            size_variance: 1.5,
            size_attenuation: 120.0,
            base_alpha: 0.6,
            alpha_variance: 0.4,
            glow_exponent: 1.6,
        }
    }
}

/// Output of the snow vertex program for one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleVertex {
    /// Position in view space (the camera looks down -Z)
    pub view_position: Vec3,
    pub point_size: f32,
    pub alpha: f32,
}

impl SnowShading {
    /// Position within the fall loop, in [0,1)
    pub fn loop_phase(&self, particle: &Particle, elapsed: f32) -> f32 {
        let rate = particle.speed * self.speed_scale + self.speed_bias;
        fract(elapsed * rate + particle.random * self.phase_spread)
    }

    /// Where the particle is on its fall loop, sway included
    pub fn fall_position(&self, particle: &Particle, elapsed: f32) -> Vec3 {
        let t = self.loop_phase(particle, elapsed);
        let y = particle.fall_start_y - t * self.fall_distance;

        // Sway dies out toward the bottom of the loop
        let damp = self.sway_amplitude * (1.0 - t);
        let sway_x = (elapsed * (self.sway_frequency_x + particle.random)).sin() * damp;
        let sway_z = (elapsed * (self.sway_frequency_z + particle.random)).cos() * damp;

        Vec3::new(particle.fall_xz[0] + sway_x, y, particle.fall_xz[1] + sway_z)
    }

    /// Chaos position blended toward the fall loop by `progress`, plus jitter
    pub fn position(&self, particle: &Particle, progress: f32, elapsed: f32) -> Vec3 {
        let fall = self.fall_position(particle, elapsed);
        let jitter = (particle.random * self.phase_spread + elapsed).sin() * self.jitter_amplitude;
        particle.chaos.lerp(&fall, progress) + Vec3::splat(jitter)
    }

    /// Screen size in pixels; zero for points at or behind the eye
    pub fn point_size(&self, particle: &Particle, view_z: f32) -> f32 {
        if view_z >= 0.0 {
            return 0.0;
        }
        (self.base_size + particle.random * self.size_variance) * (self.size_attenuation / -view_z)
    }

    pub fn alpha(&self, particle: &Particle) -> f32 {
        self.base_alpha - particle.random * self.alpha_variance
    }

    pub fn vertex(
        &self,
        particle: &Particle,
        progress: f32,
        elapsed: f32,
        model_view: &Mat4,
    ) -> ParticleVertex {
        let world = self.position(particle, progress, elapsed);
        let view_position = model_view.transform_point(world);
        ParticleVertex {
            view_position,
            point_size: self.point_size(particle, view_position.z),
            alpha: self.alpha(particle),
        }
    }

    /// Soft glow disk. `None` for sprite texels outside the disk (discarded).
    pub fn fragment(&self, point_coord: [f32; 2], alpha: f32) -> Option<f32> {
        let dx = point_coord[0] - 0.5;
        let dy = point_coord[1] - 0.5;
        let r = (dx * dx + dy * dy).sqrt();
        if r > 0.5 {
            return None;
        }
        Some(alpha * (1.0 - 2.0 * r).powf(self.glow_exponent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(random: f32) -> Particle {
        Particle {
            chaos: Vec3::new(10.0, -4.0, 6.0),
            fall_xz: [2.0, -3.0],
            fall_start_y: 20.0,
            speed: 0.4,
            random,
        }
    }

    fn facing() -> SurfaceSample {
        SurfaceSample {
            uv: [0.5, 0.9],
            normal: Vec3::FORWARD,
            view_dir: Vec3::FORWARD,
        }
    }

    #[test]
    fn test_stripes_alternate_between_colours() {
        let shading = RibbonShading::default();
        // sin peaks at v = 1/12 and troughs at v = 3/12 with elapsed 0
        let peak = shading.stripe_color(1.0 / 12.0, 0.0);
        let trough = shading.stripe_color(3.0 / 12.0, 0.0);
        assert!(peak.distance(&shading.color_b) < 1e-3);
        assert!(trough.distance(&shading.color_a) < 1e-3);
    }

    #[test]
    fn test_reveal_threshold_moves_with_progress() {
        let shading = RibbonShading::default();
        for i in 0..=10 {
            assert_eq!(shading.reveal(i as f32 / 10.0, 0.0), 0.0);
        }
        assert_eq!(shading.reveal(1.0, 1.0), 1.0);
        assert_eq!(shading.reveal(0.5, 1.0), 1.0);

        for i in 0..=20 {
            let v = i as f32 / 20.0;
            let mut prev = 0.0;
            for p in 0..=20 {
                let r = shading.reveal(v, p as f32 / 20.0);
                assert!(r >= prev);
                prev = r;
            }
        }
    }

    #[test]
    fn test_hidden_ribbon_is_transparent() {
        let shading = RibbonShading::default();
        let frag = shading.shade(&facing(), 0.0, 3.0);
        assert_eq!(frag.alpha, 0.0);
    }

    #[test]
    fn test_formed_ribbon_alpha() {
        let shading = RibbonShading::default();
        let frag = shading.shade(&facing(), 1.0, 0.0);
        // Facing the eye: fresnel 0, mix factor 0.7; centre of tube: edge 1
        assert!((frag.alpha - 0.9 * 0.7).abs() < 1e-4);
    }

    #[test]
    fn test_overshoot_saturates_early() {
        let shading = RibbonShading::default();
        let sample = SurfaceSample { uv: [0.5, 1.0], ..facing() };
        let at_full = shading.shade(&sample, 1.0, 0.0).alpha;
        let nearly = shading.shade(&sample, 0.9, 0.0).alpha;
        assert!((at_full - nearly).abs() < 1e-4);
    }

    #[test]
    fn test_edge_falloff() {
        let shading = RibbonShading::default();
        assert_eq!(shading.edge_falloff(0.0), 0.0);
        assert_eq!(shading.edge_falloff(1.0), 0.0);
        assert_eq!(shading.edge_falloff(0.5), 1.0);
        assert!(shading.edge_falloff(0.05) < 1.0);
    }

    #[test]
    fn test_fresnel_and_sheen() {
        let shading = RibbonShading::default();
        assert_eq!(shading.fresnel(Vec3::UP, Vec3::UP), 0.0);
        assert_eq!(shading.fresnel(Vec3::UP, Vec3::RIGHT), 1.0);

        // Mirror direction of the light about the normal gives the peak
        let n = shading.light_dir;
        let peak = shading.specular(n, n);
        assert!((peak - 1.0).abs() < 1e-4);
        assert_eq!(shading.specular(-n, n), 0.0);
    }

    #[test]
    fn test_sheen_brightens_colour() {
        let shading = RibbonShading::default();
        let n = shading.light_dir;
        let lit = shading.shade(&SurfaceSample { uv: [0.5, 0.5], normal: n, view_dir: n }, 1.0, 0.0);
        let base = shading.stripe_color(0.5, 0.0);
        assert!(lit.color.x > base.x);
    }

    #[test]
    fn test_loop_phase_wraps() {
        let shading = SnowShading::default();
        let p = particle(0.37);
        for i in 0..500 {
            let t = shading.loop_phase(&p, i as f32 * 0.137);
            assert!((0.0..1.0).contains(&t));
        }
    }

    #[test]
    fn test_fall_height_within_loop() {
        let shading = SnowShading::default();
        let p = particle(0.8);
        for i in 0..200 {
            let y = shading.fall_position(&p, i as f32 * 0.05).y;
            assert!(y <= 20.0 && y > 20.0 - 16.0);
        }
    }

    #[test]
    fn test_sway_damps_toward_loop_end() {
        let shading = SnowShading::default();
        let p = particle(0.25);
        for i in 0..400 {
            let elapsed = i as f32 * 0.031;
            let t = shading.loop_phase(&p, elapsed);
            let pos = shading.fall_position(&p, elapsed);
            let offset = ((pos.x - 2.0).powi(2) + (pos.z + 3.0).powi(2)).sqrt();
            let bound = 0.2 * (1.0 - t) * std::f32::consts::SQRT_2;
            assert!(offset <= bound + 1e-5);
        }
    }

    #[test]
    fn test_position_blends_by_progress() {
        let shading = SnowShading::default();
        let p = particle(0.5);
        let elapsed = 2.0;
        let jitter = Vec3::splat((0.5f32 * 10.0 + elapsed).sin() * 0.02);

        let chaos = shading.position(&p, 0.0, elapsed);
        assert!(chaos.distance(&(p.chaos + jitter)) < 1e-5);

        let fall = shading.position(&p, 1.0, elapsed);
        let expected = shading.fall_position(&p, elapsed) + jitter;
        assert!(fall.distance(&expected) < 1e-5);
    }

    #[test]
    fn test_point_size_attenuates_with_depth() {
        let shading = SnowShading::default();
        let p = particle(0.0);
        assert!((shading.point_size(&p, -120.0) - 1.5).abs() < 1e-5);
        assert!(shading.point_size(&p, -10.0) > shading.point_size(&p, -20.0));
        assert_eq!(shading.point_size(&p, 0.0), 0.0);
        assert_eq!(shading.point_size(&p, 5.0), 0.0);
        // Larger random means a larger sprite
        assert!(shading.point_size(&particle(0.9), -10.0) > shading.point_size(&p, -10.0));
    }

    #[test]
    fn test_vertex_uses_view_depth() {
        let shading = SnowShading::default();
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, 60.0), Vec3::ZERO, Vec3::UP);
        let p = Particle { chaos: Vec3::ZERO, ..particle(0.0) };
        let out = shading.vertex(&p, 0.0, 0.0, &view);
        assert!((out.view_position.z + 60.0).abs() < 0.05);
        assert!((out.point_size - 1.5 * 2.0).abs() < 0.01);
        assert!((out.alpha - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_fragment_disk() {
        let shading = SnowShading::default();
        assert_eq!(shading.fragment([0.5, 0.5], 0.6), Some(0.6));
        assert_eq!(shading.fragment([0.0, 0.0], 0.6), None);
        assert_eq!(shading.fragment([1.0, 0.5], 0.6), Some(0.0));
        let mid = shading.fragment([0.75, 0.5], 1.0).unwrap();
        assert!((mid - 0.5f32.powf(1.6)).abs() < 1e-5);
    }

    #[test]
    fn test_alpha_range() {
        let shading = SnowShading::default();
        assert!((shading.alpha(&particle(0.0)) - 0.6).abs() < 1e-6);
        assert!(shading.alpha(&particle(0.999)) > 0.2);
    }
}
