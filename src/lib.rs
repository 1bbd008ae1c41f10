use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext};

use rand::rngs::StdRng;
use rand::SeedableRng;

pub mod animation;
pub mod config;
pub mod error;
pub mod garland;
pub mod math;
pub mod mesh;
pub mod particles;
pub mod render;

use animation::{AnimationState, ProgressController, TreeMode};
use config::SceneConfig;
use garland::SpiralCurve;
use math::Vec3;
use mesh::RibbonSurface;
use particles::ParticleAttributeSet;
use render::{FrameUniforms, RenderPipeline};

/// Install the panic hook and the console logger
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A second init (hot reload) finds a logger already set
    console_log::init_with_level(log::Level::Info).ok();
}

/// Particle set for `count` particles, seeded from the scene seed and the count
pub fn generate_particles(config: &SceneConfig, count: usize) -> error::Result<ParticleAttributeSet> {
    let mut rng = StdRng::seed_from_u64(config.seed ^ count as u64);
    ParticleAttributeSet::generate(config.snow.with_count(count), &mut rng)
}

/// Garland and snow around the tree, driven by the host's render loop
#[wasm_bindgen]
pub struct OrnamentScene {
    pipeline: RenderPipeline,
    config: SceneConfig,
    curve: SpiralCurve,
    ribbon: RibbonSurface,
    particles: ParticleAttributeSet,
    mode: TreeMode,
    ribbon_controller: ProgressController,
    particle_controller: ProgressController,
    ribbon_state: AnimationState,
    particle_state: AnimationState,
}

#[wasm_bindgen]
impl OrnamentScene {
    /// Build geometry from a YAML config (empty string for defaults) and upload it
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config_yaml: &str) -> Result<OrnamentScene, JsValue> {
        let width = canvas.width() as i32;
        let height = canvas.height() as i32;

        let config = SceneConfig::from_yaml(config_yaml).map_err(to_js)?;

        let gl = canvas
            .get_context("webgl2")?
            .ok_or("Failed to get WebGL2 context")?
            .dyn_into::<WebGl2RenderingContext>()?;

        let mut pipeline = RenderPipeline::new(gl, width, height)
            .map_err(|e| JsValue::from_str(&e))?;

        let (curve, ribbon) = config.garland.build().map_err(to_js)?;
        let particles = generate_particles(&config, config.snow.count).map_err(to_js)?;

        pipeline
            .upload_ribbon(&ribbon, config.garland.offset_y)
            .map_err(|e| JsValue::from_str(&e))?;
        pipeline
            .upload_snow(&particles)
            .map_err(|e| JsValue::from_str(&e))?;

        log::info!(
            "scene ready: garland length {:.1}, {} particles",
            curve.length(),
            particles.len()
        );

        Ok(Self {
            pipeline,
            curve,
            ribbon,
            particles,
            mode: TreeMode::default(),
            ribbon_controller: ProgressController::new(config.animation.ribbon),
            particle_controller: ProgressController::new(config.animation.particles),
            ribbon_state: AnimationState::default(),
            particle_state: AnimationState::default(),
            config,
        })
    }

    /// Switch between "CHAOS" and "FORMED"
    #[wasm_bindgen]
    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode: TreeMode = mode.parse().map_err(to_js)?;
        if mode != self.mode {
            log::info!("mode: {} -> {}", self.mode, mode);
            self.mode = mode;
        }
        Ok(())
    }

    #[wasm_bindgen]
    pub fn mode(&self) -> String {
        self.mode.to_string()
    }

    /// Replace the whole particle set. Same count is a no-op.
    #[wasm_bindgen]
    pub fn set_particle_count(&mut self, count: u32) -> Result<(), JsValue> {
        let count = count as usize;
        if !self.particles.is_stale(count) {
            return Ok(());
        }

        let particles = generate_particles(&self.config, count).map_err(to_js)?;
        self.pipeline
            .upload_snow(&particles)
            .map_err(|e| JsValue::from_str(&e))?;
        self.particles = particles;

        log::info!("snowfield regenerated: {} particles", count);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> u32 {
        self.particles.len() as u32
    }

    #[wasm_bindgen]
    pub fn set_camera(
        &mut self,
        eye_x: f32,
        eye_y: f32,
        eye_z: f32,
        target_x: f32,
        target_y: f32,
        target_z: f32,
    ) {
        self.pipeline.camera_position = Vec3::new(eye_x, eye_y, eye_z);
        self.pipeline.camera_target = Vec3::new(target_x, target_y, target_z);
    }

    #[wasm_bindgen]
    pub fn resize(&mut self, width: i32, height: i32) {
        self.pipeline.resize(width, height);
    }

    /// Advance both objects by one frame and draw.
    ///
    /// `elapsed` is the host clock in seconds, `dt` the time since the last call.
    #[wasm_bindgen]
    pub fn render(&mut self, elapsed: f32, dt: f32) {
        self.ribbon_state = self.ribbon_controller.update(self.ribbon_state, self.mode, elapsed, dt);
        self.particle_state = self.particle_controller.update(self.particle_state, self.mode, elapsed, dt);

        self.pipeline.render(&FrameUniforms {
            elapsed,
            ribbon_progress: self.ribbon_state.progress,
            snow_progress: self.particle_state.progress,
        });
    }

    #[wasm_bindgen]
    pub fn ribbon_progress(&self) -> f32 {
        self.ribbon_state.progress
    }

    #[wasm_bindgen]
    pub fn particle_progress(&self) -> f32 {
        self.particle_state.progress
    }

    /// Arc length of the garland path
    #[wasm_bindgen]
    pub fn garland_length(&self) -> f32 {
        self.curve.length()
    }

    #[wasm_bindgen]
    pub fn ribbon_triangle_count(&self) -> u32 {
        self.ribbon.mesh().triangle_count() as u32
    }
}

fn to_js(e: error::ConfigError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particles_depend_on_seed_and_count() {
        let config = SceneConfig::default();
        let a = generate_particles(&config, 64).unwrap();
        let b = generate_particles(&config, 64).unwrap();
        assert_eq!(a, b);

        let reseeded = SceneConfig { seed: 7, ..config };
        assert_ne!(a, generate_particles(&reseeded, 64).unwrap());

        let bigger = generate_particles(&config, 65).unwrap();
        assert_eq!(bigger.len(), 65);
        assert_ne!(bigger.particle(0), a.particle(0));
    }

    #[test]
    fn test_zero_particles() {
        let set = generate_particles(&SceneConfig::default(), 0).unwrap();
        assert!(set.is_empty());
    }
}
