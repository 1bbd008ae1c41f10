use web_sys::{
    WebGl2RenderingContext, WebGlBuffer, WebGlProgram, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

use super::shaders::*;
use super::state::{RIBBON_STATE, SNOW_STATE};
use super::webgl::WebGLContext;
use crate::math::{Mat4, Vec3};
use crate::mesh::{RibbonSurface, FLOATS_PER_VERTEX};
use crate::particles::{ParticleAttributeSet, FLOATS_PER_PARTICLE};

/// Cached uniform locations for the ribbon program
struct RibbonUniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    time: Option<WebGlUniformLocation>,
    progress: Option<WebGlUniformLocation>,
}

/// Cached uniform locations for the snow program
struct SnowUniforms {
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    time: Option<WebGlUniformLocation>,
    progress: Option<WebGlUniformLocation>,
}

/// Scalars the evaluators need each frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameUniforms {
    pub elapsed: f32,
    pub ribbon_progress: f32,
    pub snow_progress: f32,
}

/// Uploads the ribbon and snow buffers once and draws them each frame
pub struct RenderPipeline {
    ctx: WebGLContext,

    ribbon_program: WebGlProgram,
    snow_program: WebGlProgram,
    ribbon_uniforms: RibbonUniforms,
    snow_uniforms: SnowUniforms,

    ribbon_vao: Option<WebGlVertexArrayObject>,
    ribbon_buffers: Vec<WebGlBuffer>,
    ribbon_index_count: i32,
    /// Ribbon placement relative to the tree origin
    ribbon_model: Mat4,

    snow_vao: Option<WebGlVertexArrayObject>,
    snow_buffer: Option<WebGlBuffer>,
    snow_count: i32,

    width: i32,
    height: i32,

    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub fov: f32,
}

impl RenderPipeline {
    pub fn new(gl: WebGl2RenderingContext, width: i32, height: i32) -> Result<Self, String> {
        let ctx = WebGLContext::new(gl);

        let ribbon_program = ctx.create_program(RIBBON_VERTEX_SHADER, RIBBON_FRAGMENT_SHADER)?;
        let snow_program = ctx.create_program(SNOW_VERTEX_SHADER, SNOW_FRAGMENT_SHADER)?;

        let ribbon_uniforms = RibbonUniforms {
            model: ctx.get_uniform_location(&ribbon_program, "u_model"),
            view: ctx.get_uniform_location(&ribbon_program, "u_view"),
            projection: ctx.get_uniform_location(&ribbon_program, "u_projection"),
            time: ctx.get_uniform_location(&ribbon_program, "u_time"),
            progress: ctx.get_uniform_location(&ribbon_program, "u_progress"),
        };

        let snow_uniforms = SnowUniforms {
            view: ctx.get_uniform_location(&snow_program, "u_view"),
            projection: ctx.get_uniform_location(&snow_program, "u_projection"),
            time: ctx.get_uniform_location(&snow_program, "u_time"),
            progress: ctx.get_uniform_location(&snow_program, "u_progress"),
        };

        log::info!("render pipeline ready ({}x{})", width, height);

        Ok(Self {
            ctx,
            ribbon_program,
            snow_program,
            ribbon_uniforms,
            snow_uniforms,
            ribbon_vao: None,
            ribbon_buffers: Vec::new(),
            ribbon_index_count: 0,
            ribbon_model: Mat4::identity(),
            snow_vao: None,
            snow_buffer: None,
            snow_count: 0,
            width,
            height,
            camera_position: Vec3::new(0.0, 4.0, 40.0),
            camera_target: Vec3::new(0.0, 4.0, 0.0),
            fov: std::f32::consts::FRAC_PI_4,
        })
    }

    /// Replace the ribbon geometry. `offset_y` lowers or raises the whole ribbon.
    pub fn upload_ribbon(&mut self, ribbon: &RibbonSurface, offset_y: f32) -> Result<(), String> {
        self.release_ribbon();

        let mesh = ribbon.mesh();
        let gl = &self.ctx.gl;

        let vao = self.ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let vertex_buffer = self.ctx.create_buffer_f32(&mesh.vertex_data())?;
        let index_buffer = self.ctx.create_index_buffer(mesh.index_data())?;

        // Layout: position(3) + normal(3) + uv(2)
        self.ctx.float_attribute(location::POSITION, 3, FLOATS_PER_VERTEX, 0);
        self.ctx.float_attribute(location::NORMAL, 3, FLOATS_PER_VERTEX, 3);
        self.ctx.float_attribute(location::UV, 2, FLOATS_PER_VERTEX, 6);

        gl.bind_vertex_array(None);
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, None);

        self.ribbon_vao = Some(vao);
        self.ribbon_buffers = vec![vertex_buffer, index_buffer];
        self.ribbon_index_count = mesh.index_data().len() as i32;
        self.ribbon_model = Mat4::translation(0.0, offset_y, 0.0);

        Ok(())
    }

    /// Replace the particle attributes. An empty set draws nothing.
    pub fn upload_snow(&mut self, particles: &ParticleAttributeSet) -> Result<(), String> {
        self.release_snow();

        if particles.is_empty() {
            return Ok(());
        }

        let gl = &self.ctx.gl;

        let vao = self.ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let buffer = self.ctx.create_buffer_f32(&particles.interleaved())?;

        // Layout: chaos(3) + fall_xz(2) + fall_start_y(1) + speed(1) + random(1)
        self.ctx.float_attribute(location::CHAOS_POS, 3, FLOATS_PER_PARTICLE, 0);
        self.ctx.float_attribute(location::FALL_XZ, 2, FLOATS_PER_PARTICLE, 3);
        self.ctx.float_attribute(location::FALL_START_Y, 1, FLOATS_PER_PARTICLE, 5);
        self.ctx.float_attribute(location::SPEED, 1, FLOATS_PER_PARTICLE, 6);
        self.ctx.float_attribute(location::RANDOM, 1, FLOATS_PER_PARTICLE, 7);

        gl.bind_vertex_array(None);
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, None);

        self.snow_vao = Some(vao);
        self.snow_buffer = Some(buffer);
        self.snow_count = particles.len() as i32;

        Ok(())
    }

    fn release_ribbon(&mut self) {
        let gl = &self.ctx.gl;
        if let Some(vao) = self.ribbon_vao.take() {
            gl.delete_vertex_array(Some(&vao));
        }
        for buffer in self.ribbon_buffers.drain(..) {
            gl.delete_buffer(Some(&buffer));
        }
        self.ribbon_index_count = 0;
    }

    fn release_snow(&mut self) {
        let gl = &self.ctx.gl;
        if let Some(vao) = self.snow_vao.take() {
            gl.delete_vertex_array(Some(&vao));
        }
        if let Some(buffer) = self.snow_buffer.take() {
            gl.delete_buffer(Some(&buffer));
        }
        self.snow_count = 0;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.camera_position, self.camera_target, Vec3::UP)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        let aspect = self.width as f32 / self.height.max(1) as f32;
        Mat4::perspective(self.fov, aspect, 0.1, 200.0)
    }

    /// Draw one frame
    pub fn render(&self, frame: &FrameUniforms) {
        let gl = &self.ctx.gl;

        let projection = self.projection_matrix();
        let view = self.view_matrix();

        self.ctx.viewport(0, 0, self.width, self.height);
        self.ctx.clear(0.01, 0.02, 0.05, 1.0);
        self.ctx.enable_depth_test();

        if self.ribbon_vao.is_some() && self.ribbon_index_count > 0 {
            gl.use_program(Some(&self.ribbon_program));
            self.ctx.apply_draw_state(&RIBBON_STATE);

            let u = &self.ribbon_uniforms;
            self.ctx.uniform_matrix4fv(u.model.as_ref(), self.ribbon_model.as_slice());
            self.ctx.uniform_matrix4fv(u.view.as_ref(), view.as_slice());
            self.ctx.uniform_matrix4fv(u.projection.as_ref(), projection.as_slice());
            self.ctx.uniform_1f(u.time.as_ref(), frame.elapsed);
            self.ctx.uniform_1f(u.progress.as_ref(), frame.ribbon_progress);

            gl.bind_vertex_array(self.ribbon_vao.as_ref());
            gl.draw_elements_with_i32(
                WebGl2RenderingContext::TRIANGLES,
                self.ribbon_index_count,
                WebGl2RenderingContext::UNSIGNED_INT,
                0,
            );
        }

        if self.snow_vao.is_some() && self.snow_count > 0 {
            gl.use_program(Some(&self.snow_program));
            self.ctx.apply_draw_state(&SNOW_STATE);

            let u = &self.snow_uniforms;
            self.ctx.uniform_matrix4fv(u.view.as_ref(), view.as_slice());
            self.ctx.uniform_matrix4fv(u.projection.as_ref(), projection.as_slice());
            self.ctx.uniform_1f(u.time.as_ref(), frame.elapsed);
            self.ctx.uniform_1f(u.progress.as_ref(), frame.snow_progress);

            gl.bind_vertex_array(self.snow_vao.as_ref());
            gl.draw_arrays(WebGl2RenderingContext::POINTS, 0, self.snow_count);
        }

        gl.bind_vertex_array(None);
        self.ctx.reset_draw_state();
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }
}
