pub mod evaluator;
pub mod shaders;
pub mod state;
pub mod webgl;
pub mod pipeline;

pub use evaluator::{RibbonShading, SnowShading};
pub use pipeline::{FrameUniforms, RenderPipeline};
pub use state::{BlendMode, DrawState};
pub use webgl::WebGLContext;
