pub mod gl_api;
pub mod mesh;
pub mod pipeline;
pub mod scene;
pub mod shaders;

#[cfg(test)]
pub(crate) mod mock_gl;

pub use gl_api::{GlApi, NativeGl};
pub use mesh::{Mesh, MeshData, MeshError, VertexAttribute, VertexLayout};
pub use pipeline::{RenderError, RenderPipeline};
pub use scene::{DrawPass, ProgramDesc, SceneDescription};
pub use shaders::{
    CompiledShader, Diagnostic, ShaderCompiler, ShaderError, ShaderProgram, ShaderSource,
    ShaderStage, Uniform, UniformValue,
};
