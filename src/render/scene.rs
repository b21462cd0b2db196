use crate::render::mesh::MeshData;
use crate::render::shaders::{ShaderSource, Uniform};

/// Which compiled shaders make up a program, as indices into
/// [`SceneDescription::shaders`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramDesc {
    pub vertex: usize,
    pub fragment: usize,
}

/// One draw per frame: a program, a mesh and the uniforms set before drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawPass {
    pub program: usize,
    pub mesh: usize,
    pub uniforms: Vec<Uniform>,
}

impl DrawPass {
    pub fn new(program: usize, mesh: usize) -> Self {
        Self {
            program,
            mesh,
            uniforms: Vec::new(),
        }
    }

    pub fn with_uniform(mut self, uniform: Uniform) -> Self {
        self.uniforms.push(uniform);
        self
    }
}

/// Everything a demo draws, fixed at startup.
///
/// Shaders are listed once and referenced by index so a stage can be shared by
/// several programs.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescription {
    pub title: String,
    pub shaders: Vec<ShaderSource>,
    pub programs: Vec<ProgramDesc>,
    pub meshes: Vec<MeshData>,
    pub passes: Vec<DrawPass>,
}
