// pipeline.rs - Owns every driver object of a scene and draws it

use crate::config::RenderConfig;
use crate::render::gl_api::GlApi;
use crate::render::mesh::{Mesh, MeshError};
use crate::render::scene::{DrawPass, SceneDescription};
use crate::render::shaders::{ShaderCompiler, ShaderError, ShaderProgram};
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error("Program {program} refers to missing shader {shader}")]
    UnknownShader { program: usize, shader: usize },
    #[error("Draw pass {pass} refers to missing program {program}")]
    UnknownProgram { pass: usize, program: usize },
    #[error("Draw pass {pass} refers to missing mesh {mesh}")]
    UnknownMesh { pass: usize, mesh: usize },
}

/// A fully built scene. Only exists if every shader compiled, every program
/// linked and every pass points at a real program and mesh.
pub struct RenderPipeline {
    api: Rc<dyn GlApi>,
    clear_color: [f32; 4],
    programs: Vec<ShaderProgram>,
    meshes: Vec<Mesh>,
    passes: Vec<DrawPass>,
}

impl RenderPipeline {
    pub fn build(
        api: Rc<dyn GlApi>,
        scene: &SceneDescription,
        config: &RenderConfig,
    ) -> Result<Self, RenderError> {
        Self::validate(scene)?;

        let compiler = ShaderCompiler::new(Rc::clone(&api));

        // Compile everything before bailing so each broken stage gets logged.
        let compiled: Vec<_> = scene.shaders.iter().map(|s| compiler.compile(s)).collect();
        let compiled = compiled.into_iter().collect::<Result<Vec<_>, _>>()?;

        let programs = scene
            .programs
            .iter()
            .map(|p| compiler.link(&compiled[p.vertex], &compiled[p.fragment]))
            .collect::<Result<Vec<_>, _>>()?;
        drop(compiled);

        let meshes = scene
            .meshes
            .iter()
            .map(|m| Mesh::upload(Rc::clone(&api), m))
            .collect();

        log::info!(
            "Built '{}': {} program(s), {} mesh(es), {} pass(es)",
            scene.title,
            programs.len(),
            scene.meshes.len(),
            scene.passes.len()
        );

        Ok(Self {
            api,
            clear_color: config.clear_color,
            programs,
            meshes,
            passes: scene.passes.clone(),
        })
    }

    fn validate(scene: &SceneDescription) -> Result<(), RenderError> {
        for (program, desc) in scene.programs.iter().enumerate() {
            for shader in [desc.vertex, desc.fragment] {
                if shader >= scene.shaders.len() {
                    return Err(RenderError::UnknownShader { program, shader });
                }
            }
        }
        for (pass, desc) in scene.passes.iter().enumerate() {
            if desc.program >= scene.programs.len() {
                return Err(RenderError::UnknownProgram {
                    pass,
                    program: desc.program,
                });
            }
            if desc.mesh >= scene.meshes.len() {
                return Err(RenderError::UnknownMesh {
                    pass,
                    mesh: desc.mesh,
                });
            }
        }
        Ok(())
    }

    pub fn programs(&self) -> &[ShaderProgram] {
        &self.programs
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.api.viewport(0, 0, width as i32, height as i32);
    }

    pub fn render_frame(&self) {
        self.api.clear_color(self.clear_color);
        self.api.clear();

        for pass in &self.passes {
            let program = &self.programs[pass.program];
            program.bind();
            for uniform in &pass.uniforms {
                program.set_uniform(&uniform.name, uniform.value);
            }
            self.meshes[pass.mesh].draw();
        }
    }
}
