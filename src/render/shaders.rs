// shaders.rs - Shader compilation and program linking

use crate::render::gl_api::GlApi;
use glam::Vec4;
use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::{CString, NulError};
use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;

/// Longest diagnostic kept from a driver info log, in characters.
pub const INFO_LOG_CAPACITY: usize = 512;

const EMPTY_DIAGNOSTIC: &str = "no diagnostic reported by driver";

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("ERROR::SHADER::{stage}::COMPILATION_FAILED\n{diagnostic}")]
    Compile {
        stage: ShaderStage,
        diagnostic: Diagnostic,
    },
    #[error("ERROR::SHADER::PROGRAM::LINKING_FAILED\n{diagnostic}")]
    Link { diagnostic: Diagnostic },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Null byte error: {0}")]
    Nul(#[from] NulError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("VERTEX"),
            ShaderStage::Fragment => f.write_str("FRAGMENT"),
        }
    }
}

/// Driver compile/link failure text, capped at [`INFO_LOG_CAPACITY`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic(String);

impl Diagnostic {
    pub fn from_driver_log(log: &str) -> Self {
        let log = log.trim_end_matches(|c: char| c == '\0' || c.is_whitespace());
        if log.is_empty() {
            return Self(EMPTY_DIAGNOSTIC.to_string());
        }
        let text = match log.char_indices().nth(INFO_LOG_CAPACITY) {
            Some((cut, _)) => &log[..cut],
            None => log,
        };
        Self(text.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shader text tagged with the pipeline stage it is written for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    stage: ShaderStage,
    text: Cow<'static, str>,
}

impl ShaderSource {
    pub fn new(stage: ShaderStage, text: impl Into<Cow<'static, str>>) -> Self {
        Self {
            stage,
            text: text.into(),
        }
    }

    pub fn vertex(text: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ShaderStage::Vertex, text)
    }

    pub fn fragment(text: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ShaderStage::Fragment, text)
    }

    pub fn from_file<P: AsRef<Path>>(stage: ShaderStage, path: P) -> Result<Self, ShaderError> {
        let text = fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded {} shader from {:?}", stage, path.as_ref());
        Ok(Self::new(stage, text))
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A successfully compiled shader stage. Deleted from the driver on drop.
pub struct CompiledShader {
    api: Rc<dyn GlApi>,
    id: u32,
    stage: ShaderStage,
}

impl CompiledShader {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl fmt::Debug for CompiledShader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledShader")
            .field("id", &self.id)
            .field("stage", &self.stage)
            .finish()
    }
}

impl Drop for CompiledShader {
    fn drop(&mut self) {
        self.api.delete_shader(self.id);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec4(Vec4),
}

/// A named uniform assignment applied before a draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Uniform {
    pub name: Cow<'static, str>,
    pub value: UniformValue,
}

impl Uniform {
    pub fn new(name: impl Into<Cow<'static, str>>, value: UniformValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A linked program. Only obtainable from a successful [`ShaderCompiler::link`].
pub struct ShaderProgram {
    api: Rc<dyn GlApi>,
    id: u32,
    uniforms: RefCell<HashMap<String, i32>>,
}

impl ShaderProgram {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn bind(&self) {
        self.api.use_program(self.id);
    }

    /// Cached location of `name`, or `None` if the program has no such uniform.
    pub fn uniform_location(&self, name: &str) -> Option<i32> {
        if let Some(&location) = self.uniforms.borrow().get(name) {
            return (location != -1).then_some(location);
        }

        let location = match CString::new(name) {
            Ok(cname) => self.api.uniform_location(self.id, &cname),
            Err(_) => -1,
        };
        if location == -1 {
            log::warn!("Uniform '{}' not found in shader program {}", name, self.id);
        }

        self.uniforms.borrow_mut().insert(name.to_string(), location);
        (location != -1).then_some(location)
    }

    /// Sets a uniform on this program. The program must be bound.
    pub fn set_uniform(&self, name: &str, value: UniformValue) {
        let Some(location) = self.uniform_location(name) else {
            return;
        };
        match value {
            UniformValue::Bool(v) => self.api.uniform_1i(location, v as i32),
            UniformValue::Int(v) => self.api.uniform_1i(location, v),
            UniformValue::Float(v) => self.api.uniform_1f(location, v),
            UniformValue::Vec4(v) => self.api.uniform_4f(location, v.to_array()),
        }
    }

    pub fn set_bool(&self, name: &str, value: bool) {
        self.set_uniform(name, UniformValue::Bool(value));
    }

    pub fn set_int(&self, name: &str, value: i32) {
        self.set_uniform(name, UniformValue::Int(value));
    }

    pub fn set_float(&self, name: &str, value: f32) {
        self.set_uniform(name, UniformValue::Float(value));
    }

    pub fn set_vec4(&self, name: &str, value: Vec4) {
        self.set_uniform(name, UniformValue::Vec4(value));
    }
}

impl fmt::Debug for ShaderProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram").field("id", &self.id).finish()
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        self.api.delete_program(self.id);
    }
}

/// Compiles shader stages and links them into programs.
///
/// Failures are logged at error level where they are detected and returned to
/// the caller; a failed stage or program is released before returning.
pub struct ShaderCompiler {
    api: Rc<dyn GlApi>,
}

impl ShaderCompiler {
    pub fn new(api: Rc<dyn GlApi>) -> Self {
        Self { api }
    }

    pub fn compile(&self, source: &ShaderSource) -> Result<CompiledShader, ShaderError> {
        let text = CString::new(source.text().as_bytes())?;
        let shader = CompiledShader {
            api: Rc::clone(&self.api),
            id: self.api.create_shader(source.stage()),
            stage: source.stage(),
        };

        self.api.shader_source(shader.id, &text);
        self.api.compile_shader(shader.id);

        if !self.api.shader_compile_status(shader.id) {
            let err = ShaderError::Compile {
                stage: shader.stage,
                diagnostic: Diagnostic::from_driver_log(&self.api.shader_info_log(shader.id)),
            };
            log::error!("{}", err);
            return Err(err);
        }

        log::debug!("Compiled {} shader {}", shader.stage, shader.id);
        Ok(shader)
    }

    /// Links two compiled stages. Stage kinds are not checked here; the driver
    /// rejects pairs it cannot link.
    pub fn link(
        &self,
        vertex: &CompiledShader,
        fragment: &CompiledShader,
    ) -> Result<ShaderProgram, ShaderError> {
        let program = ShaderProgram {
            api: Rc::clone(&self.api),
            id: self.api.create_program(),
            uniforms: RefCell::new(HashMap::new()),
        };

        self.api.attach_shader(program.id, vertex.id);
        self.api.attach_shader(program.id, fragment.id);
        self.api.link_program(program.id);
        self.api.detach_shader(program.id, vertex.id);
        self.api.detach_shader(program.id, fragment.id);

        if !self.api.program_link_status(program.id) {
            let err = ShaderError::Link {
                diagnostic: Diagnostic::from_driver_log(&self.api.program_info_log(program.id)),
            };
            log::error!("{}", err);
            return Err(err);
        }

        log::debug!(
            "Linked program {} from shaders {} and {}",
            program.id,
            vertex.id,
            fragment.id
        );
        Ok(program)
    }

    /// Compiles both stages, then links them. Both stages are compiled even
    /// if the first fails, so every diagnostic reaches the log.
    pub fn build_program(
        &self,
        vertex: &ShaderSource,
        fragment: &ShaderSource,
    ) -> Result<ShaderProgram, ShaderError> {
        let vertex = self.compile(vertex);
        let fragment = self.compile(fragment);
        self.link(&vertex?, &fragment?)
    }

    pub fn build_program_from_files<P: AsRef<Path>>(
        &self,
        vertex_path: P,
        fragment_path: P,
    ) -> Result<ShaderProgram, ShaderError> {
        let vertex = ShaderSource::from_file(ShaderStage::Vertex, vertex_path)?;
        let fragment = ShaderSource::from_file(ShaderStage::Fragment, fragment_path)?;
        self.build_program(&vertex, &fragment)
    }
}
