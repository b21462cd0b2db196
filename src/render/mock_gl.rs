//! Recording GL driver for unit tests (no context required)
//!
//! Shaders compile unless their text contains a rejected token or lacks a
//! `main` function. Programs link only with exactly one compiled vertex and
//! one compiled fragment stage attached.

use crate::render::gl_api::{BufferTarget, GlApi};
use crate::render::shaders::ShaderStage;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::ffi::CStr;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    UseProgram(u32),
    UniformLocation(u32, String),
    Uniform1i(i32, i32),
    Uniform1f(i32, f32),
    Uniform4f(i32, [f32; 4]),
    BindVertexArray(u32),
    BindBuffer(BufferTarget, u32),
    BufferData(BufferTarget, usize),
    VertexAttribPointer {
        location: u32,
        components: i32,
        stride: i32,
        offset: usize,
    },
    EnableVertexAttribArray(u32),
    DrawArrays(i32, i32),
    DrawElements(i32),
    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    Clear,
}

#[derive(Debug, Clone)]
pub struct MockShader {
    pub stage: ShaderStage,
    pub source: String,
    pub compiled: bool,
    pub log: String,
}

#[derive(Debug, Clone, Default)]
pub struct MockProgram {
    pub attached: Vec<u32>,
    pub linked_stages: Vec<ShaderStage>,
    pub linked: bool,
    pub log: String,
}

#[derive(Default)]
struct MockState {
    next_id: u32,
    shaders: HashMap<u32, MockShader>,
    programs: HashMap<u32, MockProgram>,
    vertex_arrays: HashSet<u32>,
    buffers: HashSet<u32>,
    deleted_shaders: Vec<u32>,
    deleted_programs: Vec<u32>,
    deleted_vertex_arrays: Vec<u32>,
    deleted_buffers: Vec<u32>,
    rejections: Vec<(String, String)>,
    active_uniforms: Vec<String>,
    calls: Vec<Call>,
}

impl MockState {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MockGl {
    state: RefCell<MockState>,
}

impl MockGl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any shader whose text contains `token` fails to compile with `log`.
    pub fn reject(self, token: &str, log: &str) -> Self {
        self.state
            .borrow_mut()
            .rejections
            .push((token.to_string(), log.to_string()));
        self
    }

    /// Declares a uniform every linked program reports as active.
    pub fn with_uniform(self, name: &str) -> Self {
        self.state.borrow_mut().active_uniforms.push(name.to_string());
        self
    }

    pub fn program(&self, id: u32) -> Option<MockProgram> {
        self.state.borrow().programs.get(&id).cloned()
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn live_vertex_arrays(&self) -> usize {
        self.state.borrow().vertex_arrays.len()
    }

    pub fn live_buffers(&self) -> usize {
        self.state.borrow().buffers.len()
    }

    pub fn deleted_shaders(&self) -> Vec<u32> {
        self.state.borrow().deleted_shaders.clone()
    }

    pub fn deleted_programs(&self) -> Vec<u32> {
        self.state.borrow().deleted_programs.clone()
    }

    pub fn deleted_vertex_arrays(&self) -> Vec<u32> {
        self.state.borrow().deleted_vertex_arrays.clone()
    }

    pub fn deleted_buffers(&self) -> Vec<u32> {
        self.state.borrow().deleted_buffers.clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl GlApi for MockGl {
    fn create_shader(&self, stage: ShaderStage) -> u32 {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.shaders.insert(
            id,
            MockShader {
                stage,
                source: String::new(),
                compiled: false,
                log: String::new(),
            },
        );
        id
    }

    fn shader_source(&self, shader: u32, source: &CStr) {
        if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader) {
            s.source = source.to_string_lossy().into_owned();
        }
    }

    fn compile_shader(&self, shader: u32) {
        let mut state = self.state.borrow_mut();
        let rejection = state.shaders.get(&shader).and_then(|s| {
            state
                .rejections
                .iter()
                .find(|(token, _)| s.source.contains(token.as_str()))
                .map(|(_, log)| log.clone())
        });
        if let Some(s) = state.shaders.get_mut(&shader) {
            match rejection {
                Some(log) => {
                    s.compiled = false;
                    s.log = log;
                }
                None if !s.source.contains("void main") => {
                    s.compiled = false;
                    s.log = "0:1(1): error: function `main' is not defined".to_string();
                }
                None => {
                    s.compiled = true;
                    s.log.clear();
                }
            }
        }
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .map(|s| s.compiled)
            .unwrap_or(false)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .map(|s| s.log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: u32) {
        let mut state = self.state.borrow_mut();
        if state.shaders.remove(&shader).is_some() {
            state.deleted_shaders.push(shader);
        }
    }

    fn create_program(&self) -> u32 {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.programs.insert(id, MockProgram::default());
        id
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program) {
            p.attached.push(shader);
        }
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program) {
            p.attached.retain(|&s| s != shader);
        }
    }

    fn link_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        let stages: Vec<Option<&MockShader>> = match state.programs.get(&program) {
            Some(p) => p.attached.iter().map(|id| state.shaders.get(id)).collect(),
            None => return,
        };

        let all_compiled = stages.iter().all(|s| s.map(|s| s.compiled).unwrap_or(false));
        let linked_stages: Vec<ShaderStage> = stages.iter().flatten().map(|s| s.stage).collect();
        let vertex = linked_stages.iter().filter(|&&s| s == ShaderStage::Vertex).count();
        let fragment = linked_stages.iter().filter(|&&s| s == ShaderStage::Fragment).count();

        let log = if !all_compiled {
            Some("error: linking with uncompiled/unspecialized shader".to_string())
        } else if vertex > 1 || fragment > 1 {
            Some("error: function `main' is multiply defined".to_string())
        } else if vertex == 0 || fragment == 0 {
            Some("error: program lacks a vertex or fragment stage".to_string())
        } else {
            None
        };

        if let Some(p) = state.programs.get_mut(&program) {
            p.linked_stages = linked_stages;
            p.linked = log.is_none();
            p.log = log.unwrap_or_default();
        }
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map(|p| p.linked)
            .unwrap_or(false)
    }

    fn program_info_log(&self, program: u32) -> String {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map(|p| p.log.clone())
            .unwrap_or_default()
    }

    fn use_program(&self, program: u32) {
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        if state.programs.remove(&program).is_some() {
            state.deleted_programs.push(program);
        }
    }

    fn uniform_location(&self, program: u32, name: &CStr) -> i32 {
        let name = name.to_string_lossy().into_owned();
        let location = self
            .state
            .borrow()
            .active_uniforms
            .iter()
            .position(|u| *u == name)
            .map(|i| i as i32)
            .unwrap_or(-1);
        self.record(Call::UniformLocation(program, name));
        location
    }

    fn uniform_1i(&self, location: i32, value: i32) {
        self.record(Call::Uniform1i(location, value));
    }

    fn uniform_1f(&self, location: i32, value: f32) {
        self.record(Call::Uniform1f(location, value));
    }

    fn uniform_4f(&self, location: i32, value: [f32; 4]) {
        self.record(Call::Uniform4f(location, value));
    }

    fn create_vertex_array(&self) -> u32 {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.vertex_arrays.insert(id);
        id
    }

    fn bind_vertex_array(&self, vao: u32) {
        self.record(Call::BindVertexArray(vao));
    }

    fn delete_vertex_array(&self, vao: u32) {
        let mut state = self.state.borrow_mut();
        if state.vertex_arrays.remove(&vao) {
            state.deleted_vertex_arrays.push(vao);
        }
    }

    fn create_buffer(&self) -> u32 {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.buffers.insert(id);
        id
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: u32) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        self.record(Call::BufferData(target, data.len()));
    }

    fn delete_buffer(&self, buffer: u32) {
        let mut state = self.state.borrow_mut();
        if state.buffers.remove(&buffer) {
            state.deleted_buffers.push(buffer);
        }
    }

    fn vertex_attrib_pointer(&self, location: u32, components: i32, stride: i32, offset: usize) {
        self.record(Call::VertexAttribPointer {
            location,
            components,
            stride,
            offset,
        });
    }

    fn enable_vertex_attrib_array(&self, location: u32) {
        self.record(Call::EnableVertexAttribArray(location));
    }

    fn draw_arrays(&self, first: i32, count: i32) {
        self.record(Call::DrawArrays(first, count));
    }

    fn draw_elements(&self, count: i32) {
        self.record(Call::DrawElements(count));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn clear_color(&self, color: [f32; 4]) {
        self.record(Call::ClearColor(color));
    }

    fn clear(&self) {
        self.record(Call::Clear);
    }

    fn read_pixel(&self, _x: i32, _y: i32) -> [u8; 4] {
        [0; 4]
    }
}
