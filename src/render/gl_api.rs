// gl_api.rs - Driver boundary

use crate::render::shaders::ShaderStage;
use gl::types::*;
use std::ffi::CStr;
use std::ptr;

/// Buffer binding points used by the demos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

impl BufferTarget {
    fn as_gl(self) -> GLenum {
        match self {
            BufferTarget::Array => gl::ARRAY_BUFFER,
            BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// The subset of the OpenGL API the crate talks to.
///
/// Every id is the raw driver name (`GLuint`). Implementations must only be
/// called from the thread that owns the current context.
pub trait GlApi {
    fn create_shader(&self, stage: ShaderStage) -> u32;
    fn shader_source(&self, shader: u32, source: &CStr);
    fn compile_shader(&self, shader: u32);
    fn shader_compile_status(&self, shader: u32) -> bool;
    fn shader_info_log(&self, shader: u32) -> String;
    fn delete_shader(&self, shader: u32);

    fn create_program(&self) -> u32;
    fn attach_shader(&self, program: u32, shader: u32);
    fn detach_shader(&self, program: u32, shader: u32);
    fn link_program(&self, program: u32);
    fn program_link_status(&self, program: u32) -> bool;
    fn program_info_log(&self, program: u32) -> String;
    fn use_program(&self, program: u32);
    fn delete_program(&self, program: u32);

    /// Returns -1 when the program has no active uniform called `name`.
    fn uniform_location(&self, program: u32, name: &CStr) -> i32;
    fn uniform_1i(&self, location: i32, value: i32);
    fn uniform_1f(&self, location: i32, value: f32);
    fn uniform_4f(&self, location: i32, value: [f32; 4]);

    fn create_vertex_array(&self) -> u32;
    fn bind_vertex_array(&self, vao: u32);
    fn delete_vertex_array(&self, vao: u32);
    fn create_buffer(&self) -> u32;
    fn bind_buffer(&self, target: BufferTarget, buffer: u32);
    fn buffer_data(&self, target: BufferTarget, data: &[u8]);
    fn delete_buffer(&self, buffer: u32);
    fn vertex_attrib_pointer(&self, location: u32, components: i32, stride: i32, offset: usize);
    fn enable_vertex_attrib_array(&self, location: u32);

    fn draw_arrays(&self, first: i32, count: i32);
    fn draw_elements(&self, count: i32);

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, color: [f32; 4]);
    fn clear(&self);
    fn read_pixel(&self, x: i32, y: i32) -> [u8; 4];
}

/// `GlApi` backed by the globally loaded `gl` function pointers.
///
/// Construct only after `gl::load_with` ran against a current context.
#[derive(Debug, Default)]
pub struct NativeGl;

impl NativeGl {
    pub fn new() -> Self {
        Self
    }

    /// Reads an info log of `len` bytes (terminator included) through `fill`.
    fn read_info_log(len: GLint, fill: impl FnOnce(GLsizei, *mut GLchar)) -> String {
        if len <= 0 {
            return String::new();
        }
        let mut buffer = vec![0u8; len as usize];
        fill(len, buffer.as_mut_ptr() as *mut GLchar);
        let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
        String::from_utf8_lossy(&buffer[..end]).into_owned()
    }
}

impl GlApi for NativeGl {
    fn create_shader(&self, stage: ShaderStage) -> u32 {
        let kind = match stage {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        };
        unsafe { gl::CreateShader(kind) }
    }

    fn shader_source(&self, shader: u32, source: &CStr) {
        unsafe {
            gl::ShaderSource(shader, 1, &source.as_ptr(), ptr::null());
        }
    }

    fn compile_shader(&self, shader: u32) {
        unsafe { gl::CompileShader(shader) };
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        let mut success = gl::FALSE as GLint;
        unsafe {
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
        }
        success != gl::FALSE as GLint
    }

    fn shader_info_log(&self, shader: u32) -> String {
        let mut len = 0;
        unsafe {
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
        }
        Self::read_info_log(len, |len, buf| unsafe {
            gl::GetShaderInfoLog(shader, len, ptr::null_mut(), buf);
        })
    }

    fn delete_shader(&self, shader: u32) {
        unsafe { gl::DeleteShader(shader) };
    }

    fn create_program(&self) -> u32 {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        unsafe { gl::AttachShader(program, shader) };
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        unsafe { gl::DetachShader(program, shader) };
    }

    fn link_program(&self, program: u32) {
        unsafe { gl::LinkProgram(program) };
    }

    fn program_link_status(&self, program: u32) -> bool {
        let mut success = gl::FALSE as GLint;
        unsafe {
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
        }
        success != gl::FALSE as GLint
    }

    fn program_info_log(&self, program: u32) -> String {
        let mut len = 0;
        unsafe {
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        }
        Self::read_info_log(len, |len, buf| unsafe {
            gl::GetProgramInfoLog(program, len, ptr::null_mut(), buf);
        })
    }

    fn use_program(&self, program: u32) {
        unsafe { gl::UseProgram(program) };
    }

    fn delete_program(&self, program: u32) {
        unsafe { gl::DeleteProgram(program) };
    }

    fn uniform_location(&self, program: u32, name: &CStr) -> i32 {
        unsafe { gl::GetUniformLocation(program, name.as_ptr()) }
    }

    fn uniform_1i(&self, location: i32, value: i32) {
        unsafe { gl::Uniform1i(location, value) };
    }

    fn uniform_1f(&self, location: i32, value: f32) {
        unsafe { gl::Uniform1f(location, value) };
    }

    fn uniform_4f(&self, location: i32, value: [f32; 4]) {
        unsafe { gl::Uniform4f(location, value[0], value[1], value[2], value[3]) };
    }

    fn create_vertex_array(&self) -> u32 {
        let mut vao = 0;
        unsafe { gl::GenVertexArrays(1, &mut vao) };
        vao
    }

    fn bind_vertex_array(&self, vao: u32) {
        unsafe { gl::BindVertexArray(vao) };
    }

    fn delete_vertex_array(&self, vao: u32) {
        unsafe { gl::DeleteVertexArrays(1, &vao) };
    }

    fn create_buffer(&self) -> u32 {
        let mut buffer = 0;
        unsafe { gl::GenBuffers(1, &mut buffer) };
        buffer
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: u32) {
        unsafe { gl::BindBuffer(target.as_gl(), buffer) };
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        unsafe {
            gl::BufferData(
                target.as_gl(),
                data.len() as GLsizeiptr,
                data.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );
        }
    }

    fn delete_buffer(&self, buffer: u32) {
        unsafe { gl::DeleteBuffers(1, &buffer) };
    }

    fn vertex_attrib_pointer(&self, location: u32, components: i32, stride: i32, offset: usize) {
        unsafe {
            gl::VertexAttribPointer(
                location,
                components,
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset as *const _,
            );
        }
    }

    fn enable_vertex_attrib_array(&self, location: u32) {
        unsafe { gl::EnableVertexAttribArray(location) };
    }

    fn draw_arrays(&self, first: i32, count: i32) {
        unsafe { gl::DrawArrays(gl::TRIANGLES, first, count) };
    }

    fn draw_elements(&self, count: i32) {
        unsafe { gl::DrawElements(gl::TRIANGLES, count, gl::UNSIGNED_INT, ptr::null()) };
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { gl::Viewport(x, y, width, height) };
    }

    fn clear_color(&self, color: [f32; 4]) {
        unsafe { gl::ClearColor(color[0], color[1], color[2], color[3]) };
    }

    fn clear(&self) {
        unsafe { gl::Clear(gl::COLOR_BUFFER_BIT) };
    }

    fn read_pixel(&self, x: i32, y: i32) -> [u8; 4] {
        let mut pixel = [0u8; 4];
        unsafe {
            gl::Finish();
            gl::ReadPixels(
                x,
                y,
                1,
                1,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                pixel.as_mut_ptr() as *mut _,
            );
        }
        pixel
    }
}
