use crate::render::gl_api::{BufferTarget, GlApi};
use std::mem;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("Mesh has no vertices")]
    Empty,
    #[error("Vertex data length {len} is not a multiple of the layout stride {stride}")]
    Misaligned { len: usize, stride: usize },
    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error("Vertex attribute {location} must have 1 to 4 components, got {components}")]
    InvalidComponents { location: u32, components: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: u32,
    pub components: i32,
}

/// Tightly packed `f32` attributes, in buffer order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    pub fn new(attributes: Vec<VertexAttribute>) -> Result<Self, MeshError> {
        if let Some(bad) = attributes
            .iter()
            .find(|a| !(1..=4).contains(&a.components))
        {
            return Err(MeshError::InvalidComponents {
                location: bad.location,
                components: bad.components,
            });
        }
        Ok(Self { attributes })
    }

    /// `vec3` positions at location 0.
    pub fn position() -> Self {
        Self {
            attributes: vec![VertexAttribute {
                location: 0,
                components: 3,
            }],
        }
    }

    /// `vec3` positions at location 0 followed by `vec3` colours at location 1.
    pub fn position_color() -> Self {
        Self {
            attributes: vec![
                VertexAttribute {
                    location: 0,
                    components: 3,
                },
                VertexAttribute {
                    location: 1,
                    components: 3,
                },
            ],
        }
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Floats per vertex.
    pub fn stride(&self) -> usize {
        self.attributes.iter().map(|a| a.components as usize).sum()
    }

    pub fn stride_bytes(&self) -> usize {
        self.stride() * mem::size_of::<f32>()
    }

    /// Byte offset of each attribute within a vertex.
    pub fn offsets(&self) -> Vec<usize> {
        self.attributes
            .iter()
            .scan(0usize, |offset, a| {
                let current = *offset;
                *offset += a.components as usize * mem::size_of::<f32>();
                Some(current)
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    vertices: Vec<f32>,
    indices: Option<Vec<u32>>,
    layout: VertexLayout,
}

impl MeshData {
    pub fn new(vertices: Vec<f32>, layout: VertexLayout) -> Result<Self, MeshError> {
        let stride = layout.stride();
        if vertices.is_empty() || stride == 0 {
            return Err(MeshError::Empty);
        }
        if vertices.len() % stride != 0 {
            return Err(MeshError::Misaligned {
                len: vertices.len(),
                stride,
            });
        }
        Ok(Self {
            vertices,
            indices: None,
            layout,
        })
    }

    pub fn with_indices(mut self, indices: Vec<u32>) -> Result<Self, MeshError> {
        let vertex_count = self.vertex_count();
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }
        self.indices = Some(indices);
        Ok(self)
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.layout.stride()
    }

    /// Number of vertices a draw call submits.
    pub fn element_count(&self) -> usize {
        self.indices
            .as_ref()
            .map_or_else(|| self.vertex_count(), |i| i.len())
    }
}

/// Vertex array, vertex buffer and optional element buffer on the driver.
/// All three are deleted on drop.
pub struct Mesh {
    api: Rc<dyn GlApi>,
    vao: u32,
    vbo: u32,
    ebo: Option<u32>,
    element_count: i32,
}

impl Mesh {
    pub fn upload(api: Rc<dyn GlApi>, data: &MeshData) -> Self {
        let vao = api.create_vertex_array();
        api.bind_vertex_array(vao);

        let vbo = api.create_buffer();
        api.bind_buffer(BufferTarget::Array, vbo);
        api.buffer_data(BufferTarget::Array, bytemuck::cast_slice(data.vertices()));

        let ebo = data.indices().map(|indices| {
            let ebo = api.create_buffer();
            api.bind_buffer(BufferTarget::ElementArray, ebo);
            api.buffer_data(BufferTarget::ElementArray, bytemuck::cast_slice(indices));
            ebo
        });

        let layout = data.layout();
        let stride = layout.stride_bytes() as i32;
        for (attribute, offset) in layout.attributes().iter().zip(layout.offsets()) {
            api.vertex_attrib_pointer(attribute.location, attribute.components, stride, offset);
            api.enable_vertex_attrib_array(attribute.location);
        }

        api.bind_vertex_array(0);
        log::debug!(
            "Uploaded mesh: vao={} vertices={} indexed={}",
            vao,
            data.vertex_count(),
            ebo.is_some()
        );

        Self {
            api,
            vao,
            vbo,
            ebo,
            element_count: data.element_count() as i32,
        }
    }

    pub fn vao(&self) -> u32 {
        self.vao
    }

    pub fn draw(&self) {
        self.api.bind_vertex_array(self.vao);
        if self.ebo.is_some() {
            self.api.draw_elements(self.element_count);
        } else {
            self.api.draw_arrays(0, self.element_count);
        }
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        self.api.delete_vertex_array(self.vao);
        self.api.delete_buffer(self.vbo);
        if let Some(ebo) = self.ebo {
            self.api.delete_buffer(ebo);
        }
    }
}
