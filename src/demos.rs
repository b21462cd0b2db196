//! The five tutorial scenes as immutable descriptions.

use crate::render::mesh::{MeshData, VertexLayout};
use crate::render::scene::{DrawPass, ProgramDesc, SceneDescription};
use crate::render::shaders::{ShaderSource, ShaderStage, Uniform, UniformValue};
use crate::render::RenderError;
use std::path::PathBuf;

/// Shader sources compiled into the binaries.
pub mod sources {
    /// Passes the position attribute straight through.
    pub const POSITION_VERTEX: &str = "#version 330 core
layout (location = 0) in vec3 aPos;
void main()
{
    gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
";

    pub const ORANGE_FRAGMENT: &str = "#version 330 core
out vec4 FragColor;
void main()
{
    FragColor = vec4(1.0f, 0.5f, 0.2f, 1.0f);
}
";

    pub const YELLOW_FRAGMENT: &str = "#version 330 core
out vec4 FragColor;
void main()
{
    FragColor = vec4(1.0f, 1.0f, 0.0f, 1.0f);
}
";

    /// Hands a fixed dark red to the fragment stage.
    pub const VERTEX_COLOR_VERTEX: &str = "#version 330 core
layout (location = 0) in vec3 aPos;
out vec4 vertexColor;
void main()
{
    gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
    vertexColor = vec4(0.5, 0.0, 0.0, 1.0);
}
";

    pub const VERTEX_COLOR_FRAGMENT: &str = "#version 330 core
out vec4 FragColor;
in vec4 vertexColor;
void main()
{
    FragColor = vertexColor;
}
";
}

const LEFT_TRIANGLE: [f32; 9] = [
    -1.0, -0.5, 0.0, //
    0.0, -0.5, 0.0, //
    -0.5, 0.5, 0.0,
];

const RIGHT_TRIANGLE: [f32; 9] = [
    1.0, -0.5, 0.0, //
    0.0, -0.5, 0.0, //
    0.5, 0.5, 0.0,
];

const CENTER_TRIANGLE: [f32; 9] = [
    -0.5, -0.5, 0.0, //
    0.5, -0.5, 0.0, //
    0.0, 0.5, 0.0,
];

const RECTANGLE: [f32; 12] = [
    0.5, 0.5, 0.0, // top right
    0.5, -0.5, 0.0, // bottom right
    -0.5, -0.5, 0.0, // bottom left
    -0.5, 0.5, 0.0, // top left
];

const RECTANGLE_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

// position, colour
const RGB_TRIANGLE: [f32; 18] = [
    -0.5, -0.5, 0.0, 1.0, 0.0, 0.0, //
    0.5, -0.5, 0.0, 0.0, 1.0, 0.0, //
    0.0, 0.5, 0.0, 0.0, 0.0, 1.0,
];

/// Directory holding the GLSL files read at runtime. Looks for `shaders/` in
/// the working directory, then next to the executable, then in the source
/// tree the binary was built from.
pub fn shader_dir() -> PathBuf {
    let candidates = [
        std::env::current_dir().ok().map(|dir| dir.join("shaders")),
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("shaders"))),
    ];
    resolve_shader_dir(candidates.into_iter().flatten())
}

fn resolve_shader_dir(candidates: impl IntoIterator<Item = PathBuf>) -> PathBuf {
    candidates
        .into_iter()
        .find(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("shaders"))
}

fn single_program(
    title: &str,
    vertex: &'static str,
    fragment: &'static str,
    meshes: Vec<MeshData>,
) -> SceneDescription {
    let passes = (0..meshes.len()).map(|mesh| DrawPass::new(0, mesh)).collect();
    SceneDescription {
        title: title.to_string(),
        shaders: vec![ShaderSource::vertex(vertex), ShaderSource::fragment(fragment)],
        programs: vec![ProgramDesc {
            vertex: 0,
            fragment: 1,
        }],
        meshes,
        passes,
    }
}

/// Two orange triangles side by side, drawn with one program.
pub fn hello_window() -> Result<SceneDescription, RenderError> {
    Ok(single_program(
        "Hello Window",
        sources::POSITION_VERTEX,
        sources::ORANGE_FRAGMENT,
        vec![
            MeshData::new(LEFT_TRIANGLE.to_vec(), VertexLayout::position())?,
            MeshData::new(RIGHT_TRIANGLE.to_vec(), VertexLayout::position())?,
        ],
    ))
}

/// One triangle whose colour comes from the vertex stage.
pub fn red_triangle() -> Result<SceneDescription, RenderError> {
    Ok(single_program(
        "Red Triangle",
        sources::VERTEX_COLOR_VERTEX,
        sources::VERTEX_COLOR_FRAGMENT,
        vec![MeshData::new(CENTER_TRIANGLE.to_vec(), VertexLayout::position())?],
    ))
}

/// An orange and a yellow triangle. Both programs share one vertex stage.
pub fn two_colors() -> Result<SceneDescription, RenderError> {
    Ok(SceneDescription {
        title: "Two Colors".to_string(),
        shaders: vec![
            ShaderSource::vertex(sources::POSITION_VERTEX),
            ShaderSource::fragment(sources::ORANGE_FRAGMENT),
            ShaderSource::fragment(sources::YELLOW_FRAGMENT),
        ],
        programs: vec![
            ProgramDesc {
                vertex: 0,
                fragment: 1,
            },
            ProgramDesc {
                vertex: 0,
                fragment: 2,
            },
        ],
        meshes: vec![
            MeshData::new(LEFT_TRIANGLE.to_vec(), VertexLayout::position())?,
            MeshData::new(RIGHT_TRIANGLE.to_vec(), VertexLayout::position())?,
        ],
        passes: vec![DrawPass::new(0, 0), DrawPass::new(1, 1)],
    })
}

/// An orange rectangle drawn from four indexed vertices.
pub fn hello_rectangle() -> Result<SceneDescription, RenderError> {
    let rectangle = MeshData::new(RECTANGLE.to_vec(), VertexLayout::position())?
        .with_indices(RECTANGLE_INDICES.to_vec())?;
    Ok(single_program(
        "Hello Rectangle",
        sources::POSITION_VERTEX,
        sources::ORANGE_FRAGMENT,
        vec![rectangle],
    ))
}

/// A triangle interpolating red, green and blue corners. Shaders are read
/// from [`shader_dir`]. The fragment stage scales its colour by a
/// `brightness` uniform, set to 1.0 each frame so the program's float
/// uniform path runs against a real driver.
pub fn three_color() -> Result<SceneDescription, RenderError> {
    let dir = shader_dir();
    Ok(SceneDescription {
        title: "Three Color".to_string(),
        shaders: vec![
            ShaderSource::from_file(ShaderStage::Vertex, dir.join("three_color.vert"))?,
            ShaderSource::from_file(ShaderStage::Fragment, dir.join("three_color.frag"))?,
        ],
        programs: vec![ProgramDesc {
            vertex: 0,
            fragment: 1,
        }],
        meshes: vec![MeshData::new(
            RGB_TRIANGLE.to_vec(),
            VertexLayout::position_color(),
        )?],
        passes: vec![DrawPass::new(0, 0)
            .with_uniform(Uniform::new("brightness", UniformValue::Float(1.0)))],
    })
}
