pub mod app;
pub mod config;
pub mod demos;
pub mod logging;
pub mod render;
pub mod window;

// Re-export commonly used types
pub use config::AppConfig;
pub use render::pipeline::RenderPipeline;
pub use render::scene::SceneDescription;
pub use render::shaders::{ShaderCompiler, ShaderProgram, ShaderSource, ShaderStage};
pub use window::RenderWindow;
