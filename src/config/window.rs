use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Requested OpenGL core profile version (major, minor).
    pub gl_version: (u8, u8),
    pub vsync: bool,
    pub visible: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "LearnOpenGL".to_string(),
            width: 800,
            height: 600,
            gl_version: (3, 3),
            vsync: true,
            visible: true,
        }
    }
}
