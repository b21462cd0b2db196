use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// RGBA the back buffer is cleared to each frame.
    pub clear_color: [f32; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.2, 0.3, 0.3, 1.0],
        }
    }
}
