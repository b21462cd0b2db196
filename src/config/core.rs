use serde::{Deserialize, Serialize};

use super::{LoggingConfig, RenderConfig, WindowConfig};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub rendering: RenderConfig,
    pub logging: LoggingConfig,
}
