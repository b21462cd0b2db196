pub mod core;
pub mod logging;
pub mod rendering;
pub mod window;

pub use core::AppConfig;
pub use logging::LoggingConfig;
pub use rendering::RenderConfig;
pub use window::WindowConfig;
