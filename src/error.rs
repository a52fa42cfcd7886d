// Startup errors; nothing inside a frame is allowed to fail

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum GameError {
    #[error("Window {width}x{height} is too small for the stage")]
    InvalidViewport { width: f32, height: f32 },
    #[error("Logger already installed")]
    LoggerInstalled,
}
