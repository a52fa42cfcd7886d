pub mod arena;
pub mod combat;
pub mod config;
pub mod cpu;
pub mod error;
pub mod fighter;
pub mod game;
pub mod input;
pub mod logging;
pub mod particles;
pub mod render;
pub mod round;
pub mod score;
pub mod types;
pub mod utils;
