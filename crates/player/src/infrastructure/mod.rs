pub mod catalog;
pub mod config;
pub mod messaging;
pub mod platform;

pub use config::PlayerConfig;
