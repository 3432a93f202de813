pub mod config;
pub mod error;
pub mod types;

pub use config::{config, set_config, AttritionConfig, MoraleConfig, MovementConfig, WarfrontConfig};
pub use error::{Result, WarfrontError};
