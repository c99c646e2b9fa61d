//! Desk Lamp library
//!
//! This provides the lamp's lighting logic and Bevy plugins as a library
//! to enable integration testing.

pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod lighting;
pub mod plugins;
pub mod prelude;
pub mod utils;

// Test utilities are public for integration tests
pub mod test_utils;

// Re-export commonly used items
pub use config::LampConfig;
pub use error::LampError;
pub use events::*;
pub use plugins::{
    camera::CameraPlugin, controls::ControlsPlugin, hud::HudPlugin, lamp::LampPlugin,
    scene::ScenePlugin,
};
