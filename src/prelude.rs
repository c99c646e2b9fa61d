//! Desk Lamp prelude module
//!
//! This module re-exports the most commonly used types, traits, and functions
//! across the application to reduce import boilerplate.

// External crate re-exports
pub use bevy::prelude::*;

// Internal re-exports - Config and errors
pub use crate::config::LampConfig;
pub use crate::error::LampError;

// Internal re-exports - Events
pub use crate::events::{FixtureReady, LampCommand};

// Internal re-exports - Lighting
pub use crate::lighting::{
    FixtureBackend, FixtureBinding, FixtureDefaults, FixtureSlot, KelvinScale, OperatingMode,
    map_to_color,
};
pub use crate::plugins::lamp::{LampController, LampSet};
pub use crate::utils::color::LampColor;
