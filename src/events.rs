//! Centralized event definitions
//!
//! Input sources (keyboard, tests, an embedding page) talk to the lamp only
//! through these events. The lamp plugin drains them once per frame in the
//! order they were written.

use crate::lighting::FixtureSlot;
use crate::utils::color::LampColor;
use bevy::prelude::*;

/// A user-level request to change one of the bulbs or the operating mode.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum LampCommand {
    PickColor { slot: FixtureSlot, color: LampColor },
    SetIntensity { slot: FixtureSlot, value: f32 },
    SetTemperature { slot: FixtureSlot, position: f32 },
    /// Mode label as chosen in the UI, parsed when handled
    SelectMode(String),
}

/// A bulb material and its point light were found in the loaded model.
#[derive(Event, Debug, Clone)]
pub struct FixtureReady {
    pub slot: FixtureSlot,
    pub material: Handle<StandardMaterial>,
    pub light: Entity,
}
