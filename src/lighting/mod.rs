//! Bulb lighting logic, independent of the renderer.

pub mod controller;
pub mod temperature;

pub use controller::{
    FixtureBackend, FixtureBinding, FixtureDefaults, FixtureOutput, FixtureSlot, LightController,
    OperatingMode, SlotState,
};
pub use temperature::{KelvinScale, KelvinStop, TemperatureSample, map_to_color};
