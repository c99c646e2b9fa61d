//! Light state controller for the two lamp bulbs.
//!
//! [`LightController`] owns the operating mode and the two fixture slots. It
//! records the last inputs for every slot so that a mode switch can reapply
//! the whole state, and writes results through a [`FixtureBackend`]. The
//! controller never touches engine types itself: the backend decides what a
//! material or a light handle is.
//!
//! Updates for a slot that has not been bound yet are ignored. The model is
//! loaded asynchronously, so early input events are expected.

use crate::error::LampError;
use crate::lighting::temperature::{KelvinScale, TemperatureSample, map_to_color};
use crate::utils::color::LampColor;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_INCANDESCENT_INTENSITY_SCALE: f32 = 0.6;

/// One of the two independently controlled bulbs.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum FixtureSlot {
    B1,
    B2,
}

impl FixtureSlot {
    pub const ALL: [FixtureSlot; 2] = [FixtureSlot::B1, FixtureSlot::B2];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            FixtureSlot::B1 => 0,
            FixtureSlot::B2 => 1,
        }
    }

    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            FixtureSlot::B1 => FixtureSlot::B2,
            FixtureSlot::B2 => FixtureSlot::B1,
        }
    }
}

impl fmt::Display for FixtureSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureSlot::B1 => f.write_str("B1"),
            FixtureSlot::B2 => f.write_str("B2"),
        }
    }
}

/// How inputs are turned into bulb color and intensity.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingMode {
    /// Picked colors, intensities applied as given
    #[default]
    Rgb,
    /// Temperature slider colors, intensities attenuated
    Incandescent,
}

impl OperatingMode {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            OperatingMode::Rgb => "RGBConfiguration",
            OperatingMode::Incandescent => "IncandescentConfiguration",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            OperatingMode::Rgb => OperatingMode::Incandescent,
            OperatingMode::Incandescent => OperatingMode::Rgb,
        }
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OperatingMode {
    type Err = LampError;

    /// Accepts the full labels and the short names `rgb` / `incandescent`,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rgbconfiguration" | "rgb" => Ok(OperatingMode::Rgb),
            "incandescentconfiguration" | "incandescent" => Ok(OperatingMode::Incandescent),
            _ => Err(LampError::UnknownMode(s.to_string())),
        }
    }
}

/// Writes bulb state into whatever owns the material and the light.
pub trait FixtureBackend {
    type Material;
    type Light;

    fn write_material(&mut self, material: &Self::Material, color: LampColor, intensity: f32);

    fn write_light(&mut self, light: &Self::Light, color: LampColor, intensity: f32);
}

/// Handles to the material and the light of one bulb.
#[derive(Clone, PartialEq, Debug)]
pub struct FixtureBinding<M, L> {
    pub material: M,
    pub light: L,
}

impl<M, L> FixtureBinding<M, L> {
    pub fn new(material: M, light: L) -> Self {
        Self { material, light }
    }
}

/// Values a slot starts with once its fixture is bound.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct FixtureDefaults {
    pub emissive_color: LampColor,
    pub light_color: LampColor,
    pub intensity: f32,
}

impl FixtureDefaults {
    /// Cool blue at a lower intensity.
    pub const B1: Self = Self {
        emissive_color: LampColor::from_u32(0x1E64FF),
        light_color: LampColor::from_u32(0x1E64FF),
        intensity: 1.0,
    };

    /// Warm red at a higher intensity.
    pub const B2: Self = Self {
        emissive_color: LampColor::from_u32(0xFF0005),
        light_color: LampColor::from_u32(0xFF0005),
        intensity: 1.5,
    };

    #[must_use]
    pub const fn for_slot(slot: FixtureSlot) -> Self {
        match slot {
            FixtureSlot::B1 => Self::B1,
            FixtureSlot::B2 => Self::B2,
        }
    }
}

/// What was last written to a bulb.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct FixtureOutput {
    pub emissive_color: LampColor,
    pub emissive_intensity: f32,
    pub light_color: LampColor,
    pub light_intensity: f32,
}

/// Recorded inputs and last output of one slot.
#[derive(Clone, PartialEq, Debug)]
pub struct SlotState<M, L> {
    binding: Option<FixtureBinding<M, L>>,
    picked_color: LampColor,
    slider_position: f32,
    slider_kelvin: u32,
    raw_intensity: f32,
    output: Option<FixtureOutput>,
}

impl<M, L> SlotState<M, L> {
    fn unbound(slider_position: f32, scale: &KelvinScale) -> Self {
        let sample = map_to_color(slider_position, scale);
        Self {
            binding: None,
            picked_color: LampColor::WHITE,
            slider_position: scale.clamp_position(slider_position),
            slider_kelvin: sample.kelvin,
            raw_intensity: 0.0,
            output: None,
        }
    }

    #[must_use]
    pub fn binding(&self) -> Option<&FixtureBinding<M, L>> {
        self.binding.as_ref()
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Last color from the picker, replayed in RGB mode.
    #[must_use]
    pub fn picked_color(&self) -> LampColor {
        self.picked_color
    }

    /// Last slider position, already clamped to the scale.
    #[must_use]
    pub fn slider_position(&self) -> f32 {
        self.slider_position
    }

    #[must_use]
    pub fn slider_kelvin(&self) -> u32 {
        self.slider_kelvin
    }

    /// Last intensity as requested, before any mode attenuation.
    #[must_use]
    pub fn raw_intensity(&self) -> f32 {
        self.raw_intensity
    }

    #[must_use]
    pub fn output(&self) -> Option<FixtureOutput> {
        self.output
    }
}

/// Operating mode and the two bulb slots.
#[derive(Resource, Clone, Debug)]
pub struct LightController<M, L> {
    mode: OperatingMode,
    scale: KelvinScale,
    incandescent_intensity_scale: f32,
    slots: [SlotState<M, L>; 2],
}

impl<M, L> LightController<M, L> {
    pub fn new(mode: OperatingMode, scale: KelvinScale) -> Self {
        Self::with_slider_position(mode, scale, 0.0)
    }

    pub fn with_slider_position(mode: OperatingMode, scale: KelvinScale, position: f32) -> Self {
        let slots = [
            SlotState::unbound(position, &scale),
            SlotState::unbound(position, &scale),
        ];
        Self {
            mode,
            scale,
            incandescent_intensity_scale: DEFAULT_INCANDESCENT_INTENSITY_SCALE,
            slots,
        }
    }

    #[must_use]
    pub fn with_incandescent_intensity_scale(mut self, factor: f32) -> Self {
        self.incandescent_intensity_scale = factor.max(0.0);
        self
    }

    #[must_use]
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    #[must_use]
    pub fn scale(&self) -> &KelvinScale {
        &self.scale
    }

    #[must_use]
    pub fn incandescent_intensity_scale(&self) -> f32 {
        self.incandescent_intensity_scale
    }

    #[must_use]
    pub fn slot(&self, slot: FixtureSlot) -> &SlotState<M, L> {
        &self.slots[slot.index()]
    }

    #[must_use]
    pub fn is_bound(&self, slot: FixtureSlot) -> bool {
        self.slot(slot).is_bound()
    }

    /// Binds a bulb and applies its defaults as given.
    ///
    /// Binding the same slot again replaces the handles and reapplies the
    /// defaults.
    pub fn on_model_ready<B>(
        &mut self,
        backend: &mut B,
        slot: FixtureSlot,
        binding: FixtureBinding<M, L>,
        defaults: FixtureDefaults,
    ) where
        B: FixtureBackend<Material = M, Light = L>,
    {
        let intensity = sanitize_intensity(defaults.intensity);
        let state = &mut self.slots[slot.index()];
        if state.is_bound() {
            debug!("Rebinding fixture slot {slot}");
        }

        backend.write_material(&binding.material, defaults.emissive_color, intensity);
        backend.write_light(&binding.light, defaults.light_color, intensity);

        state.binding = Some(binding);
        state.picked_color = defaults.emissive_color;
        state.raw_intensity = intensity;
        state.output = Some(FixtureOutput {
            emissive_color: defaults.emissive_color,
            emissive_intensity: intensity,
            light_color: defaults.light_color,
            light_intensity: intensity,
        });

        info!(
            "Fixture {slot} bound with {} at intensity {intensity}",
            defaults.emissive_color
        );
    }

    /// Applies a picked color to the bulb whatever the mode.
    pub fn set_color_from_picker<B>(&mut self, backend: &mut B, slot: FixtureSlot, color: LampColor)
    where
        B: FixtureBackend<Material = M, Light = L>,
    {
        if !self.require_bound(slot) {
            return;
        }

        self.slots[slot.index()].picked_color = color;
        self.apply_color(backend, slot, color);
    }

    /// Sets both intensities, attenuated in incandescent mode.
    ///
    /// Negative and NaN values are treated as zero.
    pub fn set_intensity<B>(&mut self, backend: &mut B, slot: FixtureSlot, raw: f32)
    where
        B: FixtureBackend<Material = M, Light = L>,
    {
        if !self.require_bound(slot) {
            return;
        }

        let raw = sanitize_intensity(raw);
        self.slots[slot.index()].raw_intensity = raw;
        let effective = self.effective_intensity(raw);
        self.apply_intensity(backend, slot, effective);
    }

    /// Maps the slider position to a color and applies it like a pick.
    pub fn set_color_from_temperature_slider<B>(
        &mut self,
        backend: &mut B,
        slot: FixtureSlot,
        position: f32,
    ) where
        B: FixtureBackend<Material = M, Light = L>,
    {
        if !self.require_bound(slot) {
            return;
        }

        let sample = self.record_slider(slot, position);
        self.apply_color(backend, slot, sample.color);
    }

    /// Switches mode and reapplies color and intensity to both bulbs.
    pub fn set_mode<B>(&mut self, backend: &mut B, mode: OperatingMode)
    where
        B: FixtureBackend<Material = M, Light = L>,
    {
        if self.mode != mode {
            info!("Operating mode changed from {} to {mode}", self.mode);
        }
        self.mode = mode;

        for slot in FixtureSlot::ALL {
            let state = self.slot(slot);
            if !state.is_bound() {
                continue;
            }

            let color = match mode {
                OperatingMode::Rgb => state.picked_color,
                OperatingMode::Incandescent => {
                    map_to_color(state.slider_position, &self.scale).color
                }
            };
            let intensity = self.effective_intensity(state.raw_intensity);

            self.apply(backend, slot, color, intensity);
        }
    }

    /// Parses a mode label and switches to it.
    ///
    /// Unknown labels leave the current mode in place.
    pub fn select_mode<B>(&mut self, backend: &mut B, label: &str) -> Result<(), LampError>
    where
        B: FixtureBackend<Material = M, Light = L>,
    {
        let mode = label.parse::<OperatingMode>()?;
        self.set_mode(backend, mode);
        Ok(())
    }

    fn require_bound(&self, slot: FixtureSlot) -> bool {
        match self.bound_state(slot) {
            Ok(_) => true,
            Err(error) => {
                debug!("{error}, ignoring update");
                false
            }
        }
    }

    fn bound_state(&self, slot: FixtureSlot) -> Result<&SlotState<M, L>, LampError> {
        let state = self.slot(slot);
        if state.is_bound() {
            Ok(state)
        } else {
            Err(LampError::UnboundSlot(slot))
        }
    }

    fn record_slider(&mut self, slot: FixtureSlot, position: f32) -> TemperatureSample {
        let clamped = self.scale.clamp_position(position);
        let sample = map_to_color(clamped, &self.scale);
        let state = &mut self.slots[slot.index()];
        state.slider_position = clamped;
        state.slider_kelvin = sample.kelvin;
        sample
    }

    fn effective_intensity(&self, raw: f32) -> f32 {
        match self.mode {
            OperatingMode::Rgb => raw,
            OperatingMode::Incandescent => raw * self.incandescent_intensity_scale,
        }
    }

    fn apply_color<B>(&mut self, backend: &mut B, slot: FixtureSlot, color: LampColor)
    where
        B: FixtureBackend<Material = M, Light = L>,
    {
        let Some(current) = self.slot(slot).output else {
            return;
        };
        let Some(binding) = self.slots[slot.index()].binding.as_ref() else {
            return;
        };

        backend.write_material(&binding.material, color, current.emissive_intensity);
        backend.write_light(&binding.light, color, current.light_intensity);

        self.slots[slot.index()].output = Some(FixtureOutput {
            emissive_color: color,
            light_color: color,
            ..current
        });
    }

    fn apply_intensity<B>(&mut self, backend: &mut B, slot: FixtureSlot, intensity: f32)
    where
        B: FixtureBackend<Material = M, Light = L>,
    {
        let Some(current) = self.slot(slot).output else {
            return;
        };
        let Some(binding) = self.slots[slot.index()].binding.as_ref() else {
            return;
        };

        backend.write_material(&binding.material, current.emissive_color, intensity);
        backend.write_light(&binding.light, current.light_color, intensity);

        self.slots[slot.index()].output = Some(FixtureOutput {
            emissive_intensity: intensity,
            light_intensity: intensity,
            ..current
        });
    }

    fn apply<B>(&mut self, backend: &mut B, slot: FixtureSlot, color: LampColor, intensity: f32)
    where
        B: FixtureBackend<Material = M, Light = L>,
    {
        let Some(binding) = self.slots[slot.index()].binding.as_ref() else {
            return;
        };

        backend.write_material(&binding.material, color, intensity);
        backend.write_light(&binding.light, color, intensity);

        self.slots[slot.index()].output = Some(FixtureOutput {
            emissive_color: color,
            emissive_intensity: intensity,
            light_color: color,
            light_intensity: intensity,
        });
    }
}

fn sanitize_intensity(raw: f32) -> f32 {
    if raw.is_nan() { 0.0 } else { raw.max(0.0) }
}
