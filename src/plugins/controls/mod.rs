//! Controls plugin - Self-contained plugin pattern
//!
//! This plugin translates keyboard input into [`LampCommand`] events. It
//! never touches the bulbs itself: relative adjustments are computed from
//! the inputs the controller last recorded for the selected bulb, and the
//! lamp plugin applies them.

use crate::config::LampConfig;
use crate::events::LampCommand;
use crate::lighting::FixtureSlot;
use crate::plugins::lamp::{LampController, LampSet};
use bevy::prelude::*;

pub mod constants;

use constants::*;

/// Which bulb the keyboard is currently steering.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ControlsState {
    pub selected: FixtureSlot,
    palette_index: [Option<usize>; 2],
}

impl Default for ControlsState {
    fn default() -> Self {
        Self {
            selected: FixtureSlot::B1,
            palette_index: [None; 2],
        }
    }
}

impl ControlsState {
    /// Advances the selected bulb through the palette, wrapping around.
    fn next_palette_index(&mut self, palette_len: usize) -> Option<usize> {
        if palette_len == 0 {
            return None;
        }
        let entry = &mut self.palette_index[self.selected.index()];
        let next = entry.map_or(0, |index| (index + 1) % palette_len);
        *entry = Some(next);
        Some(next)
    }
}

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlsState>();

        app.add_systems(
            Update,
            (
                keyboard_input_handler.before(LampSet::Commands),
                #[cfg(not(target_arch = "wasm32"))]
                quit_on_escape,
            ),
        );
    }
}

fn keyboard_input_handler(
    keys: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<ControlsState>,
    controller: Res<LampController>,
    config: Res<LampConfig>,
    mut commands: EventWriter<LampCommand>,
) {
    if keys.just_pressed(SELECT_OTHER_SLOT_KEY) {
        state.selected = state.selected.other();
        info!("Steering bulb {}", state.selected);
    }

    let slot = state.selected;
    let recorded = controller.slot(slot);
    let controls = &config.controls;

    if keys.just_pressed(TOGGLE_MODE_KEY) {
        commands.write(LampCommand::SelectMode(
            controller.mode().toggled().label().to_string(),
        ));
    }

    if keys.just_pressed(CYCLE_COLOR_KEY) {
        if let Some(index) = state.next_palette_index(controls.palette.len()) {
            commands.write(LampCommand::PickColor {
                slot,
                color: controls.palette[index],
            });
        }
    }

    let intensity_delta = step_for(
        &keys,
        INTENSITY_UP_KEY,
        INTENSITY_DOWN_KEY,
        controls.intensity_step,
    );
    if intensity_delta != 0.0 {
        commands.write(LampCommand::SetIntensity {
            slot,
            value: (recorded.raw_intensity() + intensity_delta).max(0.0),
        });
    }

    let temperature_delta = step_for(&keys, COOLER_KEY, WARMER_KEY, controls.temperature_step);
    if temperature_delta != 0.0 {
        commands.write(LampCommand::SetTemperature {
            slot,
            position: recorded.slider_position() + temperature_delta,
        });
    }
}

fn step_for(keys: &ButtonInput<KeyCode>, increase: KeyCode, decrease: KeyCode, step: f32) -> f32 {
    let mut delta = 0.0;
    if keys.just_pressed(increase) {
        delta += step;
    }
    if keys.just_pressed(decrease) {
        delta -= step;
    }
    delta
}

#[cfg(not(target_arch = "wasm32"))]
fn quit_on_escape(keys: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keys.any_just_pressed(QUIT_KEYS) {
        exit.write_default();
    }
}
