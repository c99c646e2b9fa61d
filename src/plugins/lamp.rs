//! Lamp plugin - Self-contained plugin pattern
//!
//! This plugin owns the [`LampController`] resource and is the only place
//! that mutates bulb materials and point lights. Fixture bindings arrive as
//! [`FixtureReady`] events from the scene; user input arrives as
//! [`LampCommand`] events. Bindings are processed before commands so that a
//! command written in the same frame as the binding already sees the bulb.

use crate::config::LampConfig;
use crate::events::{FixtureReady, LampCommand};
use crate::lighting::{FixtureBackend, FixtureBinding, LightController};
use crate::utils::color::{LampColor, emissive_for};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

/// Controller bound to Bevy material handles and light entities.
pub type LampController = LightController<Handle<StandardMaterial>, Entity>;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LampSet {
    Bind,
    Commands,
}

/// Writes bulb state into the material assets and point light components.
#[derive(SystemParam)]
pub struct SceneFixtures<'w, 's> {
    materials: ResMut<'w, Assets<StandardMaterial>>,
    lights: Query<'w, 's, &'static mut PointLight>,
    config: Res<'w, LampConfig>,
}

impl FixtureBackend for SceneFixtures<'_, '_> {
    type Material = Handle<StandardMaterial>;
    type Light = Entity;

    fn write_material(&mut self, material: &Self::Material, color: LampColor, intensity: f32) {
        match self.materials.get_mut(material) {
            Some(material) => material.emissive = emissive_for(color, intensity),
            None => warn!("Bulb material {:?} is gone", material.id()),
        }
    }

    fn write_light(&mut self, light: &Self::Light, color: LampColor, intensity: f32) {
        match self.lights.get_mut(*light) {
            Ok(mut point_light) => {
                point_light.color = color.into();
                point_light.intensity = intensity * self.config.lighting.lumens_per_unit;
            }
            Err(e) => warn!("Bulb light {light} is unavailable: {e}"),
        }
    }
}

pub struct LampPlugin {
    config: Option<LampConfig>,
}

impl LampPlugin {
    pub fn new() -> Self {
        Self { config: None }
    }

    pub fn with_config(config: LampConfig) -> Self {
        Self {
            config: Some(config),
        }
    }
}

impl Default for LampPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for LampPlugin {
    fn build(&self, app: &mut App) {
        let config = self
            .config
            .clone()
            .unwrap_or_else(LampConfig::load_from_user_config);

        match config.to_toml() {
            Ok(toml_string) => {
                debug!("=== Current Configuration (TOML) ===\n{}", toml_string);
                debug!("=== End Configuration ===");
            }
            Err(e) => {
                error!("Failed to serialize configuration to TOML: {}", e);
            }
        }

        let lighting = &config.lighting;
        let controller = LampController::with_slider_position(
            lighting.initial_mode,
            lighting.temperature_scale.clone(),
            lighting.initial_slider_position,
        )
        .with_incandescent_intensity_scale(lighting.incandescent_intensity_scale);

        app.insert_resource(controller);
        app.insert_resource(config);

        app.add_event::<LampCommand>();
        app.add_event::<FixtureReady>();

        app.configure_sets(Update, (LampSet::Bind, LampSet::Commands).chain());

        app.add_systems(
            Update,
            (
                bind_ready_fixtures.in_set(LampSet::Bind),
                handle_lamp_commands.in_set(LampSet::Commands),
            ),
        );
    }
}

fn bind_ready_fixtures(
    mut ready_events: EventReader<FixtureReady>,
    mut controller: ResMut<LampController>,
    mut fixtures: SceneFixtures,
    config: Res<LampConfig>,
) {
    for ready in ready_events.read() {
        controller.on_model_ready(
            &mut fixtures,
            ready.slot,
            FixtureBinding::new(ready.material.clone(), ready.light),
            config.fixtures.for_slot(ready.slot),
        );
    }
}

fn handle_lamp_commands(
    mut commands: EventReader<LampCommand>,
    mut controller: ResMut<LampController>,
    mut fixtures: SceneFixtures,
) {
    for command in commands.read() {
        match command {
            LampCommand::PickColor { slot, color } => {
                controller.set_color_from_picker(&mut fixtures, *slot, *color);
            }
            LampCommand::SetIntensity { slot, value } => {
                controller.set_intensity(&mut fixtures, *slot, *value);
            }
            LampCommand::SetTemperature { slot, position } => {
                controller.set_color_from_temperature_slider(&mut fixtures, *slot, *position);
            }
            LampCommand::SelectMode(label) => {
                if let Err(e) = controller.select_mode(&mut fixtures, label) {
                    warn!("{e}. Keeping {}", controller.mode());
                }
            }
        }
    }
}
