//! Scene plugin - Self-contained plugin pattern
//!
//! This plugin builds the room the lamp stands in, loads the lamp model and
//! finds the two bulb meshes by their glTF material names. Each bulb gets a
//! point light parented to its mesh, and the pair is announced to the lamp
//! plugin with a [`FixtureReady`] event.

use crate::config::LampConfig;
use crate::events::FixtureReady;
use crate::lighting::FixtureSlot;
use bevy::asset::LoadState;
use bevy::gltf::{Gltf, GltfMaterialName};
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;

/// Handles to the lamp model, kept to watch for load failures.
#[derive(Resource, Debug, Clone)]
pub struct LampModel {
    pub gltf: Handle<Gltf>,
    pub scene: Handle<Scene>,
}

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_room, spawn_lamp_model));
        app.add_systems(Update, report_model_load_failure);
    }
}

fn spawn_room(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<LampConfig>,
) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: config.lighting.ambient_brightness,
        ..default()
    });

    let surface = materials.add(StandardMaterial {
        base_color: config.rendering.surface_color.into(),
        perceptual_roughness: 0.4,
        metallic: 0.0,
        ..default()
    });

    commands.spawn((
        Name::new("Floor"),
        Mesh3d(meshes.add(Cuboid::new(2000.0, 0.1, 2000.0))),
        MeshMaterial3d(surface.clone()),
        Transform::from_xyz(0.0, -9.0, 0.0),
    ));

    commands.spawn((
        Name::new("Back Wall"),
        Mesh3d(meshes.add(Cuboid::new(0.1, 2000.0, 2000.0))),
        MeshMaterial3d(surface),
        Transform::from_xyz(-9.0, 0.0, 0.0),
    ));
}

fn spawn_lamp_model(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<LampConfig>,
) {
    let path = config.model.asset_path.clone();
    info!("Loading lamp model from {path}");

    let gltf = asset_server.load(path.clone());
    let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(path));

    commands
        .spawn((Name::new("Desk Lamp"), SceneRoot(scene.clone())))
        .observe(bind_lamp_fixtures);

    commands.insert_resource(LampModel { gltf, scene });
}

/// Finds the bulb meshes once the lamp scene has been spawned.
///
/// Only the first mesh per bulb material is used.
fn bind_lamp_fixtures(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    children: Query<&Children>,
    bulbs: Query<(&GltfMaterialName, &MeshMaterial3d<StandardMaterial>)>,
    config: Res<LampConfig>,
    mut ready: EventWriter<FixtureReady>,
) {
    let mut found = [false; 2];

    for entity in children.iter_descendants(trigger.target()) {
        let Ok((material_name, material)) = bulbs.get(entity) else {
            continue;
        };
        let Some(slot) = config.model.slot_for_material(&material_name.0) else {
            continue;
        };
        if found[slot.index()] {
            debug!("Ignoring extra mesh with bulb material {}", material_name.0);
            continue;
        }
        found[slot.index()] = true;

        let defaults = config.fixtures.for_slot(slot);
        let light = commands
            .spawn((
                Name::new(format!("Bulb {slot} Light")),
                PointLight {
                    color: defaults.light_color.into(),
                    intensity: defaults.intensity * config.lighting.lumens_per_unit,
                    range: config.lighting.light_range,
                    shadows_enabled: true,
                    ..default()
                },
                Transform::default(),
                ChildOf(entity),
            ))
            .id();

        ready.write(FixtureReady {
            slot,
            material: material.0.clone(),
            light,
        });
    }

    for slot in FixtureSlot::ALL {
        if !found[slot.index()] {
            let name = config.model.material_name(slot);
            warn!("Lamp model has no mesh using material {name}; bulb {slot} stays dark");
        }
    }
}

fn report_model_load_failure(
    asset_server: Res<AssetServer>,
    model: Option<Res<LampModel>>,
    mut reported: Local<bool>,
) {
    if *reported {
        return;
    }
    let Some(model) = model else {
        return;
    };

    if let Some(LoadState::Failed(e)) = asset_server.get_load_state(model.gltf.id()) {
        error!("Error loading lamp model: {e}");
        *reported = true;
    }
}
