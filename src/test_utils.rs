//! Test utilities for plugin testing

use crate::events::FixtureReady;
use crate::lighting::FixtureSlot;
use bevy::prelude::*;

/// Creates a minimal headless app with the resources the lamp plugins need
pub fn create_test_app() -> App {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins,
        bevy::asset::AssetPlugin::default(),
        bevy::transform::TransformPlugin,
    ));

    app.init_asset::<bevy::render::mesh::Mesh>();
    app.init_asset::<bevy::pbr::StandardMaterial>();

    // Keyboard state is driven directly, without the input plugin clearing it
    app.init_resource::<ButtonInput<KeyCode>>();

    app
}

/// Adds a bulb material and a point light, then announces them as a fixture.
///
/// Returns the handles so tests can inspect what the lamp plugin wrote.
pub fn spawn_test_fixture(
    app: &mut App,
    slot: FixtureSlot,
) -> (Handle<StandardMaterial>, Entity) {
    let material = app
        .world_mut()
        .resource_mut::<Assets<StandardMaterial>>()
        .add(StandardMaterial::default());
    let light = app
        .world_mut()
        .spawn((Name::new(format!("Test {slot} Light")), PointLight::default()))
        .id();

    app.world_mut().send_event(FixtureReady {
        slot,
        material: material.clone(),
        light,
    });

    (material, light)
}

/// Helper to simulate a key press
pub fn press_key(app: &mut App, key: KeyCode) {
    let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    input.clear();
    input.press(key);
}

/// Helper to simulate a key release
pub fn release_key(app: &mut App, key: KeyCode) {
    let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    input.clear();
    input.release(key);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_app() {
        let app = create_test_app();
        assert!(app.world().contains_resource::<Time>());
        assert!(app.world().contains_resource::<ButtonInput<KeyCode>>());
        assert!(app.world().contains_resource::<Assets<StandardMaterial>>());
    }

    #[test]
    fn test_key_helpers() {
        let mut app = create_test_app();

        press_key(&mut app, KeyCode::KeyM);
        let input = app.world().resource::<ButtonInput<KeyCode>>();
        assert!(input.just_pressed(KeyCode::KeyM));

        release_key(&mut app, KeyCode::KeyM);
        let input = app.world().resource::<ButtonInput<KeyCode>>();
        assert!(!input.pressed(KeyCode::KeyM));
        assert!(!input.just_pressed(KeyCode::KeyM));
    }
}
