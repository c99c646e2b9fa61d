//! Camera plugin - Self-contained plugin pattern
//!
//! Spawns the HDR camera with bloom so that the emissive bulbs glow, and
//! attaches an orbit controller that keeps the lamp in frame by limiting how
//! far the view can zoom in or out.

use crate::config::LampConfig;
use bevy::core_pipeline::bloom::Bloom;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;
use bevy_panorbit_camera::PanOrbitCameraPlugin;
use bevy_panorbit_camera::TouchControls;
use bevy_panorbit_camera::TrackpadBehavior;

/// Plugin that handles camera setup and control
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PanOrbitCameraPlugin);
        app.add_systems(Startup, spawn_camera);
    }
}

fn spawn_camera(mut commands: Commands, config: Res<LampConfig>) {
    let rendering = &config.rendering;
    let distance = rendering
        .camera_distance
        .max(rendering.min_zoom_distance)
        .min(rendering.max_zoom_distance);

    commands.spawn((
        Name::new("Main Camera"),
        Camera {
            hdr: true,
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        Camera3d::default(),
        Tonemapping::AcesFitted,
        Bloom {
            intensity: rendering.bloom_intensity,
            ..Bloom::NATURAL
        },
        Msaa::Sample4,
        Transform::from_xyz(0.0, 0.0, distance).looking_at(Vec3::ZERO, Vec3::Y),
        PanOrbitCamera {
            focus: Vec3::ZERO,
            radius: Some(distance),
            zoom_lower_limit: rendering.min_zoom_distance,
            zoom_upper_limit: Some(rendering.max_zoom_distance),
            touch_enabled: true,
            touch_controls: TouchControls::OneFingerOrbit,
            trackpad_behavior: TrackpadBehavior::blender_default(),
            trackpad_pinch_to_zoom_enabled: true,
            ..default()
        },
    ));
}
