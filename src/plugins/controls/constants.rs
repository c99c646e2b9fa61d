//! Key bindings for the lamp controls

use bevy::prelude::KeyCode;

pub const SELECT_OTHER_SLOT_KEY: KeyCode = KeyCode::Tab;
pub const TOGGLE_MODE_KEY: KeyCode = KeyCode::KeyM;
pub const CYCLE_COLOR_KEY: KeyCode = KeyCode::KeyC;
pub const INTENSITY_UP_KEY: KeyCode = KeyCode::ArrowUp;
pub const INTENSITY_DOWN_KEY: KeyCode = KeyCode::ArrowDown;
pub const WARMER_KEY: KeyCode = KeyCode::ArrowLeft;
pub const COOLER_KEY: KeyCode = KeyCode::ArrowRight;

#[cfg(not(target_arch = "wasm32"))]
pub const QUIT_KEYS: [KeyCode; 2] = [KeyCode::Escape, KeyCode::KeyQ];

/// Shown in the HUD, one binding per line.
pub const KEY_HELP: &str = "Tab: switch bulb | M: mode | C: color\nUp/Down: intensity | Left/Right: temperature";
