//! Lamp HUD (Heads-Up Display) module.
//!
//! A small text overlay in the top-left corner showing the operating mode,
//! the bulb the keyboard is steering, and for each bulb the color, the
//! temperature slider reading and the raw intensity. The text is rebuilt
//! only when the controller or the selection changes.

use crate::lighting::{FixtureSlot, OperatingMode};
use crate::plugins::controls::ControlsState;
use crate::plugins::controls::constants::KEY_HELP;
use crate::plugins::lamp::LampController;
use bevy::prelude::*;

const HUD_FONT_SIZE: f32 = 13.0;

#[derive(Component, Copy, Clone, Default, PartialEq, Debug)]
struct LampHudText;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud);
        app.add_systems(Update, refresh_hud);
    }
}

fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Name::new("Lamp HUD"),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(5.0),
                left: Val::Px(5.0),
                padding: UiRect::all(Val::Px(5.0)),
                ..default()
            },
            BorderRadius::all(Val::Px(5.0)),
            BackgroundColor(Color::srgba(0.2, 0.2, 0.2, 0.7)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont::from_font_size(HUD_FONT_SIZE),
                TextColor(Color::WHITE),
                LampHudText,
            ));
        });
}

fn refresh_hud(
    controller: Res<LampController>,
    controls: Option<Res<ControlsState>>,
    mut texts: Query<&mut Text, With<LampHudText>>,
    mut initialized: Local<bool>,
) {
    let controls_changed = controls.as_ref().is_some_and(|c| c.is_changed());
    if *initialized && !controller.is_changed() && !controls_changed {
        return;
    }
    *initialized = true;

    let selected = controls.map(|c| c.selected);
    let content = hud_text(&controller, selected);
    for mut text in &mut texts {
        text.0.clone_from(&content);
    }
}

fn hud_text(controller: &LampController, selected: Option<FixtureSlot>) -> String {
    let mut out = format!("Mode: {}\n", mode_name(controller.mode()));

    for slot in FixtureSlot::ALL {
        let marker = if selected == Some(slot) { '>' } else { ' ' };
        let state = controller.slot(slot);
        let line = match state.output() {
            Some(output) => format!(
                "{marker} {slot}  {}  {}K  x{:.2}\n",
                output.emissive_color,
                state.slider_kelvin(),
                state.raw_intensity()
            ),
            None => format!("{marker} {slot}  waiting for model\n"),
        };
        out.push_str(&line);
    }

    out.push_str(KEY_HELP);
    out
}

fn mode_name(mode: OperatingMode) -> &'static str {
    match mode {
        OperatingMode::Rgb => "RGB",
        OperatingMode::Incandescent => "Incandescent",
    }
}
