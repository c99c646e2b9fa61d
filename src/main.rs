use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use clap::Parser;
use desklamp::cli::{self, Args};
use desklamp::{CameraPlugin, ControlsPlugin, HudPlugin, LampPlugin, ScenePlugin};

fn main() -> AppExit {
    let args = Args::parse();

    let config = match cli::load_and_apply_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return AppExit::error();
        }
    };

    if args.print_config {
        return match config.to_toml() {
            Ok(toml_string) => {
                println!("{toml_string}");
                AppExit::Success
            }
            Err(e) => {
                eprintln!("Error: failed to serialize configuration: {e}");
                AppExit::error()
            }
        };
    }

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    level: log_level,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Desk Lamp".to_string(),
                        fit_canvas_to_parent: true,
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins((
            LampPlugin::with_config(config),
            ScenePlugin,
            CameraPlugin,
            ControlsPlugin,
            HudPlugin,
        ))
        .run()
}
