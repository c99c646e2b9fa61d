//! Application configuration.
//!
//! Settings are layered: built-in defaults, then a TOML file (the user's
//! config directory or an explicit path), then `DESKLAMP__SECTION__KEY`
//! environment variables. Anything that fails to load falls back to the
//! defaults with a warning so the scene always starts.

use crate::lighting::controller::DEFAULT_INCANDESCENT_INTENSITY_SCALE;
use crate::lighting::{FixtureDefaults, FixtureSlot, KelvinScale, OperatingMode};
use crate::utils::color::LampColor;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";
const ENV_PREFIX: &str = "DESKLAMP";

#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct LampConfig {
    pub model: ModelConfig,
    pub lighting: LightingConfig,
    pub fixtures: FixturesConfig,
    pub rendering: RenderingConfig,
    pub controls: ControlsConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    /// Asset path of the lamp glTF file
    pub asset_path: String,
    pub b1_material_name: String,
    pub b2_material_name: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            asset_path: "models/DeskLampComp.glb".to_string(),
            b1_material_name: "Mat_B1".to_string(),
            b2_material_name: "Mat_B2".to_string(),
        }
    }
}

impl ModelConfig {
    #[must_use]
    pub fn material_name(&self, slot: FixtureSlot) -> &str {
        match slot {
            FixtureSlot::B1 => &self.b1_material_name,
            FixtureSlot::B2 => &self.b2_material_name,
        }
    }

    /// Resolves a glTF material name to the bulb it belongs to.
    #[must_use]
    pub fn slot_for_material(&self, material_name: &str) -> Option<FixtureSlot> {
        if material_name == self.b1_material_name {
            Some(FixtureSlot::B1)
        } else if material_name == self.b2_material_name {
            Some(FixtureSlot::B2)
        } else {
            None
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LightingConfig {
    pub initial_mode: OperatingMode,
    pub incandescent_intensity_scale: f32,
    pub initial_slider_position: f32,
    /// Point light lumens per unit of bulb intensity
    pub lumens_per_unit: f32,
    pub light_range: f32,
    pub ambient_brightness: f32,
    pub temperature_scale: KelvinScale,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            initial_mode: OperatingMode::Rgb,
            incandescent_intensity_scale: DEFAULT_INCANDESCENT_INTENSITY_SCALE,
            initial_slider_position: 0.0,
            lumens_per_unit: 20_000.0,
            light_range: 50.0,
            ambient_brightness: 80.0,
            temperature_scale: KelvinScale::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FixturesConfig {
    pub b1: FixtureDefaults,
    pub b2: FixtureDefaults,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            b1: FixtureDefaults::B1,
            b2: FixtureDefaults::B2,
        }
    }
}

impl FixturesConfig {
    #[must_use]
    pub fn for_slot(&self, slot: FixtureSlot) -> FixtureDefaults {
        match slot {
            FixtureSlot::B1 => self.b1,
            FixtureSlot::B2 => self.b2,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RenderingConfig {
    pub bloom_intensity: f32,
    pub camera_distance: f32,
    pub min_zoom_distance: f32,
    pub max_zoom_distance: f32,
    pub surface_color: LampColor,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            bloom_intensity: 0.3,
            camera_distance: 8.0,
            min_zoom_distance: 4.0,
            max_zoom_distance: 8.0,
            surface_color: LampColor::from_u32(0xFFFFF0),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ControlsConfig {
    pub intensity_step: f32,
    pub temperature_step: f32,
    pub palette: Vec<LampColor>,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            intensity_step: 0.25,
            temperature_step: 5.0,
            palette: vec![
                LampColor::from_u32(0xFF0005),
                LampColor::from_u32(0xFF8C00),
                LampColor::from_u32(0xFFE600),
                LampColor::from_u32(0x00FF00),
                LampColor::from_u32(0x00E5FF),
                LampColor::from_u32(0x1E64FF),
                LampColor::from_u32(0xB400FF),
                LampColor::WHITE,
            ],
        }
    }
}

impl LampConfig {
    /// Location of the per-user config file, if the platform has one.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            directories::ProjectDirs::from("", "", "desklamp")
                .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
        }
        #[cfg(target_arch = "wasm32")]
        {
            None
        }
    }

    /// Layers defaults, an optional TOML file and environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let mut builder =
            ::config::Config::builder().add_source(::config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(
                ::config::File::from(path)
                    .format(::config::FileFormat::Toml)
                    .required(false),
            );
        }

        builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a file, falling back to defaults if it can't be read
    pub fn load_or_default(path: &str) -> Self {
        let path = Path::new(path);
        if !path.exists() {
            info!("Config file {} not found. Using defaults.", path.display());
        }

        match Self::load(Some(path)) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config file {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Load configuration from the user config directory, or defaults
    pub fn load_from_user_config() -> Self {
        match Self::user_config_path() {
            Some(path) => Self::load_or_default(&path.to_string_lossy()),
            None => Self::default(),
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The effective configuration as TOML, for logging.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lighting::KelvinStop;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = LampConfig::default();
        let text = config.to_toml().unwrap();
        let parsed: LampConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
        assert!(text.contains("#FFDAB3"));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let parsed: LampConfig = toml::from_str(
            r##"
            [lighting]
            initial_mode = "incandescent"
            incandescent_intensity_scale = 0.5

            [fixtures.b1]
            emissive_color = "#00FF00"
            light_color = "#00FF00"
            intensity = 2.0
            "##,
        )
        .unwrap();

        assert_eq!(parsed.lighting.initial_mode, OperatingMode::Incandescent);
        assert_eq!(parsed.lighting.incandescent_intensity_scale, 0.5);
        assert_eq!(
            parsed.fixtures.b1.emissive_color,
            LampColor::from_u32(0x00FF00)
        );
        assert_eq!(parsed.fixtures.b2, FixtureDefaults::B2);
        assert_eq!(parsed.model, ModelConfig::default());
    }

    #[test]
    fn test_invalid_temperature_scale_is_rejected() {
        let result: Result<LampConfig, _> = toml::from_str(
            r##"
            [[lighting.temperature_scale]]
            position = 0.0
            color = "#FFDAB3"
            kelvin = 2700

            [[lighting.temperature_scale]]
            position = 60.0
            color = "#D6E4FF"
            kelvin = 6500
            "##,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_temperature_scale() {
        let parsed: LampConfig = toml::from_str(
            r##"
            [[lighting.temperature_scale]]
            position = 0.0
            color = "#FF9329"
            kelvin = 1900

            [[lighting.temperature_scale]]
            position = 100.0
            color = "#FFFFFF"
            kelvin = 5500
            "##,
        )
        .unwrap();

        assert_eq!(
            parsed.lighting.temperature_scale.stops(),
            &[
                KelvinStop::new(0.0, LampColor::from_u32(0xFF9329), 1900),
                KelvinStop::new(100.0, LampColor::WHITE, 5500),
            ]
        );
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let result: Result<LampConfig, _> = toml::from_str(
            r##"
            [rendering]
            surface_color = "ivory"
            "##,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_material_names_resolve_to_slots() {
        let model = ModelConfig::default();
        assert_eq!(model.slot_for_material("Mat_B1"), Some(FixtureSlot::B1));
        assert_eq!(model.slot_for_material("Mat_B2"), Some(FixtureSlot::B2));
        assert_eq!(model.slot_for_material("Mat_Base"), None);
        for slot in FixtureSlot::ALL {
            assert_eq!(model.slot_for_material(model.material_name(slot)), Some(slot));
        }
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let config = LampConfig::load_or_default("/nonexistent/desklamp/config.toml");
        assert_eq!(config.model, ModelConfig::default());
        assert_eq!(config.fixtures, FixturesConfig::default());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("desklamp-config-{}", std::process::id()));
        let path = dir.join(CONFIG_FILE_NAME);

        let mut config = LampConfig::default();
        config.controls.intensity_step = 0.5;
        config.model.asset_path = "models/OtherLamp.glb".to_string();
        config.save(&path).unwrap();

        let loaded = LampConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(loaded.controls.intensity_step, 0.5);
        assert_eq!(loaded.model.asset_path, "models/OtherLamp.glb");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_environment_overrides_file_and_defaults() {
        let dir = std::env::temp_dir().join(format!("desklamp-env-{}", std::process::id()));
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "[rendering]\ncamera_distance = 10.0\n").unwrap();

        let from_file = LampConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(from_file.rendering.camera_distance, 10.0);

        // SAFETY: no other test reads or writes this variable
        unsafe { std::env::set_var("DESKLAMP__RENDERING__CAMERA_DISTANCE", "12.5") };
        let with_file = LampConfig::load(Some(path.as_path()));
        let without_file = LampConfig::load(None);
        unsafe { std::env::remove_var("DESKLAMP__RENDERING__CAMERA_DISTANCE") };

        assert_eq!(with_file.unwrap().rendering.camera_distance, 12.5);
        let without_file = without_file.unwrap();
        assert_eq!(without_file.rendering.camera_distance, 12.5);
        assert_eq!(
            without_file.rendering.bloom_intensity,
            RenderingConfig::default().bloom_intensity
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
