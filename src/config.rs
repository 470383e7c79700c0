//! Bootstrap configuration: where the asset files live.
//!
//! Loads from TOML with every field defaulted, so a partial config file
//! (e.g. only overriding `shader_dir`) works.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Paths to every input the bootstrap consumes.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Splash/logo texture shown while the session starts.
    pub logo_texture: PathBuf,
    /// Player-colored UI texture.
    pub ui_texture: PathBuf,
    /// Tabular terrain-type metadata file.
    pub terrain_meta: PathBuf,
    /// Tabular blending-mode metadata file.
    pub blending_meta: PathBuf,
    /// Player-color palette file (`index=r,g,b,a` lines).
    pub player_palette: PathBuf,
    /// Directory holding the five shader source files.
    pub shader_dir: PathBuf,
    /// Directory terrain/blending texture refs are resolved against.
    pub texture_dir: PathBuf,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            logo_texture: PathBuf::from("assets/logo.png"),
            ui_texture: PathBuf::from("assets/ui.png"),
            terrain_meta: PathBuf::from("assets/terrain_meta.csv"),
            blending_meta: PathBuf::from("assets/blending_meta.csv"),
            player_palette: PathBuf::from("assets/player_palette.pal"),
            shader_dir: PathBuf::from("assets/shaders"),
            texture_dir: PathBuf::from("assets"),
        }
    }
}

impl BootstrapConfig {
    /// Load a config file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// I/O failure or a TOML parse error, tagged with the path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_overrides_only_named_fields() {
        let config: BootstrapConfig =
            toml::from_str("shader_dir = \"data/glsl\"").unwrap();
        assert_eq!(config.shader_dir, PathBuf::from("data/glsl"));
        assert_eq!(config.terrain_meta, BootstrapConfig::default().terrain_meta);
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config: BootstrapConfig = toml::from_str("").unwrap();
        assert_eq!(config, BootstrapConfig::default());
    }
}
