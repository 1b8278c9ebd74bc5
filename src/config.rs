use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::WhiteboardResult;
use crate::export::DEFAULT_EXPORT_FILE_NAME;
use crate::tool::{self, ToolState};

/// Startup settings. Every field is optional in the JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old configs
pub struct WhiteboardConfig {
    /// Initial pen color, `#rrggbb`
    pub default_color: String,
    pub default_stroke_width: u8,
    pub export_file_name: String,
    /// Where native builds write exports
    pub export_dir: PathBuf,
    /// Fixed surface size; the canvas area at mount time when `None`
    pub surface_size: Option<[u32; 2]>,
}

impl Default for WhiteboardConfig {
    fn default() -> Self {
        Self {
            default_color: "#000000".to_owned(),
            default_stroke_width: 2,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_owned(),
            export_dir: PathBuf::from("."),
            surface_size: None,
        }
    }
}

impl WhiteboardConfig {
    /// Environment variable naming a JSON config file
    pub const ENV_VAR: &'static str = "WHITEBOARD_CONFIG";

    pub fn from_json_str(json: &str) -> WhiteboardResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> WhiteboardResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Read the file named by `WHITEBOARD_CONFIG`, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_env() -> Self {
        let Some(path) = std::env::var_os(Self::ENV_VAR) else {
            return Self::default();
        };
        let path = PathBuf::from(path);
        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("Ignoring config {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Tool state for a fresh session
    pub fn tool_state(&self) -> ToolState {
        let color = tool::parse_hex_color(&self.default_color).unwrap_or_else(|err| {
            log::warn!("{err}; using black");
            egui::Color32::BLACK
        });
        ToolState::new(color, self.default_stroke_width)
    }
}
