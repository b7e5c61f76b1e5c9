use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global configuration (stored in ~/.config/taskboard/)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Where the initial board data comes from
    #[serde(default)]
    pub service: ServiceConfig,

    /// Log file settings
    #[serde(default)]
    pub log: LogConfig,

    /// UI theme/colors
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// Backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Artificial delay applied to each fetch, in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// JSON file with `tasks` and `columns`; built-in sample data when unset
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            seed_file: None,
        }
    }
}

fn default_delay_ms() -> u64 {
    1000
}

/// Logging settings. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of plain text
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Theme configuration with hex colors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Border color for the selected column and card (hex, e.g. "#FFFF00")
    #[serde(default = "default_color_selected")]
    pub color_selected: String,

    /// Border color for unselected elements
    #[serde(default = "default_color_normal")]
    pub color_normal: String,

    /// Color for dimmed/inactive elements, disabled arrows and the loading skeleton
    #[serde(default = "default_color_dimmed")]
    pub color_dimmed: String,

    /// Text color for task titles
    #[serde(default = "default_color_text")]
    pub color_text: String,

    /// Color for column headers when not selected
    #[serde(default = "default_color_column_header")]
    pub color_column_header: String,

    /// Color of an enabled "move left" arrow
    #[serde(default = "default_color_move_left")]
    pub color_move_left: String,

    /// Color of an enabled "move right" arrow
    #[serde(default = "default_color_move_right")]
    pub color_move_right: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            color_selected: default_color_selected(),
            color_normal: default_color_normal(),
            color_dimmed: default_color_dimmed(),
            color_text: default_color_text(),
            color_column_header: default_color_column_header(),
            color_move_left: default_color_move_left(),
            color_move_right: default_color_move_right(),
        }
    }
}

fn default_color_selected() -> String {
    "#ead49a".to_string() // Yellow
}

fn default_color_normal() -> String {
    "#5cfff7".to_string() // Cyan
}

fn default_color_dimmed() -> String {
    "#9C9991".to_string() // Dark Gray
}

fn default_color_text() -> String {
    "#f2ece6".to_string() // Light Rose
}

fn default_color_column_header() -> String {
    "#a0d2fa".to_string() // Light Blue Gray
}

fn default_color_move_left() -> String {
    "#ef4444".to_string() // Red
}

fn default_color_move_right() -> String {
    "#16a34a".to_string() // Green
}

impl ThemeConfig {
    /// Parse a hex color string to RGB tuple
    pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }
}

impl GlobalConfig {
    /// Load global config from default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from a specific file; a missing file yields defaults
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            toml::from_str(&content).context("Failed to parse global config")
        } else {
            Ok(Self::default())
        }
    }

    /// Get the path to the global config file
    /// Always uses ~/.config/taskboard/ on all platforms
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").context("Could not determine home directory")?;
        Ok(PathBuf::from(home).join(".config").join("taskboard").join("config.toml"))
    }

    /// Get the path to the global data directory
    pub fn data_dir() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "taskboard")
            .context("Could not determine data directory")?;
        Ok(dirs.data_dir().to_path_buf())
    }
}
