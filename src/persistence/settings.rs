use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Editor settings persisted between runs as JSON in a per-user config
/// directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorSettings {
    // If None, use OS default autosave directory
    pub autosave_override: Option<PathBuf>,
    // Dragging defaults
    #[serde(default)]
    pub snap_to_grid: bool,
    #[serde(default = "EditorSettings::default_grid_spacing")]
    pub grid_spacing: f32,
    #[serde(default = "EditorSettings::default_node_radius")]
    pub default_node_radius: f32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            autosave_override: None,
            snap_to_grid: false,
            grid_spacing: Self::default_grid_spacing(),
            default_node_radius: Self::default_node_radius(),
        }
    }
}

impl EditorSettings {
    fn config_dir() -> PathBuf {
        // Cross-platform user config dir
        #[cfg(target_os = "macos")]
        {
            let home = std::env::var_os("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("~"));
            return home
                .join("Library")
                .join("Application Support")
                .join("fsmedit");
        }
        #[cfg(target_os = "windows")]
        {
            if let Ok(appdata) = std::env::var("APPDATA") {
                return PathBuf::from(appdata).join("fsmedit");
            }
            return PathBuf::from("fsmedit");
        }
        #[cfg(all(unix, not(target_os = "macos")))]
        {
            // $XDG_CONFIG_HOME/fsmedit or ~/.config/fsmedit
            if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
                return PathBuf::from(xdg).join("fsmedit");
            }
            let home = std::env::var_os("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("~"));
            return home.join(".config").join("fsmedit");
        }
    }

    fn autosave_default_dir() -> PathBuf {
        // $XDG_STATE_HOME-style state dir where available, OS temp
        // otherwise.
        #[cfg(all(unix, not(target_os = "macos")))]
        {
            if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
                return PathBuf::from(xdg).join("fsmedit");
            }
            if let Ok(home) = std::env::var("HOME") {
                return PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join("fsmedit");
            }
        }
        let mut p = std::env::temp_dir();
        p.push("fsmedit");
        p
    }

    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_dir().join("settings.json");
        if path.exists() {
            let mut f = fs::File::open(path)?;
            let mut s = String::new();
            f.read_to_string(&mut s)?;
            let v: Self = serde_json::from_str(&s)?;
            return Ok(v);
        }
        Ok(Self::default())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;
        let path = dir.join("settings.json");
        let s = serde_json::to_string_pretty(self)?;
        let mut f = fs::File::create(path)?;
        f.write_all(s.as_bytes())?;
        Ok(())
    }

    /// Return the directory where settings.json is stored.
    pub fn settings_dir() -> PathBuf {
        Self::config_dir()
    }

    /// Effective autosave directory honoring the user override.
    pub fn autosave_dir(&self) -> PathBuf {
        if let Some(p) = &self.autosave_override {
            return p.clone();
        }
        Self::autosave_default_dir()
    }

    fn default_grid_spacing() -> f32 {
        crate::graph_utils::geometry::GRID_SPACING
    }

    fn default_node_radius() -> f32 {
        crate::graph_utils::graph::DEFAULT_NODE_RADIUS
    }
}
