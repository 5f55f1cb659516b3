use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::ShellError;
use crate::surface::SurfaceSettings;

/// Shell preferences, persisted to `<config dir>/datve/settings.json`.
///
/// Window state, keybinding overrides and the browser surface flags live
/// here. The target site is fixed and site data is owned by the web engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window_width: i32,
    pub window_height: i32,
    pub maximized: bool,
    /// Keybinding id -> display accelerator, e.g. `"go_back" -> "Alt+Left"`.
    pub keybinding_overrides: HashMap<String, String>,
    pub surface: SurfaceSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            window_width: 420,
            window_height: 860,
            maximized: false,
            keybinding_overrides: HashMap::new(),
            surface: SurfaceSettings::default(),
        }
    }
}

pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("datve").join("settings.json"))
}

/// Load settings from the default location, falling back to defaults.
pub fn load() -> Settings {
    match settings_path() {
        Some(path) => load_from(&path),
        None => Settings::default(),
    }
}

/// A missing or unreadable file yields defaults; it is never an error.
pub fn load_from(path: &Path) -> Settings {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Failed to read {}: {}", path.display(), e);
            }
            return Settings::default();
        }
    };
    serde_json::from_str(&contents).unwrap_or_else(|e| {
        log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
        Settings::default()
    })
}

pub fn save(settings: &Settings) -> Result<(), ShellError> {
    match settings_path() {
        Some(path) => save_to(settings, &path),
        None => {
            log::warn!("No config directory; settings not saved");
            Ok(())
        }
    }
}

pub fn save_to(settings: &Settings, path: &Path) -> Result<(), ShellError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ShellError::Settings {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, json).map_err(|source| ShellError::Settings {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::CacheMode;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s = load_from(&dir.path().join("nope.json"));
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_from(&path), Settings::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "window_width": 1024 }"#).unwrap();
        let s = load_from(&path);
        assert_eq!(s.window_width, 1024);
        assert_eq!(s.window_height, Settings::default().window_height);
        assert!(s.keybinding_overrides.is_empty());
        assert_eq!(s.surface, SurfaceSettings::default());
    }

    #[test]
    fn surface_flags_read_from_camel_case_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{ "surface": { "cacheMode": "networkOnly", "scriptExecutionEnabled": false } }"#,
        )
        .unwrap();
        let s = load_from(&path);
        assert_eq!(s.surface.cache_mode, CacheMode::NetworkOnly);
        assert!(!s.surface.script_execution_enabled);
        // unspecified flags keep their defaults
        assert!(s.surface.local_storage_enabled);
        assert!(s.surface.viewport_adaptive_layout);
    }

    #[test]
    fn save_creates_parent_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("datve").join("settings.json");
        let mut s = Settings::default();
        s.maximized = true;
        s.keybinding_overrides
            .insert("go_back".to_string(), "Ctrl+B".to_string());
        s.surface.cache_mode = CacheMode::Default;
        s.surface.structured_storage_enabled = false;
        save_to(&s, &path).unwrap();
        assert_eq!(load_from(&path), s);
    }
}
