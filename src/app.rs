use adw::Application;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use directories::BaseDirs;

pub const URL_ENV: &str = "MONITOR_DASHBOARD_URL";
const DEFAULT_DEBOUNCE_MS: u64 = 300;

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppState {
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_debounce_ms")]
    pub search_debounce_ms: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            search_debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    fn toml_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("monitor-dashboard.toml"))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty()
    }

    /// Reads the saved settings, falling back to defaults; the URL can be
    /// overridden from the environment.
    pub fn load() -> Self {
        let mut state = Self::toml_path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default();
        if let Ok(url) = std::env::var(URL_ENV) {
            state.apply_url_override(&url);
        }
        state
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => toml::from_str::<AppState>(&text).unwrap_or_else(|e| {
                log::warn!("ignoring unreadable settings in {}: {e}", path.display());
                Self::new()
            }),
            Err(_) => Self::new(),
        }
    }

    fn apply_url_override(&mut self, url: &str) {
        if !url.trim().is_empty() {
            self.base_url = crate::utils::normalize_url(url);
        }
    }

    pub fn save(&self) -> std::io::Result<()> {
        if let Some(path) = Self::toml_path() {
            self.save_to(&path)
        } else {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "No config dir"))
        }
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() { let _ = fs::create_dir_all(parent); }
        let toml = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
        fs::write(path, toml)
    }
}

pub fn build_ui(app: &Application) {
    let state = AppState::load();
    if state.is_configured() {
        crate::ui::main_window::show_main_window(app, state);
    } else {
        crate::ui::connect::show_connect_window(app, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::load_from(&dir.path().join("absent.toml"));
        assert_eq!(state, AppState::default());
        assert_eq!(state.debounce(), Duration::from_millis(300));
        assert!(!state.is_configured());
    }

    #[test]
    fn saved_settings_are_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let state = AppState {
            base_url: "http://192.168.1.20:5000".into(),
            search_debounce_ms: 150,
        };
        state.save_to(&path).unwrap();
        assert_eq!(AppState::load_from(&path), state);
    }

    #[test]
    fn partial_file_fills_in_debounce() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "base_url = \"https://dash.lan\"\n").unwrap();
        let state = AppState::load_from(&path);
        assert_eq!(state.base_url, "https://dash.lan");
        assert_eq!(state.search_debounce_ms, 300);
    }

    #[test]
    fn garbage_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "base_url = [").unwrap();
        assert_eq!(AppState::load_from(&path), AppState::default());
    }

    #[test]
    fn url_override_is_normalised_and_blank_is_ignored() {
        let mut state = AppState::new();
        state.apply_url_override("   ");
        assert!(!state.is_configured());
        state.apply_url_override("dash.lan:5000");
        assert_eq!(state.base_url, "https://dash.lan:5000");
    }
}
