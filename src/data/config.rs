use crate::data::assets;
use crate::render::dominant_color::ExtractOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub theme: String,
    pub ui_fps: u32,

    #[serde(default)]
    pub transparent_background: bool,

    #[serde(default = "default_show_console")]
    pub show_console: bool,

    // Console inputs prefilled on startup.
    #[serde(default)]
    pub default_mood: String,
    #[serde(default = "default_theme_word")]
    pub default_theme_word: String,

    /// Extraction tuning; unset means the built-in defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract: Option<ExtractOptions>,
}

fn default_show_console() -> bool {
    true
}

fn default_theme_word() -> String {
    "种宠物之家温馨感".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "mocha".to_string(),
            ui_fps: 30,
            transparent_background: false,
            show_console: default_show_console(),
            default_mood: String::new(),
            default_theme_word: default_theme_word(),
            extract: None,
        }
    }
}

impl Config {
    pub fn load_or_default() -> Result<Self> {
        let _ = assets::ensure_assets_ready();
        Self::load_from(&assets::resolve_config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Ok(toml::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("ignoring malformed config {}: {e}", path.display());
            Self::default()
        }))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&assets::resolve_config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let raw = toml::to_string_pretty(self)?;
        fs::write(path, raw).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config/default.toml");
        let mut cfg = Config::default();
        cfg.theme = "latte".into();
        cfg.default_mood = "复古".into();
        cfg.extract = Some(ExtractOptions {
            min_distance: 64.0,
            ..ExtractOptions::default()
        });
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.toml");
        fs::write(&path, "theme = \"frappe\"\nui_fps = 60\n[extract]\nmax_dim = 64\n").unwrap();
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.theme, "frappe");
        assert!(cfg.show_console);
        let extract = cfg.extract.unwrap();
        assert_eq!(extract.max_dim, 64);
        assert_eq!(extract.alpha_cutoff, 128);
        assert_eq!(cfg.default_theme_word, "种宠物之家温馨感");
    }

    #[test]
    fn garbage_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.toml");
        fs::write(&path, "this is = = not toml").unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn shipped_default_config_parses() {
        let cfg: Config = toml::from_str(assets::DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(cfg.extract, None);
    }

    #[test]
    fn unset_extract_is_not_written_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.toml");
        Config::default().save_to(&path).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("[extract]"));
        assert_eq!(Config::load_from(&path).unwrap().extract, None);
    }
}
