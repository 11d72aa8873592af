use anyhow::{Context, Result};
use directories::BaseDirs;
use std::fs;
use std::path::{Path, PathBuf};

const ENV_ASSET_DIR: &str = "PALETTE_STUDIO_ASSET_DIR";
const APP_DIR: &str = "palette-studio";

pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../config/default.toml");

pub const THEME_SYSTEM_TOML: &str = include_str!("../../themes/system.toml");
pub const THEME_LATTE_TOML: &str = include_str!("../../themes/catppuccin_latte.toml");
pub const THEME_FRAPPE_TOML: &str = include_str!("../../themes/catppuccin_frappe.toml");
pub const THEME_MACCHIATO_TOML: &str = include_str!("../../themes/catppuccin_macchiato.toml");
pub const THEME_MOCHA_TOML: &str = include_str!("../../themes/catppuccin_mocha.toml");

const THEME_FILES: &[(&str, &str)] = &[
    ("themes/system.toml", THEME_SYSTEM_TOML),
    ("themes/catppuccin_latte.toml", THEME_LATTE_TOML),
    ("themes/catppuccin_frappe.toml", THEME_FRAPPE_TOML),
    ("themes/catppuccin_macchiato.toml", THEME_MACCHIATO_TOML),
    ("themes/catppuccin_mocha.toml", THEME_MOCHA_TOML),
];

pub fn resolve_asset_root() -> PathBuf {
    if let Some(p) = std::env::var_os(ENV_ASSET_DIR) {
        return PathBuf::from(p);
    }

    // Linux: $XDG_CONFIG_HOME/palette-studio
    // macOS: ~/Library/Application Support/palette-studio
    // Windows: %APPDATA%\palette-studio
    if let Some(sys) = system_config_root() {
        return sys;
    }

    // Only when the OS config directory cannot be determined.
    local_config_root()
}

pub fn resolve_asset_path(rel: &Path) -> PathBuf {
    resolve_asset_root().join(rel)
}

pub fn resolve_config_path() -> PathBuf {
    resolve_asset_path(Path::new("config/default.toml"))
}

pub fn ensure_assets_ready() -> Result<PathBuf> {
    let root = resolve_asset_root();
    ensure_all_assets(&root)?;
    Ok(root)
}

/// Embedded copy of a theme file, used when the on-disk one is unreadable.
pub fn embedded_asset(rel: &Path) -> Option<&'static str> {
    if rel == Path::new("config/default.toml") {
        return Some(DEFAULT_CONFIG_TOML);
    }
    THEME_FILES
        .iter()
        .find(|(p, _)| Path::new(p) == rel)
        .map(|(_, raw)| *raw)
}

fn system_config_root() -> Option<PathBuf> {
    BaseDirs::new().map(|d| d.config_dir().join(APP_DIR))
}

fn local_config_root() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".config")
        .join(APP_DIR)
}

pub fn ensure_all_assets(root: &Path) -> Result<()> {
    // Create:
    //   <root>/config/default.toml
    //   <root>/themes/*.toml
    ensure_dir(&root.join("config"))?;
    ensure_dir(&root.join("themes"))?;

    write_if_missing(&root.join("config/default.toml"), DEFAULT_CONFIG_TOML)?;
    for (rel, raw) in THEME_FILES {
        write_if_missing(&root.join(rel), raw)?;
    }

    Ok(())
}

fn ensure_dir(p: &Path) -> Result<()> {
    fs::create_dir_all(p).with_context(|| format!("mkdir {}", p.display()))
}

fn write_if_missing(path: &Path, contents: &str) -> Result<()> {
    if path.is_file() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_every_asset_once() {
        let dir = tempfile::tempdir().unwrap();
        ensure_all_assets(dir.path()).unwrap();
        assert!(dir.path().join("config/default.toml").is_file());
        for (rel, _) in THEME_FILES {
            assert!(dir.path().join(rel).is_file(), "{rel}");
        }
    }

    #[test]
    fn existing_files_are_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("config/default.toml");
        fs::create_dir_all(cfg.parent().unwrap()).unwrap();
        fs::write(&cfg, "theme = \"latte\"\nui_fps = 60\n").unwrap();
        ensure_all_assets(dir.path()).unwrap();
        assert_eq!(fs::read_to_string(&cfg).unwrap(), "theme = \"latte\"\nui_fps = 60\n");
    }

    #[test]
    fn embedded_lookup() {
        assert!(embedded_asset(Path::new("themes/catppuccin_mocha.toml")).is_some());
        assert!(embedded_asset(Path::new("themes/unknown.toml")).is_none());
    }
}
