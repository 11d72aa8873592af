use crate::data::assets;
use crate::palette::color::Color;
use crate::ui::theme::{detect_color_capability, Theme, ThemeName, ThemePalette};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

pub struct ThemeLoader;

#[derive(Debug, Deserialize)]
struct ThemeToml {
    #[allow(dead_code)]
    name: String,
    text: Color,
    subtext: Color,
    base: Color,
    surface: Color,
    accent: Color,
    accent2: Color,
    accent3: Color,
}

impl ThemeLoader {
    pub fn load(name: &str) -> Result<Theme> {
        let _ = assets::ensure_assets_ready();
        let name = ThemeName::from_str_or_system(name);
        let rel = theme_file(name);

        let path = assets::resolve_asset_path(&rel);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("theme {} unreadable ({e}); using built-in copy", path.display());
                assets::embedded_asset(&rel).unwrap_or_default().to_string()
            }
        };
        let palette = parse_palette(&raw).with_context(|| format!("parse {}", path.display()))?;
        Ok(Theme {
            name,
            palette,
            capability: detect_color_capability(),
        })
    }
}

fn theme_file(name: ThemeName) -> PathBuf {
    match name {
        ThemeName::System => PathBuf::from("themes/system.toml"),
        ThemeName::Latte => PathBuf::from("themes/catppuccin_latte.toml"),
        ThemeName::Frappe => PathBuf::from("themes/catppuccin_frappe.toml"),
        ThemeName::Macchiato => PathBuf::from("themes/catppuccin_macchiato.toml"),
        ThemeName::Mocha => PathBuf::from("themes/catppuccin_mocha.toml"),
    }
}

fn parse_palette(raw: &str) -> Result<ThemePalette> {
    let t: ThemeToml = toml::from_str(raw)?;
    Ok(ThemePalette {
        text: t.text.rgb(),
        subtext: t.subtext.rgb(),
        base: t.base.rgb(),
        surface: t.surface.rgb(),
        accent: t.accent.rgb(),
        accent2: t.accent2.rgb(),
        accent3: t.accent3.rgb(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_shipped_themes_parse() {
        for raw in [
            assets::THEME_SYSTEM_TOML,
            assets::THEME_LATTE_TOML,
            assets::THEME_FRAPPE_TOML,
            assets::THEME_MACCHIATO_TOML,
            assets::THEME_MOCHA_TOML,
        ] {
            parse_palette(raw).unwrap();
        }
    }

    #[test]
    fn mocha_base_color() {
        let p = parse_palette(assets::THEME_MOCHA_TOML).unwrap();
        assert_eq!(p.base, (0x1e, 0x1e, 0x2e));
    }

    #[test]
    fn malformed_hex_is_an_error_not_white() {
        let raw = assets::THEME_MOCHA_TOML.replace("#cba6f7", "#cba6");
        assert!(parse_palette(&raw).is_err());
    }
}
