use crate::palette::Color as Rgb;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCapability {
    TrueColor,
    Ansi256,
    NoColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeName {
    System,
    Latte,
    Frappe,
    Macchiato,
    Mocha,
}

impl ThemeName {
    pub fn from_str_or_system(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "latte" => Self::Latte,
            "frappe" => Self::Frappe,
            "macchiato" => Self::Macchiato,
            "mocha" => Self::Mocha,
            _ => Self::System,
        }
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            ThemeName::System => "System",
            ThemeName::Latte => "Latte",
            ThemeName::Frappe => "Frappe",
            ThemeName::Macchiato => "Macchiato",
            ThemeName::Mocha => "Mocha",
        }
    }

    /// Value stored in the config file.
    pub fn as_config_key(&self) -> &'static str {
        match self {
            ThemeName::System => "system",
            ThemeName::Latte => "latte",
            ThemeName::Frappe => "frappe",
            ThemeName::Macchiato => "macchiato",
            ThemeName::Mocha => "mocha",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ThemeName::System => ThemeName::Latte,
            ThemeName::Latte => ThemeName::Frappe,
            ThemeName::Frappe => ThemeName::Macchiato,
            ThemeName::Macchiato => ThemeName::Mocha,
            ThemeName::Mocha => ThemeName::System,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ThemePalette {
    pub text: (u8, u8, u8),
    pub subtext: (u8, u8, u8),
    pub base: (u8, u8, u8),
    pub surface: (u8, u8, u8),
    pub accent: (u8, u8, u8),
    pub accent2: (u8, u8, u8),
    pub accent3: (u8, u8, u8),
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub name: ThemeName,
    pub palette: ThemePalette,
    pub capability: ColorCapability,
}

impl Theme {
    pub fn color_text(&self) -> Color {
        map_color(self.capability, self.palette.text)
    }
    pub fn color_subtext(&self) -> Color {
        map_color(self.capability, self.palette.subtext)
    }
    pub fn color_base(&self) -> Color {
        map_color(self.capability, self.palette.base)
    }
    pub fn color_surface(&self) -> Color {
        map_color(self.capability, self.palette.surface)
    }
    pub fn color_accent(&self) -> Color {
        map_color(self.capability, self.palette.accent)
    }
    pub fn color_accent2(&self) -> Color {
        map_color(self.capability, self.palette.accent2)
    }
    pub fn color_accent3(&self) -> Color {
        map_color(self.capability, self.palette.accent3)
    }

    /// Card swatches. Without color support they use the terminal default so the
    /// hex label stays readable.
    pub fn swatch(&self, c: Rgb) -> Color {
        match self.capability {
            ColorCapability::NoColor => Color::Reset,
            cap => map_color(cap, c.rgb()),
        }
    }
}

pub fn detect_color_capability() -> ColorCapability {
    let colorterm = std::env::var("COLORTERM").unwrap_or_default().to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorCapability::TrueColor;
    }

    let term = std::env::var("TERM").unwrap_or_default().to_lowercase();
    if term.contains("256color") {
        return ColorCapability::Ansi256;
    }

    ColorCapability::NoColor
}

fn map_color(cap: ColorCapability, t: (u8, u8, u8)) -> Color {
    match cap {
        ColorCapability::TrueColor => Color::Rgb(t.0, t.1, t.2),
        ColorCapability::Ansi256 => Color::Indexed(rgb_to_ansi256(t.0, t.1, t.2)),
        ColorCapability::NoColor => Color::Reset,
    }
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    // Near-greys go to the 24-step ramp (232..255), which is finer than the cube's diagonal.
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max - min < 10 {
        let avg = (r as u16 + g as u16 + b as u16) / 3;
        if avg < 8 {
            return 16;
        }
        if avg > 238 {
            return 231;
        }
        return 232 + ((avg - 8) * 24 / 231).min(23) as u8;
    }

    // 6x6x6 color cube, 16..231
    let r6 = (r as u16 * 5 / 255) as u8;
    let g6 = (g as u16 * 5 / 255) as u8;
    let b6 = (b as u16 * 5 / 255) as u8;
    16 + 36 * r6 + 6 * g6 + b6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_names_cycle_and_round_trip() {
        let mut n = ThemeName::System;
        for _ in 0..5 {
            assert_eq!(ThemeName::from_str_or_system(n.as_config_key()), n);
            n = n.next();
        }
        assert_eq!(n, ThemeName::System);
        assert_eq!(ThemeName::from_str_or_system("bogus"), ThemeName::System);
    }

    #[test]
    fn ansi_mapping_hits_cube_and_ramp() {
        assert_eq!(rgb_to_ansi256(255, 0, 0), 196);
        assert_eq!(rgb_to_ansi256(0, 0, 0), 16);
        assert_eq!(rgb_to_ansi256(255, 255, 255), 231);
        let grey = rgb_to_ansi256(128, 128, 128);
        assert!((232..=255).contains(&grey));
    }
}
