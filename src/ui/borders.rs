use ratatui::symbols::border::Set;
use crate::ui::theme::{ColorCapability, Theme};

pub const ASCII_BORDER: Set = Set {
    top_left: "+",
    top_right: "+",
    bottom_left: "+",
    bottom_right: "+",
    vertical_left: "|",
    vertical_right: "|",
    horizontal_top: "-",
    horizontal_bottom: "-",
};

pub const SOLID_BORDER: Set = Set {
    top_left: "┌",
    top_right: "┐",
    bottom_left: "└",
    bottom_right: "┘",
    vertical_left: "│",
    vertical_right: "│",
    horizontal_top: "─",
    horizontal_bottom: "─",
};

/// Terminals without color support tend to be the ones that lack box-drawing glyphs too.
pub fn for_theme(theme: &Theme) -> Set {
    match theme.capability {
        ColorCapability::NoColor => ASCII_BORDER,
        _ => SOLID_BORDER,
    }
}
