pub mod theme;
pub mod tui;
pub mod borders;

pub mod components {
    pub mod swatch;
}

pub mod panels {
    pub mod console_panel;
    pub mod fullscreen_panel;
    pub mod grid_panel;
}
