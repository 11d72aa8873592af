pub mod assets;
pub mod config;
pub mod deck;
pub mod presets;
pub mod theme_loader;
