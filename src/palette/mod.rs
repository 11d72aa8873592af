pub mod color;
pub mod hsl;
pub mod mood;
pub mod pipeline;
pub mod theme_keywords;

pub use color::{Color, ColorError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image has no pixels")]
    EmptyImage,
}

/// Used whenever an image cannot be analysed.
pub const DEFAULT_PALETTE: [Color; 3] = [
    Color::new(0xFF, 0x6B, 0x6B),
    Color::new(0x4E, 0xCD, 0xC4),
    Color::new(0x45, 0xB7, 0xD1),
];
