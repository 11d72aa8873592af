pub mod dominant_color;
pub mod image_preview;
pub mod preview_cache;
