use crate::palette::Color;
use image::imageops::FilterType;
use std::io::Cursor;

/// One terminal cell drawn as `▀`: top pixel in the foreground, bottom in the background.
/// `None` marks a transparent pixel.
pub type HalfBlock = (Option<Color>, Option<Color>);

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewCells {
    pub width: u16,
    pub height: u16,
    /// Row-major, `width * height` entries.
    pub cells: Vec<HalfBlock>,
}

impl PreviewCells {
    pub fn empty() -> Self {
        Self { width: 0, height: 0, cells: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn row(&self, y: u16) -> &[HalfBlock] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.cells[start..start + w]
    }
}

/// Reads only the header.
pub fn image_dimensions(image_bytes: &[u8]) -> Option<(u32, u32)> {
    image::io::Reader::new(Cursor::new(image_bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

pub fn is_landscape(image_bytes: &[u8]) -> bool {
    image_dimensions(image_bytes).is_some_and(|(w, h)| w > h)
}

/// Largest cell box that keeps the image's aspect ratio inside `max_w` x `max_h` cells.
/// Each cell covers one pixel column and two pixel rows.
pub fn fit_cells(img_w: u32, img_h: u32, max_w: u16, max_h: u16) -> (u16, u16) {
    if img_w == 0 || img_h == 0 || max_w == 0 || max_h == 0 {
        return (0, 0);
    }
    let px_w = max_w as f32;
    let px_h = max_h as f32 * 2.0;
    let scale = (px_w / img_w as f32).min(px_h / img_h as f32);
    let w = ((img_w as f32 * scale).round() as u16).clamp(1, max_w);
    let h = (((img_h as f32 * scale) / 2.0).round() as u16).clamp(1, max_h);
    (w, h)
}

pub fn render_preview_cells(image_bytes: &[u8], max_w: u16, max_h: u16) -> Option<PreviewCells> {
    let img = image::load_from_memory(image_bytes).ok()?;
    let (width, height) = fit_cells(img.width(), img.height(), max_w, max_h);
    if width == 0 || height == 0 {
        return None;
    }

    // Large sources + Lanczos are slow; Triangle is plenty for a preview.
    let rgba = img
        .resize_exact(width as u32, (height as u32) * 2, FilterType::Triangle)
        .to_rgba8();

    let px = |x: u32, y: u32| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        (a >= 128).then(|| Color::new(r, g, b))
    };

    let mut cells = Vec::with_capacity(width as usize * height as usize);
    for row in 0..height as u32 {
        for x in 0..width as u32 {
            cells.push((px(x, row * 2), px(x, row * 2 + 1)));
        }
    }

    Some(PreviewCells { width, height, cells })
}
