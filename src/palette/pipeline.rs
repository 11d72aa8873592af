use crate::palette::color::Color;
use crate::palette::mood::adjust_colors_by_mood;
use crate::palette::theme_keywords::colors_for_theme;
use crate::palette::DEFAULT_PALETTE;
use crate::render::dominant_color::{decode_rgba, dominant_colors, ExtractOptions, PALETTE_SIZE};
use rand::Rng;

/// Inputs gathered from the editor console.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaletteRequest<'a> {
    pub image: Option<&'a [u8]>,
    pub theme_text: &'a str,
    pub mood: &'a str,
}

pub fn extract_dominant_colors(image_bytes: &[u8], mood: &str) -> [Color; PALETTE_SIZE] {
    extract_dominant_colors_with(image_bytes, mood, &ExtractOptions::default(), &mut rand::thread_rng())
}

/// Decode, extract and mood-adjust. Undecodable input yields the default palette
/// (still mood-adjusted).
pub fn extract_dominant_colors_with<R: Rng + ?Sized>(
    image_bytes: &[u8],
    mood: &str,
    opts: &ExtractOptions,
    rng: &mut R,
) -> [Color; PALETTE_SIZE] {
    let base = match decode_rgba(image_bytes) {
        Ok(rgba) => dominant_colors(rgba, opts, rng),
        Err(e) => {
            log::warn!("palette extraction fell back to defaults: {e}");
            DEFAULT_PALETTE
        }
    };
    adjust_palette(&base, mood)
}

/// `None` means the request lacks both an image and a recognised theme keyword.
/// Without `opts` the image path runs with default tuning.
pub fn recompute_palette<R: Rng + ?Sized>(
    req: &PaletteRequest<'_>,
    opts: Option<&ExtractOptions>,
    rng: &mut R,
) -> Option<[Color; PALETTE_SIZE]> {
    if let Some(bytes) = req.image {
        return Some(match opts {
            Some(opts) => extract_dominant_colors_with(bytes, req.mood, opts, rng),
            None => extract_dominant_colors(bytes, req.mood),
        });
    }
    let themed = colors_for_theme(req.theme_text)?;
    Some(adjust_palette(&themed, req.mood))
}

fn adjust_palette(colors: &[Color; PALETTE_SIZE], mood: &str) -> [Color; PALETTE_SIZE] {
    let adjusted = adjust_colors_by_mood(colors, mood);
    [adjusted[0], adjusted[1], adjusted[2]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::mood::mood_style;
    use image::codecs::png::PngEncoder;
    use image::{ColorType, ImageEncoder, Rgba, RgbaImage};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut out = Vec::new();
        PngEncoder::new(&mut out)
            .write_image(img.as_raw(), img.width(), img.height(), ColorType::Rgba8)
            .unwrap();
        out
    }

    fn hexes(colors: &[Color]) -> Vec<String> {
        colors.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn undecodable_image_returns_default_palette() {
        let out = extract_dominant_colors(b"\x89PNG broken", "");
        assert_eq!(hexes(&out), ["#FF6B6B", "#4ECDC4", "#45B7D1"]);
    }

    #[test]
    fn default_palette_is_mood_adjusted() {
        let out = extract_dominant_colors(b"", "沉稳");
        let style = mood_style("沉稳");
        assert_eq!(out, DEFAULT_PALETTE.map(|c| style.apply(c)));
    }

    #[test]
    fn black_png_starts_with_black() {
        let bytes = png_bytes(&RgbaImage::from_pixel(32, 32, Rgba([0, 0, 0, 255])));
        let out = extract_dominant_colors(&bytes, "");
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].to_string(), "#000000");
    }

    #[test]
    fn encoded_image_is_deterministic_when_distinct() {
        let bytes = png_bytes(&three_bands());
        let opts = ExtractOptions::default();
        let a = extract_dominant_colors_with(&bytes, "清新", &opts, &mut StdRng::seed_from_u64(1));
        let b = extract_dominant_colors_with(&bytes, "清新", &opts, &mut StdRng::seed_from_u64(2));
        assert_eq!(a, b);
        let style = mood_style("清新");
        assert_eq!(
            a,
            [
                style.apply(Color::new(255, 255, 255)),
                style.apply(Color::new(20, 20, 120)),
                style.apply(Color::new(230, 120, 0)),
            ]
        );
    }

    #[test]
    fn untuned_request_matches_default_options() {
        let bytes = png_bytes(&three_bands());
        let req = PaletteRequest { image: Some(&bytes), theme_text: "", mood: "复古" };
        let untuned = recompute_palette(&req, None, &mut StdRng::seed_from_u64(0));
        let tuned = recompute_palette(&req, Some(&ExtractOptions::default()), &mut StdRng::seed_from_u64(9));
        assert!(untuned.is_some());
        assert_eq!(untuned, tuned);
    }

    // white background with a navy and an orange band
    fn three_bands() -> RgbaImage {
        let mut img = RgbaImage::from_pixel(12, 12, Rgba([255, 255, 255, 255]));
        for y in 0..4 {
            for x in 0..12 {
                img.put_pixel(x, y, Rgba([20, 20, 120, 255]));
            }
        }
        for y in 4..6 {
            for x in 0..12 {
                img.put_pixel(x, y, Rgba([230, 120, 0, 255]));
            }
        }
        img
    }

    #[test]
    fn theme_keyword_is_used_without_image() {
        let req = PaletteRequest { image: None, theme_text: "我家的宠物很可爱", mood: "" };
        let out = recompute_palette(&req, None, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(hexes(&out), ["#FFB6C1", "#87CEEB", "#98FB98"]);
    }

    #[test]
    fn image_takes_priority_over_theme() {
        let req = PaletteRequest { image: Some(&b"nope"[..]), theme_text: "宠物", mood: "" };
        let out = recompute_palette(&req, None, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(out, DEFAULT_PALETTE);
    }

    #[test]
    fn nothing_to_work_with_is_a_no_op() {
        let req = PaletteRequest { image: None, theme_text: "随便写点什么", mood: "温馨" };
        assert!(recompute_palette(&req, None, &mut StdRng::seed_from_u64(0)).is_none());
        assert!(recompute_palette(&PaletteRequest::default(), None, &mut StdRng::seed_from_u64(0)).is_none());
    }
}
