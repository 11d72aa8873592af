use crate::palette::{Color, PaletteError};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const PALETTE_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Longest side after downsampling.
    pub max_dim: u32,
    /// Minimum RGB distance between two picked colors.
    pub min_distance: f64,
    /// Pixels with alpha below this are ignored.
    pub alpha_cutoff: u8,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_dim: 100,
            min_distance: 50.0,
            alpha_cutoff: 128,
        }
    }
}

pub fn decode_rgba(image_bytes: &[u8]) -> Result<RgbaImage, PaletteError> {
    let img = image::load_from_memory(image_bytes)?;
    let rgba = img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(PaletteError::EmptyImage);
    }
    Ok(rgba)
}

/// Shrinks so the larger side equals `max_dim`, keeping the aspect ratio.
/// Images already within bounds are returned untouched.
pub fn downsample(rgba: RgbaImage, max_dim: u32) -> RgbaImage {
    let max_dim = max_dim.max(1);
    let (w, h) = rgba.dimensions();
    let larger = w.max(h);
    if larger <= max_dim {
        return rgba;
    }

    let scale = |side: u32| ((side as u64 * max_dim as u64) / larger as u64).max(1) as u32;
    imageops::resize(&rgba, scale(w), scale(h), FilterType::Triangle)
}

/// Exact-color histogram, most frequent first. Equal counts are ordered by hex value.
pub fn rank_colors(rgba: &RgbaImage, alpha_cutoff: u8) -> Vec<(Color, u32)> {
    let mut counts: HashMap<Color, u32> = HashMap::new();
    for p in rgba.pixels() {
        let [r, g, b, a] = p.0;
        if a < alpha_cutoff {
            continue;
        }
        *counts.entry(Color::new(r, g, b)).or_insert(0) += 1;
    }

    let mut ranked: Vec<(Color, u32)> = counts.into_iter().collect();
    ranked.sort_by(|(ca, na), (cb, nb)| nb.cmp(na).then(ca.cmp(cb)));
    ranked
}

/// Greedy pick in rank order; a candidate must be farther than `min_distance`
/// from everything already picked.
pub fn select_distinct(ranked: &[(Color, u32)], min_distance: f64, limit: usize) -> Vec<Color> {
    let mut picked: Vec<Color> = Vec::with_capacity(limit);
    for (color, _) in ranked {
        if picked.len() >= limit {
            break;
        }
        if picked.iter().all(|p| p.distance(*color) > min_distance) {
            picked.push(*color);
        }
    }
    picked
}

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    Color::new(rng.gen(), rng.gen(), rng.gen())
}

/// Fills up to [`PALETTE_SIZE`] with random colors.
pub fn pad_random<R: Rng + ?Sized>(picked: Vec<Color>, rng: &mut R) -> [Color; PALETTE_SIZE] {
    let mut it = picked.into_iter();
    let mut next = || it.next().unwrap_or_else(|| random_color(&mut *rng));
    [next(), next(), next()]
}

pub fn dominant_colors<R: Rng + ?Sized>(
    rgba: RgbaImage,
    opts: &ExtractOptions,
    rng: &mut R,
) -> [Color; PALETTE_SIZE] {
    let small = downsample(rgba, opts.max_dim);
    let ranked = rank_colors(&small, opts.alpha_cutoff);
    let picked = select_distinct(&ranked, opts.min_distance, PALETTE_SIZE);
    if picked.len() < PALETTE_SIZE {
        log::debug!(
            "only {} distinct colors out of {} candidates; padding randomly",
            picked.len(),
            ranked.len()
        );
    }
    pad_random(picked, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(rgba))
    }

    /// Horizontal bands, each `(color, rows)`.
    fn bands(w: u32, rows: &[([u8; 4], u32)]) -> RgbaImage {
        let h: u32 = rows.iter().map(|(_, n)| n).sum();
        let mut img = RgbaImage::new(w, h);
        let mut y0 = 0;
        for (px, n) in rows {
            for y in y0..y0 + n {
                for x in 0..w {
                    img.put_pixel(x, y, Rgba(*px));
                }
            }
            y0 += n;
        }
        img
    }

    #[test]
    fn downsample_bounds_larger_side() {
        let out = downsample(solid(400, 200, [1, 2, 3, 255]), 100);
        assert_eq!(out.dimensions(), (100, 50));
        let out = downsample(solid(30, 900, [1, 2, 3, 255]), 100);
        assert_eq!(out.dimensions(), (3, 100));
        let out = downsample(solid(80, 60, [1, 2, 3, 255]), 100);
        assert_eq!(out.dimensions(), (80, 60));
    }

    #[test]
    fn downsample_keeps_a_thin_side_visible() {
        let out = downsample(solid(1000, 2, [1, 2, 3, 255]), 100);
        assert_eq!(out.dimensions(), (100, 1));
    }

    #[test]
    fn transparent_pixels_are_not_counted() {
        let img = bands(4, &[([255, 0, 0, 127], 10), ([0, 0, 255, 128], 1)]);
        let ranked = rank_colors(&img, 128);
        assert_eq!(ranked, vec![(Color::new(0, 0, 255), 4)]);
    }

    #[test]
    fn ranking_breaks_ties_by_hex() {
        let img = bands(1, &[([0, 0, 9, 255], 2), ([0, 0, 1, 255], 2), ([50, 0, 0, 255], 3)]);
        let ranked = rank_colors(&img, 128);
        assert_eq!(
            ranked,
            vec![(Color::new(50, 0, 0), 3), (Color::new(0, 0, 1), 2), (Color::new(0, 0, 9), 2)]
        );
    }

    #[test]
    fn near_duplicates_are_skipped() {
        let ranked = vec![
            (Color::new(200, 0, 0), 50),
            (Color::new(210, 10, 10), 40),
            (Color::new(0, 200, 0), 30),
            (Color::new(0, 0, 200), 20),
            (Color::new(90, 90, 90), 10),
        ];
        let picked = select_distinct(&ranked, 50.0, 3);
        assert_eq!(picked, vec![Color::new(200, 0, 0), Color::new(0, 200, 0), Color::new(0, 0, 200)]);
    }

    #[test]
    fn distance_threshold_is_strict() {
        // distance exactly 50 is rejected
        let ranked = vec![(Color::new(0, 0, 0), 2), (Color::new(30, 40, 0), 1)];
        assert_eq!(select_distinct(&ranked, 50.0, 3), vec![Color::new(0, 0, 0)]);
    }

    #[test]
    fn all_black_image_pads_with_random_colors() {
        let mut rng = StdRng::seed_from_u64(7);
        let out = dominant_colors(solid(20, 20, [0, 0, 0, 255]), &ExtractOptions::default(), &mut rng);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], Color::new(0, 0, 0));
    }

    #[test]
    fn fully_transparent_image_is_all_random() {
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(1);
        let img = solid(10, 10, [255, 255, 255, 0]);
        let out = dominant_colors(img, &ExtractOptions::default(), &mut a);
        let expected = [random_color(&mut b), random_color(&mut b), random_color(&mut b)];
        assert_eq!(out, expected);
    }

    #[test]
    fn distinct_image_is_deterministic_and_ordered_by_frequency() {
        let img = bands(
            10,
            &[
                ([0, 0, 255, 255], 3),
                ([255, 0, 0, 255], 5),
                ([250, 5, 5, 255], 4),
                ([0, 255, 0, 255], 2),
            ],
        );
        let mut rng = StdRng::seed_from_u64(99);
        let first = dominant_colors(img.clone(), &ExtractOptions::default(), &mut rng);
        let second = dominant_colors(img, &ExtractOptions::default(), &mut rng);
        assert_eq!(first, second);
        assert_eq!(first, [Color::new(255, 0, 0), Color::new(0, 0, 255), Color::new(0, 255, 0)]);
        for i in 0..3 {
            for j in (i + 1)..3 {
                assert!(first[i].distance(first[j]) > 50.0);
            }
        }
    }

    #[test]
    fn large_solid_image_survives_downsampling() {
        let mut rng = StdRng::seed_from_u64(3);
        let out = dominant_colors(solid(640, 480, [12, 34, 56, 255]), &ExtractOptions::default(), &mut rng);
        assert_eq!(out[0], Color::new(12, 34, 56));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(matches!(decode_rgba(b"definitely not an image"), Err(PaletteError::Decode(_))));
    }
}
