//! Procedurally painted textures for floors and walls.
//!
//! The noise is cosmetic: every rebuild paints fresh images, so texture pixels
//! are the only part of a scene that is not deterministic.

use image::{Rgba, RgbaImage};
use rand::Rng;

use crate::data_structures::model::hex_to_rgb;

/// Edge length of every painted texture in pixels.
pub const TEXTURE_SIZE: u32 = 256;

fn rgba(hex: u32) -> Rgba<u8> {
    let [r, g, b] = hex_to_rgb(hex).map(|c| (c * 255.0).round() as u8);
    Rgba([r, g, b, 255])
}

fn shade(color: Rgba<u8>, amount: i16) -> Rgba<u8> {
    let channel = |c: u8| (c as i16 + amount).clamp(0, 255) as u8;
    Rgba([channel(color[0]), channel(color[1]), channel(color[2]), color[3]])
}

/// Staggered planks in warm browns with grain streaks and dark seams.
pub fn hardwood(rng: &mut impl Rng) -> RgbaImage {
    const PLANK_HEIGHT: u32 = 32;
    const PLANK_LENGTH: u32 = 128;
    let tones = [0x8b5a2b, 0x9c6b3a, 0x7a4a22, 0xa0703f];
    let rows = TEXTURE_SIZE / PLANK_HEIGHT;
    let plank_tones: Vec<Rgba<u8>> = (0..rows * 3)
        .map(|_| rgba(tones[rng.gen_range(0..tones.len())]))
        .collect();

    let mut img = RgbaImage::new(TEXTURE_SIZE, TEXTURE_SIZE);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let row = y / PLANK_HEIGHT;
        // every other row is shifted by half a plank
        let shifted = x + (row % 2) * PLANK_LENGTH / 2;
        let plank = (shifted / PLANK_LENGTH) % 3;
        let base = plank_tones[(row * 3 + plank) as usize];
        *pixel = if y % PLANK_HEIGHT == 0 || shifted % PLANK_LENGTH == 0 {
            shade(base, -60)
        } else {
            shade(base, rng.gen_range(-12..=12))
        };
    }
    // grain
    for _ in 0..TEXTURE_SIZE * 2 {
        let y = rng.gen_range(0..TEXTURE_SIZE);
        let x0 = rng.gen_range(0..TEXTURE_SIZE);
        let len = rng.gen_range(8..40);
        for x in x0..(x0 + len).min(TEXTURE_SIZE) {
            let p = img.get_pixel_mut(x, y);
            *p = shade(*p, -18);
        }
    }
    img
}

/// Square tiles with grout lines.
pub fn tile(rng: &mut impl Rng, base: u32, grout: u32) -> RgbaImage {
    const TILE: u32 = 64;
    const GROUT: u32 = 3;
    let (base, grout) = (rgba(base), rgba(grout));
    let mut img = RgbaImage::new(TEXTURE_SIZE, TEXTURE_SIZE);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = if x % TILE < GROUT || y % TILE < GROUT {
            grout
        } else {
            shade(base, rng.gen_range(-6..=6))
        };
    }
    img
}

/// Dense flecked carpet.
pub fn carpet(rng: &mut impl Rng) -> RgbaImage {
    let base = rgba(0x8a7f72);
    let mut img = RgbaImage::from_pixel(TEXTURE_SIZE, TEXTURE_SIZE, base);
    for pixel in img.pixels_mut() {
        *pixel = match rng.gen_range(0..10) {
            0 => shade(base, 35),
            1 => shade(base, -35),
            _ => shade(base, rng.gen_range(-10..=10)),
        };
    }
    img
}

/// Off-white wall paint with sparse speckles.
pub fn wall_paint(rng: &mut impl Rng) -> RgbaImage {
    let base = rgba(0xf5f3ee);
    let mut img = RgbaImage::from_pixel(TEXTURE_SIZE, TEXTURE_SIZE, base);
    for _ in 0..TEXTURE_SIZE * TEXTURE_SIZE / 12 {
        let x = rng.gen_range(0..TEXTURE_SIZE);
        let y = rng.gen_range(0..TEXTURE_SIZE);
        img.put_pixel(x, y, shade(base, -rng.gen_range(6..20)));
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn painted_textures_have_the_expected_size() {
        let mut rng = rand::thread_rng();
        for img in [
            hardwood(&mut rng),
            tile(&mut rng, 0xffffff, 0xcccccc),
            carpet(&mut rng),
            wall_paint(&mut rng),
        ] {
            assert_eq!(img.dimensions(), (TEXTURE_SIZE, TEXTURE_SIZE));
        }
    }

    #[test]
    fn tile_grout_lines_use_the_grout_colour() {
        let img = tile(&mut rand::thread_rng(), 0xffffff, 0x808080);
        assert_eq!(*img.get_pixel(0, 10), rgba(0x808080));
        assert_eq!(*img.get_pixel(10, 64), rgba(0x808080));
    }
}
