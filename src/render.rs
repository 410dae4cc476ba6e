use crate::summary::Swatch;
use image::{Rgba, RgbaImage};

pub const DEFAULT_SQUARE: u32 = 40;

/// Lay swatches out left to right as solid `square`-sized tiles.
pub fn render_strip(swatches: &[Swatch], square: u32) -> RgbaImage {
    let square = square.max(1);
    let width = swatches.len() as u32 * square;
    RgbaImage::from_fn(width, square, |x, _| {
        let [r, g, b] = swatches[(x / square) as usize].rgb();
        Rgba([r, g, b, u8::MAX])
    })
}
