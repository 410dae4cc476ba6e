use crate::point::ColorPoint;
use image::{GenericImageView, Rgba};

/// Stride along an axis so that roughly `target` samples land on it.
#[inline]
pub fn step(dimension: u32, target: u32) -> u32 {
    (dimension / target.max(1)).max(1)
}

/// Down-sample an image onto a fixed-stride grid of color points.
///
/// Columns are walked in the outer loop and rows in the inner loop; the
/// resulting order decides which points seed the first centroids.
/// Pixels whose alpha is below `min_alpha` are skipped.
pub fn sample<I>(image: &I, target_samples: u32, min_alpha: u8) -> Vec<ColorPoint>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let step_x = step(width, target_samples) as usize;
    let step_y = step(height, target_samples) as usize;

    let capacity = (width as usize / step_x + 1) * (height as usize / step_y + 1);
    let mut points = Vec::with_capacity(capacity);
    for x in (0..width).step_by(step_x) {
        for y in (0..height).step_by(step_y) {
            let px = image.get_pixel(x, y);
            if px.0[3] >= min_alpha {
                points.push(ColorPoint::from(px));
            }
        }
    }
    log::trace!("{:<32}{:<32}", "sampled points", points.len());
    points
}
