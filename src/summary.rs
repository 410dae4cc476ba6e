use crate::point::ColorPoint;
use palette::Srgba;
use std::cmp::Reverse;

/// One output color together with the number of samples it stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Swatch {
    /// Always fully opaque.
    pub color: Srgba<u8>,
    pub weight: usize,
}

impl Swatch {
    pub fn new(rgb: [u8; 3], weight: usize) -> Self {
        let [r, g, b] = rgb;
        Self {
            color: Srgba::new(r, g, b, u8::MAX),
            weight,
        }
    }

    pub fn rgb(&self) -> [u8; 3] {
        [self.color.red, self.color.green, self.color.blue]
    }

    /// Upper-case `RRGGBB` without a leading `#`.
    pub fn hex(&self) -> String {
        let [r, g, b] = self.rgb();
        format!("{r:02X}{g:02X}{b:02X}")
    }
}

/// Turn cluster centroids into swatches, most prominent first.
///
/// Empty clusters are dropped, as is any cluster whose share of all points
/// is not above `min_share` (pass `0.0` to keep every non-empty cluster).
/// Equal weights keep their cluster order.
pub fn rank(centroids: &[ColorPoint], counts: &[usize], min_share: f64) -> Vec<Swatch> {
    let total = counts.iter().sum::<usize>();
    let mut ranked = centroids
        .iter()
        .zip(counts.iter().copied())
        .enumerate()
        .filter(|&(_, (_, n))| n > 0 && n as f64 / total as f64 > min_share)
        .map(|(index, (c, n))| (index, Swatch::new(c.to_rgb8(), n)))
        .collect::<Vec<_>>();
    ranked.sort_by_key(|&(index, swatch)| (Reverse(swatch.weight), index));
    ranked.into_iter().map(|(_, swatch)| swatch).collect()
}
