use image::Rgba;

/// A sampled color in RGB space, each channel conceptually in `[0, 255]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColorPoint {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl ColorPoint {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f64, g as f64, b as f64)
    }

    /// Squared Euclidean distance. Nearest-centroid ranking never needs the root.
    #[inline(always)]
    pub fn dist_sq(self, other: ColorPoint) -> f64 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        dr * dr + dg * dg + db * db
    }

    /// Exact bit pattern, used to recognise identical points.
    pub(crate) fn key(self) -> [u64; 3] {
        [self.r.to_bits(), self.g.to_bits(), self.b.to_bits()]
    }

    /// Round every channel down to an integer.
    pub fn floor(self) -> Self {
        Self::new(self.r.floor(), self.g.floor(), self.b.floor())
    }

    /// Round to the nearest integer per channel and clamp into `0..=255`.
    pub fn to_rgb8(self) -> [u8; 3] {
        let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        [channel(self.r), channel(self.g), channel(self.b)]
    }
}

impl From<Rgba<u8>> for ColorPoint {
    fn from(px: Rgba<u8>) -> Self {
        let [r, g, b, _] = px.0;
        Self::from_rgb(r, g, b)
    }
}

impl std::ops::Add for ColorPoint {
    type Output = Self;
    fn add(self, o: Self) -> Self {
        Self::new(self.r + o.r, self.g + o.g, self.b + o.b)
    }
}

impl std::ops::AddAssign for ColorPoint {
    fn add_assign(&mut self, o: Self) {
        *self = *self + o;
    }
}

impl std::ops::Div<f64> for ColorPoint {
    type Output = Self;
    fn div(self, s: f64) -> Self {
        Self::new(self.r / s, self.g / s, self.b / s)
    }
}
