use crate::point::ColorPoint;

/// Number of octant buckets: one bit per channel.
pub const BUCKETS: usize = 8;

/// Octant of a color, from the high bit of each channel (`r * 4 + g * 2 + b`).
#[inline]
pub fn octant(point: &ColorPoint) -> usize {
    let bit = |v: f64| usize::from(v >= 128.0);
    (bit(point.r) << 2) | (bit(point.g) << 1) | bit(point.b)
}

/// Non-iterative histogram alternative to k-means: averages the points
/// falling into each RGB octant. Returns per-octant means, floored to whole
/// channel values, and counts. Empty octants keep a zero mean and a count
/// of zero.
pub fn buckets(points: &[ColorPoint]) -> (Vec<ColorPoint>, Vec<usize>) {
    let mut sums = vec![ColorPoint::default(); BUCKETS];
    let mut counts = vec![0usize; BUCKETS];
    for p in points {
        let i = octant(p);
        sums[i] += *p;
        counts[i] += 1;
    }
    let means = sums
        .into_iter()
        .zip(counts.iter())
        .map(|(sum, &n)| if n > 0 { (sum / n as f64).floor() } else { sum })
        .collect();
    (means, counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octants_split_on_the_high_bit() {
        assert_eq!(octant(&ColorPoint::from_rgb(0, 0, 0)), 0);
        assert_eq!(octant(&ColorPoint::from_rgb(127, 127, 127)), 0);
        assert_eq!(octant(&ColorPoint::from_rgb(128, 0, 0)), 4);
        assert_eq!(octant(&ColorPoint::from_rgb(0, 200, 0)), 2);
        assert_eq!(octant(&ColorPoint::from_rgb(255, 255, 255)), 7);
    }

    #[test]
    fn buckets_average_their_members() {
        let points = [
            ColorPoint::from_rgb(255, 0, 0),
            ColorPoint::from_rgb(245, 0, 0),
            ColorPoint::from_rgb(0, 240, 0),
        ];
        let (means, counts) = buckets(&points);
        assert_eq!(counts, vec![0, 0, 1, 0, 2, 0, 0, 0]);
        assert_eq!(means[4], ColorPoint::from_rgb(250, 0, 0));
        assert_eq!(means[2], ColorPoint::from_rgb(0, 240, 0));
    }

    #[test]
    fn bucket_means_are_truncated() {
        let points = [ColorPoint::from_rgb(255, 0, 0), ColorPoint::from_rgb(254, 0, 0)];
        let (means, counts) = buckets(&points);
        assert_eq!(counts[4], 2);
        assert_eq!(means[4], ColorPoint::from_rgb(254, 0, 0));
        assert_eq!(means[4].to_rgb8(), [254, 0, 0]);
    }
}
