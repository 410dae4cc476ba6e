use crate::point::ColorPoint;

/// Mean squared distance from each point to its assigned centroid.
///
/// Zero for an empty point set.
pub fn evaluate(points: &[ColorPoint], assignment: &[usize], centroids: &[ColorPoint]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let total = points
        .iter()
        .zip(assignment)
        .map(|(p, &j)| p.dist_sq(centroids[j]))
        .sum::<f64>();
    total / points.len() as f64
}
