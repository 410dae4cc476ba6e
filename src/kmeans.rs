use crate::config::Initialization;
use crate::error::{Error, Result};
use crate::interrupt::Interrupt;
use crate::point::ColorPoint;
use rand::Rng;
use std::collections::HashSet;

/// Outcome of a single k-means run at a fixed k.
#[derive(Clone, Debug, PartialEq)]
pub struct Partition {
    pub centroids: Vec<ColorPoint>,
    pub counts: Vec<usize>,
    /// Cluster index of every input point, in input order.
    pub assignment: Vec<usize>,
    /// Lloyd passes actually performed.
    pub iterations: usize,
    /// Empty clusters reseeded over the whole run.
    pub reseeds: usize,
}

impl Partition {
    pub fn k(&self) -> usize {
        self.centroids.len()
    }
}

/// Lloyd's k-means over RGB points with squared Euclidean distance.
#[derive(Clone, Copy, Debug)]
pub struct KMeans {
    pub k: usize,
    pub max_iterations: usize,
    pub initialization: Initialization,
}

impl KMeans {
    pub fn new(k: usize, max_iterations: usize) -> Self {
        Self {
            k,
            max_iterations,
            initialization: Initialization::default(),
        }
    }

    pub fn with_initialization(mut self, initialization: Initialization) -> Self {
        self.initialization = initialization;
        self
    }

    /// Partition `points` into at most `k` clusters.
    ///
    /// `k` is clamped to the number of distinct points. Iteration stops once a
    /// pass leaves every assignment unchanged without reseeding an empty
    /// cluster, or after `max_iterations` passes.
    pub fn cluster<R, I>(
        &self,
        points: &[ColorPoint],
        rng: &mut R,
        interrupt: &I,
    ) -> Result<Partition>
    where
        R: Rng + ?Sized,
        I: Interrupt + ?Sized,
    {
        if self.k == 0 {
            return Err(Error::ZeroClusters);
        }
        if points.is_empty() {
            return Err(Error::EmptyInput);
        }
        let ref distinct = distinct(points);
        let k = self.k.min(distinct.len());
        let mut centroids = self.seeds(distinct, k, rng);
        let mut counts = vec![0usize; centroids.len()];
        let mut assignment = vec![usize::MAX; points.len()];
        let mut iterations = 0;
        let mut reseeds = 0;

        while iterations < self.max_iterations.max(1) {
            if interrupt.interrupted() {
                return Err(Error::Cancelled);
            }
            iterations += 1;
            let next = assign(points, &centroids);
            let moved = next
                .iter()
                .zip(assignment.iter())
                .filter(|(a, b)| a != b)
                .count();
            assignment = next;
            let reseeded = update(points, &assignment, &mut centroids, &mut counts);
            reseeds += reseeded;
            log::trace!(
                "{:<32}{:<32}",
                format!("k={} iteration {}", centroids.len(), iterations),
                format!("{moved} moved, {reseeded} reseeded")
            );
            if moved == 0 && reseeded == 0 {
                break;
            }
        }

        Ok(Partition {
            centroids,
            counts,
            assignment,
            iterations,
            reseeds,
        })
    }

    fn seeds<R>(&self, distinct: &[ColorPoint], k: usize, rng: &mut R) -> Vec<ColorPoint>
    where
        R: Rng + ?Sized,
    {
        match self.initialization {
            Initialization::Distinct => distinct[..k].to_vec(),
            Initialization::Random => rand::seq::index::sample(rng, distinct.len(), k)
                .into_iter()
                .map(|i| distinct[i])
                .collect(),
            Initialization::PlusPlus => plusplus(distinct, k, rng),
        }
    }
}

/// Unique points in first-seen order.
pub fn distinct(points: &[ColorPoint]) -> Vec<ColorPoint> {
    let mut seen = HashSet::with_capacity(points.len());
    points
        .iter()
        .filter(|p| seen.insert(p.key()))
        .copied()
        .collect()
}

/// k-means++ seeding: each further seed is drawn with probability
/// proportional to its squared distance from the nearest seed so far.
fn plusplus<R>(distinct: &[ColorPoint], k: usize, rng: &mut R) -> Vec<ColorPoint>
where
    R: Rng + ?Sized,
{
    use rand::distr::Distribution;
    use rand::distr::weighted::WeightedIndex;
    let first = distinct[rng.random_range(0..distinct.len())];
    let mut seeds = Vec::with_capacity(k);
    let mut potentials = distinct
        .iter()
        .map(|p| p.dist_sq(first))
        .collect::<Vec<f64>>();
    seeds.push(first);
    while seeds.len() < k {
        // all-zero weights only when every distinct point is already a seed
        let Ok(weights) = WeightedIndex::<f64>::new(potentials.iter()) else {
            break;
        };
        let x = distinct[weights.sample(rng)];
        seeds.push(x);
        potentials
            .iter_mut()
            .zip(distinct.iter())
            .for_each(|(d, p)| *d = d.min(p.dist_sq(x)));
    }
    seeds
}

/// Index of the nearest centroid; ties go to the lowest index.
#[inline]
pub fn nearest(point: &ColorPoint, centroids: &[ColorPoint]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (j, c) in centroids.iter().enumerate() {
        let d = point.dist_sq(*c);
        if d < best_dist {
            best_dist = d;
            best = j;
        }
    }
    best
}

#[cfg(feature = "parallel")]
fn assign(points: &[ColorPoint], centroids: &[ColorPoint]) -> Vec<usize> {
    use rayon::prelude::*;
    points.par_iter().map(|p| nearest(p, centroids)).collect()
}

#[cfg(not(feature = "parallel"))]
fn assign(points: &[ColorPoint], centroids: &[ColorPoint]) -> Vec<usize> {
    points.iter().map(|p| nearest(p, centroids)).collect()
}

/// Move every centroid to the mean of its points and reseed empty clusters.
/// Returns the number of clusters reseeded.
fn update(
    points: &[ColorPoint],
    assignment: &[usize],
    centroids: &mut [ColorPoint],
    counts: &mut [usize],
) -> usize {
    let mut sums = vec![ColorPoint::default(); centroids.len()];
    counts.fill(0);
    for (p, &j) in points.iter().zip(assignment) {
        sums[j] += *p;
        counts[j] += 1;
    }
    let mut placed = Vec::with_capacity(centroids.len());
    let mut empty = Vec::new();
    for (j, (sum, &n)) in sums.iter().zip(counts.iter()).enumerate() {
        if n > 0 {
            centroids[j] = *sum / n as f64;
            placed.push(centroids[j]);
        } else {
            empty.push(j);
        }
    }
    for &j in empty.iter() {
        if let Some(i) = farthest(points, &placed) {
            centroids[j] = points[i];
            placed.push(points[i]);
        }
    }
    empty.len()
}

/// Index of the point whose nearest centroid is farthest away; ties go to
/// the lowest index.
pub fn farthest(points: &[ColorPoint], centroids: &[ColorPoint]) -> Option<usize> {
    let mut best = None;
    let mut best_dist = f64::NEG_INFINITY;
    for (i, p) in points.iter().enumerate() {
        let d = centroids
            .iter()
            .map(|c| p.dist_sq(*c))
            .fold(f64::INFINITY, f64::min);
        if d > best_dist {
            best_dist = d;
            best = Some(i);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interrupt::Never;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::sync::atomic::AtomicBool;

    fn rgb(r: u8, g: u8, b: u8) -> ColorPoint {
        ColorPoint::from_rgb(r, g, b)
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0)
    }

    fn gradient(n: u8) -> Vec<ColorPoint> {
        (0..n).map(|i| rgb(i * 3, 255 - i * 2, i)).collect()
    }

    #[test]
    fn single_cluster_centroid_is_mean() {
        let points = vec![rgb(0, 0, 0), rgb(30, 60, 90), rgb(60, 0, 30)];
        let partition = KMeans::new(1, 100)
            .cluster(&points, &mut rng(), &Never)
            .unwrap();
        assert_eq!(partition.k(), 1);
        assert_eq!(partition.centroids[0], ColorPoint::new(30.0, 20.0, 40.0));
        assert_eq!(partition.counts, vec![3]);
    }

    #[test]
    fn counts_sum_to_points() {
        let points = gradient(60);
        for k in 1..=6 {
            let partition = KMeans::new(k, 100)
                .cluster(&points, &mut rng(), &Never)
                .unwrap();
            assert_eq!(partition.counts.iter().sum::<usize>(), points.len());
            assert_eq!(partition.assignment.len(), points.len());
            assert!(partition.assignment.iter().all(|&j| j < k));
        }
    }

    #[test]
    fn k_is_clamped_to_distinct_points() {
        let points = vec![rgb(1, 1, 1), rgb(2, 2, 2), rgb(1, 1, 1), rgb(3, 3, 3)];
        let partition = KMeans::new(5, 100)
            .cluster(&points, &mut rng(), &Never)
            .unwrap();
        assert_eq!(partition.k(), 3);
        assert_eq!(partition.counts, vec![2, 1, 1]);
    }

    #[test]
    fn zero_clusters_is_an_error() {
        let result = KMeans::new(0, 100).cluster(&gradient(4), &mut rng(), &Never);
        assert!(matches!(result, Err(Error::ZeroClusters)));
    }

    #[test]
    fn empty_input_is_an_error() {
        let result = KMeans::new(2, 100).cluster(&[], &mut rng(), &Never);
        assert!(matches!(result, Err(Error::EmptyInput)));
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let centroids = [rgb(0, 0, 0), rgb(10, 0, 0)];
        assert_eq!(nearest(&rgb(5, 0, 0), &centroids), 0);
        assert_eq!(nearest(&rgb(6, 0, 0), &centroids), 1);
    }

    #[test]
    fn iterates_until_assignments_settle() {
        let points = vec![
            rgb(0, 0, 0),
            rgb(10, 0, 0),
            rgb(200, 200, 200),
            rgb(210, 200, 200),
        ];
        let partition = KMeans::new(2, 100)
            .cluster(&points, &mut rng(), &Never)
            .unwrap();
        assert_eq!(partition.centroids, vec![rgb(5, 0, 0), rgb(205, 200, 200)]);
        assert_eq!(partition.counts, vec![2, 2]);
        assert_eq!(partition.iterations, 3);
    }

    #[test]
    fn single_iteration_stops_after_one_pass() {
        let points = vec![
            rgb(0, 0, 0),
            rgb(10, 0, 0),
            rgb(200, 200, 200),
            rgb(210, 200, 200),
        ];
        let partition = KMeans::new(2, 1)
            .cluster(&points, &mut rng(), &Never)
            .unwrap();
        assert_eq!(partition.iterations, 1);
        assert_eq!(partition.counts, vec![1, 3]);
        assert_eq!(partition.centroids[0], rgb(0, 0, 0));
    }

    #[test]
    fn empty_cluster_is_reseeded_at_farthest_point() {
        let points = vec![rgb(0, 0, 0), rgb(1, 0, 0), rgb(100, 0, 0)];
        let mut centroids = vec![rgb(0, 0, 0), rgb(250, 250, 250)];
        let mut counts = vec![0; 2];
        let reseeded = update(&points, &[0, 0, 0], &mut centroids, &mut counts);
        assert_eq!(reseeded, 1);
        assert_eq!(counts, vec![3, 0]);
        assert_eq!(centroids[1], rgb(100, 0, 0));
    }

    #[test]
    fn cluster_emptied_mid_run_is_reseeded_and_refilled() {
        // the tie at 40 leaves cluster 0 with {80, 80, 40}; its mean then
        // loses every member, so the second pass reseeds it at the lone 0
        let points = [80, 90, 80, 0, 40, 30].map(|r| rgb(r, 0, 0));
        let partition = KMeans::new(3, 100)
            .cluster(&points, &mut rng(), &Never)
            .unwrap();
        assert_eq!(partition.reseeds, 1);
        assert_eq!(partition.iterations, 4);
        assert_eq!(partition.k(), 3);
        assert_eq!(partition.counts, vec![1, 3, 2]);
        assert_eq!(partition.assignment, vec![1, 1, 1, 0, 2, 2]);
        assert_eq!(partition.centroids[0], rgb(0, 0, 0));
        assert_eq!(partition.centroids[2], rgb(35, 0, 0));
    }

    #[test]
    fn farthest_prefers_lowest_index_on_ties() {
        let points = [rgb(0, 0, 0), rgb(20, 0, 0), rgb(0, 20, 0)];
        assert_eq!(farthest(&points, &[rgb(0, 0, 0)]), Some(1));
        assert_eq!(farthest(&[], &[rgb(0, 0, 0)]), None);
    }

    #[test]
    fn seeded_initializations_are_reproducible() {
        let points = gradient(80);
        for init in [Initialization::Random, Initialization::PlusPlus] {
            let kmeans = KMeans::new(5, 100).with_initialization(init);
            let a = kmeans
                .cluster(&points, &mut SmallRng::seed_from_u64(7), &Never)
                .unwrap();
            let b = kmeans
                .cluster(&points, &mut SmallRng::seed_from_u64(7), &Never)
                .unwrap();
            assert_eq!(a, b);
            assert_eq!(a.k(), 5);
        }
    }

    #[test]
    fn interrupt_cancels_the_run() {
        let stop = AtomicBool::new(true);
        let result = KMeans::new(2, 100).cluster(&gradient(10), &mut rng(), &stop);
        assert!(matches!(result, Err(Error::Cancelled)));
    }
}
