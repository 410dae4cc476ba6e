use crate::config::{Config, Initialization};
use crate::error::{Error, Result};
use crate::interrupt::Interrupt;
use crate::kmeans::{self, KMeans, Partition};
use crate::point::ColorPoint;
use crate::sse;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// The clustering picked by the elbow search, with its reconstruction error.
#[derive(Clone, Debug, PartialEq)]
pub struct Clustering {
    pub partition: Partition,
    pub sse: f64,
}

impl Clustering {
    pub fn k(&self) -> usize {
        self.partition.k()
    }
}

/// Elbow-method selection of the cluster count.
///
/// Tries k = 1, 2, ... and keeps the first clustering whose mean squared
/// error falls below `sse_threshold`. The search also ends at `max_k`, or
/// once k reaches the number of distinct points, whichever comes first.
/// Every candidate starts from a generator freshly seeded with `seed`, so no
/// state carries over between values of k.
#[derive(Clone, Copy, Debug)]
pub struct Elbow {
    pub max_k: usize,
    pub sse_threshold: f64,
    pub max_iterations: usize,
    pub initialization: Initialization,
    pub seed: u64,
}

impl From<&Config> for Elbow {
    fn from(config: &Config) -> Self {
        Self {
            max_k: config.max_k,
            sse_threshold: config.sse_threshold,
            max_iterations: config.max_iterations,
            initialization: config.initialization,
            seed: config.seed,
        }
    }
}

impl Default for Elbow {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl Elbow {
    pub fn select<I>(&self, points: &[ColorPoint], interrupt: &I) -> Result<Clustering>
    where
        I: Interrupt + ?Sized,
    {
        if points.is_empty() {
            return Err(Error::EmptyInput);
        }
        let max_k = self.max_k.max(1);
        let distinct = kmeans::distinct(points).len();
        let mut k = 0;
        loop {
            k += 1;
            if interrupt.interrupted() {
                return Err(Error::Cancelled);
            }
            let ref mut rng = SmallRng::seed_from_u64(self.seed);
            let partition = KMeans::new(k, self.max_iterations)
                .with_initialization(self.initialization)
                .cluster(points, rng, interrupt)?;
            let sse = sse::evaluate(points, &partition.assignment, &partition.centroids);
            log::debug!(
                "{:<32}{:<32}",
                format!("k={k} after {} iterations", partition.iterations),
                format!("SSE {sse:.2}")
            );
            let done = if sse < self.sse_threshold {
                Some("below threshold")
            } else if k >= max_k {
                Some("cluster cap reached")
            } else if k >= distinct {
                Some("no more distinct points")
            } else {
                None
            };
            if let Some(reason) = done {
                log::info!("{:<32}{:<32}", format!("selected k={k}"), reason);
                return Ok(Clustering { partition, sse });
            }
        }
    }
}
