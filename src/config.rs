use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TARGET_SAMPLES: u32 = 224;
pub const DEFAULT_MAX_K: usize = 7;
pub const DEFAULT_SSE_THRESHOLD: f64 = 2000.0;
pub const DEFAULT_MAX_ITERATIONS: usize = 100;
pub const DEFAULT_SMALL_BUCKET: f64 = 0.01;

/// How the first centroids of a k-means run are chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "native-bin", derive(clap::ValueEnum))]
#[serde(rename_all = "camelCase")]
pub enum Initialization {
    /// The first k distinct points in sampling order.
    #[default]
    Distinct,
    /// A seeded uniform sample of k distinct points.
    Random,
    /// Seeded k-means++ over the distinct points.
    PlusPlus,
}

/// Which dominant-color heuristic runs over the sampled points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "native-bin", derive(clap::ValueEnum))]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    /// Lloyd's k-means with elbow selection of k.
    #[default]
    Kmeans,
    /// Fixed 2x2x2 RGB octant histogram.
    Buckets,
}

/// Tunables for a single extraction call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Approximate number of samples along each image axis.
    pub target_samples: u32,
    /// Upper bound on the number of clusters tried by the elbow search.
    pub max_k: usize,
    /// Mean squared error under which the elbow search stops.
    pub sse_threshold: f64,
    /// Lloyd iterations allowed per candidate k. `1` gives a single refinement.
    pub max_iterations: usize,
    /// Seed for the centroid initialization generator.
    pub seed: u64,
    pub initialization: Initialization,
    /// Pixels with alpha below this are not sampled. The bucket strategy
    /// ignores it and samples fully opaque pixels only.
    pub min_alpha: u8,
    pub strategy: Strategy,
    /// Bucket strategy only: drop buckets holding at most this share of samples.
    pub small_bucket: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_samples: DEFAULT_TARGET_SAMPLES,
            max_k: DEFAULT_MAX_K,
            sse_threshold: DEFAULT_SSE_THRESHOLD,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: 0,
            initialization: Initialization::default(),
            min_alpha: 1,
            strategy: Strategy::default(),
            small_bucket: DEFAULT_SMALL_BUCKET,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let invalid = |field: &'static str, reason: &str| -> Result<()> {
            Err(Error::InvalidConfig {
                field,
                reason: reason.to_string(),
            })
        };
        if self.target_samples == 0 {
            return invalid("targetSamples", "must be at least 1");
        }
        if self.max_k == 0 {
            return invalid("maxK", "must be at least 1");
        }
        if self.max_iterations == 0 {
            return invalid("maxIterations", "must be at least 1");
        }
        if !(self.sse_threshold.is_finite() && self.sse_threshold >= 0.0) {
            return invalid("sseThreshold", "must be a finite, non-negative number");
        }
        if !(0.0..1.0).contains(&self.small_bucket) {
            return invalid("smallBucket", "must lie in [0, 1)");
        }
        Ok(())
    }
}
