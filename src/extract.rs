use crate::bucket;
use crate::config::{Config, Strategy};
use crate::elbow::Elbow;
use crate::error::Result;
use crate::interrupt::{Interrupt, Never};
use crate::sampler;
use crate::summary::{self, Swatch};
use image::{GenericImageView, Rgba};

/// Extract the dominant colors of an image, most prominent first.
pub fn extract<I>(image: &I, config: &Config) -> Result<Vec<Swatch>>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    extract_with(image, config, &Never)
}

/// [`extract`] with a cancellation check between iterations.
pub fn extract_with<I, X>(image: &I, config: &Config, interrupt: &X) -> Result<Vec<Swatch>>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
    X: Interrupt + ?Sized,
{
    config.validate()?;
    // the histogram only counts fully opaque pixels
    let min_alpha = match config.strategy {
        Strategy::Kmeans => config.min_alpha,
        Strategy::Buckets => u8::MAX,
    };
    let points = sampler::sample(image, config.target_samples, min_alpha);
    if points.is_empty() {
        log::warn!("no pixels sampled, returning an empty palette");
        return Ok(Vec::new());
    }
    let swatches = match config.strategy {
        Strategy::Kmeans => {
            let clustering = Elbow::from(config).select(&points, interrupt)?;
            summary::rank(&clustering.partition.centroids, &clustering.partition.counts, 0.0)
        }
        Strategy::Buckets => {
            let (means, counts) = bucket::buckets(&points);
            summary::rank(&means, &counts, config.small_bucket)
        }
    };
    log::info!(
        "{:<32}{:<32}",
        format!("extracted {} colors", swatches.len()),
        format!("from {} samples", points.len())
    );
    Ok(swatches)
}

/// Decode an encoded image (PNG, JPEG, ...) and extract its dominant colors.
pub fn extract_from_bytes(input: &[u8], config: &Config) -> Result<Vec<Swatch>> {
    let image = image::load_from_memory(input)?;
    extract(&image, config)
}
