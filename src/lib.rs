use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

pub mod bucket;
pub mod config;
pub mod elbow;
pub mod error;
pub mod extract;
pub mod interrupt;
pub mod kmeans;
pub mod point;
pub mod render;
pub mod sampler;
pub mod sse;
pub mod summary;

pub use config::{Config, Initialization, Strategy};
pub use error::{Error, Result};
pub use extract::{extract, extract_from_bytes, extract_with};
pub use interrupt::{Interrupt, Never};
pub use point::ColorPoint;
pub use summary::Swatch;

/// Extract the dominant colors of an encoded image.
///
/// Unset arguments fall back to [`Config::default`]. The returned object has
/// two parallel arrays, most prominent color first:
/// - `palette`: `RRGGBB` hex strings
/// - `weights`: number of sampled pixels behind each color
#[wasm_bindgen]
pub fn extract_colors(
    input: Vec<u8>,
    max_k: Option<usize>,
    sse_threshold: Option<f64>,
    seed: Option<u64>,
) -> std::result::Result<Object, JsValue> {
    let defaults = Config::default();
    let config = Config {
        max_k: max_k.unwrap_or(defaults.max_k),
        sse_threshold: sse_threshold.unwrap_or(defaults.sse_threshold),
        seed: seed.unwrap_or(defaults.seed),
        ..defaults
    };

    let swatches = extract_from_bytes(&input, &config)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let palette_js = Array::new();
    let weights_js = Array::new();
    for swatch in &swatches {
        palette_js.push(&JsValue::from_str(&swatch.hex()));
        weights_js.push(&JsValue::from_f64(swatch.weight as f64));
    }

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("palette"), &palette_js)?;
    Reflect::set(&result, &JsValue::from_str("weights"), &weights_js)?;

    Ok(result)
}
