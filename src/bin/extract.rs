use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use color_extractor_wasm::render::{DEFAULT_SQUARE, render_strip};
use color_extractor_wasm::{Config, Initialization, Strategy, Swatch, extract};
use std::fs;
use std::path::{Path, PathBuf};

/// Extract the dominant colors of an image.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input image path
    input: PathBuf,

    /// JSON file with extraction settings (flags override its values)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Largest number of colors tried by the elbow search
    #[arg(short = 'k', long)]
    max_k: Option<usize>,

    /// Mean squared error under which the elbow search stops
    #[arg(short = 't', long)]
    sse_threshold: Option<f64>,

    /// Lloyd iterations per cluster count (1 = single refinement)
    #[arg(short = 'i', long)]
    max_iterations: Option<usize>,

    /// Approximate samples along each image axis
    #[arg(short = 's', long)]
    target_samples: Option<u32>,

    /// Seed for centroid initialization
    #[arg(long)]
    seed: Option<u64>,

    /// Centroid initialization
    #[arg(long, value_enum)]
    init: Option<Initialization>,

    /// Dominant-color heuristic
    #[arg(long, value_enum)]
    strategy: Option<Strategy>,

    /// Pixels with lower alpha are ignored
    #[arg(long)]
    min_alpha: Option<u8>,

    /// Bucket strategy: drop buckets holding at most this share of samples
    #[arg(long)]
    small_bucket: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Also write the palette as a PNG strip
    #[arg(long)]
    swatch: Option<PathBuf>,

    /// Side of each square in the PNG strip
    #[arg(long, default_value_t = DEFAULT_SQUARE)]
    square: u32,

    /// More output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
    Html,
}

impl Args {
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str::<Config>(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => Config::default(),
        };
        if let Some(v) = self.max_k {
            config.max_k = v;
        }
        if let Some(v) = self.sse_threshold {
            config.sse_threshold = v;
        }
        if let Some(v) = self.max_iterations {
            config.max_iterations = v;
        }
        if let Some(v) = self.target_samples {
            config.target_samples = v;
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
        if let Some(v) = self.init {
            config.initialization = v;
        }
        if let Some(v) = self.strategy {
            config.strategy = v;
        }
        if let Some(v) = self.min_alpha {
            config.min_alpha = v;
        }
        if let Some(v) = self.small_bucket {
            config.small_bucket = v;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = args.config()?;
    log::debug!("{config:?}");

    let image = image::open(&args.input)
        .with_context(|| format!("decoding {}", args.input.display()))?;
    let swatches = extract(&image, &config).context("color extraction failed")?;

    match args.format {
        Format::Text => print_text(&swatches),
        Format::Json => print_json(&swatches)?,
        Format::Html => print_html(&args.input, &swatches),
    }

    if let Some(path) = &args.swatch {
        if swatches.is_empty() {
            log::warn!("empty palette, not writing {}", path.display());
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            render_strip(&swatches, args.square)
                .save(path)
                .with_context(|| format!("writing {}", path.display()))?;
            log::info!("Saved → {}", path.display());
        }
    }

    Ok(())
}

fn print_text(swatches: &[Swatch]) {
    for swatch in swatches {
        println!("#{}\t{}", swatch.hex(), swatch.weight);
    }
}

fn print_json(swatches: &[Swatch]) -> Result<()> {
    let records = swatches
        .iter()
        .map(|s| {
            serde_json::json!({
                "hex": s.hex(),
                "rgb": s.rgb(),
                "weight": s.weight,
            })
        })
        .collect::<Vec<_>>();
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn print_html(input: &Path, swatches: &[Swatch]) {
    println!("<img src=\"{}\" width=\"200\"><br>", input.display());
    for swatch in swatches {
        let [r, g, b] = swatch.rgb();
        println!(
            "<div style=\"background-color:rgb({r},{g},{b});display:inline-block;width:40px;height:40px;margin-right:-5px;\"></div>"
        );
    }
    println!("<br><br><br>");
}
