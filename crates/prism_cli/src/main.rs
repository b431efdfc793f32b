//! prism - render a JSON scene to an image file.
//!
//! ```text
//! prism 640 480 scenes/example.json output.ppm
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use prism_core::load_scene;
use prism_math::Color;
use prism_renderer::{raycast, save_image, save_ppm, PpmFormat, RenderConfig, MAX_DEPTH};

#[derive(Parser, Debug)]
#[command(name = "prism")]
#[command(about = "Ray cast a JSON scene to a PPM or PNG image", long_about = None)]
struct Cli {
    /// Output image width in pixels
    width: u32,

    /// Output image height in pixels
    height: u32,

    /// Scene description (JSON)
    scene: PathBuf,

    /// Output file (.ppm, or .png and other raster formats)
    output: PathBuf,

    /// Maximum reflection/refraction depth
    #[arg(long, default_value_t = MAX_DEPTH)]
    max_depth: u8,

    /// Background color for rays that hit nothing, as "r,g,b" in 0-1
    #[arg(long, value_parser = parse_color)]
    background: Option<Color>,

    /// Write text PPM (P3) instead of binary (P6)
    #[arg(long)]
    ascii: bool,

    /// Render on the calling thread only
    #[arg(long)]
    sequential: bool,

    /// Stop recursing once a path's weight in the pixel drops below this
    #[arg(long, default_value_t = 0.0, value_parser = parse_weight)]
    min_contribution: f64,
}

fn parse_color(s: &str) -> Result<Color, String> {
    let channels: Vec<f64> = s
        .split(',')
        .map(|c| c.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid channel: {}", e))?;

    match channels.as_slice() {
        [r, g, b] => Ok(Color::new(*r, *g, *b)),
        _ => Err(format!("expected 3 comma-separated channels, got {}", channels.len())),
    }
}

fn parse_weight(s: &str) -> Result<f64, String> {
    let weight: f64 = s.trim().parse().map_err(|e| format!("invalid weight: {}", e))?;
    if (0.0..=1.0).contains(&weight) {
        Ok(weight)
    } else {
        Err(format!("weight must be between 0 and 1, got {}", weight))
    }
}

impl Cli {
    fn render_config(&self) -> RenderConfig {
        let mut config = RenderConfig::default()
            .with_max_depth(self.max_depth)
            .with_min_contribution(self.min_contribution)
            .with_parallel(!self.sequential);
        if let Some(background) = self.background {
            config = config.with_background(background);
        }
        config
    }
}

fn run(cli: &Cli) -> Result<()> {
    if cli.width == 0 || cli.height == 0 {
        bail!("Image dimensions must be non-zero, got {}x{}", cli.width, cli.height);
    }

    let scene = load_scene(&cli.scene)
        .with_context(|| format!("Failed to load scene {}", cli.scene.display()))?;

    let config = cli.render_config();
    let buffer = raycast(&scene, cli.width, cli.height, &config).context("Failed to render scene")?;

    let written = if cli.ascii {
        save_ppm(&buffer, &cli.output, PpmFormat::Ascii)
    } else {
        save_image(&buffer, &cli.output)
    };
    written.with_context(|| format!("Failed to write {}", cli.output.display()))?;

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!("Starting prism");

    run(&cli)
}
