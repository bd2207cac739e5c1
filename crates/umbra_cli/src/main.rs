mod cli;
mod demo;
mod logger;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use umbra_core::graph::flatten;
use umbra_core::TextureCache;
use umbra_tracer::{render, RenderConfig};

use crate::cli::{Cli, Command, RenderArgs};
use crate::demo::{default_box_texture, demo_model, DemoCamera};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_logger(cli.log_level.into());

    match cli.command {
        Command::Render(args) => run_render(args),
    }
}

/// Start from the config file (or defaults) and apply command-line overrides.
fn resolve_config(args: &RenderArgs) -> Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => RenderConfig::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(depth) = args.depth {
        config.max_depth = depth;
    }
    if let Some(fov) = args.fov {
        config.half_fov_degrees = fov;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = Some(timeout_ms);
    }

    config.validate().context("Invalid render configuration")?;
    Ok(config)
}

fn run_render(args: RenderArgs) -> Result<()> {
    let config = resolve_config(&args)?;

    let mut textures = TextureCache::new();
    let box_texture = match &args.texture {
        Some(path) => textures
            .load(&path.to_string_lossy())
            .with_context(|| format!("Failed to load texture {}", path.display()))?,
        None => Arc::new(default_box_texture()),
    };

    let model = demo_model(box_texture);
    let scene = flatten(&model, DemoCamera::default().view_matrix());

    let start = Instant::now();
    let image = render(scene, &config).context("Render failed")?;
    log::info!("Traced {}x{} in {:.2?}", image.width, image.height, start.elapsed());

    image
        .to_rgba_image()
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!("Saved {}", args.output.display());

    Ok(())
}
