use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser)]
#[command(name = "umbra")]
#[command(about = "A recursive ray tracer for implicit-surface scenes")]
pub struct Cli {
    /// Set the logging level
    #[arg(long, global = true, default_value = "info")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render the demo scene to a PNG
    Render(RenderArgs),
}

/// Render options. Flags override values from `--config`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// JSON render configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of parallel bands
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Maximum reflection/refraction depth
    #[arg(short, long)]
    pub depth: Option<u32>,

    /// Half of the vertical field of view, in degrees
    #[arg(long)]
    pub fov: Option<f32>,

    /// Abandon the render after this many milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Image applied to the demo box instead of the built-in checkerboard
    #[arg(long)]
    pub texture: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,
}
