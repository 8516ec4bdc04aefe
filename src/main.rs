use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

use qrlogo::{EncoderConfig, Placement, QrCodeEcc};

/// qrlogo - QR codes with a logo in the middle
#[derive(Parser, Debug)]
#[command(name = "qrlogo")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Text to encode
    content: String,

    /// Logo image (PNG, JPEG, or anything else the image crate reads)
    #[arg(short, long)]
    logo: PathBuf,

    /// Width and height of the QR code in pixels (0 = default 256, at most 11585)
    #[arg(short, long, default_value_t = qrlogo::DEFAULT_SIZE)]
    size: u32,

    /// Error correction level
    #[arg(long, value_enum, default_value_t = Level::Medium)]
    level: Level,

    /// How to position the logo
    #[arg(long, value_enum, default_value_t = PlacementArg::Shared)]
    placement: PlacementArg,

    /// Write the PNG here instead of printing base64 to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Level {
    Low,
    Medium,
    Quartile,
    High,
}

impl From<Level> for QrCodeEcc {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => QrCodeEcc::Low,
            Level::Medium => QrCodeEcc::Medium,
            Level::Quartile => QrCodeEcc::Quartile,
            Level::High => QrCodeEcc::High,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PlacementArg {
    /// Width-based offset on both axes
    Shared,
    /// Independent horizontal and vertical centering
    Centered,
}

impl From<PlacementArg> for Placement {
    fn from(arg: PlacementArg) -> Self {
        match arg {
            PlacementArg::Shared => Placement::SharedOffset,
            PlacementArg::Centered => Placement::Centered,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match (cli.quiet, cli.verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    SimpleLogger::new().with_level(level).init()?;

    let logo = image::open(&cli.logo)
        .with_context(|| format!("failed to read logo {}", cli.logo.display()))?;

    let config = EncoderConfig::default()
        .with_size(cli.size)
        .with_ecc(cli.level.into())
        .with_placement(cli.placement.into());

    match cli.output {
        Some(path) => {
            let png = qrlogo::encode_with(&cli.content, &logo, &config)?;
            fs::write(&path, &png)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {} bytes to {}", png.len(), path.display());
        }
        None => {
            let b64 = qrlogo::encode_to_base64_with(&cli.content, &logo, &config)?;
            println!("{b64}");
        }
    }

    Ok(())
}
