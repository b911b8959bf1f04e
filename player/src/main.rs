//! udplay - UDP H.264 media player.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use udplay::config::Config;
use udplay::gst::pipeline::{Player, RunOutcome};
use udplay::topology;

/// Play H.264 video (and optionally raw audio) received over UDP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Build the video branch only (skip the audio branch)
    #[arg(long)]
    video_only: bool,

    /// UDP port for the video stream
    #[arg(long)]
    video_port: Option<u16>,

    /// UDP port for the audio stream
    #[arg(long)]
    audio_port: Option<u16>,

    /// Output video width
    #[arg(long)]
    width: Option<i32>,

    /// Output video height
    #[arg(long)]
    height: Option<i32>,
}

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let config = match Config::from_figment(
        args.video_port,
        args.audio_port,
        args.width,
        args.height,
        args.video_only,
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging - use RUST_LOG env var, then the configured level
    let default_level = config.log_level.as_deref().unwrap_or("info").to_string();
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .compact()
        .init();

    match run(&config) {
        Ok(RunOutcome::Finished) => ExitCode::SUCCESS,
        Ok(RunOutcome::Failed) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> anyhow::Result<RunOutcome> {
    gstreamer::init()?;
    info!("GStreamer initialized");

    let branches = topology::branches(config);
    info!(
        "Building pipeline with {} branch(es): {}",
        branches.len(),
        branches
            .iter()
            .map(|b| b.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let player = Player::new(&branches)?;
    let outcome = player.run()?;
    info!("Run {}", outcome);
    Ok(outcome)
}
