use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber;

use story_compositor::{composition::CompositionEngine, config::Config};

#[derive(Parser)]
#[command(
    name = "story-compositor",
    version,
    about = "Stitch generated story assets into a narrated video",
    long_about = "Story-Compositor sequences pre-generated scene images, actor portraits, and TTS audio into one narrated video, timing each image to its audio and optionally applying a camera-shake effect."
)]
struct Cli {
    /// Path to the story JSON document
    #[arg(short, long)]
    story: PathBuf,

    /// Directory containing the generated assets (images and audio)
    #[arg(short, long)]
    assets: PathBuf,

    /// Directory for the final video
    #[arg(short, long, default_value = "final_output")]
    output: PathBuf,

    /// Apply the camera-shake effect to all clips
    #[arg(long)]
    shake: bool,

    /// Archive the story, assets, and final video into this directory
    #[arg(long)]
    archive: Option<PathBuf>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("Starting Story-Compositor v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = match cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(&config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };
    if cli.shake {
        config.shake.enabled = true;
    }
    config.validate()?;

    let engine = CompositionEngine::new(config);

    let video = engine
        .compose(&cli.story, &cli.assets, &cli.output)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    info!(
        "Done: {:?} ({:.1}s, {} frames)",
        video.path, video.duration, video.frame_count
    );

    if let Some(projects_dir) = cli.archive {
        let project_dir =
            engine.archive_project(&cli.story, &cli.assets, &video, &projects_dir)?;
        info!("Archived project to {:?}", project_dir);
    }

    Ok(())
}
