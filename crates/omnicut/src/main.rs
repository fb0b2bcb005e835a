//! # omnicut
//!
//! Command-line front end: loads settings, resolves the API key, and runs
//! the studio flows.

#![deny(unsafe_code)]

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use omnicut_studio::{AspectRatio, Resolution, StudioError, VideoStyle};

/// AI video generation and translate-and-dub.
#[derive(Parser, Debug)]
#[command(name = "omnicut", version, about = "AI video generation and translate-and-dub")]
struct Cli {
    /// Settings file (defaults to `~/.omnicut/settings.json`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides settings.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a video from a text prompt.
    Video {
        /// What the video should show.
        #[arg(long)]
        prompt: String,
        /// Reference image used as the starting frame.
        #[arg(long)]
        image: Option<PathBuf>,
        /// Output resolution (720p or 1080p).
        #[arg(long, default_value = "720p")]
        resolution: Resolution,
        /// Aspect ratio (16:9 or 9:16).
        #[arg(long, default_value = "16:9")]
        aspect: AspectRatio,
        /// Style preset (cinematic, anime, cyberpunk, vintage, 3d-render, realistic).
        #[arg(long, default_value = "cinematic")]
        style: VideoStyle,
        /// Where to write the MP4.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Translate the speech in an audio or video file and synthesize an English dub.
    Dub {
        /// Audio or video file.
        file: PathBuf,
        /// Where to write the WAV.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Also write the translation to this file.
        #[arg(long)]
        transcript: Option<PathBuf>,
    },
    /// Raw PCM and WAV utilities.
    Wav {
        #[command(subcommand)]
        action: WavAction,
    },
    /// Manage the stored API key.
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand, Debug)]
enum WavAction {
    /// Wrap raw 16-bit little-endian PCM in a WAV container.
    Encode {
        /// Raw PCM file.
        raw: PathBuf,
        /// Where to write the WAV.
        #[arg(long)]
        out: PathBuf,
        /// Sample rate in Hz.
        #[arg(long, default_value_t = 24_000)]
        sample_rate: u32,
        /// Interleaved channel count.
        #[arg(long, default_value_t = 1)]
        channels: u16,
    },
    /// Print the header of a WAV file.
    Inspect {
        /// WAV file.
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum AuthAction {
    /// Store an API key in `~/.omnicut/auth.json`.
    SetKey {
        /// The API key.
        key: String,
    },
    /// Show where the API key comes from.
    Status,
    /// Remove the stored API key.
    Clear,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<StudioError>() {
                Some(studio) => eprintln!("error: {}", studio.user_message()),
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings_path = cli
        .config
        .clone()
        .unwrap_or_else(omnicut_settings::settings_path);
    let settings = omnicut_settings::load_settings_from_path(&settings_path)
        .with_context(|| format!("failed to load settings from {}", settings_path.display()))?;

    let requested = cli.log_level.as_deref().unwrap_or(&settings.logging.level);
    let level = omnicut_core::logging::normalize_level(requested)
        .with_context(|| format!("unknown log level '{requested}'"))?;
    omnicut_core::logging::init_subscriber(level);
    tracing::debug!(path = %settings_path.display(), "settings loaded");

    match cli.command {
        Command::Video {
            prompt,
            image,
            resolution,
            aspect,
            style,
            out,
        } => {
            let options = commands::VideoOptions {
                prompt,
                image,
                resolution,
                aspect_ratio: aspect,
                style,
                out,
            };
            commands::video(&settings, options).await
        }
        Command::Dub {
            file,
            out,
            transcript,
        } => commands::dub(&settings, &file, out, transcript.as_deref()).await,
        Command::Wav { action } => match action {
            WavAction::Encode {
                raw,
                out,
                sample_rate,
                channels,
            } => commands::wav_encode(&raw, &out, sample_rate, channels),
            WavAction::Inspect { file } => commands::wav_inspect(&file),
        },
        Command::Auth { action } => {
            let path = omnicut_auth::default_auth_file_path();
            match action {
                AuthAction::SetKey { key } => commands::auth_set_key(&path, &key),
                AuthAction::Status => commands::auth_status(&path).await,
                AuthAction::Clear => commands::auth_clear(&path),
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
