//! `scopegrab` CLI - capture and annotate DS1000Z oscilloscope screens

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cmd;

#[derive(Parser)]
#[command(name = "scopegrab")]
#[command(about = "LAN screen capture for Rigol DS1000Z-series oscilloscopes")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture the screen as an image, decluttered and annotated
    Screen {
        /// Hostname or IP of the oscilloscope ("default" uses config.toml)
        hostname: Option<String>,

        /// Output file (default: derived from model, timestamp, and note)
        filename: Option<PathBuf>,

        /// Image format for derived filenames
        #[arg(short = 't', long, value_enum, default_value_t = OutputFormat::Png)]
        format: OutputFormat,

        /// Note label drawn top-center and used for the filename
        #[arg(short, long)]
        note: Option<String>,

        /// Channel 1 label
        #[arg(short = '1', long)]
        label1: Option<String>,

        /// Channel 2 label
        #[arg(short = '2', long)]
        label2: Option<String>,

        /// Channel 3 label
        #[arg(short = '3', long)]
        label3: Option<String>,

        /// Channel 4 label
        #[arg(short = '4', long)]
        label4: Option<String>,

        /// Save the raw image, with no annotation or de-cluttering
        #[arg(short, long)]
        raw: bool,

        /// Capture even if the instrument is not a DS1000Z-series scope
        #[arg(long)]
        any_model: bool,
    },

    /// Save the displayed waveform data of every active channel as CSV
    Waveform {
        /// Hostname or IP of the oscilloscope ("default" uses config.toml)
        hostname: Option<String>,

        /// Output file (default: derived from model and timestamp)
        filename: Option<PathBuf>,

        /// Capture even if the instrument is not a DS1000Z-series scope
        #[arg(long)]
        any_model: bool,
    },

    /// Print the instrument identification
    Identify {
        /// Hostname or IP of the oscilloscope ("default" uses config.toml)
        hostname: Option<String>,
    },
}

/// Image formats the capture can be saved as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Png,
    Bmp,
    Jpeg,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Jpeg => "jpg",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .compact()
        .init();

    match cli.command {
        Commands::Screen {
            hostname,
            filename,
            format,
            note,
            label1,
            label2,
            label3,
            label4,
            raw,
            any_model,
        } => {
            cmd::screen::cmd_screen(
                hostname.as_deref(),
                filename.as_deref(),
                format,
                note.as_deref(),
                [
                    label1.as_deref(),
                    label2.as_deref(),
                    label3.as_deref(),
                    label4.as_deref(),
                ],
                raw,
                any_model,
            )
            .await?;
        }
        Commands::Waveform { hostname, filename, any_model } => {
            cmd::waveform::cmd_waveform(hostname.as_deref(), filename.as_deref(), any_model)
                .await?;
        }
        Commands::Identify { hostname } => {
            cmd::identify::cmd_identify(hostname.as_deref()).await?;
        }
    }

    Ok(())
}
