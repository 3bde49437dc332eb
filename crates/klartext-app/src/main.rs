// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Klartext: screen-region OCR for clinical record tables.
//
// Entry point. Initialises logging, loads the configuration and dispatches the
// CLI subcommand. Logs go to stderr; stdout carries only normalized text.

mod services;

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use klartext_bridge::{StdoutSink, TextSink, platform_capture, platform_clipboard};
use klartext_core::error::Result;
use klartext_core::human_errors::humanize_error;
use klartext_core::types::CaptureRegion;
use klartext_document::ImageProcessor;

use services::app_services::AppServices;

#[derive(Parser)]
#[command(name = "klartext", version)]
#[command(about = "Turn OCR'd clinical record tables into clean, dated, deduplicated lines")]
struct Cli {
    /// Config file (default: $XDG_DATA_HOME/klartext/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize raw OCR text from FILE, or stdin when omitted
    Normalize {
        file: Option<PathBuf>,
    },
    /// Preprocess, OCR and normalize an image file
    Image {
        path: PathBuf,
        /// Tesseract executable, overriding the config
        #[arg(long)]
        tesseract: Option<PathBuf>,
        /// Also copy the result to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Capture a screen region, OCR it and copy the normalized text
    Capture {
        #[arg(allow_negative_numbers = true)]
        x1: f64,
        #[arg(allow_negative_numbers = true)]
        y1: f64,
        #[arg(allow_negative_numbers = true)]
        x2: f64,
        #[arg(allow_negative_numbers = true)]
        y2: f64,
    },
    /// Print the combined bounds of all monitors
    Bounds,
    /// Print the effective configuration
    Config {
        /// Write the default configuration to the config path first
        #[arg(long)]
        init: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = %err, "command failed");
            eprintln!("{}", humanize_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Normalize { file } => {
            let raw = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            StdoutSink.deliver(&klartext_text::process_text(&raw))
        }

        Commands::Image {
            path,
            tesseract,
            copy,
        } => {
            let mut services = AppServices::init(cli.config)?;
            if let Some(tesseract) = tesseract {
                services.config_mut().ocr.tesseract_path = tesseract;
            }
            let sink = if copy { Some(platform_clipboard()?) } else { None };
            let controller = services.controller(platform_capture(), sink)?;

            let image = ImageProcessor::open(&path)?.into_dynamic();
            let outcome = controller.handle_image(&image)?;
            StdoutSink.deliver(&outcome.text)
        }

        Commands::Capture { x1, y1, x2, y2 } => {
            let services = AppServices::init(cli.config)?;
            let sink = if services.config().copy_to_clipboard {
                Some(platform_clipboard()?)
            } else {
                None
            };
            let controller = services.controller(platform_capture(), sink)?;

            let region = CaptureRegion::from_corners((x1, y1), (x2, y2));
            let outcome = controller.handle_selection(region)?;
            tracing::info!(id = %outcome.id, entries = outcome.entry_count, "Capture complete");
            StdoutSink.deliver(&outcome.text)
        }

        Commands::Bounds => {
            let bounds = platform_capture().screen_bounds()?;
            println!("{}", serde_json::to_string_pretty(&bounds)?);
            Ok(())
        }

        Commands::Config { init } => {
            let services = if init {
                let services = AppServices::with_defaults(cli.config);
                services.persist_config()?;
                tracing::info!(path = %services.config_path().display(), "Default configuration written");
                services
            } else {
                AppServices::init(cli.config)?
            };
            println!("{}", serde_json::to_string_pretty(services.config())?);
            Ok(())
        }
    }
}
