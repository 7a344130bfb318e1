use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use editor_core::{
    CodecSelection, EditorController, ExportOutcome, FileDownloadSink, KeyPress, OpenOutcome,
};
use raster_engine::{CanvasBounds, RasterEngine};
use shared::CodecIndex;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the codecs the engine offers.
    Codecs,
    /// Load a file, navigate it and export the resulting view as PNG.
    Render {
        input: PathBuf,
        #[arg(long, default_value_t = 0)]
        codec: usize,
        /// Byte offset, decimal or 0x-prefixed hex.
        #[arg(long)]
        offset: Option<String>,
        /// Key presses to replay, e.g. `alt+right,shift+down,down`.
        #[arg(long, value_delimiter = ',')]
        keys: Vec<KeyPress>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = editor_core::load_settings();
    let engine = RasterEngine::new(CanvasBounds {
        width_px: settings.canvas_width,
        height_px: settings.canvas_height,
    });
    let mut controller = EditorController::new(engine, &settings.codec_labels())
        .with_export_filename(settings.export_filename.clone());

    match cli.command {
        Command::Codecs => {
            for descriptor in controller.registry().descriptors() {
                let layout = if descriptor.is_tiled { "tiled" } else { "linear" };
                println!(
                    "{}\t{}\t{}\t{}",
                    descriptor.index, descriptor.identifier, layout, descriptor.display_name
                );
            }
        }
        Command::Render {
            input,
            codec,
            offset,
            keys,
            output,
        } => {
            let bytes = tokio::fs::read(&input)
                .await
                .with_context(|| format!("failed to read '{}'", input.display()))?;
            let ticket = controller.begin_open();
            if let OpenOutcome::Superseded = controller.complete_open(ticket, bytes)? {
                bail!("open of '{}' was superseded", input.display());
            }

            if codec != 0 {
                if let CodecSelection::NoSession = controller.select_codec(CodecIndex(codec))? {
                    bail!("no session to select codec {codec} on");
                }
            }
            if let Some(offset) = offset {
                controller
                    .submit_offset(&offset)
                    .with_context(|| format!("rejected --offset '{offset}'"))?;
            }
            for key in keys {
                controller.handle_key(key);
            }

            let destination =
                output.unwrap_or_else(|| PathBuf::from(controller.export_filename()));
            let mut sink = FileDownloadSink::new(settings.staging_dir(), &destination);
            match controller.export_image(&mut sink)? {
                ExportOutcome::Delivered { byte_len, .. } => {
                    tracing::info!(
                        input = %input.display(),
                        output = %destination.display(),
                        bytes = byte_len,
                        "render finished"
                    );
                    println!("{}", controller.status_line().unwrap_or_default());
                    println!("wrote {byte_len} bytes to {}", destination.display());
                }
                ExportOutcome::NoSession => bail!("nothing to export"),
            }
        }
    }

    Ok(())
}

/// `RUST_LOG` when it parses, otherwise warnings only so stdout stays scriptable.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| {
            EnvFilter::try_new(directives)
                .inspect_err(|err| eprintln!("ignoring RUST_LOG: {err}"))
                .ok()
        })
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}
