//! Clipgen - AI image generation CLI for the Clipdrop API.

mod adapters;
mod cassette;
mod cli;
mod config;
mod context;
mod error;
mod gallery;
mod output;
mod ports;
mod prompts;

use std::path::Path;
use std::process;

use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::{AppError, GenerationError};
use crate::gallery::{Gallery, GeneratedImage};
use crate::output::{image_extension, numbered_path, resolve_output_path, save_image};
use crate::ports::GenerationRequest;
use crate::prompts::{is_known_style, style_label, STYLES};

#[tokio::main]
async fn main() {
    let dotenv_result = dotenv::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // A missing .env is normal; a malformed one is worth mentioning.
    match dotenv_result {
        Err(e) if !e.not_found() => warn!(error = %e, "Failed to load .env file"),
        _ => {}
    }

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "clipgen=debug"
    } else {
        "clipgen=warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), AppError> {
    if cli.list_styles {
        for style in STYLES {
            println!("{:<14} {}", style.value, style.label);
        }
        return Ok(());
    }

    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(AppError::Config)?;
    debug!(path = %config_path.display(), "Config resolved");

    // Resolve prompt and style
    let prompt = cli.resolve_prompt()?;
    let default_style = &config.defaults.style;
    let style = cli.style.clone().unwrap_or_else(|| default_style.clone());
    if !is_known_style(&style) {
        warn!(%style, "Unrecognized style, sending it as is");
    }
    let request = GenerationRequest::new(prompt, style)
        .map_err(AppError::InvalidArgument)?;
    if cli.surprise {
        eprintln!("Prompt: {}", request.prompt);
    }

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var("CLIPGEN_REPLAY").ok();
    let is_recording = std::env::var("CLIPGEN_REC")
        .is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        info!(cassette = %cassette_path, "Replaying");
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else if is_recording {
        info!("Recording mode enabled");
        let (ctx, session) = ServiceContext::recording(&config);
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config), None)
    };

    let (gallery, failure) = generate_all(&ctx, request, cli.count).await;

    // The recorder can only be unwrapped once the context is gone.
    drop(ctx);
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => warn!(error = %e, "Failed to save cassette"),
        }
    }

    if !gallery.is_empty() {
        save_gallery(&gallery, cli.output.as_deref())?;
    }

    match failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

/// Generate up to `count` images. The first answers `request`; each later
/// one regenerates the latest image. Stops at the first failure and returns
/// what was produced so far alongside it.
async fn generate_all(
    ctx: &ServiceContext,
    request: GenerationRequest,
    count: u32,
) -> (Gallery, Option<GenerationError>) {
    let mut gallery = Gallery::default();

    for attempt in 1..=count {
        let next = gallery
            .latest()
            .map_or_else(|| request.clone(), GeneratedImage::to_request);
        match ctx.generator.generate(&next).await {
            Ok(result) => {
                let image = GeneratedImage::new(&next, result);
                debug!(attempt, id = %image.id, bytes = image.data.len(), "Generated image");
                gallery = gallery.with_image(image);
            }
            Err(e) => {
                warn!(attempt, error = %e, "Generation failed");
                return (gallery, Some(e));
            }
        }
    }

    (gallery, None)
}

fn save_gallery(gallery: &Gallery, explicit: Option<&str>) -> Result<(), AppError> {
    let numbered = gallery.len() > 1;

    for (i, image) in gallery.oldest_first().enumerate() {
        let ext = image_extension(&image.data);
        let base = resolve_output_path(explicit, &image.prompt, ext);
        let path = if numbered {
            numbered_path(&base, i + 1)
        } else {
            base
        };
        save_image(&image.data, &path)?;
        eprintln!("Saved: {}", path.display());
    }

    for image in gallery.newest_first() {
        println!(
            "{}  {:<12}  {}",
            image.created_at.format("%H:%M:%S"),
            style_label(&image.style),
            image.prompt
        );
    }

    Ok(())
}
