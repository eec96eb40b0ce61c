//! Modelfetch: single-file model downloader.
//!
//! Modelfetch fetches ONE file (a Hugging Face repo file or a direct HTTP
//! URL) and writes it into a flat output directory, discarding any
//! intermediate path components. Hub downloads go through a shared
//! `hf-cache` directory so blobs are re-used across invocations; the
//! destination becomes a symlink into that cache when the filesystem
//! allows it, and a plain copy otherwise. A regular file already at the
//! destination is left untouched, which makes invocations idempotent.
//!
//! # Examples
//!
//! ```text
//! # Hugging Face repo file (keep only the basename in the output dir)
//! modelfetch --hf Comfy-Org/Wan_2.1_ComfyUI_repackaged \
//!     --file split_files/vae/wan_2.1_vae.safetensors \
//!     --output-dir models/vae
//!
//! # Specific revision
//! modelfetch --hf Comfy-Org/Wan_2.2_ComfyUI_Repackaged --rev main \
//!     --file split_files/diffusion_models/wan2.2_t2v_high_noise_14B_fp16.safetensors \
//!     --output-dir models/diffusion_models
//!
//! # Direct URL
//! modelfetch --url https://example.com/path/model.bin --output-dir models/extras
//! ```
//!
//! # Modules
//!
//! - [`fetch`]: request model, destination resolution, and the two
//!   transfer paths
//! - [`error`]: error types for modelfetch operations

pub mod error;
pub mod fetch;

use std::path::PathBuf;

use clap::Parser;

pub use error::FetchError;

use fetch::{FetchRequest, FetchSource};

/// The modelfetch CLI application.
#[derive(Parser)]
#[command(name = "modelfetch")]
#[command(version, author, about)]
struct Cli {
    /// Hugging Face repo id, e.g. owner/name
    #[arg(long, value_name = "REPO_ID")]
    hf: Option<String>,

    /// Direct HTTP(S) URL
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// File path inside the HF repo (required with --hf)
    #[arg(long, value_name = "PATH")]
    file: Option<String>,

    /// HF revision (tag/branch/commit)
    #[arg(long, default_value = "main", value_name = "REVISION")]
    rev: String,

    /// Destination directory (absolute, or relative to --base-dir if that is provided)
    #[arg(short = 'o', long, value_name = "DIR")]
    output_dir: PathBuf,

    /// Base directory for a shared hf-cache (defaults to --output-dir if omitted)
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// Override the output file name (defaults to the basename of the source path)
    #[arg(long, value_name = "NAME")]
    dest_name: Option<String>,

    /// Show actions without downloading
    #[arg(short = 'n', long)]
    dry_run: bool,
}

/// Run the modelfetch CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), FetchError> {
    let cli = Cli::parse();

    let source = fetch::validate_source(cli.hf, cli.url, cli.file, cli.rev)?;
    let request = FetchRequest {
        source,
        output_dir: cli.output_dir,
        base_dir: cli.base_dir,
        dest_name: cli.dest_name,
        dry_run: cli.dry_run,
    };

    let paths = fetch::resolve::resolve_paths(&request)?;

    if fetch::resolve::skip_existing(&paths.destination) {
        println!("Skip existing: {}", paths.destination.display());
        return Ok(());
    }

    match &request.source {
        FetchSource::HubFile {
            repo_id,
            file_path,
            revision,
        } => fetch::acquire::fetch_hub(
            repo_id,
            file_path,
            revision,
            &paths.hub_cache_dir(),
            &paths.destination,
            request.dry_run,
        ),
        FetchSource::DirectUrl { url } => {
            fetch::acquire::fetch_url(url, &paths.destination, request.dry_run)
        }
    }
}
