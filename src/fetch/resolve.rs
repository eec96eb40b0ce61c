use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::FetchError;

use super::{FetchRequest, FetchSource};

/// Name of the cache subdirectory handed to the hub client.
const HF_CACHE_DIR: &str = "hf-cache";

/// Directories and final destination derived from one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub base_dir: PathBuf,
    pub output_dir: PathBuf,
    pub destination: PathBuf,
}

impl ResolvedPaths {
    /// Hub cache root, shared across invocations that use the same base.
    /// The cache layout below it belongs to the hub client.
    pub fn hub_cache_dir(&self) -> PathBuf {
        self.base_dir.join(HF_CACHE_DIR)
    }
}

/// Compute and create the directories for a request, then derive the
/// destination path.
///
/// When a base directory is supplied, a relative output directory is
/// resolved under it and the cache lives beside both; otherwise the output
/// directory doubles as the base and the cache is colocated with it. The
/// base and output directories are created here; the cache directory is
/// created by the fetcher just before the hub client runs.
pub fn resolve_paths(request: &FetchRequest) -> Result<ResolvedPaths, FetchError> {
    let (base_dir, output_dir) = match request.base_dir.as_deref() {
        Some(base) => {
            let base = absolutize(base)?;
            fs::create_dir_all(&base)?;
            let output = if request.output_dir.is_absolute() {
                request.output_dir.clone()
            } else {
                base.join(&request.output_dir)
            };
            (base, output)
        }
        None => {
            let output = absolutize(&request.output_dir)?;
            (output.clone(), output)
        }
    };

    fs::create_dir_all(&output_dir)?;

    let file_name = match request.dest_name.clone() {
        Some(name) => name,
        None => source_file_name(&request.source)?,
    };

    let destination = output_dir.join(&file_name);

    Ok(ResolvedPaths {
        base_dir,
        output_dir,
        destination,
    })
}

/// Idempotency gate: an existing non-link entry at the destination is
/// kept untouched. A symlink (even a dangling one) is fair to replace.
pub fn skip_existing(destination: &Path) -> bool {
    match fs::symlink_metadata(destination) {
        Ok(meta) => !meta.file_type().is_symlink(),
        Err(_) => false,
    }
}

/// Default destination name: the basename of the source path.
fn source_file_name(source: &FetchSource) -> Result<String, FetchError> {
    match source {
        FetchSource::HubFile { file_path, .. } => Path::new(file_path)
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| FetchError::InvalidSource {
                input: file_path.clone(),
                message: "repo file path has no file name".to_string(),
            }),
        FetchSource::DirectUrl { url } => url_file_name(url),
    }
}

fn url_file_name(input: &str) -> Result<String, FetchError> {
    let url = url::Url::parse(input).map_err(|source| FetchError::InvalidSource {
        input: input.to_string(),
        message: format!("invalid URL: {source}"),
    })?;

    let name = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();

    if name.is_empty() {
        return Err(FetchError::InvalidSource {
            input: input.to_string(),
            message: "URL must end with a file name".to_string(),
        });
    }

    Ok(name.to_string())
}

fn absolutize(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}
