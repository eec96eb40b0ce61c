//! Single-file fetch orchestration.
//!
//! This module owns the request model (source selection plus destination
//! options) and the two halves of a fetch: path resolution (`resolve`) and
//! transfer (`acquire`).

pub mod acquire;
pub mod resolve;

use std::path::PathBuf;

use crate::error::FetchError;

/// Where the requested file comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchSource {
    /// A file inside a Hugging Face repository at a given revision.
    HubFile {
        repo_id: String,
        file_path: String,
        revision: String,
    },
    /// A direct HTTP(S) endpoint.
    DirectUrl { url: String },
}

/// One fully described fetch invocation.
#[derive(Clone, Debug)]
pub struct FetchRequest {
    pub source: FetchSource,
    pub output_dir: PathBuf,
    pub base_dir: Option<PathBuf>,
    pub dest_name: Option<String>,
    pub dry_run: bool,
}

/// Map the raw source-selection flags into a [`FetchSource`].
///
/// Exactly one of `--hf`/`--url` must be present, and `--file` travels
/// with `--hf` only. Anything else is rejected before any filesystem or
/// network activity.
pub fn validate_source(
    hf: Option<String>,
    url: Option<String>,
    file: Option<String>,
    revision: String,
) -> Result<FetchSource, FetchError> {
    match (hf, url) {
        (Some(repo_id), None) => {
            let file_path = file
                .ok_or_else(|| FetchError::Usage("--file is required with --hf".to_string()))?;
            Ok(FetchSource::HubFile {
                repo_id,
                file_path,
                revision,
            })
        }
        (None, Some(url)) => {
            if file.is_some() {
                return Err(FetchError::Usage(
                    "--file only applies to --hf sources".to_string(),
                ));
            }
            Ok(FetchSource::DirectUrl { url })
        }
        (Some(_), Some(_)) => Err(FetchError::Usage(
            "--hf and --url are mutually exclusive".to_string(),
        )),
        (None, None) => Err(FetchError::Usage(
            "one of --hf or --url is required".to_string(),
        )),
    }
}
