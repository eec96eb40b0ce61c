use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use hf_hub::api::sync::ApiBuilder;
use hf_hub::{Repo, RepoType};

use crate::error::FetchError;

/// Fixed chunk size for streaming HTTP bodies to disk.
const CHUNK_SIZE: usize = 8192;

/// How the hub path landed the file at the destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Placement {
    Linked,
    Copied,
}

/// Fetch one repo file through the hub client and place it at `destination`.
///
/// The client owns the cache layout under `cache_dir`, including integrity
/// checks and blob re-use across repos and revisions; this function only
/// links (or copies) the cached path into place.
pub fn fetch_hub(
    repo_id: &str,
    file_path: &str,
    revision: &str,
    cache_dir: &Path,
    destination: &Path,
    dry_run: bool,
) -> Result<(), FetchError> {
    fs::create_dir_all(cache_dir)?;

    if dry_run {
        println!(
            "[dry-run] hf:{repo_id}@{revision}:{file_path} -> {}",
            destination.display()
        );
        return Ok(());
    }

    println!(
        "Fetching hf:{repo_id}@{revision}:{file_path} -> {}",
        destination.display()
    );

    let api = ApiBuilder::new()
        .with_progress(false)
        .with_cache_dir(cache_dir.to_path_buf())
        .build()
        .map_err(|source| FetchError::HubFetch {
            repo_id: repo_id.to_string(),
            message: source.to_string(),
        })?;

    let repo = api.repo(Repo::with_revision(
        repo_id.to_string(),
        RepoType::Model,
        revision.to_string(),
    ));

    let cached = repo.get(file_path).map_err(|source| FetchError::HubFetch {
        repo_id: repo_id.to_string(),
        message: format!("failed downloading '{file_path}': {source}"),
    })?;

    match place_cached(&cached, destination)? {
        Placement::Linked => println!(
            "Linked {} -> {}",
            destination.display(),
            cached.display()
        ),
        Placement::Copied => println!(
            "Copied {} -> {}",
            cached.display(),
            destination.display()
        ),
    }
    println!("Done: {}", destination.display());

    Ok(())
}

/// Stream a direct URL to `destination` in fixed-size chunks.
///
/// The agent keeps its default configuration, which sets no timeout; an
/// unresponsive server blocks the transfer indefinitely.
pub fn fetch_url(url: &str, destination: &Path, dry_run: bool) -> Result<(), FetchError> {
    if dry_run {
        println!("[dry-run] url:{url} -> {}", destination.display());
        return Ok(());
    }

    println!("Fetching {url} -> {}", destination.display());

    let mut response = ureq::get(url)
        .call()
        .map_err(|source| FetchError::Transfer {
            url: url.to_string(),
            message: source.to_string(),
        })?;

    // A fresh file must replace a previous cache link, not write through it.
    remove_if_symlink(destination)?;

    let mut reader = response.body_mut().as_reader();
    let mut out = File::create(destination)?;
    copy_chunked(&mut reader, &mut out).map_err(|source| FetchError::Transfer {
        url: url.to_string(),
        message: source.to_string(),
    })?;

    println!("Downloaded {url} -> {}", destination.display());
    println!("Done: {}", destination.display());

    Ok(())
}

/// Link the cached file into place, falling back to a byte copy whenever
/// link creation fails (cross-device cache, permissions, filesystems
/// without symlink support). The fallback is unconditional on the failure
/// kind and never surfaces as an error on its own.
fn place_cached(cached: &Path, destination: &Path) -> Result<Placement, FetchError> {
    remove_if_symlink(destination)?;

    match symlink_file(cached, destination) {
        Ok(()) => Ok(Placement::Linked),
        Err(_) => {
            fs::copy(cached, destination)?;
            Ok(Placement::Copied)
        }
    }
}

fn remove_if_symlink(destination: &Path) -> Result<(), FetchError> {
    let is_symlink = fs::symlink_metadata(destination)
        .map(|meta| meta.file_type().is_symlink())
        .unwrap_or(false);
    if is_symlink {
        fs::remove_file(destination)?;
    }
    Ok(())
}

#[cfg(unix)]
fn symlink_file(original: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(original, link)
}

#[cfg(windows)]
fn symlink_file(original: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(original, link)
}

/// Incremental copy so multi-gigabyte payloads never sit in memory.
fn copy_chunked<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> std::io::Result<u64> {
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut written = 0u64;
    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        writer.write_all(&buffer[..read])?;
        written += read as u64;
    }
    Ok(written)
}
