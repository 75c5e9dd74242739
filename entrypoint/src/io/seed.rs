//! One-time population of the public volume from bundled defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::core::layout::{SiteLayout, is_ignored_seed_entry};

/// What [`seed_public_dir`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Destination was empty and has been populated from the defaults.
    Populated {
        /// Number of files copied.
        files: usize,
    },
    /// Destination already had content; nothing was written.
    AlreadyPopulated,
}

/// Seed the public directory from the default dataset, at most once.
///
/// The destination counts as empty when it holds nothing besides the
/// `lost+found` housekeeping entry. A non-empty destination is left
/// byte-for-byte untouched. The copy resolves symlinks, preserves file
/// modification times, and skips (rather than errors on) targets that
/// already exist.
///
/// Failure is fatal by contract: a missing default dataset or an I/O error
/// mid-copy means the volume is misconfigured, and startup must halt
/// instead of running degraded.
#[instrument(skip_all, fields(public_dir = %layout.public_dir.display()))]
pub fn seed_public_dir(layout: &SiteLayout) -> Result<SeedOutcome> {
    if !layout.default_dir.is_dir() {
        bail!(
            "default public data directory {} not found",
            layout.default_dir.display()
        );
    }

    fs::create_dir_all(&layout.public_dir).with_context(|| {
        format!(
            "create public directory {}",
            layout.public_dir.display()
        )
    })?;

    if !is_effectively_empty(&layout.public_dir)? {
        debug!("public directory already populated, skipping seed");
        return Ok(SeedOutcome::AlreadyPopulated);
    }

    let files = copy_tree(&layout.default_dir, &layout.public_dir)?;
    Ok(SeedOutcome::Populated { files })
}

/// Empty except for filesystem housekeeping entries.
fn is_effectively_empty(dir: &Path) -> Result<bool> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("read directory {}", dir.display()))?;
    for entry in entries {
        let entry =
            entry.with_context(|| format!("read directory entry in {}", dir.display()))?;
        if !is_ignored_seed_entry(&entry.file_name().to_string_lossy()) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Recursively copy `src` into `dst`.
///
/// Symlinks are followed, so the destination only ever receives regular
/// files and directories. Existing targets are skipped, not overwritten
/// and not treated as errors.
fn copy_tree(src: &Path, dst: &Path) -> Result<usize> {
    let mut copied = 0usize;
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.with_context(|| format!("walk {}", src.display()))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .context("strip copy source prefix")?;
        if rel.as_os_str().is_empty() {
            continue;
        }
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("create directory {}", target.display()))?;
            continue;
        }
        if target.exists() {
            debug!(target = %target.display(), "target exists, not overwriting");
            continue;
        }
        fs::copy(entry.path(), &target).with_context(|| {
            format!("copy {} to {}", entry.path().display(), target.display())
        })?;
        copy_mtime(entry.path(), &target)?;
        copied += 1;
    }
    Ok(copied)
}

fn copy_mtime(src: &Path, dst: &Path) -> Result<()> {
    let modified = fs::metadata(src)
        .and_then(|meta| meta.modified())
        .with_context(|| format!("read mtime of {}", src.display()))?;
    let target = fs::File::options()
        .write(true)
        .open(dst)
        .with_context(|| format!("open {} for mtime update", dst.display()))?;
    target
        .set_times(fs::FileTimes::new().set_modified(modified))
        .with_context(|| format!("set mtime of {}", dst.display()))?;
    Ok(())
}
