//! Filesystem layout contract for the container image.

use std::path::{Component, Path, PathBuf};

use anyhow::{Result, bail};

/// Root under which all runtime data must live.
pub const SITE_ROOT: &str = "/app";

/// Entry name ignored when deciding whether the public directory is empty.
/// ext4 volumes grow a `lost+found` directory at their mount root.
pub const SEED_IGNORED_ENTRY: &str = "lost+found";

/// The two fixed directories the entrypoint works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    /// Boundary both directories must stay inside.
    pub root: PathBuf,
    /// Mutable, persisted working directory served at runtime.
    pub public_dir: PathBuf,
    /// Read-only default dataset bundled into the image.
    pub default_dir: PathBuf,
}

impl SiteLayout {
    /// Canonical layout under `root`: `<root>/public` seeded from
    /// `<root>/public-default`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let public_dir = root.join("public");
        let default_dir = root.join("public-default");
        Self {
            root,
            public_dir,
            default_dir,
        }
    }

    /// Reject a layout whose directories escape the root.
    ///
    /// Purely lexical: no `..` component is allowed anywhere, and both
    /// directories must sit under [`SiteLayout::root`]. Must pass before
    /// any filesystem mutation happens.
    pub fn ensure_confined(&self) -> Result<()> {
        for dir in [&self.public_dir, &self.default_dir] {
            if has_parent_component(dir) {
                bail!(
                    "invalid directory path {}: contains a parent-directory component",
                    dir.display()
                );
            }
            if !dir.starts_with(&self.root) {
                bail!(
                    "invalid directory path {}: escapes {}",
                    dir.display(),
                    self.root.display()
                );
            }
        }
        Ok(())
    }
}

/// Whether `name` is filesystem housekeeping rather than site content.
pub fn is_ignored_seed_entry(name: &str) -> bool {
    name == SEED_IGNORED_ENTRY
}

fn has_parent_component(path: &Path) -> bool {
    path.components()
        .any(|component| matches!(component, Component::ParentDir))
}
