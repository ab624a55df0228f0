//! Content-addressed storage paths for curve data files
//!
//! Every curve file lives at a location derived from a stable identity string
//! (owner, well, dataset, curve, unit, step), so re-importing the same curve
//! lands on the same file. The scheme is pluggable through [`PathResolver`].

use crate::{Error, Result};
use sha2::{Digest as _, Sha256};
use std::path::{Path, PathBuf};

/// Allocates the on-disk location of a curve file
pub trait PathResolver: Send + Sync {
    /// Deterministically map an identity to a file path under `root`,
    /// creating any parent directories
    fn resolve(&self, root: &Path, identity: &str, file_name: &str) -> Result<PathBuf>;
}

/// Nests files under directories named after the SHA-256 of the identity:
/// `root/ab/cd/abcd.../file_name`
#[derive(Debug, Clone, Copy, Default)]
pub struct HashDirResolver;

impl HashDirResolver {
    pub fn new() -> Self {
        Self
    }

    /// Hex SHA-256 digest of an identity string
    pub fn digest(identity: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(identity.as_bytes());
        let hash = hasher.finalize();
        format!("{hash:x}")
    }
}

impl PathResolver for HashDirResolver {
    fn resolve(&self, root: &Path, identity: &str, file_name: &str) -> Result<PathBuf> {
        let digest = Self::digest(identity);
        let dir = root.join(&digest[0..2]).join(&digest[2..4]).join(&digest);

        std::fs::create_dir_all(&dir).map_err(|e| {
            Error::io(
                format!("Failed to create storage directory {}", dir.display()),
                e,
            )
        })?;

        Ok(dir.join(file_name))
    }
}

/// Identity string of one curve file
pub fn curve_identity(
    user: &str,
    well_name: &str,
    dataset_name: &str,
    curve_name: &str,
    unit: &str,
    step: f64,
) -> String {
    format!("{user}{well_name}{dataset_name}{curve_name}{unit}{step}")
}

/// Path of `path` relative to the storage root; unchanged if outside it
pub fn relative_to_root(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}
