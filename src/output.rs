//! Writing aggregated lists to disk.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "subnets";

/// Default IPv4 list file name.
pub const DEFAULT_V4_FILE: &str = "ipv4.lst";

/// Default IPv6 list file name.
pub const DEFAULT_V6_FILE: &str = "ipv6.lst";

/// Counts and locations of a written result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub v4_count: usize,
    pub v6_count: usize,
    pub v4_path: PathBuf,
    pub v6_path: PathBuf,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.v4_count + self.v6_count
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total: {} (IPv4: {}, IPv6: {})",
            self.total(),
            self.v4_count,
            self.v6_count
        )
    }
}

/// Write both lists, creating parent directories as needed.
///
/// Each file is the newline-joined list with no trailing newline, and
/// replaces whatever was there before.
pub fn write_lists(
    v4_path: &Path,
    v6_path: &Path,
    v4: &[String],
    v6: &[String],
) -> Result<Summary> {
    write_list(v4_path, v4)?;
    write_list(v6_path, v6)?;

    Ok(Summary {
        v4_count: v4.len(),
        v6_count: v6.len(),
        v4_path: v4_path.to_path_buf(),
        v6_path: v6_path.to_path_buf(),
    })
}

/// Write one list to `path`.
pub fn write_list(path: &Path, entries: &[String]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, entries.join("\n"))?;
    log::debug!("Wrote {} entries to {:?}", entries.len(), path);
    Ok(())
}
