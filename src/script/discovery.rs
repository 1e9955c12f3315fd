use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::{ErrorKind, SeqError};

/// Extension of call script files.
pub const SCRIPT_EXTENSION: &str = "seq";

fn is_script_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SCRIPT_EXTENSION)
}

/// Recursively finds `.seq` files under `root`, sorted for a deterministic
/// run order. A single file path is returned as-is.
pub fn discover<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>, SeqError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| {
            SeqError::unsourced(
                ErrorKind::Io {
                    message: format!("failed to walk directory: {e}"),
                },
                "discovery",
            )
        })?;
        if entry.file_type().is_file() && is_script_file(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}
