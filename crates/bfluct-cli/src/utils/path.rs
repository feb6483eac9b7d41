use crate::error::{CliError, Result};
use std::path::{Path, PathBuf};

/// Rejects a user-supplied path whose extension does not match the expected
/// input format, before any work is done with it.
pub fn ensure_extension(path: &Path, expected: &str) -> Result<()> {
    let matches = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(expected));
    if matches {
        Ok(())
    } else {
        Err(CliError::Argument(format!(
            "'{}' does not have the expected .{} extension",
            path.display(),
            expected
        )))
    }
}

/// Returns the first free `Results_<N>` directory name under `base`,
/// starting at 1. The directory is not created.
pub fn next_results_dir(base: &Path) -> PathBuf {
    let mut index = 1;
    loop {
        let candidate = base.join(format!("Results_{}", index));
        if !candidate.exists() {
            return candidate;
        }
        index += 1;
    }
}
