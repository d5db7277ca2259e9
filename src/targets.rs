use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Parse target list content into an ordered list of hosts.
///
/// One IP address or hostname per line. Lines are trimmed and blank lines
/// dropped; duplicates and ordering are preserved as given. No address
/// syntax validation is performed here, the scanner reports unreachable
/// or nonsense targets on its own.
pub fn parse_targets_str(s: &str) -> Vec<String> {
    s.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load a target list from a file path.
///
/// A missing file is reported as [`Error::InputNotFound`]; any other read
/// failure as [`Error::InputRead`].
pub fn load_targets_from_path(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::InputNotFound(path.to_path_buf()),
        _ => Error::InputRead {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    Ok(parse_targets_str(&content))
}
