//! Suggested file names for imposed output

use crate::constants::DEFAULT_IDENTIFIER;
use crate::types::PrintMode;
use std::path::{Path, PathBuf};

/// `<identifier>-<mode>.pdf`, e.g. `VAC-LFMA-booklet.pdf`
pub fn output_file_name(identifier: &str, mode: PrintMode) -> String {
    let identifier = identifier.trim();
    let identifier = if identifier.is_empty() {
        DEFAULT_IDENTIFIER
    } else {
        identifier
    };
    format!("{}-{}.pdf", identifier, mode)
}

/// Identifier derived from a source file path (its stem)
pub fn identifier_from_path(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_IDENTIFIER)
        .to_string()
}

/// Output path next to `input`, named after it
pub fn default_output_path(input: impl AsRef<Path>, mode: PrintMode) -> PathBuf {
    let input = input.as_ref();
    let name = output_file_name(&identifier_from_path(input), mode);
    match input.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}
