//! Import specifier to file path resolution.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use tracing::trace;

use crate::fs::FileSystem;

/// Resolves `specifier` relative to the directory of `from`.
///
/// Only relative and absolute specifiers are followed; package imports
/// never resolve. A trailing `.js` is dropped, then the path is tried as-is
/// when it already carries one of `extensions`, then with each extension
/// appended in order.
pub(crate) fn locate(
    fs: &dyn FileSystem,
    from: &Path,
    specifier: &str,
    extensions: &[String],
) -> Option<PathBuf> {
    if !is_local(specifier) {
        trace!(specifier, "skipping package import");
        return None;
    }

    let specifier = specifier.strip_suffix(".js").unwrap_or(specifier);
    let directory = from.parent().unwrap_or_else(|| Path::new(""));
    let base = directory.join(specifier).clean();

    let base_name = base.to_string_lossy();
    if extensions.iter().any(|ext| base_name.ends_with(ext.as_str())) && fs.exists(&base) {
        return Some(base);
    }

    extensions.iter().find_map(|ext| {
        let mut candidate = OsString::from(base.as_os_str());
        candidate.push(ext);
        let candidate = PathBuf::from(candidate);
        trace!(candidate = %candidate.display(), "probing import target");
        fs.exists(&candidate).then_some(candidate)
    })
}

fn is_local(specifier: &str) -> bool {
    specifier.starts_with("./") || specifier.starts_with("../") || specifier.starts_with('/')
}
