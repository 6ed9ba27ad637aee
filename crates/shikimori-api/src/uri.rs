//! URL composition for endpoint paths
//!
//! Segments are joined with `/` and resolved against the base with RFC 3986
//! reference resolution (`Url::join`), not string concatenation. A base
//! without a trailing slash therefore loses its last path segment, and `..`
//! walks up the tree.

use url::Url;

use crate::error::{Error, Result};

/// Resolve `segments` (joined with `/`) against `base`, returning a new URL.
pub fn join<S: AsRef<str>>(base: &Url, segments: &[S]) -> Result<Url> {
    let path = segments
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join("/");
    base.join(&path)
        .map_err(|e| Error::InvalidUrl(format!("cannot join {path:?} onto {base}: {e}")))
}
