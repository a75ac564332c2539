//! Request path classification.

use super::GateConfig;

/// What the gate should do with a path, before any I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass<'a> {
    /// Exactly `/`.
    Root,
    /// The admin prefix itself or anything below it.
    Admin,
    /// `<space-prefix>/<slug><rest>`. `rest` keeps its leading `/` and may be empty.
    Space { slug: &'a str, rest: &'a str },
    /// Anything else. Passed through untouched.
    Other,
}

/// Classify a request path. Pure and deterministic.
///
/// A prefix-only path (`/space`, `/space/`, `/space//x`) is `Other`, never an empty slug.
pub fn classify<'a>(path: &'a str, config: &GateConfig) -> PathClass<'a> {
    if path == "/" {
        return PathClass::Root;
    }
    if under_prefix(path, &config.admin_prefix) {
        return PathClass::Admin;
    }
    let Some(after) = path
        .strip_prefix(config.space_prefix.as_str())
        .and_then(|tail| tail.strip_prefix('/'))
    else {
        return PathClass::Other;
    };
    let (slug, rest) = match after.find('/') {
        Some(idx) => after.split_at(idx),
        None => (after, ""),
    };
    if slug.is_empty() {
        return PathClass::Other;
    }
    PathClass::Space { slug, rest }
}

/// Paths the gate never inspects: API routes, static assets and well-known files.
pub fn is_excluded(path: &str, config: &GateConfig) -> bool {
    config.excluded_files.iter().any(|file| file == path)
        || config
            .excluded_prefixes
            .iter()
            .any(|prefix| under_prefix(path, prefix))
}

/// `path` equals `prefix` or continues it with a `/`. `/administrator` is not under `/admin`.
fn under_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(tail) => tail.is_empty() || tail.starts_with('/'),
        None => false,
    }
}
