//! Helpers for logical `/`-separated paths.
//!
//! Logical paths come from the host and may carry tokens such as
//! `{{Documents}}`, so they are handled as strings rather than `std::path`
//! values (whose separators depend on the build target).

/// Converts host-native separators to `/`.
pub(crate) fn normalise(path: &str) -> String {
    path.replace('\\', "/")
}

fn trim_trailing_separators(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') {
        "/"
    } else {
        trimmed
    }
}

/// Directory part of `path` (`"."` when there is none, `"/"` for top-level items).
pub(crate) fn dirname(path: &str) -> String {
    let path = trim_trailing_separators(path);
    match path.rfind('/') {
        None => ".".to_string(),
        Some(0) => "/".to_string(),
        Some(i) => path[..i].to_string(),
    }
}

/// Last segment of `path`.
pub(crate) fn basename(path: &str) -> &str {
    let path = trim_trailing_separators(path);
    match path.rfind('/') {
        Some(i) if path.len() > 1 => &path[i + 1..],
        _ => path,
    }
}

/// Extension of the last segment including the dot, or empty.
///
/// A leading dot (`.profile`) is not an extension.
pub(crate) fn extname(path: &str) -> &str {
    let base = basename(path);
    match base.rfind('.') {
        Some(0) | None => "",
        Some(i) => &base[i..],
    }
}

/// Last segment without its extension.
pub(crate) fn stem(path: &str) -> &str {
    let base = basename(path);
    let ext = extname(base);
    &base[..base.len() - ext.len()]
}

/// Joins two logical path pieces with exactly one separator.
pub(crate) fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() || dir == "." {
        return name.to_string();
    }
    if name.is_empty() {
        return dir.to_string();
    }
    format!(
        "{}/{}",
        dir.trim_end_matches('/'),
        name.trim_start_matches('/')
    )
}
