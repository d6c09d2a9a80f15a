//! Virtual path normalization utilities
//!
//! Virtual paths always start with `/`, use `/` as the separator and carry
//! no trailing separator except for the root itself.

use unicode_normalization::UnicodeNormalization;

/// The root of every virtual filesystem.
pub const ROOT: &str = "/";

/// Clean a virtual path into its canonical form
///
/// This function:
/// 1. Drops empty and `.` components
/// 2. Resolves `..` lexically, never climbing above the root
/// 3. Prefixes a single `/` and removes trailing slashes (except root)
///
/// Only `/` separates components: `\` is an ordinary character in names
/// reported by Unix filesystems.
pub fn clean(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return ROOT.to_string();
    }

    let mut result = String::with_capacity(path.len() + 1);
    for part in parts {
        result.push('/');
        result.push_str(part);
    }
    result
}

/// Normalize a path string for rule matching (without filesystem access)
///
/// Cleans the path and normalizes Unicode to NFC so that names written in
/// configuration match names reported by filesystems storing decomposed forms.
pub fn normalize_path_string(path: &str) -> String {
    clean(path).nfc().collect()
}

/// Convert `\` separators in a path written in configuration to `/`.
pub fn config_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Join a child name onto a virtual directory path.
pub fn join(dir: &str, name: &str) -> String {
    if dir == ROOT || dir.is_empty() {
        clean(name)
    } else {
        clean(&format!("{}/{}", dir, name))
    }
}

/// Last component of a virtual path, or `/` for the root.
pub fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return ROOT;
    }
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Extension of the last component including the leading dot.
///
/// Dot-files such as `.gitignore` have no extension.
pub fn extension(path: &str) -> Option<&str> {
    let name = base_name(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(&name[idx..]),
    }
}

/// Ancestors of a cleaned path, outermost first, excluding the root and
/// including the path itself.
///
/// `/a/b/c` yields `/a`, `/a/b`, `/a/b/c`.
pub fn ancestors(path: &str) -> Vec<&str> {
    let mut out = Vec::new();
    if path == ROOT {
        return out;
    }
    for (idx, ch) in path.char_indices().skip(1) {
        if ch == '/' {
            out.push(&path[..idx]);
        }
    }
    out.push(path);
    out
}
