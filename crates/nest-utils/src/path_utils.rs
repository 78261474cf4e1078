use std::path::{Component, Path, PathBuf};

/// Separators accepted between entries of a directory list variable.
#[cfg(windows)]
const DIR_LIST_SEPARATORS: &[char] = &[';'];
#[cfg(not(windows))]
const DIR_LIST_SEPARATORS: &[char] = &[':', ';'];

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir_exists(path: &Path) -> std::io::Result<()> {
    if !path.is_dir() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[must_use]
pub fn is_full_path(path: &Path) -> bool {
    path.is_absolute()
}

/// Makes `path` absolute against the working directory and folds `.` and
/// `..` components lexically. Symlinks are not resolved.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Splits a directory list such as `/a/b:/c/d` into its entries, dropping
/// empty ones.
#[must_use]
pub fn split_dirs(list: &str) -> Vec<PathBuf> {
    list.split(DIR_LIST_SEPARATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Last component of `path` as an owned string, empty when there is none.
#[must_use]
pub fn file_name_string(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Immediate subdirectories of `dir`, sorted by path. An unreadable or
/// missing directory yields an empty list.
#[must_use]
pub fn list_subdirectories(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    dirs
}
