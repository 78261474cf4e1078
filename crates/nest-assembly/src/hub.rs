//! Hub discovery: a root directory whose immediate subdirectories are extra
//! package search roots.

use std::fs;
use std::path::{Path, PathBuf};

use nest_constants::{DEFAULT_HUB_DIR, HUB_POINTER_FILE};
use nest_error::{NestError, Result};
use nest_utils::{ensure_dir_exists, list_subdirectories, normalize_path};

#[derive(Debug, Default)]
pub struct HubState {
    override_dir: Option<PathBuf>,
    root: Option<PathBuf>,
    subdirs: Option<Vec<PathBuf>>,
}

impl HubState {
    #[must_use]
    pub fn new(override_dir: Option<PathBuf>) -> Self {
        let mut state = Self::default();
        state.set_override(override_dir);
        state
    }

    /// Pins the hub root regardless of configuration. `None` or an empty
    /// path removes the override.
    pub fn set_override(&mut self, dir: Option<PathBuf>) {
        self.override_dir = dir
            .filter(|d| !d.as_os_str().is_empty())
            .map(|d| normalize_path(&d));
        self.invalidate();
    }

    #[must_use]
    pub fn override_dir(&self) -> Option<&Path> {
        self.override_dir.as_deref()
    }

    pub fn invalidate(&mut self) {
        self.root = None;
        self.subdirs = None;
    }

    #[must_use]
    pub const fn is_scanned(&self) -> bool {
        self.subdirs.is_some()
    }

    /// Hub root: the override, else `upphub_var` when it names a directory,
    /// else the pointer file target when it is a directory, else
    /// `<config_dir>/UppHub`, created on demand.
    pub fn root(&mut self, config_dir: &Path, upphub_var: &str) -> PathBuf {
        if let Some(dir) = &self.override_dir {
            return dir.clone();
        }
        if let Some(root) = &self.root {
            return root.clone();
        }

        let root = normalize_path(&locate_hub_dir(config_dir, upphub_var));
        nest_logger::debug(&format!("Hub directory is {}", root.display()));
        self.root = Some(root.clone());
        root
    }

    /// Immediate subdirectories of `root`, scanned once until invalidated.
    pub fn subdirs(&mut self, root: &Path) -> &[PathBuf] {
        self.subdirs.get_or_insert_with(|| scan_hub(root))
    }
}

#[must_use]
pub fn pointer_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(HUB_POINTER_FILE)
}

/// First line of the hub pointer file, if any.
#[must_use]
pub fn read_pointer(config_dir: &Path) -> Option<PathBuf> {
    let content = fs::read_to_string(pointer_file_path(config_dir)).ok()?;
    let line = content.lines().next()?.trim();
    (!line.is_empty()).then(|| PathBuf::from(line))
}

/// Stores `hub_dir` in the pointer file. Returns `false` when the file
/// already held that path and was left untouched.
pub fn write_pointer(config_dir: &Path, hub_dir: &Path) -> Result<bool> {
    if read_pointer(config_dir).as_deref() == Some(hub_dir) {
        return Ok(false);
    }

    let path = pointer_file_path(config_dir);
    ensure_dir_exists(config_dir)
        .and_then(|()| fs::write(&path, hub_dir.to_string_lossy().as_bytes()))
        .map_err(|e| NestError::HubFileWrite(path, e))?;
    Ok(true)
}

fn locate_hub_dir(config_dir: &Path, upphub_var: &str) -> PathBuf {
    if !upphub_var.is_empty() && Path::new(upphub_var).is_dir() {
        return PathBuf::from(upphub_var);
    }

    if let Some(dir) = read_pointer(config_dir).filter(|d| d.is_dir()) {
        return dir;
    }

    let fallback = config_dir.join(DEFAULT_HUB_DIR);
    if let Err(e) = ensure_dir_exists(&fallback) {
        nest_logger::debug(&format!(
            "Could not create hub directory {}: {e}",
            fallback.display()
        ));
    }
    fallback
}

fn scan_hub(root: &Path) -> Vec<PathBuf> {
    if !root.is_dir() {
        nest_logger::debug(&format!("Hub directory {} is missing", root.display()));
        return Vec::new();
    }

    let dirs = list_subdirectories(root);
    nest_logger::debug(&format!(
        "Found {} hub nest(s) in {}",
        dirs.len(),
        root.display()
    ));
    dirs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_root_is_created() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let mut hub = HubState::default();

        let root = hub.root(tmp.path(), "");
        assert_eq!(root, normalize_path(&tmp.path().join(DEFAULT_HUB_DIR)));
        assert!(root.is_dir());
        Ok(())
    }

    #[test]
    fn test_var_beats_pointer() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let from_var = tmp.path().join("var_hub");
        let from_pointer = tmp.path().join("pointer_hub");
        fs::create_dir(&from_var)?;
        fs::create_dir(&from_pointer)?;
        write_pointer(tmp.path(), &from_pointer)?;

        let mut hub = HubState::default();
        assert_eq!(hub.root(tmp.path(), &from_var.to_string_lossy()), from_var);

        hub.invalidate();
        assert_eq!(hub.root(tmp.path(), ""), from_pointer);
        Ok(())
    }

    #[test]
    fn test_missing_var_dir_falls_through() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let mut hub = HubState::default();
        let root = hub.root(tmp.path(), "/definitely/not/here");
        assert_eq!(root, normalize_path(&tmp.path().join(DEFAULT_HUB_DIR)));
        Ok(())
    }

    #[test]
    fn test_override_wins() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let mut hub = HubState::new(Some(tmp.path().join("pinned")));
        assert_eq!(hub.root(tmp.path(), ""), tmp.path().join("pinned"));

        hub.set_override(Some(PathBuf::new()));
        assert!(hub.override_dir().is_none());
        Ok(())
    }

    #[test]
    fn test_write_pointer_only_when_changed() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let target = Path::new("/opt/hub");
        assert!(write_pointer(tmp.path(), target)?);
        assert!(!write_pointer(tmp.path(), target)?);
        assert_eq!(read_pointer(tmp.path()).as_deref(), Some(target));
        Ok(())
    }

    #[test]
    fn test_scan_is_cached_until_invalidated() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        fs::create_dir(tmp.path().join("one"))?;

        let mut hub = HubState::default();
        assert_eq!(hub.subdirs(tmp.path()).len(), 1);

        fs::create_dir(tmp.path().join("two"))?;
        assert_eq!(hub.subdirs(tmp.path()).len(), 1);

        hub.invalidate();
        assert_eq!(hub.subdirs(tmp.path()).len(), 2);
        Ok(())
    }

    #[test]
    fn test_missing_root_scans_empty() {
        let mut hub = HubState::default();
        assert!(hub.subdirs(Path::new("/definitely/not/here")).is_empty());
        assert!(hub.is_scanned());
    }
}
