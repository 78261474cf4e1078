use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Resolved package directories by package name. `None` records a miss so
/// repeated failed lookups do not rescan the search paths.
#[derive(Debug, Default)]
pub struct PackageCache {
    entries: HashMap<String, Option<PathBuf>>,
}

impl PackageCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Outer `None` means not cached; inner `None` is a cached miss.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Option<&Path>> {
        self.entries.get(name).map(Option::as_deref)
    }

    pub fn insert(&mut self, name: &str, dir: Option<PathBuf>) {
        self.entries.insert(name.to_string(), dir);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
