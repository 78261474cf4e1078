use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::assembly::Assembly;
use nest_error::Result;

/// Thread-safe handle to an [`Assembly`].
///
/// Each call holds the lock for the whole cache check, scan and insert, so
/// an invalidation can never be overwritten by a lookup that started before
/// it.
#[derive(Clone)]
pub struct SharedAssembly {
    inner: Arc<Mutex<Assembly>>,
}

impl SharedAssembly {
    #[must_use]
    pub fn new(assembly: Assembly) -> Self {
        Self {
            inner: Arc::new(Mutex::new(assembly)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Assembly> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn package_directory(&self, name: &str) -> Option<PathBuf> {
        self.lock().package_directory(name)
    }

    #[must_use]
    pub fn search_paths(&self) -> Vec<PathBuf> {
        self.lock().search_paths()
    }

    #[must_use]
    pub fn get_var(&self, key: &str) -> String {
        self.lock().get_var(key).to_string()
    }

    pub fn set_var(&self, key: &str, value: &str, save: bool) -> Result<()> {
        self.lock().set_var(key, value, save)
    }

    pub fn invalidate(&self) {
        self.lock().invalidate_package_cache();
    }

    /// Runs `f` with exclusive access.
    pub fn with<R>(&self, f: impl FnOnce(&mut Assembly) -> R) -> R {
        f(&mut self.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AssemblySettings;
    use std::fs;
    use std::thread;

    #[test]
    fn test_concurrent_lookups_agree() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let root = tmp.path().join("nest");
        let pkg = root.join("Core");
        fs::create_dir_all(&pkg)?;
        fs::write(pkg.join("Core.upp"), "")?;

        let settings = AssemblySettings::new(tmp.path().join("config"))
            .with_hub_override(Some(tmp.path().join("hub")));
        let shared = SharedAssembly::new(Assembly::new(settings));
        shared.set_var("UPP", &root.to_string_lossy(), false)?;

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || shared.package_directory("Core"))
            })
            .collect();

        for handle in handles {
            let resolved = handle.join().unwrap_or_default();
            assert_eq!(resolved, Some(pkg.clone()));
        }
        assert_eq!(shared.with(|a| a.cached_packages()), 1);
        Ok(())
    }

    #[test]
    fn test_set_var_visible_to_clones() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let shared = SharedAssembly::new(Assembly::new(AssemblySettings::new(tmp.path())));
        let other = shared.clone();

        shared.set_var("OUTPUT", "/out", false)?;
        assert_eq!(other.get_var("OUTPUT"), "/out");

        other.invalidate();
        assert_eq!(shared.with(|a| a.cached_packages()), 0);
        Ok(())
    }
}
