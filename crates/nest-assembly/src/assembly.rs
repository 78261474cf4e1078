use std::path::{Path, PathBuf};

use crate::cache::PackageCache;
use crate::hub::{self, HubState};
use crate::predicate::{PackagePredicate, UppFilePredicate};
use crate::settings::AssemblySettings;
use nest_constants::{
    DEFAULT_OUT_DIR, DEFAULT_VARS_NAME, EXTERNAL_VARS_NAME, INCLUDE_VAR, OUTPUT_VAR,
    PACKAGE_FILE_EXT, UPP_VAR, UPPHUB_VAR, VAR_FILE_EXT,
};
use nest_error::{NestError, Result};
use nest_utils::{ensure_dir_exists, file_name_string, is_full_path, normalize_path, split_dirs};
use nest_vars::{SkippedEntry, VarStore, is_valid_var_name};

/// A build assembly: the active var set, its search paths and the package
/// directory cache derived from them.
///
/// Every configuration change goes through this type so the package cache
/// and the hub scan are dropped whenever their inputs change.
pub struct Assembly {
    config_dir: PathBuf,
    vars_name: String,
    vars: VarStore,
    main_nest: Option<PathBuf>,
    hub: HubState,
    packages: PackageCache,
    predicate: Box<dyn PackagePredicate>,
}

impl Assembly {
    /// Creates an assembly with an empty var store. Use [`Assembly::open`]
    /// to load the var file named in `settings`.
    #[must_use]
    pub fn new(settings: AssemblySettings) -> Self {
        let vars_name = if settings.vars_name.is_empty() {
            DEFAULT_VARS_NAME.to_string()
        } else {
            settings.vars_name
        };

        Self {
            config_dir: settings.config_dir,
            vars_name,
            vars: VarStore::new(),
            main_nest: settings.main_nest.map(|dir| normalize_path(&dir)),
            hub: HubState::new(settings.hub_override),
            packages: PackageCache::new(),
            predicate: Box::new(UppFilePredicate),
        }
    }

    pub fn open(settings: AssemblySettings) -> Result<Self> {
        let name = settings.vars_name.clone();
        let mut assembly = Self::new(settings);
        assembly.load_vars(&name)?;
        Ok(assembly)
    }

    #[must_use]
    pub fn with_predicate(mut self, predicate: impl PackagePredicate + 'static) -> Self {
        self.predicate = Box::new(predicate);
        self.invalidate_package_cache();
        self
    }

    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    #[must_use]
    pub fn vars_name(&self) -> &str {
        &self.vars_name
    }

    #[must_use]
    pub const fn vars(&self) -> &VarStore {
        &self.vars
    }

    #[must_use]
    pub fn var_file_path_for(&self, name: &str) -> PathBuf {
        self.config_dir.join(format!("{name}.{VAR_FILE_EXT}"))
    }

    /// Path of the active var file; a vars name that is a full path is used
    /// as is.
    #[must_use]
    pub fn var_file_path(&self) -> PathBuf {
        let name = Path::new(&self.vars_name);
        if is_full_path(name) {
            name.to_path_buf()
        } else {
            self.var_file_path_for(&self.vars_name)
        }
    }

    /// Switches to the var set `name` (empty selects the default set) and
    /// loads its file. Entries that fail to parse are returned.
    pub fn load_vars(&mut self, name: &str) -> Result<Vec<SkippedEntry>> {
        self.vars_name = if name.is_empty() {
            DEFAULT_VARS_NAME.to_string()
        } else {
            name.to_string()
        };
        self.invalidate_package_cache();

        let path = self.var_file_path();
        nest_logger::debug(&format!(
            "Loading var set '{}' from {}",
            self.vars_name,
            path.display()
        ));
        self.vars.load(&path)
    }

    /// Saves the store as var set `name`, which becomes the active set.
    pub fn save_vars(&mut self, name: &str) -> Result<()> {
        let path = if is_full_path(Path::new(name)) {
            PathBuf::from(name)
        } else {
            self.var_file_path_for(name)
        };
        self.vars.save(&path)?;
        self.vars_name = name.to_string();
        Ok(())
    }

    #[must_use]
    pub fn get_var(&self, key: &str) -> &str {
        self.vars.get(key)
    }

    pub fn set_var(&mut self, key: &str, value: &str, save: bool) -> Result<()> {
        if !is_valid_var_name(key) {
            return Err(NestError::InvalidVarName(key.to_string()));
        }

        self.vars.set(key, value);
        self.invalidate_package_cache();
        if save {
            let name = self.vars_name.clone();
            self.save_vars(&name)?;
        }
        Ok(())
    }

    pub fn remove_var(&mut self, key: &str, save: bool) -> Result<Option<String>> {
        let removed = self.vars.remove(key);
        if removed.is_some() {
            self.invalidate_package_cache();
            if save {
                let name = self.vars_name.clone();
                self.save_vars(&name)?;
            }
        }
        Ok(removed)
    }

    /// Replaces the whole store, e.g. with one parsed elsewhere.
    pub fn replace_vars(&mut self, vars: VarStore) {
        self.vars = vars;
        self.invalidate_package_cache();
    }

    /// In external mode package names must be full directory paths.
    #[must_use]
    pub fn is_external_mode(&self) -> bool {
        self.vars_name == EXTERNAL_VARS_NAME
    }

    #[must_use]
    pub fn main_nest(&self) -> Option<&Path> {
        self.main_nest.as_deref()
    }

    pub fn set_main_nest(&mut self, dir: Option<PathBuf>) {
        self.main_nest = dir
            .filter(|d| !d.as_os_str().is_empty())
            .map(|d| normalize_path(&d));
        self.invalidate_package_cache();
    }

    pub fn hub_dir(&mut self) -> PathBuf {
        let upphub = self.vars.get(UPPHUB_VAR).to_string();
        self.hub.root(&self.config_dir, &upphub)
    }

    /// Records `path` in the hub pointer file and forgets the resolved hub.
    pub fn set_hub_dir(&mut self, path: &Path) -> Result<()> {
        if hub::write_pointer(&self.config_dir, path)? {
            nest_logger::debug(&format!("Hub pointer set to {}", path.display()));
        }
        self.invalidate_package_cache();
        Ok(())
    }

    pub fn override_hub_dir(&mut self, path: Option<PathBuf>) {
        self.hub.set_override(path);
        self.packages.clear();
    }

    pub fn is_hub_dir(&mut self, path: &Path) -> bool {
        normalize_path(path).starts_with(self.hub_dir())
    }

    /// Var set name, suffixed with the main nest's name when the main nest
    /// is not the first configured search path.
    #[must_use]
    pub fn assembly_id(&self) -> String {
        let mut id = self.vars_name.clone();
        let dirs = split_dirs(self.vars.get(UPP_VAR));
        if let (Some(first), Some(main)) = (dirs.first(), &self.main_nest) {
            if normalize_path(first) != *main {
                id.push('_');
                id.push_str(&file_name_string(main));
            }
        }
        id
    }

    /// `UPP` entries followed, outside external mode, by the hub nests.
    pub fn upp_dirs_raw(&mut self) -> Vec<PathBuf> {
        let mut dirs = split_dirs(self.vars.get(UPP_VAR));
        if !self.is_external_mode() {
            let root = self.hub_dir();
            dirs.extend_from_slice(self.hub.subdirs(&root));
        }
        dirs
    }

    /// Ordered package search paths; the main nest, when set, is always
    /// first.
    pub fn search_paths(&mut self) -> Vec<PathBuf> {
        let mut dirs = self.upp_dirs_raw();
        if let Some(main) = &self.main_nest {
            let main_is_first = dirs.first().is_some_and(|first| normalize_path(first) == *main);
            if !main_is_first {
                dirs.insert(0, main.clone());
            }
        }
        dirs
    }

    /// First search path, else the home directory.
    pub fn upp_dir(&mut self) -> PathBuf {
        self.search_paths()
            .into_iter()
            .next()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| self.config_dir.clone())
    }

    /// `OUTPUT`, else a per-user cache directory created on demand.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        let configured = self.vars.get(OUTPUT_VAR);
        if !configured.is_empty() {
            return PathBuf::from(configured);
        }

        let out = dirs::cache_dir().map_or_else(
            || self.config_dir.join("out"),
            |cache| cache.join(DEFAULT_OUT_DIR),
        );
        if let Err(e) = ensure_dir_exists(&out) {
            nest_logger::debug(&format!(
                "Could not create output directory {}: {e}",
                out.display()
            ));
        }
        out
    }

    #[must_use]
    pub fn includes(&self) -> &str {
        self.vars.get(INCLUDE_VAR)
    }

    /// Directory of package `name`, cached until the configuration changes.
    ///
    /// Absolute names are returned normalized. Relative names are looked up
    /// in [`Assembly::search_paths`] order; when no search path holds the
    /// package the conventional location in the first search path is
    /// returned. `None` when nothing can be resolved.
    pub fn package_directory(&mut self, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }

        if let Some(cached) = self.packages.get(name) {
            nest_logger::debug(&format!("Package '{name}' served from cache"));
            return cached.map(Path::to_path_buf);
        }

        let resolved = self.locate_package(name);
        self.packages.insert(name, resolved.clone());
        resolved
    }

    fn locate_package(&mut self, name: &str) -> Option<PathBuf> {
        let package = Path::new(name);
        if is_full_path(package) {
            return Some(normalize_path(package));
        }
        if self.is_external_mode() {
            nest_logger::debug(&format!(
                "Package '{name}' is not a full path in external mode"
            ));
            return None;
        }

        let search_paths = self.search_paths();
        for dir in &search_paths {
            let candidate = normalize_path(&dir.join(package));
            if self.predicate.is_package(&candidate) {
                nest_logger::debug(&format!(
                    "Package '{name}' found at {}",
                    candidate.display()
                ));
                return Some(candidate);
            }
        }

        let first = search_paths.first()?;
        let file_name = format!("{}.{PACKAGE_FILE_EXT}", file_name_string(package));
        Some(normalize_path(&first.join(package).join(file_name)))
    }

    /// Drops resolved packages and the hub scan; both are rebuilt lazily.
    pub fn invalidate_package_cache(&mut self) {
        self.packages.clear();
        self.hub.invalidate();
    }

    #[must_use]
    pub fn cached_packages(&self) -> usize {
        self.packages.len()
    }
}
