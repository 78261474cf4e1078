use std::env;
use std::path::PathBuf;

use nest_constants::{CONFIG_DIR_ENV, CONFIG_DIR_NAME, DEFAULT_VARS_NAME};

/// Everything needed to open an [`Assembly`](crate::Assembly).
#[derive(Debug, Clone)]
pub struct AssemblySettings {
    pub config_dir: PathBuf,
    pub vars_name: String,
    pub main_nest: Option<PathBuf>,
    pub hub_override: Option<PathBuf>,
}

impl AssemblySettings {
    #[must_use]
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            vars_name: DEFAULT_VARS_NAME.to_string(),
            main_nest: None,
            hub_override: None,
        }
    }

    #[must_use]
    pub fn with_vars_name(mut self, name: impl Into<String>) -> Self {
        self.vars_name = name.into();
        self
    }

    #[must_use]
    pub fn with_main_nest(mut self, dir: Option<PathBuf>) -> Self {
        self.main_nest = dir;
        self
    }

    #[must_use]
    pub fn with_hub_override(mut self, dir: Option<PathBuf>) -> Self {
        self.hub_override = dir;
        self
    }

    /// `$NEST_CONFIG_DIR`, else the platform config directory.
    #[must_use]
    pub fn default_config_dir() -> PathBuf {
        env::var_os(CONFIG_DIR_ENV)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME)))
            .unwrap_or_else(|| PathBuf::from(".").join(CONFIG_DIR_NAME))
    }
}

impl Default for AssemblySettings {
    fn default() -> Self {
        Self::new(Self::default_config_dir())
    }
}
