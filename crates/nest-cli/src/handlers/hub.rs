use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::Path;

use nest_assembly::Assembly;
use nest_utils::{file_name_string, normalize_path};

pub struct HubHandler;

impl HubHandler {
    pub fn handle_hub(assembly: &mut Assembly, set: Option<&Path>) -> Result<()> {
        if let Some(dir) = set {
            let dir = normalize_path(dir);
            if !dir.is_dir() {
                nest_logger::warn(&format!("{} is not a directory yet", dir.display()));
            }
            assembly
                .set_hub_dir(&dir)
                .with_context(|| format!("Failed to set hub directory to {}", dir.display()))?;
            nest_logger::success(&format!("Hub directory set to {}", dir.display()));
        }

        let hub = assembly.hub_dir();
        println!("{} {}", "hub".bright_cyan().bold(), hub.display());

        if assembly.is_external_mode() {
            nest_logger::info("Hub nests are not searched in external mode");
            return Ok(());
        }

        let nests: Vec<_> = assembly
            .search_paths()
            .into_iter()
            .filter(|dir| dir.starts_with(&hub))
            .collect();
        for nest in nests {
            println!("  {}", file_name_string(&nest).bright_white());
        }
        Ok(())
    }
}
