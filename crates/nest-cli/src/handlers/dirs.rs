use anyhow::Result;
use owo_colors::OwoColorize;
use std::path::Path;

use nest_assembly::Assembly;

pub struct DirsHandler;

impl DirsHandler {
    pub fn handle_dirs(assembly: &mut Assembly, json: bool) -> Result<()> {
        let dirs = assembly.search_paths();

        if json {
            let list: Vec<String> = dirs
                .iter()
                .map(|d| d.to_string_lossy().into_owned())
                .collect();
            println!("{}", serde_json::to_string_pretty(&list)?);
            return Ok(());
        }

        if dirs.is_empty() {
            nest_logger::warn("No search paths configured (set UPP or add hub nests)");
            return Ok(());
        }

        for (index, dir) in dirs.iter().enumerate() {
            let origin = Self::origin(assembly, dir);
            println!(
                "{:>3}  {}  {}",
                index.to_string().bright_black(),
                dir.display(),
                origin.bright_black()
            );
        }
        Ok(())
    }

    fn origin(assembly: &mut Assembly, dir: &Path) -> &'static str {
        if assembly.main_nest() == Some(dir) {
            "[main]"
        } else if !assembly.is_external_mode() && assembly.is_hub_dir(dir) {
            "[hub]"
        } else {
            ""
        }
    }
}
