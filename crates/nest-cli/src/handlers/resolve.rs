use anyhow::{Result, bail};
use owo_colors::OwoColorize;

use nest_assembly::Assembly;

pub struct ResolveHandler;

impl ResolveHandler {
    pub fn handle_resolve(assembly: &mut Assembly, packages: &[String]) -> Result<()> {
        let mut unresolved = 0;

        for (index, package) in packages.iter().enumerate() {
            nest_logger::status(&format!(
                "Resolving {package} ({}/{})",
                index + 1,
                packages.len()
            ));

            match assembly.package_directory(package) {
                Some(dir) if dir.is_dir() => {
                    println!("{} {}", package.bright_cyan().bold(), dir.display());
                }
                Some(dir) => {
                    println!(
                        "{} {} {}",
                        package.bright_cyan().bold(),
                        dir.display(),
                        "(default location)".bright_black()
                    );
                }
                None => {
                    nest_logger::warn(&format!("Package '{package}' could not be resolved"));
                    unresolved += 1;
                }
            }
        }

        if unresolved > 0 {
            if assembly.is_external_mode() {
                nest_logger::info("External mode requires full package paths");
            }
            bail!("{unresolved} package(s) could not be resolved");
        }

        nest_logger::debug(&format!(
            "{} package(s) cached",
            assembly.cached_packages()
        ));
        nest_logger::finish(&format!("Resolved {} package(s)", packages.len()));
        Ok(())
    }
}
