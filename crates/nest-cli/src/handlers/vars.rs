use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use nest_assembly::Assembly;

pub struct VarsHandler;

impl VarsHandler {
    pub fn handle_get(assembly: &Assembly, key: &str) -> Result<()> {
        match assembly.vars().get_opt(key) {
            Some(value) => println!("{value}"),
            None => nest_logger::debug(&format!("Variable {key} is not set")),
        }
        Ok(())
    }

    pub fn handle_set(assembly: &mut Assembly, key: &str, value: &str, save: bool) -> Result<()> {
        assembly
            .set_var(key, value, save)
            .with_context(|| format!("Failed to set {key}"))?;

        if save {
            nest_logger::success(&format!(
                "{key} saved to {}",
                assembly.var_file_path().display()
            ));
        }
        Ok(())
    }

    pub fn handle_unset(assembly: &mut Assembly, key: &str, save: bool) -> Result<()> {
        let removed = assembly
            .remove_var(key, save)
            .with_context(|| format!("Failed to remove {key}"))?;

        if removed.is_none() {
            nest_logger::warn(&format!("Variable {key} is not set"));
        } else if save {
            nest_logger::success(&format!("{key} removed"));
        }
        Ok(())
    }

    pub fn handle_list(assembly: &Assembly, json: bool) -> Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(assembly.vars())?);
            return Ok(());
        }

        Self::print_vars_header(assembly);
        if assembly.vars().is_empty() {
            nest_logger::info("No variables set");
            return Ok(());
        }

        let width = assembly.vars().iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        for (key, value) in assembly.vars().iter() {
            let padded = format!("{key:width$}");
            println!("  {}  {value}", padded.bright_cyan().bold());
        }
        Ok(())
    }

    fn print_vars_header(assembly: &Assembly) {
        println!(
            "{} {} {}",
            "nest".bright_cyan().bold(),
            assembly.vars_name().bright_white(),
            format!("({})", assembly.var_file_path().display()).bright_black()
        );
        println!();
    }
}
