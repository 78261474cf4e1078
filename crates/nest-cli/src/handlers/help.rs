use anyhow::Result;
use clap::CommandFactory;
use owo_colors::OwoColorize;

use crate::commands::Cli;
use nest_constants::{BIN_NAME, COMMANDS, DESCRIPTION, EXAMPLES, VERSION};

pub struct HelpHandler;

impl HelpHandler {
    pub fn handle_help(command: Option<&str>) -> Result<()> {
        match command {
            Some(cmd) => Self::show_command_help(cmd),
            None => {
                Self::show_general_help();
                Ok(())
            }
        }
    }

    fn show_command_help(command: &str) -> Result<()> {
        let mut cmd = Cli::command();

        if let Some(subcommand) = cmd.find_subcommand_mut(command) {
            subcommand.print_help()?;
        } else {
            println!(
                "{}: Unknown command '{command}'",
                "Error".bright_red().bold()
            );
            println!();
            Self::show_general_help();
        }

        println!();
        Ok(())
    }

    fn show_general_help() {
        println!("{}", DESCRIPTION.bright_white().bold());
        println!(
            "{} {}",
            "Version:".bright_white().bold(),
            VERSION.bright_black().bold()
        );
        println!();

        println!("{}", "Usage:".bright_magenta().bold());
        println!(
            "  {} {} {} {}",
            BIN_NAME.bright_cyan().bold(),
            "[OPTIONS]".bright_black().bold(),
            "<COMMAND>".bright_white(),
            "[ARGS]".bright_black().bold()
        );
        println!();

        println!("{}", "Commands:".bright_magenta().bold());
        let rows: Vec<(String, &str)> = COMMANDS
            .iter()
            .map(|(cmd, desc, aliases)| {
                if aliases.is_empty() {
                    ((*cmd).to_string(), *desc)
                } else {
                    (format!("{cmd} [{}]", aliases.join(", ")), *desc)
                }
            })
            .collect();
        Self::print_rows(&rows);
        println!();

        println!("{}", "Options:".bright_magenta().bold());
        let options = [
            ("--config-dir <DIR>", "Directory holding var files"),
            ("-a, --vars <NAME>", "Var set to use"),
            ("--nest <DIR>", "Main nest, searched first"),
            ("--hub <DIR>", "Override the hub directory"),
            ("-q, --quiet", "Only print errors"),
            ("--debug", "Verbose output"),
            ("-V, --version", "Print version"),
        ];
        let options: Vec<(String, &str)> = options
            .iter()
            .map(|(opt, desc)| ((*opt).to_string(), *desc))
            .collect();
        Self::print_rows(&options);
        println!();

        println!("{}", "Examples:".bright_magenta().bold());
        let examples: Vec<(String, &str)> = EXAMPLES
            .iter()
            .map(|(cmd, desc)| ((*cmd).to_string(), *desc))
            .collect();
        Self::print_rows(&examples);
        println!();

        println!(
            "{}",
            "For more information about a specific command, use:".bright_magenta()
        );
        println!(
            "  {} {} {}",
            BIN_NAME.bright_cyan().bold(),
            "help".bright_white(),
            "<command>".bright_black().bold()
        );
        println!();
    }

    fn print_rows(rows: &[(String, &str)]) {
        let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
        for (left, desc) in rows {
            let padded = format!("{left:width$}");
            println!(
                "  {}  # {}",
                padded.bright_cyan().bold(),
                desc.bright_black().bold()
            );
        }
    }
}
