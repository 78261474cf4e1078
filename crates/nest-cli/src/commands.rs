use clap::{Parser, Subcommand};
use std::path::PathBuf;

use nest_constants::DEFAULT_VARS_NAME;

#[derive(Parser)]
#[command(name = "nest")]
#[command(version)]
#[command(propagate_version = true)]
#[command(about = "Package directory resolver for build assemblies", long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Directory holding var files and the hub pointer
    #[arg(long = "config-dir", global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
    /// Var set to use: a name, or the full path of a .var file
    #[arg(short = 'a', long = "vars", global = true, default_value = DEFAULT_VARS_NAME)]
    pub vars: String,
    /// Main nest, searched before every other directory
    #[arg(long = "nest", global = true, value_name = "DIR")]
    pub nest: Option<PathBuf>,
    /// Use this hub directory instead of the configured one
    #[arg(long = "hub", global = true, value_name = "DIR")]
    pub hub: Option<PathBuf>,
    /// Only print errors
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
    /// Enable debug mode for verbose output
    #[arg(long, global = true)]
    pub debug: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolves package names to directories
    #[command(alias = "r")]
    Resolve {
        /// Package names (e.g. Core, plugin/png) or full directory paths
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// Lists the package search paths in order
    Dirs {
        /// Print as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Prints the value of a variable
    Get {
        /// Variable name (e.g. UPP, OUTPUT)
        key: String,
    },
    /// Sets a variable and saves the var file
    Set {
        key: String,
        value: String,
        /// Don't write the var file
        #[arg(long = "no-save")]
        no_save: bool,
    },
    /// Removes a variable and saves the var file
    Unset {
        key: String,
        /// Don't write the var file
        #[arg(long = "no-save")]
        no_save: bool,
    },
    /// Lists all variables of the active var file
    #[command(alias = "ls")]
    Vars {
        /// Print as a JSON object
        #[arg(long)]
        json: bool,
    },
    /// Shows or sets the hub directory
    Hub {
        /// Store this directory in the hub pointer file
        #[arg(long = "set", value_name = "DIR")]
        set: Option<PathBuf>,
    },
    /// Prints the assembly id
    Id,
    /// Prints the output directory
    Out,
    /// Shows help information for nest or a specific command
    Help {
        /// The command to show help for (optional)
        #[arg()]
        command: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from(["nest", "resolve", "Core", "--vars", "MyApps", "--debug"])?;
        assert_eq!(cli.vars, "MyApps");
        assert!(cli.debug);
        assert!(matches!(cli.command, Commands::Resolve { ref packages } if packages == &["Core"]));
        Ok(())
    }

    #[test]
    fn test_default_vars_name() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from(["nest", "dirs"])?;
        assert_eq!(cli.vars, DEFAULT_VARS_NAME);
        assert!(cli.nest.is_none());
        Ok(())
    }

    #[test]
    fn test_resolve_requires_a_name() {
        assert!(Cli::try_parse_from(["nest", "resolve"]).is_err());
    }
}
