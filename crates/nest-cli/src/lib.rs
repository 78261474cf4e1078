pub mod commands;
pub mod handlers;

use anyhow::{Context, Result};
use clap::Parser;

use commands::{Cli, Commands};
use handlers::{DirsHandler, HelpHandler, HubHandler, InfoHandler, ResolveHandler, VarsHandler};
use nest_assembly::{Assembly, AssemblySettings};

pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    nest_logger::init_logger(cli.quiet, cli.debug);
    run(&cli)
}

/// Dispatches a parsed command line.
pub fn run(cli: &Cli) -> Result<()> {
    // Help needs no var file, so the assembly is only opened by the arms
    // that use it.
    let open = || open_assembly(cli);

    match &cli.command {
        Commands::Resolve { packages } => ResolveHandler::handle_resolve(&mut open()?, packages),
        Commands::Dirs { json } => DirsHandler::handle_dirs(&mut open()?, *json),
        Commands::Get { key } => VarsHandler::handle_get(&open()?, key),
        Commands::Set {
            key,
            value,
            no_save,
        } => VarsHandler::handle_set(&mut open()?, key, value, !no_save),
        Commands::Unset { key, no_save } => VarsHandler::handle_unset(&mut open()?, key, !no_save),
        Commands::Vars { json } => VarsHandler::handle_list(&open()?, *json),
        Commands::Hub { set } => HubHandler::handle_hub(&mut open()?, set.as_deref()),
        Commands::Id => InfoHandler::handle_id(&open()?),
        Commands::Out => InfoHandler::handle_out(&open()?),
        Commands::Help { command } => HelpHandler::handle_help(command.as_deref()),
    }
}

/// Builds the assembly named on the command line and loads its var file.
pub fn open_assembly(cli: &Cli) -> Result<Assembly> {
    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(AssemblySettings::default_config_dir);
    let settings = AssemblySettings::new(config_dir)
        .with_vars_name(cli.vars.as_str())
        .with_main_nest(cli.nest.clone())
        .with_hub_override(cli.hub.clone());

    let mut assembly = Assembly::new(settings);
    let skipped = assembly
        .load_vars(&cli.vars)
        .with_context(|| format!("Failed to load var set '{}'", cli.vars))?;

    for entry in &skipped {
        nest_logger::warn(&format!(
            "{}: skipped {entry}",
            assembly.var_file_path().display()
        ));
    }

    Ok(assembly)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_assembly_reports_skipped_entries() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        std::fs::write(
            tmp.path().join("apps.var"),
            "UPP = \"/src/apps\";\n??? = nope;\nOUTPUT = /out;\n",
        )?;

        let config_dir = tmp.path().to_string_lossy().into_owned();
        let cli = Cli::try_parse_from(["nest", "--config-dir", &config_dir, "--vars", "apps", "id"])?;
        let assembly = open_assembly(&cli)?;

        assert_eq!(assembly.vars_name(), "apps");
        assert_eq!(assembly.get_var("UPP"), "/src/apps");
        assert_eq!(assembly.get_var("OUTPUT"), "/out");
        Ok(())
    }

    #[test]
    fn test_help_does_not_load_var_file() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let not_a_dir = tmp.path().join("config");
        std::fs::write(&not_a_dir, "")?;
        let config_dir = not_a_dir.to_string_lossy().into_owned();

        let help = Cli::try_parse_from(["nest", "--config-dir", &config_dir, "help"])?;
        run(&help)?;

        let id = Cli::try_parse_from(["nest", "--config-dir", &config_dir, "id"])?;
        assert!(run(&id).is_err());
        Ok(())
    }

    #[test]
    fn test_cli_main_nest_is_searched_first() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let main = tmp.path().join("main");
        std::fs::create_dir(&main)?;

        let config_dir = tmp.path().join("cfg").to_string_lossy().into_owned();
        let nest = main.to_string_lossy().into_owned();
        let hub = tmp.path().join("hub").to_string_lossy().into_owned();
        let cli = Cli::try_parse_from([
            "nest",
            "--config-dir",
            &config_dir,
            "--nest",
            &nest,
            "--hub",
            &hub,
            "dirs",
        ])?;
        let mut assembly = open_assembly(&cli)?;

        assert_eq!(assembly.search_paths(), vec![main]);
        Ok(())
    }
}
