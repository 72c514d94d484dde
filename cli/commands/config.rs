use crate::cli_args::ConfigArgs;
use crate::load_config_for_command;
use crate::output;
use anyhow::{Context, Result};
use fib_core::Config;
use log;
use std::io;

/// Print the effective exclusion configuration, or save it under the project root.
pub fn handle_config_command(args: &ConfigArgs, quiet: bool) -> Result<()> {
    let project_root = Config::determine_project_root(args.project_config.project_root.as_ref())
        .context("Failed to determine project root")?;
    let config = load_config_for_command(&project_root, &args.project_config)?;
    let rendered = config
        .to_toml_string()
        .context("Failed to serialize configuration")?;

    if !args.save {
        return output::write_to_stdout(&rendered);
    }

    let save_path = Config::default_config_path(&project_root);
    log::debug!("Saving configuration to {}", save_path.display());
    let stdin = io::stdin();
    if !output::confirm_overwrite(&save_path, quiet, &mut stdin.lock(), &mut io::stdout())? {
        println!("Save cancelled.");
        return Ok(());
    }
    output::write_to_file(&save_path, &rendered)?;
    output::print_saved("Configuration", &save_path, quiet);
    Ok(())
}
