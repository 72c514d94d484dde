use crate::cli_args::BundleArgs;
use crate::load_config_for_command;
use crate::output;
use anyhow::{Context, Result};
use fib_core::{self as core, Config};
use log;

pub fn handle_bundle_command(args: &BundleArgs, quiet: bool) -> Result<()> {
    // Validation happens before any filesystem access.
    let options = args.to_request().validate()?;

    let project_root = Config::determine_project_root(args.project_config.project_root.as_ref())
        .context("Failed to determine project root")?;
    log::info!("Project root determined: {}", project_root.display());

    let config = load_config_for_command(&project_root, &args.project_config)?;

    let report = core::bundle(&project_root, &options, &config.exclude)?;
    output::print_bundle_created(&report, quiet);
    Ok(())
}
