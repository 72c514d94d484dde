mod cli_args;
mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use colored::*;
use log;
use std::process;

use cli_args::{Cli, Commands, ProjectConfigOpts};
use fib_core::{AppError, Config};

fn main() {
    let raw_args = match fib_core::expand_args(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(exit_code_for(Some(&e)));
        }
    };
    let cli_args = Cli::parse_from(raw_args);

    setup_logging(cli_args.quiet, cli_args.verbose);

    let quiet = cli_args.quiet;

    log::debug!("CLI args parsed: {:?}", cli_args);

    let exit_code = match run_app(cli_args, quiet) {
        Ok(_) => {
            log::info!("Application finished successfully.");
            0
        }
        Err(e) => {
            let exit_code = exit_code_for(e.downcast_ref::<AppError>());
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            exit_code
        }
    };
    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

fn exit_code_for(err: Option<&AppError>) -> i32 {
    match err {
        Some(AppError::Config(_)) => 1,
        Some(AppError::TomlParse(_)) => 1,
        Some(AppError::TomlSerialize(_)) => 1,
        Some(AppError::OutputPath { .. }) => 2,
        Some(AppError::ProjectRoot { .. }) => 2,
        Some(AppError::Io(_)) => 2,
        Some(AppError::FileRead { .. }) => 2,
        Some(AppError::FileWrite { .. }) => 2,
        Some(AppError::WalkDir(_)) => 2,
        Some(AppError::Validation(_)) => 5,
        Some(AppError::InvalidArgument(_)) => 5,
        Some(AppError::ResponseFile { .. }) => 5,
        Some(_) => 1,
        None => 1,
    }
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn run_app(cli: Cli, quiet: bool) -> Result<()> {
    match cli.command {
        None => {
            Cli::command().print_help()?;
        }
        Some(command) => match command {
            Commands::Bundle(args) => {
                log::debug!("Executing 'bundle' command...");
                commands::bundle::handle_bundle_command(&args, quiet)?;
            }
            Commands::CreateRsp(args) => {
                log::debug!("Executing 'create-rsp' command...");
                commands::create_rsp::handle_create_rsp_command(&args, quiet)?;
            }
            Commands::Completion(args) => {
                log::debug!("Executing 'completion' command...");
                commands::completion::handle_completion_command(&args, quiet)?;
            }
            Commands::Config(args) => {
                log::debug!("Executing 'config' command...");
                commands::config::handle_config_command(&args, quiet)?;
            }
        },
    }
    Ok(())
}

pub fn load_config_for_command(
    project_root: &std::path::Path,
    project_opts: &ProjectConfigOpts,
) -> Result<Config> {
    let config = Config::load_for_project(
        project_root,
        project_opts.config_file.as_ref(),
        project_opts.disable_config_file,
    )
    .context("Failed to load configuration")?;
    log::trace!("Effective configuration: {:?}", config);
    Ok(config)
}
