use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use fib_core::AppError;
use std::fs::{self, File};
use std::io;

use crate::cli_args::{Cli, CompletionArgs};
use crate::output;

pub fn handle_completion_command(args: &CompletionArgs, quiet: bool) -> Result<()> {
    let shell_str = args.shell.as_deref().unwrap_or("fish");
    let shell_enum = parse_shell(shell_str)?;

    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();

    if !args.save {
        generate(shell_enum, &mut command, bin_name, &mut io::stdout());
        return Ok(());
    }

    let save_dir = match shell_enum {
        Shell::Fish => dirs::config_dir().map(|p| p.join("fish").join("completions")),
        Shell::Bash => dirs::config_dir().map(|p| p.join("bash_completion.d")),
        Shell::Zsh => dirs::data_local_dir().map(|p| p.join("zsh").join("site-functions")),
        _ => None,
    }
    .ok_or_else(|| anyhow::anyhow!("Could not determine standard completion directory."))?;

    let filename = match shell_enum {
        Shell::Zsh => format!("_{}", bin_name),
        Shell::Bash => format!("{}.bash", bin_name),
        _ => format!("{}.fish", bin_name),
    };
    let save_path = save_dir.join(&filename);

    let stdin = io::stdin();
    if !output::confirm_overwrite(&save_path, quiet, &mut stdin.lock(), &mut io::stdout())? {
        println!("Save cancelled.");
        return Ok(());
    }

    fs::create_dir_all(&save_dir)
        .with_context(|| format!("Failed to create directory {}", save_dir.display()))?;
    let mut file = File::create(&save_path)
        .with_context(|| format!("Failed to create file {}", save_path.display()))?;
    generate(shell_enum, &mut command, bin_name, &mut file);

    output::print_saved(&format!("{} completions", shell_str), &save_path, quiet);
    Ok(())
}

fn parse_shell(shell: &str) -> Result<Shell> {
    match shell.to_lowercase().as_str() {
        "fish" => Ok(Shell::Fish),
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        _ => anyhow::bail!(AppError::InvalidArgument(format!(
            "Unsupported shell for completion: {}",
            shell
        ))),
    }
}
