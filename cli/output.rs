use anyhow::{Context, Result};
use colored::*;
use fib_core::BundleReport;
use std::fs::{self, File};
use std::io::{self, BufRead, Write};
use std::path::Path;

pub fn print_bundle_created(report: &BundleReport, quiet: bool) {
    if quiet {
        return;
    }
    println!(
        "{} File was created: {} ({} files)",
        "✅".green(),
        report.output_path.display().to_string().blue(),
        report.files_written
    );
}

pub fn print_saved(what: &str, path: &Path, quiet: bool) {
    if !quiet {
        println!(
            "{} {} saved to: {}",
            "✅".green(),
            what,
            path.display().to_string().blue()
        );
    }
}

/// Ask before replacing an existing file. Quiet mode never overwrites.
pub fn confirm_overwrite<R: BufRead, W: Write>(
    path: &Path,
    quiet: bool,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    if quiet {
        anyhow::bail!(
            "Target file '{}' exists. Overwrite prevented in quiet mode.",
            path.display()
        );
    }
    write!(
        out,
        "{} File already exists at '{}'. Overwrite? [{}/{}] ",
        "⚠️".yellow(),
        path.display().to_string().cyan(),
        "y".green(),
        "N".red()
    )?;
    out.flush().context("Failed to flush stdout")?;
    let mut response = String::new();
    input
        .read_line(&mut response)
        .context("Failed to read user input")?;
    Ok(response.trim().eq_ignore_ascii_case("y"))
}

pub fn write_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let mut file =
        File::create(path).with_context(|| format!("Failed to create file {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to file {}", path.display()))?;
    Ok(())
}

pub fn write_to_stdout(content: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(content.as_bytes())
        .context("Failed to write to stdout")?;
    if !content.ends_with('\n') {
        handle
            .write_all(b"\n")
            .context("Failed to write newline to stdout")?;
    }
    handle.flush().context("Failed to flush stdout")?;
    Ok(())
}
