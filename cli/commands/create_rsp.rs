use crate::cli_args::CreateRspArgs;
use crate::output;
use anyhow::{Context, Result};
use colored::*;
use fib_core::{ResponseFile, SortKey};
use log;
use std::io::{self, BufRead, Write};

const OUTPUT_PROMPT: &str = "Enter output option value: ";
const AUTHOR_PROMPT: &str = "Enter author option value: ";
const LANGUAGES_PROMPT: &str = "Enter languages option value (separated by spaces). If you want to include everything, enter \"all\": ";
const REMOVE_EMPTY_LINES_PROMPT: &str = "Enter remove empty lines option value (true/false): ";
const NOTE_PROMPT: &str = "Enter include note option value (true/false): ";
const SORT_PROMPT: &str = "Enter sort option value (type/name): ";

pub fn handle_create_rsp_command(args: &CreateRspArgs, quiet: bool) -> Result<()> {
    if !quiet {
        println!("Creating response file...");
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    let response = prompt_response_file(&mut input, &mut out)?;
    log::debug!("Collected response file values: {:?}", response);

    response
        .write_to(&args.file)
        .with_context(|| format!("Failed to write response file {}", args.file.display()))?;
    output::print_saved("Response file", &args.file, quiet);
    Ok(())
}

/// Ask for every bundle option in order, re-asking until required and typed values are valid.
pub fn prompt_response_file<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<ResponseFile> {
    let output = ask_required(input, out, OUTPUT_PROMPT)?;
    let author = Some(ask(input, out, AUTHOR_PROMPT)?).filter(|a| !a.is_empty());
    let languages = ask_required(input, out, LANGUAGES_PROMPT)?;
    let remove_empty_lines = ask_bool(input, out, REMOVE_EMPTY_LINES_PROMPT)?;
    let include_note = ask_bool(input, out, NOTE_PROMPT)?;
    let sort = ask_sort(input, out)?;

    Ok(ResponseFile {
        output,
        author,
        languages,
        remove_empty_lines,
        include_note,
        sort,
    })
}

fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<String> {
    write!(out, "{}", prompt)?;
    out.flush().context("Failed to flush stdout")?;
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read user input")?;
    if read == 0 {
        anyhow::bail!("Input ended before all response file options were entered");
    }
    Ok(line.trim().to_string())
}

fn ask_required<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<String> {
    loop {
        let value = ask(input, out, prompt)?;
        if !value.is_empty() {
            return Ok(value);
        }
    }
}

fn ask_bool<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<bool> {
    loop {
        let value = ask(input, out, prompt)?;
        match value.to_ascii_lowercase().as_str() {
            "" | "false" => return Ok(false),
            "true" => return Ok(true),
            _ => writeln!(out, "{}", "Please enter true or false.".yellow())?,
        }
    }
}

fn ask_sort<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<SortKey> {
    loop {
        let value = ask(input, out, SORT_PROMPT)?;
        if value.is_empty() {
            return Ok(SortKey::ByName);
        }
        match value.parse::<SortKey>() {
            Ok(key) => return Ok(key),
            Err(e) => writeln!(out, "{}", e.to_string().yellow())?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str) -> Result<(ResponseFile, String)> {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let response = prompt_response_file(&mut input, &mut out)?;
        Ok((response, String::from_utf8(out)?))
    }

    #[test]
    fn collects_all_values() -> Result<()> {
        let (response, _) = run("bundle.txt\nAda\njs html\ntrue\nTrue\ntype\n")?;
        assert_eq!(
            response,
            ResponseFile {
                output: "bundle.txt".to_string(),
                author: Some("Ada".to_string()),
                languages: "js html".to_string(),
                remove_empty_lines: true,
                include_note: true,
                sort: SortKey::ByType,
            }
        );
        Ok(())
    }

    #[test]
    fn blanks_fall_back_to_defaults() -> Result<()> {
        let (response, _) = run("bundle.txt\n\nall\n\n\n\n")?;
        assert_eq!(response.author, None);
        assert!(!response.remove_empty_lines);
        assert!(!response.include_note);
        assert_eq!(response.sort, SortKey::ByName);
        Ok(())
    }

    #[test]
    fn required_and_invalid_values_are_asked_again() -> Result<()> {
        let (response, prompts) = run("\n\nbundle.txt\n\n\nrs\nmaybe\nfalse\n\nsize\nname\n")?;
        assert_eq!(response.output, "bundle.txt");
        assert_eq!(response.languages, "rs");
        assert_eq!(response.sort, SortKey::ByName);
        assert_eq!(prompts.matches(OUTPUT_PROMPT).count(), 3);
        assert_eq!(prompts.matches(LANGUAGES_PROMPT).count(), 2);
        assert_eq!(prompts.matches(REMOVE_EMPTY_LINES_PROMPT).count(), 2);
        assert_eq!(prompts.matches(SORT_PROMPT).count(), 2);
        Ok(())
    }

    #[test]
    fn early_end_of_input_is_an_error() {
        assert!(run("bundle.txt\n").is_err());
    }
}
