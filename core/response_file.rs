//! Response files: a persisted list of `bundle` arguments.
//!
//! `create-rsp` writes one flag per line; `fib bundle @responseFile.rsp` reads
//! them back through [`expand_args`] before argument parsing.

use crate::error::{AppError, Result};
use crate::options::SortKey;
use log;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

pub const RESPONSE_FILE_NAME: &str = "responseFile.rsp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseFile {
    pub output: String,
    pub author: Option<String>,
    pub languages: String,
    pub remove_empty_lines: bool,
    pub include_note: bool,
    pub sort: SortKey,
}

impl ResponseFile {
    pub fn render(&self) -> String {
        let mut lines = vec![format!("--output {}", quote_if_needed(&self.output))];
        if let Some(author) = self.author.as_deref().filter(|a| !a.is_empty()) {
            lines.push(format!("--author {}", quote(author)));
        }
        lines.push(format!("--languages {}", quote(&self.languages)));
        if self.remove_empty_lines {
            lines.push("--remove-empty-lines".to_string());
        }
        if self.include_note {
            lines.push("--note".to_string());
        }
        lines.push(format!("--sort {}", self.sort));

        let mut rendered = lines.join("\n");
        rendered.push('\n');
        rendered
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        log::info!("Writing response file: {}", path.display());
        fs::write(path, self.render()).map_err(|e| AppError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn quote_if_needed(value: &str) -> String {
    if value.is_empty() || value.contains(|c: char| c.is_whitespace() || c == '"' || c == '\\') {
        quote(value)
    } else {
        value.to_string()
    }
}

/// Split response file contents into arguments.
///
/// Blank lines and lines starting with `#` are skipped. Tokens are separated by
/// whitespace; double quotes group a token and `\"` / `\\` escape inside them.
pub fn tokenize(contents: &str) -> std::result::Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        tokenize_line(trimmed, &mut tokens)
            .map_err(|message| format!("line {}: {}", index + 1, message))?;
    }
    Ok(tokens)
}

fn tokenize_line(line: &str, tokens: &mut Vec<String>) -> std::result::Result<(), String> {
    let mut chars = line.chars().peekable();
    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            return Ok(());
        }

        let mut token = String::new();
        let mut in_quotes = false;
        while let Some(c) = chars.next() {
            match c {
                '"' => in_quotes = !in_quotes,
                '\\' if in_quotes => match chars.next_if(|n| *n == '"' || *n == '\\') {
                    Some(escaped) => token.push(escaped),
                    None => token.push('\\'),
                },
                c if c.is_whitespace() && !in_quotes => break,
                c => token.push(c),
            }
        }
        if in_quotes {
            return Err("unterminated quote".to_string());
        }
        tokens.push(token);
    }
}

/// Replace every `@path` argument with the tokens of that file.
///
/// The first argument (program name) and anything after `--` are left untouched.
/// Expansion is not recursive.
pub fn expand_args<I, T>(args: I) -> Result<Vec<OsString>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut expanded = Vec::new();
    let mut passthrough = false;
    for (index, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if index == 0 || passthrough {
            expanded.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            expanded.push(arg);
            continue;
        }
        match arg.to_str().and_then(|s| s.strip_prefix('@')) {
            Some(path) if !path.is_empty() => {
                let path = PathBuf::from(path);
                let tokens = read_response_file(&path)?;
                log::debug!(
                    "Expanded response file {} into {} arguments",
                    path.display(),
                    tokens.len()
                );
                expanded.extend(tokens.into_iter().map(OsString::from));
            }
            _ => expanded.push(arg),
        }
    }
    Ok(expanded)
}

pub fn read_response_file(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path).map_err(|e| AppError::ResponseFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    tokenize(&contents).map_err(|message| AppError::ResponseFile {
        path: path.to_path_buf(),
        message,
    })
}
