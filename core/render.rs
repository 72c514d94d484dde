//! Bundle text rendering.
//!
//! Layout of a bundle:
//!
//! ```text
//! output: '<output path>'
//! author: <author>
//! -------------------------------------------
//! File Name: <name>
//! File Content:
//! <content>
//! #Source: <name> (Relative Path: <relative path>)#
//! -------------------------------------------
//! ```

use crate::error::{AppError, Result};
use crate::gather::CandidateFile;
use crate::options::BundleOptions;
use log;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const SEPARATOR: &str = "-------------------------------------------";

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Writes the header and one block per file into `writer`, in call order.
pub struct Renderer<'a, W: Write> {
    writer: W,
    options: &'a BundleOptions,
    root: &'a Path,
    sink_path: PathBuf,
}

impl<'a, W: Write> Renderer<'a, W> {
    /// `sink_path` names the destination in the header and in write errors.
    pub fn new(writer: W, options: &'a BundleOptions, root: &'a Path, sink_path: PathBuf) -> Self {
        Self {
            writer,
            options,
            root,
            sink_path,
        }
    }

    pub fn write_header(&mut self) -> Result<()> {
        let output_line = format!("output: '{}'", self.sink_path.display());
        self.write_line(&output_line)?;
        if let Some(author) = self.options.author().filter(|a| !a.is_empty()) {
            self.write_line(&format!("author: {}", author))?;
        }
        self.write_line(SEPARATOR)
    }

    /// Read `file` from disk and write its block.
    pub fn render_file(&mut self, file: &CandidateFile) -> Result<()> {
        let bytes = fs::read(&file.path).map_err(|e| AppError::FileRead {
            path: file.path.clone(),
            source: e,
        })?;
        let content = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                log::warn!(
                    "File is not valid UTF-8, replacing invalid sequences: {}",
                    file.path.display()
                );
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        self.write_entry(file, &content)
    }

    pub fn write_entry(&mut self, file: &CandidateFile, content: &str) -> Result<()> {
        log::trace!("Rendering entry for {}", file.path.display());
        self.write_line(&format!("File Name: {}", file.name))?;
        self.write_line("File Content:")?;

        if self.options.remove_empty_lines() {
            for line in content.split(LINE_ENDING).filter(|line| !line.is_empty()) {
                self.write_line(line)?;
            }
        } else {
            self.write_line(content)?;
        }

        if self.options.include_note() {
            let note = source_note(file, self.root);
            self.write_line(&note)?;
        }
        self.write_line(SEPARATOR)
    }

    /// Flush and hand back the writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush().map_err(|e| AppError::FileWrite {
            path: self.sink_path.clone(),
            source: e,
        })?;
        Ok(self.writer)
    }

    fn write_line(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_all(text.as_bytes())
            .and_then(|_| self.writer.write_all(LINE_ENDING.as_bytes()))
            .map_err(|e| AppError::FileWrite {
                path: self.sink_path.clone(),
                source: e,
            })
    }
}

/// `#Source: <name> (Relative Path: <path>)#`, with the path relative to `root`.
pub fn source_note(file: &CandidateFile, root: &Path) -> String {
    let relative = pathdiff::diff_paths(&file.path, root).unwrap_or_else(|| file.path.clone());
    format!(
        "#Source: {} (Relative Path: {})#",
        file.name,
        relative.display()
    )
}
