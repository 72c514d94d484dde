//! Bundle options and their validation.

use crate::error::{AppError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const ALL_LANGUAGES: &str = "all";

/// Ordering applied to the gathered files before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Ascending by base file name.
    #[default]
    ByName,
    /// Ascending by extension, dot included.
    ByType,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::ByName => "name",
            SortKey::ByType => "type",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "name" => Ok(SortKey::ByName),
            "type" => Ok(SortKey::ByType),
            other => Err(AppError::Validation(format!(
                "invalid sort option '{}', expected 'type' or 'name'",
                other
            ))),
        }
    }
}

/// Parsed form of the `--languages` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageSelector {
    All,
    /// Extension tokens without the leading dot, exactly as split on single spaces.
    Extensions(Vec<String>),
}

impl LanguageSelector {
    pub fn parse(raw: &str) -> Self {
        if raw == ALL_LANGUAGES {
            LanguageSelector::All
        } else {
            LanguageSelector::Extensions(raw.split(' ').map(String::from).collect())
        }
    }

    pub fn matches_extension(&self, extension_without_dot: &str) -> bool {
        match self {
            LanguageSelector::All => true,
            LanguageSelector::Extensions(tokens) => {
                tokens.iter().any(|token| token == extension_without_dot)
            }
        }
    }
}

impl fmt::Display for LanguageSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageSelector::All => f.write_str(ALL_LANGUAGES),
            LanguageSelector::Extensions(tokens) => f.write_str(&tokens.join(" ")),
        }
    }
}

/// Unvalidated bundle options as collected from the command line or a response file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleRequest {
    pub output: Option<PathBuf>,
    pub author: Option<String>,
    pub languages: Option<String>,
    pub sort: Option<String>,
    pub remove_empty_lines: bool,
    pub include_note: bool,
}

impl BundleRequest {
    /// Check required values and the sort key, producing immutable [`BundleOptions`].
    pub fn validate(self) -> Result<BundleOptions> {
        let output_path = match self.output {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => {
                return Err(AppError::Validation(
                    "output option is required!".to_string(),
                ));
            }
        };

        let languages = match self.languages {
            Some(raw) if !raw.is_empty() => LanguageSelector::parse(&raw),
            _ => {
                return Err(AppError::Validation(
                    "languages option is required!".to_string(),
                ));
            }
        };

        let sort_key = match self.sort.as_deref() {
            Some(raw) => raw.parse::<SortKey>()?,
            None => SortKey::default(),
        };

        let author = self.author.filter(|a| !a.is_empty());

        log::debug!(
            "Validated bundle options: output={}, languages={}, sort={}",
            output_path.display(),
            languages,
            sort_key
        );

        Ok(BundleOptions {
            output_path,
            author,
            languages,
            remove_empty_lines: self.remove_empty_lines,
            include_note: self.include_note,
            sort_key,
        })
    }
}

/// Validated options consumed by the bundling pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOptions {
    output_path: PathBuf,
    author: Option<String>,
    languages: LanguageSelector,
    remove_empty_lines: bool,
    include_note: bool,
    sort_key: SortKey,
}

impl BundleOptions {
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn languages(&self) -> &LanguageSelector {
        &self.languages
    }

    pub fn remove_empty_lines(&self) -> bool {
        self.remove_empty_lines
    }

    pub fn include_note(&self) -> bool {
        self.include_note
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }
}
