use crate::error::{AppError, Result};
use log;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_DIR: &str = ".fib";
pub const DEFAULT_CONFIG_FILENAME: &str = "fib.toml";
pub const PROJECT_ROOT_ENV: &str = "PROJECT_ROOT";

pub const DEFAULT_EXCLUDED_FOLDERS: &[&str] = &[
    "bin",
    "debug",
    "obj",
    ".vs",
    ".config",
    ".vscode",
    ".git",
    "Properties",
    "packages",
    "build",
    "out",
    ".idea",
];

pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &[
    ".config",
    ".csproj",
    ".json",
    ".dockerignore",
    ".db",
    ".user",
    ".gitignore",
    ".sln",
    ".txt",
    ".rsp",
    ".png",
    ".gif",
    ".jpg",
    ".mp4",
    ".iml",
];

pub const DEFAULT_EXCLUDED_FILE_NAMES: &[&str] = &["Dockerfile"];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub exclude: Exclusions,
}

/// Folder, extension and file-name rules applied while gathering files.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Exclusions {
    #[serde(default = "default_folders")]
    pub folders: Vec<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_file_names")]
    pub file_names: Vec<String>,
    #[serde(default)]
    pub folder_match: FolderMatch,
}

/// How excluded folder names are compared against a file's parent directory.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FolderMatch {
    /// Any occurrence of the name inside the parent path excludes the file.
    #[default]
    Substring,
    /// Only a path component equal to the name excludes the file.
    Component,
}

fn to_owned_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
fn default_folders() -> Vec<String> {
    to_owned_vec(DEFAULT_EXCLUDED_FOLDERS)
}
fn default_extensions() -> Vec<String> {
    to_owned_vec(DEFAULT_EXCLUDED_EXTENSIONS)
}
fn default_file_names() -> Vec<String> {
    to_owned_vec(DEFAULT_EXCLUDED_FILE_NAMES)
}

impl Default for Exclusions {
    fn default() -> Self {
        Self {
            folders: default_folders(),
            extensions: default_extensions(),
            file_names: default_file_names(),
            folder_match: FolderMatch::default(),
        }
    }
}

impl Config {
    /// The directory to bundle: `--project-root`, then `$PROJECT_ROOT`, then the cwd.
    pub fn determine_project_root(cli_project_root: Option<&PathBuf>) -> Result<PathBuf> {
        let requested = match cli_project_root {
            Some(path) => Some(expand_home(path)),
            None => env::var_os(PROJECT_ROOT_ENV)
                .filter(|value| !value.is_empty())
                .map(|value| expand_home(Path::new(&value))),
        };
        let root = match requested {
            Some(path) => path,
            None => env::current_dir().map_err(|source| AppError::ProjectRoot {
                path: PathBuf::from("."),
                source,
            })?,
        };

        let root = root.canonicalize().map_err(|source| AppError::ProjectRoot {
            path: root.clone(),
            source,
        })?;
        if !root.is_dir() {
            return Err(AppError::ProjectRoot {
                path: root,
                source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
            });
        }
        Ok(root)
    }

    /// Which config file applies, if any.
    ///
    /// A `--config-file` value containing a separator is a path (`.toml` is
    /// appended when missing); a bare name is looked up in `.fib/`.
    pub fn resolve_config_path(
        project_root: &Path,
        cli_config_file: Option<&String>,
        cli_disable_config: bool,
    ) -> Result<Option<PathBuf>> {
        if cli_disable_config {
            log::debug!("Config file loading disabled via CLI flag.");
            return Ok(None);
        }
        match cli_config_file {
            Some(value) if is_path_like(value) => explicit_config_path(value).map(Some),
            Some(name) => named_config_path(project_root, name).map(Some),
            None => {
                let default_path = Self::default_config_path(project_root);
                if default_path.is_file() {
                    log::debug!("Using default config file: {}", default_path.display());
                    Ok(Some(default_path))
                } else {
                    log::debug!("No config file at {}", default_path.display());
                    Ok(None)
                }
            }
        }
    }

    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        log::info!("Loading configuration from: {}", config_path.display());
        let toml_content = fs::read_to_string(config_path).map_err(|e| AppError::FileRead {
            path: config_path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&toml_content).map_err(|e| match e {
            AppError::TomlParse(msg) => AppError::TomlParse(format!(
                "Error parsing config file '{}': {}. Check TOML syntax and structure.",
                config_path.display(),
                msg
            )),
            other => other,
        })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str::<Config>(contents).map_err(|e| AppError::TomlParse(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Resolve and load the config file for a project, falling back to defaults.
    pub fn load_for_project(
        project_root: &Path,
        cli_config_file: Option<&String>,
        cli_disable_config: bool,
    ) -> Result<Self> {
        match Self::resolve_config_path(project_root, cli_config_file, cli_disable_config)? {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn default_config_path(project_root: &Path) -> PathBuf {
        project_root
            .join(DEFAULT_CONFIG_DIR)
            .join(DEFAULT_CONFIG_FILENAME)
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(text) => PathBuf::from(shellexpand::tilde(text).as_ref()),
        None => path.to_path_buf(),
    }
}

fn is_path_like(value: &str) -> bool {
    value.starts_with('~') || value.contains(['/', '\\']) || Path::new(value).is_absolute()
}

fn explicit_config_path(value: &str) -> Result<PathBuf> {
    let mut path = expand_home(Path::new(value));
    if !path.exists() && path.extension().is_none() {
        path.set_extension("toml");
    }
    if !path.is_file() {
        return Err(AppError::Config(format!(
            "config file not found: {}",
            path.display()
        )));
    }
    log::debug!("Using config file: {}", path.display());
    Ok(path)
}

fn named_config_path(project_root: &Path, name: &str) -> Result<PathBuf> {
    let file_name = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    };
    let config_dir = project_root.join(DEFAULT_CONFIG_DIR);
    let path = config_dir.join(file_name);
    if !path.is_file() {
        return Err(AppError::Config(format!(
            "config file '{}' not found in {}",
            name,
            config_dir.display()
        )));
    }
    log::debug!("Using named config file: {}", path.display());
    Ok(path)
}
