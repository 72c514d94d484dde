use crate::config::{Exclusions, FolderMatch};
use crate::error::{AppError, Result};
use log;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A discovered file with the attributes used for filtering and sorting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub name: String,
    /// Extension including the leading dot, or empty.
    pub extension: String,
    /// Parent directory relative to the walk root.
    pub relative_dir: PathBuf,
}

impl CandidateFile {
    pub fn new(root: &Path, path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = extension_of(&name).to_string();
        let relative_dir = path
            .parent()
            .map(|parent| {
                pathdiff::diff_paths(parent, root).unwrap_or_else(|| parent.to_path_buf())
            })
            .unwrap_or_default();
        Self {
            path,
            name,
            extension,
            relative_dir,
        }
    }

    /// Extension with the leading dot stripped.
    pub fn bare_extension(&self) -> &str {
        self.extension.strip_prefix('.').unwrap_or(&self.extension)
    }
}

/// Everything from the last `.` of a file name, so `.gitignore` is its own extension.
/// Names without a dot, or ending in one, have no extension.
pub fn extension_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => &name[idx..],
        _ => "",
    }
}

/// Recursively list every file under `root`. Any walk error aborts the listing.
///
/// Symlinks are listed as files unless they resolve to a directory, so a
/// dangling link is kept and fails later when it is read.
pub fn enumerate_files(root: &Path) -> Result<Vec<CandidateFile>> {
    log::info!("Walking project directory: {}", root.display());
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(AppError::from)?;
        let file_type = entry.file_type();
        if file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir()) {
            continue;
        }
        log::trace!("Walked path: {}", entry.path().display());
        files.push(CandidateFile::new(root, entry.into_path()));
    }
    log::info!("Directory walk complete. Found {} files.", files.len());
    Ok(files)
}

/// Walk `root` and drop files matched by the exclusion rules.
pub fn filter_relevant(root: &Path, exclusions: &Exclusions) -> Result<Vec<CandidateFile>> {
    let files = enumerate_files(root)?;
    let total = files.len();
    let relevant: Vec<CandidateFile> = files
        .into_iter()
        .filter(|file| !is_excluded(file, exclusions))
        .collect();
    log::debug!(
        "Path filtering complete: kept {} of {} files.",
        relevant.len(),
        total
    );
    Ok(relevant)
}

pub fn is_excluded(file: &CandidateFile, exclusions: &Exclusions) -> bool {
    if let Some(folder) = excluded_folder(&file.relative_dir, exclusions) {
        log::trace!(
            "Excluding {} (folder rule '{}')",
            file.path.display(),
            folder
        );
        return true;
    }
    if exclusions.extensions.iter().any(|e| *e == file.extension) {
        log::trace!(
            "Excluding {} (extension '{}')",
            file.path.display(),
            file.extension
        );
        return true;
    }
    if exclusions.file_names.iter().any(|n| *n == file.name) {
        log::trace!("Excluding {} (file name)", file.path.display());
        return true;
    }
    false
}

fn excluded_folder<'a>(relative_dir: &Path, exclusions: &'a Exclusions) -> Option<&'a str> {
    match exclusions.folder_match {
        FolderMatch::Substring => {
            let dir = relative_dir.to_string_lossy();
            exclusions
                .folders
                .iter()
                .find(|folder| dir.contains(folder.as_str()))
                .map(String::as_str)
        }
        FolderMatch::Component => exclusions
            .folders
            .iter()
            .find(|folder| {
                relative_dir
                    .components()
                    .any(|c| c.as_os_str() == folder.as_str())
            })
            .map(String::as_str),
    }
}
