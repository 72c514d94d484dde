use crate::config::Exclusions;
use crate::error::{AppError, Result};
use crate::gather::{self, CandidateFile};
use crate::language::filter_by_language;
use crate::options::BundleOptions;
use crate::render::Renderer;
use crate::sort::sort_files;
use log;
use std::fs::File;
use std::io::{BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleReport {
    pub output_path: PathBuf,
    pub files_written: usize,
}

/// Gather, filter, sort and concatenate the files under `root` into the output file.
///
/// Nothing is created when the output directory is missing; any read or write
/// failure aborts the run.
pub fn bundle(
    root: &Path,
    options: &BundleOptions,
    exclusions: &Exclusions,
) -> Result<BundleReport> {
    log::info!("Starting bundle of {}", root.display());
    let output_path = std::path::absolute(options.output_path())?;
    let canonical_output = canonical_output_path(&output_path)?;

    let files: Vec<CandidateFile> = collect_files(root, options, exclusions)?
        .into_iter()
        .filter(|file| {
            let is_output = file.path == canonical_output;
            if is_output {
                log::debug!("Skipping the bundle output itself: {}", file.path.display());
            }
            !is_output
        })
        .collect();

    let file = File::create(&output_path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AppError::OutputPath {
            path: output_path.clone(),
        },
        _ => AppError::FileWrite {
            path: output_path.clone(),
            source: e,
        },
    })?;

    let mut renderer = Renderer::new(BufWriter::new(file), options, root, output_path.clone());
    renderer.write_header()?;
    for candidate in &files {
        renderer.render_file(candidate)?;
    }
    renderer.finish()?;

    log::info!("Bundled {} files into {}", files.len(), output_path.display());
    Ok(BundleReport {
        output_path,
        files_written: files.len(),
    })
}

/// The ordered file list a bundle of `root` would contain.
pub fn collect_files(
    root: &Path,
    options: &BundleOptions,
    exclusions: &Exclusions,
) -> Result<Vec<CandidateFile>> {
    let relevant = gather::filter_relevant(root, exclusions)?;
    let selected = filter_by_language(relevant, options.languages());
    Ok(sort_files(selected, options.sort_key()))
}

fn canonical_output_path(output_path: &Path) -> Result<PathBuf> {
    let parent = output_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    if !parent.is_dir() {
        return Err(AppError::OutputPath {
            path: output_path.to_path_buf(),
        });
    }
    let parent = parent.canonicalize()?;
    Ok(match output_path.file_name() {
        Some(name) => parent.join(name),
        None => parent,
    })
}
