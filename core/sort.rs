use crate::gather::CandidateFile;
use crate::options::SortKey;
use log;

/// Stable sort by base name or by extension; equal keys keep their input order.
pub fn sort_files(mut files: Vec<CandidateFile>, sort_key: SortKey) -> Vec<CandidateFile> {
    match sort_key {
        SortKey::ByName => files.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::ByType => files.sort_by(|a, b| a.extension.cmp(&b.extension)),
    }
    log::debug!("Sorted {} files by {}.", files.len(), sort_key);
    files
}
