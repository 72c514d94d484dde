use crate::gather::CandidateFile;
use crate::options::LanguageSelector;
use log;

/// Keep files whose extension (without the dot) is selected. `All` keeps everything.
pub fn filter_by_language(
    files: Vec<CandidateFile>,
    selector: &LanguageSelector,
) -> Vec<CandidateFile> {
    if let LanguageSelector::All = selector {
        log::debug!("Language selector is 'all', keeping {} files.", files.len());
        return files;
    }
    let total = files.len();
    let kept: Vec<CandidateFile> = files
        .into_iter()
        .filter(|file| selector.matches_extension(file.bare_extension()))
        .collect();
    log::debug!(
        "Language filter '{}' kept {} of {} files.",
        selector,
        kept.len(),
        total
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    fn files(names: &[&str]) -> Vec<CandidateFile> {
        let root = Path::new("/repo");
        names
            .iter()
            .map(|n| CandidateFile::new(root, PathBuf::from("/repo/src").join(n)))
            .collect()
    }

    fn names(files: &[CandidateFile]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn all_is_identity() {
        let input = files(&["b.rs", "a.py", "Makefile", "c.txt"]);
        let output = filter_by_language(input.clone(), &LanguageSelector::parse("all"));
        assert_eq!(output, input);
    }

    #[test]
    fn keeps_only_selected_extensions() {
        let input = files(&["main.py", "notes.txt", "app.js", "README", "setup.PY"]);
        let output = filter_by_language(input, &LanguageSelector::parse("py txt"));
        assert_eq!(names(&output), vec!["main.py", "notes.txt"]);
    }

    #[test]
    fn unknown_tokens_match_nothing() {
        let input = files(&["main.py", "app.js"]);
        let output = filter_by_language(input, &LanguageSelector::parse("cobol"));
        assert!(output.is_empty());
    }
}
