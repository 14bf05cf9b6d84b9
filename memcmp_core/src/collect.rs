use std::ffi::OsString;
use std::path::Path;

use tracing::{debug, error, info};

use crate::error::CollectError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedFile {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Default)]
pub struct CollectOutcome {
    /// Sorted by file name.
    pub files: Vec<CollectedFile>,
    pub problems: Vec<CollectError>,
}

impl CollectOutcome {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Reads every regular file directly inside `dir`.
///
/// Never fails: a missing directory or an unreadable listing yields no files,
/// and unreadable files are skipped. Every problem is logged and kept in
/// [`CollectOutcome::problems`].
pub fn collect_files(dir: &Path) -> CollectOutcome {
    let mut outcome = CollectOutcome::default();

    if !dir.is_dir() {
        let problem = CollectError::NotADirectory {
            path: dir.to_path_buf(),
        };
        error!("{problem}");
        outcome.problems.push(problem);
        return outcome;
    }

    let mut names = match list_regular_file_names(dir) {
        Ok(names) => names,
        Err(source) => {
            let problem = CollectError::ListDir {
                path: dir.to_path_buf(),
                source,
            };
            error!("{problem}");
            outcome.problems.push(problem);
            return outcome;
        }
    };
    names.sort();

    for os_name in names {
        // Read through the real name; the lossy form is only for display.
        let name = os_name.to_string_lossy().into_owned();
        match std::fs::read_to_string(dir.join(&os_name)) {
            Ok(content) => {
                info!("Read file: {name}");
                outcome.files.push(CollectedFile { name, content });
            }
            Err(source) => {
                let problem = CollectError::ReadFile { name, source };
                error!("{problem}");
                outcome.problems.push(problem);
            }
        }
    }

    outcome
}

fn list_regular_file_names(dir: &Path) -> std::io::Result<Vec<OsString>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        // Follows symlinks, so a link to a regular file counts as one.
        if !path.is_file() {
            debug!("skipping non-file entry {}", path.display());
            continue;
        }
        names.push(entry.file_name());
    }
    Ok(names)
}
