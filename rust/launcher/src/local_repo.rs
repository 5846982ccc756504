//! Discovery of the dependencies downloaded into the local repository of an interpreter setting.
use crate::error::{Error, ListLocalRepoSnafu, ReadLocalRepoEntrySnafu};
use snafu::ResultExt;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// List the files directly inside `dir`, sorted by path.
///
/// A missing directory simply has no artifacts. Any other failure to read it is an error, since
/// shipping only part of the dependencies would break the interpreter in confusing ways.
pub fn list_artifacts(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("Local repository {} does not exist", dir.display());
            return Ok(Vec::new());
        }
        Err(err) => return Err(err).context(ListLocalRepoSnafu { path: dir }),
    };

    let mut artifacts = Vec::new();
    for entry in entries {
        let path = entry.context(ReadLocalRepoEntrySnafu { path: dir })?.path();
        // follows symlinks, a dangling or unreadable entry is an error
        let metadata = std::fs::metadata(&path).context(ReadLocalRepoEntrySnafu { path: &path })?;
        if metadata.is_file() {
            artifacts.push(path);
        }
    }
    artifacts.sort();

    debug!(
        "Found {} artifact(s) in local repository {}",
        artifacts.len(),
        dir.display()
    );
    Ok(artifacts)
}
