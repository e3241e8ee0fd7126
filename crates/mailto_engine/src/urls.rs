use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UrlListError {
    #[error("file '{0}' not found")]
    NotFound(PathBuf),
    #[error("error reading file '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },
}

/// One URL per line; blank lines and `#` comments are skipped.
pub fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToOwned::to_owned)
        .collect()
}

pub fn read_url_list(path: &Path) -> Result<Vec<String>, UrlListError> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            UrlListError::NotFound(path.to_path_buf())
        } else {
            UrlListError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    Ok(parse_url_list(&content))
}
