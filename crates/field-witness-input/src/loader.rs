use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use log::debug;

use crate::RawRecord;

/// An error raised while loading an input document. Every variant names the
/// path it concerns so callers can report it precisely.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    /// The path could not be made absolute.
    #[error("could not resolve input path {path:?}: {source}")]
    PathResolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file could not be opened or read.
    #[error("could not read input file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file was read but is not a well-formed JSON object.
    #[error("malformed input file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// The path as given by the caller for resolution errors, the absolute
    /// path otherwise.
    pub fn path(&self) -> &Path {
        match self {
            LoadError::PathResolution { path, .. }
            | LoadError::Io { path, .. }
            | LoadError::Parse { path, .. } => path,
        }
    }
}

/// Reads the JSON document at `path` into a [`RawRecord`].
///
/// Relative paths are resolved against the current directory before anything
/// is opened, so errors always report an absolute path. The file handle lives
/// only for the duration of the read.
pub fn load<P: AsRef<Path>>(path: P) -> Result<RawRecord, LoadError> {
    let given = path.as_ref();
    let path = std::path::absolute(given).map_err(|source| LoadError::PathResolution {
        path: given.to_path_buf(),
        source,
    })?;

    let record = {
        let file = File::open(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        RawRecord::from_reader(BufReader::new(file)).map_err(|source| {
            if source.is_io() {
                LoadError::Io {
                    path: path.clone(),
                    source: source.into(),
                }
            } else {
                LoadError::Parse {
                    path: path.clone(),
                    source,
                }
            }
        })?
    };

    debug!("loaded {} input fields from {:?}", record.len(), path);

    Ok(record)
}
