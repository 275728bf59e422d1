use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::map;

/// The error type when loading map files. Malformed lines are not errors; they are reported and
/// skipped.
#[derive(Error, Debug)]
pub enum Error {
    /// An I/O error reading the map file.
    #[error("{}: {source}", path.display())]
    Io {
        /// The path of the map file.
        path: PathBuf,
        /// The source I/O error.
        source: io::Error,
    },
}

impl Error {
    /// The map file the error blames.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) trait ResultExt<T> {
    fn err_path(self, path: impl AsRef<Path>) -> map::Result<T>;
}

impl<T> ResultExt<T> for io::Result<T> {
    fn err_path(self, path: impl AsRef<Path>) -> map::Result<T> {
        self.map_err(|err| map::Error::Io {
            path: path.as_ref().to_owned(),
            source: err,
        })
    }
}
