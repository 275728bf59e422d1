use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::wad;

/// A specialized [`Result`] type for [`WadFile`] and [`WadStack`] operations. This typedef is used
/// to avoid writing out [`wad::Error`] directly and is otherwise a direct mapping to [`Result`].
///
/// [`Result`]: std::result::Result
/// [`WadFile`]: crate::wad::WadFile
/// [`WadStack`]: crate::wad::WadStack
pub type Result<T> = std::result::Result<T, Error>;

/// The error type when opening archives and decoding their lumps. Errors are always tied to a
/// particular archive file.
#[derive(Error, Debug)]
pub enum Error {
    /// An I/O error from a [`std::io`] operation.
    #[error("{}: {source}", path.display())]
    Io {
        /// The path of the file where the I/O error occurred.
        path: PathBuf,
        /// The source I/O error.
        source: io::Error,
    },

    /// The file doesn't start with the `WAD2` signature.
    #[error("{}: not a WAD2 file (magic {magic:?})", path.display())]
    WrongMagic {
        /// The file path.
        path: PathBuf,
        /// The four bytes found where the signature should be.
        magic: [u8; 4],
    },

    /// An archive is truncated or a lump in it is malformed.
    #[error("{}: {desc}", path.display())]
    Malformed {
        /// The path of the malformed file.
        path: PathBuf,
        /// A description of the error.
        desc: String,
    },
}

impl Error {
    pub fn malformed(path: impl AsRef<Path>, desc: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.as_ref().to_owned(),
            desc: desc.into(),
        }
    }

    /// The archive the error blames.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::WrongMagic { path, .. } | Self::Malformed { path, .. } => {
                path
            }
        }
    }
}

/// Import this trait to add an extension method to convert a [`std::io::Result`] into a
/// [`wad::Result`].
pub trait ResultExt<T> {
    /// Maps a [`std::io::Error`] into a [`wad::Error::Io`] by adding a file path for context.
    fn err_path(self, path: impl AsRef<Path>) -> wad::Result<T>;
}

impl<T> ResultExt<T> for io::Result<T> {
    fn err_path(self, path: impl AsRef<Path>) -> wad::Result<T> {
        self.map_err(|err| wad::Error::Io {
            path: path.as_ref().to_owned(),
            source: err,
        })
    }
}
