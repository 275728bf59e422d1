use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{map, wad};

/// A specialized [`Result`] type for conversion runs.
///
/// [`Result`]: std::result::Result
pub type Result<T> = std::result::Result<T, Error>;

/// Why one map or one texture couldn't be converted. None of these stop a batch.
#[derive(Error, Debug)]
pub enum Error {
    /// A map file or archive doesn't exist.
    #[error("{}: file not found", path.display())]
    InputNotFound { path: PathBuf },

    /// A file exists but can't be read or isn't in the expected format.
    #[error("{}: {desc}", path.display())]
    FormatMismatch { path: PathBuf, desc: String },

    /// A texture isn't in any archive or texture directory.
    #[error("{texture}: not found in any archive or texture directory")]
    LookupMiss { texture: String },

    /// An output file couldn't be written.
    #[error("{}: {desc}", path.display())]
    WriteFailed { path: PathBuf, desc: String },
}

/// The kind of an [`Error`], without its context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InputNotFound,
    FormatMismatch,
    LookupMiss,
    WriteFailed,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InputNotFound { .. } => ErrorKind::InputNotFound,
            Self::FormatMismatch { .. } => ErrorKind::FormatMismatch,
            Self::LookupMiss { .. } => ErrorKind::LookupMiss,
            Self::WriteFailed { .. } => ErrorKind::WriteFailed,
        }
    }

    /// The file the error is about, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::InputNotFound { path }
            | Self::FormatMismatch { path, .. }
            | Self::WriteFailed { path, .. } => Some(path.as_path()),
            Self::LookupMiss { .. } => None,
        }
    }

    /// Blames `path` for a failed write.
    pub fn write_failed(path: impl AsRef<Path>, err: impl std::fmt::Display) -> Self {
        Self::WriteFailed {
            path: path.as_ref().to_owned(),
            desc: err.to_string(),
        }
    }

    fn from_io(path: PathBuf, source: &io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::InputNotFound { path }
        } else {
            Self::FormatMismatch {
                path,
                desc: source.to_string(),
            }
        }
    }
}

impl From<wad::Error> for Error {
    fn from(err: wad::Error) -> Self {
        match err {
            wad::Error::Io { path, source } => Self::from_io(path, &source),
            wad::Error::WrongMagic { path, magic } => Self::FormatMismatch {
                path,
                desc: format!("not a WAD2 file (magic {:?})", magic),
            },
            wad::Error::Malformed { path, desc } => Self::FormatMismatch { path, desc },
        }
    }
}

impl From<map::Error> for Error {
    fn from(err: map::Error) -> Self {
        match err {
            map::Error::Io { path, source } => Self::from_io(path, &source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_wad() {
        let not_found = wad::Error::Io {
            path: "gone.wad".into(),
            source: io::ErrorKind::NotFound.into(),
        };
        assert_matches!(
            Error::from(not_found),
            Error::InputNotFound { path } if path == Path::new("gone.wad")
        );

        let denied = wad::Error::Io {
            path: "locked.wad".into(),
            source: io::ErrorKind::PermissionDenied.into(),
        };
        assert_eq!(Error::from(denied).kind(), ErrorKind::FormatMismatch);

        let magic = wad::Error::WrongMagic {
            path: "doom.wad".into(),
            magic: *b"IWAD",
        };
        assert_matches!(
            Error::from(magic),
            Error::FormatMismatch { desc, .. } if desc.contains("not a WAD2 file")
        );

        let malformed = wad::Error::malformed("short.wad", "truncated lump directory");
        let err = Error::from(malformed);
        assert_eq!(err.kind(), ErrorKind::FormatMismatch);
        assert_eq!(err.to_string(), "short.wad: truncated lump directory");
    }

    #[test]
    fn from_map() {
        let err = Error::from(map::Error::Io {
            path: "e1m1.map".into(),
            source: io::ErrorKind::NotFound.into(),
        });
        assert_eq!(err.kind(), ErrorKind::InputNotFound);
        assert_eq!(err.path(), Some(Path::new("e1m1.map")));
        assert_eq!(err.to_string(), "e1m1.map: file not found");
    }

    #[test]
    fn lookup_miss() {
        let err = Error::LookupMiss {
            texture: "sky1".into(),
        };
        assert_eq!(err.kind(), ErrorKind::LookupMiss);
        assert_eq!(err.path(), None);
    }

    #[test]
    fn write_failed() {
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        let err = Error::write_failed("out/maps/e1m1.vmf", denied);
        assert_eq!(err.kind(), ErrorKind::WriteFailed);
        assert_eq!(err.path(), Some(Path::new("out/maps/e1m1.vmf")));
    }
}
