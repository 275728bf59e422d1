use std::fmt;

use bytes::Bytes;

use crate::wad::{self, Cursor, DirectoryEntry, WadFile};

/// A lump of data from a [`WadFile`].
///
/// Lumps are cheap to create as they simply borrow a slice of data from their WAD file.
#[derive(Clone)]
pub struct Lump<'wad> {
    file: &'wad WadFile,
    entry: &'wad DirectoryEntry,
    data: &'wad [u8],
}

impl<'wad> Lump<'wad> {
    /// Creates a lump pointing at a slice of data from a `WadFile`.
    pub(super) fn new(file: &'wad WadFile, entry: &'wad DirectoryEntry, data: &'wad [u8]) -> Self {
        Self { file, entry, data }
    }

    /// The file containing the lump.
    pub fn file(&self) -> &'wad WadFile {
        self.file
    }

    /// The lump's directory entry.
    pub fn entry(&self) -> &'wad DirectoryEntry {
        self.entry
    }

    /// The lump name as stored in the directory, for example `*water1` or `{grate`.
    pub fn name(&self) -> &'wad str {
        self.entry.name()
    }

    /// The lump data, a binary blob.
    pub fn data(&self) -> &'wad [u8] {
        self.data
    }

    /// The size of the lump.
    ///
    /// This is equivalent to `self.data().len()`.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the lump has no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checks that the lump data is stored uncompressed.
    pub fn expect_uncompressed(&self) -> wad::Result<&Self> {
        if self.entry.is_compressed() {
            Err(self.error(&format!(
                "compressed lumps are not supported (compression {})",
                self.entry.compression()
            )))
        } else {
            Ok(self)
        }
    }

    /// Creates a [`Cursor`] over the lump data for parsing.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self, Bytes::copy_from_slice(self.data))
    }

    /// Creates a [`wad::Error::Malformed`] blaming this lump.
    pub fn error(&self, desc: &str) -> wad::Error {
        self.file.error(format!("{}: {}", self.name(), desc))
    }
}

impl fmt::Debug for Lump<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(
            fmt,
            "{} ({} bytes) from {}",
            self.name(),
            self.size(),
            self.file,
        )
    }
}

impl fmt::Display for Lump<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.name())
    }
}
