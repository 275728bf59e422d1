use std::borrow::Cow;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::fmt;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use bytes::Buf;

use crate::wad::{self, parse_name, Lump, ResultExt, NAME_BYTES};

/// The signature every Quake texture archive starts with.
pub const WAD2_MAGIC: &[u8; 4] = b"WAD2";

const HEADER_BYTES: usize = 12;
const ENTRY_BYTES: usize = 32;

/// A single WAD2 texture archive, read fully into memory.
///
/// The file handle is only held while reading. Afterwards lumps are served as slices of the raw
/// buffer, so a `WadFile` can be shared freely between threads.
pub struct WadFile {
    path: PathBuf,
    raw: Vec<u8>,
    entries: Vec<DirectoryEntry>,
    entry_indices: HashMap<String, usize>,
}

#[derive(Debug)]
struct Header {
    pub lump_count: usize,
    pub directory_offset: usize,
}

/// One 32-byte record in the archive's lump directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    name: String,
    offset: usize,
    disk_size: usize,
    size: usize,
    kind: u8,
    compression: u8,
}

impl DirectoryEntry {
    /// Lump type byte for mip textures.
    pub const MIPTEX: u8 = b'D';

    /// The lump name as stored, NUL padding removed. Case is preserved, but lookups ignore it.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Offset of the lump data from the start of the file.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes the lump occupies in the file.
    pub fn disk_size(&self) -> usize {
        self.disk_size
    }

    /// Number of bytes the lump occupies once decompressed.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The lump type byte, e.g. [`DirectoryEntry::MIPTEX`].
    pub fn kind(&self) -> u8 {
        self.kind
    }

    /// The compression flag. `0` means the data is stored as is.
    pub fn compression(&self) -> u8 {
        self.compression
    }

    /// Returns `true` if the lump data is compressed. Compressed lumps can't be decoded.
    pub fn is_compressed(&self) -> bool {
        self.compression != 0
    }
}

impl fmt::Display for DirectoryEntry {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(
            fmt,
            "{} (offset {}, size {})",
            self.name, self.offset, self.disk_size
        )
    }
}

impl WadFile {
    /// Reads a WAD file from disk.
    pub fn open(path: impl AsRef<Path>) -> wad::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).err_path(path)?;
        Self::load_reader(path, file)
    }

    /// Loads a WAD file from a generic reader.
    ///
    /// The reader's current position doesn't matter. The whole stream is read from the start.
    ///
    /// The `path` is only used for display purposes, such as in error messages. It doesn't need to
    /// point to an actual file on disk.
    pub fn load_reader(path: impl AsRef<Path>, file: impl Read + Seek) -> wad::Result<Self> {
        let path = path.as_ref();
        let raw = Self::read_into_vec(file).err_path(path)?;
        Self::load_raw(path, raw)
    }

    fn read_into_vec(mut file: impl Read + Seek) -> io::Result<Vec<u8>> {
        let size = file.seek(SeekFrom::End(0))?;
        let size = usize::try_from(size)
            .ok()
            .filter(|&size| isize::try_from(size).is_ok())
            .ok_or_else(|| io::Error::new(io::ErrorKind::OutOfMemory, "file too large"))?;
        let mut raw = Vec::with_capacity(size);

        file.seek(SeekFrom::Start(0))?;
        file.read_to_end(&mut raw)?;

        Ok(raw)
    }

    /// Loads a WAD file from a raw byte buffer.
    ///
    /// The `path` is only used for display purposes, such as in error messages. It doesn't need to
    /// point to an actual file on disk.
    pub fn load_raw(path: impl AsRef<Path>, raw: Vec<u8>) -> wad::Result<Self> {
        let path = path.as_ref();

        let magic = Self::read_magic(&raw).map_err(|desc| wad::Error::malformed(path, desc))?;
        if &magic != WAD2_MAGIC {
            return Err(wad::Error::WrongMagic {
                path: path.to_owned(),
                magic,
            });
        }

        Self::load_raw_impl(path, raw).map_err(|desc: String| wad::Error::malformed(path, desc))
    }

    fn read_magic(raw: &[u8]) -> Result<[u8; 4], String> {
        let mut magic = [0u8; 4];
        let bytes = raw
            .get(0..4)
            .ok_or_else(|| "too short to be a WAD file".to_owned())?;
        magic.copy_from_slice(bytes);
        Ok(magic)
    }

    // Non-generic helper to minimize the amount of code subject to monomorphization.
    fn load_raw_impl(path: &Path, raw: Vec<u8>) -> Result<Self, String> {
        let Header {
            lump_count,
            directory_offset,
        } = Self::read_header(&raw)?;

        let entries = Self::read_directory(&raw, lump_count, directory_offset)?;

        // The first of several same-named lumps wins.
        let mut entry_indices = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            entry_indices
                .entry(entry.name.to_ascii_lowercase())
                .or_insert(index);
        }

        Ok(Self {
            path: path.to_owned(),
            raw,
            entries,
            entry_indices,
        })
    }

    fn read_header(raw: &[u8]) -> Result<Header, String> {
        let mut header = raw
            .get(4..HEADER_BYTES)
            .ok_or_else(|| "truncated header".to_owned())?;

        let lump_count = header.get_u32_le() as usize;
        let directory_offset = header.get_u32_le() as usize;

        Ok(Header {
            lump_count,
            directory_offset,
        })
    }

    fn read_directory(
        raw: &[u8],
        lump_count: usize,
        directory_offset: usize,
    ) -> Result<Vec<DirectoryEntry>, String> {
        let mut cursor = raw
            .get(directory_offset..)
            .ok_or_else(|| format!("lump directory at illegal offset {}", directory_offset))?;

        if cursor.len() / ENTRY_BYTES < lump_count {
            return Err(format!(
                "truncated lump directory: {} entries declared, room for {}",
                lump_count,
                cursor.len() / ENTRY_BYTES
            ));
        }

        // The archive is untrusted so clamp how much memory is pre-allocated. For comparison,
        // Quake's `gfx.wad` has under 200 lumps.
        let mut entries = Vec::with_capacity(lump_count.clamp(0, 4096));

        for _ in 0..lump_count {
            let offset = cursor.get_u32_le() as usize;
            let disk_size = cursor.get_u32_le() as usize;
            let size = cursor.get_u32_le() as usize;
            let kind = cursor.get_u8();
            let compression = cursor.get_u8();
            let _padding = cursor.get_u16_le();

            let mut name = [0u8; NAME_BYTES];
            cursor.copy_to_slice(&mut name);
            let name = parse_name(&name);

            entries.push(DirectoryEntry {
                name,
                offset,
                disk_size,
                size,
                kind,
                compression,
            });
        }

        Ok(entries)
    }

    /// The file's path on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All directory entries, in file order.
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// Looks up a directory entry by name, ignoring case.
    pub fn entry(&self, name: &str) -> Option<&DirectoryEntry> {
        self.entry_indices
            .get(&name.to_ascii_lowercase())
            .map(|&index| &self.entries[index])
    }

    /// Retrieves a lump by name, ignoring case.
    ///
    /// # Errors
    ///
    /// It is an error if the lump is missing.
    pub fn lump(&self, name: &str) -> wad::Result<Lump> {
        self.try_lump(name)?
            .ok_or_else(|| self.error(format!("{} missing", name)))
    }

    /// Retrieves a lump by name, ignoring case.
    ///
    /// Returns `Ok(None)` if the lump is missing. It is an error if the directory entry points
    /// outside the file.
    pub fn try_lump(&self, name: &str) -> wad::Result<Option<Lump>> {
        let entry = match self.entry(name) {
            Some(entry) => entry,
            None => return Ok(None),
        };

        Ok(Some(self.read_lump(entry)?))
    }

    /// Pulls a lump's slice out of the raw data, checking its bounds.
    fn read_lump<'wad>(&'wad self, entry: &'wad DirectoryEntry) -> wad::Result<Lump<'wad>> {
        let end = entry
            .offset
            .checked_add(entry.disk_size)
            .filter(|&end| end <= self.raw.len())
            .ok_or_else(|| {
                self.error(format!(
                    "{} extends past end of file ({} bytes)",
                    entry,
                    self.raw.len()
                ))
            })?;

        Ok(Lump::new(self, entry, &self.raw[entry.offset..end]))
    }

    /// Creates a [`wad::Error::Malformed`] blaming this file.
    pub fn error(&self, desc: impl Into<Cow<'static, str>>) -> wad::Error {
        wad::Error::malformed(&self.path, desc.into().into_owned())
    }
}

impl fmt::Debug for WadFile {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("WadFile")
            .field("path", &self.path)
            .field("raw", &format!("<{} bytes>", self.raw.len()))
            .field("entries", &self.entries)
            .finish()
    }
}

impl fmt::Display for WadFile {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::*;

    #[test]
    fn directory() {
        let wad = WadFile::load_raw("test.wad", TEST_WAD.clone()).unwrap();

        let names: Vec<&str> = wad.entries().iter().map(DirectoryEntry::name).collect();
        assert_eq!(names, ["wall", "{grate", "*water1"]);

        let wall = wad.entry("WALL").unwrap();
        assert_eq!(wall.kind(), DirectoryEntry::MIPTEX);
        assert!(!wall.is_compressed());
        assert_eq!(wall.disk_size(), wall.size());
    }

    #[test]
    fn lump_lookup() {
        let wad = WadFile::load_raw("test.wad", TEST_WAD.clone()).unwrap();

        assert_matches!(wad.try_lump("{GRATE"), Ok(Some(_)));
        assert_matches!(wad.try_lump("missing"), Ok(None));
        assert_matches!(wad.lump("missing"), Err(wad::Error::Malformed { .. }));
    }

    #[test]
    fn wrong_magic() {
        let mut raw = TEST_WAD.clone();
        raw[3] = b'3';
        assert_matches!(
            WadFile::load_raw("test.wad", raw),
            Err(wad::Error::WrongMagic { magic, .. }) if &magic == b"WAD3"
        );

        assert_matches!(
            WadFile::load_raw("empty.wad", Vec::new()),
            Err(wad::Error::Malformed { .. })
        );
    }

    #[test]
    fn truncated_directory() {
        let mut raw = TEST_WAD.clone();
        raw.truncate(raw.len() - 1);
        assert_matches!(
            WadFile::load_raw("test.wad", raw),
            Err(wad::Error::Malformed { desc, .. }) if desc.starts_with("truncated lump directory")
        );
    }

    #[test]
    fn lump_past_end() {
        let raw = build_wad(&[RawLump {
            name: "oops",
            kind: DirectoryEntry::MIPTEX,
            compression: 0,
            data: vec![0; 8],
            declared_size: Some(1000),
        }]);
        let wad = WadFile::load_raw("test.wad", raw).unwrap();
        assert_matches!(wad.try_lump("oops"), Err(wad::Error::Malformed { .. }));
    }

    // Make sure `WadFile` is `Send` and `Sync`.
    trait IsSendAndSync: Send + Sync {}
    impl IsSendAndSync for WadFile {}
}
