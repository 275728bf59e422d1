use std::path::Path;

use crate::report::{Diagnostic, Reporter};
use crate::wad::{self, Lump, WadFile};

/// An ordered list of WAD2 archives searched front to back.
///
/// Archives that can't be opened are reported and left out; they never make the whole stack
/// unusable. Lookups stop at the first archive that has the lump and decodes it successfully.
#[derive(Debug, Default)]
#[must_use]
pub struct WadStack {
    files: Vec<WadFile>,
}

impl WadStack {
    /// Creates an empty stack. Every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens each archive in priority order. Files that are missing, aren't WAD2 archives, or have
    /// a broken directory are reported as warnings and skipped.
    pub fn open<P: AsRef<Path>>(
        paths: impl IntoIterator<Item = P>,
        reporter: &mut dyn Reporter,
    ) -> Self {
        let mut stack = Self::new();

        for path in paths {
            let path = path.as_ref();
            match WadFile::open(path) {
                Ok(file) => {
                    reporter.report(
                        Diagnostic::info(format!("opened archive with {} lumps", file.entries().len()))
                            .with_path(path),
                    );
                    stack.push(file);
                }
                Err(err) => reporter.report(archive_warning(err)),
            }
        }

        stack
    }

    /// Appends an already opened archive at the lowest priority.
    pub fn push(&mut self, file: WadFile) {
        self.files.push(file);
    }

    /// The archives in priority order.
    pub fn files(&self) -> &[WadFile] {
        &self.files
    }

    /// Returns `true` if no archive could be opened.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Finds the lump `name` (case-insensitive) and decodes it with `decode`.
    ///
    /// Archives are tried in priority order. If an archive has the lump but it is out of bounds or
    /// fails to decode, the failure is reported and the search moves on to the next archive.
    /// Returns `None` if no archive yields the lump.
    pub fn lookup<T>(
        &self,
        name: &str,
        mut decode: impl FnMut(&Lump) -> wad::Result<T>,
        reporter: &mut dyn Reporter,
    ) -> Option<T> {
        for file in &self.files {
            let result = file
                .try_lump(name)
                .and_then(|lump| lump.map(|lump| decode(&lump)).transpose());

            match result {
                Ok(Some(value)) => {
                    reporter.report(
                        Diagnostic::info("found in archive")
                            .with_path(file.path())
                            .with_texture(name),
                    );
                    return Some(value);
                }
                Ok(None) => {}
                Err(err) => reporter.report(archive_warning(err).with_texture(name)),
            }
        }

        None
    }
}

/// Words an archive failure the way [`crate::Error`] categorises it.
fn archive_warning(err: wad::Error) -> Diagnostic {
    let path = err.path().to_owned();
    Diagnostic::warning(crate::Error::from(err).to_string()).with_path(path)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::report::Severity;
    use crate::test::*;

    fn temp_wad(raw: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(raw).unwrap();
        file
    }

    #[test]
    fn skips_unopenable_archives() {
        let good = temp_wad(&TEST_WAD);
        let bad = temp_wad(b"PACK\0\0\0\0\0\0\0\0");
        let mut diagnostics = Vec::new();

        let stack = WadStack::open(
            vec![
                Path::new("definitely/not/here.wad"),
                bad.path(),
                good.path(),
            ],
            &mut diagnostics,
        );

        assert_eq!(stack.files().len(), 1);
        let warnings: Vec<_> = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .collect();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].path.as_deref(), Some(Path::new("definitely/not/here.wad")));
        assert_eq!(warnings[1].path.as_deref(), Some(bad.path()));
        assert!(warnings[0].message.ends_with(": file not found"));
        assert!(warnings[1].message.contains("not a WAD2 file"));
    }

    #[test]
    fn first_archive_wins() {
        let mut stack = WadStack::new();
        stack.push(WadFile::load_raw("first.wad", TEST_WAD.clone()).unwrap());
        stack.push(WadFile::load_raw("second.wad", TEST_WAD.clone()).unwrap());
        let mut diagnostics = Vec::new();

        let found = stack.lookup("WALL", |lump| Ok(lump.file().path().to_owned()), &mut diagnostics);
        assert_eq!(found.as_deref(), Some(Path::new("first.wad")));
    }

    #[test]
    fn falls_through_on_decode_failure() {
        let mut stack = WadStack::new();
        stack.push(WadFile::load_raw("first.wad", TEST_WAD.clone()).unwrap());
        stack.push(WadFile::load_raw("second.wad", TEST_WAD.clone()).unwrap());
        let mut diagnostics = Vec::new();

        let found = stack.lookup(
            "wall",
            |lump| {
                if lump.file().path() == Path::new("first.wad") {
                    Err(lump.error("broken"))
                } else {
                    Ok(lump.file().path().to_owned())
                }
            },
            &mut diagnostics,
        );

        assert_eq!(found.as_deref(), Some(Path::new("second.wad")));
        assert_matches!(
            diagnostics.iter().find(|d| d.severity == Severity::Warning),
            Some(d) if d.texture.as_deref() == Some("wall") && d.message.contains("broken")
        );
    }

    #[test]
    fn miss() {
        let mut stack = WadStack::new();
        stack.push(WadFile::load_raw("only.wad", TEST_WAD.clone()).unwrap());
        let mut diagnostics = Vec::new();

        assert_eq!(stack.lookup("nope", |_| Ok(()), &mut diagnostics), None);
        assert!(diagnostics.is_empty());
    }
}
