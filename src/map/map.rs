use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::map::{self, parse_brushes, Brush, ResultExt};
use crate::report::{Callback, Diagnostic, Reporter};

/// A parsed `.map` file: every brush of every entity, and the textures they use.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Map {
    brushes: Vec<Brush>,
    textures: BTreeSet<String>,
}

impl Map {
    /// Builds a map from brushes, dropping any without planes.
    pub fn new(brushes: Vec<Brush>) -> Self {
        let brushes: Vec<Brush> = brushes.into_iter().filter(|b| !b.is_empty()).collect();
        let textures = brushes
            .iter()
            .flat_map(|brush| brush.iter())
            .map(|plane| plane.texture.to_lowercase())
            .collect();

        Self { brushes, textures }
    }

    /// Parses map source text. Lines that can't be parsed are reported and skipped, so this never
    /// fails.
    pub fn parse(text: &str, reporter: &mut dyn Reporter) -> Self {
        Self::new(parse_brushes(text, reporter))
    }

    /// Reads and parses a map file. Diagnostics are tagged with `path`.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn load(path: impl AsRef<Path>, reporter: &mut dyn Reporter) -> map::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read(path).err_path(path)?;
        let text = String::from_utf8_lossy(&raw);

        let mut tagged = Callback(|mut diagnostic: Diagnostic| {
            if diagnostic.path.is_none() {
                diagnostic.path = Some(path.to_owned());
            }
            reporter.report(diagnostic);
        });
        let map = Self::parse(&text, &mut tagged);

        tagged.report(Diagnostic::info(format!(
            "parsed {} brushes and {} unique textures",
            map.brushes.len(),
            map.textures.len()
        )));

        Ok(map)
    }

    /// Brushes in source order. None are empty.
    pub fn brushes(&self) -> &[Brush] {
        &self.brushes
    }

    /// Unique lowercase texture references, sorted.
    pub fn textures(&self) -> &BTreeSet<String> {
        &self.textures
    }

    /// Returns true if the map has no brushes.
    pub fn is_empty(&self) -> bool {
        self.brushes.is_empty()
    }

    /// Total number of planes across all brushes.
    pub fn plane_count(&self) -> usize {
        self.brushes.iter().map(|brush| brush.len()).sum()
    }
}

impl fmt::Display for Map {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            fmt,
            "{} brushes, {} planes, {} textures",
            self.brushes.len(),
            self.plane_count(),
            self.textures.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Plane, Point3};
    use crate::report::Severity;
    use crate::test::*;

    #[test]
    fn room() {
        let mut diagnostics = Vec::new();
        let map = Map::parse(ROOM_MAP, &mut diagnostics);

        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        assert_eq!(
            map.brushes().iter().map(|b| b.len()).collect::<Vec<_>>(),
            [6, 4, 2]
        );
        assert_eq!(
            map.textures().iter().map(String::as_str).collect::<Vec<_>>(),
            ["*water1", "door02_1", "wall", "{grate"]
        );
        assert_eq!(map.plane_count(), 12);
    }

    #[test]
    fn source_order() {
        let map = Map::parse(ROOM_MAP, &mut Vec::new());
        let first = &map.brushes()[0];

        assert_eq!(
            first.iter().map(|p| p.texture.as_str()).collect::<Vec<_>>(),
            ["wall", "wall", "{grate", "wall", "wall", "wall"]
        );
        assert_eq!(first[3].points[0], Point3::new(128.0, 128.0, 16.0));
    }

    #[test]
    fn truncated() {
        let mut diagnostics = Vec::new();
        let map = Map::parse(TRUNCATED_MAP, &mut diagnostics);

        assert_eq!(map.brushes().len(), 1);
        assert_eq!(map.brushes()[0].len(), 2);
        assert!(map.textures().contains("stone"));
    }

    #[test]
    fn malformed() {
        let mut diagnostics = Vec::new();
        let map = Map::parse(MALFORMED_MAP, &mut diagnostics);

        assert_eq!(map.brushes().len(), 1);
        assert_eq!(map.brushes()[0].len(), 2);
        assert_matches!(&diagnostics[..], [d] if d.severity == Severity::Warning);
    }

    #[test]
    fn drops_empty_brushes() {
        let plane = Plane {
            points: [Point3::default(); 3],
            texture: "Wall".into(),
        };
        let map = Map::new(vec![Brush::default(), Brush::new(vec![plane])]);

        assert_eq!(map.brushes().len(), 1);
        assert!(map.textures().contains("wall"));
    }

    #[test]
    fn load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("e1m1.map");
        fs::write(&path, MALFORMED_MAP).unwrap();

        let mut diagnostics = Vec::new();
        let map = Map::load(&path, &mut diagnostics).unwrap();

        assert_eq!(map.brushes().len(), 1);
        assert!(diagnostics.iter().all(|d| d.path.as_deref() == Some(&*path)));
        assert_eq!(diagnostics.last().unwrap().severity, Severity::Info);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.map");

        assert_matches!(
            Map::load(&path, &mut Vec::new()),
            Err(map::Error::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound
        );
    }
}
