//! Hammer `.vmf` block text.

use crate::emit::KeyValues;
use crate::map::{Map, Plane};

/// The world block's id. Solids and sides are numbered after it.
pub const WORLD_ID: u32 = 1;

/// Texture axes and scale written on every side. Texture alignment isn't converted.
const U_AXIS: &str = "[1 0 0 0] 0.0625";
const V_AXIS: &str = "[0 1 0 0] 0.0625";

/// Renders a map as a `.vmf` document: a `versioninfo` block, the `world` with one `solid` per
/// brush and one `side` per plane, a player start, and an empty `hidden` block.
///
/// Ids count up from 2 in the order blocks are written, one per solid and one per side.
pub fn emit(map: &Map) -> String {
    let mut kv = KeyValues::new();
    let mut ids = IdAllocator(WORLD_ID + 1);

    kv.open("versioninfo")
        .pair("mapversion", 1)
        .pair("editorversion", 400)
        .pair("editorbuild", 8000)
        .pair("formatversion", 1)
        .pair("prefab", 0)
        .close();

    kv.open("world")
        .pair("id", WORLD_ID)
        .pair("mapversion", 1)
        .pair("classname", "worldspawn");

    for brush in map.brushes().iter().filter(|brush| !brush.is_empty()) {
        kv.open("solid").pair("id", ids.next());
        for plane in brush.iter() {
            side(&mut kv, plane, ids.next());
        }
        editor(&mut kv, "255 0 0", false);
        kv.close();
    }

    editor(&mut kv, "255 0 0", true);
    kv.close();

    kv.open("entity")
        .pair("id", ids.next())
        .pair("classname", "info_player_start")
        .pair("origin", "0 0 64")
        .pair("angles", "0 0 0");
    editor(&mut kv, "255 255 0", true);
    kv.close();

    kv.open("hidden").close();

    kv.finish()
}

/// Hands out ids in increasing order.
struct IdAllocator(u32);

impl IdAllocator {
    fn next(&mut self) -> u32 {
        let id = self.0;
        self.0 += 1;
        id
    }
}

fn side(kv: &mut KeyValues, plane: &Plane, id: u32) {
    let [p1, p2, p3] = plane.target_points();

    kv.open("side")
        .pair("id", id)
        .pair("plane", format!("{} {} {}", p1, p2, p3))
        .pair("material", plane.texture.to_uppercase())
        .pair("uaxis", U_AXIS)
        .pair("vaxis", V_AXIS)
        .pair("rotation", 0)
        .pair("lightmapscale", 16)
        .pair("smoothing_groups", 0)
        .close();
}

fn editor(kv: &mut KeyValues, color: &str, logical_pos: bool) {
    kv.open("editor")
        .pair("color", color)
        .pair("visgroupshown", 1)
        .pair("visgroupautoshown", 1);
    if logical_pos {
        kv.pair("logicalpos", "[0 0]");
    }
    kv.close();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Brush, Point3};
    use crate::test::*;

    fn ids(vmf: &str) -> Vec<u32> {
        vmf.lines()
            .filter_map(|line| line.trim().strip_prefix("\"id\" \""))
            .map(|rest| rest.trim_end_matches('"').parse().unwrap())
            .collect()
    }

    fn box_brush(planes: usize) -> Brush {
        Brush::new(
            (0..planes)
                .map(|i| Plane {
                    points: [
                        Point3::new(i as f64, 0.0, 0.0),
                        Point3::new(0.0, 1.0, 0.0),
                        Point3::new(0.0, 0.0, 1.0),
                    ],
                    texture: "wall".into(),
                })
                .collect(),
        )
    }

    #[test]
    fn id_allocation() {
        let map = Map::new(vec![box_brush(4), box_brush(6)]);
        let ids = ids(&emit(&map));

        // World, 2 solids + 10 sides, then the player start.
        assert_eq!(ids.len(), 1 + 12 + 1);
        assert_eq!(ids[0], WORLD_ID);
        assert_eq!(ids[1..13], (2..14).collect::<Vec<u32>>()[..]);
        assert_eq!(ids[13], 14);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn side_block() {
        let map = Map::parse(ROOM_MAP, &mut Vec::new());
        let vmf = emit(&map);

        assert!(vmf.contains(
            "\n        side\n        {\n            \"id\" \"3\"\n            \"plane\" \"(-96.000000 0.000000 96.000000) (-96.000000 0.000000 95.250000) (-96.000000 0.750000 96.000000)\"\n            \"material\" \"WALL\"\n"
        ), "{}", vmf);
        assert!(vmf.contains("\"material\" \"{GRATE\""));
        assert!(vmf.contains("\"material\" \"*WATER1\""));
        assert!(vmf.contains("\"uaxis\" \"[1 0 0 0] 0.0625\""));
        assert!(vmf.contains("\"lightmapscale\" \"16\""));
    }

    #[test]
    fn layout() {
        let vmf = emit(&Map::default());

        assert!(vmf.starts_with("versioninfo\n{\n    \"mapversion\" \"1\"\n"));
        assert!(vmf.contains("world\n{\n    \"id\" \"1\"\n    \"mapversion\" \"1\"\n    \"classname\" \"worldspawn\"\n    editor\n"));
        assert!(vmf.contains("    \"origin\" \"0 0 64\"\n"));
        assert!(vmf.ends_with("}\nhidden\n{\n}"));
        assert_eq!(ids(&vmf), [1, 2]);
        assert_eq!(vmf.matches('{').count(), vmf.matches('}').count());
    }

    #[test]
    fn solid_count() {
        let map = Map::parse(ROOM_MAP, &mut Vec::new());
        let vmf = emit(&map);

        assert_eq!(vmf.matches("\n    solid\n").count(), 3);
        assert_eq!(vmf.matches("\n        side\n").count(), 12);
    }
}
