//! `.vmap` scene XML.

use crate::assets::canonicalize;
use crate::emit::xml::Element;
use crate::map::{Map, Plane};

/// The first line of every `.vmap` document.
pub const HEADER: &str = "<!-- kv3 encoding:text:version{e21c7f3c-8a33-41c5-9977-a76d3a32aa0d} format:vmap:version{1} -->";

/// The `version` attribute on the root element.
pub const VERSION: u32 = 1;

/// Builds the element tree: `map` → `world` → one `solid` per brush → one `side` per plane.
pub fn tree(map: &Map) -> Element {
    let mut world = Element::new("world");

    for (index, brush) in map.brushes().iter().enumerate() {
        if brush.is_empty() {
            continue;
        }
        let mut solid = Element::new("solid").attr("name", format!("brush_{}", index));
        for plane in brush.iter() {
            solid.push(side(plane));
        }
        world.push(solid);
    }

    Element::new("map").attr("version", VERSION).child(world)
}

/// Renders a map as a `.vmap` document: the [`HEADER`] comment line, then the [`tree`].
pub fn emit(map: &Map) -> String {
    format!("{}\n{}", HEADER, tree(map))
}

fn side(plane: &Plane) -> Element {
    let mut geometry = Element::new("plane");
    for (n, point) in plane.target_points().iter().enumerate() {
        geometry = geometry
            .attr(format!("x{}", n + 1), format!("{:.6}", point.x))
            .attr(format!("y{}", n + 1), format!("{:.6}", point.y))
            .attr(format!("z{}", n + 1), format!("{:.6}", point.z));
    }

    let material = Element::new("material").attr("path", material_path(&plane.texture));

    Element::new("side").child(geometry).child(material)
}

/// `materials/<canonical id>.vmat`.
pub fn material_path(texture: &str) -> String {
    format!("materials/{}.vmat", canonicalize(texture))
}
