//! Material descriptors, one per texture.

use crate::emit::KeyValues;

/// The shader every generated material uses.
pub const SHADER: &str = "vr_simple.vfx";

/// Renders a minimal material pointing at `materials/<canonical_id>.<raster_extension>`.
/// Transparent textures also get translucency flags.
pub fn emit(canonical_id: &str, is_transparent: bool, raster_extension: &str) -> String {
    let mut kv = KeyValues::new();

    kv.open_quoted("Material")
        .pair("Shader", SHADER)
        .open_quoted("Parameters")
        .pair(
            "TextureColor",
            format!("materials/{}.{}", canonical_id, raster_extension),
        );
    if is_transparent {
        kv.pair("F_TRANSLUCENT", 1).pair("F_BLEND_MODE", 1);
    }
    kv.close().close();

    let mut text = kv.finish();
    text.push('\n');
    text
}

/// The file name a material is written to.
pub fn file_name(canonical_id: &str) -> String {
    format!("{}.vmat", canonical_id)
}
