use std::fmt;

/// Texture names starting with this character have a see-through palette index.
pub const TRANSPARENT_MARKER: char = '{';

/// Texture names starting with this character are animated liquids. The marker is dropped from
/// canonical ids.
pub const ANIMATED_MARKER: char = '*';

/// What a raw texture reference from a map means for the converted assets.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureName {
    is_transparent: bool,
    canonical_id: String,
}

impl TextureName {
    /// Classifies a raw texture reference such as `{grate1` or `*WATER1`.
    pub fn classify(raw: &str) -> Self {
        Self {
            is_transparent: raw.starts_with(TRANSPARENT_MARKER),
            canonical_id: canonicalize(raw),
        }
    }

    /// Whether the texture has a transparent palette index.
    pub fn is_transparent(&self) -> bool {
        self.is_transparent
    }

    /// The lowercase, filesystem-safe id used to name the texture's output files.
    pub fn canonical_id(&self) -> &str {
        &self.canonical_id
    }
}

impl fmt::Display for TextureName {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.canonical_id)
    }
}

/// Drops one leading [`ANIMATED_MARKER`], lowercases, and replaces everything outside
/// `[a-z0-9_]` with `_`. Idempotent.
pub fn canonicalize(raw: &str) -> String {
    let raw = raw.strip_prefix(ANIMATED_MARKER).unwrap_or(raw);

    raw.chars()
        .flat_map(char::to_lowercase)
        .map(|ch| match ch {
            'a'..='z' | '0'..='9' | '_' => ch,
            _ => '_',
        })
        .collect()
}
