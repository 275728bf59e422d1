use std::ops::Index;

/// A 256-color palette mapping 8-bit texture indices to RGB colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    rgb: [(u8, u8, u8); PALETTE_COLORS],
}

pub const PALETTE_COLORS: usize = 256;

/// Index that becomes see-through in textures whose names start with `{`.
pub const TRANSPARENT_INDEX: u8 = 255;

impl Palette {
    pub const fn from_rgb(rgb: [(u8, u8, u8); PALETTE_COLORS]) -> Self {
        Self { rgb }
    }

    /// The built-in palette every texture in a WAD2 archive is decoded with.
    pub fn quake() -> &'static Palette {
        &QUAKE_PALETTE
    }

    /// Looks up a color.
    pub fn rgb(&self, index: u8) -> [u8; 3] {
        let (r, g, b) = self.rgb[usize::from(index)];
        [r, g, b]
    }

    /// Looks up a color, making it fully transparent if it is `transparent`.
    pub fn rgba(&self, index: u8, transparent: Option<u8>) -> [u8; 4] {
        let [r, g, b] = self.rgb(index);
        let alpha = if transparent == Some(index) { 0 } else { 255 };
        [r, g, b, alpha]
    }
}

impl Index<u8> for Palette {
    type Output = (u8, u8, u8);

    fn index(&self, index: u8) -> &Self::Output {
        &self.rgb[usize::from(index)]
    }
}

#[rustfmt::skip]
static QUAKE_PALETTE: Palette = Palette::from_rgb([
    (0, 0, 0), (15, 15, 15), (31, 31, 31), (47, 47, 47), (63, 63, 63), (75, 75, 75), (91, 91, 91), (107, 107, 107),
    (123, 123, 123), (139, 139, 139), (155, 155, 155), (171, 171, 171), (187, 187, 187), (203, 203, 203), (219, 219, 219), (235, 235, 235),
    (15, 11, 7), (23, 15, 11), (31, 19, 15), (39, 23, 19), (47, 27, 23), (55, 31, 27), (63, 35, 31), (71, 39, 35),
    (79, 43, 39), (87, 47, 43), (95, 51, 47), (103, 55, 51), (111, 59, 55), (119, 63, 59), (127, 67, 63), (135, 71, 67),
    (15, 7, 3), (23, 11, 7), (31, 15, 11), (39, 19, 15), (47, 23, 19), (55, 27, 23), (63, 31, 27), (71, 35, 31),
    (79, 39, 35), (87, 43, 39), (95, 47, 43), (103, 51, 47), (111, 55, 51), (119, 59, 55), (127, 63, 59), (135, 67, 63),
    (15, 15, 3), (23, 23, 7), (31, 31, 11), (39, 39, 15), (47, 47, 19), (55, 55, 23), (63, 63, 27), (71, 71, 31),
    (79, 79, 35), (87, 87, 39), (95, 95, 43), (103, 103, 47), (111, 111, 51), (119, 119, 55), (127, 127, 59), (135, 135, 63),
    (7, 3, 15), (11, 7, 23), (15, 11, 31), (19, 15, 39), (23, 19, 47), (27, 23, 55), (31, 27, 63), (35, 31, 71),
    (39, 35, 79), (43, 39, 87), (47, 43, 95), (51, 47, 103), (55, 51, 111), (59, 55, 119), (63, 59, 127), (67, 63, 135),
    (3, 7, 15), (7, 11, 23), (11, 15, 31), (15, 19, 39), (19, 23, 47), (23, 27, 55), (27, 31, 63), (31, 35, 71),
    (35, 39, 79), (39, 43, 87), (43, 47, 95), (47, 51, 103), (51, 55, 111), (55, 59, 119), (59, 63, 127), (63, 67, 135),
    (3, 15, 15), (7, 23, 23), (11, 31, 31), (15, 39, 39), (19, 47, 47), (23, 55, 55), (27, 63, 63), (31, 71, 71),
    (35, 79, 79), (39, 87, 87), (43, 95, 95), (47, 103, 103), (51, 111, 111), (55, 119, 119), (59, 127, 127), (63, 135, 135),
    (15, 3, 7), (23, 7, 11), (31, 11, 15), (39, 15, 19), (47, 19, 23), (55, 23, 27), (63, 27, 31), (71, 31, 35),
    (79, 35, 39), (87, 39, 43), (95, 43, 47), (103, 47, 51), (111, 51, 55), (119, 55, 59), (127, 59, 63), (135, 63, 67),
    (7, 15, 3), (11, 23, 7), (15, 31, 11), (19, 39, 15), (23, 47, 19), (27, 55, 23), (31, 63, 27), (35, 71, 31),
    (39, 79, 35), (43, 87, 39), (47, 95, 43), (51, 103, 47), (55, 111, 51), (59, 119, 55), (63, 127, 59), (67, 135, 63),
    (15, 7, 7), (23, 11, 11), (31, 15, 15), (39, 19, 19), (47, 23, 23), (55, 27, 27), (63, 31, 31), (71, 35, 35),
    (79, 39, 39), (87, 43, 43), (95, 47, 47), (103, 51, 51), (111, 55, 55), (119, 59, 59), (127, 63, 63), (135, 67, 67),
    (7, 3, 3), (11, 7, 7), (15, 11, 11), (19, 15, 15), (23, 19, 19), (27, 23, 23), (31, 27, 27), (35, 31, 31),
    (39, 35, 35), (43, 39, 39), (47, 43, 43), (51, 47, 47), (55, 51, 51), (59, 55, 55), (63, 59, 59), (67, 63, 63),
    (3, 7, 3), (7, 11, 7), (11, 15, 11), (15, 19, 15), (19, 23, 19), (23, 27, 23), (27, 31, 27), (31, 35, 31),
    (35, 39, 35), (39, 43, 39), (43, 47, 43), (47, 51, 47), (51, 55, 51), (55, 59, 55), (59, 63, 59), (63, 67, 63),
    (7, 3, 7), (11, 7, 11), (15, 11, 15), (19, 15, 19), (23, 19, 23), (27, 23, 27), (31, 27, 31), (35, 31, 35),
    (39, 35, 39), (43, 39, 43), (47, 43, 47), (51, 47, 51), (55, 51, 55), (59, 55, 59), (63, 59, 63), (67, 63, 67),
    (3, 3, 7), (7, 7, 11), (11, 11, 15), (15, 15, 19), (19, 19, 23), (23, 23, 27), (27, 27, 31), (31, 31, 35),
    (35, 35, 39), (39, 39, 43), (43, 43, 47), (47, 47, 51), (51, 51, 55), (55, 55, 59), (59, 59, 63), (63, 63, 67),
    (15, 3, 3), (23, 7, 7), (31, 11, 11), (39, 15, 15), (47, 19, 19), (55, 23, 23), (63, 27, 27), (71, 31, 31),
    (79, 35, 35), (87, 39, 39), (95, 43, 43), (103, 47, 47), (111, 51, 51), (119, 55, 55), (127, 59, 59), (135, 63, 63),
    (63, 0, 0), (71, 0, 0), (79, 0, 0), (87, 0, 0), (95, 0, 0), (103, 0, 0), (111, 0, 0), (119, 0, 0),
    (127, 0, 0), (135, 0, 0), (143, 0, 0), (151, 0, 0), (159, 0, 0), (167, 0, 0), (175, 0, 0), (183, 0, 0),
]);
