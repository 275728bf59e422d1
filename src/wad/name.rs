/// Size of a NUL padded lump name, both in directory entries and in texture headers.
pub const NAME_BYTES: usize = 16;

/// Reads a name from a raw 16-byte, NUL padded byte array. Anything after the first NUL is
/// ignored; some tools leave garbage there.
///
/// This function does not check if the name contains only legal ASCII characters. Non-ASCII bytes
/// are treated as Latin-1, where all bytes are valid and map 1-to-1 to the corresponding Unicode
/// codepoints.
pub fn parse_name(raw: &[u8; NAME_BYTES]) -> String {
    let nul_index = raw.iter().position(|&ch| ch == b'\0').unwrap_or(raw.len());
    let raw = &raw[..nul_index];
    raw.iter().copied().map(|b| b as char).collect()
}

/// Pads a name into a raw 16-byte array, truncating anything past 16 bytes.
pub fn encode_name(name: &str) -> [u8; NAME_BYTES] {
    let mut raw = [0u8; NAME_BYTES];
    for (dst, src) in raw.iter_mut().zip(name.bytes()) {
        *dst = src;
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        assert_eq!(parse_name(b"wall\0\0\0\0\0\0\0\0\0\0\0\0"), "wall");
        assert_eq!(parse_name(b"{grate\0junkjunk\0"), "{grate");
        assert_eq!(parse_name(b"sixteen_chars_xx"), "sixteen_chars_xx");
    }

    #[test]
    fn encode() {
        assert_eq!(&encode_name("*water1"), b"*water1\0\0\0\0\0\0\0\0\0");
        assert_eq!(parse_name(&encode_name("much_too_long_a_name")), "much_too_long_a_");
    }
}
