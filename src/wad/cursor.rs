use std::convert::TryInto;

use bytes::{Buf, Bytes};

use crate::wad::{self, parse_name, Lump, NAME_BYTES};

/// Reads little-endian fields from the front of a lump. Running out of data is an error that
/// names the lump and the field, never a panic.
pub struct Cursor<'lump> {
    lump: &'lump Lump<'lump>,
    data: Bytes,
}

impl<'lump> Cursor<'lump> {
    pub(super) fn new(lump: &'lump Lump<'lump>, data: Bytes) -> Self {
        Self { lump, data }
    }

    /// Bytes not read yet.
    pub fn remaining(&self) -> usize {
        self.data.remaining()
    }

    /// Fails with `desc` unless at least `size` bytes remain.
    pub fn need_or(&self, size: usize, desc: &str) -> wad::Result<()> {
        if self.remaining() >= size {
            Ok(())
        } else {
            Err(self.lump.error(desc))
        }
    }

    /// Reads a `u32`. `field` names it in the error if the data runs out.
    pub fn u32(&mut self, field: &str) -> wad::Result<u32> {
        self.need_or(4, &format!("truncated {}", field))?;
        Ok(self.data.get_u32_le())
    }

    /// Reads a 16-byte, NUL padded name.
    pub fn name(&mut self, field: &str) -> wad::Result<String> {
        self.need_or(NAME_BYTES, &format!("truncated {}", field))?;
        let raw = self.data.split_to(NAME_BYTES);
        let raw: &[u8; NAME_BYTES] = raw
            .as_ref()
            .try_into()
            .map_err(|_| self.lump.error(&format!("truncated {}", field)))?;
        Ok(parse_name(raw))
    }
}
