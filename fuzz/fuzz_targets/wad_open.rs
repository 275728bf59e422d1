#![no_main]
use libfuzzer_sys::fuzz_target;

extern crate qmap_convert;

use std::io::Write;

use tempfile::NamedTempFile;

use qmap_convert::assets::{MipTexture, Palette};
use qmap_convert::wad::WadFile;

fuzz_target!(|data: &[u8]| {
    let mut file = match NamedTempFile::new() {
        Ok(file) => file,
        Err(err) => {
            dbg!(err);
            return;
        }
    };

    match file.as_file_mut().write_all(data) {
        Ok(()) => {}
        Err(err) => {
            dbg!(err);
            return;
        }
    }

    let wad = match WadFile::open(file.path()) {
        Ok(wad) => wad,
        Err(err) => {
            dbg!(err);
            return;
        }
    };

    for entry in wad.entries() {
        let lump = match wad.lump(entry.name()) {
            Ok(lump) => lump,
            Err(_) => continue,
        };
        if let Ok(texture) = MipTexture::load(&lump) {
            let _ = texture.decode(Palette::quake(), true).to_rgba();
        }
    }
});
