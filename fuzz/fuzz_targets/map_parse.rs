#![no_main]
use libfuzzer_sys::fuzz_target;

extern crate qmap_convert;

use qmap_convert::emit::{vmap, vmf};
use qmap_convert::map::Map;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let map = Map::parse(&text, &mut Vec::new());
    let _ = vmf::emit(&map);
    let _ = vmap::emit(&map);
});
