//! Converts Quake `.map` brush geometry and WAD2 textures into Hammer `.vmf` and `.vmap` scenes
//! plus material descriptors.

pub mod assets;
pub mod config;
pub mod convert;
pub mod emit;
pub mod error;
pub mod map;
pub mod report;
pub mod wad;

pub use error::{Error, ErrorKind, Result};


#[cfg(test)]
#[macro_use]
extern crate assert_matches;

#[macro_use]
extern crate lazy_static;
