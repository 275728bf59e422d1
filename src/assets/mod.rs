//! Texture assets: the fixed palette, mip textures pulled from WAD2 archives, decoded raster
//! images, and the naming rules that turn map texture references into output file names.

pub use miptex::*;
pub use name::*;
pub use palette::*;
pub use raster::*;

mod miptex;
mod name;
mod palette;
mod raster;
