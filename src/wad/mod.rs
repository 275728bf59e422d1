//! Read Quake WAD2 texture archives and pull lumps out of them.
//!
//! # Examples
//!
//! Look up a texture in a list of archives, most important first:
//!
//! ```no_run
//! use qmap_convert::report::TracingReporter;
//! use qmap_convert::wad::WadStack;
//!
//! let mut reporter = TracingReporter;
//! let wads = WadStack::open(["mymod.wad", "id1/gfx.wad"], &mut reporter);
//! let size = wads.lookup("{grate1", |lump| Ok(lump.size()), &mut reporter);
//! ```

pub use cursor::*;
pub use error::*;
pub use file::*;
pub use lump::*;
pub use name::*;
pub use stack::*;

mod cursor;
mod error;
mod file;
mod lump;
mod name;
mod stack;
