//! Quake `.map` files.
//!
//! A map is a list of entities, and some entities carry brushes: convex solids bounded by planes.
//! Only the brushes are kept. Entity properties and point entities are skipped.
//!
//! ```text
//! {
//! "classname" "worldspawn"
//! {
//! ( -128 -128 0 ) ( -128 -127 0 ) ( -128 -128 1 ) WALL 0 0 0 1 1
//! ...
//! }
//! }
//! ```

pub use error::*;
pub use geom::*;
#[allow(clippy::module_inception)]
pub use map::*;
pub use parser::*;

mod error;
mod geom;
mod map;
mod parser;
