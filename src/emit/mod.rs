//! Output formats: `.vmf` block text, `.vmap` XML, and material descriptors.
//!
//! Geometry emitters move every point into target space on the way out. Everything here is a pure
//! function of its input.

pub use keyvalues::*;

pub mod material;
pub mod vmap;
pub mod vmf;
pub mod xml;

mod keyvalues;
