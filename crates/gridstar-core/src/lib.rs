//! **gridstar-core**: geometry shared by the gridstar crates.
//!
//! Cells are addressed by integer [`Point`]s; a grid's extent is a
//! half-open [`Range`].

pub mod geom;

pub use geom::{Point, Range};
