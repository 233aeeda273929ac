//! Reexports of all important traits of this library for convenience.
//!
//! As with every prelude, the main usage is to glob import everything from
//! this module:
//!
//! ```
//! use geogen::prelude::*;
//! ```
//!
//! Now you have all important traits in scope.

pub use crate::{
    gen::{Generator, Geometry, Mesh, Path, Shape},
    io::GeometryWriter,
    primitives::Parametric,
    topology::Element,
    vertex::Vertex,
};
