//! Procedural geometry generators.
//!
//! Geometry is described by small parameter records (a [`Knot`][primitives::Knot],
//! a [`Grid`][primitives::Grid], ...) that hand out single pass
//! [`Generator`][gen::Generator]s over their vertices and elements. Those
//! records can be combined: repeated, translated, subdivided and merged.
//! Nothing is stored until a materializer drains the generators into
//! [`Buffers`][materialize::Buffers].
//!
//! ```
//! use cgmath::Vector3;
//! use geogen::prelude::*;
//! use geogen::{combinators::Repeat, materialize::PathBuffers, primitives::Knot};
//!
//! let knots = Repeat::new(Knot::new(2, 3, 64)?, 3, Vector3::new(4.0, 0.0, 0.0))?;
//! let buffers = PathBuffers::from_geometry(&knots)?;
//!
//! assert_eq!(buffers.vertices.len(), 3 * 65);
//! assert_eq!(buffers.elements.len(), 3 * 64);
//! buffers.check_indices()?;
//! # Ok::<(), geogen::Error>(())
//! ```

pub mod combinators;
pub mod error;
pub mod gen;
pub mod io;
pub mod materialize;
pub mod math;
pub mod prelude;
pub mod primitives;
pub mod topology;
pub mod vertex;

pub use self::error::{Error, Operation, Result};
