//! Geometries composed from other geometries.
//!
//! All combinators keep the index contract: elements they emit always refer
//! to the vertex stream of the combinator itself, never to the stream of one
//! of their parts.

mod merge;
mod repeat;
mod subdivide;
mod translate;

pub use self::{
    merge::{Merge, MergeElements, MergeVertices},
    repeat::{Repeat, RepeatElements, RepeatVertices},
    subdivide::{Subdivide, SubdivideEdges, SubdivideVertices},
    translate::{Translate, TranslateVertices},
};
