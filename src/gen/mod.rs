//! The generator protocol and the geometry abstraction built on top of it.
//!
//! A [`Generator`] is a single pass cursor over one stream of elements. It
//! is driven with three operations:
//!
//! - `done()` tells whether elements remain,
//! - `generate()` peeks at the current element without advancing,
//! - `next()` advances to the following element.
//!
//! Calling `generate()` or `next()` once `done()` returned `true` is a bug in
//! the calling code and results in [`Error::ProtocolViolation`]. A generator
//! is never reset: to start over, ask the [`Geometry`] for a fresh one.
//!
//! ```
//! use geogen::prelude::*;
//! use geogen::primitives::LinePath;
//! use cgmath::Point3;
//!
//! let line = LinePath::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), 4)?;
//!
//! let mut vertices = line.vertices();
//! let mut count = 0;
//! while !vertices.done() {
//!     let _v = vertices.generate()?;
//!     vertices.next()?;
//!     count += 1;
//! }
//! assert_eq!(count, 5);
//! assert!(vertices.generate().is_err());
//! # Ok::<(), geogen::Error>(())
//! ```

use std::fmt;

use tracing::warn;

use crate::{
    error::{Error, Operation, Result},
    topology::{Edge, Element, Triangle},
    vertex::{MeshVertex, PathVertex, ShapeVertex, Vertex},
};

mod empty;

pub use self::empty::{Empty, EmptyGeometry, EmptyMesh, EmptyPath, EmptyShape};


/// A stateful, single pass pull producer of `Item`s.
pub trait Generator {
    type Item;

    /// Returns `true` once no further elements remain.
    fn done(&self) -> bool;

    /// Returns the current element without advancing. Calling this twice
    /// without an intervening `next()` returns identical values.
    fn generate(&self) -> Result<Self::Item>;

    /// Advances to the following element.
    fn next(&mut self) -> Result<()>;

    /// The exact number of elements not yet consumed (including the current
    /// one).
    fn remaining(&self) -> usize;

    /// Turns this generator into a standard iterator that drains it.
    fn drain(self) -> Drain<Self>
    where
        Self: Sized,
    {
        Drain { inner: self }
    }

    /// Erases the concrete type of this generator.
    fn boxed(self) -> AnyGenerator<Self::Item>
    where
        Self: Sized + Send + 'static,
    {
        AnyGenerator(Box::new(self))
    }
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    type Item = G::Item;

    fn done(&self) -> bool {
        (**self).done()
    }
    fn generate(&self) -> Result<Self::Item> {
        (**self).generate()
    }
    fn next(&mut self) -> Result<()> {
        (**self).next()
    }
    fn remaining(&self) -> usize {
        (**self).remaining()
    }
}

/// Checks the precondition of `generate()` and `next()`.
///
/// Every generator calls this first thing in both methods.
pub(crate) fn ensure_active(done: bool, generator: &'static str, operation: Operation) -> Result<()> {
    if done {
        Err(violation(generator, operation))
    } else {
        Ok(())
    }
}

pub(crate) fn violation(generator: &'static str, operation: Operation) -> Error {
    warn!(generator, %operation, "generator protocol violated");
    Error::ProtocolViolation { generator, operation }
}

/// Iterator adapter returned by [`Generator::drain`].
///
/// The adapter only calls `generate()` and `next()` after checking `done()`.
///
/// # Panics
///
/// The iterator panics if the wrapped generator fails although it is not
/// `done()`, as that generator breaks its own contract. To get such errors
/// as values, drain with [`Buffers::materialize`][crate::materialize::Buffers::materialize]
/// instead.
#[derive(Debug)]
pub struct Drain<G> {
    inner: G,
}

impl<G: Generator> Iterator for Drain<G> {
    type Item = G::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.inner.done() {
            return None;
        }

        let item = self.inner.generate()
            .unwrap_or_else(|e| panic!("generator failed although not done: {}", e));
        if let Err(e) = self.inner.next() {
            panic!("generator failed although not done: {}", e);
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.inner.remaining();
        (remaining, Some(remaining))
    }
}

impl<G: Generator> ExactSizeIterator for Drain<G> {}


/// A boxed generator of `T`s with its concrete type erased.
///
/// The default value is the empty generator.
pub struct AnyGenerator<T>(Box<dyn Generator<Item = T> + Send>);

impl<T> Generator for AnyGenerator<T> {
    type Item = T;

    fn done(&self) -> bool {
        self.0.done()
    }
    fn generate(&self) -> Result<T> {
        self.0.generate()
    }
    fn next(&mut self) -> Result<()> {
        self.0.next()
    }
    fn remaining(&self) -> usize {
        self.0.remaining()
    }

    fn boxed(self) -> AnyGenerator<T> {
        self
    }
}

impl<T: 'static> Default for AnyGenerator<T> {
    fn default() -> Self {
        Empty::new().boxed()
    }
}

impl<T> fmt::Debug for AnyGenerator<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AnyGenerator")
            .field("remaining", &self.remaining())
            .finish()
    }
}


// ===========================================================================
// ===== Geometry
// ===========================================================================

/// An immutable description of some geometry that can hand out fresh
/// generators over its vertices and its elements (edges or triangles).
///
/// The lengths of both streams are fully determined by the geometry's
/// parameters. Indices in the element stream refer to the vertex stream of
/// the same geometry, in the order the vertices are generated.
pub trait Geometry {
    type Vertex: Vertex;
    type Element: Element;
    type Vertices: Generator<Item = Self::Vertex>;
    type Elements: Generator<Item = Self::Element>;

    /// Returns a new generator over all vertices.
    fn vertices(&self) -> Self::Vertices;

    /// Returns a new generator over all edges or triangles.
    fn elements(&self) -> Self::Elements;

    fn vertex_count(&self) -> usize {
        self.vertices().remaining()
    }

    fn element_count(&self) -> usize {
        self.elements().remaining()
    }

    /// Erases the concrete type of this geometry so that it can be stored in
    /// a list with geometries of other types.
    fn into_any(self) -> AnyGeometry<Self::Vertex, Self::Element>
    where
        Self: Sized + Clone + Send + Sync + 'static,
        Self::Vertices: Send + 'static,
        Self::Elements: Send + 'static,
    {
        AnyGeometry::new(self)
    }
}

/// A 2D outline made of edges.
pub trait Shape: Geometry<Vertex = ShapeVertex, Element = Edge> {
    fn edges(&self) -> Self::Elements {
        self.elements()
    }
}

impl<G: Geometry<Vertex = ShapeVertex, Element = Edge>> Shape for G {}

/// A 3D path made of edges.
pub trait Path: Geometry<Vertex = PathVertex, Element = Edge> {
    fn edges(&self) -> Self::Elements {
        self.elements()
    }
}

impl<G: Geometry<Vertex = PathVertex, Element = Edge>> Path for G {}

/// A triangle mesh.
pub trait Mesh: Geometry<Vertex = MeshVertex, Element = Triangle> {
    fn triangles(&self) -> Self::Elements {
        self.elements()
    }
}

impl<G: Geometry<Vertex = MeshVertex, Element = Triangle>> Mesh for G {}


/// Object safe counterpart of [`Geometry`], used by [`AnyGeometry`].
trait DynGeometry<V, E>: Send + Sync {
    fn dyn_vertices(&self) -> AnyGenerator<V>;
    fn dyn_elements(&self) -> AnyGenerator<E>;
    fn dyn_vertex_count(&self) -> usize;
    fn dyn_element_count(&self) -> usize;
    fn clone_box(&self) -> Box<dyn DynGeometry<V, E>>;
}

impl<G> DynGeometry<G::Vertex, G::Element> for G
where
    G: Geometry + Clone + Send + Sync + 'static,
    G::Vertices: Send + 'static,
    G::Elements: Send + 'static,
{
    fn dyn_vertices(&self) -> AnyGenerator<G::Vertex> {
        self.vertices().boxed()
    }
    fn dyn_elements(&self) -> AnyGenerator<G::Element> {
        self.elements().boxed()
    }
    fn dyn_vertex_count(&self) -> usize {
        self.vertex_count()
    }
    fn dyn_element_count(&self) -> usize {
        self.element_count()
    }
    fn clone_box(&self) -> Box<dyn DynGeometry<G::Vertex, G::Element>> {
        Box::new(self.clone())
    }
}

/// A geometry with its concrete type erased.
///
/// This is what allows combinators like [`Merge`][crate::combinators::Merge]
/// to hold parts of different types. The default value is the empty
/// geometry.
pub struct AnyGeometry<V, E> {
    inner: Box<dyn DynGeometry<V, E>>,
}

impl<V: Vertex, E: Element> AnyGeometry<V, E> {
    pub fn new<G>(geometry: G) -> Self
    where
        G: Geometry<Vertex = V, Element = E> + Clone + Send + Sync + 'static,
        G::Vertices: Send + 'static,
        G::Elements: Send + 'static,
    {
        Self { inner: Box::new(geometry) }
    }

    /// The geometry that produces nothing.
    pub fn empty() -> Self {
        Self::new(EmptyGeometry::new())
    }
}

impl<V: Vertex, E: Element> Geometry for AnyGeometry<V, E> {
    type Vertex = V;
    type Element = E;
    type Vertices = AnyGenerator<V>;
    type Elements = AnyGenerator<E>;

    fn vertices(&self) -> Self::Vertices {
        self.inner.dyn_vertices()
    }
    fn elements(&self) -> Self::Elements {
        self.inner.dyn_elements()
    }
    fn vertex_count(&self) -> usize {
        self.inner.dyn_vertex_count()
    }
    fn element_count(&self) -> usize {
        self.inner.dyn_element_count()
    }

    fn into_any(self) -> AnyGeometry<V, E> {
        self
    }
}

impl<V, E> Clone for AnyGeometry<V, E> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone_box() }
    }
}

impl<V: Vertex, E: Element> Default for AnyGeometry<V, E> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<V, E> fmt::Debug for AnyGeometry<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AnyGeometry")
            .field("vertex_count", &self.inner.dyn_vertex_count())
            .field("element_count", &self.inner.dyn_element_count())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use cgmath::Point3;

    use crate::primitives::LinePath;
    use super::*;

    fn line() -> LinePath {
        LinePath::new(Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 0.0, 0.0), 3).unwrap()
    }

    #[test]
    fn drain_is_exact_size() {
        let mut it = line().vertices().drain();
        assert_eq!(it.len(), 4);
        it.next();
        assert_eq!(it.len(), 3);
        assert_eq!(it.count(), 3);
    }

    /// Claims to have elements but refuses to produce them.
    struct Broken;

    impl Generator for Broken {
        type Item = u32;

        fn done(&self) -> bool {
            false
        }
        fn generate(&self) -> Result<u32> {
            Err(violation("broken", Operation::Generate))
        }
        fn next(&mut self) -> Result<()> {
            Err(violation("broken", Operation::Next))
        }
        fn remaining(&self) -> usize {
            3
        }
    }

    #[test]
    #[should_panic(expected = "generator failed although not done")]
    fn drain_does_not_hide_errors() {
        let _ = Broken.drain().collect::<Vec<_>>();
    }

    #[test]
    fn materialize_reports_errors() {
        use crate::materialize::Buffers;

        let err = Buffers::<PathVertex, u32>::materialize(line().vertices(), Broken).unwrap_err();
        assert!(err.is_protocol_violation());
    }

    #[test]
    fn remaining_tracks_progress() {
        let mut edges = line().elements();
        for expected in (1..=3).rev() {
            assert_eq!(edges.remaining(), expected);
            edges.next().unwrap();
        }
        assert_eq!(edges.remaining(), 0);
        assert!(edges.done());
    }

    #[test]
    fn boxed_generator_keeps_protocol() {
        let mut edges = line().elements().boxed();
        assert_eq!(edges.generate().unwrap(), Edge::new(0, 1));
        while !edges.done() {
            edges.next().unwrap();
        }

        let err = edges.next().unwrap_err();
        assert!(err.is_protocol_violation());
    }

    #[test]
    fn default_any_generator_is_empty() {
        let g = AnyGenerator::<Edge>::default();
        assert!(g.done());
        assert_eq!(g.remaining(), 0);
        assert!(g.generate().unwrap_err().is_protocol_violation());
    }

    #[test]
    fn any_geometry_delegates() {
        let any = line().into_any();
        assert_eq!(any.vertex_count(), 4);
        assert_eq!(any.element_count(), 3);

        let copy = any.clone();
        assert_eq!(copy.vertices().drain().collect::<Vec<_>>(), line().vertices().drain().collect::<Vec<_>>());
    }

    #[test]
    fn default_any_geometry_is_empty() {
        let any = AnyGeometry::<PathVertex, Edge>::default();
        assert_eq!(any.vertex_count(), 0);
        assert!(any.elements().done());
    }
}
