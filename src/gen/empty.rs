use std::{fmt, marker::PhantomData};

use super::{violation, Generator, Geometry};
use crate::{
    error::{Operation, Result},
    topology::{Edge, Element, Triangle},
    vertex::{MeshVertex, PathVertex, ShapeVertex, Vertex},
};


/// The generator that never produces anything.
///
/// It is `done()` right after construction and every call to `generate()` or
/// `next()` is a protocol violation. This single type serves vertices, edges
/// and triangles alike.
pub struct Empty<T>(PhantomData<fn() -> T>);

impl<T> Empty<T> {
    pub fn new() -> Self {
        Empty(PhantomData)
    }
}

impl<T> Generator for Empty<T> {
    type Item = T;

    fn done(&self) -> bool {
        true
    }

    fn generate(&self) -> Result<T> {
        Err(violation("empty", Operation::Generate))
    }

    fn next(&mut self) -> Result<()> {
        Err(violation("empty", Operation::Next))
    }

    fn remaining(&self) -> usize {
        0
    }
}

impl<T> Default for Empty<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Empty<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Empty<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Empty")
    }
}


/// The geometry without vertices and without elements.
///
/// This is the identity of concatenation and the result of repeating
/// something zero times.
pub struct EmptyGeometry<V, E>(PhantomData<fn() -> (V, E)>);

pub type EmptyShape = EmptyGeometry<ShapeVertex, Edge>;
pub type EmptyPath = EmptyGeometry<PathVertex, Edge>;
pub type EmptyMesh = EmptyGeometry<MeshVertex, Triangle>;

impl<V, E> EmptyGeometry<V, E> {
    pub fn new() -> Self {
        EmptyGeometry(PhantomData)
    }
}

impl<V: Vertex, E: Element> Geometry for EmptyGeometry<V, E> {
    type Vertex = V;
    type Element = E;
    type Vertices = Empty<V>;
    type Elements = Empty<E>;

    fn vertices(&self) -> Self::Vertices {
        Empty::new()
    }

    fn elements(&self) -> Self::Elements {
        Empty::new()
    }
}

impl<V, E> Default for EmptyGeometry<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> Clone for EmptyGeometry<V, E> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<V, E> fmt::Debug for EmptyGeometry<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("EmptyGeometry")
    }
}
