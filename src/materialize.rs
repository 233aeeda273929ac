//! Draining generators into plain buffers.

use tracing::debug;

use crate::{
    error::{Error, Result},
    gen::{Generator, Geometry},
    topology::{Edge, Element, Triangle},
    vertex::{MeshVertex, PathVertex, ShapeVertex},
};


/// The complete geometry of one generator pair: all vertices and all
/// elements in generation order.
///
/// Indices in `elements` refer to positions in `vertices`.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffers<V, E> {
    pub vertices: Vec<V>,
    pub elements: Vec<E>,
}

pub type ShapeBuffers = Buffers<ShapeVertex, Edge>;
pub type PathBuffers = Buffers<PathVertex, Edge>;
pub type MeshBuffers = Buffers<MeshVertex, Triangle>;

impl<V, E> Buffers<V, E> {
    /// Drains both generators in protocol order: check `done()`, read with
    /// `generate()`, advance with `next()`.
    pub fn materialize<VG, EG>(vertices: VG, elements: EG) -> Result<Self>
    where
        VG: Generator<Item = V>,
        EG: Generator<Item = E>,
    {
        let out = Self {
            vertices: pump(vertices)?,
            elements: pump(elements)?,
        };

        debug!(
            vertices = out.vertices.len(),
            elements = out.elements.len(),
            "materialized geometry"
        );
        Ok(out)
    }

    /// Materializes fresh generators of `geometry`.
    pub fn from_geometry<G>(geometry: &G) -> Result<Self>
    where
        G: Geometry<Vertex = V, Element = E>,
    {
        Self::materialize(geometry.vertices(), geometry.elements())
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.elements.is_empty()
    }
}

impl<V, E: Element> Buffers<V, E> {
    /// Makes sure that every element only references existing vertices.
    pub fn check_indices(&self) -> Result<()> {
        let vertex_count = self.vertices.len();
        let bad = self.elements.iter()
            .flat_map(|e| e.indices().iter().cloned())
            .find(|&index| index as usize >= vertex_count);

        match bad {
            Some(index) => Err(Error::IndexOutOfRange { index, vertex_count }),
            None => Ok(()),
        }
    }
}

impl<V, E> Default for Buffers<V, E> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            elements: Vec::new(),
        }
    }
}

fn pump<G: Generator>(mut gen: G) -> Result<Vec<G::Item>> {
    let mut out = Vec::with_capacity(gen.remaining());
    while !gen.done() {
        out.push(gen.generate()?);
        gen.next()?;
    }

    Ok(out)
}
