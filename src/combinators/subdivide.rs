use std::{convert::TryFrom, sync::Arc};

use tracing::debug;

use crate::{
    error::{Error, Operation, Result},
    gen::{ensure_active, Generator, Geometry},
    materialize::Buffers,
    topology::Edge,
    vertex::Vertex,
};


/// Splits every edge of a shape or path in half.
///
/// The vertex stream starts with all base vertices, followed by one new
/// vertex per base edge (in edge order) that sits halfway between the edge's
/// end points. Each base edge `(a, b)` with midpoint `m` becomes the two edges
/// `(a, m)` and `(m, b)`.
///
/// The base geometry is materialized once on construction; all generators
/// share that buffer.
#[derive(Debug, Clone)]
pub struct Subdivide<V> {
    base: Arc<Buffers<V, Edge>>,
}

impl<V: Vertex> Subdivide<V> {
    /// Fails if the base geometry violates its own protocol, emits an edge
    /// with an out of range index or if base vertices and midpoints together
    /// exceed 32 bit indices.
    pub fn new<G>(base: &G) -> Result<Self>
    where
        G: Geometry<Vertex = V, Element = Edge>,
    {
        let (vertices, edges) = (base.vertex_count(), base.element_count());
        let fits = vertices.checked_add(edges)
            .map_or(false, |n| n <= u32::max_value() as usize);
        if !fits {
            return Err(Error::invalid(
                "subdivide",
                format!("{} vertices and {} midpoints exceed 32 bit indices", vertices, edges),
            ));
        }

        let buffers = Buffers::from_geometry(base)?;
        buffers.check_indices()?;

        debug!(
            base_vertices = buffers.vertices.len(),
            base_edges = buffers.elements.len(),
            "created subdivide"
        );
        Ok(Self { base: Arc::new(buffers) })
    }
}

impl<V: Vertex> Geometry for Subdivide<V> {
    type Vertex = V;
    type Element = Edge;
    type Vertices = SubdivideVertices<V>;
    type Elements = SubdivideEdges<V>;

    fn vertices(&self) -> Self::Vertices {
        SubdivideVertices { base: self.base.clone(), index: 0 }
    }

    fn elements(&self) -> Self::Elements {
        SubdivideEdges { base: self.base.clone(), index: 0 }
    }

    fn vertex_count(&self) -> usize {
        self.base.vertices.len() + self.base.elements.len()
    }

    fn element_count(&self) -> usize {
        2 * self.base.elements.len()
    }
}

/// Vertex generator of [`Subdivide`].
#[derive(Debug, Clone)]
pub struct SubdivideVertices<V> {
    base: Arc<Buffers<V, Edge>>,
    index: usize,
}

impl<V: Vertex> Generator for SubdivideVertices<V> {
    type Item = V;

    fn done(&self) -> bool {
        self.index >= self.base.vertices.len() + self.base.elements.len()
    }

    fn generate(&self) -> Result<V> {
        ensure_active(self.done(), "subdivide", Operation::Generate)?;

        let vertices = &self.base.vertices;
        match vertices.get(self.index) {
            Some(v) => Ok(*v),
            None => {
                let [a, b] = self.base.elements[self.index - vertices.len()].vertices;
                Ok(vertices[a as usize].midpoint(&vertices[b as usize]))
            }
        }
    }

    fn next(&mut self) -> Result<()> {
        ensure_active(self.done(), "subdivide", Operation::Next)?;
        self.index += 1;
        Ok(())
    }

    fn remaining(&self) -> usize {
        self.base.vertices.len() + self.base.elements.len() - self.index
    }
}

/// Edge generator of [`Subdivide`].
#[derive(Debug, Clone)]
pub struct SubdivideEdges<V> {
    base: Arc<Buffers<V, Edge>>,
    index: usize,
}

impl<V: Vertex> Generator for SubdivideEdges<V> {
    type Item = Edge;

    fn done(&self) -> bool {
        self.index >= 2 * self.base.elements.len()
    }

    fn generate(&self) -> Result<Edge> {
        ensure_active(self.done(), "subdivide", Operation::Generate)?;

        let edge = self.index / 2;
        let [a, b] = self.base.elements[edge].vertices;
        let mid = u32::try_from(self.base.vertices.len() + edge)
            .map_err(|_| Error::invalid("subdivide", "midpoint index exceeds 32 bit"))?;

        if self.index % 2 == 0 {
            Ok(Edge::new(a, mid))
        } else {
            Ok(Edge::new(mid, b))
        }
    }

    fn next(&mut self) -> Result<()> {
        ensure_active(self.done(), "subdivide", Operation::Next)?;
        self.index += 1;
        Ok(())
    }

    fn remaining(&self) -> usize {
        2 * self.base.elements.len() - self.index
    }
}
