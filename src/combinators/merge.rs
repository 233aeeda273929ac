use std::convert::TryFrom;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    error::{Error, Operation, Result},
    gen::{ensure_active, AnyGenerator, AnyGeometry, Generator, Geometry},
    topology::Element,
    vertex::Vertex,
};


/// The concatenation of several geometries of the same kind.
///
/// Vertices of part `k` follow all vertices of the parts before it, so the
/// indices of its elements are offset by the total vertex count of parts
/// `0..k`. Parts without vertices or elements are skipped. A merge without
/// parts is the empty geometry.
///
/// Parts are stored type erased, so a merge can hold a line next to a
/// repeated knot.
#[derive(Debug, Clone)]
pub struct Merge<V, E> {
    parts: SmallVec<[AnyGeometry<V, E>; 2]>,

    /// Index of the first vertex of each part.
    offsets: SmallVec<[u32; 2]>,
    vertex_count: u32,
}

impl<V: Vertex, E: Element> Merge<V, E> {
    /// A merge without any parts.
    pub fn new() -> Self {
        Self {
            parts: SmallVec::new(),
            offsets: SmallVec::new(),
            vertex_count: 0,
        }
    }

    /// Merges all given parts in order.
    pub fn from_parts<I>(parts: I) -> Result<Self>
    where
        I: IntoIterator<Item = AnyGeometry<V, E>>,
    {
        let mut out = Self::new();
        for part in parts {
            out.push(part)?;
        }
        Ok(out)
    }

    /// Appends a part. Fails if the merged geometry would have more vertices
    /// than 32 bit indices can address.
    pub fn push<G>(&mut self, part: G) -> Result<()>
    where
        G: Geometry<Vertex = V, Element = E> + Clone + Send + Sync + 'static,
        G::Vertices: Send + 'static,
        G::Elements: Send + 'static,
    {
        let part = part.into_any();
        let vertices = part.vertex_count();
        let total = self.vertex_count;
        let added = u32::try_from(vertices)
            .ok()
            .filter(|&n| total.checked_add(n).is_some())
            .ok_or_else(|| Error::invalid(
                "merge",
                format!("{} + {} vertices exceed 32 bit indices", total, vertices),
            ))?;

        self.append(part, added);
        Ok(())
    }

    /// Builder style version of [`push`][Merge::push].
    pub fn with<G>(mut self, part: G) -> Result<Self>
    where
        G: Geometry<Vertex = V, Element = E> + Clone + Send + Sync + 'static,
        G::Vertices: Send + 'static,
        G::Elements: Send + 'static,
    {
        self.push(part)?;
        Ok(self)
    }

    /// Callers guarantee that `vertices` is the vertex count of `part` and
    /// that the new total fits into `u32`.
    pub(crate) fn push_unchecked(&mut self, part: AnyGeometry<V, E>, vertices: u32) {
        self.append(part, vertices);
    }

    fn append(&mut self, part: AnyGeometry<V, E>, vertices: u32) {
        debug!(
            part = self.parts.len(),
            vertices,
            elements = part.element_count(),
            "added part to merge"
        );
        self.offsets.push(self.vertex_count);
        self.vertex_count += vertices;
        self.parts.push(part);
    }

    pub fn parts(&self) -> &[AnyGeometry<V, E>] {
        &self.parts
    }
}

impl<V: Vertex, E: Element> Default for Merge<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex, E: Element> Geometry for Merge<V, E> {
    type Vertex = V;
    type Element = E;
    type Vertices = MergeVertices<V>;
    type Elements = MergeElements<E>;

    fn vertices(&self) -> Self::Vertices {
        MergeVertices {
            parts: Parts::new(self.parts.iter().map(|p| p.vertices()).collect()),
        }
    }

    fn elements(&self) -> Self::Elements {
        MergeElements {
            parts: Parts::new(self.parts.iter().map(|p| p.elements()).collect()),
            offsets: self.offsets.clone(),
        }
    }

    fn vertex_count(&self) -> usize {
        self.vertex_count as usize
    }

    fn element_count(&self) -> usize {
        self.parts.iter().map(|p| p.element_count()).sum()
    }
}


/// The generators of all parts and the index of the one currently active.
#[derive(Debug)]
struct Parts<T> {
    generators: SmallVec<[AnyGenerator<T>; 2]>,
    active: usize,
}

impl<T> Parts<T> {
    fn new(generators: SmallVec<[AnyGenerator<T>; 2]>) -> Self {
        let mut out = Self { generators, active: 0 };
        out.skip_exhausted();
        out
    }

    fn skip_exhausted(&mut self) {
        let before = self.active;
        while self.active < self.generators.len() && self.generators[self.active].done() {
            self.active += 1;
        }

        if self.active != before {
            trace!(from = before, to = self.active, "merge switched part");
        }
    }

    fn done(&self) -> bool {
        self.active >= self.generators.len()
    }

    fn generate(&self) -> Result<T> {
        ensure_active(self.done(), "merge", Operation::Generate)?;
        self.generators[self.active].generate()
    }

    fn next(&mut self) -> Result<()> {
        ensure_active(self.done(), "merge", Operation::Next)?;
        self.generators[self.active].next()?;
        self.skip_exhausted();
        Ok(())
    }

    fn remaining(&self) -> usize {
        self.generators.iter().skip(self.active).map(|g| g.remaining()).sum()
    }
}


/// Vertex generator of [`Merge`].
#[derive(Debug)]
pub struct MergeVertices<V> {
    parts: Parts<V>,
}

impl<V> Generator for MergeVertices<V> {
    type Item = V;

    fn done(&self) -> bool {
        self.parts.done()
    }

    fn generate(&self) -> Result<V> {
        self.parts.generate()
    }

    fn next(&mut self) -> Result<()> {
        self.parts.next()
    }

    fn remaining(&self) -> usize {
        self.parts.remaining()
    }
}

/// Element generator of [`Merge`].
#[derive(Debug)]
pub struct MergeElements<E> {
    parts: Parts<E>,
    offsets: SmallVec<[u32; 2]>,
}

impl<E: Element> Generator for MergeElements<E> {
    type Item = E;

    fn done(&self) -> bool {
        self.parts.done()
    }

    fn generate(&self) -> Result<E> {
        let element = self.parts.generate()?;
        Ok(element + self.offsets[self.parts.active])
    }

    fn next(&mut self) -> Result<()> {
        self.parts.next()
    }

    fn remaining(&self) -> usize {
        self.parts.remaining()
    }
}
