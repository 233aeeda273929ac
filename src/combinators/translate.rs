use std::fmt;

use tracing::debug;

use crate::{
    error::Result,
    gen::{Generator, Geometry},
    vertex::Vertex,
};


type Offset<G> = <<G as Geometry>::Vertex as Vertex>::Offset;

/// Moves every vertex of the base geometry by `delta`. Elements are passed
/// through unchanged.
pub struct Translate<G: Geometry> {
    base: G,
    delta: Offset<G>,
}

impl<G: Geometry> Translate<G> {
    pub fn new(base: G, delta: Offset<G>) -> Self {
        debug!(?delta, "created translate");
        Self { base, delta }
    }
}

impl<G: Geometry + Clone> Clone for Translate<G> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            delta: self.delta,
        }
    }
}

impl<G: Geometry + fmt::Debug> fmt::Debug for Translate<G> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Translate")
            .field("base", &self.base)
            .field("delta", &self.delta)
            .finish()
    }
}

impl<G: Geometry> Geometry for Translate<G> {
    type Vertex = G::Vertex;
    type Element = G::Element;
    type Vertices = TranslateVertices<G::Vertices>;
    type Elements = G::Elements;

    fn vertices(&self) -> Self::Vertices {
        TranslateVertices {
            inner: self.base.vertices(),
            delta: self.delta,
        }
    }

    fn elements(&self) -> Self::Elements {
        self.base.elements()
    }

    fn vertex_count(&self) -> usize {
        self.base.vertex_count()
    }

    fn element_count(&self) -> usize {
        self.base.element_count()
    }
}

/// Vertex generator of [`Translate`].
pub struct TranslateVertices<C: Generator>
where
    C::Item: Vertex,
{
    inner: C,
    delta: <C::Item as Vertex>::Offset,
}

impl<C> Generator for TranslateVertices<C>
where
    C: Generator,
    C::Item: Vertex,
{
    type Item = C::Item;

    fn done(&self) -> bool {
        self.inner.done()
    }

    fn generate(&self) -> Result<Self::Item> {
        let mut v = self.inner.generate()?;
        v.translate(self.delta);
        Ok(v)
    }

    fn next(&mut self) -> Result<()> {
        self.inner.next()
    }

    fn remaining(&self) -> usize {
        self.inner.remaining()
    }
}

impl<C> fmt::Debug for TranslateVertices<C>
where
    C: Generator + fmt::Debug,
    C::Item: Vertex,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TranslateVertices")
            .field("inner", &self.inner)
            .field("delta", &self.delta)
            .finish()
    }
}
