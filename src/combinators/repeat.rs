use std::{convert::TryFrom, fmt};

use tracing::debug;

use crate::{
    error::{Error, Operation, Result},
    gen::{violation, Generator, Geometry},
    vertex::Vertex,
};


type Offset<G> = <<G as Geometry>::Vertex as Vertex>::Offset;

/// `count` copies of a base geometry, each shifted by `delta` relative to the
/// previous one.
///
/// Copy `i` is translated by `i * delta` and the indices of its elements are
/// offset by `i * base.vertex_count()`. With `count == 0` the base geometry
/// is never asked for a generator. A base without vertices (or without
/// elements) results in an empty vertex (or element) stream as well.
pub struct Repeat<G: Geometry> {
    base: G,
    count: u32,
    delta: Offset<G>,

    /// Vertices per copy. `count * stride` always fits into `u32`.
    stride: u32,
}

impl<G: Geometry + Clone> Repeat<G> {
    /// Fails if all copies together have more vertices than 32 bit indices
    /// can address.
    pub fn new(base: G, count: u32, delta: Offset<G>) -> Result<Self> {
        let stride = if count == 0 {
            0
        } else {
            let per_copy = base.vertex_count();
            u32::try_from(per_copy)
                .ok()
                .filter(|n| n.checked_mul(count).is_some())
                .ok_or_else(|| Error::invalid(
                    "repeat",
                    format!("{} copies of {} vertices exceed 32 bit indices", count, per_copy),
                ))?
        };

        debug!(count, stride, ?delta, "created repeat");
        Ok(Self { base, count, delta, stride })
    }

    /// Callers guarantee that `stride` is the vertex count of `base` and
    /// that `count * stride` fits into `u32`.
    pub(crate) fn unchecked(base: G, count: u32, delta: Offset<G>, stride: u32) -> Self {
        Self { base, count, delta, stride }
    }

    pub fn base(&self) -> &G {
        &self.base
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

impl<G: Geometry + Clone> Clone for Repeat<G> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            count: self.count,
            delta: self.delta,
            stride: self.stride,
        }
    }
}

impl<G: Geometry + fmt::Debug> fmt::Debug for Repeat<G> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Repeat")
            .field("base", &self.base)
            .field("count", &self.count)
            .field("delta", &self.delta)
            .finish()
    }
}

impl<G: Geometry + Clone> Geometry for Repeat<G> {
    type Vertex = G::Vertex;
    type Element = G::Element;
    type Vertices = RepeatVertices<G>;
    type Elements = RepeatElements<G>;

    fn vertices(&self) -> Self::Vertices {
        RepeatVertices {
            copies: Copies::new(&self.base, self.count, G::vertices, G::vertex_count),
            delta: self.delta,
        }
    }

    fn elements(&self) -> Self::Elements {
        RepeatElements {
            copies: Copies::new(&self.base, self.count, G::elements, G::element_count),
            stride: self.stride,
        }
    }

    fn vertex_count(&self) -> usize {
        self.count as usize * self.stride as usize
    }

    fn element_count(&self) -> usize {
        if self.count == 0 {
            0
        } else {
            self.count as usize * self.base.element_count()
        }
    }
}


/// Walks through `count` fresh generators of the base, one after another.
struct Copies<G, C> {
    base: G,
    make: fn(&G) -> C,
    current: Option<C>,
    instance: u32,
    count: u32,
    per_copy: usize,
}

impl<G: Clone, C: Generator> Copies<G, C> {
    fn new(base: &G, count: u32, make: fn(&G) -> C, len: fn(&G) -> usize) -> Self {
        let (current, per_copy) = if count == 0 {
            (None, 0)
        } else {
            let first = make(base);
            if first.done() {
                (None, 0)
            } else {
                (Some(first), len(base))
            }
        };

        Self {
            base: base.clone(),
            make,
            current,
            instance: 0,
            count,
            per_copy,
        }
    }

    fn done(&self) -> bool {
        self.current.is_none()
    }

    fn current(&self, operation: Operation) -> Result<&C> {
        self.current.as_ref().ok_or_else(|| violation("repeat", operation))
    }

    fn next(&mut self) -> Result<()> {
        let current = self.current.as_mut().ok_or_else(|| violation("repeat", Operation::Next))?;
        current.next()?;
        let finished = current.done();

        if finished {
            self.instance += 1;
            self.current = if self.instance < self.count {
                Some((self.make)(&self.base))
            } else {
                None
            };
        }

        Ok(())
    }

    fn remaining(&self) -> usize {
        match &self.current {
            Some(c) => c.remaining() + (self.count - self.instance - 1) as usize * self.per_copy,
            None => 0,
        }
    }
}

impl<G: fmt::Debug, C> fmt::Debug for Copies<G, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Copies")
            .field("base", &self.base)
            .field("instance", &self.instance)
            .field("count", &self.count)
            .finish()
    }
}


/// Vertex generator of [`Repeat`].
pub struct RepeatVertices<G: Geometry> {
    copies: Copies<G, G::Vertices>,
    delta: Offset<G>,
}

impl<G: Geometry + Clone> Generator for RepeatVertices<G> {
    type Item = G::Vertex;

    fn done(&self) -> bool {
        self.copies.done()
    }

    fn generate(&self) -> Result<Self::Item> {
        let mut v = self.copies.current(Operation::Generate)?.generate()?;
        v.translate(self.delta * f64::from(self.copies.instance));
        Ok(v)
    }

    fn next(&mut self) -> Result<()> {
        self.copies.next()
    }

    fn remaining(&self) -> usize {
        self.copies.remaining()
    }
}

impl<G: Geometry + fmt::Debug> fmt::Debug for RepeatVertices<G> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RepeatVertices")
            .field("copies", &self.copies)
            .field("delta", &self.delta)
            .finish()
    }
}

/// Element generator of [`Repeat`].
pub struct RepeatElements<G: Geometry> {
    copies: Copies<G, G::Elements>,
    stride: u32,
}

impl<G: Geometry + Clone> Generator for RepeatElements<G> {
    type Item = G::Element;

    fn done(&self) -> bool {
        self.copies.done()
    }

    fn generate(&self) -> Result<Self::Item> {
        let element = self.copies.current(Operation::Generate)?.generate()?;

        // `instance < count`, so this stays below `count * stride`.
        Ok(element + self.copies.instance * self.stride)
    }

    fn next(&mut self) -> Result<()> {
        self.copies.next()
    }

    fn remaining(&self) -> usize {
        self.copies.remaining()
    }
}

impl<G: Geometry + fmt::Debug> fmt::Debug for RepeatElements<G> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RepeatElements")
            .field("copies", &self.copies)
            .field("stride", &self.stride)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use cgmath::{Point3, Vector3};

    use crate::{
        gen::{Empty, EmptyPath},
        primitives::LinePath,
        topology::Edge,
        vertex::PathVertex,
    };
    use super::*;

    fn line() -> LinePath {
        LinePath::new(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0), 4).unwrap()
    }

    #[test]
    fn copies_are_offset() {
        let repeat = Repeat::new(line(), 3, Vector3::new(0.0, 1.0, 0.0)).unwrap();
        let edges = repeat.elements().drain().collect::<Vec<_>>();
        let vertices = repeat.vertices().drain().collect::<Vec<_>>();

        assert_eq!(vertices.len(), 15);
        assert_eq!(edges.len(), 12);
        assert_eq!(repeat.vertex_count(), 15);
        assert_eq!(repeat.element_count(), 12);

        // Copy 2 is shifted by 2 * (4 + 1) indices relative to copy 0.
        for i in 0..4 {
            assert_eq!(edges[8 + i], edges[i] + 10);
        }

        assert_eq!(vertices[0].position, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(vertices[5].position, Point3::new(0.0, 1.0, 0.0));
        assert_eq!(vertices[14].position, Point3::new(4.0, 2.0, 0.0));
        assert_eq!(vertices[14].tangent, vertices[4].tangent);
    }

    #[test]
    fn remaining_is_exact() {
        let repeat = Repeat::new(line(), 3, Vector3::new(0.0, 0.0, 1.0)).unwrap();
        let mut vertices = repeat.vertices();
        let mut produced = 0;

        while !vertices.done() {
            assert_eq!(vertices.remaining(), 15 - produced);
            vertices.next().unwrap();
            produced += 1;
        }
        assert_eq!(produced, 15);
    }

    /// A geometry that counts how often it hands out generators.
    #[derive(Clone, Debug, Default)]
    struct Counting(Arc<AtomicUsize>);

    impl Geometry for Counting {
        type Vertex = PathVertex;
        type Element = Edge;
        type Vertices = Empty<PathVertex>;
        type Elements = Empty<Edge>;

        fn vertices(&self) -> Self::Vertices {
            self.0.fetch_add(1, Ordering::SeqCst);
            Empty::new()
        }

        fn elements(&self) -> Self::Elements {
            self.0.fetch_add(1, Ordering::SeqCst);
            Empty::new()
        }
    }

    #[test]
    fn zero_count_never_touches_base() {
        let base = Counting::default();
        let repeat = Repeat::new(base.clone(), 0, Vector3::new(1.0, 0.0, 0.0)).unwrap();

        assert!(repeat.vertices().done());
        assert!(repeat.elements().done());
        assert_eq!(repeat.vertex_count(), 0);
        assert_eq!(repeat.element_count(), 0);
        assert_eq!(base.0.load(Ordering::SeqCst), 0);

        assert!(repeat.vertices().generate().unwrap_err().is_protocol_violation());
    }

    #[test]
    fn empty_base_is_empty() {
        let repeat = Repeat::new(EmptyPath::new(), 5, Vector3::new(1.0, 0.0, 0.0)).unwrap();
        assert!(repeat.vertices().done());
        assert_eq!(repeat.elements().remaining(), 0);
    }

    #[test]
    fn next_after_end_fails() {
        let repeat = Repeat::new(line(), 1, Vector3::new(1.0, 0.0, 0.0)).unwrap();
        let mut edges = repeat.elements();
        for _ in 0..4 {
            edges.next().unwrap();
        }
        assert!(edges.done());
        assert!(edges.next().unwrap_err().is_protocol_violation());
    }

    #[test]
    fn vertex_count_fits_indices() {
        let delta = Vector3::new(1.0, 0.0, 0.0);
        let segment = LinePath::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), 1)
            .unwrap();

        // 5 vertices per copy.
        assert!(Repeat::new(line(), 1 << 30, delta).unwrap_err().is_invalid_argument());

        // 2 vertices per copy: just below the limit, then nested beyond it.
        let inner = Repeat::new(segment, (1 << 31) - 1, delta).unwrap();
        assert_eq!(inner.vertex_count(), u32::max_value() as usize - 1);
        assert!(Repeat::new(inner.clone(), 2, delta).unwrap_err().is_invalid_argument());
        assert!(Repeat::new(inner, 1, delta).is_ok());
    }
}
