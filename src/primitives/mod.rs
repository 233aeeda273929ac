//! Geometries defined directly by a closed form description.
//!
//! Most of them are curves sampled at evenly spaced parameter values: they
//! implement [`Parametric`] and get their vertex and edge generators from
//! this module.

use crate::{
    error::{Error, Operation, Result},
    gen::{ensure_active, Generator},
    topology::Edge,
    vertex::Vertex,
};

mod grid;
mod helix;
mod knot;
mod line;
mod triangle;

pub use self::{
    grid::Grid,
    helix::Helix,
    knot::Knot,
    line::{LinePath, LineShape},
    triangle::TriangleMesh,
};


/// How a closed curve handles the point where it meets itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seam {
    /// The curve is sampled at `t = i / segments` for `i = 0..=segments`:
    /// the last vertex sits at the same position as the first one (with
    /// texture coordinate `1.0`) and all edges connect `i` to `i + 1`.
    Duplicate,

    /// The curve is sampled for `i = 0..segments` only and the last edge
    /// connects the last vertex back to vertex `0`.
    Shared,
}

impl Default for Seam {
    fn default() -> Self {
        Seam::Duplicate
    }
}

/// A curve sampled at `segments` evenly spaced intervals of `t ∈ [0, 1]`.
pub trait Parametric: Clone {
    type Vertex: Vertex;

    /// Used in log and error messages.
    const NAME: &'static str;

    fn segments(&self) -> u32;

    /// Open curves always behave like [`Seam::Duplicate`].
    fn seam(&self) -> Seam {
        Seam::Duplicate
    }

    /// Evaluates the curve at parameter `t`.
    fn sample(&self, t: f64) -> Self::Vertex;

    fn sample_count(&self) -> u32 {
        match self.seam() {
            Seam::Duplicate => self.segments() + 1,
            Seam::Shared => self.segments(),
        }
    }
}

/// Checks the segment count every parametric curve has to satisfy.
pub(crate) fn check_segments(name: &'static str, segments: u32, seam: Seam) -> Result<()> {
    let min = match seam {
        Seam::Duplicate => 1,
        Seam::Shared => 2,
    };

    if segments < min {
        return Err(Error::invalid(
            name,
            format!("needs at least {} segments for {:?} seam, got {}", min, seam, segments),
        ));
    }

    // The duplicated seam vertex needs one more index than there are segments.
    if seam == Seam::Duplicate && segments == u32::max_value() {
        return Err(Error::invalid(name, "too many vertices for 32 bit indices"));
    }

    Ok(())
}

/// Vertex generator of a [`Parametric`] curve.
#[derive(Debug, Clone)]
pub struct CurveVertices<P> {
    curve: P,
    index: u32,
    count: u32,
}

impl<P: Parametric> CurveVertices<P> {
    pub(crate) fn new(curve: P) -> Self {
        let count = curve.sample_count();
        Self { curve, index: 0, count }
    }
}

impl<P: Parametric> Generator for CurveVertices<P> {
    type Item = P::Vertex;

    fn done(&self) -> bool {
        self.index >= self.count
    }

    fn generate(&self) -> Result<Self::Item> {
        ensure_active(self.done(), P::NAME, Operation::Generate)?;
        let t = f64::from(self.index) / f64::from(self.curve.segments());
        Ok(self.curve.sample(t))
    }

    fn next(&mut self) -> Result<()> {
        ensure_active(self.done(), P::NAME, Operation::Next)?;
        self.index += 1;
        Ok(())
    }

    fn remaining(&self) -> usize {
        (self.count - self.index) as usize
    }
}

/// Edge generator of a [`Parametric`] curve: edge `i` connects sample `i`
/// with sample `i + 1`, wrapping around for [`Seam::Shared`].
#[derive(Debug, Clone)]
pub struct CurveEdges {
    name: &'static str,
    index: u32,
    segments: u32,
    vertex_count: u32,
}

impl CurveEdges {
    pub(crate) fn new<P: Parametric>(curve: &P) -> Self {
        Self {
            name: P::NAME,
            index: 0,
            segments: curve.segments(),
            vertex_count: curve.sample_count(),
        }
    }
}

impl Generator for CurveEdges {
    type Item = Edge;

    fn done(&self) -> bool {
        self.index >= self.segments
    }

    fn generate(&self) -> Result<Edge> {
        ensure_active(self.done(), self.name, Operation::Generate)?;
        Ok(Edge::new(self.index, (self.index + 1) % self.vertex_count))
    }

    fn next(&mut self) -> Result<()> {
        ensure_active(self.done(), self.name, Operation::Next)?;
        self.index += 1;
        Ok(())
    }

    fn remaining(&self) -> usize {
        (self.segments - self.index) as usize
    }
}

/// Implements `Geometry` for parametric curves.
macro_rules! impl_curve_geometry {
    ($($ty:ident),* $(,)?) => {
        $(
            impl $crate::gen::Geometry for $ty {
                type Vertex = <$ty as $crate::primitives::Parametric>::Vertex;
                type Element = $crate::topology::Edge;
                type Vertices = $crate::primitives::CurveVertices<$ty>;
                type Elements = $crate::primitives::CurveEdges;

                fn vertices(&self) -> Self::Vertices {
                    $crate::primitives::CurveVertices::new(self.clone())
                }

                fn elements(&self) -> Self::Elements {
                    $crate::primitives::CurveEdges::new(self)
                }

                fn vertex_count(&self) -> usize {
                    $crate::primitives::Parametric::sample_count(self) as usize
                }

                fn element_count(&self) -> usize {
                    $crate::primitives::Parametric::segments(self) as usize
                }
            }
        )*
    };
}

impl_curve_geometry!(LineShape, LinePath, Knot, Helix);


static_assertions::assert_impl_all!(LineShape: Send, Sync, Clone);
static_assertions::assert_impl_all!(LinePath: Send, Sync, Clone);
static_assertions::assert_impl_all!(Grid: Send, Sync, Clone);
static_assertions::assert_impl_all!(Knot: Send, Sync, Clone);
static_assertions::assert_impl_all!(Helix: Send, Sync, Clone);
static_assertions::assert_impl_all!(TriangleMesh: Send, Sync, Clone);
static_assertions::assert_impl_all!(CurveVertices<Knot>: Send);
