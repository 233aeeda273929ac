use cgmath::{
    prelude::*,
    Point3,
};
use tracing::debug;

use super::{check_segments, Parametric, Seam};
use crate::{
    error::{Error, Result},
    math::TAU,
    vertex::PathVertex,
};


/// Step used for the central differences that give tangent and normal.
const DIFF_STEP: f64 = 0.01;

/// A closed `(p, q)` torus knot path.
///
/// With `θ = 2π t` the curve is
///
/// ```text
/// r(t) = 0.5 (2 + sin qθ)
/// position(t) = r(t) (cos pθ, sin pθ, cos qθ)
/// ```
///
/// so the distance from the z axis stays within `[0.5, 1.5]`. Tangent and
/// normal are computed from the neighbouring points `P(t ± 0.01)`: the tangent
/// is the normalized difference and the normal is the normalized cross
/// product of difference and sum.
///
/// Whether the sample at `t = 1` is emitted is controlled by the [`Seam`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Knot {
    p: i32,
    q: i32,
    segments: u32,
    seam: Seam,
}

impl Knot {
    /// A knot that duplicates the first vertex at the seam.
    pub fn new(p: i32, q: i32, segments: u32) -> Result<Self> {
        Self::with_seam(p, q, segments, Seam::Duplicate)
    }

    pub fn with_seam(p: i32, q: i32, segments: u32, seam: Seam) -> Result<Self> {
        check_segments(Self::NAME, segments, seam)?;
        if p == 0 && q == 0 {
            return Err(Error::invalid(Self::NAME, "p and q are both zero"));
        }

        debug!(p, q, segments, ?seam, "created knot");
        Ok(Self { p, q, segments, seam })
    }

    pub fn p(&self) -> i32 {
        self.p
    }

    pub fn q(&self) -> i32 {
        self.q
    }

    fn position(&self, t: f64) -> Point3<f64> {
        let theta = TAU * t;
        let (p, q) = (f64::from(self.p), f64::from(self.q));
        let r = 0.5 * (2.0 + (q * theta).sin());

        Point3::new(
            r * (p * theta).cos(),
            r * (p * theta).sin(),
            r * (q * theta).cos(),
        )
    }
}

impl Default for Knot {
    fn default() -> Self {
        Self {
            p: 2,
            q: 3,
            segments: 96,
            seam: Seam::Duplicate,
        }
    }
}

impl Parametric for Knot {
    type Vertex = PathVertex;
    const NAME: &'static str = "knot";

    fn segments(&self) -> u32 {
        self.segments
    }

    fn seam(&self) -> Seam {
        self.seam
    }

    fn sample(&self, t: f64) -> PathVertex {
        let before = self.position(t - DIFF_STEP);
        let after = self.position(t + DIFF_STEP);
        let diff = after - before;

        PathVertex {
            position: self.position(t),
            tangent: diff.normalize(),
            normal: diff.cross(after.to_vec() + before.to_vec()).normalize(),
            tex_coord: t,
        }
    }
}
