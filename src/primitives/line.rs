use cgmath::{
    prelude::*,
    Point2, Point3, Vector2, Vector3,
};
use tracing::debug;

use super::{check_segments, Parametric, Seam};
use crate::{
    error::{Error, Result},
    math,
    vertex::{PathVertex, ShapeVertex},
};


/// A straight 2D line from `start` to `end`, split into `segments` equally
/// long edges.
///
/// Vertex `i` sits at `lerp(start, end, i / segments)` and edge `i` connects
/// vertex `i` with vertex `i + 1`. Normals point to the right of the line
/// direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineShape {
    start: Point2<f64>,
    end: Point2<f64>,
    segments: u32,
    normal: Vector2<f64>,
}

impl LineShape {
    /// Fails if `segments` is `0` or the end points do not define a
    /// direction (they coincide or are not finite).
    pub fn new(start: Point2<f64>, end: Point2<f64>, segments: u32) -> Result<Self> {
        check_segments(Self::NAME, segments, Seam::Duplicate)?;
        if math::try_normalize(end - start).is_none() {
            return Err(Error::invalid(Self::NAME, "start and end point do not define a direction"));
        }

        debug!(?start, ?end, segments, "created line shape");
        Ok(Self::unchecked(start, end, segments))
    }

    /// Callers guarantee `segments >= 1` and `start != end`.
    pub(crate) fn unchecked(start: Point2<f64>, end: Point2<f64>, segments: u32) -> Self {
        Self {
            start,
            end,
            segments,
            normal: math::rotate_cw((end - start).normalize()),
        }
    }

    pub fn start(&self) -> Point2<f64> {
        self.start
    }

    pub fn end(&self) -> Point2<f64> {
        self.end
    }
}

impl Default for LineShape {
    fn default() -> Self {
        Self::unchecked(Point2::new(0.0, -1.0), Point2::new(0.0, 1.0), 8)
    }
}

impl Parametric for LineShape {
    type Vertex = ShapeVertex;
    const NAME: &'static str = "line shape";

    fn segments(&self) -> u32 {
        self.segments
    }

    fn sample(&self, t: f64) -> ShapeVertex {
        ShapeVertex {
            position: math::lerp(self.start, self.end, t),
            normal: self.normal,
            tex_coord: t,
        }
    }
}


/// A straight 3D line from `start` to `end`, split into `segments` equally
/// long edges.
///
/// The tangent is the line direction. The normal is the `up` hint given at
/// construction, made orthogonal to the tangent. If the hint is zero or
/// parallel to the line, some perpendicular direction is chosen instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePath {
    start: Point3<f64>,
    end: Point3<f64>,
    segments: u32,
    tangent: Vector3<f64>,
    normal: Vector3<f64>,
}

impl LinePath {
    /// Creates a line with the normal chosen as close to `+x` as possible.
    pub fn new(start: Point3<f64>, end: Point3<f64>, segments: u32) -> Result<Self> {
        Self::with_up(start, end, Vector3::unit_x(), segments)
    }

    /// Fails if `segments` is `0` or the end points do not define a
    /// direction.
    pub fn with_up(
        start: Point3<f64>,
        end: Point3<f64>,
        up: Vector3<f64>,
        segments: u32,
    ) -> Result<Self> {
        check_segments(Self::NAME, segments, Seam::Duplicate)?;
        if math::try_normalize(end - start).is_none() {
            return Err(Error::invalid(Self::NAME, "start and end point do not define a direction"));
        }

        debug!(?start, ?end, segments, "created line path");
        Ok(Self::unchecked(start, end, up, segments))
    }

    fn unchecked(start: Point3<f64>, end: Point3<f64>, up: Vector3<f64>, segments: u32) -> Self {
        let tangent = (end - start).normalize();
        Self {
            start,
            end,
            segments,
            tangent,
            normal: math::orthonormal(tangent, up),
        }
    }

    pub fn start(&self) -> Point3<f64> {
        self.start
    }

    pub fn end(&self) -> Point3<f64> {
        self.end
    }
}

impl Default for LinePath {
    fn default() -> Self {
        Self::unchecked(Point3::new(0.0, 0.0, -1.0), Point3::new(0.0, 0.0, 1.0), Vector3::unit_x(), 8)
    }
}

impl Parametric for LinePath {
    type Vertex = PathVertex;
    const NAME: &'static str = "line path";

    fn segments(&self) -> u32 {
        self.segments
    }

    fn sample(&self, t: f64) -> PathVertex {
        PathVertex {
            position: math::lerp(self.start, self.end, t),
            tangent: self.tangent,
            normal: self.normal,
            tex_coord: t,
        }
    }
}
