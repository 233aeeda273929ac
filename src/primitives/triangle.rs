use cgmath::{
    prelude::*,
    Point2, Point3, Vector3,
};
use tracing::debug;

use crate::{
    error::{Error, Operation, Result},
    gen::{ensure_active, Generator, Geometry},
    math,
    topology::Triangle,
    vertex::MeshVertex,
};


/// A flat triangle with corners `v0`, `v1` and `v2`, tessellated into
/// `segments²` smaller triangles.
///
/// Vertices are emitted row by row, starting at the edge `v0 → v1` and moving
/// towards the apex `v2`. Row `r` has `segments - r + 1` vertices. All
/// triangles are counter clockwise when seen from the side the normal
/// `(v1 - v0) × (v2 - v0)` points to.
///
/// Texture coordinates are `(position within row, row / segments)`; the apex
/// gets `(0.5, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleMesh {
    corners: [Point3<f64>; 3],
    normal: Vector3<f64>,
    segments: u32,
}

impl TriangleMesh {
    const NAME: &'static str = "triangle mesh";

    pub fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>, segments: u32) -> Result<Self> {
        if segments == 0 {
            return Err(Error::invalid(Self::NAME, "needs at least 1 segment, got 0"));
        }

        let s = u64::from(segments);
        if (s + 1) * (s + 2) / 2 > u64::from(u32::max_value()) {
            return Err(Error::invalid(
                Self::NAME,
                format!("{} segments need too many vertices for 32 bit indices", segments),
            ));
        }

        let normal = math::try_normalize((v1 - v0).cross(v2 - v0))
            .ok_or_else(|| Error::invalid(Self::NAME, "corners do not span a triangle"))?;

        debug!(?v0, ?v1, ?v2, segments, "created triangle mesh");
        Ok(Self {
            corners: [v0, v1, v2],
            normal,
            segments,
        })
    }

    /// An equilateral-ish triangle in the xy plane with its apex at
    /// `(0, radius, 0)`, facing `+z`.
    pub fn regular(radius: f64, segments: u32) -> Result<Self> {
        let (v0, v1, v2) = Self::regular_corners(radius);
        Self::new(v0, v1, v2, segments)
    }

    fn regular_corners(radius: f64) -> (Point3<f64>, Point3<f64>, Point3<f64>) {
        let s = radius * std::f64::consts::FRAC_1_SQRT_2;
        (
            Point3::new(-s, -s, 0.0),
            Point3::new(s, -s, 0.0),
            Point3::new(0.0, radius, 0.0),
        )
    }

    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    fn vertex_at(&self, row: u32, col: u32) -> MeshVertex {
        let [v0, v1, v2] = self.corners;

        let (position, tex_coord) = if row == self.segments {
            (v2, Point2::new(0.5, 1.0))
        } else {
            let t = f64::from(row) / f64::from(self.segments);
            let t2 = f64::from(col) / f64::from(self.segments - row);
            let left = math::lerp(v0, v2, t);
            let right = math::lerp(v1, v2, t);
            (math::lerp(left, right, t2), Point2::new(t2, t))
        };

        MeshVertex { position, normal: self.normal, tex_coord }
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        let (v0, v1, v2) = Self::regular_corners(1.0);
        Self {
            corners: [v0, v1, v2],
            normal: Vector3::unit_z(),
            segments: 4,
        }
    }
}

impl Geometry for TriangleMesh {
    type Vertex = MeshVertex;
    type Element = Triangle;
    type Vertices = TriangleVertices;
    type Elements = TriangleElements;

    fn vertices(&self) -> Self::Vertices {
        TriangleVertices { mesh: *self, row: 0, col: 0, emitted: 0 }
    }

    fn elements(&self) -> Self::Elements {
        TriangleElements { segments: self.segments, row: 0, col: 0, first: 0, emitted: 0 }
    }

    fn vertex_count(&self) -> usize {
        let s = self.segments as usize;
        (s + 1) * (s + 2) / 2
    }

    fn element_count(&self) -> usize {
        let s = self.segments as usize;
        s * s
    }
}

/// Vertex generator of [`TriangleMesh`].
#[derive(Debug, Clone)]
pub struct TriangleVertices {
    mesh: TriangleMesh,
    row: u32,
    col: u32,
    emitted: usize,
}

impl Generator for TriangleVertices {
    type Item = MeshVertex;

    fn done(&self) -> bool {
        self.row > self.mesh.segments
    }

    fn generate(&self) -> Result<MeshVertex> {
        ensure_active(self.done(), TriangleMesh::NAME, Operation::Generate)?;
        Ok(self.mesh.vertex_at(self.row, self.col))
    }

    fn next(&mut self) -> Result<()> {
        ensure_active(self.done(), TriangleMesh::NAME, Operation::Next)?;

        self.emitted += 1;
        self.col += 1;
        if self.col > self.mesh.segments - self.row {
            self.col = 0;
            self.row += 1;
        }
        Ok(())
    }

    fn remaining(&self) -> usize {
        self.mesh.vertex_count() - self.emitted
    }
}

/// Triangle generator of [`TriangleMesh`].
///
/// Row `r` is a strip of `2 (segments - r) - 1` triangles, alternating
/// between ones pointing towards the apex and ones pointing away from it.
#[derive(Debug, Clone)]
pub struct TriangleElements {
    segments: u32,
    row: u32,
    col: u32,

    /// Index of the vertex at the lower left corner of the current triangle.
    first: u32,
    emitted: usize,
}

impl Generator for TriangleElements {
    type Item = Triangle;

    fn done(&self) -> bool {
        self.row == self.segments
    }

    fn generate(&self) -> Result<Triangle> {
        ensure_active(self.done(), TriangleMesh::NAME, Operation::Generate)?;

        let i = self.first;
        let above = i + self.segments - self.row;
        if self.col % 2 == 0 {
            Ok(Triangle::new(i, i + 1, above + 1))
        } else {
            Ok(Triangle::new(i, above + 1, above))
        }
    }

    fn next(&mut self) -> Result<()> {
        ensure_active(self.done(), TriangleMesh::NAME, Operation::Next)?;

        self.emitted += 1;
        if self.col % 2 == 0 {
            self.first += 1;
        }

        self.col += 1;
        if self.col == 2 * (self.segments - self.row) - 1 {
            self.first += 1;
            self.col = 0;
            self.row += 1;
        }
        Ok(())
    }

    fn remaining(&self) -> usize {
        let s = self.segments as usize;
        s * s - self.emitted
    }
}


#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use crate::materialize::MeshBuffers;
    use super::*;

    #[test]
    fn counts() {
        for s in 1..8 {
            let mesh = TriangleMesh::regular(1.0, s).unwrap();
            let buffers = MeshBuffers::from_geometry(&mesh).unwrap();

            let s = s as usize;
            assert_eq!(buffers.vertices.len(), (s + 1) * (s + 2) / 2);
            assert_eq!(buffers.elements.len(), s * s);
            buffers.check_indices().unwrap();
        }
    }

    #[test]
    fn counter_clockwise() {
        let mesh = TriangleMesh::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(0.0, 0.0, 3.0),
            5,
        ).unwrap();
        assert_abs_diff_eq!(mesh.normal().x, 1.0);

        let buffers = MeshBuffers::from_geometry(&mesh).unwrap();
        for t in &buffers.elements {
            let [a, b, c] = t.vertices;
            let pa = buffers.vertices[a as usize].position;
            let pb = buffers.vertices[b as usize].position;
            let pc = buffers.vertices[c as usize].position;

            let n = (pb - pa).cross(pc - pa);
            assert!(n.dot(mesh.normal()) > 0.0, "triangle {:?} is not counter clockwise", t);
        }
    }

    #[test]
    fn corners_and_tex_coords() {
        let mesh = TriangleMesh::regular(2.0, 3).unwrap();
        let vertices = mesh.vertices().drain().collect::<Vec<_>>();
        let [v0, v1, v2] = mesh.corners;

        assert_eq!(vertices[0].position, v0);
        assert_eq!(vertices[0].tex_coord, Point2::new(0.0, 0.0));
        assert_eq!(vertices[3].position, v1);
        assert_eq!(vertices[3].tex_coord, Point2::new(1.0, 0.0));

        let apex = vertices.last().unwrap();
        assert_eq!(apex.position, v2);
        assert_eq!(apex.tex_coord, Point2::new(0.5, 1.0));

        assert!(vertices.iter().all(|v| v.normal == Vector3::unit_z()));
    }

    #[test]
    fn default_matches_regular() {
        let a = MeshBuffers::from_geometry(&TriangleMesh::default()).unwrap();
        let b = MeshBuffers::from_geometry(&TriangleMesh::regular(1.0, 4).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_arguments() {
        let p = Point3::new(0.0, 0.0, 0.0);
        let q = Point3::new(1.0, 0.0, 0.0);
        assert!(TriangleMesh::regular(1.0, 0).unwrap_err().is_invalid_argument());
        assert!(TriangleMesh::new(p, q, Point3::new(2.0, 0.0, 0.0), 2).unwrap_err().is_invalid_argument());
        assert!(TriangleMesh::regular(0.0, 2).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn vertex_count_fits_indices() {
        assert!(TriangleMesh::regular(1.0, 100_000).unwrap_err().is_invalid_argument());
        assert!(TriangleMesh::regular(1.0, u32::max_value()).unwrap_err().is_invalid_argument());

        // 92_001 * 92_002 / 2 vertices is still below 2^32.
        let mesh = TriangleMesh::regular(1.0, 92_000).unwrap();
        assert_eq!(mesh.vertex_count(), 4_232_138_001);
        assert_eq!(mesh.elements().remaining(), 92_000 * 92_000);
    }

    #[test]
    fn tiny_triangle_is_valid() {
        let mesh = TriangleMesh::regular(1e-6, 2).unwrap();
        assert_eq!(mesh.normal(), Vector3::unit_z());
    }

    #[test]
    fn misuse_after_end() {
        let mesh = TriangleMesh::regular(1.0, 1).unwrap();
        let mut triangles = mesh.elements();
        assert_eq!(triangles.generate().unwrap(), Triangle::new(0, 1, 2));
        triangles.next().unwrap();
        assert!(triangles.done());
        assert!(triangles.next().unwrap_err().is_protocol_violation());
    }
}
