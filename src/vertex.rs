//! The three vertex kinds produced by generators.

use std::fmt::Debug;

use cgmath::{
    prelude::*,
    Point2, Point3, Vector2, Vector3,
};

use crate::math::{self, mean_direction};


/// Operations every vertex kind supports so that combinators can work on
/// any of them.
pub trait Vertex: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// The vector type by which the vertex can be moved.
    type Offset: VectorSpace<Scalar = f64> + Debug + Send + Sync + 'static;

    /// Moves the position by `delta`. All other attributes stay unchanged.
    fn translate(&mut self, delta: Self::Offset);

    /// Returns the vertex halfway between `self` and `other`: positions and
    /// texture coordinates are averaged, directions are averaged and
    /// renormalized.
    fn midpoint(&self, other: &Self) -> Self;
}

/// A vertex of a triangle mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: Point3<f64>,
    pub normal: Vector3<f64>,
    pub tex_coord: Point2<f64>,
}

impl Vertex for MeshVertex {
    type Offset = Vector3<f64>;

    fn translate(&mut self, delta: Self::Offset) {
        self.position = self.position + delta;
    }

    fn midpoint(&self, other: &Self) -> Self {
        Self {
            position: self.position.midpoint(other.position),
            normal: mean_direction(self.normal, other.normal),
            tex_coord: self.tex_coord.midpoint(other.tex_coord),
        }
    }
}

/// A vertex on a 2D outline.
///
/// Only the normal is stored; the tangent is derived from it. For an outline
/// running counter clockwise, the normal points outwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeVertex {
    pub position: Point2<f64>,
    pub normal: Vector2<f64>,
    pub tex_coord: f64,
}

impl ShapeVertex {
    /// The unit direction in which the outline continues at this vertex.
    pub fn tangent(&self) -> Vector2<f64> {
        math::rotate_ccw(self.normal)
    }
}

impl Vertex for ShapeVertex {
    type Offset = Vector2<f64>;

    fn translate(&mut self, delta: Self::Offset) {
        self.position = self.position + delta;
    }

    fn midpoint(&self, other: &Self) -> Self {
        Self {
            position: self.position.midpoint(other.position),
            normal: mean_direction(self.normal, other.normal),
            tex_coord: 0.5 * (self.tex_coord + other.tex_coord),
        }
    }
}

/// A vertex on a 3D path with a full moving frame.
///
/// `tangent` and `normal` are unit length and orthogonal to each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathVertex {
    pub position: Point3<f64>,
    pub tangent: Vector3<f64>,
    pub normal: Vector3<f64>,

    /// The curve parameter at which this vertex was sampled.
    pub tex_coord: f64,
}

impl PathVertex {
    /// `tangent × normal`, completing the right handed frame.
    pub fn binormal(&self) -> Vector3<f64> {
        self.tangent.cross(self.normal)
    }
}

impl Vertex for PathVertex {
    type Offset = Vector3<f64>;

    fn translate(&mut self, delta: Self::Offset) {
        self.position = self.position + delta;
    }

    fn midpoint(&self, other: &Self) -> Self {
        Self {
            position: self.position.midpoint(other.position),
            tangent: mean_direction(self.tangent, other.tangent),
            normal: mean_direction(self.normal, other.normal),
            tex_coord: 0.5 * (self.tex_coord + other.tex_coord),
        }
    }
}
