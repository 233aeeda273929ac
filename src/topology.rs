//! Index based connectivity: edges and triangles.

use std::{fmt::Debug, ops::Add};

use derive_more::From;


/// Elements that connect vertices by index: [`Edge`] and [`Triangle`].
///
/// Indices always refer to the vertex stream of the geometry that produced
/// the element.
pub trait Element: Copy + Debug + Eq + Add<u32, Output = Self> + Send + Sync + 'static {
    /// Human readable name, used in log and error messages.
    const KIND: &'static str;

    /// All vertex indices of this element in order.
    fn indices(&self) -> &[u32];
}

/// A line segment between two vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From)]
pub struct Edge {
    pub vertices: [u32; 2],
}

impl Edge {
    pub fn new(a: u32, b: u32) -> Self {
        Self { vertices: [a, b] }
    }
}

/// A triangle.
///
/// Mesh generators emit the vertices in counter clockwise order when looking
/// at the triangle from the side its normals point to. Combinators never
/// reorder them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From)]
pub struct Triangle {
    pub vertices: [u32; 3],
}

impl Triangle {
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self { vertices: [a, b, c] }
    }
}

/// Shifting all indices by a constant. This is how combinators renumber
/// elements of later sub-generators.
impl Add<u32> for Edge {
    type Output = Self;
    fn add(self, offset: u32) -> Self {
        let [a, b] = self.vertices;
        Self::new(a + offset, b + offset)
    }
}

impl Add<u32> for Triangle {
    type Output = Self;
    fn add(self, offset: u32) -> Self {
        let [a, b, c] = self.vertices;
        Self::new(a + offset, b + offset, c + offset)
    }
}

impl Element for Edge {
    const KIND: &'static str = "edge";

    fn indices(&self) -> &[u32] {
        &self.vertices
    }
}

impl Element for Triangle {
    const KIND: &'static str = "triangle";

    fn indices(&self) -> &[u32] {
        &self.vertices
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset() {
        assert_eq!(Edge::new(0, 1) + 5, Edge::new(5, 6));
        assert_eq!(Triangle::new(2, 0, 1) + 3, Triangle::new(5, 3, 4));
    }

    #[test]
    fn from_array() {
        assert_eq!(Edge::from([3, 4]), Edge::new(3, 4));
        assert_eq!(Triangle::from([0, 2, 1]).indices(), &[0, 2, 1]);
    }
}
