use cgmath::{Point2, Vector2};
use tracing::debug;

use super::LineShape;
use crate::{
    combinators::{Merge, MergeElements, MergeVertices, Repeat},
    error::{Error, Result},
    gen::{AnyGeometry, Geometry},
    topology::Edge,
    vertex::ShapeVertex,
};


/// A wireframe grid covering `[-size.x, size.x] × [-size.y, size.y]`.
///
/// The grid is made of two line families, merged into one stream: first the
/// horizontal lines (bottom to top), then the vertical lines (left to right).
/// Along axis `a` the grid has `segments[a]` cells, and each line running
/// along `a` is split into `segments[a] * sub_segments[a]` edges.
///
/// If an axis has zero cells, no lines are stacked along it, and the lines
/// running along it would have no edges. A grid with zero cells along either
/// axis therefore has no vertices at all.
#[derive(Debug, Clone)]
pub struct Grid {
    size: Vector2<f64>,
    segments: [u32; 2],
    sub_segments: [u32; 2],
    lines: Merge<ShapeVertex, Edge>,
}

/// One family of parallel lines: what line to draw and how often.
struct Family {
    start: Point2<f64>,
    end: Point2<f64>,
    cells: u32,
    subdivisions: Option<u32>,
    replicas: u32,
    delta: Vector2<f64>,
}

impl Family {
    /// Without cells along the line there is nothing to draw either.
    fn is_empty(&self) -> bool {
        self.replicas == 0 || self.cells == 0
    }
}

impl Grid {
    const NAME: &'static str = "grid";

    pub fn new(size: Vector2<f64>, segments: [u32; 2], sub_segments: [u32; 2]) -> Result<Self> {
        Self::validate(size, segments, sub_segments)?;

        debug!(?size, ?segments, ?sub_segments, "created grid");
        Ok(Self::assemble(size, segments, sub_segments))
    }

    fn validate(size: Vector2<f64>, segments: [u32; 2], sub_segments: [u32; 2]) -> Result<()> {
        if !(size.x > 0.0 && size.y > 0.0) {
            return Err(Error::invalid(Self::NAME, format!("size must be positive, got {:?}", size)));
        }

        let mut total_vertices = 0u64;
        for (axis, family) in Self::plan(size, segments, sub_segments).iter().enumerate() {
            if family.is_empty() {
                continue;
            }

            let subdivisions = match family.subdivisions {
                Some(0) => {
                    return Err(Error::invalid(
                        Self::NAME,
                        format!("lines along axis {} would have zero segments", axis),
                    ));
                }
                Some(n) => n,
                None => {
                    return Err(Error::invalid(
                        Self::NAME,
                        format!("segment count along axis {} overflows", axis),
                    ));
                }
            };
            total_vertices += (u64::from(subdivisions) + 1) * u64::from(family.replicas);
        }

        if total_vertices > u64::from(u32::max_value()) {
            return Err(Error::invalid(Self::NAME, "too many vertices for 32 bit indices"));
        }

        Ok(())
    }

    /// Parameters must have passed `validate`, which also bounds the total
    /// vertex count.
    fn assemble(size: Vector2<f64>, segments: [u32; 2], sub_segments: [u32; 2]) -> Self {
        let mut lines = Merge::new();
        for family in &Self::plan(size, segments, sub_segments) {
            if family.is_empty() {
                continue;
            }
            if let Some(subdivisions) = family.subdivisions {
                let line = LineShape::unchecked(family.start, family.end, subdivisions);
                let stride = subdivisions + 1;
                let repeat = Repeat::unchecked(line, family.replicas, family.delta, stride);
                lines.push_unchecked(repeat.into_any(), stride * family.replicas);
            }
        }

        Self { size, segments, sub_segments, lines }
    }

    fn plan(size: Vector2<f64>, segments: [u32; 2], sub_segments: [u32; 2]) -> [Family; 2] {
        let replicas = |cells: u32| if cells < 1 { 0 } else { cells.saturating_add(1) };
        let step = |extent: f64, cells: u32| 2.0 * extent / f64::from(cells.max(1));

        [
            Family {
                start: Point2::new(-size.x, -size.y),
                end: Point2::new(size.x, -size.y),
                cells: segments[0],
                subdivisions: segments[0].checked_mul(sub_segments[0]),
                replicas: replicas(segments[1]),
                delta: Vector2::new(0.0, step(size.y, segments[1])),
            },
            Family {
                start: Point2::new(-size.x, -size.y),
                end: Point2::new(-size.x, size.y),
                cells: segments[1],
                subdivisions: segments[1].checked_mul(sub_segments[1]),
                replicas: replicas(segments[0]),
                delta: Vector2::new(step(size.x, segments[0]), 0.0),
            },
        ]
    }

    pub fn size(&self) -> Vector2<f64> {
        self.size
    }

    pub fn segments(&self) -> [u32; 2] {
        self.segments
    }

    pub fn sub_segments(&self) -> [u32; 2] {
        self.sub_segments
    }

    /// The non-empty line families, horizontal first.
    pub fn families(&self) -> &[AnyGeometry<ShapeVertex, Edge>] {
        self.lines.parts()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::assemble(Vector2::new(1.0, 1.0), [4, 4], [2, 2])
    }
}

impl Geometry for Grid {
    type Vertex = ShapeVertex;
    type Element = Edge;
    type Vertices = MergeVertices<ShapeVertex>;
    type Elements = MergeElements<Edge>;

    fn vertices(&self) -> Self::Vertices {
        self.lines.vertices()
    }

    fn elements(&self) -> Self::Elements {
        self.lines.elements()
    }

    fn vertex_count(&self) -> usize {
        self.lines.vertex_count()
    }

    fn element_count(&self) -> usize {
        self.lines.element_count()
    }
}


#[cfg(test)]
mod tests {
    use crate::{gen::Generator, materialize::ShapeBuffers};
    use super::*;

    #[test]
    fn fully_degenerate() {
        let grid = Grid::new(Vector2::new(1.0, 1.0), [0, 0], [1, 1]).unwrap();

        assert!(grid.families().is_empty());
        assert_eq!(grid.vertex_count(), 0);
        assert_eq!(grid.element_count(), 0);
        assert!(grid.vertices().done());
        assert!(grid.elements().generate().unwrap_err().is_protocol_violation());
    }

    #[test]
    fn single_cell() {
        let grid = Grid::new(Vector2::new(1.0, 1.0), [1, 1], [1, 1]).unwrap();

        let families = grid.families();
        assert_eq!(families.len(), 2);
        for family in families {
            // Two lines with two vertices each.
            assert_eq!(family.vertex_count(), 4);
            assert_eq!(family.element_count(), 2);
        }

        let positions = grid.vertices().drain().map(|v| v.position).collect::<Vec<_>>();
        assert_eq!(positions, vec![
            Point2::new(-1.0, -1.0),
            Point2::new(1.0, -1.0),
            Point2::new(-1.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(-1.0, -1.0),
            Point2::new(-1.0, 1.0),
            Point2::new(1.0, -1.0),
            Point2::new(1.0, 1.0),
        ]);

        let edges = grid.elements().drain().collect::<Vec<_>>();
        assert_eq!(edges, vec![
            Edge::new(0, 1),
            Edge::new(2, 3),
            Edge::new(4, 5),
            Edge::new(6, 7),
        ]);
    }

    #[test]
    fn default_grid() {
        let grid = Grid::default();

        // Five lines per family, each split into eight edges.
        assert_eq!(grid.vertex_count(), 2 * 5 * 9);
        assert_eq!(grid.element_count(), 2 * 5 * 8);
        assert_eq!(grid.vertices().drain().count(), 90);
    }

    #[test]
    fn zero_cells_along_one_axis() {
        for &segments in &[[2, 0], [0, 2]] {
            let grid = Grid::new(Vector2::new(2.0, 1.0), segments, [1, 3]).unwrap();
            assert!(grid.families().is_empty());
            assert_eq!(grid.vertex_count(), 0);
            assert!(grid.elements().done());
        }
    }

    #[test]
    fn uneven_axes() {
        let grid = Grid::new(Vector2::new(2.0, 1.0), [2, 1], [1, 3]).unwrap();
        let families = grid.families();

        // Two horizontal lines with two edges each.
        assert_eq!(families[0].vertex_count(), 2 * 3);
        assert_eq!(families[0].element_count(), 2 * 2);

        // Three vertical lines with three edges each.
        assert_eq!(families[1].vertex_count(), 3 * 4);
        assert_eq!(families[1].element_count(), 3 * 3);

        let xs = families[1].vertices().drain().map(|v| v.position.x).collect::<Vec<_>>();
        assert_eq!(&xs[..4], &[-2.0; 4]);
        assert_eq!(&xs[4..8], &[0.0; 4]);
        assert_eq!(&xs[8..], &[2.0; 4]);
    }

    #[test]
    fn invalid_arguments() {
        let size = Vector2::new(1.0, 1.0);
        assert!(Grid::new(Vector2::new(0.0, 1.0), [1, 1], [1, 1]).unwrap_err().is_invalid_argument());
        assert!(Grid::new(size, [1, 1], [0, 1]).unwrap_err().is_invalid_argument());
        assert!(Grid::new(size, [u32::max_value(), 1], [2, 1]).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn vertex_count_limit() {
        let size = Vector2::new(1.0, 1.0);

        // Each family alone fits into 32 bit indices, both together don't.
        assert!(Grid::new(size, [1, 65534], [65535, 1]).unwrap_err().is_invalid_argument());

        let grid = Grid::new(size, [1, 65533], [65535, 1]).unwrap();
        assert_eq!(grid.vertex_count(), 4_294_967_292);
        assert_eq!(grid.element_count(), 4_294_901_756);
        assert_eq!(grid.families()[0].vertex_count(), 65536 * 65534);
    }

    #[test]
    fn default_matches_constructor() {
        let a = ShapeBuffers::from_geometry(&Grid::default()).unwrap();
        let b = ShapeBuffers::from_geometry(&Grid::new(Vector2::new(1.0, 1.0), [4, 4], [2, 2]).unwrap())
            .unwrap();
        assert_eq!(a, b);
    }
}
