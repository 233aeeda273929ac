//! End to end tests: building composite geometries and draining them.

use cgmath::{Point3, Vector2, Vector3};

use geogen::{
    prelude::*,
    combinators::{Merge, Repeat, Subdivide, Translate},
    gen::{AnyGeometry, EmptyPath},
    materialize::{PathBuffers, ShapeBuffers},
    primitives::{Grid, Helix, Knot, LinePath, Seam},
    topology::Edge,
    vertex::PathVertex,
};


fn check<G>(geometry: &G)
where
    G: Geometry,
{
    let vertices = geometry.vertices();
    let elements = geometry.elements();
    assert_eq!(vertices.remaining(), geometry.vertex_count());
    assert_eq!(elements.remaining(), geometry.element_count());

    let vertices = vertices.drain().collect::<Vec<_>>();
    let elements = elements.drain().collect::<Vec<_>>();
    assert_eq!(vertices.len(), geometry.vertex_count());
    assert_eq!(elements.len(), geometry.element_count());

    for e in &elements {
        for &i in e.indices() {
            assert!((i as usize) < vertices.len(), "{:?} out of range", e);
        }
    }
}

#[test]
fn repeat_offsets_indices() {
    let line = LinePath::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), 4).unwrap();
    let repeat = Repeat::new(line, 3, Vector3::new(0.0, 1.0, 0.0)).unwrap();
    check(&repeat);

    let edges = repeat.elements().drain().collect::<Vec<_>>();
    let copy0 = &edges[0..4];
    let copy2 = &edges[8..12];
    for (a, b) in copy0.iter().zip(copy2) {
        assert_eq!(*b, *a + 10);
    }
}

#[test]
fn deeply_nested() {
    let knot = Knot::with_seam(3, 2, 40, Seam::Shared).unwrap();
    let helix = Helix::default();
    let line = LinePath::default();

    let row = Merge::<PathVertex, Edge>::new()
        .with(knot).unwrap()
        .with(Translate::new(helix, Vector3::new(3.0, 0.0, 0.0))).unwrap()
        .with(EmptyPath::new()).unwrap()
        .with(Subdivide::new(&line).unwrap()).unwrap();
    let rows = Repeat::new(row.clone(), 4, Vector3::new(0.0, 5.0, 0.0)).unwrap();

    check(&row);
    check(&rows);
    assert_eq!(rows.vertex_count(), 4 * (40 + 33 + 9 + 8));

    let buffers = PathBuffers::from_geometry(&rows).unwrap();
    buffers.check_indices().unwrap();

    // The last vertex is the midpoint of the last line edge in the last row.
    let last = buffers.vertices.last().unwrap();
    assert!(last.position.y > 14.0);
}

#[test]
fn grid_materializes() {
    let grid = Grid::new(Vector2::new(2.0, 1.0), [3, 2], [2, 1]).unwrap();
    check(&grid);

    let buffers = ShapeBuffers::from_geometry(&grid).unwrap();
    buffers.check_indices().unwrap();

    // 3 horizontal lines of 7 vertices, then 4 vertical lines of 3 vertices.
    assert_eq!(buffers.vertices.len(), 3 * 7 + 4 * 3);
    assert_eq!(buffers.elements.len(), 3 * 6 + 4 * 2);
    for v in &buffers.vertices {
        assert!(v.position.x.abs() <= 2.0 + 1e-12);
        assert!(v.position.y.abs() <= 1.0 + 1e-12);
    }
}

#[test]
fn type_erased_parts() {
    let parts: Vec<AnyGeometry<PathVertex, Edge>> = vec![
        Knot::default().into_any(),
        AnyGeometry::empty(),
        LinePath::default().into_any(),
    ];
    let merge = Merge::from_parts(parts).unwrap();
    check(&merge);
    assert_eq!(merge.vertex_count(), 97 + 9);
}

#[test]
fn abandoning_early_is_fine() {
    let knot = Knot::default();
    {
        let mut vertices = knot.vertices();
        vertices.next().unwrap();
        vertices.next().unwrap();
    }

    // A fresh generator starts from the beginning.
    let first = knot.vertices().generate().unwrap();
    assert_eq!(first.tex_coord, 0.0);
}

#[test]
fn generators_move_between_threads() {
    let grid = Grid::default();
    let handle = std::thread::spawn(move || grid.vertices().drain().count());
    assert_eq!(handle.join().unwrap(), 90);
}
