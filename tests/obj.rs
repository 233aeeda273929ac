//! Writing generated geometry as OBJ.

use std::fs;

use cgmath::Vector2;

use geogen::{
    prelude::*,
    combinators::Subdivide,
    io::obj::{Config, ObjWriter},
    materialize::{MeshBuffers, PathBuffers, ShapeBuffers},
    primitives::{Grid, Knot, TriangleMesh},
};


fn count(s: &str, prefix: &str) -> usize {
    s.lines().filter(|l| l.starts_with(prefix)).count()
}

#[test]
fn mesh_line_counts() {
    let mesh = TriangleMesh::regular(1.0, 5).unwrap();
    let buffers = MeshBuffers::from_geometry(&mesh).unwrap();
    let out = String::from_utf8(ObjWriter::new(&buffers).write_to_memory().unwrap()).unwrap();

    assert_eq!(count(&out, "v "), 21);
    assert_eq!(count(&out, "vn "), 21);
    assert_eq!(count(&out, "vt "), 21);
    assert_eq!(count(&out, "f "), 25);
    assert_eq!(count(&out, "l "), 0);
    assert!(out.starts_with("# 21 vertices, 25 elements\n"));
}

#[test]
fn path_line_counts() {
    let knot = Subdivide::new(&Knot::new(2, 3, 16).unwrap()).unwrap();
    let buffers = PathBuffers::from_geometry(&knot).unwrap();
    let out = Config::new()
        .with_object_name("knot")
        .into_writer(&buffers)
        .write_to_memory()
        .unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.lines().any(|l| l == "o knot"));
    assert_eq!(count(&out, "v "), 17 + 16);
    assert_eq!(count(&out, "vn "), 0);
    assert_eq!(count(&out, "l "), 32);
}

#[test]
fn write_to_file() {
    let grid = Grid::new(Vector2::new(1.0, 1.0), [2, 2], [1, 1]).unwrap();
    let buffers = ShapeBuffers::from_geometry(&grid).unwrap();

    let path = std::env::temp_dir().join(format!("geogen-grid-{}.obj", std::process::id()));
    ObjWriter::new(&buffers).write_to_file(&path).unwrap();
    let out = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(count(&out, "v "), 18);
    assert_eq!(count(&out, "l "), 12);
    for line in out.lines().filter(|l| l.starts_with("v ")) {
        assert!(line.ends_with(" 0"));
    }
}
