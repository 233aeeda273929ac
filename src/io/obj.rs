//! Wavefront OBJ output.
//!
//! Meshes are written as `v`, `vn`, `vt` and `f` lines; shapes and paths as
//! `v` and `l` lines. 2D positions get `z = 0`. Indices in OBJ files start at
//! `1`, so every index is shifted by one.

use std::io::{self, Write};

use tracing::debug;

use super::GeometryWriter;
use crate::{
    error::Error,
    materialize::Buffers,
    topology::{Edge, Triangle},
    vertex::{MeshVertex, PathVertex, ShapeVertex},
};


/// The object name used when the user didn't specify one.
const DEFAULT_OBJECT_NAME: &str = "geometry";

/// Vertex types that can be written to an OBJ file.
pub trait ObjVertex {
    fn position(&self) -> [f64; 3];

    fn normal(&self) -> Option<[f64; 3]> {
        None
    }

    fn tex_coord(&self) -> Option<[f64; 2]> {
        None
    }
}

impl ObjVertex for MeshVertex {
    fn position(&self) -> [f64; 3] {
        self.position.into()
    }

    fn normal(&self) -> Option<[f64; 3]> {
        Some(self.normal.into())
    }

    fn tex_coord(&self) -> Option<[f64; 2]> {
        Some(self.tex_coord.into())
    }
}

impl ObjVertex for ShapeVertex {
    fn position(&self) -> [f64; 3] {
        [self.position.x, self.position.y, 0.0]
    }
}

impl ObjVertex for PathVertex {
    fn position(&self) -> [f64; 3] {
        self.position.into()
    }
}

/// Element types that can be written to an OBJ file.
pub trait ObjElement {
    /// Writes one complete line describing this element. `normals` and
    /// `tex_coords` tell whether `vn` and `vt` lines were written.
    fn write_obj(&self, w: &mut impl Write, normals: bool, tex_coords: bool) -> io::Result<()>;
}

impl ObjElement for Edge {
    fn write_obj(&self, w: &mut impl Write, _: bool, _: bool) -> io::Result<()> {
        let [a, b] = self.vertices;
        writeln!(w, "l {} {}", a + 1, b + 1)
    }
}

impl ObjElement for Triangle {
    fn write_obj(&self, w: &mut impl Write, normals: bool, tex_coords: bool) -> io::Result<()> {
        w.write_all(b"f")?;
        for &i in &self.vertices {
            let i = i + 1;
            match (tex_coords, normals) {
                (true, true) => write!(w, " {}/{}/{}", i, i, i)?,
                (false, true) => write!(w, " {}//{}", i, i)?,
                (true, false) => write!(w, " {}/{}", i, i)?,
                (false, false) => write!(w, " {}", i)?,
            }
        }
        w.write_all(b"\n")
    }
}


/// Used to configure and create an [`ObjWriter`].
#[derive(Clone, Debug)]
pub struct Config {
    object_name: String,
    header: bool,
}

impl Config {
    pub fn new() -> Self {
        Self {
            object_name: DEFAULT_OBJECT_NAME.into(),
            header: true,
        }
    }

    /// Sets the name written in the `o` line.
    ///
    /// The name must not contain line breaks (otherwise the function panics).
    pub fn with_object_name(self, name: impl Into<String>) -> Self {
        let object_name = name.into();
        assert!(!object_name.contains('\n'));

        Self {
            object_name,
            .. self
        }
    }

    /// Whether to start the file with a comment containing element counts.
    /// Enabled by default.
    pub fn with_header(self, header: bool) -> Self {
        Self { header, .. self }
    }

    /// Creates an [`ObjWriter`] with `self` as config.
    pub fn into_writer<V, E>(self, buffers: &Buffers<V, E>) -> ObjWriter<'_, V, E> {
        ObjWriter { config: self, buffers }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes [`Buffers`] as Wavefront OBJ.
#[derive(Debug)]
pub struct ObjWriter<'a, V, E> {
    config: Config,
    buffers: &'a Buffers<V, E>,
}

impl<'a, V, E> ObjWriter<'a, V, E> {
    /// Creates a writer with the default configuration.
    pub fn new(buffers: &'a Buffers<V, E>) -> Self {
        Config::new().into_writer(buffers)
    }
}

impl<V: ObjVertex, E: ObjElement> GeometryWriter for ObjWriter<'_, V, E> {
    type Error = Error;

    fn write_to(&self, mut w: impl Write) -> Result<(), Self::Error> {
        let Buffers { vertices, elements } = self.buffers;

        if self.config.header {
            writeln!(w, "# {} vertices, {} elements", vertices.len(), elements.len())?;
        }
        writeln!(w, "o {}", self.config.object_name)?;

        for v in vertices {
            let [x, y, z] = v.position();
            writeln!(w, "v {} {} {}", x, y, z)?;
        }

        let normals = vertices.first().map_or(false, |v| v.normal().is_some());
        if normals {
            for n in vertices.iter().filter_map(|v| v.normal()) {
                writeln!(w, "vn {} {} {}", n[0], n[1], n[2])?;
            }
        }

        let tex_coords = vertices.first().map_or(false, |v| v.tex_coord().is_some());
        if tex_coords {
            for t in vertices.iter().filter_map(|v| v.tex_coord()) {
                writeln!(w, "vt {} {}", t[0], t[1])?;
            }
        }

        for e in elements {
            e.write_obj(&mut w, normals, tex_coords)?;
        }

        debug!(
            object = %self.config.object_name,
            vertices = vertices.len(),
            elements = elements.len(),
            "wrote OBJ"
        );
        Ok(())
    }
}
