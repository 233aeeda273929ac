use failure::{Error, ResultExt};
use geogen::{
    prelude::*,
    combinators::{Repeat, Subdivide},
    gen::AnyGeometry,
    io::obj::{self, ObjElement, ObjVertex},
    materialize::Buffers,
    topology::Edge,
};

use crate::{
    args::GlobalArgs,
    ui::fmt_with_thousand_sep,
};


/// Splits all edges in half if `subdivide` is set.
pub fn subdivided<V: Vertex>(
    geometry: AnyGeometry<V, Edge>,
    subdivide: bool,
) -> Result<AnyGeometry<V, Edge>, Error> {
    if !subdivide {
        return Ok(geometry);
    }

    let sub = Subdivide::new(&geometry).context("failed to subdivide geometry")?;
    Ok(sub.into_any())
}

/// Repeats the geometry as requested, materializes it and writes the result
/// as OBJ to the output file or stdout.
///
/// When writing to stdout, nothing else is printed.
pub fn emit<V, E>(
    global: &GlobalArgs,
    name: &str,
    geometry: AnyGeometry<V, E>,
    delta: V::Offset,
) -> Result<(), Error>
where
    V: Vertex + ObjVertex,
    E: Element + ObjElement,
{
    let repeated = Repeat::new(geometry, global.repeat, delta)
        .context("invalid '--repeat' for this geometry")?;
    tracing::debug!(
        name,
        copies = global.repeat,
        vertices = repeated.vertex_count(),
        elements = repeated.element_count(),
        "generating"
    );

    let path = match &global.output {
        None => {
            let buffers = Buffers::from_geometry(&repeated)?;
            buffers.check_indices()?;
            obj::Config::new()
                .with_object_name(name)
                .into_writer(&buffers)
                .write_to_stdout()?;
            return Ok(());
        }
        Some(path) => path,
    };

    let buffers = progress!(["Generating {}", name] => {
        Buffers::from_geometry(&repeated)
    })?;
    buffers.check_indices()?;

    progress!(["Writing '{}'", path] => {
        obj::Config::new()
            .with_object_name(name)
            .into_writer(&buffers)
            .write_to_file(path)
    }).context(format!("failed to write '{}'", path))?;

    info!(
        "Wrote {} vertices and {} elements to '{}'",
        fmt_with_thousand_sep(buffers.vertices.len() as u64),
        fmt_with_thousand_sep(buffers.elements.len() as u64),
        path,
    );

    Ok(())
}
