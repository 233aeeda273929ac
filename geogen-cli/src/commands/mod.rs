use failure::{bail, Error, ResultExt};
use geogen::{
    gen::{AnyGeometry, Geometry},
    primitives::{Grid, Helix, Knot, LinePath, Seam, TriangleMesh},
    topology::Edge,
    vertex::{PathVertex, ShapeVertex},
};

use crate::args::{Command, GlobalArgs};

mod emit;

use self::emit::{emit, subdivided};


/// Builds the geometry requested by `command` and writes it as OBJ.
pub fn run(global: &GlobalArgs, command: &Command) -> Result<(), Error> {
    if global.repeat == 0 {
        warn!("'--repeat 0' was given: the output will not contain any geometry");
    }

    match command {
        Command::Line { args } => {
            let line = LinePath::new(args.from, args.to, args.segments)
                .context("invalid line parameters")?;
            path(global, "line", line.into_any())
        }
        Command::Grid { args } => {
            let grid = Grid::new(args.size, args.segments, args.sub_segments)
                .context("invalid grid parameters")?;
            shape(global, "grid", grid.into_any())
        }
        Command::Knot { args } => {
            let seam = if args.shared_seam { Seam::Shared } else { Seam::Duplicate };
            let knot = Knot::with_seam(args.p, args.q, args.segments, seam)
                .context("invalid knot parameters")?;
            path(global, "knot", knot.into_any())
        }
        Command::Helix { args } => {
            let helix = Helix::new(args.radius, args.size, args.start, args.sweep, args.segments)
                .context("invalid helix parameters")?;
            path(global, "helix", helix.into_any())
        }
        Command::Triangle { args } => {
            if global.subdivide {
                bail!("'--subdivide' only works for shapes and paths, not for triangle meshes");
            }

            let mesh = TriangleMesh::regular(args.radius, args.segments)
                .context("invalid triangle parameters")?;
            emit(global, "triangle", mesh.into_any(), global.delta)
        }
    }
}

fn path(global: &GlobalArgs, name: &str, geometry: AnyGeometry<PathVertex, Edge>) -> Result<(), Error> {
    let geometry = subdivided(geometry, global.subdivide)?;
    emit(global, name, geometry, global.delta)
}

fn shape(global: &GlobalArgs, name: &str, geometry: AnyGeometry<ShapeVertex, Edge>) -> Result<(), Error> {
    if global.delta.z != 0.0 {
        bail!("'--delta' for a 2D shape must have a z component of 0, got {}", global.delta.z);
    }

    let geometry = subdivided(geometry, global.subdivide)?;
    emit(global, name, geometry, global.delta.truncate())
}
