//! Defines `Args` which is used to parse command line arguments.

use std::str::FromStr;

use cgmath::{Point3, Vector2, Vector3};
use structopt::StructOpt;


#[derive(StructOpt, Debug)]
#[structopt(raw(setting = "structopt::clap::AppSettings::VersionlessSubcommands"))]
pub struct Args {
    #[structopt(flatten)]
    pub global: GlobalArgs,

    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(StructOpt, Debug)]
pub struct GlobalArgs {
    /// How many copies of the geometry to generate.
    #[structopt(long = "--repeat", default_value = "1")]
    pub repeat: u32,

    /// Offset between two consecutive copies (see `--repeat`), given as
    /// 'x,y,z'. For 2D shapes, the z component must be 0.
    #[structopt(
        long = "--delta",
        default_value = "1,0,0",
        parse(try_from_str = "parse_vector3"),
    )]
    pub delta: Vector3<f64>,

    /// Split every edge in half before repeating. Not available for meshes.
    #[structopt(long = "--subdivide")]
    pub subdivide: bool,

    /// Path of the OBJ file to write. If not given, the OBJ data is written to
    /// stdout and no other output is printed.
    #[structopt(short = "-o", long = "--output")]
    pub output: Option<String>,

    /// Filter for log messages, e.g. 'debug' or 'geogen=trace'.
    #[structopt(long = "--log", default_value = "warn")]
    pub log: String,
}

#[derive(StructOpt, Debug)]
pub enum Command {
    /// A straight 3D line.
    #[structopt(name = "line")]
    Line {
        #[structopt(flatten)]
        args: LineArgs,
    },

    /// A 2D wireframe grid.
    #[structopt(name = "grid")]
    Grid {
        #[structopt(flatten)]
        args: GridArgs,
    },

    /// A closed (p, q) torus knot path.
    #[structopt(name = "knot")]
    Knot {
        #[structopt(flatten)]
        args: KnotArgs,
    },

    /// A helix around the z axis.
    #[structopt(name = "helix")]
    Helix {
        #[structopt(flatten)]
        args: HelixArgs,
    },

    /// A tessellated triangle mesh.
    #[structopt(name = "triangle")]
    Triangle {
        #[structopt(flatten)]
        args: TriangleArgs,
    },
}

#[derive(StructOpt, Debug)]
pub struct LineArgs {
    /// Start point as 'x,y,z'.
    #[structopt(long = "--from", default_value = "0,0,-1", parse(try_from_str = "parse_point3"))]
    pub from: Point3<f64>,

    /// End point as 'x,y,z'.
    #[structopt(long = "--to", default_value = "0,0,1", parse(try_from_str = "parse_point3"))]
    pub to: Point3<f64>,

    #[structopt(short = "-s", long = "--segments", default_value = "8")]
    pub segments: u32,
}

#[derive(StructOpt, Debug)]
pub struct GridArgs {
    /// Half of the extent along x and y, as 'x,y'.
    #[structopt(long = "--size", default_value = "1,1", parse(try_from_str = "parse_vector2"))]
    pub size: Vector2<f64>,

    /// Number of cells along x and y, as 'x,y'.
    #[structopt(short = "-s", long = "--segments", default_value = "4,4", parse(try_from_str = "parse_pair"))]
    pub segments: [u32; 2],

    /// Number of edges per cell side along x and y, as 'x,y'.
    #[structopt(long = "--sub-segments", default_value = "2,2", parse(try_from_str = "parse_pair"))]
    pub sub_segments: [u32; 2],
}

#[derive(StructOpt, Debug)]
pub struct KnotArgs {
    #[structopt(short = "-p", default_value = "2", raw(allow_hyphen_values = "true"))]
    pub p: i32,

    #[structopt(short = "-q", default_value = "3", raw(allow_hyphen_values = "true"))]
    pub q: i32,

    #[structopt(short = "-s", long = "--segments", default_value = "96")]
    pub segments: u32,

    /// Don't emit the last vertex (which sits on top of the first one) and
    /// connect the last edge back to the first vertex instead.
    #[structopt(long = "--shared-seam")]
    pub shared_seam: bool,
}

#[derive(StructOpt, Debug)]
pub struct HelixArgs {
    #[structopt(short = "-r", long = "--radius", default_value = "1")]
    pub radius: f64,

    /// Half of the height.
    #[structopt(long = "--size", default_value = "1")]
    pub size: f64,

    /// Start angle in radians.
    #[structopt(long = "--start", default_value = "0", raw(allow_hyphen_values = "true"))]
    pub start: f64,

    /// Swept angle in radians.
    #[structopt(long = "--sweep", default_value = "6.283185307179586", raw(allow_hyphen_values = "true"))]
    pub sweep: f64,

    #[structopt(short = "-s", long = "--segments", default_value = "32")]
    pub segments: u32,
}

#[derive(StructOpt, Debug)]
pub struct TriangleArgs {
    /// Distance of the corners from the center.
    #[structopt(short = "-r", long = "--radius", default_value = "1")]
    pub radius: f64,

    #[structopt(short = "-s", long = "--segments", default_value = "4")]
    pub segments: u32,
}


/// Parses `N` comma separated values.
fn parse_list<T: FromStr>(src: &str, n: usize) -> Result<Vec<T>, String> {
    let values = src.split(',')
        .map(|part| part.trim().parse::<T>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| format!("'{}' is not a valid list of numbers", src))?;

    if values.len() != n {
        return Err(format!("expected {} comma separated values, got '{}'", n, src));
    }

    Ok(values)
}

fn parse_vector3(src: &str) -> Result<Vector3<f64>, String> {
    let v = parse_list::<f64>(src, 3)?;
    Ok(Vector3::new(v[0], v[1], v[2]))
}

fn parse_point3(src: &str) -> Result<Point3<f64>, String> {
    let v = parse_list::<f64>(src, 3)?;
    Ok(Point3::new(v[0], v[1], v[2]))
}

fn parse_vector2(src: &str) -> Result<Vector2<f64>, String> {
    let v = parse_list::<f64>(src, 2)?;
    Ok(Vector2::new(v[0], v[1]))
}

fn parse_pair(src: &str) -> Result<[u32; 2], String> {
    let v = parse_list::<u32>(src, 2)?;
    Ok([v[0], v[1]])
}
