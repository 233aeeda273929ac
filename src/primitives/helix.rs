use cgmath::{
    prelude::*,
    Point3, Vector3,
};
use tracing::debug;

use super::{check_segments, Parametric, Seam};
use crate::{
    error::{Error, Result},
    math::TAU,
    vertex::PathVertex,
};


/// A helix around the z axis.
///
/// The path starts at angle `start` and height `-size`, turns by `sweep`
/// radians and ends at height `size`. Normals point towards the z axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Helix {
    radius: f64,
    size: f64,
    start: f64,
    sweep: f64,
    segments: u32,
}

impl Helix {
    pub fn new(radius: f64, size: f64, start: f64, sweep: f64, segments: u32) -> Result<Self> {
        let out = Self { radius, size, start, sweep, segments };
        out.validate()?;

        debug!(radius, size, start, sweep, segments, "created helix");
        Ok(out)
    }

    fn validate(&self) -> Result<()> {
        check_segments(Self::NAME, self.segments, Seam::Duplicate)?;
        if !(self.radius > 0.0) {
            return Err(Error::invalid(Self::NAME, format!("radius must be positive, got {}", self.radius)));
        }
        if self.sweep == 0.0 && self.size == 0.0 {
            return Err(Error::invalid(Self::NAME, "zero sweep and zero size collapse to a point"));
        }

        Ok(())
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn size(&self) -> f64 {
        self.size
    }
}

impl Default for Helix {
    fn default() -> Self {
        Self {
            radius: 1.0,
            size: 1.0,
            start: 0.0,
            sweep: TAU,
            segments: 32,
        }
    }
}

impl Parametric for Helix {
    type Vertex = PathVertex;
    const NAME: &'static str = "helix";

    fn segments(&self) -> u32 {
        self.segments
    }

    fn sample(&self, t: f64) -> PathVertex {
        let angle = self.start + t * self.sweep;
        let (sin, cos) = angle.sin_cos();

        // Derivative with respect to `t`.
        let tangent = Vector3::new(
            -self.radius * self.sweep * sin,
            self.radius * self.sweep * cos,
            2.0 * self.size,
        );

        PathVertex {
            position: Point3::new(self.radius * cos, self.radius * sin, self.size * (2.0 * t - 1.0)),
            tangent: tangent.normalize(),
            normal: Vector3::new(-cos, -sin, 0.0),
            tex_coord: t,
        }
    }
}
