use std::{fmt, io};

use failure::Fail;


/// The generator protocol operation that was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Generate,
    Next,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operation::Generate => "generate()",
            Operation::Next => "next()",
        }.fmt(f)
    }
}

/// Everything that can go wrong while building or draining a generator.
///
/// None of these are transient: generation is pure, so retrying the same
/// call with the same parameters fails the same way.
#[derive(Debug, Fail)]
pub enum Error {
    /// The parameters passed to a constructor do not describe a well defined
    /// stream (zero segments, coincident end points, ...).
    #[fail(display = "invalid argument for {}: {}", generator, reason)]
    InvalidArgument {
        generator: &'static str,
        reason: String,
    },

    /// `generate()` or `next()` was called on a generator that is already
    /// `done()`. This is always a bug in the calling code.
    #[fail(display = "{} called on exhausted {} generator", operation, generator)]
    ProtocolViolation {
        generator: &'static str,
        operation: Operation,
    },

    /// An edge or triangle references a vertex that was never produced.
    #[fail(display = "vertex index {} out of range (only {} vertices)", index, vertex_count)]
    IndexOutOfRange {
        index: u32,
        vertex_count: usize,
    },

    #[fail(display = "IO error: {}", _0)]
    Io(io::Error),
}

impl Error {
    pub(crate) fn invalid(generator: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            generator,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a `ProtocolViolation`.
    pub fn is_protocol_violation(&self) -> bool {
        match self {
            Error::ProtocolViolation { .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if this is an `InvalidArgument` error.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Error::InvalidArgument { .. } => true,
            _ => false,
        }
    }
}

impl From<io::Error> for Error {
    fn from(src: io::Error) -> Self {
        Error::Io(src)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
