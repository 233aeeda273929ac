//! Writing materialized geometry to files.
//!
//! Currently, the only supported format is Wavefront OBJ (ASCII), see
//! [`obj`].

use std::{
    fs::File,
    io::{self, BufWriter, Cursor, Write},
    path::Path,
};

pub mod obj;


/// Types that can serialize geometry they hold (or borrow).
///
/// The main method of this trait is `write_to` which writes to a given
/// `io::Write` destination. The provided methods are shortcuts for writing to
/// a file, to stdout and to memory.
pub trait GeometryWriter {
    type Error: From<io::Error>;

    /// Writes the geometry into the given `Write` instance.
    fn write_to(&self, writer: impl Write) -> Result<(), Self::Error>;

    /// Writes the geometry to the file given by the filename. Overwrites the
    /// file if it already exists.
    fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), Self::Error> {
        self.write_to(BufWriter::new(File::create(path)?))
    }

    /// Writes the geometry to stdout. Locks stdout for the time the geometry
    /// is being written.
    fn write_to_stdout(&self) -> Result<(), Self::Error> {
        let stdout = io::stdout();
        let lock = stdout.lock();
        self.write_to(lock)
    }

    /// Writes the geometry into a `Vec<u8>` which is returned on success.
    fn write_to_memory(&self) -> Result<Vec<u8>, Self::Error> {
        let mut w = Cursor::new(Vec::new());
        self.write_to(&mut w)?;
        Ok(w.into_inner())
    }
}
