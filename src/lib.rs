pub mod records;

use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

pub use crate::records::{process_record, Address, Records, RECORD_SIZE};

type ByteString = Vec<u8>;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("trace file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("unable to read trace file {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

/// A trace file and, after [`TraceFile::load`], its full in-memory contents.
pub struct TraceFile {
    f: File,
    path: PathBuf,
    buffer: ByteString,
}

pub fn open(path: &Path) -> Result<TraceFile, TraceError> {
    let f = File::open(path).map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            TraceError::FileNotFound(path.to_path_buf())
        } else {
            TraceError::Io {
                path: path.to_path_buf(),
                source: err,
            }
        }
    })?;
    Ok(TraceFile {
        f,
        path: path.to_path_buf(),
        buffer: ByteString::new(),
    })
}

impl TraceFile {
    /// Reads the whole file into the trace buffer in one operation.
    pub fn load(&mut self) -> Result<(), TraceError> {
        let size = self.f.metadata().map_err(|err| self.read_error(err))?.len();
        self.buffer = ByteString::with_capacity(size as usize);
        self.f
            .read_to_end(&mut self.buffer)
            .map_err(|err| self.read_error(err))?;
        Ok(())
    }

    /// Lazy stream of address records over the loaded buffer.
    pub fn records(&self) -> Records<&[u8]> {
        Records::new(&self.buffer[..])
    }

    /// Bytes at the end of the buffer that do not form a full record.
    pub fn trailing_bytes(&self) -> usize {
        self.buffer.len() % RECORD_SIZE
    }

    /// Writes every record to `out` as one zero-padded 8-digit hex line.
    /// Returns the number of records written.
    pub fn decode_to<W: Write>(&self, out: W) -> io::Result<u64> {
        let mut out = BufWriter::new(out);
        let mut written = 0;
        for record in self.records() {
            writeln!(out, "{}", record?)?;
            written += 1;
        }
        out.flush()?;
        Ok(written)
    }

    fn read_error(&self, err: io::Error) -> TraceError {
        TraceError::Io {
            path: self.path.clone(),
            source: err,
        }
    }
}
