use std::io::{self, Read};

use nix::unistd;

use tracing::trace;

/// Capacity of the first allocation. Later growth doubles it.
pub const INITIAL_CAPACITY: usize = 1024;

/// Reusable line buffer.
///
/// The backing vector is always exactly `capacity` bytes long; `len` counts
/// the bytes that belong to the current line. Once allocated, `len < capacity`
/// holds so a terminator byte always fits after the content.
#[derive(Debug, Default)]
pub struct InputLine {
    buf: Vec<u8>,
    len: usize,
}

impl InputLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    fn clear(&mut self) {
        self.len = 0;
    }

    // Make room for one more byte plus the terminator.
    fn reserve_next(&mut self) {
        if self.buf.is_empty() {
            self.buf.resize(INITIAL_CAPACITY, 0);
        }
        while self.len + 2 > self.buf.len() {
            let grown = self.buf.len() * 2;
            trace!(from = self.buf.len(), to = grown, "growing line buffer");
            self.buf.resize(grown, 0);
        }
    }

    fn push(&mut self, byte: u8) {
        self.reserve_next();
        self.buf[self.len] = byte;
        self.len += 1;
    }

    fn terminate(&mut self) {
        self.reserve_next();
        self.buf[self.len] = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    Line,
    Eof,
}

/// Pulls one line at a time out of a byte stream.
///
/// Reads a single byte per call to the underlying reader so nothing past the
/// newline is consumed; a child that inherits the same stream sees the rest.
pub struct LineReader<R> {
    inner: R,
}

impl<R: Read> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Fills `line` with the next line, without its `\n`.
    ///
    /// A final line with no newline is still returned as `Line`; `Eof` only
    /// comes back when the stream ends before any byte was read.
    pub fn read_line(&mut self, line: &mut InputLine) -> io::Result<ReadOutcome> {
        line.clear();
        let mut byte = [0u8; 1];

        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => {
                    if line.is_empty() {
                        return Ok(ReadOutcome::Eof);
                    }
                    break;
                }
                Ok(_) => {
                    if byte[0] == b'\n' {
                        break;
                    }
                    line.push(byte[0]);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        line.terminate();
        Ok(ReadOutcome::Line)
    }
}

/// Unbuffered reader over file descriptor 0.
///
/// `std::io::stdin()` keeps its own buffer, which would swallow input meant
/// for the commands the shell starts.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinReader;

impl Read for StdinReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        unistd::read(io::stdin(), buf).map_err(io::Error::from)
    }
}
