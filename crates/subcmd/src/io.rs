//! Shared I/O handles.
//!
//! A [`Program`](crate::Program) and every subcommand it runs see the same
//! standard streams, so the handles are cheap clones of one shared stream.
//! Tests substitute a [`Buffer`] for any of them and read back what was
//! written.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Read, Write};
use std::rc::Rc;

/// A cloneable handle to an output stream.
#[derive(Clone)]
pub struct Writer {
    inner: Rc<RefCell<dyn Write>>,
}

impl Writer {
    /// Wraps any writer in a shared handle.
    pub fn new<W: Write + 'static>(w: W) -> Self {
        Self {
            inner: Rc::new(RefCell::new(w)),
        }
    }

    /// A handle to the process's standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// A handle to the process's standard error.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl Write for Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.borrow_mut().flush()
    }
}

impl From<Buffer> for Writer {
    fn from(buffer: Buffer) -> Self {
        Writer::new(buffer)
    }
}

impl fmt::Debug for Writer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writer").finish_non_exhaustive()
    }
}

/// A cloneable handle to an input stream.
#[derive(Clone)]
pub struct Reader {
    inner: Rc<RefCell<dyn Read>>,
}

impl Reader {
    /// Wraps any reader in a shared handle.
    pub fn new<R: Read + 'static>(r: R) -> Self {
        Self {
            inner: Rc::new(RefCell::new(r)),
        }
    }

    /// A handle to the process's standard input.
    pub fn stdin() -> Self {
        Self::new(io::stdin())
    }

    /// A reader over fixed content.
    pub fn from_string(content: impl Into<String>) -> Self {
        Self::new(io::Cursor::new(content.into().into_bytes()))
    }

    /// Reads everything that is left into a string.
    pub fn read_all(&self) -> io::Result<String> {
        let mut content = String::new();
        self.inner.borrow_mut().read_to_string(&mut content)?;
        Ok(content)
    }
}

impl Read for Reader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.borrow_mut().read(buf)
    }
}

impl fmt::Debug for Reader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader").finish_non_exhaustive()
    }
}

/// An in-memory output stream whose clones share one byte buffer.
#[derive(Debug, Clone, Default)]
pub struct Buffer {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl Buffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.bytes.borrow().is_empty()
    }

    /// Discards everything written so far.
    pub fn clear(&self) {
        self.bytes.borrow_mut().clear();
    }

    /// A [`Writer`] handle that appends to this buffer.
    pub fn writer(&self) -> Writer {
        Writer::from(self.clone())
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_clones_share_contents() {
        let buffer = Buffer::new();
        let mut w = buffer.writer();
        write!(w, "hello").unwrap();
        write!(w.clone(), " world").unwrap();
        assert_eq!(buffer.contents(), "hello world");
    }

    #[test]
    fn test_buffer_clear() {
        let buffer = Buffer::new();
        buffer.writer().write_all(b"x").unwrap();
        assert!(!buffer.is_empty());
        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_reader_from_string() {
        let reader = Reader::from_string("line one\nline two\n");
        assert_eq!(reader.read_all().unwrap(), "line one\nline two\n");
        // Clones share the read position.
        assert_eq!(reader.clone().read_all().unwrap(), "");
    }
}
