//! The canonical output buffer.

/// An append-only byte buffer receiving canonical output.
///
/// Canonicalization always produces a complete buffer, valid or not, so the
/// buffer is kept separate from the validity flag (see
/// [`Canonicalized`](crate::Canonicalized)). Entry points pre-size the
/// buffer to the input length; worst-case growth is bounded by a small
/// constant factor (three output bytes per input byte for percent-encoding).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Output {
    buf: Vec<u8>,
}

impl Output {
    /// Creates an empty output.
    #[must_use]
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates an empty output with room for `cap` bytes.
    #[must_use]
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buf: Vec::with_capacity(cap),
        }
    }

    /// Appends one byte.
    #[inline]
    pub fn push(&mut self, b: u8) {
        self.buf.push(b);
    }

    /// Appends a byte slice.
    #[inline]
    pub fn append(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the bytes written so far as a string slice, replacing any
    /// invalid sequence. Canonical output is ASCII, so this is lossless
    /// for anything this crate produces.
    #[must_use]
    pub fn as_str_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.buf)
    }

    /// Consumes the output, returning the underlying bytes.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }

    /// Returns the byte at `i`.
    #[inline]
    pub(crate) fn at(&self, i: usize) -> u8 {
        self.buf[i]
    }

    /// Rewinds the buffer to `len` bytes. Used by the host canonicalizer to
    /// replace a scanned host with its IP form and by the dot-segment
    /// remover to pop a path segment.
    #[inline]
    pub(crate) fn truncate(&mut self, len: usize) {
        self.buf.truncate(len);
    }
}

impl std::fmt::Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_str_lossy())
    }
}
