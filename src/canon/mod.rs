//! Component and URL canonicalization.
//!
//! Each component canonicalizer consumes a `(buffer, range)` pair, appends
//! canonical bytes to the output, and reports the produced range together
//! with a validity flag. The URL orchestrators in [`url`] chain them in
//! wire order and emit the separators. Keeping sources per-component (not
//! one buffer for the whole URL) lets the replacement engine feed each
//! component from a different buffer.

pub(crate) mod authority;
pub(crate) mod path;
pub(crate) mod query;
pub(crate) mod scheme;
pub(crate) mod url;

use crate::{Component, Output, Parsed};

/// Converts query text from UTF-8 to an arbitrary output encoding before
/// percent-escaping.
///
/// Canonicalization entry points take an optional converter; when present
/// it runs over the raw query range and the produced bytes are then
/// escaped with the query-safe table. Everything else in a URL is always
/// UTF-8.
pub trait CharsetConverter {
    /// Converts `input` into the target encoding, appending to `output`.
    fn convert(&self, input: &[u8], output: &mut Output);
}

/// One component's input: the buffer it lives in plus its range.
#[derive(Clone, Copy)]
pub(crate) struct Piece<'a> {
    pub(crate) buf: &'a [u8],
    pub(crate) comp: Component,
}

impl<'a> Piece<'a> {
    pub(crate) fn new(buf: &'a [u8], comp: Component) -> Self {
        Self { buf, comp }
    }
}

/// Per-component input sources for one canonicalization run. A plain
/// canonicalization points every piece at the same parsed spec; the
/// replacement engine mixes base and override buffers.
#[derive(Clone, Copy)]
pub(crate) struct ComponentSource<'a> {
    pub(crate) scheme: Piece<'a>,
    pub(crate) username: Piece<'a>,
    pub(crate) password: Piece<'a>,
    pub(crate) host: Piece<'a>,
    pub(crate) port: Piece<'a>,
    pub(crate) path: Piece<'a>,
    pub(crate) query: Piece<'a>,
    pub(crate) ref_: Piece<'a>,
}

impl<'a> ComponentSource<'a> {
    pub(crate) fn from_parsed(spec: &'a [u8], parsed: &Parsed) -> Self {
        Self {
            scheme: Piece::new(spec, parsed.scheme),
            username: Piece::new(spec, parsed.username),
            password: Piece::new(spec, parsed.password),
            host: Piece::new(spec, parsed.host),
            port: Piece::new(spec, parsed.port),
            path: Piece::new(spec, parsed.path),
            query: Piece::new(spec, parsed.query),
            ref_: Piece::new(spec, parsed.ref_),
        }
    }
}
