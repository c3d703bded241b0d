//! Query and fragment canonicalization.

use crate::{
    encoding::{append_escaped, append_utf8_escaped},
    table::{self, SHARED},
    Component, Output,
};

use super::{CharsetConverter, Piece};

fn append_raw_query(bytes: &[u8], out: &mut Output) {
    for &b in bytes {
        if SHARED.allows(b, table::QUERY) {
            out.push(b);
        } else {
            append_escaped(b, out);
        }
    }
}

/// Canonicalizes the query, appending `?` plus the escaped text. The raw
/// bytes run through the charset converter when one is given, otherwise
/// they pass through as UTF-8. Escape sequences are not validated here;
/// `'%'` is query-safe and copies verbatim. Never fails.
pub(crate) fn canonicalize_query(
    query: Piece<'_>,
    converter: Option<&dyn CharsetConverter>,
    out: &mut Output,
) -> Component {
    if !query.comp.is_present() {
        return Component::absent();
    }
    out.push(b'?');
    let begin = out.len();
    let raw = query.comp.slice_of(query.buf);
    match converter {
        Some(converter) => {
            let mut converted = Output::with_capacity(raw.len());
            converter.convert(raw, &mut converted);
            append_raw_query(converted.as_slice(), out);
        }
        None => append_raw_query(raw, out),
    }
    Component::from_range(begin as i32, out.len() as i32)
}

/// Canonicalizes the ref, appending `#` plus the text with only control
/// characters escaped. Malformed UTF-8 becomes the escaped replacement
/// character. Never fails; a broken ref does not invalidate a URL.
pub(crate) fn canonicalize_ref(ref_: Piece<'_>, out: &mut Output) -> Component {
    if !ref_.comp.is_present() {
        return Component::absent();
    }
    out.push(b'#');
    let begin = out.len();
    let spec = ref_.buf;
    let end = ref_.comp.end() as usize;
    let mut i = ref_.comp.begin as usize;
    while i < end {
        let b = spec[i];
        if b >= 0x80 {
            append_utf8_escaped(spec, &mut i, end, out);
        } else if b < 0x20 || b == 0x7f {
            append_escaped(b, out);
            i += 1;
        } else {
            out.push(b);
            i += 1;
        }
    }
    Component::from_range(begin as i32, out.len() as i32)
}

/// Copies a path-URL body (or its query/ref tail) with minimal escaping:
/// controls are escaped, UTF-8 is validated and re-escaped only on error.
/// Used by the path-URL orchestrator, which never resolves dot segments.
pub(crate) fn canonicalize_opaque_component(
    piece: Piece<'_>,
    separator: u8,
    out: &mut Output,
) -> (bool, Component) {
    if !piece.comp.is_present() {
        return (true, Component::absent());
    }
    if separator != 0 {
        out.push(separator);
    }
    let begin = out.len();
    let mut success = true;
    let spec = piece.buf;
    let end = piece.comp.end() as usize;
    let mut i = piece.comp.begin as usize;
    while i < end {
        let b = spec[i];
        if b >= 0x80 {
            if !append_utf8_escaped(spec, &mut i, end, out) {
                success = false;
            }
        } else if b < 0x20 || b == 0x7f {
            append_escaped(b, out);
            i += 1;
        } else {
            out.push(b);
            i += 1;
        }
    }
    (
        success,
        Component::from_range(begin as i32, out.len() as i32),
    )
}
