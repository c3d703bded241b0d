//! Relative-reference detection and resolution against a canonical base.

use crate::{
    canon::{
        path::{canonicalize_file_path, canonicalize_partial_path, canonicalize_path},
        query::{canonicalize_query, canonicalize_ref},
        CharsetConverter, Piece,
    },
    parser::{
        self, count_consecutive_slashes, does_begin_windows_drive_spec, is_url_slash,
        parse_path_internal,
    },
    table::canonical_scheme_char,
    Component, Output, Parsed,
};

/// Compares a candidate scheme against the scheme of a canonical base.
/// Only the candidate side is canonicalized; the base is trusted to be
/// lowercase already.
fn are_schemes_equal(base: &[u8], base_scheme: Component, cmp: &[u8], cmp_scheme: Component) -> bool {
    if base_scheme.len != cmp_scheme.len {
        return false;
    }
    for i in 0..base_scheme.len {
        let base_byte = base[(base_scheme.begin + i) as usize];
        let cmp_byte = cmp[(cmp_scheme.begin + i) as usize];
        if canonical_scheme_char(cmp_byte) != base_byte {
            return false;
        }
    }
    true
}

/// Decides whether `url` is relative to the base.
///
/// Returns `(success, is_relative, relative_range)`. Failure means the
/// base cannot host a relative reference at all: it is non-hierarchical
/// and the input carries no scheme of its own. An absolute answer leaves
/// the range absent; the caller canonicalizes the input standalone.
pub(crate) fn is_relative_url(
    base: &[u8],
    base_parsed: &Parsed,
    url: &[u8],
    is_base_hierarchical: bool,
) -> (bool, bool, Component) {
    let (begin, end) = parser::trim_url(url);
    if begin >= end {
        // Empty references are relative and change nothing.
        return (true, true, Component::empty_at(begin as i32));
    }

    // A leading slash always means relative, before any scheme sniffing:
    // "/foo:bar" would otherwise read as a scheme.
    if is_url_slash(url[begin]) {
        return (
            true,
            true,
            Component::from_range(begin as i32, end as i32),
        );
    }

    let (found, scheme) = parser::extract_scheme(url);
    if !found {
        // No scheme: relative, if the base allows that.
        if !is_base_hierarchical {
            return (false, false, Component::absent());
        }
        return (
            true,
            true,
            Component::from_range(begin as i32, end as i32),
        );
    }

    if !are_schemes_equal(base, base_parsed.scheme, url, scheme) {
        return (true, false, Component::absent());
    }

    // The same scheme on an opaque base still reads as absolute, so
    // "data:bar" against "data:foo" replaces it outright.
    if !is_base_hierarchical {
        return (true, false, Component::absent());
    }

    // "http:foo" and "http:/foo" are relative forms of the base scheme;
    // two or more slashes introduce an authority and are absolute.
    let colon_offset = scheme.end() as usize;
    let num_slashes = count_consecutive_slashes(url, colon_offset + 1, end);
    if num_slashes == 0 || num_slashes == 1 {
        return (
            true,
            true,
            Component::from_range(colon_offset as i32 + 1, end as i32),
        );
    }
    (true, false, Component::absent())
}

/// Copies `base[begin..end)` up to and including the last slash. The base
/// is canonical, so only forward slashes occur. Copies nothing when the
/// range has no slash.
fn copy_to_last_slash(base: &[u8], begin: usize, end: usize, out: &mut Output) {
    let mut last_slash = None;
    for i in (begin..end).rev() {
        if base[i] == b'/' {
            last_slash = Some(i);
            break;
        }
    }
    let Some(last_slash) = last_slash else {
        return;
    };
    out.append(&base[begin..=last_slash]);
}

/// Copies one unchanged component from the canonical base.
fn copy_one_component(base: &[u8], source: Component, out: &mut Output) -> Component {
    if !source.is_present() {
        return Component::absent();
    }
    let begin = out.len();
    out.append(source.slice_of(base));
    Component::from_range(begin as i32, out.len() as i32)
}

/// When the base is a file URL with a drive letter and the reference does
/// not bring its own, re-emits `/X:` so relative paths resolve inside the
/// drive rather than replacing it. Returns the base offset at which path
/// processing continues.
fn copy_base_drive_spec_if_necessary(
    base: &[u8],
    base_path_begin: usize,
    base_path_end: usize,
    relative: &[u8],
    path_start: usize,
    relative_end: usize,
    out: &mut Output,
) -> usize {
    if base_path_begin >= base_path_end {
        return base_path_begin;
    }
    if does_begin_windows_drive_spec(relative, path_start, relative_end) {
        // The reference carries its own drive spec and replaces the base's.
        return base_path_begin;
    }
    // A canonical file path starts "/X:"; keep it when present.
    if base_path_begin + 2 < base_path_end
        && is_url_slash(base[base_path_begin])
        && does_begin_windows_drive_spec(base, base_path_begin + 1, base_path_end)
    {
        out.push(b'/');
        out.push(base[base_path_begin + 1]);
        out.push(base[base_path_begin + 2]);
        return base_path_begin + 3;
    }
    base_path_begin
}

/// Resolves a known-relative reference against a canonical base, merging
/// the base authority and path stem with the reference's path, query and
/// ref. Fails (emitting the base unchanged) when the base has no host or
/// no path to be relative to.
pub(crate) fn resolve_relative_url(
    base: &[u8],
    base_parsed: &Parsed,
    base_is_file: bool,
    relative: &[u8],
    relative_comp: Component,
    converter: Option<&dyn CharsetConverter>,
    out: &mut Output,
) -> (bool, Parsed) {
    let mut out_parsed = *base_parsed;
    let base_len = (base_parsed.length() as usize).min(base.len());

    // Only a base with a host and a path can anchor a relative reference;
    // an empty host is fine (file URLs), an absent one is not.
    if !base_parsed.host.is_present() || !base_parsed.path.is_nonempty() {
        out.append(&base[..base_len]);
        return (false, out_parsed);
    }

    if !relative_comp.is_nonempty() {
        out.append(&base[..base_len]);
        return (true, out_parsed);
    }

    let (path, query, ref_) = parse_path_internal(relative, relative_comp);

    // The authority cannot change; copy everything before the base path.
    out.append(&base[..base_parsed.path.begin as usize]);

    let mut success = true;
    if path.is_nonempty() {
        let true_path_begin = out.len();

        if does_begin_windows_drive_spec(
            relative,
            relative_comp.begin as usize,
            relative_comp.end() as usize,
        ) {
            // A drive-letter reference replaces the whole path; the file
            // path canonicalizer restores the canonical drive form.
            let (ok, out_path) = canonicalize_file_path(relative, path, out);
            success &= ok;
            out_parsed.path = out_path;
        } else {
            let mut base_path_begin = base_parsed.path.begin as usize;
            if base_is_file {
                base_path_begin = copy_base_drive_spec_if_necessary(
                    base,
                    base_parsed.path.begin as usize,
                    base_parsed.path.end() as usize,
                    relative,
                    path.begin as usize,
                    relative_comp.end() as usize,
                    out,
                );
            }

            if is_url_slash(relative[path.begin as usize]) {
                // Absolute path on the server: replace the base path.
                let (ok, out_path) = canonicalize_path(relative, path, out);
                success &= ok;
                out_parsed.path = out_path;
            } else {
                // Relative path: keep the base path up to its last slash,
                // append, and let dot-segment removal do the climbing.
                let path_begin = out.len();
                copy_to_last_slash(
                    base,
                    base_path_begin,
                    base_parsed.path.end() as usize,
                    out,
                );
                success &= canonicalize_partial_path(relative, path, path_begin, out);
                out_parsed.path = Component::from_range(path_begin as i32, out.len() as i32);
            }
        }

        out_parsed.query = canonicalize_query(Piece::new(relative, query), converter, out);
        out_parsed.ref_ = canonicalize_ref(Piece::new(relative, ref_), out);
        out_parsed.path = Component::from_range(true_path_begin as i32, out_parsed.path.end());
        return (success, out_parsed);
    }

    // Path unchanged.
    out_parsed.path = copy_one_component(base, base_parsed.path, out);

    if query.is_present() {
        out_parsed.query = canonicalize_query(Piece::new(relative, query), converter, out);
        out_parsed.ref_ = canonicalize_ref(Piece::new(relative, ref_), out);
        return (success, out_parsed);
    }

    // Query unchanged; its separator is not part of the component range.
    if base_parsed.query.is_present() {
        out.push(b'?');
    }
    out_parsed.query = copy_one_component(base, base_parsed.query, out);

    if ref_.is_present() {
        out_parsed.ref_ = canonicalize_ref(Piece::new(relative, ref_), out);
        return (success, out_parsed);
    }

    if base_parsed.ref_.is_present() {
        out.push(b'#');
    }
    out_parsed.ref_ = copy_one_component(base, base_parsed.ref_, out);
    (success, out_parsed)
}
