//! Top-level entry points and the standard-scheme registry.

use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};

use crate::{
    canon::{
        scheme::canonicalize_scheme,
        url::{canonicalize_file_url, canonicalize_path_url, canonicalize_standard_url},
        CharsetConverter, ComponentSource,
    },
    encoding::convert_utf16_to_utf8,
    parser, replace, resolve, Component, Output, Parsed, Replacements,
};

/// A complete canonicalization result.
///
/// The output bytes are always fully produced, even when `valid` is false,
/// so callers can surface the offending text; an invalid URL should be
/// treated as unusable but still round-trips.
#[derive(Clone, Debug)]
pub struct Canonicalized {
    /// Whether every component canonicalized cleanly.
    pub valid: bool,
    /// The canonical spec bytes.
    pub output: Output,
    /// The layout of `output`.
    pub parsed: Parsed,
}

const FILE_SCHEME: &[u8] = b"file";

/// The schemes registered from the start.
const BUILTIN_STANDARD_SCHEMES: &[&[u8]] = &[b"http", b"https", FILE_SCHEME, b"ftp", b"gopher"];

struct SchemeNode {
    scheme: &'static [u8],
    next: *const SchemeNode,
}

/// Head of the appended-schemes list. Nodes are leaked on insertion and
/// never freed or modified, so readers can traverse without locks.
static ADDED_SCHEMES: AtomicPtr<SchemeNode> = AtomicPtr::new(ptr::null_mut());

/// Compares a scheme range against a lowercase scheme literal,
/// case-insensitively.
fn compare_scheme_component(spec: &[u8], component: Component, lower: &[u8]) -> bool {
    component.slice_of(spec).eq_ignore_ascii_case(lower)
}

/// Returns whether the scheme (given as raw bytes, any case) is in the
/// standard-scheme set. Standard schemes get authority-based parsing.
///
/// Reads are lock-free and may run from any thread.
#[must_use]
pub fn is_standard_scheme(scheme: &[u8]) -> bool {
    if BUILTIN_STANDARD_SCHEMES
        .iter()
        .any(|s| scheme.eq_ignore_ascii_case(s))
    {
        return true;
    }
    // Acquire pairs with the release store in `add_standard_scheme`.
    let mut node: *const SchemeNode = ADDED_SCHEMES.load(Ordering::Acquire);
    while !node.is_null() {
        // SAFETY: Nodes are heap-allocated, leaked at insertion, and never
        // freed or mutated afterwards, so the pointer stays valid.
        let n = unsafe { &*node };
        if scheme.eq_ignore_ascii_case(n.scheme) {
            return true;
        }
        node = n.next;
    }
    false
}

/// Registers a scheme as standard. Registered schemes parse with an
/// authority like `http`. The set only grows; there is no removal.
///
/// Idempotent, and an empty scheme is ignored. Registration should happen
/// during single-threaded startup, before canonicalization begins;
/// concurrent calls are memory-safe but may race on duplicates, which
/// lookups tolerate.
pub fn add_standard_scheme(scheme: &str) {
    if scheme.is_empty() {
        return;
    }
    let lower = scheme.to_ascii_lowercase();
    if is_standard_scheme(lower.as_bytes()) {
        return;
    }
    let scheme_bytes: &'static [u8] = Box::leak(lower.into_bytes().into_boxed_slice());
    let node = Box::into_raw(Box::new(SchemeNode {
        scheme: scheme_bytes,
        next: ptr::null(),
    }));
    let mut head = ADDED_SCHEMES.load(Ordering::Acquire);
    loop {
        // SAFETY: `node` is not yet published; no other thread sees it.
        unsafe { (*node).next = head };
        match ADDED_SCHEMES.compare_exchange_weak(head, node, Ordering::Release, Ordering::Acquire)
        {
            Ok(_) => return,
            Err(new_head) => head = new_head,
        }
    }
}

/// Locates the scheme of `spec` and compares it case-insensitively against
/// `compare`. Returns the match result and the scheme's range; the range
/// is absent when no scheme can be extracted.
///
/// # Examples
///
/// ```
/// use urlcanon::{find_and_compare_scheme, Component};
///
/// let (matches, scheme) = find_and_compare_scheme(b"HTTP://www.com/", "http");
/// assert!(matches);
/// assert_eq!(scheme, Component::new(0, 4));
/// ```
#[must_use]
pub fn find_and_compare_scheme(spec: &[u8], compare: &str) -> (bool, Component) {
    let (found, scheme) = parser::extract_scheme(spec);
    if !found {
        return (false, Component::absent());
    }
    (
        scheme
            .slice_of(spec)
            .eq_ignore_ascii_case(compare.as_bytes()),
        scheme,
    )
}

/// Returns whether `spec` has an extractable scheme that is standard.
#[must_use]
pub fn is_standard(spec: &[u8]) -> bool {
    let (found, scheme) = parser::extract_scheme(spec);
    found && is_standard_scheme(scheme.slice_of(spec))
}

fn canonicalize_inner(
    spec: &[u8],
    converter: Option<&dyn CharsetConverter>,
    out: &mut Output,
) -> (bool, Parsed) {
    debug_assert!(spec.len() <= i32::MAX as usize);
    let (found, scheme) = parser::extract_scheme(spec);
    if !found {
        // Whitespace-only input is an empty URL, not an error; anything
        // else without a scheme cannot be canonicalized.
        let (begin, end) = parser::trim_url(spec);
        return (begin >= end, Parsed::default());
    }

    if compare_scheme_component(spec, scheme, FILE_SCHEME) {
        let parsed = parser::parse_file_url(spec);
        canonicalize_file_url(&ComponentSource::from_parsed(spec, &parsed), converter, out)
    } else if is_standard_scheme(scheme.slice_of(spec)) {
        let parsed = parser::parse_standard_url(spec);
        canonicalize_standard_url(&ComponentSource::from_parsed(spec, &parsed), converter, out)
    } else {
        let parsed = parser::parse_path_url(spec);
        canonicalize_path_url(&ComponentSource::from_parsed(spec, &parsed), out)
    }
}

/// Canonicalizes a raw URL spec (UTF-8 bytes) into its unique canonical
/// byte form plus the component layout.
///
/// The parse mode comes from the scheme: `file:` URLs get the drive and
/// UNC treatment, registered standard schemes get authority-based
/// treatment, everything else is an opaque path URL. The output is
/// complete even on failure.
///
/// # Examples
///
/// ```
/// use urlcanon::canonicalize;
///
/// let c = canonicalize(b"HTTP://WWW.Example.COM:80", None);
/// assert!(c.valid);
/// assert_eq!(c.output.as_slice(), b"http://www.example.com/");
///
/// let c = canonicalize(b"about:blank", None);
/// assert_eq!(c.output.as_slice(), b"about:blank");
/// ```
#[must_use]
pub fn canonicalize(spec: &[u8], converter: Option<&dyn CharsetConverter>) -> Canonicalized {
    let mut out = Output::with_capacity(spec.len());
    let (valid, parsed) = canonicalize_inner(spec, converter, &mut out);
    Canonicalized {
        valid,
        output: out,
        parsed,
    }
}

/// Canonicalizes a UTF-16 spec. The input is transcoded (unpaired
/// surrogates become U+FFFD) and then follows the byte path, so a wide
/// spec and its narrow transcription canonicalize identically.
#[must_use]
pub fn canonicalize_utf16(spec: &[u16], converter: Option<&dyn CharsetConverter>) -> Canonicalized {
    let mut narrow = Output::with_capacity(spec.len());
    convert_utf16_to_utf8(spec, &mut narrow);
    canonicalize(narrow.as_slice(), converter)
}

fn emit_base(base: &[u8], base_parsed: &Parsed, valid: bool, out: &mut Output) -> (bool, Parsed) {
    let base_len = (base_parsed.length() as usize).min(base.len());
    out.append(&base[..base_len]);
    (valid, *base_parsed)
}

/// Resolves `relative` against a canonical base, producing a canonical
/// absolute URL.
///
/// A reference that turns out to be absolute is canonicalized on its own.
/// A base that cannot host relative references (an opaque scheme, or no
/// host and path) fails, and the output is the base unchanged.
///
/// # Examples
///
/// ```
/// use urlcanon::{canonicalize, resolve_relative};
///
/// let base = canonicalize(b"http://host/a/b?q#r", None);
/// let r = resolve_relative(base.output.as_slice(), &base.parsed, b"../c", None);
/// assert_eq!(r.output.as_slice(), b"http://host/c");
/// ```
#[must_use]
pub fn resolve_relative(
    base: &[u8],
    base_parsed: &Parsed,
    relative: &[u8],
    converter: Option<&dyn CharsetConverter>,
) -> Canonicalized {
    let mut out = Output::with_capacity(base.len() + relative.len());

    let standard_base = base_parsed.scheme.is_present()
        && is_standard_scheme(base_parsed.scheme.slice_of(base));
    let (ok, is_rel, relative_comp) =
        resolve::is_relative_url(base, base_parsed, relative, standard_base);

    let (valid, parsed) = if !ok {
        emit_base(base, base_parsed, false, &mut out)
    } else if is_rel {
        let base_is_file = compare_scheme_component(base, base_parsed.scheme, FILE_SCHEME);
        resolve::resolve_relative_url(
            base,
            base_parsed,
            base_is_file,
            relative,
            relative_comp,
            converter,
            &mut out,
        )
    } else {
        canonicalize_inner(relative, converter, &mut out)
    };
    Canonicalized {
        valid,
        output: out,
        parsed,
    }
}

/// Resolves a UTF-16 reference against a canonical (byte) base.
#[must_use]
pub fn resolve_relative_utf16(
    base: &[u8],
    base_parsed: &Parsed,
    relative: &[u16],
    converter: Option<&dyn CharsetConverter>,
) -> Canonicalized {
    let mut narrow = Output::with_capacity(relative.len());
    convert_utf16_to_utf8(relative, &mut narrow);
    resolve_relative(base, base_parsed, narrow.as_slice(), converter)
}

/// Rebuilds a canonical URL with some components replaced, cleared or
/// kept.
///
/// Dispatch follows the *output* scheme. When the scheme itself is
/// replaced, the new scheme is spliced onto the base spec and the result
/// re-canonicalized before the remaining replacements apply, so the URL
/// type can change under the replacement (including into an opaque path
/// URL, which keeps the old authority as path text: replacing the scheme
/// of `http://google.com/` with `about` yields `about://google.com/`).
#[must_use]
pub fn replace_components(
    spec: &[u8],
    parsed: &Parsed,
    replacements: &Replacements<'_>,
    converter: Option<&dyn CharsetConverter>,
) -> Canonicalized {
    if replacements.scheme_overridden() {
        // Splice "<new-scheme>:" onto everything after the old scheme's
        // colon, re-canonicalize, then apply the rest against that.
        let source = replace::setup_override_components(spec, parsed, replacements);
        let mut spliced = Output::with_capacity(spec.len() + 8);
        canonicalize_scheme(source.scheme.buf, source.scheme.comp, &mut spliced);
        let after_colon = if parsed.scheme.is_present() {
            ((parsed.scheme.end() + 1) as usize).min(spec.len())
        } else {
            0
        };
        spliced.append(&spec[after_colon..]);

        let recanonicalized = canonicalize(spliced.as_slice(), converter);
        let remaining = replacements.without_scheme();
        let mut result = replace_components(
            recanonicalized.output.as_slice(),
            &recanonicalized.parsed,
            &remaining,
            converter,
        );
        result.valid &= recanonicalized.valid;
        return result;
    }

    let mut out = Output::with_capacity(spec.len());
    let source = replace::setup_override_components(spec, parsed, replacements);
    let (valid, out_parsed) = if compare_scheme_component(spec, parsed.scheme, FILE_SCHEME) {
        canonicalize_file_url(&source, converter, &mut out)
    } else if parsed.scheme.is_present() && is_standard_scheme(parsed.scheme.slice_of(spec)) {
        canonicalize_standard_url(&source, converter, &mut out)
    } else {
        canonicalize_path_url(&source, &mut out)
    };
    Canonicalized {
        valid,
        output: out,
        parsed: out_parsed,
    }
}
