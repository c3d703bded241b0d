//! URL orchestrators: standard, file and path URLs.
//!
//! Each selects the component canonicalizers in wire order and emits the
//! separators. Which orchestrator runs is decided by the caller from the
//! *output* scheme, so a scheme replacement switches strategy.

use crate::{Component, Output, Parsed};

use super::{
    authority::{
        canonicalize_host, canonicalize_port, canonicalize_userinfo, default_port_for_scheme,
    },
    path::{canonicalize_file_path, canonicalize_path},
    query::{canonicalize_opaque_component, canonicalize_query, canonicalize_ref},
    scheme::canonicalize_scheme,
    CharsetConverter, ComponentSource,
};

/// Canonicalizes an authority-based URL:
/// `scheme://[user[:pass]@]host[:port]/path[?query][#ref]`.
///
/// The `//` and the path are always emitted; a URL without a path gets
/// `"/"`. The port is dropped when it equals the scheme's default.
pub(crate) fn canonicalize_standard_url(
    source: &ComponentSource<'_>,
    converter: Option<&dyn CharsetConverter>,
    out: &mut Output,
) -> (bool, Parsed) {
    let mut parsed = Parsed::default();

    let (mut success, scheme) = canonicalize_scheme(source.scheme.buf, source.scheme.comp, out);
    parsed.scheme = scheme;
    // The default port matches against the canonical scheme just written.
    let default_port = default_port_for_scheme(parsed.scheme.slice_of(out.as_slice()));

    out.append(b"//");

    let (ok, username, password) = canonicalize_userinfo(source.username, source.password, out);
    success &= ok;
    parsed.username = username;
    parsed.password = password;

    let (ok, host) = canonicalize_host(source.host.buf, source.host.comp, out);
    success &= ok;
    parsed.host = host;

    let (ok, port) = canonicalize_port(source.port.buf, source.port.comp, default_port, out);
    success &= ok;
    parsed.port = port;

    let (ok, path) = canonicalize_path(source.path.buf, source.path.comp, out);
    success &= ok;
    parsed.path = path;

    parsed.query = canonicalize_query(source.query, converter, out);
    parsed.ref_ = canonicalize_ref(source.ref_, out);

    (success, parsed)
}

/// Canonicalizes a `file:` URL. The scheme is emitted verbatim as
/// `file://` whatever case the input used; userinfo and port do not
/// exist for file URLs.
pub(crate) fn canonicalize_file_url(
    source: &ComponentSource<'_>,
    converter: Option<&dyn CharsetConverter>,
    out: &mut Output,
) -> (bool, Parsed) {
    let mut parsed = Parsed::default();

    parsed.scheme = Component::new(out.len() as i32, 4);
    out.append(b"file://");

    let (mut success, host) = canonicalize_host(source.host.buf, source.host.comp, out);
    parsed.host = host;

    let (ok, path) = canonicalize_file_path(source.path.buf, source.path.comp, out);
    success &= ok;
    parsed.path = path;

    parsed.query = canonicalize_query(source.query, converter, out);
    parsed.ref_ = canonicalize_ref(source.ref_, out);

    (success, parsed)
}

/// Canonicalizes an opaque path URL: `scheme:body`, with the body copied
/// under minimal escaping and no authority or path normalization. Query
/// and ref sources only occur through the replacement engine; a parsed
/// path URL keeps everything in its path.
pub(crate) fn canonicalize_path_url(
    source: &ComponentSource<'_>,
    out: &mut Output,
) -> (bool, Parsed) {
    let mut parsed = Parsed::default();

    let (mut success, scheme) = canonicalize_scheme(source.scheme.buf, source.scheme.comp, out);
    parsed.scheme = scheme;

    let (ok, path) = canonicalize_opaque_component(source.path, 0, out);
    success &= ok;
    parsed.path = path;

    let (ok, query) = canonicalize_opaque_component(source.query, b'?', out);
    success &= ok;
    parsed.query = query;

    let (ok, ref_) = canonicalize_opaque_component(source.ref_, b'#', out);
    success &= ok;
    parsed.ref_ = ref_;

    (success, parsed)
}
