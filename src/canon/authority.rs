//! Userinfo, host and port canonicalization.

use crate::{
    encoding::{append_escaped, append_utf8_escaped, canonicalize_escaped, decode_escaped},
    ip,
    parser::{self, PORT_INVALID, PORT_UNSPECIFIED},
    table::{is_unreserved, HOST_MAP},
    Component, Output,
};

use super::Piece;

/// Appends one userinfo component, escaping everything outside the
/// unreserved set. Existing escapes are kept with their hex uppercased.
fn append_userinfo_component(spec: &[u8], comp: Component, out: &mut Output) {
    let end = comp.end() as usize;
    let mut i = comp.begin as usize;
    while i < end {
        let b = spec[i];
        if b >= 0x80 {
            append_utf8_escaped(spec, &mut i, end, out);
        } else if b == b'%' {
            canonicalize_escaped(spec, &mut i, end, out);
        } else if is_unreserved(b) {
            out.push(b);
            i += 1;
        } else {
            append_escaped(b, out);
            i += 1;
        }
    }
}

/// Canonicalizes the username and password, appending `user[:pass]@` when
/// either is non-empty. Empty-but-present userinfo is stripped entirely,
/// so `"http://@host/"` and `"http://host/"` canonicalize identically.
pub(crate) fn canonicalize_userinfo(
    username: Piece<'_>,
    password: Piece<'_>,
    out: &mut Output,
) -> (bool, Component, Component) {
    if !username.comp.is_nonempty() && !password.comp.is_nonempty() {
        return (true, Component::absent(), Component::absent());
    }

    let user_begin = out.len();
    if username.comp.is_nonempty() {
        append_userinfo_component(username.buf, username.comp, out);
    }
    let out_username = Component::from_range(user_begin as i32, out.len() as i32);

    let out_password = if password.comp.is_nonempty() {
        out.push(b':');
        let pass_begin = out.len();
        append_userinfo_component(password.buf, password.comp, out);
        Component::from_range(pass_begin as i32, out.len() as i32)
    } else {
        Component::absent()
    };

    out.push(b'@');
    (true, out_username, out_password)
}

/// Runs the hostname pass: percent-decode, lowercase ASCII, escape what a
/// hostname cannot carry. Returns `false` when a byte that can never
/// appear in a hostname had to be escaped (or a malformed escape was
/// passed through).
fn simple_host(host: &[u8], out: &mut Output) -> bool {
    let mut success = true;
    let mut i = 0;
    while i < host.len() {
        let b = host[i];
        let decoded = if b == b'%' {
            match decode_escaped(host, i, host.len()) {
                Some(v) => {
                    i += 3;
                    v
                }
                None => {
                    out.push(b'%');
                    success = false;
                    i += 1;
                    continue;
                }
            }
        } else {
            i += 1;
            b
        };

        if decoded >= 0x80 {
            // Pre-IDN behavior: non-ASCII host bytes stay percent-escaped.
            append_escaped(decoded, out);
            continue;
        }
        match HOST_MAP[decoded as usize] {
            0 => {
                append_escaped(decoded, out);
                success = false;
            }
            c => out.push(c),
        }
    }
    success
}

/// Canonicalizes a host per the pipeline: trim whitespace, handle IPv6
/// literals, decode and lowercase, then replace anything that reads as an
/// IPv4 address with its dotted-quad form.
pub(crate) fn canonicalize_host(
    spec: &[u8],
    host: Component,
    out: &mut Output,
) -> (bool, Component) {
    if !host.is_present() {
        return (true, Component::empty_at(out.len() as i32));
    }
    let mut begin = host.begin as usize;
    let mut end = host.end() as usize;
    while begin < end && parser::should_trim(spec[begin]) {
        begin += 1;
    }
    while end > begin && parser::should_trim(spec[end - 1]) {
        end -= 1;
    }
    if begin == end {
        return (true, Component::empty_at(out.len() as i32));
    }

    if spec[begin] == b'[' {
        if let Some(out_host) = ip::canonicalize_ipv6(&spec[begin..end], out) {
            return (true, out_host);
        }
        // Broken literal: fall through and surface it best-effort.
    }

    let host_begin = out.len();
    let success = simple_host(&spec[begin..end], out);

    // The decoded, lowercased text is what gets the IP treatment, so
    // escaped digits like "%30x7f.1" still canonicalize to an address.
    let mut quad = Output::with_capacity(16);
    let replaced = {
        let canonical = &out.as_slice()[host_begin..];
        ip::canonicalize_ipv4(canonical, &mut quad).is_some()
    };
    if replaced {
        out.truncate(host_begin);
        out.append(quad.as_slice());
    }
    (
        success,
        Component::from_range(host_begin as i32, out.len() as i32),
    )
}

/// Returns the default port of a canonical (lowercase) scheme, or -1.
pub(crate) fn default_port_for_scheme(scheme: &[u8]) -> i32 {
    match scheme {
        b"http" => 80,
        b"https" => 443,
        b"ftp" => 21,
        b"gopher" => 70,
        _ => PORT_UNSPECIFIED,
    }
}

/// Canonicalizes the port: strip leading zeros and append `:digits`,
/// unless the value is the scheme's default, in which case the port is
/// dropped. Invalid ports are dropped from the output too and mark the
/// URL invalid.
pub(crate) fn canonicalize_port(
    spec: &[u8],
    port: Component,
    default_port: i32,
    out: &mut Output,
) -> (bool, Component) {
    let value = parser::parse_port(spec, port);
    if value == PORT_UNSPECIFIED || value == default_port {
        return (true, Component::absent());
    }
    if value == PORT_INVALID {
        return (false, Component::absent());
    }

    out.push(b':');
    let begin = out.len();
    let mut digits = [0u8; 5];
    let mut n = 0;
    let mut v = value;
    loop {
        digits[n] = b'0' + (v % 10) as u8;
        n += 1;
        v /= 10;
        if v == 0 {
            break;
        }
    }
    while n > 0 {
        n -= 1;
        out.push(digits[n]);
    }
    (true, Component::from_range(begin as i32, out.len() as i32))
}
