//! Shared character-classification tables.
//!
//! One 256-entry flag table answers the hot-path questions (query-safe
//! byte, IPv4 digit classes), and a few small lookup helpers cover the
//! scheme, userinfo and host alphabets. All tables are built in const
//! context so they live in rodata.

/// Byte allowed unescaped in a query.
pub(crate) const QUERY: u8 = 1 << 0;
/// Byte that may appear in an IPv4 address literal.
pub(crate) const IPV4: u8 = 1 << 1;
/// Hexadecimal digit.
pub(crate) const HEX: u8 = 1 << 2;
/// Decimal digit.
pub(crate) const DEC: u8 = 1 << 3;
/// Octal digit.
pub(crate) const OCT: u8 = 1 << 4;

/// A table mapping each byte to a set of the flags above.
pub(crate) struct Table {
    table: [u8; 256],
}

impl Table {
    /// Creates a table that sets `flags` for the given bytes.
    const fn gen(mut bytes: &[u8], flags: u8) -> Table {
        let mut table = [0; 256];
        while let [cur, rem @ ..] = bytes {
            table[*cur as usize] |= flags;
            bytes = rem;
        }
        Table { table }
    }

    /// Creates a table that sets `flags` for every byte in `lo..=hi`.
    const fn gen_range(lo: u8, hi: u8, flags: u8) -> Table {
        let mut table = [0; 256];
        let mut b = lo;
        loop {
            table[b as usize] |= flags;
            if b == hi {
                break;
            }
            b += 1;
        }
        Table { table }
    }

    /// Combines two tables into one.
    const fn or(mut self, other: &Table) -> Table {
        let mut i = 0;
        while i < 256 {
            self.table[i] |= other.table[i];
            i += 1;
        }
        self
    }

    /// Removes `flags` from the given bytes.
    const fn sub(mut self, mut bytes: &[u8], flags: u8) -> Table {
        while let [cur, rem @ ..] = bytes {
            self.table[*cur as usize] &= !flags;
            bytes = rem;
        }
        self
    }

    #[inline]
    pub(crate) const fn allows(&self, x: u8, flags: u8) -> bool {
        self.table[x as usize] & flags != 0
    }
}

/// The shared classification table.
///
/// Query-safe bytes are all of `0x21..=0x7e` except `'#'`, which
/// terminates the query; `'%'` is query-safe, so escape sequences in
/// queries pass through unvalidated.
pub(crate) static SHARED: Table = Table::gen_range(0x21, 0x7e, QUERY)
    .sub(b"#", QUERY)
    .or(&Table::gen_range(b'0', b'9', IPV4 | HEX | DEC))
    .or(&Table::gen_range(b'0', b'7', OCT))
    .or(&Table::gen_range(b'a', b'f', IPV4 | HEX))
    .or(&Table::gen_range(b'A', b'F', IPV4 | HEX))
    .or(&Table::gen(b".xX", IPV4));

/// Returns the canonical form of a scheme character, or 0 when the byte
/// cannot appear in a scheme. Canonical schemes are lowercase.
#[inline]
pub(crate) const fn canonical_scheme_char(b: u8) -> u8 {
    match b {
        b'a'..=b'z' | b'0'..=b'9' | b'+' | b'-' | b'.' => b,
        b'A'..=b'Z' => b + 0x20,
        _ => 0,
    }
}

/// Returns whether `b` may appear in a scheme.
#[inline]
pub(crate) const fn is_scheme_char(b: u8) -> bool {
    canonical_scheme_char(b) != 0
}

/// Returns whether `b` is in the unreserved set, the only bytes kept
/// verbatim in userinfo.
#[inline]
pub(crate) const fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}

/// Returns whether `b` must be escaped in a path. Path-URL bodies and
/// fragments escape less; see the per-component canonicalizers.
#[inline]
pub(crate) const fn path_needs_escape(b: u8) -> bool {
    b <= 0x20
        || b == 0x7f
        || matches!(b, b'"' | b'#' | b'<' | b'>' | b'?' | b'`' | b'{' | b'}')
}

/// Maps an ASCII byte to its canonical host form, or 0 when the byte can
/// never appear in a hostname. Uppercase letters map to lowercase. Invalid
/// bytes are still escaped into the output so callers can surface the
/// offending text, but they mark the host invalid.
pub(crate) static HOST_MAP: [u8; 128] = build_host_map();

const fn build_host_map() -> [u8; 128] {
    let mut t = [0u8; 128];
    let mut b = b'a';
    while b <= b'z' {
        t[b as usize] = b;
        b += 1;
    }
    let mut b = b'A';
    while b <= b'Z' {
        t[b as usize] = b + 0x20;
        b += 1;
    }
    let mut b = b'0';
    while b <= b'9' {
        t[b as usize] = b;
        b += 1;
    }
    let mut verbatim: &[u8] = b"!$&'()*+,-.;=_~";
    while let [cur, rem @ ..] = verbatim {
        t[*cur as usize] = *cur;
        verbatim = rem;
    }
    t
}
