//! Component replacement against a canonical URL.

use crate::{
    canon::{ComponentSource, Piece},
    Component,
};

/// What to do with one component when rebuilding a URL.
#[derive(Clone, Copy, Debug, Default)]
pub enum Replacement<'a> {
    /// Use the base URL's component unchanged.
    #[default]
    Keep,
    /// Delete the component.
    Clear,
    /// Use `range` within `bytes` as the new component text. An empty
    /// range clears the component; callers may pass a larger buffer with
    /// the meaningful slice identified by the range.
    Set(&'a [u8], Component),
}

/// A per-component diff applied to a canonical URL by
/// [`replace_components`](crate::replace_components).
///
/// Every component defaults to [`Replacement::Keep`]. Setting the scheme
/// switches the canonicalization strategy of the whole URL, since the
/// orchestrator is chosen from the *output* scheme.
///
/// # Examples
///
/// ```
/// use urlcanon::{canonicalize, replace_components, Replacements};
///
/// let base = canonicalize(b"http://google.com/", None);
/// let repl = Replacements::new().set_scheme(b"https");
/// let out = replace_components(base.output.as_slice(), &base.parsed, &repl, None);
/// assert_eq!(out.output.as_slice(), b"https://google.com/");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Replacements<'a> {
    pub(crate) scheme: Replacement<'a>,
    pub(crate) username: Replacement<'a>,
    pub(crate) password: Replacement<'a>,
    pub(crate) host: Replacement<'a>,
    pub(crate) port: Replacement<'a>,
    pub(crate) path: Replacement<'a>,
    pub(crate) query: Replacement<'a>,
    pub(crate) ref_: Replacement<'a>,
}

macro_rules! setters {
    ($($set:ident, $clear:ident => $field:ident),* $(,)?) => {
        $(
            /// Replaces this component with the given bytes.
            #[must_use]
            pub fn $set(mut self, bytes: &'a [u8]) -> Self {
                self.$field = Replacement::Set(bytes, Component::new(0, bytes.len() as i32));
                self
            }

            /// Deletes this component.
            #[must_use]
            pub fn $clear(mut self) -> Self {
                self.$field = Replacement::Clear;
                self
            }
        )*
    };
}

impl<'a> Replacements<'a> {
    /// Creates a diff that keeps every component.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    setters! {
        set_scheme, clear_scheme => scheme,
        set_username, clear_username => username,
        set_password, clear_password => password,
        set_host, clear_host => host,
        set_port, clear_port => port,
        set_path, clear_path => path,
        set_query, clear_query => query,
        set_ref, clear_ref => ref_,
    }

    /// Replaces this component with a sub-range of a larger buffer.
    #[must_use]
    pub fn set_scheme_range(mut self, bytes: &'a [u8], range: Component) -> Self {
        self.scheme = Replacement::Set(bytes, range);
        self
    }

    pub(crate) fn scheme_overridden(&self) -> bool {
        !matches!(self.scheme, Replacement::Keep)
    }

    /// Returns a copy with the scheme replacement removed, for the second
    /// pass after a scheme override has been spliced in.
    pub(crate) fn without_scheme(mut self) -> Self {
        self.scheme = Replacement::Keep;
        self
    }
}

/// Resolves one component's effective source: base text, override text,
/// or nothing. An override with an empty range clears the component.
fn override_piece<'a>(
    base: &'a [u8],
    base_comp: Component,
    repl: &Replacement<'a>,
) -> Piece<'a> {
    match *repl {
        Replacement::Keep => Piece::new(base, base_comp),
        Replacement::Clear => Piece::new(b"", Component::absent()),
        Replacement::Set(bytes, range) => {
            if range.is_nonempty() {
                Piece::new(bytes, range)
            } else {
                Piece::new(b"", Component::absent())
            }
        }
    }
}

/// Builds the component sources for a replacement run. The host is pinned
/// to present-but-empty when cleared; hosts are never absent in an
/// authority-based URL.
pub(crate) fn setup_override_components<'a>(
    base: &'a [u8],
    base_parsed: &crate::Parsed,
    repl: &Replacements<'a>,
) -> ComponentSource<'a> {
    let mut host = override_piece(base, base_parsed.host, &repl.host);
    if !host.comp.is_present() {
        host.comp = Component::empty_at(0);
    }
    ComponentSource {
        scheme: override_piece(base, base_parsed.scheme, &repl.scheme),
        username: override_piece(base, base_parsed.username, &repl.username),
        password: override_piece(base, base_parsed.password, &repl.password),
        host,
        port: override_piece(base, base_parsed.port, &repl.port),
        path: override_piece(base, base_parsed.path, &repl.path),
        query: override_piece(base, base_parsed.query, &repl.query),
        ref_: override_piece(base, base_parsed.ref_, &repl.ref_),
    }
}
