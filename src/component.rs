//! The structural index of a URL: byte ranges for each component.

/// A half-open byte range into some buffer, identifying one URL component.
///
/// A length of `-1` means the component is absent; a length of `0` means it
/// is present but empty (`"http://host/?"` has an empty but present query).
/// The distinction matters: an absent query omits the `?` separator, an
/// empty one keeps it.
///
/// # Examples
///
/// ```
/// use urlcanon::Component;
///
/// let c = Component::new(7, 4);
/// assert!(c.is_present() && c.is_nonempty());
/// assert_eq!(c.end(), 11);
/// assert!(!Component::absent().is_present());
/// assert!(Component::empty_at(3).is_present());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Component {
    /// Index of the first byte, meaningful only when `len >= 0`.
    pub begin: i32,
    /// Number of bytes, or `-1` when the component is absent.
    pub len: i32,
}

impl Component {
    /// Creates a component covering `len` bytes starting at `begin`.
    #[must_use]
    pub const fn new(begin: i32, len: i32) -> Self {
        Self { begin, len }
    }

    /// Creates an absent component.
    #[must_use]
    pub const fn absent() -> Self {
        Self { begin: 0, len: -1 }
    }

    /// Creates a present-but-empty component at the given position.
    #[must_use]
    pub const fn empty_at(begin: i32) -> Self {
        Self { begin, len: 0 }
    }

    /// Creates a component from half-open bounds `[begin, end)`.
    #[must_use]
    pub const fn from_range(begin: i32, end: i32) -> Self {
        Self {
            begin,
            len: end - begin,
        }
    }

    /// Returns whether the component is present (possibly empty).
    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.len >= 0
    }

    /// Returns whether the component is present and non-empty.
    #[must_use]
    pub const fn is_nonempty(&self) -> bool {
        self.len > 0
    }

    /// Returns the index one past the last byte.
    #[must_use]
    pub const fn end(&self) -> i32 {
        self.begin + self.len
    }

    /// Returns the bytes this component covers in `buf`, or an empty slice
    /// when the component is absent.
    ///
    /// # Panics
    ///
    /// Panics if the range lies outside `buf`.
    #[must_use]
    pub fn slice_of<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        if self.is_present() {
            &buf[self.begin as usize..self.end() as usize]
        } else {
            &[]
        }
    }
}

impl Default for Component {
    fn default() -> Self {
        Self::absent()
    }
}

/// The parsed layout of a URL: one [`Component`] per part, in buffer order.
///
/// Produced by the parser against a raw input buffer, and by the
/// canonicalizers against their [`Output`](crate::Output). Present
/// components never overlap and always appear in the order of the fields
/// below.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Parsed {
    /// Scheme, not including the trailing colon.
    pub scheme: Component,
    /// Username, between the authority start and `:` or `@`.
    pub username: Component,
    /// Password, between `:` and `@`.
    pub password: Component,
    /// Host. For file URLs this is present (possibly empty), never absent.
    pub host: Component,
    /// Port digits, not including the leading colon.
    pub port: Component,
    /// Path, including the leading slash when there is one.
    pub path: Component,
    /// Query, not including the `?`.
    pub query: Component,
    /// Fragment, not including the `#`.
    pub ref_: Component,
}

impl Parsed {
    /// Returns the number of bytes of the underlying buffer covered by this
    /// layout: one past the end of the last present component, counting the
    /// colon after a bare scheme.
    ///
    /// For a canonical URL this equals the length of the canonical spec.
    #[must_use]
    pub fn length(&self) -> i32 {
        if self.ref_.is_present() {
            return self.ref_.end();
        }
        if self.query.is_present() {
            return self.query.end();
        }
        if self.path.is_present() {
            return self.path.end();
        }
        if self.port.is_present() {
            return self.port.end();
        }
        if self.host.is_present() {
            return self.host.end();
        }
        if self.password.is_present() {
            return self.password.end();
        }
        if self.username.is_present() {
            return self.username.end();
        }
        if self.scheme.is_present() {
            // The colon always follows the scheme.
            return self.scheme.end() + 1;
        }
        0
    }
}
