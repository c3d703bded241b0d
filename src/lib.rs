#![warn(rust_2018_idioms, unreachable_pub, missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
//! A browser-grade URL parser, canonicalizer and relative-reference
//! resolver.
//!
//! This crate turns raw URL text (UTF-8 bytes or UTF-16 code units) into a
//! unique canonical byte form together with a structural index of its
//! components, resolves relative references against a canonical base, and
//! rebuilds URLs with individual components replaced. Compatibility is
//! defined by observable browser behavior rather than a clean grammar:
//! backslashes count as slashes in hierarchical URLs, Windows drive
//! letters get their `file:` treatment on every platform, IPv4 hosts
//! accept octal and hex components, and malformed input still produces
//! complete output alongside an invalid flag.
//!
//! # Examples
//!
//! ```
//! use urlcanon::{canonicalize, resolve_relative};
//!
//! let c = canonicalize(b"HTTP://Example.COM:80/a/../b", None);
//! assert!(c.valid);
//! assert_eq!(c.output.as_slice(), b"http://example.com/b");
//!
//! let r = resolve_relative(c.output.as_slice(), &c.parsed, b"c?d", None);
//! assert_eq!(r.output.as_slice(), b"http://example.com/c?d");
//! ```

mod canon;
mod component;
mod encoding;
mod output;
mod replace;
mod resolve;
mod table;
mod util;

/// Infallible URL splitting into component ranges.
pub mod parser;

/// IP address canonicalization.
pub mod ip;

pub use canon::CharsetConverter;
pub use component::{Component, Parsed};
pub use output::Output;
pub use replace::{Replacement, Replacements};
pub use util::{
    add_standard_scheme, canonicalize, canonicalize_utf16, find_and_compare_scheme, is_standard,
    is_standard_scheme, replace_components, resolve_relative, resolve_relative_utf16,
    Canonicalized,
};
