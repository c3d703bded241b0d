use urlcanon::{
    add_standard_scheme, canonicalize, find_and_compare_scheme, is_standard, is_standard_scheme,
    Component,
};

#[test]
fn find_and_compare() {
    // Scheme found and matching.
    let (matches, scheme) = find_and_compare_scheme(b"http://www.com/", "http");
    assert!(matches);
    assert_eq!(scheme, Component::new(0, 4));

    // Found but different.
    let (matches, scheme) = find_and_compare_scheme(b"http://www.com/", "https");
    assert!(!matches);
    assert_eq!(scheme, Component::new(0, 4));

    // No scheme at all.
    let (matches, scheme) = find_and_compare_scheme(b"httpfoobar", "http");
    assert!(!matches);
    assert!(!scheme.is_present());

    // An empty scheme matches the empty string.
    let (matches, scheme) = find_and_compare_scheme(b":foo.com/", "");
    assert!(matches);
    assert_eq!(scheme, Component::new(0, 0));

    // But no scheme does not.
    let (matches, scheme) = find_and_compare_scheme(b"", "");
    assert!(!matches);
    assert!(!scheme.is_present());

    // Comparison is case-insensitive on the spec side.
    let (matches, _) = find_and_compare_scheme(b"HTTP://www.com/", "http");
    assert!(matches);
}

#[test]
fn standard_scheme_registry() {
    assert!(is_standard_scheme(b"http"));
    assert!(is_standard_scheme(b"HTTPS"));
    assert!(is_standard_scheme(b"file"));
    assert!(is_standard_scheme(b"ftp"));
    assert!(is_standard_scheme(b"gopher"));
    assert!(!is_standard_scheme(b"about"));
    assert!(!is_standard_scheme(b""));

    assert!(is_standard(b"http://foo/"));
    assert!(!is_standard(b"about:blank"));
    assert!(!is_standard(b"no scheme here"));

    // Before registration the scheme parses as an opaque path URL.
    let before = canonicalize(b"wacky:hello/world", None);
    assert_eq!(before.output.as_slice(), b"wacky:hello/world");

    assert!(!is_standard_scheme(b"wacky"));
    add_standard_scheme("wacky");
    assert!(is_standard_scheme(b"wacky"));
    assert!(is_standard_scheme(b"WaCkY"));

    // Registration is idempotent and ignores the empty scheme.
    add_standard_scheme("wacky");
    add_standard_scheme("");
    assert!(!is_standard_scheme(b""));

    // Afterwards it gets the full authority treatment.
    let after = canonicalize(b"wacky:hello/world", None);
    assert_eq!(after.output.as_slice(), b"wacky://hello/world");
}
