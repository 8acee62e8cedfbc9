// tests/normalize.rs
use email_classifier::analyze::normalize;

#[test]
fn empty_is_ok() {
    assert_eq!(normalize(""), "");
}

#[test]
fn header_lines_are_dropped() {
    let s = "From: a@b.com\nSubject: Hi\nHello world";
    assert_eq!(normalize(s), "Hello world");
}

#[test]
fn all_four_headers_and_crlf() {
    let s = "From: x\r\nTo: y\r\nDate: today\r\nSubject: s\r\n\r\nBody line one\r\nline two";
    assert_eq!(normalize(s), "Body line one line two");
}

#[test]
fn header_prefix_mid_line_is_kept() {
    let s = "Please forward To: the team";
    assert_eq!(normalize(s), "Please forward To: the team");
}

#[test]
fn urls_and_emails_removed() {
    let s = "See http://a.example/x and HTTPS-less www.example.com, mail me@site.io.";
    assert_eq!(normalize(s), "See and HTTPS-less www.example.com, mail .");
}

#[test]
fn folds_unicode_whitespace() {
    let s = "A\u{00A0}\n\tB   C";
    assert_eq!(normalize(s), "A B C");
}
