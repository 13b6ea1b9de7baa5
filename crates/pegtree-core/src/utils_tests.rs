use crate::utils::{escape_json_string, escape_xml, truncate_text};

#[test]
fn json_escapes_quotes_and_controls() {
    assert_eq!(escape_json_string(r#"a"b"#), r#"a\"b"#);
    assert_eq!(escape_json_string("a\\b"), "a\\\\b");
    assert_eq!(escape_json_string("line\nnext\t"), "line\\nnext\\t");
    assert_eq!(escape_json_string("\u{1}"), "\\u0001");
}

#[test]
fn xml_escapes_markup() {
    assert_eq!(escape_xml("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
    assert_eq!(escape_xml(r#""q""#), "&quot;q&quot;");
    assert_eq!(escape_xml("plain"), "plain");
}

#[test]
fn truncate_keeps_short_text() {
    assert_eq!(truncate_text("short", 10), "short");
    assert_eq!(truncate_text("exactly", 7), "exactly");
}

#[test]
fn truncate_counts_chars_not_bytes() {
    assert_eq!(truncate_text("abcdef", 4), "abc…");
    assert_eq!(truncate_text("ééééé", 3), "éé…");
}
