use jsonh::{parse_element_from_string, JsonhReaderOptions};
use pretty_assertions::assert_eq;

#[test]
fn symmetric_indent_and_newline_frame_are_stripped() {
    let value =
        parse_element_from_string("\"\"\"\n  hello world\n  \"\"\"", JsonhReaderOptions::default())
            .unwrap();
    assert_eq!(value.as_str(), Some("hello world"));
}

#[test]
fn missing_trailing_newline_frame_leaves_both_sides_unstripped() {
    // The closing delimiter isn't alone on its own line, so the leading
    // newline frame is left in place even though it's present on its own.
    let value =
        parse_element_from_string("\"\"\"\n  hello world  \"\"\"", JsonhReaderOptions::default())
            .unwrap();
    assert_eq!(value.as_str(), Some("\n  hello world  "));
}

#[test]
fn missing_leading_newline_frame_leaves_both_sides_unstripped() {
    // The opening delimiter isn't alone on its own line, so the trailing
    // newline frame is left in place even though it's present on its own.
    let value =
        parse_element_from_string("\"\"\"  hello world\n  \"\"\"", JsonhReaderOptions::default())
            .unwrap();
    assert_eq!(value.as_str(), Some("  hello world\n  "));
}

#[test]
fn quote_count_must_match_on_both_sides() {
    let value = parse_element_from_string(
        "\"\"\"\" a quote: \" still inside \"\"\"\"",
        JsonhReaderOptions::default(),
    )
    .unwrap();
    assert_eq!(value.as_str(), Some(" a quote: \" still inside "));
}
