use jsonh::{parse_element_from_string, JsonhReaderOptions, JsonhVersion};
use pretty_assertions::assert_eq;

#[test]
fn current_version_treats_at_sign_as_a_verbatim_sigil_everywhere() {
    let value = parse_element_from_string(
        "{ a\\\\: b\\\\, @c\\\\: @d\\\\, @e\\\\: f\\\\ }",
        JsonhReaderOptions::default(),
    )
    .unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.get("a\\").unwrap().as_str(), Some("b\\"));
    assert_eq!(obj.get("c\\\\").unwrap().as_str(), Some("d\\\\"));
    assert_eq!(obj.get("e\\\\").unwrap().as_str(), Some("f\\"));
}

#[test]
fn v1_treats_a_leading_at_sign_as_an_ordinary_quoteless_character() {
    let options = JsonhReaderOptions { version: JsonhVersion::V1, ..Default::default() };
    let value =
        parse_element_from_string("{ a\\\\: b\\\\, @c\\\\: @d\\\\, @e\\\\: f\\\\ }", options).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.get("a\\").unwrap().as_str(), Some("b\\"));
    assert_eq!(obj.get("@c\\").unwrap().as_str(), Some("@d\\"));
    assert_eq!(obj.get("@e\\").unwrap().as_str(), Some("f\\"));
}

#[test]
fn verbatim_strings_may_open_with_a_triple_quote_run() {
    let value =
        parse_element_from_string(r#"{ @"a\\": @'''b\\''' }"#, JsonhReaderOptions::default())
            .unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.get("a\\\\").unwrap().as_str(), Some("b\\\\"));
}
