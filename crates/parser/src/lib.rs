//! Parses JSONH — a human-friendly superset of JSON — into a [`Value`] tree.
//!
//! ```
//! use jsonh::parse_element_from_string;
//!
//! let value = parse_element_from_string("{ name: Bob, age: 30 }", Default::default()).unwrap();
//! assert_eq!(value.as_object().unwrap().get("name").unwrap().as_str(), Some("Bob"));
//! ```

mod builder;

use jsonh_lexer::Reader;
pub use jsonh_syntax::{JsonhError, JsonhReaderOptions, JsonhResult, JsonhVersion, Value};

use builder::Builder;

/// Parses one JSONH element from `input`.
///
/// If `options.parse_single_element` is set, trailing non-whitespace,
/// non-comment content after the element is rejected; otherwise it is
/// ignored (only the first element is read).
pub fn parse_element_from_string(input: &str, options: JsonhReaderOptions) -> JsonhResult<Value> {
    let mut reader = Reader::new(input, options);
    let mut builder = Builder::new();
    for token in reader.read_element() {
        builder.push(token?)?;
    }
    let value = builder.finish()?;
    reader.read_end_of_elements()?;
    Ok(value)
}

/// Convenience wrapper over [`parse_element_from_string`] that rejects any
/// trailing content, regardless of `options.parse_single_element`.
pub fn parse_single_element_from_string(input: &str, mut options: JsonhReaderOptions) -> JsonhResult<Value> {
    options.parse_single_element = true;
    parse_element_from_string(input, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_braced_object_with_quoted_and_unquoted_values() {
        let value = parse_element_from_string(r#"{ "a": 1, b: two }"#, JsonhReaderOptions::default()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("a").unwrap().as_f64(), Some(1.0));
        assert_eq!(obj.get("b").unwrap().as_str(), Some("two"));
    }

    #[test]
    fn parses_braceless_root_object() {
        let value = parse_element_from_string("a: 1\nb: 2", JsonhReaderOptions::default()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("a").unwrap().as_f64(), Some(1.0));
        assert_eq!(obj.get("b").unwrap().as_f64(), Some(2.0));
    }

    #[test]
    fn parses_array_with_comments_interleaved() {
        let value = parse_element_from_string("[\n  1, // one\n  2 # two\n]", JsonhReaderOptions::default()).unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0].as_f64(), Some(1.0));
        assert_eq!(arr[1].as_f64(), Some(2.0));
    }

    #[test]
    fn root_scalar_value() {
        let value = parse_element_from_string("  42  ", JsonhReaderOptions::default()).unwrap();
        assert_eq!(value.as_f64(), Some(42.0));
    }

    #[test]
    fn trailing_content_rejected_for_single_element_parse() {
        let err = parse_single_element_from_string("1 2", JsonhReaderOptions::default());
        assert!(err.is_err());
    }

    #[test]
    fn nested_braceless_object_in_array_errors() {
        let err = parse_element_from_string("[a: b]", JsonhReaderOptions::default());
        assert!(err.is_err());
    }
}
