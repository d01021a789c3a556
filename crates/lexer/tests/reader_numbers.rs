use jsonh_lexer::parse_number;
use jsonh_syntax::{JsonhReaderOptions, Token, TokenKind};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn only_value(input: &str) -> Token {
    let mut reader = jsonh_lexer::Reader::new(input, JsonhReaderOptions::default());
    let tokens: Vec<Token> = reader.read_element().map(|r| r.unwrap()).collect();
    tokens.into_iter().next().unwrap()
}

#[rstest]
#[case("0x5e3", TokenKind::Number)]
#[case("0x5e+3", TokenKind::Number)]
#[case("0e", TokenKind::String)]
#[case(".", TokenKind::String)]
#[case("-.", TokenKind::String)]
#[case("0b_100", TokenKind::Number)]
#[case("0b0e+_1", TokenKind::String)]
fn tokenizer_classifies_number_vs_quoteless(#[case] lexeme: &str, #[case] expected: TokenKind) {
    assert_eq!(only_value(lexeme).kind, expected);
}

#[test]
fn underscore_must_sit_between_two_digits_not_after_an_exponent_sign() {
    // "0b0e+_1": the underscore directly follows the exponent's "+" sign
    // rather than a digit, so the whole lexeme fails the number grammar and
    // falls back to a quoteless string (mirrors JsonhPyTests.py's
    // LeadingZeroWithExponent case for `0b0e+_1`).
    assert_eq!(parse_number("0b0e+_1", 15), None);
}

#[test]
fn hex_exponent_scale_is_always_a_power_of_ten() {
    // "0x5e+3" splits into hex mantissa "5" (=5) and a hex-alphabet
    // exponent "+3" (still =3 in this case); the resulting scale is
    // 10^3 (never 16^3), so 5 * 10^3 = 5000.
    assert_eq!(parse_number("0x5e+3", 15), Some(5000.0));
}

#[test]
fn hex_digit_e_without_a_following_sign_is_not_an_exponent_marker() {
    assert_eq!(parse_number("0x5e3", 15), Some(0x5e3 as f64));
}

#[test]
fn hex_exponent_digits_may_use_the_mantissas_own_alphabet() {
    // The exponent's digit characters are read using the mantissa's base
    // (hex here), so "a" (=10) is a valid exponent digit; the scale it
    // produces is still 10^10, not 16^10.
    assert_eq!(parse_number("0x1e+a", 15), Some(1e10));
}
