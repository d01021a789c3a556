use jsonh_lexer::Reader;
use jsonh_syntax::{JsonhReaderOptions, Token, TokenKind};
use pretty_assertions::assert_eq;

fn read_all(input: &str) -> Vec<Token> {
    let mut reader = Reader::new(input, JsonhReaderOptions::default());
    reader.read_element().map(|r| r.unwrap()).collect()
}

#[test]
fn quoted_object_pair_token_sequence() {
    let tokens = read_all(r#"{ "a": "b" }"#);
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::StartObject,
            TokenKind::PropertyName,
            TokenKind::String,
            TokenKind::EndObject,
        ]
    );
    assert_eq!(tokens[1].lexeme, "a");
    assert_eq!(tokens[2].lexeme, "b");
}

#[test]
fn nestable_comments_precede_a_number_token() {
    let input = "/* */\n/=* *=/\n/==*/=**=/*==/\n/=*/==**==/*=/\n0";
    let tokens = read_all(input);
    let comment_lexemes: Vec<&str> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Comment)
        .map(|t| t.lexeme.as_str())
        .collect();
    assert_eq!(comment_lexemes, vec![" ", " ", "/=**=/", "/==**==/"]);
    assert_eq!(tokens.last().unwrap().kind, TokenKind::Number);
    assert_eq!(tokens.last().unwrap().lexeme, "0");
}

#[test]
fn stripping_comments_does_not_change_the_structural_token_sequence() {
    let with_comments = read_all("[1, # one\n 2]");
    let without_comments: Vec<TokenKind> = with_comments
        .iter()
        .filter(|t| t.kind != TokenKind::Comment)
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        without_comments,
        vec![
            TokenKind::StartArray,
            TokenKind::Number,
            TokenKind::Number,
            TokenKind::EndArray,
        ]
    );
}
