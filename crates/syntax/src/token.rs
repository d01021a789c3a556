/// The kind of a lexical token produced by the reader.
///
/// `StartObject`/`StartArray` and their `End*` counterparts are emitted both
/// for braced containers and, synthetically, for root-level braceless
/// objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    PropertyName,
    Comment,
    String,
    Number,
    True,
    False,
    Null,
}

/// A single lexical token: a kind plus its decoded (for strings/names/
/// comments) or raw (for numbers) lexeme.
///
/// `StartObject`/`EndObject`/`StartArray`/`EndArray`/`True`/`False`/`Null`
/// carry an empty lexeme; the kind alone is meaningful for those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self { kind, lexeme: lexeme.into() }
    }

    pub fn start_object() -> Self {
        Self::new(TokenKind::StartObject, "")
    }

    pub fn end_object() -> Self {
        Self::new(TokenKind::EndObject, "")
    }

    pub fn start_array() -> Self {
        Self::new(TokenKind::StartArray, "")
    }

    pub fn end_array() -> Self {
        Self::new(TokenKind::EndArray, "")
    }

    pub fn property_name(name: impl Into<String>) -> Self {
        Self::new(TokenKind::PropertyName, name)
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Comment, text)
    }

    pub fn string(text: impl Into<String>) -> Self {
        Self::new(TokenKind::String, text)
    }

    pub fn number(lexeme: impl Into<String>) -> Self {
        Self::new(TokenKind::Number, lexeme)
    }

    pub fn r#true() -> Self {
        Self::new(TokenKind::True, "")
    }

    pub fn r#false() -> Self {
        Self::new(TokenKind::False, "")
    }

    pub fn null() -> Self {
        Self::new(TokenKind::Null, "")
    }
}
