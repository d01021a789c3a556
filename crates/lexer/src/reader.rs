use std::collections::VecDeque;

use jsonh_syntax::{JsonhError, JsonhReaderOptions, JsonhResult, JsonhVersion, Token};

use crate::comment::skip_comments_and_whitespace;
use crate::cursor::{is_reserved, Cursor};
use crate::number::parse_number;
use crate::string::{
    decode_quoteless_value, read_key, read_multiquoted_string, read_quoted_string,
    read_quoteless_raw, read_quoteless_with_leading_at, read_verbatim_string,
};

const DEFAULT_DECIMALS: i32 = 15;

/// Reads JSONH tokens from a string.
///
/// A `Reader` is single-use per element: call [`Reader::read_element`] to
/// get the token stream for one root element (which, for an object or
/// array, includes everything nested inside it), then optionally
/// [`Reader::read_end_of_elements`] to confirm nothing but trivia follows.
pub struct Reader {
    cursor: Cursor,
    options: JsonhReaderOptions,
}

impl Reader {
    pub fn new(input: &str, options: JsonhReaderOptions) -> Self {
        Self { cursor: Cursor::new(input), options }
    }

    pub fn position(&self) -> usize {
        self.cursor.pos()
    }

    /// Returns a lazy, forward-only stream of tokens for the next root
    /// element. The first error terminates the stream; the caller may stop
    /// consuming early.
    pub fn read_element(&mut self) -> ElementTokens<'_> {
        ElementTokens {
            cursor: &mut self.cursor,
            options: self.options,
            pending: VecDeque::new(),
            stack: Vec::new(),
            root_done: false,
            trailing_checked: false,
            finished: false,
        }
    }

    /// Confirms only whitespace and comments remain in the input.
    pub fn read_end_of_elements(&mut self) -> JsonhResult<()> {
        check_trailing(&mut self.cursor, self.options)
    }
}

enum ObjectState {
    BeforeFirst,
    AwaitingValue,
    AfterValue,
}

enum ArrayState {
    BeforeFirst,
    AfterValue,
}

enum BracelessState {
    HavePendingName(String),
    AwaitingValue,
    AfterValue,
}

enum Frame {
    Object(ObjectState),
    Array(ArrayState),
    Braceless(BracelessState),
}

/// The token stream returned by [`Reader::read_element`].
///
/// Internally this is a non-recursive state machine: an explicit stack of
/// open containers plays the role a recursive-descent call stack would,
/// so the sequence can be produced one token at a time without Rust
/// generator syntax. Comments encountered while scanning past whitespace
/// are buffered (in order) and drained before the token that follows them.
pub struct ElementTokens<'r> {
    cursor: &'r mut Cursor,
    options: JsonhReaderOptions,
    pending: VecDeque<Token>,
    stack: Vec<Frame>,
    root_done: bool,
    trailing_checked: bool,
    finished: bool,
}

impl<'r> Iterator for ElementTokens<'r> {
    type Item = JsonhResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.step() {
            Ok(Some(tok)) => Some(Ok(tok)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl<'r> ElementTokens<'r> {
    fn step(&mut self) -> JsonhResult<Option<Token>> {
        loop {
            if let Some(tok) = self.pending.pop_front() {
                return Ok(Some(tok));
            }
            if self.stack.is_empty() && self.root_done {
                if !self.trailing_checked {
                    self.trailing_checked = true;
                    check_trailing(self.cursor, self.options)?;
                }
                return Ok(None);
            }
            self.advance()?;
        }
    }

    fn skip_into_pending(&mut self) -> JsonhResult<bool> {
        skip_comments_and_whitespace(self.cursor, &mut self.pending)
    }

    fn maybe_close_root(&mut self) {
        if self.stack.is_empty() {
            self.root_done = true;
        }
    }

    fn advance(&mut self) -> JsonhResult<()> {
        match self.stack.pop() {
            None => self.advance_root(),
            Some(Frame::Object(state)) => self.advance_object(state),
            Some(Frame::Array(state)) => self.advance_array(state),
            Some(Frame::Braceless(state)) => self.advance_braceless(state),
        }
    }

    fn advance_root(&mut self) -> JsonhResult<()> {
        self.skip_into_pending()?;
        match self.cursor.peek() {
            None => Err(JsonhError::new("Expected token, got end of input", self.cursor.pos())),
            Some('{') => {
                self.cursor.eat('{');
                self.pending.push_back(Token::start_object());
                self.stack.push(Frame::Object(ObjectState::BeforeFirst));
                Ok(())
            }
            Some('[') => {
                self.cursor.eat('[');
                self.pending.push_back(Token::start_array());
                self.stack.push(Frame::Array(ArrayState::BeforeFirst));
                Ok(())
            }
            _ => {
                if let Some(name) = self.try_speculative_braceless_key()? {
                    self.pending.push_back(Token::start_object());
                    self.stack.push(Frame::Braceless(BracelessState::HavePendingName(name)));
                    Ok(())
                } else {
                    let tok = self.read_primitive_value()?;
                    self.pending.push_back(tok);
                    self.root_done = true;
                    Ok(())
                }
            }
        }
    }

    /// Speculatively reads a property name followed by `:`, restoring the
    /// cursor unconditionally. A speculative-read error just means "not a
    /// braceless object"; the real error (if any) resurfaces when the
    /// value is read for real.
    fn try_speculative_braceless_key(&mut self) -> JsonhResult<Option<String>> {
        let save = self.cursor.save();
        let outcome = (|| -> JsonhResult<Option<String>> {
            let name = match read_key(self.cursor, self.options.version) {
                Ok(name) => name,
                Err(_) => return Ok(None),
            };
            let mut discard = VecDeque::new();
            let _ = skip_comments_and_whitespace(self.cursor, &mut discard);
            if self.cursor.peek() == Some(':') { Ok(Some(name)) } else { Ok(None) }
        })();
        self.cursor.restore(save);
        Ok(outcome.unwrap_or(None))
    }

    fn read_value_step(&mut self) -> JsonhResult<()> {
        self.skip_into_pending()?;
        match self.cursor.peek() {
            None => Err(JsonhError::new("Expected value, got end of input", self.cursor.pos())),
            Some('{') => {
                self.cursor.bump();
                self.pending.push_back(Token::start_object());
                self.stack.push(Frame::Object(ObjectState::BeforeFirst));
                Ok(())
            }
            Some('[') => {
                self.cursor.bump();
                self.pending.push_back(Token::start_array());
                self.stack.push(Frame::Array(ArrayState::BeforeFirst));
                Ok(())
            }
            _ => {
                let tok = self.read_primitive_value()?;
                self.pending.push_back(tok);
                Ok(())
            }
        }
    }

    fn read_primitive_value(&mut self) -> JsonhResult<Token> {
        match self.cursor.peek() {
            None => Err(JsonhError::new("Expected value, got end of input", self.cursor.pos())),
            Some(q) if q == '"' || q == '\'' => {
                let mut run = 0usize;
                while self.cursor.peek_at(run) == Some(q) {
                    run += 1;
                }
                if run >= 3 {
                    Ok(Token::string(read_multiquoted_string(self.cursor)?))
                } else {
                    Ok(Token::string(read_quoted_string(self.cursor)?))
                }
            }
            Some('@') => {
                if self.options.version == JsonhVersion::Current {
                    Ok(Token::string(read_verbatim_string(self.cursor)?))
                } else {
                    let (raw, start) = read_quoteless_with_leading_at(self.cursor);
                    self.classify_quoteless(raw, start)
                }
            }
            Some(c) if is_reserved(c) => {
                Err(JsonhError::new(format!("Unexpected character '{c}'"), self.cursor.pos()))
            }
            _ => {
                let (raw, start) = read_quoteless_raw(self.cursor, false);
                self.classify_quoteless(raw, start)
            }
        }
    }

    fn classify_quoteless(&self, raw: String, start: usize) -> JsonhResult<Token> {
        if raw.is_empty() {
            return Err(JsonhError::new("Expected value", start));
        }
        match raw.as_str() {
            "true" => Ok(Token::r#true()),
            "false" => Ok(Token::r#false()),
            "null" => Ok(Token::null()),
            _ => {
                if parse_number(&raw, DEFAULT_DECIMALS).is_some() {
                    Ok(Token::number(raw))
                } else {
                    Ok(Token::string(decode_quoteless_value(&raw, start)?))
                }
            }
        }
    }

    fn advance_object(&mut self, state: ObjectState) -> JsonhResult<()> {
        match state {
            ObjectState::BeforeFirst => {
                self.skip_into_pending()?;
                match self.cursor.peek() {
                    None => Err(JsonhError::new("Unterminated object", self.cursor.pos())),
                    Some('}') => {
                        self.cursor.bump();
                        self.pending.push_back(Token::end_object());
                        self.maybe_close_root();
                        Ok(())
                    }
                    _ => {
                        let name = read_key(self.cursor, self.options.version)?;
                        self.pending.push_back(Token::property_name(name));
                        self.stack.push(Frame::Object(ObjectState::AwaitingValue));
                        Ok(())
                    }
                }
            }
            ObjectState::AwaitingValue => {
                self.skip_into_pending()?;
                match self.cursor.peek() {
                    Some(':') => {
                        self.cursor.bump();
                        self.stack.push(Frame::Object(ObjectState::AfterValue));
                        self.read_value_step()
                    }
                    _ => Err(JsonhError::new("Expected ':' in object", self.cursor.pos())),
                }
            }
            ObjectState::AfterValue => {
                let had_newline = self.skip_into_pending()?;
                match self.cursor.peek() {
                    None => Err(JsonhError::new("Unterminated object", self.cursor.pos())),
                    Some('}') => {
                        self.cursor.bump();
                        self.pending.push_back(Token::end_object());
                        self.maybe_close_root();
                        Ok(())
                    }
                    Some(',') => {
                        self.cursor.bump();
                        self.skip_into_pending()?;
                        match self.cursor.peek() {
                            Some('}') => {
                                self.cursor.bump();
                                self.pending.push_back(Token::end_object());
                                self.maybe_close_root();
                                Ok(())
                            }
                            _ => {
                                let name = read_key(self.cursor, self.options.version)?;
                                self.pending.push_back(Token::property_name(name));
                                self.stack.push(Frame::Object(ObjectState::AwaitingValue));
                                Ok(())
                            }
                        }
                    }
                    _ if had_newline => {
                        let name = read_key(self.cursor, self.options.version)?;
                        self.pending.push_back(Token::property_name(name));
                        self.stack.push(Frame::Object(ObjectState::AwaitingValue));
                        Ok(())
                    }
                    _ => Err(JsonhError::new(
                        "Expected ',', newline, or '}' after object pair",
                        self.cursor.pos(),
                    )),
                }
            }
        }
    }

    fn advance_array(&mut self, state: ArrayState) -> JsonhResult<()> {
        match state {
            ArrayState::BeforeFirst => {
                self.skip_into_pending()?;
                match self.cursor.peek() {
                    None => Err(JsonhError::new("Unterminated array", self.cursor.pos())),
                    Some(']') => {
                        self.cursor.bump();
                        self.pending.push_back(Token::end_array());
                        self.maybe_close_root();
                        Ok(())
                    }
                    _ => {
                        self.stack.push(Frame::Array(ArrayState::AfterValue));
                        self.read_value_step()
                    }
                }
            }
            ArrayState::AfterValue => {
                let had_newline = self.skip_into_pending()?;
                match self.cursor.peek() {
                    None => Err(JsonhError::new("Unterminated array", self.cursor.pos())),
                    Some(']') => {
                        self.cursor.bump();
                        self.pending.push_back(Token::end_array());
                        self.maybe_close_root();
                        Ok(())
                    }
                    Some(',') => {
                        self.cursor.bump();
                        self.skip_into_pending()?;
                        match self.cursor.peek() {
                            Some(']') => {
                                self.cursor.bump();
                                self.pending.push_back(Token::end_array());
                                self.maybe_close_root();
                                Ok(())
                            }
                            _ => {
                                self.stack.push(Frame::Array(ArrayState::AfterValue));
                                self.read_value_step()
                            }
                        }
                    }
                    _ if had_newline => {
                        self.stack.push(Frame::Array(ArrayState::AfterValue));
                        self.read_value_step()
                    }
                    _ => Err(JsonhError::new(
                        "Expected ',', newline, or ']' after array item",
                        self.cursor.pos(),
                    )),
                }
            }
        }
    }

    fn advance_braceless(&mut self, state: BracelessState) -> JsonhResult<()> {
        match state {
            BracelessState::HavePendingName(name) => {
                self.pending.push_back(Token::property_name(name));
                self.stack.push(Frame::Braceless(BracelessState::AwaitingValue));
                Ok(())
            }
            BracelessState::AwaitingValue => {
                self.skip_into_pending()?;
                match self.cursor.peek() {
                    Some(':') => {
                        self.cursor.bump();
                        self.stack.push(Frame::Braceless(BracelessState::AfterValue));
                        self.read_value_step()
                    }
                    _ => Err(JsonhError::new("Expected ':' in braceless object", self.cursor.pos())),
                }
            }
            BracelessState::AfterValue => {
                let had_newline = self.skip_into_pending()?;
                match self.cursor.peek() {
                    None => {
                        self.pending.push_back(Token::end_object());
                        self.root_done = true;
                        Ok(())
                    }
                    Some(',') => {
                        self.cursor.bump();
                        self.skip_into_pending()?;
                        match self.cursor.peek() {
                            None => {
                                self.pending.push_back(Token::end_object());
                                self.root_done = true;
                                Ok(())
                            }
                            _ => {
                                let name = read_key(self.cursor, self.options.version)?;
                                self.pending.push_back(Token::property_name(name));
                                self.stack.push(Frame::Braceless(BracelessState::AwaitingValue));
                                Ok(())
                            }
                        }
                    }
                    _ if had_newline => {
                        let name = read_key(self.cursor, self.options.version)?;
                        self.pending.push_back(Token::property_name(name));
                        self.stack.push(Frame::Braceless(BracelessState::AwaitingValue));
                        Ok(())
                    }
                    _ => Err(JsonhError::new(
                        "Expected ',' or newline after braceless pair",
                        self.cursor.pos(),
                    )),
                }
            }
        }
    }
}

fn can_begin_value(c: char) -> bool {
    !matches!(c, ']' | '}' | ',' | ':' | '/' | '#')
}

fn check_trailing(cursor: &mut Cursor, options: JsonhReaderOptions) -> JsonhResult<()> {
    let mut discard = VecDeque::new();
    skip_comments_and_whitespace(cursor, &mut discard)?;
    match cursor.peek() {
        None => Ok(()),
        Some(c) if !can_begin_value(c) => {
            Err(JsonhError::new(format!("Unexpected trailing character '{c}'"), cursor.pos()))
        }
        Some(_) => {
            if options.parse_single_element {
                Err(JsonhError::new("Expected end of input", cursor.pos()))
            } else {
                Ok(())
            }
        }
    }
}
