use indexmap::IndexMap;
use jsonh_lexer::parse_number;
use jsonh_syntax::{JsonhError, JsonhResult, Token, TokenKind, Value};

const DEFAULT_DECIMALS: i32 = 15;

enum Open {
    Object(IndexMap<String, Value>, Option<String>),
    Array(Vec<Value>),
}

/// Assembles a token stream into a [`Value`] tree.
///
/// Mirrors the token-driven reader: every `Start*` token pushes a frame,
/// every `End*` token pops one and submits the finished value to whatever
/// is now on top (or to the result, if nothing is).
#[derive(Default)]
pub(crate) struct Builder {
    stack: Vec<Open>,
    result: Option<Value>,
}

impl Builder {
    pub(crate) fn new() -> Self {
        Self { stack: Vec::new(), result: None }
    }

    pub(crate) fn push(&mut self, token: Token) -> JsonhResult<()> {
        match token.kind {
            TokenKind::Comment => Ok(()),
            TokenKind::StartObject => {
                self.stack.push(Open::Object(IndexMap::new(), None));
                Ok(())
            }
            TokenKind::StartArray => {
                self.stack.push(Open::Array(Vec::new()));
                Ok(())
            }
            TokenKind::EndObject => {
                let value = match self.stack.pop() {
                    Some(Open::Object(map, _)) => Value::Object(map),
                    _ => return Err(JsonhError::new("Unbalanced end of object", 0)),
                };
                self.submit(value)
            }
            TokenKind::EndArray => {
                let value = match self.stack.pop() {
                    Some(Open::Array(items)) => Value::Array(items),
                    _ => return Err(JsonhError::new("Unbalanced end of array", 0)),
                };
                self.submit(value)
            }
            TokenKind::PropertyName => {
                match self.stack.last_mut() {
                    Some(Open::Object(_, pending)) => *pending = Some(token.lexeme),
                    _ => return Err(JsonhError::new("Property name outside an object", 0)),
                }
                Ok(())
            }
            TokenKind::String => self.submit(Value::String(token.lexeme)),
            TokenKind::Number => {
                let n = parse_number(&token.lexeme, DEFAULT_DECIMALS)
                    .ok_or_else(|| JsonhError::new("Invalid number lexeme", 0))?;
                self.submit(Value::Number(n))
            }
            TokenKind::True => self.submit(Value::Bool(true)),
            TokenKind::False => self.submit(Value::Bool(false)),
            TokenKind::Null => self.submit(Value::Null),
        }
    }

    fn submit(&mut self, value: Value) -> JsonhResult<()> {
        match self.stack.last_mut() {
            None => {
                self.result = Some(value);
                Ok(())
            }
            Some(Open::Array(items)) => {
                items.push(value);
                Ok(())
            }
            Some(Open::Object(map, pending)) => {
                let name = pending
                    .take()
                    .ok_or_else(|| JsonhError::new("Object value without a property name", 0))?;
                map.insert(name, value);
                Ok(())
            }
        }
    }

    pub(crate) fn finish(self) -> JsonhResult<Value> {
        self.result.ok_or_else(|| JsonhError::new("No element was read", 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builds_nested_object_and_array() {
        let mut builder = Builder::new();
        let tokens = vec![
            Token::start_object(),
            Token::property_name("a".to_string()),
            Token::start_array(),
            Token::number("1".to_string()),
            Token::number("2".to_string()),
            Token::end_array(),
            Token::end_object(),
        ];
        for tok in tokens {
            builder.push(tok).unwrap();
        }
        let value = builder.finish().unwrap();
        let obj = value.as_object().unwrap();
        let arr = obj.get("a").unwrap().as_array().unwrap();
        assert_eq!(arr.len(), 2);
    }

    #[test]
    fn duplicate_keys_overwrite_in_place() {
        let mut builder = Builder::new();
        let tokens = vec![
            Token::start_object(),
            Token::property_name("a".to_string()),
            Token::number("1".to_string()),
            Token::property_name("b".to_string()),
            Token::number("2".to_string()),
            Token::property_name("a".to_string()),
            Token::number("3".to_string()),
            Token::end_object(),
        ];
        for tok in tokens {
            builder.push(tok).unwrap();
        }
        let value = builder.finish().unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(obj.get("a").unwrap().as_f64(), Some(3.0));
    }
}
