use std::collections::VecDeque;

use jsonh_syntax::{JsonhError, JsonhResult, Token};

use crate::cursor::{is_newline, is_whitespace, Cursor};

fn can_start_line_comment(cursor: &Cursor) -> bool {
    match cursor.prev() {
        None => true,
        Some(c) => is_whitespace(c),
    }
}

fn can_start_block_comment(cursor: &Cursor) -> bool {
    match cursor.prev() {
        None => true,
        Some(c) => is_whitespace(c) || matches!(c, '{' | '[' | ',' | ':'),
    }
}

/// Skips whitespace and comments, pushing a [`Token::comment`] into
/// `comments_out` for each one encountered (in order), and returns whether
/// at least one newline was crossed.
pub(crate) fn skip_comments_and_whitespace(
    cursor: &mut Cursor,
    comments_out: &mut VecDeque<Token>,
) -> JsonhResult<bool> {
    let mut had_newline = false;
    loop {
        let Some(c) = cursor.peek() else { break };
        if c == ' ' || c == '\t' {
            cursor.bump();
            continue;
        }
        if is_newline(c) {
            had_newline = true;
            cursor.eat_newline();
            continue;
        }
        if is_whitespace(c) {
            had_newline |= c == '\u{2028}' || c == '\u{2029}';
            cursor.bump();
            continue;
        }
        if c == '#' && can_start_line_comment(cursor) {
            comments_out.push_back(Token::comment(read_line_comment(cursor, 1)));
            continue;
        }
        if c == '/' && cursor.peek_at(1) == Some('/') && can_start_line_comment(cursor) {
            comments_out.push_back(Token::comment(read_line_comment(cursor, 2)));
            continue;
        }
        if c == '/' && cursor.peek_at(1) == Some('*') && can_start_block_comment(cursor) {
            let (text, nl) = read_block_comment(cursor)?;
            had_newline |= nl;
            comments_out.push_back(Token::comment(text));
            continue;
        }
        if c == '/' && cursor.peek_at(1) == Some('=') && can_start_block_comment(cursor) {
            if let Some((text, nl)) = try_read_nestable_block_comment(cursor)? {
                had_newline |= nl;
                comments_out.push_back(Token::comment(text));
                continue;
            }
        }
        break;
    }
    Ok(had_newline)
}

/// Reads a line comment, returning its content (without the `#`/`//`
/// marker).
fn read_line_comment(cursor: &mut Cursor, prefix_len: usize) -> String {
    cursor.advance_by(prefix_len);
    let content_start = cursor.pos();
    while let Some(c) = cursor.peek() {
        if is_newline(c) {
            break;
        }
        cursor.bump();
    }
    cursor.slice(content_start, cursor.pos())
}

/// Reads a non-nestable block comment, returning its content (without the
/// `/*`/`*/` markers).
fn read_block_comment(cursor: &mut Cursor) -> JsonhResult<(String, bool)> {
    let mut had_newline = false;
    cursor.advance_by(2);
    let content_start = cursor.pos();
    loop {
        match cursor.peek() {
            None => return Err(JsonhError::new("Unterminated block comment", cursor.pos())),
            Some(c) if is_newline(c) => {
                had_newline = true;
                cursor.eat_newline();
            }
            Some('*') if cursor.peek_at(1) == Some('/') => {
                let content = cursor.slice(content_start, cursor.pos());
                cursor.advance_by(2);
                return Ok((content, had_newline));
            }
            _ => {
                cursor.bump();
            }
        }
    }
}

/// Attempts to read a nestable block comment `/=*...*=/`. Returns `Ok(None)`
/// (restoring the cursor) if what follows `/=`-runs isn't actually a `*`,
/// since that means this wasn't a comment opener after all.
fn try_read_nestable_block_comment(cursor: &mut Cursor) -> JsonhResult<Option<(String, bool)>> {
    let start = cursor.pos();
    let mut had_newline = false;
    cursor.advance_by(1);
    let mut arity = 0usize;
    while cursor.peek() == Some('=') {
        arity += 1;
        cursor.bump();
    }
    if cursor.peek() != Some('*') {
        cursor.restore(start);
        return Ok(None);
    }
    cursor.bump();
    let content_start = cursor.pos();
    let mut stack = vec![arity];
    loop {
        match cursor.peek() {
            None => return Err(JsonhError::new("Unterminated nestable block comment", cursor.pos())),
            Some(c) if is_newline(c) => {
                had_newline = true;
                cursor.eat_newline();
            }
            Some('/') if cursor.peek_at(1) == Some('=') => {
                let save = cursor.pos();
                cursor.advance_by(1);
                let mut eq2 = 0usize;
                while cursor.peek() == Some('=') {
                    eq2 += 1;
                    cursor.bump();
                }
                if cursor.peek() == Some('*') {
                    cursor.bump();
                    stack.push(eq2);
                } else {
                    cursor.restore(save);
                    cursor.bump();
                }
            }
            Some('*') => {
                let k = *stack.last().unwrap();
                let closes = (0..k).all(|i| cursor.peek_at(1 + i) == Some('='))
                    && cursor.peek_at(1 + k) == Some('/');
                if closes {
                    let content_end = cursor.pos();
                    stack.pop();
                    cursor.advance_by(2 + k);
                    if stack.is_empty() {
                        return Ok(Some((cursor.slice(content_start, content_end), had_newline)));
                    }
                } else {
                    cursor.bump();
                }
            }
            Some(_) => {
                cursor.bump();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn comments_of(input: &str) -> (Vec<String>, bool) {
        let mut cursor = Cursor::new(input);
        let mut out = VecDeque::new();
        let had_newline = skip_comments_and_whitespace(&mut cursor, &mut out).unwrap();
        (out.into_iter().map(|t| t.lexeme).collect(), had_newline)
    }

    #[test]
    fn line_comment_lexeme_excludes_the_marker() {
        let (comments, _) = comments_of("# hello\n");
        assert_eq!(comments, vec![" hello"]);
    }

    #[test]
    fn slash_slash_comment_requires_boundary() {
        let mut cursor = Cursor::new("http://x");
        cursor.advance_by(4);
        let mut out = VecDeque::new();
        skip_comments_and_whitespace(&mut cursor, &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(cursor.pos(), 4);
    }

    #[test]
    fn nestable_block_comments_respect_arity_stack() {
        let input = "/* */\n/=* *=/\n/==*/=**=/*==/\n/=*/==**==/*=/\n0";
        let mut cursor = Cursor::new(input);
        let mut out = VecDeque::new();
        skip_comments_and_whitespace(&mut cursor, &mut out).unwrap();
        let comments: Vec<String> = out.into_iter().map(|t| t.lexeme).collect();
        assert_eq!(comments.len(), 4);
        assert_eq!(comments[0], " ");
        assert_eq!(comments[1], " ");
        assert_eq!(comments[2], "/=**=/");
        assert_eq!(comments[3], "/==**==/");
        assert_eq!(cursor.peek(), Some('0'));
    }
}
