use jsonh_syntax::{JsonhError, JsonhResult, JsonhVersion};

use crate::cursor::{is_newline, is_reserved, is_whitespace, Cursor};
use crate::escape::{decode_lenient, decode_strict, reject_unescaped_slash};

/// Reads a quoteless span up to the next unescaped newline or reserved
/// character, trimmed, with backslash sequences left un-decoded (the
/// caller decodes separately so it can apply context-specific rules, e.g.
/// the value-only slash policy). A backslash before a newline is a line
/// continuation and is dropped entirely.
pub(crate) fn read_quoteless_raw(cursor: &mut Cursor, is_verbatim: bool) -> (String, usize) {
    let start = cursor.pos();
    let mut buf = String::new();
    while let Some(c) = cursor.peek() {
        if is_newline(c) {
            break;
        }
        if is_reserved(c) {
            break;
        }
        if c == '\\' && !is_verbatim {
            cursor.bump();
            match cursor.peek() {
                None => break,
                Some(n) if is_newline(n) => {
                    cursor.eat_newline();
                    continue;
                }
                Some(n) => {
                    buf.push('\\');
                    buf.push(n);
                    cursor.bump();
                    continue;
                }
            }
        }
        buf.push(c);
        cursor.bump();
    }
    (buf.trim().to_string(), start)
}

/// Reads a property name or quoteless-value candidate whose quote count
/// is below 3 (i.e. everything except multi-quoted strings): quoted,
/// verbatim, or plain quoteless.
pub(crate) fn read_key(cursor: &mut Cursor, version: JsonhVersion) -> JsonhResult<String> {
    match cursor.peek() {
        Some('"') | Some('\'') => read_quoted_string(cursor),
        Some('@') if version == JsonhVersion::Current => read_verbatim_string(cursor),
        Some('@') => {
            let (raw, start) = read_quoteless_with_leading_at(cursor);
            if raw.is_empty() {
                return Err(JsonhError::new("Expected key", cursor.pos()));
            }
            decode_quoteless_value(&raw, start)
        }
        _ => {
            let (raw, start) = read_quoteless_raw(cursor, false);
            if raw.is_empty() {
                return Err(JsonhError::new("Expected key", cursor.pos()));
            }
            decode_quoteless_value(&raw, start)
        }
    }
}

/// Reads a quoted string (`"..."` or `'...'`), decoding escapes but
/// preserving leading/trailing whitespace verbatim.
pub(crate) fn read_quoted_string(cursor: &mut Cursor) -> JsonhResult<String> {
    let open_pos = cursor.pos();
    let quote = cursor.bump().expect("caller checked for a quote");
    let raw_start = cursor.pos();
    let mut raw = String::new();
    loop {
        match cursor.peek() {
            None => return Err(JsonhError::new("Unterminated string", open_pos)),
            Some(c) if c == quote => {
                cursor.bump();
                break;
            }
            Some('\\') => {
                cursor.bump();
                match cursor.peek() {
                    None => return Err(JsonhError::new("Unterminated string escape", cursor.pos())),
                    Some(n) => {
                        raw.push('\\');
                        raw.push(n);
                        cursor.bump();
                        if n == '\r' && cursor.peek() == Some('\n') {
                            raw.push('\n');
                            cursor.bump();
                        }
                    }
                }
            }
            Some(c) => {
                raw.push(c);
                cursor.bump();
            }
        }
    }
    decode_strict(&raw, raw_start)
}

/// Reads a verbatim string: `@` followed by either a quoted string (no
/// escape processing at all) or a quoteless span (backslashes literal).
pub(crate) fn read_verbatim_string(cursor: &mut Cursor) -> JsonhResult<String> {
    let at_pos = cursor.pos();
    cursor.bump();
    match cursor.peek() {
        None => Err(JsonhError::new("Expected string immediately after '@'", at_pos)),
        Some(c) if is_whitespace(c) || c == '#' || c == '/' => {
            Err(JsonhError::new("Expected string immediately after '@'", at_pos))
        }
        Some(quote @ ('"' | '\'')) => {
            let mut quote_count = 0usize;
            while cursor.peek_at(quote_count) == Some(quote) {
                quote_count += 1;
            }
            cursor.advance_by(quote_count);
            let content_start = cursor.pos();
            let end = cursor
                .find_run(content_start, quote, quote_count)
                .ok_or_else(|| JsonhError::new("Unterminated verbatim string", at_pos))?;
            let text = cursor.slice(content_start, end);
            cursor.restore(end);
            cursor.advance_by(quote_count);
            Ok(text)
        }
        Some(_) => {
            let (raw, _) = read_quoteless_raw(cursor, true);
            Ok(raw)
        }
    }
}

/// `@` treated as an ordinary quoteless character (JSONH v1 compatibility):
/// consumes the leading `@` into the buffer, then continues a normal
/// quoteless scan.
pub(crate) fn read_quoteless_with_leading_at(cursor: &mut Cursor) -> (String, usize) {
    let start = cursor.pos();
    let mut buf = String::new();
    buf.push(cursor.bump().expect("caller checked for '@'"));
    while let Some(c) = cursor.peek() {
        if is_newline(c) || is_reserved(c) {
            break;
        }
        if c == '\\' {
            cursor.bump();
            match cursor.peek() {
                None => break,
                Some(n) if is_newline(n) => {
                    cursor.eat_newline();
                    continue;
                }
                Some(n) => {
                    buf.push('\\');
                    buf.push(n);
                    cursor.bump();
                    continue;
                }
            }
        }
        buf.push(c);
        cursor.bump();
    }
    (buf.trim().to_string(), start)
}

/// Decodes a quoteless token read for a *value* position: applies the
/// slash rejection policy in addition to the standard escape table, then
/// re-trims the decoded result (an escape can itself unfold into leading
/// or trailing whitespace that the pre-decode trim never saw).
pub(crate) fn decode_quoteless_value(raw: &str, start: usize) -> JsonhResult<String> {
    reject_unescaped_slash(raw, start)?;
    let decoded = decode_strict(raw, start)?;
    Ok(decoded.trim().to_string())
}

/// Reads a multi-quoted string: opened by a run of 3+ identical quote
/// characters, closed by the first subsequent run of the same length.
pub(crate) fn read_multiquoted_string(cursor: &mut Cursor) -> JsonhResult<String> {
    let open_pos = cursor.pos();
    let q = cursor.peek().expect("caller checked for a quote");
    let mut quote_count = 0usize;
    while cursor.peek_at(quote_count) == Some(q) {
        quote_count += 1;
    }
    cursor.advance_by(quote_count);
    let content_start = cursor.pos();
    let end = cursor
        .find_run(content_start, q, quote_count)
        .ok_or_else(|| JsonhError::new("Unterminated multi-quoted string", open_pos))?;

    let mut content = cursor.chars_slice(content_start, end);

    let has_first = starts_with_newline_frame(&content);
    let has_last = ends_with_newline_frame(&content);

    if has_first && has_last {
        strip_leading_newline_frame(&mut content);
        strip_trailing_newline_frame(&mut content);

        let closing_indent: Vec<char> = cursor.indent_before(end).chars().collect();
        if closing_indent.iter().all(|c| *c == ' ' || *c == '\t') {
            content = strip_common_indent(&content, &closing_indent);
        }
    }

    cursor.restore(end);
    cursor.advance_by(quote_count);

    let raw: String = content.into_iter().collect();
    Ok(decode_lenient(&raw))
}

fn starts_with_newline_frame(content: &[char]) -> bool {
    match content.first() {
        Some('\n') | Some('\r') => true,
        Some(' ') | Some('\t') => {
            if let Some(first_nl) = content.iter().position(|c| *c == '\n' || *c == '\r') {
                first_nl > 0 && content[..first_nl].iter().all(|c| *c == ' ' || *c == '\t')
            } else {
                false
            }
        }
        _ => false,
    }
}

fn ends_with_newline_frame(content: &[char]) -> bool {
    match content.last() {
        Some('\n') | Some('\r') => true,
        Some(' ') | Some('\t') => {
            if let Some(last_nl) = content.iter().rposition(|c| *c == '\n' || *c == '\r') {
                content[last_nl + 1..].iter().all(|c| *c == ' ' || *c == '\t')
            } else {
                false
            }
        }
        _ => false,
    }
}

fn strip_leading_newline_frame(content: &mut Vec<char>) {
    if content.starts_with(&['\r', '\n']) {
        content.drain(0..2);
    } else if matches!(content.first(), Some('\n') | Some('\r')) {
        content.remove(0);
    } else if let Some(first_nl) = content.iter().position(|c| *c == '\n' || *c == '\r') {
        if content.get(first_nl..first_nl + 2) == Some(&['\r', '\n']) {
            content.drain(0..first_nl + 2);
        } else {
            content.drain(0..first_nl + 1);
        }
    }
}

fn strip_trailing_newline_frame(content: &mut Vec<char>) {
    if content.ends_with(&['\r', '\n']) {
        content.truncate(content.len() - 2);
    } else if matches!(content.last(), Some('\n') | Some('\r')) {
        content.truncate(content.len() - 1);
    } else if let Some(last_nl) = content.iter().rposition(|c| *c == '\n' || *c == '\r') {
        content.truncate(last_nl);
    }
}

fn strip_common_indent(content: &[char], indent: &[char]) -> Vec<char> {
    if indent.is_empty() {
        return content.to_vec();
    }
    let mut out = Vec::with_capacity(content.len());
    let mut line_start = 0usize;
    let mut i = 0usize;
    while i < content.len() {
        let is_eol = content[i] == '\n' || content[i] == '\r';
        if is_eol {
            let mut end = i + 1;
            if content[i] == '\r' && content.get(i + 1) == Some(&'\n') {
                end += 1;
            }
            push_line_stripped(content, line_start, end, indent, &mut out);
            line_start = end;
            i = end;
        } else {
            i += 1;
        }
    }
    push_line_stripped(content, line_start, content.len(), indent, &mut out);
    out
}

fn push_line_stripped(content: &[char], start: usize, end: usize, indent: &[char], out: &mut Vec<char>) {
    if end <= start {
        return;
    }
    let line = &content[start..end];
    if line.starts_with(indent) {
        out.extend_from_slice(&line[indent.len()..]);
    } else {
        out.extend_from_slice(line);
    }
}
