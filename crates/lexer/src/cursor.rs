/// Characters that cannot appear unescaped in a quoteless string. Note
/// `\` is deliberately absent: backslash starts an escape sequence inside
/// a quoteless scan rather than terminating it.
pub(crate) const RESERVED_CHARS: &[char] =
    &[',', ':', '[', ']', '{', '}', '/', '#', '"', '\'', '@'];

pub(crate) fn is_reserved(c: char) -> bool {
    RESERVED_CHARS.contains(&c)
}

pub(crate) fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

pub(crate) fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{0009}'
            | '\u{000A}'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{000D}'
            | '\u{0085}'
    )
}

/// A forward-only, char-indexed cursor over the input. Restorable to a
/// saved position for the bounded lookahead the braceless-root and
/// nestable-comment detectors need.
#[derive(Debug, Clone)]
pub(crate) struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    pub fn new(input: &str) -> Self {
        Self { chars: input.chars().collect(), pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    pub fn prev(&self) -> Option<char> {
        if self.pos == 0 { None } else { self.chars.get(self.pos - 1).copied() }
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    pub fn advance_by(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.chars.len());
    }

    pub fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes a single newline sequence (`\n`, `\r`, or `\r\n`) starting
    /// at the cursor. Returns `false` if the cursor isn't on a newline.
    pub fn eat_newline(&mut self) -> bool {
        match self.peek() {
            Some('\n') => {
                self.pos += 1;
                true
            }
            Some('\r') => {
                self.pos += 1;
                if self.peek() == Some('\n') {
                    self.pos += 1;
                }
                true
            }
            _ => false,
        }
    }

    pub fn save(&self) -> usize {
        self.pos
    }

    pub fn restore(&mut self, saved: usize) {
        self.pos = saved;
    }

    pub fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    pub fn chars_slice(&self, start: usize, end: usize) -> Vec<char> {
        self.chars[start..end].to_vec()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Finds the first position at or after `from` where `count` copies
    /// of `ch` occur consecutively (a fixed-width substring search, same
    /// semantics as `str.find` on the repeated-quote delimiter).
    pub fn find_run(&self, from: usize, ch: char, count: usize) -> Option<usize> {
        let n = self.chars.len();
        let mut i = from;
        while i + count <= n {
            if self.chars[i..i + count].iter().all(|&c| c == ch) {
                return Some(i);
            }
            i += 1;
        }
        None
    }

    /// The whitespace-or-not prefix of the line containing `pos`: the
    /// characters from the nearest preceding newline (exclusive) up to
    /// `pos`.
    pub fn indent_before(&self, pos: usize) -> String {
        let mut i = pos;
        while i > 0 {
            let c = self.chars[i - 1];
            if c == '\n' || c == '\r' {
                break;
            }
            i -= 1;
        }
        self.chars[i..pos].iter().collect()
    }
}
