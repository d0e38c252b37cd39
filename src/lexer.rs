// src/lexer.rs
//! Cursor-based lexer over a submission batch buffer.
//!
//! One forward-only cursor is shared across every function definition in a
//! submission and is never rewound. The token model is deliberately simpler
//! than a C lexer: an identifier is a maximal `[A-Za-z0-9_]` run starting
//! with a letter or underscore; everything else (digit runs, multi-character
//! operators, string quotes) is emitted one character at a time.

/// Record separator: appears where a function name would otherwise start.
pub const RECORD_END: char = '\u{c}';

/// One lexical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Maximal identifier run (letters, digits, underscore).
    Ident(&'a str),
    /// Any single non-identifier-leading, non-whitespace character.
    Symbol(char),
}

impl Token<'_> {
    /// Appends the literal text this token matched.
    pub fn write_to(&self, out: &mut String) {
        match self {
            Token::Ident(s) => out.push_str(s),
            Token::Symbol(ch) => out.push(*ch),
        }
    }
}

fn is_ignore(ch: char) -> bool {
    ch == ' ' || ch == '\t' || ch == '\r' || ch == '\n'
}

fn is_ident_prefix(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

fn is_ident_allowed(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric()
}

/// Forward-only cursor over the raw batch buffer.
pub struct Lexer<'a> {
    buf: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(buf: &'a str) -> Self {
        Self { buf, pos: 0 }
    }

    /// True once the cursor has consumed the whole buffer.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn peek(&self) -> Option<char> {
        self.buf[self.pos..].chars().next()
    }

    fn bump(&mut self, ch: char) {
        self.pos += ch.len_utf8();
    }

    fn skip_ignored(&mut self) {
        while let Some(ch) = self.peek() {
            if is_ignore(ch) {
                self.bump(ch);
            } else {
                break;
            }
        }
    }

    /// Next token, or `None` at end of buffer. Whitespace is skipped; an
    /// identifier run is returned whole; any other character is returned
    /// alone and the cursor advances past it.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        self.skip_ignored();
        let first = self.peek()?;
        if is_ident_prefix(first) {
            let start = self.pos;
            while let Some(ch) = self.peek() {
                if is_ident_allowed(ch) {
                    self.bump(ch);
                } else {
                    break;
                }
            }
            Some(Token::Ident(&self.buf[start..self.pos]))
        } else {
            self.bump(first);
            Some(Token::Symbol(first))
        }
    }

    /// Reads a submission id: skip whitespace, consume a decimal digit run.
    /// No digits at the cursor (including end of buffer) yields 0, which
    /// terminates the batch.
    pub fn read_id(&mut self) -> u32 {
        self.skip_ignored();
        let mut id: u32 = 0;
        while let Some(ch) = self.peek() {
            if let Some(d) = ch.to_digit(10) {
                id = id.saturating_mul(10).saturating_add(d);
                self.bump(ch);
            } else {
                break;
            }
        }
        id
    }

    /// Advances past the next record separator, or to end of buffer if none
    /// remains. Used to resync after a malformed submission.
    pub fn skip_to_record_end(&mut self) {
        while let Some(ch) = self.peek() {
            self.bump(ch);
            if ch == RECORD_END {
                break;
            }
        }
    }
}
