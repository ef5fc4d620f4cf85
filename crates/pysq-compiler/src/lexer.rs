//! Lexer: source text to tokens.
//!
//! Whitespace separates tokens and is otherwise ignored. `( ) : = ,` are
//! single-character tokens; any run of letters, digits, `_` and `-` is a
//! literal, classified later by the parser. `#` starts a comment that runs
//! to the end of the line.

use crate::error::CompileError;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Turns a source string into a token vector ending with [`TokenKind::Eof`].
pub struct Lexer<'src> {
    source: &'src str,
    line: usize,
    column: usize,
}

impl<'src> Lexer<'src> {
    /// Create a lexer over `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            line: 1,
            column: 1,
        }
    }

    fn span(&self, offset: usize, len: usize) -> Span {
        Span {
            line: self.line,
            column: self.column,
            offset,
            len,
        }
    }

    /// Consume the lexer and produce all tokens.
    pub fn tokenize(mut self) -> Result<Vec<Token<'src>>, CompileError> {
        let source = self.source;
        let mut tokens = Vec::new();
        let mut chars = source.char_indices().peekable();

        while let Some(&(offset, ch)) = chars.peek() {
            match ch {
                '\n' => {
                    chars.next();
                    self.line += 1;
                    self.column = 1;
                }
                c if c.is_whitespace() => {
                    chars.next();
                    self.column += 1;
                }
                '#' => {
                    while let Some(&(_, c)) = chars.peek() {
                        if c == '\n' {
                            break;
                        }
                        chars.next();
                    }
                }
                '(' | ')' | ':' | '=' | ',' => {
                    let kind = match ch {
                        '(' => TokenKind::ParenOpen,
                        ')' => TokenKind::ParenClose,
                        ':' => TokenKind::Colon,
                        '=' => TokenKind::Equals,
                        _ => TokenKind::Comma,
                    };
                    let lexeme = &source[offset..offset + 1];
                    tokens.push(Token::new(kind, lexeme, self.span(offset, 1)));
                    chars.next();
                    self.column += 1;
                }
                c if is_literal_char(c) => {
                    let start_column = self.column;
                    let mut end = offset;
                    while let Some(&(o, c)) = chars.peek() {
                        if !is_literal_char(c) {
                            break;
                        }
                        end = o + c.len_utf8();
                        chars.next();
                        self.column += 1;
                    }
                    let span = Span {
                        line: self.line,
                        column: start_column,
                        offset,
                        len: end - offset,
                    };
                    tokens.push(Token::new(TokenKind::Literal, &source[offset..end], span));
                }
                c => {
                    return Err(CompileError::UnexpectedChar {
                        ch: c,
                        span: self.span(offset, c.len_utf8()),
                    });
                }
            }
        }

        tokens.push(Token::new(TokenKind::Eof, "", self.span(source.len(), 0)));
        Ok(tokens)
    }
}

/// Tokenize `source` in one call.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, CompileError> {
    Lexer::new(source).tokenize()
}

fn is_literal_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}
