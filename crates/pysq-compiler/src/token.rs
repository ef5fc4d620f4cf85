//! Tokens produced by the lexer.

use std::fmt;

use crate::span::Span;

/// Kind of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `(`
    ParenOpen,
    /// `)`
    ParenClose,
    /// `:`
    Colon,
    /// `=`
    Equals,
    /// `,`
    Comma,
    /// Any other run of non-separator characters: names, keywords, numbers.
    Literal,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Human-readable description used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            Self::ParenOpen => "`(`",
            Self::ParenClose => "`)`",
            Self::Colon => "`:`",
            Self::Equals => "`=`",
            Self::Comma => "`,`",
            Self::Literal => "literal",
            Self::Eof => "end of input",
        }
    }
}

/// A token borrowing its lexeme from the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'src> {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// The exact source text.
    pub lexeme: &'src str,
    /// Where it was found.
    pub span: Span,
}

impl<'src> Token<'src> {
    /// Create a token.
    pub fn new(kind: TokenKind, lexeme: &'src str, span: Span) -> Self {
        Self { kind, lexeme, span }
    }

    /// Whether this literal is a valid identifier
    /// (`[A-Za-z_][A-Za-z0-9_]*`).
    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Literal && is_identifier(self.lexeme)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Literal => write!(f, "{:?}({}) @ {}", self.kind, self.lexeme, self.span),
            TokenKind::Eof => write!(f, "Eof @ {}", self.span),
            _ => write!(f, "{:?} @ {}", self.kind, self.span),
        }
    }
}

pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(is_identifier("x"));
        assert!(is_identifier("_tmp1"));
        assert!(is_identifier("print"));
        assert!(!is_identifier("1x"));
        assert!(!is_identifier("-5"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn display_literal_shows_lexeme() {
        let span = Span {
            line: 2,
            column: 3,
            offset: 10,
            len: 1,
        };
        let tok = Token::new(TokenKind::Literal, "x", span);
        assert_eq!(tok.to_string(), "Literal(x) @ 2:3");
    }
}
