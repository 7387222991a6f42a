//! Lexer for canonical type syntax.

use logos::Logos;
use std::ops::Range;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n]+")]
pub enum TokenKind {
    #[token("<")]
    AngleOpen,

    #[token(">")]
    AngleClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token(".")]
    Dot,

    #[token("?")]
    Question,

    #[token("!")]
    Bang,

    #[token("&")]
    Ampersand,

    #[token("->")]
    Arrow,

    #[token("@")]
    At,

    /// Identifier. Keywords (`async`, `throws`, `some`, ...) are identifiers
    /// too; the parser decides per context.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    /// Consecutive unrecognised characters, coalesced.
    Garbage,
}

impl TokenKind {
    pub fn describe(self) -> &'static str {
        match self {
            Self::AngleOpen => "`<`",
            Self::AngleClose => "`>`",
            Self::BracketOpen => "`[`",
            Self::BracketClose => "`]`",
            Self::ParenOpen => "`(`",
            Self::ParenClose => "`)`",
            Self::Comma => "`,`",
            Self::Colon => "`:`",
            Self::Dot => "`.`",
            Self::Question => "`?`",
            Self::Bang => "`!`",
            Self::Ampersand => "`&`",
            Self::Arrow => "`->`",
            Self::At => "`@`",
            Self::Ident => "identifier",
            Self::Garbage => "invalid characters",
        }
    }
}

/// Span-based token; text is sliced from the source on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

/// Tokenizes type text, coalescing runs of lexer errors into `Garbage`.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token {
                        kind: TokenKind::Garbage,
                        span: start..lexer.span().start,
                    });
                }
                tokens.push(Token {
                    kind,
                    span: lexer.span(),
                });
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token {
                        kind: TokenKind::Garbage,
                        span: start..source.len(),
                    });
                }
                break;
            }
        }
    }

    tokens
}
