//! Recursive-descent parser for canonical type syntax.
//!
//! Grammar (lowest precedence first):
//!
//! ```text
//! type        = prefix* composition
//! prefix      = "@" Ident | SPECIFIER
//! composition = postfix ("&" postfix)*
//! postfix     = primary ("?" | "!" | "." "Type" | "." "Protocol")*
//! primary     = path | "[" type (":" type)? "]" | "(" list ")" closure_tail?
//! path        = Ident generics? ("." Ident generics?)*
//! closure_tail = "async"? "throws"? "->" type
//! ```

use super::lexer::{Token, TokenKind, lex};
use super::TypeParseError;
use crate::identity::TypeIdentity;

/// Ownership/existential specifiers accepted in prefix position.
pub const SPECIFIERS: &[&str] = &[
    "some",
    "any",
    "inout",
    "borrowing",
    "consuming",
    "sending",
    "isolated",
    "__owned",
    "__shared",
];

const MAX_DEPTH: u32 = 256;

/// Parse a complete type; trailing tokens are an error.
pub fn parse_type(source: &str) -> Result<TypeIdentity, TypeParseError> {
    let tokens = lex(source);
    if tokens.is_empty() {
        return Err(TypeParseError::Empty);
    }

    let mut parser = TypeParser {
        source,
        tokens,
        pos: 0,
        depth: 0,
    };
    let ty = parser.parse_type()?;
    match parser.peek() {
        None => Ok(ty),
        Some(token) => Err(parser.unexpected(token.clone(), "end of type")),
    }
}

struct TypeParser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    depth: u32,
}

impl<'src> TypeParser<'src> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn peek_nth_kind(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    fn text(&self, token: &Token) -> &'src str {
        &self.source[token.span.clone()]
    }

    fn peek_ident(&self) -> Option<&'src str> {
        let token = self.peek()?;
        (token.kind == TokenKind::Ident).then(|| self.text(token))
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, TypeParseError> {
        match self.bump() {
            Some(token) if token.kind == kind => Ok(token),
            Some(token) => Err(self.unexpected(token, kind.describe())),
            None => Err(TypeParseError::UnexpectedEnd {
                expected: kind.describe(),
            }),
        }
    }

    fn expect_ident(&mut self) -> Result<&'src str, TypeParseError> {
        let token = self.expect(TokenKind::Ident)?;
        Ok(self.text(&token))
    }

    fn unexpected(&self, token: Token, expected: &'static str) -> TypeParseError {
        if token.kind == TokenKind::Garbage {
            return TypeParseError::InvalidCharacters {
                offset: token.span.start,
                text: self.text(&token).to_owned(),
            };
        }
        TypeParseError::UnexpectedToken {
            offset: token.span.start,
            found: self.text(&token).to_owned(),
            expected,
        }
    }

    fn enter(&mut self) -> Result<(), TypeParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(TypeParseError::TooDeep);
        }
        Ok(())
    }

    fn exit(&mut self) {
        self.depth -= 1;
    }

    fn parse_type(&mut self) -> Result<TypeIdentity, TypeParseError> {
        self.enter()?;
        let result = self.parse_prefixed();
        self.exit();
        result
    }

    fn parse_prefixed(&mut self) -> Result<TypeIdentity, TypeParseError> {
        let mut attributes = Vec::new();
        let mut specifiers = Vec::new();

        loop {
            if self.eat(TokenKind::At) {
                attributes.push(self.expect_ident()?.to_owned());
                continue;
            }
            match self.peek_ident() {
                Some(word) if SPECIFIERS.contains(&word) && self.next_starts_type() => {
                    specifiers.push(word.to_owned());
                    self.pos += 1;
                }
                _ => break,
            }
        }

        let inner = self.parse_composition()?;
        if attributes.is_empty() && specifiers.is_empty() {
            return Ok(inner);
        }
        Ok(TypeIdentity::Attributed {
            specifiers,
            attributes,
            inner: Box::new(inner),
        })
    }

    /// Whether the token after the current one can begin a type, which is
    /// what distinguishes the specifier `any P` from a type named `any`.
    fn next_starts_type(&self) -> bool {
        matches!(
            self.peek_nth_kind(1),
            Some(TokenKind::Ident | TokenKind::ParenOpen | TokenKind::BracketOpen | TokenKind::At)
        )
    }

    fn parse_composition(&mut self) -> Result<TypeIdentity, TypeParseError> {
        let first = self.parse_postfix()?;
        if self.peek_kind() != Some(TokenKind::Ampersand) {
            return Ok(first);
        }

        let mut parts = vec![first];
        while self.eat(TokenKind::Ampersand) {
            parts.push(self.parse_postfix()?);
        }
        Ok(TypeIdentity::Composition(parts))
    }

    fn parse_postfix(&mut self) -> Result<TypeIdentity, TypeParseError> {
        let mut ty = self.parse_primary()?;
        loop {
            if self.eat(TokenKind::Question) {
                ty = TypeIdentity::Optional(Box::new(ty));
            } else if self.eat(TokenKind::Bang) {
                ty = TypeIdentity::ImplicitlyUnwrappedOptional(Box::new(ty));
            } else if let Some(is_protocol) = self.peek_metatype_suffix() {
                self.pos += 2;
                ty = TypeIdentity::Metatype {
                    inner: Box::new(ty),
                    is_protocol,
                };
            } else {
                return Ok(ty);
            }
        }
    }

    /// `.Type` / `.Protocol` at the current position.
    fn peek_metatype_suffix(&self) -> Option<bool> {
        if self.peek_kind() != Some(TokenKind::Dot) {
            return None;
        }
        let token = self.tokens.get(self.pos + 1)?;
        if token.kind != TokenKind::Ident {
            return None;
        }
        match self.text(token) {
            "Type" => Some(false),
            "Protocol" => Some(true),
            _ => None,
        }
    }

    fn parse_primary(&mut self) -> Result<TypeIdentity, TypeParseError> {
        match self.peek_kind() {
            Some(TokenKind::Ident) => self.parse_path(),
            Some(TokenKind::BracketOpen) => self.parse_collection(),
            Some(TokenKind::ParenOpen) => self.parse_parenthesized(),
            _ => match self.bump() {
                Some(token) => Err(self.unexpected(token, "type")),
                None => Err(TypeParseError::UnexpectedEnd { expected: "type" }),
            },
        }
    }

    fn parse_path(&mut self) -> Result<TypeIdentity, TypeParseError> {
        let name = self.expect_ident()?.to_owned();
        let generics = self.parse_generics()?;
        let mut ty = TypeIdentity::Simple { name, generics };

        while self.peek_kind() == Some(TokenKind::Dot) && self.peek_metatype_suffix().is_none() {
            self.pos += 1;
            let name = self.expect_ident()?.to_owned();
            let generics = self.parse_generics()?;
            ty = TypeIdentity::Nested {
                parent: Box::new(ty),
                name,
                generics,
            };
        }
        Ok(ty)
    }

    fn parse_generics(&mut self) -> Result<Vec<TypeIdentity>, TypeParseError> {
        if !self.eat(TokenKind::AngleOpen) {
            return Ok(Vec::new());
        }
        if let Some(token) = self.peek().filter(|t| t.kind == TokenKind::AngleClose) {
            return Err(self.unexpected(token.clone(), "generic argument"));
        }
        self.parse_list(TokenKind::AngleClose)
    }

    /// Comma-separated types up to and including `close`.
    fn parse_list(&mut self, close: TokenKind) -> Result<Vec<TypeIdentity>, TypeParseError> {
        let mut items = Vec::new();
        if self.eat(close) {
            return Ok(items);
        }
        loop {
            items.push(self.parse_type()?);
            if self.eat(TokenKind::Comma) {
                continue;
            }
            self.expect(close)?;
            return Ok(items);
        }
    }

    fn parse_collection(&mut self) -> Result<TypeIdentity, TypeParseError> {
        self.expect(TokenKind::BracketOpen)?;
        let key = self.parse_type()?;
        if self.eat(TokenKind::Colon) {
            let value = self.parse_type()?;
            self.expect(TokenKind::BracketClose)?;
            return Ok(TypeIdentity::Dictionary {
                key: Box::new(key),
                value: Box::new(value),
            });
        }
        self.expect(TokenKind::BracketClose)?;
        Ok(TypeIdentity::Array(Box::new(key)))
    }

    fn parse_parenthesized(&mut self) -> Result<TypeIdentity, TypeParseError> {
        self.expect(TokenKind::ParenOpen)?;
        let elements = self.parse_list(TokenKind::ParenClose)?;

        let mut is_async = false;
        let mut throws = false;
        if self.peek_ident() == Some("async") {
            self.pos += 1;
            is_async = true;
        }
        if self.peek_ident() == Some("throws") {
            self.pos += 1;
            throws = true;
        }

        if self.eat(TokenKind::Arrow) {
            let returns = self.parse_type()?;
            return Ok(TypeIdentity::Closure {
                arguments: elements,
                is_async,
                throws,
                returns: Box::new(returns),
            });
        }
        if is_async || throws {
            return match self.bump() {
                Some(token) => Err(self.unexpected(token, TokenKind::Arrow.describe())),
                None => Err(TypeParseError::UnexpectedEnd {
                    expected: TokenKind::Arrow.describe(),
                }),
            };
        }

        let mut elements = elements;
        if elements.len() == 1 {
            return Ok(elements.remove(0));
        }
        Ok(TypeIdentity::Tuple(elements))
    }
}
