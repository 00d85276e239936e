use std::{iter::Peekable, str::CharIndices};

use crate::error::ParseError;

/// A lexical token and the byte offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) pos: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Number(f64),
    Ident(String),
    Op(char),
    LParen,
    RParen,
    Comma,
}

impl TokenKind {
    /// Returns a short description used in error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Ident(name) => name.clone(),
            Self::Op(op) => op.to_string(),
            Self::LParen => "(".to_owned(),
            Self::RParen => ")".to_owned(),
            Self::Comma => ",".to_owned(),
        }
    }
}

/// Splits an expression into tokens.
///
/// Whitespace is skipped, `**` becomes `^`, and a `math.` qualifier in front
/// of a name is dropped.
pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    Lexer {
        source,
        chars: source.char_indices().peekable(),
    }
    .collect()
}

struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.chars.next_if(|&(_, c)| c.is_whitespace()).is_some() {}

        let &(pos, c) = self.chars.peek()?;
        let kind = match c {
            '0'..='9' | '.' => return Some(self.number(pos)),
            c if c.is_ascii_alphabetic() || c == '_' => return Some(self.ident(pos)),
            '*' => {
                self.chars.next();
                if self.chars.next_if(|&(_, c)| c == '*').is_some() {
                    TokenKind::Op('^')
                } else {
                    TokenKind::Op('*')
                }
            }
            '+' | '-' | '/' | '^' => {
                self.chars.next();
                TokenKind::Op(c)
            }
            '(' => {
                self.chars.next();
                TokenKind::LParen
            }
            ')' => {
                self.chars.next();
                TokenKind::RParen
            }
            ',' => {
                self.chars.next();
                TokenKind::Comma
            }
            other => return Some(Err(ParseError::UnexpectedChar { ch: other, pos })),
        };

        Some(Ok(Token { kind, pos }))
    }
}

impl Lexer<'_> {
    fn number(&mut self, start: usize) -> Result<Token, ParseError> {
        let mut end = start;
        self.digits(&mut end);
        if let Some((i, _)) = self.chars.next_if(|&(_, c)| c == '.') {
            end = i + 1;
            self.digits(&mut end);
        }

        // Exponent only when followed by digits, so `2e` stays `2` then `e`.
        let rest = &self.source[end..];
        let exponent_len = exponent_length(rest);
        if exponent_len > 0 {
            for _ in 0..exponent_len {
                self.chars.next();
            }
            end += exponent_len;
        }

        let literal = &self.source[start..end];
        literal
            .parse::<f64>()
            .map(|value| Token {
                kind: TokenKind::Number(value),
                pos: start,
            })
            .map_err(|_| ParseError::InvalidNumber {
                literal: literal.to_owned(),
                pos: start,
            })
    }

    /// Consumes a run of ASCII digits, advancing `end` past them.
    fn digits(&mut self, end: &mut usize) {
        while let Some((i, _)) = self.chars.next_if(|&(_, c)| c.is_ascii_digit()) {
            *end = i + 1;
        }
    }

    fn ident(&mut self, start: usize) -> Result<Token, ParseError> {
        let name = self.word();
        if name == "math" && self.chars.next_if(|&(_, c)| c == '.').is_some() {
            let next = self.chars.peek().copied();
            return match next {
                Some((pos, c)) if c.is_ascii_alphabetic() || c == '_' => Ok(Token {
                    kind: TokenKind::Ident(self.word()),
                    pos,
                }),
                Some((pos, ch)) => Err(ParseError::UnexpectedChar { ch, pos }),
                None => Err(ParseError::MissingOperand),
            };
        }

        Ok(Token {
            kind: TokenKind::Ident(name),
            pos: start,
        })
    }

    fn word(&mut self) -> String {
        let mut name = String::new();
        while let Some((_, c)) = self
            .chars
            .next_if(|&(_, c)| c.is_ascii_alphanumeric() || c == '_')
        {
            name.push(c);
        }
        name
    }
}

/// Returns the byte length of an exponent suffix like `e-3`, or zero.
fn exponent_length(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    if !matches!(bytes.first(), Some(b'e' | b'E')) {
        return 0;
    }
    let sign = usize::from(matches!(bytes.get(1), Some(b'+' | b'-')));
    let digits = bytes[1 + sign..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 { 0 } else { 1 + sign + digits }
}
