//! Recursive descent parser for docblock types.
//!
//! ```text
//! type         := intersection ('|' intersection)*
//! intersection := postfix ('&' postfix)*
//! postfix      := atomic ('[]')*
//! atomic       := '?' postfix | '(' type ')' | name ('<' type (',' type)* '>')?
//! ```

use super::ast::{IdentifierTypeNode, TypeNode};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeParseError {
    #[error("unexpected end of type at offset {0}")]
    UnexpectedEnd(usize),
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },
}

/// Parse a type at the start of `input`.
///
/// Returns the type and the number of bytes consumed. The type must end at
/// whitespace or at the end of input.
pub fn parse_type_prefix(input: &str) -> Result<(TypeNode, usize), TypeParseError> {
    let mut parser = TypeParser { input, pos: 0 };
    let ty = parser.parse_type()?;
    match parser.peek() {
        None => Ok((ty, parser.pos)),
        Some(ch) if ch.is_whitespace() => Ok((ty, parser.pos)),
        Some(ch) => Err(TypeParseError::UnexpectedChar {
            ch,
            offset: parser.pos,
        }),
    }
}

/// Parse `input` as exactly one type.
pub fn parse_type(input: &str) -> Result<TypeNode, TypeParseError> {
    let input = input.trim();
    let (ty, consumed) = parse_type_prefix(input)?;
    match input[consumed..].chars().next() {
        None => Ok(ty),
        Some(ch) => Err(TypeParseError::UnexpectedChar {
            ch,
            offset: consumed,
        }),
    }
}

struct TypeParser<'a> {
    input: &'a str,
    pos: usize,
}

impl TypeParser<'_> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), TypeParseError> {
        match self.peek() {
            Some(ch) if ch == expected => {
                self.bump();
                Ok(())
            }
            Some(ch) => Err(TypeParseError::UnexpectedChar {
                ch,
                offset: self.pos,
            }),
            None => Err(TypeParseError::UnexpectedEnd(self.pos)),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn parse_type(&mut self) -> Result<TypeNode, TypeParseError> {
        let first = self.parse_intersection()?;
        if self.peek() != Some('|') {
            return Ok(first);
        }

        let mut members = vec![first];
        while self.eat('|') {
            members.push(self.parse_intersection()?);
        }
        Ok(TypeNode::Union(members))
    }

    fn parse_intersection(&mut self) -> Result<TypeNode, TypeParseError> {
        let first = self.parse_postfix()?;
        // `Foo &$param` is a by-reference parameter, not an intersection
        if self.peek() != Some('&') || self.input[self.pos + 1..].starts_with('$') {
            return Ok(first);
        }

        let mut members = vec![first];
        while self.peek() == Some('&') && !self.input[self.pos + 1..].starts_with('$') {
            self.bump();
            members.push(self.parse_postfix()?);
        }
        Ok(TypeNode::Intersection(members))
    }

    fn parse_postfix(&mut self) -> Result<TypeNode, TypeParseError> {
        let mut ty = self.parse_atomic()?;
        while self.input[self.pos..].starts_with("[]") {
            self.pos += 2;
            ty = TypeNode::Array(Box::new(ty));
        }
        Ok(ty)
    }

    fn parse_atomic(&mut self) -> Result<TypeNode, TypeParseError> {
        match self.peek() {
            Some('?') => {
                self.bump();
                Ok(TypeNode::Nullable(Box::new(self.parse_postfix()?)))
            }
            Some('(') => {
                self.bump();
                self.skip_whitespace();
                let inner = self.parse_type()?;
                self.skip_whitespace();
                self.expect(')')?;
                Ok(inner)
            }
            Some(_) => {
                let base = self.parse_identifier()?;
                if !self.eat('<') {
                    return Ok(TypeNode::Identifier(base));
                }

                let mut args = Vec::new();
                loop {
                    self.skip_whitespace();
                    args.push(self.parse_type()?);
                    self.skip_whitespace();
                    if !self.eat(',') {
                        break;
                    }
                }
                self.expect('>')?;
                Ok(TypeNode::Generic { base, args })
            }
            None => Err(TypeParseError::UnexpectedEnd(self.pos)),
        }
    }

    fn parse_identifier(&mut self) -> Result<IdentifierTypeNode, TypeParseError> {
        let start = self.pos;
        if self.input[start..].starts_with("$this") {
            self.pos += "$this".len();
            return Ok(IdentifierTypeNode::new("$this"));
        }

        self.eat('\\');
        match self.peek() {
            Some(ch) if ch.is_alphabetic() || ch == '_' => self.bump(),
            Some(ch) => {
                return Err(TypeParseError::UnexpectedChar {
                    ch,
                    offset: self.pos,
                });
            }
            None => return Err(TypeParseError::UnexpectedEnd(self.pos)),
        }
        while self
            .peek()
            .is_some_and(|ch| ch.is_alphanumeric() || ch == '_' || ch == '\\' || ch == '-')
        {
            self.bump();
        }

        Ok(IdentifierTypeNode::new(&self.input[start..self.pos]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(input: &str) -> String {
        parse_type(input).unwrap().to_string()
    }

    #[test]
    fn test_simple_and_namespaced_names() {
        assert_eq!(parse_type("int").unwrap(), TypeNode::identifier("int"));
        assert_eq!(roundtrip("\\App\\Entity\\User"), "\\App\\Entity\\User");
        assert_eq!(roundtrip("non-empty-array"), "non-empty-array");
        assert_eq!(roundtrip("$this"), "$this");
    }

    #[test]
    fn test_compound_types() {
        assert_eq!(roundtrip("string|null"), "string|null");
        assert_eq!(roundtrip("?Foo"), "?Foo");
        assert_eq!(roundtrip("Foo[][]"), "Foo[][]");
        assert_eq!(roundtrip("(int|string)[]"), "(int|string)[]");
        assert_eq!(roundtrip("A&B|null"), "(A&B)|null");
        assert_eq!(roundtrip("array<int, Foo>"), "array<int, Foo>");
        assert_eq!(roundtrip("Collection<Foo[]>|Foo"), "Collection<Foo[]>|Foo");
    }

    #[test]
    fn test_prefix_stops_at_whitespace() {
        let (ty, consumed) = parse_type_prefix("Foo|null $name description").unwrap();
        assert_eq!(ty.to_string(), "Foo|null");
        assert_eq!(consumed, "Foo|null".len());
    }

    #[test]
    fn test_by_reference_param_is_not_intersection() {
        let (ty, consumed) = parse_type_prefix("Foo &$bar").unwrap();
        assert_eq!(ty, TypeNode::identifier("Foo"));
        assert_eq!(consumed, 3);
    }

    #[test]
    fn test_invalid_types() {
        assert!(parse_type("").is_err());
        assert!(parse_type("$name").is_err());
        assert!(parse_type("array{a: int}").is_err());
        assert!(parse_type("Foo<int").is_err());
        assert!(parse_type_prefix("int|").is_err());
    }
}
