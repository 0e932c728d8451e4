//! A small JSON5-subset parser restricted to object values with
//! unquoted (or quoted) keys.
//!
//! This backs `aglint` config comments, whose params are a JSON5 object
//! body with the surrounding braces implicit (the caller wraps the text
//! in `{...}` before calling [`parse_object`]).

use crate::error::{AgtreeError, Result};
use serde_json::{Map, Value};

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            bytes: s.as_bytes(),
            pos: 0,
        }
    }

    fn skip_ws(&mut self) {
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                b'/' if self.bytes.get(self.pos + 1) == Some(&b'/') => {
                    while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn expect(&mut self, c: u8) -> Result<()> {
        if self.peek() == Some(c) {
            self.pos += 1;
            Ok(())
        } else {
            Err(AgtreeError::Json5 {
                message: format!("expected '{}' at offset {}", c as char, self.pos),
            })
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        self.skip_ws();
        match self.peek() {
            Some(b'{') => self.parse_object_value(),
            Some(b'[') => self.parse_array(),
            Some(b'"') | Some(b'\'') => Ok(Value::String(self.parse_string()?)),
            Some(b't') | Some(b'f') => self.parse_bool(),
            Some(b'n') => self.parse_null(),
            Some(c) if c == b'-' || c.is_ascii_digit() => self.parse_number(),
            _ => Err(AgtreeError::Json5 {
                message: format!("unexpected character at offset {}", self.pos),
            }),
        }
    }

    fn parse_string(&mut self) -> Result<String> {
        let quote = self.peek().unwrap();
        self.pos += 1;
        let mut out = String::new();
        loop {
            match self.peek() {
                None => {
                    return Err(AgtreeError::Json5 {
                        message: "unterminated string".to_string(),
                    })
                }
                Some(c) if c == quote => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => {
                    self.pos += 1;
                    match self.peek() {
                        Some(b'n') => out.push('\n'),
                        Some(b't') => out.push('\t'),
                        Some(c) => out.push(c as char),
                        None => {
                            return Err(AgtreeError::Json5 {
                                message: "unterminated escape".to_string(),
                            })
                        }
                    }
                    self.pos += 1;
                }
                Some(c) => {
                    out.push(c as char);
                    self.pos += 1;
                }
            }
        }
        Ok(out)
    }

    fn parse_identifier(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == b'_' || c == b'$' {
                self.pos += 1;
            } else {
                break;
            }
        }
        String::from_utf8_lossy(&self.bytes[start..self.pos]).to_string()
    }

    fn parse_key(&mut self) -> Result<String> {
        self.skip_ws();
        match self.peek() {
            Some(b'"') | Some(b'\'') => self.parse_string(),
            Some(c) if c.is_ascii_alphabetic() || c == b'_' || c == b'$' => {
                Ok(self.parse_identifier())
            }
            _ => Err(AgtreeError::Json5 {
                message: format!("expected object key at offset {}", self.pos),
            }),
        }
    }

    fn parse_number(&mut self) -> Result<Value> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == b'.') {
            self.pos += 1;
        }
        let slice = std::str::from_utf8(&self.bytes[start..self.pos]).unwrap();
        slice
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| AgtreeError::Json5 {
                message: format!("invalid number '{slice}'"),
            })
    }

    fn parse_bool(&mut self) -> Result<Value> {
        if self.bytes[self.pos..].starts_with(b"true") {
            self.pos += 4;
            Ok(Value::Bool(true))
        } else if self.bytes[self.pos..].starts_with(b"false") {
            self.pos += 5;
            Ok(Value::Bool(false))
        } else {
            Err(AgtreeError::Json5 {
                message: "invalid literal".to_string(),
            })
        }
    }

    fn parse_null(&mut self) -> Result<Value> {
        if self.bytes[self.pos..].starts_with(b"null") {
            self.pos += 4;
            Ok(Value::Null)
        } else {
            Err(AgtreeError::Json5 {
                message: "invalid literal".to_string(),
            })
        }
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.expect(b'[')?;
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(b']') {
                self.pos += 1;
                break;
            }
            items.push(self.parse_value()?);
            self.skip_ws();
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                }
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                _ => {
                    return Err(AgtreeError::Json5 {
                        message: "expected ',' or ']'".to_string(),
                    })
                }
            }
        }
        Ok(Value::Array(items))
    }

    fn parse_object_value(&mut self) -> Result<Value> {
        self.expect(b'{')?;
        let mut map = Map::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(b'}') {
                self.pos += 1;
                break;
            }
            let key = self.parse_key()?;
            self.skip_ws();
            self.expect(b':')?;
            let value = self.parse_value()?;
            map.insert(key, value);
            self.skip_ws();
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                }
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                _ => {
                    return Err(AgtreeError::Json5 {
                        message: "expected ',' or '}'".to_string(),
                    })
                }
            }
        }
        Ok(Value::Object(map))
    }
}

/// Parse `text` (without surrounding braces) as a JSON5 object body.
/// Rejects an empty object.
pub fn parse_object(text: &str) -> Result<Value> {
    let wrapped = format!("{{{text}}}");
    let mut reader = Reader::new(&wrapped);
    let value = reader.parse_value()?;
    reader.skip_ws();
    if reader.pos != reader.bytes.len() {
        return Err(AgtreeError::Json5 {
            message: "trailing content after object".to_string(),
        });
    }
    match &value {
        Value::Object(map) if map.is_empty() => Err(AgtreeError::Json5 {
            message: "empty object is not allowed".to_string(),
        }),
        Value::Object(_) => Ok(value),
        _ => Err(AgtreeError::Json5 {
            message: "expected an object".to_string(),
        }),
    }
}

pub fn generate_object(value: &Value) -> String {
    let rendered = serde_json::to_string(value).unwrap_or_default();
    rendered[1..rendered.len() - 1].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unquoted_keys() {
        let value = parse_object("foo: true, bar: 'x'").unwrap();
        assert_eq!(value["foo"], Value::Bool(true));
        assert_eq!(value["bar"], Value::String("x".to_string()));
    }

    #[test]
    fn rejects_empty_object() {
        assert!(parse_object("").is_err());
    }

    #[test]
    fn parses_nested_array() {
        let value = parse_object("list: [1, 2, 3]").unwrap();
        assert_eq!(value["list"].as_array().unwrap().len(), 3);
    }
}
