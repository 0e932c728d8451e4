//! Tokenizer and precedence-climbing parser for `!#if` logical
//! expressions: `!`, `&&`, `||`, identifiers, and parentheses.

use crate::ast::expression::{ExpressionNode, LogicalOperator};
use crate::error::{AgtreeError, Result};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Not,
    And,
    Or,
    LParen,
    RParen,
}

fn tokenize(text: &str) -> Result<Vec<Token>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0usize;
    while i < bytes.len() {
        let c = bytes[i];
        if c == b' ' || c == b'\t' {
            i += 1;
            continue;
        }
        match c {
            b'(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            b')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            b'!' => {
                tokens.push(Token::Not);
                i += 1;
            }
            b'&' => {
                if bytes.get(i + 1) == Some(&b'&') {
                    tokens.push(Token::And);
                    i += 2;
                } else {
                    return Err(AgtreeError::syntax(format!(
                        "single '&' is not a valid operator at offset {i}"
                    )));
                }
            }
            b'|' => {
                if bytes.get(i + 1) == Some(&b'|') {
                    tokens.push(Token::Or);
                    i += 2;
                } else {
                    return Err(AgtreeError::syntax(format!(
                        "single '|' is not a valid operator at offset {i}"
                    )));
                }
            }
            c if c.is_ascii_alphabetic() => {
                let start = i;
                while i < bytes.len()
                    && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_')
                {
                    i += 1;
                }
                tokens.push(Token::Ident(text[start..i].to_string()));
            }
            c if c.is_ascii_digit() || c == b'_' => {
                return Err(AgtreeError::syntax(format!(
                    "identifiers must start with a letter at offset {i}"
                )));
            }
            _ => {
                return Err(AgtreeError::syntax(format!(
                    "unexpected character '{}' at offset {i}",
                    c as char
                )));
            }
        }
    }
    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let t = self.tokens.get(self.pos);
        self.pos += 1;
        t
    }

    fn parse_expr(&mut self) -> Result<ExpressionNode> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<ExpressionNode> {
        let mut left = self.parse_and()?;
        while matches!(self.peek(), Some(Token::Or)) {
            self.advance();
            let right = self.parse_and()?;
            left = ExpressionNode::Operator {
                op: LogicalOperator::Or,
                left: Box::new(left),
                right: Some(Box::new(right)),
            };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<ExpressionNode> {
        let mut left = self.parse_unary()?;
        while matches!(self.peek(), Some(Token::And)) {
            self.advance();
            let right = self.parse_unary()?;
            left = ExpressionNode::Operator {
                op: LogicalOperator::And,
                left: Box::new(left),
                right: Some(Box::new(right)),
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<ExpressionNode> {
        if matches!(self.peek(), Some(Token::Not)) {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(ExpressionNode::Operator {
                op: LogicalOperator::Not,
                left: Box::new(operand),
                right: None,
            });
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<ExpressionNode> {
        match self.advance() {
            Some(Token::Ident(name)) => Ok(ExpressionNode::Variable { name: name.clone() }),
            Some(Token::LParen) => {
                let inner = self.parse_expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(ExpressionNode::Parenthesis {
                        expression: Box::new(inner),
                    }),
                    _ => Err(AgtreeError::syntax("expected closing ')'")),
                }
            }
            Some(other) => Err(AgtreeError::syntax(format!(
                "unexpected token {other:?} where an expression was expected"
            ))),
            None => Err(AgtreeError::syntax("unexpected end of expression")),
        }
    }
}

pub fn parse(text: &str) -> Result<ExpressionNode> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(AgtreeError::syntax("empty logical expression"));
    }
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
    };
    let expr = parser.parse_expr()?;
    if parser.pos != tokens.len() {
        return Err(AgtreeError::syntax("unexpected trailing tokens in logical expression"));
    }
    Ok(expr)
}

pub fn generate(node: &ExpressionNode) -> String {
    match node {
        ExpressionNode::Variable { name } => name.clone(),
        ExpressionNode::Operator {
            op: LogicalOperator::Not,
            left,
            ..
        } => format!("!{}", generate(left)),
        ExpressionNode::Operator { op, left, right } => {
            format!(
                "{} {} {}",
                generate(left),
                op.as_str(),
                generate(right.as_ref().expect("binary operator must have a right operand"))
            )
        }
        ExpressionNode::Parenthesis { expression } => format!("({})", generate(expression)),
    }
}

/// Evaluate a logical expression against a `name -> bool` table.
/// Undefined variables default to `false` unless `strict` is set, in
/// which case they return an error.
pub fn evaluate(
    node: &ExpressionNode,
    vars: &HashMap<String, bool>,
    strict: bool,
) -> Result<bool> {
    match node {
        ExpressionNode::Variable { name } => match vars.get(name) {
            Some(v) => Ok(*v),
            None if strict => Err(AgtreeError::syntax(format!("undefined variable '{name}'"))),
            None => Ok(false),
        },
        ExpressionNode::Operator {
            op: LogicalOperator::Not,
            left,
            ..
        } => Ok(!evaluate(left, vars, strict)?),
        ExpressionNode::Operator {
            op: LogicalOperator::And,
            left,
            right,
        } => Ok(evaluate(left, vars, strict)?
            && evaluate(right.as_ref().unwrap(), vars, strict)?),
        ExpressionNode::Operator {
            op: LogicalOperator::Or,
            left,
            right,
        } => Ok(evaluate(left, vars, strict)?
            || evaluate(right.as_ref().unwrap(), vars, strict)?),
        ExpressionNode::Parenthesis { expression } => evaluate(expression, vars, strict),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_precedence_correctly() {
        let expr = parse("a || b && c").unwrap();
        // && binds tighter than ||, so this is a || (b && c)
        match expr {
            ExpressionNode::Operator {
                op: LogicalOperator::Or,
                right,
                ..
            } => assert!(matches!(
                *right.unwrap(),
                ExpressionNode::Operator {
                    op: LogicalOperator::And,
                    ..
                }
            )),
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn rejects_single_ampersand() {
        assert!(parse("a & b").is_err());
    }

    #[test]
    fn round_trips_generation() {
        let expr = parse("!(a && b) || c").unwrap();
        assert_eq!(generate(&expr), "!(a && b) || c");
    }

    #[test]
    fn evaluate_matches_classical_boolean_logic() {
        let expr = parse("a && !b || c").unwrap();
        for a in [false, true] {
            for b in [false, true] {
                for c in [false, true] {
                    let mut vars = HashMap::new();
                    vars.insert("a".to_string(), a);
                    vars.insert("b".to_string(), b);
                    vars.insert("c".to_string(), c);
                    let expected = (a && !b) || c;
                    assert_eq!(evaluate(&expr, &vars, true).unwrap(), expected);
                }
            }
        }
    }

    #[test]
    fn undefined_variable_defaults_to_false() {
        let expr = parse("missing").unwrap();
        let vars = HashMap::new();
        assert_eq!(evaluate(&expr, &vars, false).unwrap(), false);
        assert!(evaluate(&expr, &vars, true).is_err());
    }
}
