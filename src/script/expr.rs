//! Boolean component expressions
//!
//! `Components:` clauses name one or more components, optionally combined
//! with `and`, `or`, `not` and parentheses. A plain list (`a b` or `a, b`)
//! means any of them. Keywords are case-insensitive.

use std::collections::BTreeSet;
use std::fmt;

/// Parsed component expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Var(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

/// Why an expression could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError(pub String);

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    And,
    Or,
    Not,
    Comma,
    Open,
    Close,
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word = String::new();

    let flush = |word: &mut String, tokens: &mut Vec<Token>| {
        if word.is_empty() {
            return;
        }
        let token = match word.to_ascii_lowercase().as_str() {
            "and" => Token::And,
            "or" => Token::Or,
            "not" => Token::Not,
            _ => Token::Ident(word.clone()),
        };
        tokens.push(token);
        word.clear();
    };

    for c in text.chars() {
        match c {
            '(' | ')' | ',' => {
                flush(&mut word, &mut tokens);
                tokens.push(match c {
                    '(' => Token::Open,
                    ')' => Token::Close,
                    _ => Token::Comma,
                });
            }
            c if c.is_whitespace() => flush(&mut word, &mut tokens),
            c => word.push(c),
        }
    }
    flush(&mut word, &mut tokens);

    tokens
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn or(&mut self) -> Result<Expr, SyntaxError> {
        let mut lhs = self.and()?;
        loop {
            match self.peek() {
                Some(Token::Or | Token::Comma) => {
                    self.bump();
                }
                // juxtaposed operands form a list
                Some(Token::Ident(_) | Token::Not | Token::Open) => {}
                _ => break,
            }
            let rhs = self.and()?;
            lhs = Expr::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn and(&mut self) -> Result<Expr, SyntaxError> {
        let mut lhs = self.not()?;
        while self.peek() == Some(&Token::And) {
            self.bump();
            let rhs = self.not()?;
            lhs = Expr::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn not(&mut self) -> Result<Expr, SyntaxError> {
        if self.peek() == Some(&Token::Not) {
            self.bump();
            return Ok(Expr::Not(Box::new(self.not()?)));
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<Expr, SyntaxError> {
        match self.bump() {
            Some(Token::Ident(name)) => Ok(Expr::Var(name)),
            Some(Token::Open) => {
                let inner = self.or()?;
                match self.bump() {
                    Some(Token::Close) => Ok(inner),
                    _ => Err(SyntaxError("missing closing parenthesis".to_string())),
                }
            }
            Some(token) => Err(SyntaxError(format!("unexpected {token:?}"))),
            None => Err(SyntaxError("unexpected end of expression".to_string())),
        }
    }
}

impl Expr {
    /// Parse a `Components:` clause
    pub fn parse(text: &str) -> Result<Expr, SyntaxError> {
        let mut parser = Parser {
            tokens: tokenize(text),
            pos: 0,
        };
        let expr = parser.or()?;
        match parser.peek() {
            None => Ok(expr),
            Some(token) => Err(SyntaxError(format!("trailing {token:?}"))),
        }
    }

    /// Every variable name the expression mentions, in first-seen order
    pub fn vars(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_vars(&mut out);
        out
    }

    fn collect_vars<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Var(name) => {
                if !out.contains(&name.as_str()) {
                    out.push(name);
                }
            }
            Expr::Not(inner) => inner.collect_vars(out),
            Expr::And(a, b) | Expr::Or(a, b) => {
                a.collect_vars(out);
                b.collect_vars(out);
            }
        }
    }

    /// Evaluate with `is_selected` deciding each variable
    pub fn eval(&self, is_selected: &impl Fn(&str) -> bool) -> bool {
        match self {
            Expr::Var(name) => is_selected(name),
            Expr::Not(inner) => !inner.eval(is_selected),
            Expr::And(a, b) => a.eval(is_selected) && b.eval(is_selected),
            Expr::Or(a, b) => a.eval(is_selected) || b.eval(is_selected),
        }
    }

    /// Indices of the components for which the expression holds when that
    /// component alone is selected
    ///
    /// `resolve` maps a variable name to a component index.
    pub fn satisfying(
        &self,
        indices: impl IntoIterator<Item = usize>,
        resolve: &impl Fn(&str) -> Option<usize>,
    ) -> BTreeSet<usize> {
        indices
            .into_iter()
            .filter(|&selected| self.eval(&|name: &str| resolve(name) == Some(selected)))
            .collect()
    }
}
