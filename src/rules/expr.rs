//! Rule expression language.
//!
//! A rule is either plain text (evaluating to that string) or a single
//! `${ ... }` template. Inside a template:
//!
//! - literals: `true`, `false`, `null`, integers, `'single'` or `"double"` quoted strings
//! - the root variable `invoice`
//! - property access by BG/BT code: `invoice.BG0004`, `invoice.BG0004[0].BT0029SellerIdentifier`;
//!   a code yields the ordered list of its occurrences
//! - indexing: `list[0]` or `list.get(0)`; out-of-range access is an error
//! - methods: `isEmpty()`, `size()`, `value()`, `scheme()`, `code()`, `startsWith(s)`
//! - operators, loosest first: `||`/`or`, `&&`/`and`, `==`/`eq` and `!=`/`ne`,
//!   prefix `!`/`not` and `empty`
//!
//! ```
//! use cenfattura::core::*;
//! use cenfattura::rules::{Expression, Value};
//!
//! let invoice = Invoice::new().with_term("BT0001", "FT-1");
//! let expr = Expression::parse("${invoice.BT0001[0].value() == 'FT-1'}").unwrap();
//! assert_eq!(expr.evaluate(&invoice).unwrap(), Value::Bool(true));
//! ```

use std::fmt;

use thiserror::Error;

use crate::core::catalogue::{is_group_code, normalize_code};
use crate::core::{BusinessGroup, BusinessTerm, Invoice, Node};

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum accepted expression size in bytes.
pub const MAX_EXPRESSION_BYTES: usize = 64 * 1024;
/// Maximum nesting of parentheses, prefix operators, and access chains.
pub const MAX_NESTING: usize = 32;
/// Name of the variable bound to the invoice under evaluation.
pub const ROOT_VARIABLE: &str = "invoice";

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Everything that can go wrong parsing or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    #[error("expression is empty")]
    Empty,

    #[error("expression exceeds size limit: {actual} bytes (max {max})")]
    TooLarge { max: usize, actual: usize },

    #[error("expression nesting exceeds limit of {max} at {position}")]
    TooDeep { max: usize, position: usize },

    #[error("unterminated `${{` template")]
    UnterminatedTemplate,

    #[error("literal text mixed with `${{...}}` templates is not supported")]
    MixedTemplate,

    #[error("unexpected `{found}` at {position}, expected {expected}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        position: usize,
    },

    #[error("unterminated string literal at {position}")]
    UnterminatedString { position: usize },

    #[error("invalid escape sequence at {position}")]
    InvalidEscape { position: usize },

    #[error("invalid number `{raw}` at {position}")]
    InvalidNumber { raw: String, position: usize },

    #[error("unknown variable `{0}`")]
    UnknownVariable(String),

    #[error("unknown property `{name}` on {on}")]
    UnknownProperty { name: String, on: &'static str },

    #[error("unknown method `{name}` on {on}")]
    UnknownMethod { name: String, on: &'static str },

    #[error("method `{method}` takes {expected} argument(s), got {found}")]
    Arity {
        method: String,
        expected: usize,
        found: usize,
    },

    #[error("index {index} out of range for length {len}")]
    IndexOutOfBounds { index: i64, len: usize },

    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("cannot compare {left} with {right}")]
    Incomparable {
        left: &'static str,
        right: &'static str,
    },
}

/// Result of evaluating an expression. Borrows from the invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    Invoice(&'a Invoice),
    Group(&'a BusinessGroup),
    Term(&'a BusinessTerm),
    Groups(&'a [BusinessGroup]),
    Terms(&'a [BusinessTerm]),
}

impl Value<'_> {
    /// Type name as shown in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Str(_) => "string",
            Self::Invoice(_) => "invoice",
            Self::Group(_) => "business group",
            Self::Term(_) => "business term",
            Self::Groups(_) => "business group list",
            Self::Terms(_) => "business term list",
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Str(s) => s.is_empty(),
            Self::Groups(g) => g.is_empty(),
            Self::Terms(t) => t.is_empty(),
            _ => false,
        }
    }
}

/// A parsed rule expression, reusable across invoices.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    body: Body,
}

#[derive(Debug, Clone, PartialEq)]
enum Body {
    Literal(String),
    Template(Expr),
}

impl Expression {
    /// Parse `input`.
    ///
    /// # Errors
    /// Returns [`ExpressionError`] for size and nesting violations, lexical
    /// errors, and syntax errors.
    pub fn parse(input: &str) -> Result<Self, ExpressionError> {
        if input.len() > MAX_EXPRESSION_BYTES {
            return Err(ExpressionError::TooLarge {
                max: MAX_EXPRESSION_BYTES,
                actual: input.len(),
            });
        }
        let body = match template_body(input)? {
            None => Body::Literal(input.to_string()),
            Some(inner) => {
                let tokens = Lexer::new(inner).lex()?;
                let mut parser = Parser::new(tokens);
                let expr = parser.parse_expression()?;
                parser.expect_eof()?;
                Body::Template(expr)
            }
        };
        Ok(Self {
            source: input.to_string(),
            body,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluate against `invoice`.
    ///
    /// # Errors
    /// Returns [`ExpressionError`] for unknown names, type mismatches, and
    /// out-of-range indexing.
    pub fn evaluate<'a>(&self, invoice: &'a Invoice) -> Result<Value<'a>, ExpressionError> {
        match &self.body {
            Body::Literal(text) => Ok(Value::Str(text.clone())),
            Body::Template(expr) => eval(expr, invoice),
        }
    }
}

/// Inner text of a `${...}` template, or `None` for plain text.
fn template_body(input: &str) -> Result<Option<&str>, ExpressionError> {
    let trimmed = input.trim();
    match trimmed.strip_prefix("${") {
        Some(rest) => rest
            .strip_suffix('}')
            .map(Some)
            .ok_or(ExpressionError::UnterminatedTemplate),
        None if trimmed.contains("${") => Err(ExpressionError::MixedTemplate),
        None => Ok(None),
    }
}

// ============================================================================
// SECTION: Lexer
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Int(i64),
    Str(String),
    True,
    False,
    Null,
    Empty,
    Dot,
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Not,
    And,
    Or,
    Eq,
    Ne,
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(name) => f.write_str(name),
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "'{s}'"),
            Self::True => f.write_str("true"),
            Self::False => f.write_str("false"),
            Self::Null => f.write_str("null"),
            Self::Empty => f.write_str("empty"),
            Self::Dot => f.write_str("."),
            Self::Comma => f.write_str(","),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
            Self::LBracket => f.write_str("["),
            Self::RBracket => f.write_str("]"),
            Self::Not => f.write_str("!"),
            Self::And => f.write_str("&&"),
            Self::Or => f.write_str("||"),
            Self::Eq => f.write_str("=="),
            Self::Ne => f.write_str("!="),
            Self::Eof => f.write_str("end of expression"),
        }
    }
}

#[derive(Debug, Clone)]
struct SpannedToken {
    token: Token,
    position: usize,
}

struct Lexer<'a> {
    input: &'a str,
    offset: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, offset: 0 }
    }

    fn lex(mut self) -> Result<Vec<SpannedToken>, ExpressionError> {
        let bytes = self.input.as_bytes();
        let mut tokens = Vec::new();

        while let Some(&byte) = bytes.get(self.offset) {
            let start = self.offset;
            let token = match byte {
                b' ' | b'\t' | b'\n' | b'\r' => {
                    self.offset += 1;
                    continue;
                }
                b'.' => self.single(Token::Dot),
                b',' => self.single(Token::Comma),
                b'(' => self.single(Token::LParen),
                b')' => self.single(Token::RParen),
                b'[' => self.single(Token::LBracket),
                b']' => self.single(Token::RBracket),
                b'!' => {
                    if bytes.get(start + 1) == Some(&b'=') {
                        self.offset += 2;
                        Token::Ne
                    } else {
                        self.single(Token::Not)
                    }
                }
                b'=' => self.pair(b'=', Token::Eq, "==")?,
                b'&' => self.pair(b'&', Token::And, "&&")?,
                b'|' => self.pair(b'|', Token::Or, "||")?,
                quote @ (b'\'' | b'"') => self.string(quote)?,
                b'0'..=b'9' => self.number()?,
                b if b.is_ascii_alphabetic() || b == b'_' => self.word(),
                _ => {
                    let found = self.input[start..]
                        .chars()
                        .next()
                        .map(String::from)
                        .unwrap_or_default();
                    return Err(ExpressionError::UnexpectedToken {
                        expected: "an expression",
                        found,
                        position: start,
                    });
                }
            };
            tokens.push(SpannedToken {
                token,
                position: start,
            });
        }

        if tokens.is_empty() {
            return Err(ExpressionError::Empty);
        }
        tokens.push(SpannedToken {
            token: Token::Eof,
            position: self.offset,
        });
        Ok(tokens)
    }

    fn single(&mut self, token: Token) -> Token {
        self.offset += 1;
        token
    }

    /// Two-character operator whose characters are both `second`'s kind.
    fn pair(
        &mut self,
        second: u8,
        token: Token,
        expected: &'static str,
    ) -> Result<Token, ExpressionError> {
        let start = self.offset;
        if self.input.as_bytes().get(start + 1) == Some(&second) {
            self.offset += 2;
            Ok(token)
        } else {
            Err(ExpressionError::UnexpectedToken {
                expected,
                found: self.input[start..start + 1].to_string(),
                position: start,
            })
        }
    }

    fn string(&mut self, quote: u8) -> Result<Token, ExpressionError> {
        let start = self.offset;
        let bytes = self.input.as_bytes();
        let mut out = String::new();
        self.offset += 1;
        let mut chunk = self.offset;

        while let Some(&b) = bytes.get(self.offset) {
            if b == b'\\' {
                out.push_str(&self.input[chunk..self.offset]);
                match bytes.get(self.offset + 1) {
                    Some(&escaped @ (b'\\' | b'\'' | b'"')) => out.push(char::from(escaped)),
                    Some(_) => {
                        return Err(ExpressionError::InvalidEscape {
                            position: self.offset,
                        });
                    }
                    None => break,
                }
                self.offset += 2;
                chunk = self.offset;
            } else if b == quote {
                out.push_str(&self.input[chunk..self.offset]);
                self.offset += 1;
                return Ok(Token::Str(out));
            } else {
                self.offset += 1;
            }
        }
        Err(ExpressionError::UnterminatedString { position: start })
    }

    fn number(&mut self) -> Result<Token, ExpressionError> {
        let start = self.offset;
        self.consume_while(|b| b.is_ascii_digit());
        let raw = &self.input[start..self.offset];
        raw.parse::<i64>()
            .map(Token::Int)
            .map_err(|_| ExpressionError::InvalidNumber {
                raw: raw.to_string(),
                position: start,
            })
    }

    fn word(&mut self) -> Token {
        let start = self.offset;
        self.consume_while(|b| b.is_ascii_alphanumeric() || b == b'_');
        match &self.input[start..self.offset] {
            "true" => Token::True,
            "false" => Token::False,
            "null" => Token::Null,
            "empty" => Token::Empty,
            "and" => Token::And,
            "or" => Token::Or,
            "not" => Token::Not,
            "eq" => Token::Eq,
            "ne" => Token::Ne,
            other => Token::Ident(other.to_string()),
        }
    }

    fn consume_while(&mut self, condition: impl Fn(u8) -> bool) {
        while let Some(&b) = self.input.as_bytes().get(self.offset) {
            if !condition(b) {
                break;
            }
            self.offset += 1;
        }
    }
}

// ============================================================================
// SECTION: Parser
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    Var(String),
    Property {
        target: Box<Expr>,
        name: String,
    },
    Index {
        target: Box<Expr>,
        index: Box<Expr>,
    },
    Call {
        target: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
    Not(Box<Expr>),
    Empty(Box<Expr>),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Eq(Box<Expr>, Box<Expr>),
    Ne(Box<Expr>, Box<Expr>),
}

/// Recursive-descent parser. `depth` bounds the height of the resulting
/// tree so evaluation cannot exhaust the stack.
struct Parser {
    tokens: Vec<SpannedToken>,
    index: usize,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<SpannedToken>) -> Self {
        Self {
            tokens,
            index: 0,
            depth: 0,
        }
    }

    fn parse_expression(&mut self) -> Result<Expr, ExpressionError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, ExpressionError> {
        let mut parts = vec![self.parse_and()?];
        while self.matches(&Token::Or) {
            parts.push(self.parse_and()?);
        }
        Ok(if parts.len() == 1 {
            parts.remove(0)
        } else {
            Expr::Or(parts)
        })
    }

    fn parse_and(&mut self) -> Result<Expr, ExpressionError> {
        let mut parts = vec![self.parse_equality()?];
        while self.matches(&Token::And) {
            parts.push(self.parse_equality()?);
        }
        Ok(if parts.len() == 1 {
            parts.remove(0)
        } else {
            Expr::And(parts)
        })
    }

    fn parse_equality(&mut self) -> Result<Expr, ExpressionError> {
        let left = self.parse_unary()?;
        if self.matches(&Token::Eq) {
            Ok(Expr::Eq(Box::new(left), Box::new(self.parse_unary()?)))
        } else if self.matches(&Token::Ne) {
            Ok(Expr::Ne(Box::new(left), Box::new(self.parse_unary()?)))
        } else {
            Ok(left)
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, ExpressionError> {
        if self.matches(&Token::Not) {
            self.enter()?;
            let inner = self.parse_unary()?;
            self.depth -= 1;
            return Ok(Expr::Not(Box::new(inner)));
        }
        if self.matches(&Token::Empty) {
            self.enter()?;
            let inner = self.parse_unary()?;
            self.depth -= 1;
            return Ok(Expr::Empty(Box::new(inner)));
        }
        self.parse_postfix()
    }

    /// Primary followed by any chain of `.name`, `.method(args)`, `[index]`.
    fn parse_postfix(&mut self) -> Result<Expr, ExpressionError> {
        let saved = self.depth;
        let mut expr = self.parse_primary()?;

        loop {
            if self.matches(&Token::Dot) {
                self.enter()?;
                let name = self.expect_ident()?;
                expr = if self.matches(&Token::LParen) {
                    Expr::Call {
                        target: Box::new(expr),
                        method: name,
                        args: self.parse_args()?,
                    }
                } else {
                    Expr::Property {
                        target: Box::new(expr),
                        name,
                    }
                };
            } else if self.matches(&Token::LBracket) {
                self.enter()?;
                let index = self.parse_expression()?;
                self.expect(&Token::RBracket, "`]`")?;
                expr = Expr::Index {
                    target: Box::new(expr),
                    index: Box::new(index),
                };
            } else {
                break;
            }
        }

        self.depth = saved;
        Ok(expr)
    }

    fn parse_args(&mut self) -> Result<Vec<Expr>, ExpressionError> {
        let mut args = Vec::new();
        if self.matches(&Token::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            if self.matches(&Token::Comma) {
                continue;
            }
            self.expect(&Token::RParen, "`,` or `)`")?;
            return Ok(args);
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ExpressionError> {
        let current = self.current().clone();
        self.advance();
        match current.token {
            Token::True => Ok(Expr::Bool(true)),
            Token::False => Ok(Expr::Bool(false)),
            Token::Null => Ok(Expr::Null),
            Token::Int(n) => Ok(Expr::Int(n)),
            Token::Str(s) => Ok(Expr::Str(s)),
            Token::Ident(name) => Ok(Expr::Var(name)),
            Token::LParen => {
                self.enter()?;
                let inner = self.parse_expression()?;
                self.expect(&Token::RParen, "`)`")?;
                self.depth -= 1;
                Ok(inner)
            }
            other => Err(ExpressionError::UnexpectedToken {
                expected: "an expression",
                found: other.to_string(),
                position: current.position,
            }),
        }
    }

    fn enter(&mut self) -> Result<(), ExpressionError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(ExpressionError::TooDeep {
                max: MAX_NESTING,
                position: self.current().position,
            });
        }
        Ok(())
    }

    fn current(&self) -> &SpannedToken {
        // lex() always ends the stream with Eof and advance() never passes it
        &self.tokens[self.index]
    }

    fn advance(&mut self) {
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
    }

    fn matches(&mut self, token: &Token) -> bool {
        if self.current().token == *token {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token, expected: &'static str) -> Result<(), ExpressionError> {
        if self.matches(token) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_ident(&mut self) -> Result<String, ExpressionError> {
        if let Token::Ident(name) = &self.current().token {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.unexpected("a property or method name"))
        }
    }

    fn expect_eof(&self) -> Result<(), ExpressionError> {
        if self.current().token == Token::Eof {
            Ok(())
        } else {
            Err(self.unexpected("end of expression"))
        }
    }

    fn unexpected(&self, expected: &'static str) -> ExpressionError {
        let current = self.current();
        ExpressionError::UnexpectedToken {
            expected,
            found: current.token.to_string(),
            position: current.position,
        }
    }
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

fn eval<'a>(expr: &Expr, invoice: &'a Invoice) -> Result<Value<'a>, ExpressionError> {
    match expr {
        Expr::Null => Ok(Value::Null),
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::Int(n) => Ok(Value::Int(*n)),
        Expr::Str(s) => Ok(Value::Str(s.clone())),
        Expr::Var(name) if name == ROOT_VARIABLE => Ok(Value::Invoice(invoice)),
        Expr::Var(name) => Err(ExpressionError::UnknownVariable(name.clone())),
        Expr::Property { target, name } => property(eval(target, invoice)?, name),
        Expr::Index { target, index } => {
            let target = eval(target, invoice)?;
            let index = as_int(&eval(index, invoice)?)?;
            element(target, index)
        }
        Expr::Call {
            target,
            method,
            args,
        } => {
            let target = eval(target, invoice)?;
            let args = args
                .iter()
                .map(|arg| eval(arg, invoice))
                .collect::<Result<Vec<_>, _>>()?;
            call(target, method, &args)
        }
        Expr::Not(inner) => Ok(Value::Bool(!as_bool(&eval(inner, invoice)?)?)),
        Expr::Empty(inner) => Ok(Value::Bool(eval(inner, invoice)?.is_empty())),
        Expr::And(parts) => {
            for part in parts {
                if !as_bool(&eval(part, invoice)?)? {
                    return Ok(Value::Bool(false));
                }
            }
            Ok(Value::Bool(true))
        }
        Expr::Or(parts) => {
            for part in parts {
                if as_bool(&eval(part, invoice)?)? {
                    return Ok(Value::Bool(true));
                }
            }
            Ok(Value::Bool(false))
        }
        Expr::Eq(left, right) => Ok(Value::Bool(equals(
            &eval(left, invoice)?,
            &eval(right, invoice)?,
        )?)),
        Expr::Ne(left, right) => Ok(Value::Bool(!equals(
            &eval(left, invoice)?,
            &eval(right, invoice)?,
        )?)),
    }
}

fn as_bool(value: &Value<'_>) -> Result<bool, ExpressionError> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(ExpressionError::TypeMismatch {
            expected: "boolean",
            found: other.type_name(),
        }),
    }
}

fn as_int(value: &Value<'_>) -> Result<i64, ExpressionError> {
    match value {
        Value::Int(n) => Ok(*n),
        other => Err(ExpressionError::TypeMismatch {
            expected: "integer",
            found: other.type_name(),
        }),
    }
}

fn property<'a>(target: Value<'a>, name: &str) -> Result<Value<'a>, ExpressionError> {
    let on = target.type_name();
    let node: &'a dyn Node = match target {
        Value::Invoice(invoice) => invoice as &dyn Node,
        Value::Group(group) => group as &dyn Node,
        Value::Term(term) => return term_property(term, name, on),
        _ => {
            return Err(ExpressionError::UnknownProperty {
                name: name.to_string(),
                on,
            });
        }
    };
    match normalize_code(name) {
        Some(code) if is_group_code(code) => Ok(Value::Groups(node.groups(code))),
        Some(code) => Ok(Value::Terms(node.terms(code))),
        None => Err(ExpressionError::UnknownProperty {
            name: name.to_string(),
            on,
        }),
    }
}

fn term_property<'a>(
    term: &'a BusinessTerm,
    name: &str,
    on: &'static str,
) -> Result<Value<'a>, ExpressionError> {
    match name {
        "value" => Ok(Value::Str(term.value().raw())),
        "scheme" => Ok(term
            .value()
            .scheme()
            .map_or(Value::Null, |s| Value::Str(s.to_string()))),
        "code" => Ok(Value::Str(term.code().to_string())),
        _ => Err(ExpressionError::UnknownProperty {
            name: name.to_string(),
            on,
        }),
    }
}

fn checked_index(index: i64, len: usize) -> Result<usize, ExpressionError> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i < len)
        .ok_or(ExpressionError::IndexOutOfBounds { index, len })
}

fn element(target: Value<'_>, index: i64) -> Result<Value<'_>, ExpressionError> {
    match target {
        Value::Groups(groups) => Ok(Value::Group(&groups[checked_index(index, groups.len())?])),
        Value::Terms(terms) => Ok(Value::Term(&terms[checked_index(index, terms.len())?])),
        other => Err(ExpressionError::TypeMismatch {
            expected: "list",
            found: other.type_name(),
        }),
    }
}

fn arity(method: &str, args: &[Value<'_>], expected: usize) -> Result<(), ExpressionError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ExpressionError::Arity {
            method: method.to_string(),
            expected,
            found: args.len(),
        })
    }
}

fn call<'a>(
    target: Value<'a>,
    method: &str,
    args: &[Value<'a>],
) -> Result<Value<'a>, ExpressionError> {
    let on = target.type_name();
    let unknown = || ExpressionError::UnknownMethod {
        name: method.to_string(),
        on,
    };

    match method {
        "isEmpty" => {
            arity(method, args, 0)?;
            match target {
                Value::Null | Value::Str(_) | Value::Groups(_) | Value::Terms(_) => {
                    Ok(Value::Bool(target.is_empty()))
                }
                _ => Err(unknown()),
            }
        }
        "size" => {
            arity(method, args, 0)?;
            let len = match &target {
                Value::Groups(g) => g.len(),
                Value::Terms(t) => t.len(),
                Value::Str(s) => s.chars().count(),
                _ => return Err(unknown()),
            };
            Ok(Value::Int(i64::try_from(len).unwrap_or(i64::MAX)))
        }
        "get" => {
            arity(method, args, 1)?;
            element(target, as_int(&args[0])?)
        }
        "value" | "scheme" | "code" => {
            arity(method, args, 0)?;
            match target {
                Value::Term(term) => term_property(term, method, on),
                _ => Err(unknown()),
            }
        }
        "startsWith" => {
            arity(method, args, 1)?;
            let text = match &target {
                Value::Str(s) => s.clone(),
                Value::Term(term) => term.value().raw(),
                _ => return Err(unknown()),
            };
            match &args[0] {
                Value::Str(prefix) => Ok(Value::Bool(text.starts_with(prefix.as_str()))),
                other => Err(ExpressionError::TypeMismatch {
                    expected: "string",
                    found: other.type_name(),
                }),
            }
        }
        _ => Err(unknown()),
    }
}

fn equals(left: &Value<'_>, right: &Value<'_>) -> Result<bool, ExpressionError> {
    match (left, right) {
        (Value::Null, Value::Null) => Ok(true),
        (Value::Null, _) | (_, Value::Null) => Ok(false),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        (Value::Int(a), Value::Int(b)) => Ok(a == b),
        (Value::Str(a), Value::Str(b)) => Ok(a == b),
        (Value::Term(term), Value::Str(s)) | (Value::Str(s), Value::Term(term)) => {
            Ok(term.value().raw() == *s)
        }
        (a, b) => Err(ExpressionError::Incomparable {
            left: a.type_name(),
            right: b.type_name(),
        }),
    }
}
