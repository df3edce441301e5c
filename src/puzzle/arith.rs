//! Arithmetic on equation operands
//!
//! Division is real-valued; callers decide whether a result is acceptable
//! with [`as_positive_integer`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Arithmetic operators that can appear between two operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    #[inline]
    pub fn is_additive(&self) -> bool {
        matches!(self, Operator::Add | Operator::Sub)
    }

    #[inline]
    pub fn is_multiplicative(&self) -> bool {
        matches!(self, Operator::Mul | Operator::Div)
    }

    #[inline]
    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            Operator::Add => a + b,
            Operator::Sub => a - b,
            Operator::Mul => a * b,
            Operator::Div => a / b,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Content of an operator cell: an arithmetic operator or the `=` before a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
pub enum Symbol {
    Op(Operator),
    Equals,
}

impl Symbol {
    pub fn as_char(&self) -> char {
        match self {
            Symbol::Op(op) => op.symbol(),
            Symbol::Equals => '=',
        }
    }

    /// The arithmetic operator, if this is not `=`
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Symbol::Op(op) => Some(*op),
            Symbol::Equals => None,
        }
    }
}

impl From<Symbol> for char {
    fn from(symbol: Symbol) -> char {
        symbol.as_char()
    }
}

impl TryFrom<char> for Symbol {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '+' => Ok(Symbol::Op(Operator::Add)),
            '-' => Ok(Symbol::Op(Operator::Sub)),
            '*' => Ok(Symbol::Op(Operator::Mul)),
            '/' => Ok(Symbol::Op(Operator::Div)),
            '=' => Ok(Symbol::Equals),
            other => Err(format!("unknown operator symbol {other:?}")),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// `a op b`
pub fn evaluate2(a: i64, op: Operator, b: i64) -> f64 {
    op.apply(a as f64, b as f64)
}

/// `a op1 b op2 c`
///
/// Only the additive-then-multiplicative pairing binds right (`a + (b * c)`);
/// every other pairing is evaluated left to right.
pub fn evaluate3(a: i64, op1: Operator, b: i64, op2: Operator, c: i64) -> f64 {
    if op1.is_additive() && op2.is_multiplicative() {
        op1.apply(a as f64, evaluate2(b, op2, c))
    } else {
        op2.apply(evaluate2(a, op1, b), c as f64)
    }
}

/// Evaluate a chain of 2 or 3 operands with the precedence rules above
pub fn evaluate_chain(operands: &[i64], operators: &[Operator]) -> Option<f64> {
    match (operands, operators) {
        ([a, b], [op]) => Some(evaluate2(*a, *op, *b)),
        ([a, b, c], [op1, op2]) => Some(evaluate3(*a, *op1, *b, *op2, *c)),
        _ => None,
    }
}

/// Accept a result only if it is a whole number in `1..=cap`
pub fn as_positive_integer(value: f64, cap: u32) -> Option<u32> {
    if value.is_finite() && value.fract() == 0.0 && value >= 1.0 && value <= cap as f64 {
        Some(value as u32)
    } else {
        None
    }
}
