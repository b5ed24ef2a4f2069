//! Symbolic parameter expressions.
//!
//! Variational circuit templates carry free parameters that are bound to
//! concrete angles only at execution time. A [`ParamExpr`] is either a
//! concrete value, a named symbol, or an arithmetic combination of both.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

use rustc_hash::FxHashMap;

/// A symbolic or concrete parameter expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamExpr {
    /// A concrete value.
    Const(f64),
    /// A free, named parameter.
    Symbol(String),
    /// The constant π.
    Pi,
    /// Negation.
    Neg(Box<ParamExpr>),
    /// Addition.
    Add(Box<ParamExpr>, Box<ParamExpr>),
    /// Subtraction.
    Sub(Box<ParamExpr>, Box<ParamExpr>),
    /// Multiplication.
    Mul(Box<ParamExpr>, Box<ParamExpr>),
    /// Division.
    Div(Box<ParamExpr>, Box<ParamExpr>),
}

impl ParamExpr {
    /// A concrete value.
    pub fn constant(value: f64) -> Self {
        ParamExpr::Const(value)
    }

    /// A free parameter with the given name.
    pub fn symbol(name: impl Into<String>) -> Self {
        ParamExpr::Symbol(name.into())
    }

    /// The constant π.
    pub fn pi() -> Self {
        ParamExpr::Pi
    }

    /// Whether the expression contains any free parameter.
    pub fn is_symbolic(&self) -> bool {
        match self {
            ParamExpr::Symbol(_) => true,
            ParamExpr::Const(_) | ParamExpr::Pi => false,
            ParamExpr::Neg(e) => e.is_symbolic(),
            ParamExpr::Add(a, b)
            | ParamExpr::Sub(a, b)
            | ParamExpr::Mul(a, b)
            | ParamExpr::Div(a, b) => a.is_symbolic() || b.is_symbolic(),
        }
    }

    /// Evaluate to a concrete value, if no free parameter remains.
    ///
    /// Division by an exact zero yields `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamExpr::Const(v) => Some(*v),
            ParamExpr::Symbol(_) => None,
            ParamExpr::Pi => Some(PI),
            ParamExpr::Neg(e) => e.as_f64().map(|v| -v),
            ParamExpr::Add(a, b) => Some(a.as_f64()? + b.as_f64()?),
            ParamExpr::Sub(a, b) => Some(a.as_f64()? - b.as_f64()?),
            ParamExpr::Mul(a, b) => Some(a.as_f64()? * b.as_f64()?),
            ParamExpr::Div(a, b) => {
                let divisor = b.as_f64()?;
                if divisor == 0.0 {
                    return None;
                }
                Some(a.as_f64()? / divisor)
            }
        }
    }

    /// Visit every symbol name, left to right.
    ///
    /// A symbol appearing more than once is visited more than once; callers
    /// that need uniqueness deduplicate themselves (see
    /// [`Circuit::parameters`](crate::Circuit::parameters)).
    pub fn for_each_symbol(&self, f: &mut impl FnMut(&str)) {
        match self {
            ParamExpr::Const(_) | ParamExpr::Pi => {}
            ParamExpr::Symbol(name) => f(name),
            ParamExpr::Neg(e) => e.for_each_symbol(f),
            ParamExpr::Add(a, b)
            | ParamExpr::Sub(a, b)
            | ParamExpr::Mul(a, b)
            | ParamExpr::Div(a, b) => {
                a.for_each_symbol(f);
                b.for_each_symbol(f);
            }
        }
    }

    /// Bind one symbol to a concrete value, returning the new expression.
    pub fn bind(&self, name: &str, value: f64) -> Self {
        self.substitute(&FxHashMap::from_iter([(
            name.to_string(),
            ParamExpr::Const(value),
        )]))
    }

    /// Replace every symbol found in `mapping` with its replacement
    /// expression. Symbols absent from the map are left untouched.
    pub fn substitute(&self, mapping: &FxHashMap<String, ParamExpr>) -> Self {
        match self {
            ParamExpr::Symbol(name) => match mapping.get(name) {
                Some(replacement) => replacement.clone(),
                None => self.clone(),
            },
            ParamExpr::Const(_) | ParamExpr::Pi => self.clone(),
            ParamExpr::Neg(e) => ParamExpr::Neg(Box::new(e.substitute(mapping))),
            ParamExpr::Add(a, b) => ParamExpr::Add(
                Box::new(a.substitute(mapping)),
                Box::new(b.substitute(mapping)),
            ),
            ParamExpr::Sub(a, b) => ParamExpr::Sub(
                Box::new(a.substitute(mapping)),
                Box::new(b.substitute(mapping)),
            ),
            ParamExpr::Mul(a, b) => ParamExpr::Mul(
                Box::new(a.substitute(mapping)),
                Box::new(b.substitute(mapping)),
            ),
            ParamExpr::Div(a, b) => ParamExpr::Div(
                Box::new(a.substitute(mapping)),
                Box::new(b.substitute(mapping)),
            ),
        }
    }

    /// Collapse constant subexpressions.
    pub fn simplify(&self) -> Self {
        if let Some(v) = self.as_f64() {
            return ParamExpr::Const(v);
        }
        match self {
            ParamExpr::Neg(e) => ParamExpr::Neg(Box::new(e.simplify())),
            ParamExpr::Add(a, b) => ParamExpr::Add(Box::new(a.simplify()), Box::new(b.simplify())),
            ParamExpr::Sub(a, b) => ParamExpr::Sub(Box::new(a.simplify()), Box::new(b.simplify())),
            ParamExpr::Mul(a, b) => ParamExpr::Mul(Box::new(a.simplify()), Box::new(b.simplify())),
            ParamExpr::Div(a, b) => ParamExpr::Div(Box::new(a.simplify()), Box::new(b.simplify())),
            _ => self.clone(),
        }
    }
}

impl fmt::Display for ParamExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamExpr::Const(v) => write!(f, "{v}"),
            ParamExpr::Symbol(name) => write!(f, "{name}"),
            ParamExpr::Pi => write!(f, "π"),
            ParamExpr::Neg(e) => write!(f, "-({e})"),
            ParamExpr::Add(a, b) => write!(f, "({a} + {b})"),
            ParamExpr::Sub(a, b) => write!(f, "({a} - {b})"),
            ParamExpr::Mul(a, b) => write!(f, "({a} * {b})"),
            ParamExpr::Div(a, b) => write!(f, "({a} / {b})"),
        }
    }
}

impl From<f64> for ParamExpr {
    fn from(value: f64) -> Self {
        ParamExpr::Const(value)
    }
}

impl From<i32> for ParamExpr {
    fn from(value: i32) -> Self {
        ParamExpr::Const(f64::from(value))
    }
}

impl std::ops::Add for ParamExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        ParamExpr::Add(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Sub for ParamExpr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        ParamExpr::Sub(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Mul for ParamExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        ParamExpr::Mul(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Div for ParamExpr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        ParamExpr::Div(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Neg for ParamExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        ParamExpr::Neg(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant() {
        let p = ParamExpr::constant(0.25);
        assert!(!p.is_symbolic());
        assert_eq!(p.as_f64(), Some(0.25));
    }

    #[test]
    fn test_symbol() {
        let p = ParamExpr::symbol("θ[0]");
        assert!(p.is_symbolic());
        assert_eq!(p.as_f64(), None);

        let mut seen = Vec::new();
        p.for_each_symbol(&mut |name| seen.push(name.to_string()));
        assert_eq!(seen, vec!["θ[0]"]);
    }

    #[test]
    fn test_pi() {
        assert_eq!(ParamExpr::pi().as_f64(), Some(PI));
    }

    #[test]
    fn test_bind() {
        let p = ParamExpr::symbol("θ[0]") * ParamExpr::constant(0.5);
        let bound = p.bind("θ[0]", PI);
        assert!(!bound.is_symbolic());
        assert!((bound.as_f64().unwrap() - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_substitute_renames() {
        let p = ParamExpr::symbol("x");
        let mapping =
            FxHashMap::from_iter([("x".to_string(), ParamExpr::symbol("θ[7]"))]);
        assert_eq!(p.substitute(&mapping), ParamExpr::symbol("θ[7]"));
    }

    #[test]
    fn test_simplify() {
        let e = ParamExpr::constant(2.0) * ParamExpr::constant(3.0);
        assert_eq!(e.simplify(), ParamExpr::Const(6.0));

        let half_symbolic = ParamExpr::symbol("a") + ParamExpr::constant(1.0);
        assert!(half_symbolic.simplify().is_symbolic());
    }

    #[test]
    fn test_division_by_zero_is_none() {
        let e = ParamExpr::constant(1.0) / ParamExpr::constant(0.0);
        assert_eq!(e.as_f64(), None);
    }
}
