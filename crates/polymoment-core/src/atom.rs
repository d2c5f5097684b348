//! Indeterminates of the polynomial layer.
//!
//! An atom is anything the kernel treats as an independent variable when
//! adding and multiplying: user symbols, the constant π, and applications of
//! the special functions the moment table needs.

use crate::expr::Expr;

/// An indeterminate appearing in a monomial.
///
/// The derived ordering (symbols first, alphabetically; then π; then
/// function atoms) is the variable ordering used for lexicographic term
/// order, and therefore for printing.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Atom {
    /// A named symbol such as a distribution parameter `m0`.
    Symbol(String),
    /// The constant π.
    Pi,
    /// Γ(arg), kept unevaluated when the argument is not a known value.
    Gamma(Box<Expr>),
    /// exp(arg).
    Exp(Box<Expr>),
    /// Natural logarithm log(arg).
    Log(Box<Expr>),
    /// The principal `degree`-th root of `base`.
    ///
    /// Invariant: `degree >= 2`. A numeric base is a q-th-power-free integer.
    Root {
        /// The radicand.
        base: Box<Expr>,
        /// The root degree.
        degree: u32,
    },
}

impl Atom {
    /// Creates a symbol atom.
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        Atom::Symbol(name.into())
    }

    /// Returns the symbol name, if this is a symbol.
    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Atom::Symbol(name) => Some(name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_ordering() {
        assert!(Atom::symbol("b0") < Atom::symbol("m0"));
        assert!(Atom::symbol("s0") < Atom::Pi);
        assert!(Atom::Pi < Atom::Gamma(Box::new(Expr::from(2i64))));
    }

    #[test]
    fn test_as_symbol() {
        assert_eq!(Atom::symbol("x").as_symbol(), Some("x"));
        assert_eq!(Atom::Pi.as_symbol(), None);
    }
}
