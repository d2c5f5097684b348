//! Sign and doubling rules of the symmetry classes.

use polymoment_core::Expr;
use polymoment_integers::Rational;

use crate::error::EvaluationError;
use crate::family::Symmetry;

/// Turns a half-support table entry into `E[X^m]` for the symmetry class.
///
/// `raw` is only called when its value is needed: odd powers of a
/// symmetrical density vanish without consulting the table.
///
/// - symmetrical: `2 * raw` for even `m`, `0` for odd `m`
/// - one-sided right: `2 * raw`
/// - one-sided left: `(-1)^m * 2 * raw`
///
/// # Errors
///
/// Propagates the error of `raw`.
pub fn adjust<F>(symmetry: Symmetry, m: u32, raw: F) -> Result<Expr, EvaluationError>
where
    F: FnOnce() -> Result<Expr, EvaluationError>,
{
    let even = m % 2 == 0;
    let factor = match symmetry {
        Symmetry::Symmetrical if !even => return Ok(Expr::zero()),
        Symmetry::Symmetrical | Symmetry::OneSidedRight => 2,
        Symmetry::OneSidedLeft if even => 2,
        Symmetry::OneSidedLeft => -2,
    };
    Ok(raw()?.scale(&Rational::from(i64::from(factor))))
}
