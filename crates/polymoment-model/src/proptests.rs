//! Property-based tests for parsing and expansion.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use polymoment_integers::{binomial, Integer, Rational};

    use crate::Polynomial;

    const VARS: [&str; 2] = ["x0", "x1"];

    // Strategy for small polynomial source strings
    fn poly_source() -> impl Strategy<Value = String> {
        proptest::collection::vec((-5i64..=5i64, 0u32..3u32, 0u32..3u32), 1..5).prop_map(|terms| {
            terms
                .into_iter()
                .map(|(c, e0, e1)| format!("({c})*x0**{e0}*x1**{e1}"))
                .collect::<Vec<_>>()
                .join(" + ")
        })
    }

    proptest! {
        #[test]
        fn display_reparses(source in poly_source()) {
            let p = Polynomial::parse(&source, VARS).unwrap();
            let again = Polynomial::parse(&p.to_string(), VARS).unwrap();
            prop_assert_eq!(again, p);
        }

        #[test]
        fn pow_matches_literal_power(source in poly_source(), n in 1u32..4u32) {
            let p = Polynomial::parse(&source, VARS).unwrap();
            let literal = Polynomial::parse(&format!("({source})**{n}"), VARS).unwrap();
            prop_assert_eq!(p.pow(n), Some(literal));
        }

        #[test]
        fn pow_splits_over_exponents(source in poly_source(), a in 0u32..3u32, b in 0u32..3u32) {
            // p^(a+b) = p^a * p^b
            let p = Polynomial::parse(&source, VARS).unwrap();
            let lhs = p.pow(a + b).unwrap();
            let rhs = p.pow(a).unwrap().checked_mul(&p.pow(b).unwrap(), usize::MAX).unwrap();
            prop_assert_eq!(lhs, rhs);
        }

        #[test]
        fn binomial_expansion_coefficients(a in 1i64..6i64, b in 1i64..6i64, n in 1u32..7u32) {
            let p = Polynomial::parse(&format!("({a}*x0 + {b})**{n}"), VARS).unwrap();
            prop_assert_eq!(p.len(), n as usize + 1);
            for term in p.terms() {
                let k = term.exponents()[0];
                let expected = Integer::new(a).pow(k) * Integer::new(b).pow(n - k) * binomial(n, k);
                prop_assert_eq!(term.coeff(), &Rational::from(expected));
            }
        }
    }
}
