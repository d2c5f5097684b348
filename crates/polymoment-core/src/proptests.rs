//! Property-based tests for the symbolic kernel.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;

    use crate::Expr;

    // Strategy for small polynomials in x and y with integer coefficients
    fn small_poly() -> impl Strategy<Value = Expr> {
        proptest::collection::vec((-5i64..=5i64, 0u32..3u32, 0u32..3u32), 1..4).prop_map(|terms| {
            let x = Expr::symbol("x");
            let y = Expr::symbol("y");
            let parts: Vec<Expr> = terms
                .into_iter()
                .map(|(c, ex, ey)| Expr::from(c) * x.pow(ex) * y.pow(ey))
                .collect();
            Expr::sum(&parts)
        })
    }

    fn nonzero_poly() -> impl Strategy<Value = Expr> {
        small_poly().prop_filter("polynomial must be non-zero", |p| !p.is_zero())
    }

    fn point() -> BTreeMap<String, f64> {
        let mut values = BTreeMap::new();
        values.insert("x".to_string(), 1.37);
        values.insert("y".to_string(), -0.61);
        values
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-7 * (1.0 + a.abs().max(b.abs()))
    }

    proptest! {
        #[test]
        fn expr_add_commutative(a in small_poly(), b in small_poly()) {
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn expr_add_associative(a in small_poly(), b in small_poly(), c in small_poly()) {
            prop_assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
        }

        #[test]
        fn expr_distributive(a in small_poly(), b in small_poly(), c in small_poly()) {
            // a * (b + c) = a * b + a * c
            prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        }

        #[test]
        fn expr_additive_inverse(a in small_poly()) {
            prop_assert!((&a - &a).is_zero());
        }

        #[test]
        fn expr_exact_quotient(a in small_poly(), b in nonzero_poly()) {
            // (a * b) / b = a
            let product = &a * &b;
            prop_assert_eq!(product.checked_div(&b).unwrap(), a);
        }

        #[test]
        fn expr_common_factor_cancels(a in small_poly(), b in nonzero_poly(), c in nonzero_poly()) {
            // (a * c) / (b * c) = a / b
            let lhs = (&a * &c).checked_div(&(&b * &c)).unwrap();
            prop_assert_eq!(lhs, a.checked_div(&b).unwrap());
        }

        #[test]
        fn expr_fraction_sum_is_canonical(
            a in small_poly(),
            b in nonzero_poly(),
            c in small_poly(),
            d in nonzero_poly()
        ) {
            // a/b + c/d = (a*d + c*b) / (b*d)
            let sum = a.checked_div(&b).unwrap() + c.checked_div(&d).unwrap();
            let cross = (&(&a * &d) + &(&c * &b)).checked_div(&(&b * &d)).unwrap();
            prop_assert_eq!(sum, cross);
        }

        #[test]
        fn expr_self_quotient(a in nonzero_poly()) {
            prop_assert!(a.checked_div(&a).unwrap().is_one());
        }

        #[test]
        fn expr_fraction_sum_evaluates(
            a in small_poly(),
            b in nonzero_poly(),
            c in small_poly(),
            d in nonzero_poly()
        ) {
            let values = point();
            let bv = b.evaluate(&values).unwrap();
            let dv = d.evaluate(&values).unwrap();
            prop_assume!(bv.abs() > 1e-3 && dv.abs() > 1e-3);

            let sum = a.checked_div(&b).unwrap() + c.checked_div(&d).unwrap();
            let expected = a.evaluate(&values).unwrap() / bv + c.evaluate(&values).unwrap() / dv;
            prop_assert!(close(sum.evaluate(&values).unwrap(), expected));
        }

        #[test]
        fn expr_printing_is_deterministic(a in small_poly(), b in nonzero_poly()) {
            let q1 = a.checked_div(&b).unwrap();
            let q2 = a.checked_div(&b).unwrap();
            prop_assert_eq!(q1.to_string(), q2.to_string());
        }

        #[test]
        fn expr_sqrt_squares_back(a in nonzero_poly()) {
            // sqrt(a)^2 = a
            prop_assert_eq!(a.sqrt().pow(2), a);
        }
    }
}
