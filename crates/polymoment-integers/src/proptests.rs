//! Property-based tests for exact arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::{binomial, factorial, Integer, Rational};

    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    proptest! {
        #[test]
        fn rational_distributive(
            num_a in small_int(),
            den_a in non_zero_int(),
            num_b in small_int(),
            den_b in non_zero_int(),
            num_c in small_int(),
            den_c in non_zero_int()
        ) {
            let a = Rational::from_i64(num_a, den_a);
            let b = Rational::from_i64(num_b, den_b);
            let c = Rational::from_i64(num_c, den_c);
            prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        }

        #[test]
        fn rational_multiplicative_inverse(num in non_zero_int(), den in non_zero_int()) {
            let a = Rational::from_i64(num, den);
            prop_assert!((&a * &a.recip()).is_one());
        }

        #[test]
        fn floor_brackets_value(num in small_int(), den in non_zero_int()) {
            let a = Rational::from_i64(num, den);
            let floor = Rational::from(a.floor());
            prop_assert!(floor <= a);
            prop_assert!(a < floor + Rational::one());
        }

        #[test]
        fn decimal_round_trip(whole in 0i64..10_000, frac in 0u32..1000) {
            let text = format!("{whole}.{frac:03}");
            let parsed: Rational = text.parse().unwrap();
            let expected = Rational::from_i64(whole * 1000 + i64::from(frac), 1000);
            prop_assert_eq!(parsed, expected);
        }

        #[test]
        fn perfect_power_split_recombines(n in 1i64..1_000_000, degree in 2u32..5) {
            let value = Integer::new(n);
            let (outside, inside) = value.split_perfect_power(degree);
            prop_assert_eq!(outside.pow(degree) * inside, value);
        }

        #[test]
        fn pascal_rule(n in 1u32..40, k in 1u32..40) {
            prop_assume!(k <= n);
            prop_assert_eq!(binomial(n, k), binomial(n - 1, k - 1) + binomial(n - 1, k));
        }

        #[test]
        fn binomial_matches_factorials(n in 0u32..25, k in 0u32..25) {
            prop_assume!(k <= n);
            let expected = factorial(n) / (factorial(k) * factorial(n - k));
            prop_assert_eq!(binomial(n, k), expected);
        }

        #[test]
        fn integer_gcd_divides_both(a in non_zero_int(), b in non_zero_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let g = a.gcd(&b);
            prop_assert!((a % g.clone()).is_zero());
            prop_assert!((b % g).is_zero());
        }
    }
}
