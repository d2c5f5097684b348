//! Property-based tests for the moment table and its adjustments.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use polymoment_core::Expr;
    use polymoment_integers::Rational;

    use crate::{expectation, DistributionSpec, Family, Param, Symmetry};

    // Families whose shape parameters are all positive numbers here
    fn family() -> impl Strategy<Value = Family> {
        prop::sample::select(vec![
            Family::Uniform,
            Family::Triangular,
            Family::Normal,
            Family::Laplace,
            Family::Gamma,
            Family::Weibull,
            Family::Rayleigh,
            Family::Maxwell,
        ])
    }

    // Every family where `t` is an additive shift
    fn shifted_family() -> impl Strategy<Value = Family> {
        prop::sample::select(
            Family::ALL
                .into_iter()
                .filter(|f| *f != Family::Lognormal)
                .collect::<Vec<_>>(),
        )
    }

    fn symmetry() -> impl Strategy<Value = Symmetry> {
        prop::sample::select(vec![
            Symmetry::Symmetrical,
            Symmetry::OneSidedRight,
            Symmetry::OneSidedLeft,
        ])
    }

    fn spec(family: Family, symmetry: Symmetry, translation: i64, scale: i64) -> DistributionSpec {
        let required = family.required_parameters();
        DistributionSpec::new(
            family,
            symmetry,
            Param::from(translation),
            Param::from(scale),
            required.first().map(|_| match family {
                Family::Trapezoidal => Param::Number(Rational::from_i64(1, 2)),
                _ => Param::from(3i64),
            }),
            required.get(1).map(|_| Param::from(5i64)),
        )
        .unwrap()
    }

    fn moment(spec: &DistributionSpec, m: i64) -> Expr {
        expectation("x", spec, &Rational::from(m)).unwrap()
    }

    proptest! {
        #[test]
        fn symmetric_odd_moments_vanish(f in family(), s in 1i64..5i64, m in 0u32..4u32) {
            let centred = spec(f, Symmetry::Symmetrical, 0, s);
            prop_assert!(moment(&centred, i64::from(2 * m + 1)).is_zero());
        }

        #[test]
        fn variance_ignores_translation(
            f in shifted_family(),
            sym in symmetry(),
            t in -4i64..4i64,
            s in 1i64..5i64
        ) {
            let centred = spec(f, sym, 0, s);
            let shifted = spec(f, sym, t, s);
            let variance = |d: &DistributionSpec| moment(d, 2) - moment(d, 1).pow(2);
            let a = variance(&centred).to_f64().unwrap();
            let b = variance(&shifted).to_f64().unwrap();
            prop_assert!(a > 0.0 && a.is_finite());
            prop_assert!((a - b).abs() <= 1e-9 * a.max(1.0));
        }

        #[test]
        fn left_mirrors_right(f in family(), s in 1i64..5i64, m in 1i64..6i64) {
            // X on the left half-line is -X on the right one
            let right = spec(f, Symmetry::OneSidedRight, 0, s);
            let left = spec(f, Symmetry::OneSidedLeft, 0, s);
            let sign = if m % 2 == 0 { 1i64 } else { -1i64 };
            prop_assert_eq!(moment(&left, m), moment(&right, m).scale(&Rational::from(sign)));
        }

        #[test]
        fn family_names_ignore_case(f in family(), mask in any::<u16>()) {
            let name: String = f
                .name()
                .chars()
                .enumerate()
                .map(|(i, c)| if (mask >> (i % 16)) & 1 == 1 { c.to_ascii_uppercase() } else { c })
                .collect();
            prop_assert_eq!(name.parse::<Family>().unwrap(), f);
        }
    }
}
