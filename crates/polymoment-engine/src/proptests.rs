//! Property-based tests for moments of polynomials.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;

    use polymoment_core::Expr;
    use polymoment_dist::{DistributionSpec, Family, Param, Symmetry};
    use polymoment_integers::Rational;

    use crate::{EngineConfig, MomentEngine};

    /// A marginal with its parameter values; `symbolic` keeps them as symbols.
    #[derive(Clone, Debug)]
    struct Marginal {
        family: Family,
        symmetry: Symmetry,
        symbolic: bool,
        translation: Rational,
        scale: Rational,
    }

    fn marginal() -> impl Strategy<Value = Marginal> {
        (
            prop::sample::select(Family::ALL.to_vec()),
            prop::sample::select(vec![
                Symmetry::Symmetrical,
                Symmetry::OneSidedRight,
                Symmetry::OneSidedLeft,
            ]),
            any::<bool>(),
            -3i64..=3i64,
            1i64..=8i64,
        )
            .prop_map(|(family, symmetry, symbolic, t, s)| Marginal {
                family,
                symmetry,
                symbolic,
                translation: Rational::from_i64(t, 2),
                scale: Rational::from_i64(s, 4),
            })
    }

    // Shape values with finite low moments (Student needs nu above the order)
    fn shape_values(family: Family) -> (Rational, Rational) {
        match family {
            Family::Student => (Rational::from_i64(15, 2), Rational::from(0i64)),
            Family::Trapezoidal => (Rational::from_i64(2, 5), Rational::from(0i64)),
            _ => (Rational::from_i64(5, 2), Rational::from_i64(7, 2)),
        }
    }

    fn to_param(symbolic: bool, name: String, value: Rational) -> Param {
        if symbolic {
            Param::symbol(name)
        } else {
            Param::Number(value)
        }
    }

    fn spec(marginal: &Marginal, index: usize) -> DistributionSpec {
        let (b, c) = shape_values(marginal.family);
        let required = marginal.family.required_parameters();
        let symbolic = marginal.symbolic;
        DistributionSpec::new(
            marginal.family,
            marginal.symmetry,
            to_param(symbolic, format!("m{index}"), marginal.translation.clone()),
            to_param(symbolic, format!("s{index}"), marginal.scale.clone()),
            required.first().map(|_| to_param(symbolic, format!("b{index}"), b)),
            required.get(1).map(|_| to_param(symbolic, format!("c{index}"), c)),
        )
        .unwrap()
    }

    /// Values for every symbol a marginal may introduce.
    fn point(marginals: &[&Marginal]) -> BTreeMap<String, f64> {
        let mut values = BTreeMap::new();
        for (i, m) in marginals.iter().enumerate() {
            let (b, c) = shape_values(m.family);
            values.insert(format!("m{i}"), m.translation.to_f64());
            values.insert(format!("s{i}"), m.scale.to_f64());
            values.insert(format!("b{i}"), b.to_f64());
            values.insert(format!("c{i}"), c.to_f64());
        }
        values
    }

    fn engine(source: &str, specs: &[DistributionSpec]) -> MomentEngine {
        let distributions: BTreeMap<String, DistributionSpec> = specs
            .iter()
            .enumerate()
            .map(|(i, s)| (format!("x{i}"), s.clone()))
            .collect();
        MomentEngine::from_source(source, distributions, EngineConfig::default()).unwrap()
    }

    fn value(expr: &Expr, values: &BTreeMap<String, f64>) -> f64 {
        expr.evaluate(values).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
    }

    proptest! {
        #[test]
        fn moment_zero_is_one(m in marginal(), source in "x0|x0\\*\\*3|2\\*x0 \\+ 1") {
            let mut e = engine(&source, &[spec(&m, 0)]);
            prop_assert!(e.moment(0).unwrap().is_one());
        }

        #[test]
        fn variance_is_additive(a in marginal(), b in marginal()) {
            // Var(x0 + x1) = Var(x0) + Var(x1) for independent variables
            let specs = [spec(&a, 0), spec(&b, 1)];
            let values = point(&[&a, &b]);
            let sum = engine("x0 + x1", &specs).variance().unwrap();
            let first = engine("x0", &specs).variance().unwrap();
            let second = engine("x1", &specs).variance().unwrap();
            let expected = value(&first, &values) + value(&second, &values);
            prop_assert!(close(value(&sum, &values), expected));
            prop_assert!(close(value(&(&first + &second), &values), expected));
        }

        #[test]
        fn mean_is_linear(m in marginal(), a in -5i32..5i32, b in -5i32..5i32) {
            let specs = [spec(&m, 0)];
            let values = point(&[&m]);
            let mean = engine("x0", &specs).mean().unwrap();
            let affine = engine(&format!("({a})*x0 + ({b})"), &specs).mean().unwrap();
            let expected = value(&mean, &values) * f64::from(a) + f64::from(b);
            prop_assert!(close(value(&affine, &values), expected));
        }

        #[test]
        fn results_are_deterministic(m in marginal(), n in 1u32..4u32) {
            let specs = [spec(&m, 0), spec(&m, 1)];
            let first = engine("x0*x1 + x0**2", &specs).moment(n).unwrap();
            let second = engine("x0*x1 + x0**2", &specs).moment(n).unwrap();
            prop_assert_eq!(first.to_string(), second.to_string());
        }
    }
}
