//! Factorials and binomial coefficients.

use num_traits::One;

use crate::Integer;

/// Computes n!.
#[must_use]
pub fn factorial(n: u32) -> Integer {
    (2..=n).fold(Integer::one(), |acc, k| acc * Integer::from(k))
}

/// Computes the double factorial n!! = n·(n−2)·(n−4)···.
///
/// Follows the usual convention `0!! = (−1)!! = 1`; every non-positive
/// argument yields one.
#[must_use]
pub fn double_factorial(n: i64) -> Integer {
    let mut acc = Integer::one();
    let mut k = n;
    while k > 1 {
        acc = acc * Integer::new(k);
        k -= 2;
    }
    acc
}

/// Computes the binomial coefficient C(n, k); zero when k > n.
#[must_use]
pub fn binomial(n: u32, k: u32) -> Integer {
    if k > n {
        return Integer::new(0);
    }
    let k = k.min(n - k);
    // Each prefix product is itself a binomial coefficient, so the division is exact.
    (0..k).fold(Integer::one(), |acc, i| {
        acc * Integer::from(n - i) / Integer::from(i + 1)
    })
}
