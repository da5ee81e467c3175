//! Combinatorial and number-theoretic helpers.
//!
//! Binomial counts and lexicographic subset enumeration drive the
//! resolution search; the modular arithmetic helpers serve the Paley
//! Hadamard seeds used by Plackett-Burman designs.

/// Compute the binomial coefficient C(n, k).
///
/// Returns `None` if the result would overflow `u64`.
///
/// # Examples
///
/// ```
/// use doegen::utils::binomial;
///
/// assert_eq!(binomial(5, 2), Some(10));
/// assert_eq!(binomial(4, 4), Some(1));
/// assert_eq!(binomial(3, 5), Some(0)); // k > n
/// ```
#[must_use]
pub fn binomial(n: u64, k: u64) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);

    let mut acc: u64 = 1;
    for i in 0..k {
        // acc * (n - i) is always divisible by (i + 1) at this point
        acc = acc.checked_mul(n - i)? / (i + 1);
    }
    Some(acc)
}

/// Enumerate the k-element subsets of `0..n` in lexicographic order.
///
/// # Examples
///
/// ```
/// use doegen::utils::combinations;
///
/// let pairs: Vec<Vec<usize>> = combinations(4, 2).collect();
/// assert_eq!(pairs.len(), 6);
/// assert_eq!(pairs[0], vec![0, 1]);
/// assert_eq!(pairs[3], vec![1, 2]);
/// ```
pub fn combinations(n: usize, k: usize) -> Combinations {
    Combinations::new(n, k)
}

/// Lexicographic iterator over k-subsets of `0..n`.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    current: Option<Vec<usize>>,
}

impl Combinations {
    fn new(n: usize, k: usize) -> Self {
        let current = (k <= n).then(|| (0..k).collect());
        Self { n, current }
    }

    /// Advance `subset` to its lexicographic successor, or return `false`
    /// if it is the last subset.
    fn advance(n: usize, subset: &mut [usize]) -> bool {
        let k = subset.len();
        let Some(pivot) = (0..k).rev().find(|&i| subset[i] < n - k + i) else {
            return false;
        };
        subset[pivot] += 1;
        for i in pivot + 1..k {
            subset[i] = subset[i - 1] + 1;
        }
        true
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut subset = self.current.take()?;
        let out = subset.clone();
        if Self::advance(self.n, &mut subset) {
            self.current = Some(subset);
        }
        Some(out)
    }
}

/// Compute `base^exp mod modulus` by binary exponentiation.
///
/// # Panics
///
/// Panics if `modulus` is 0.
#[must_use]
pub fn mod_pow(mut base: u64, mut exp: u64, modulus: u64) -> u64 {
    assert!(modulus > 0, "modulus must be positive");
    let mut result = 1 % modulus;
    base %= modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, modulus);
        }
        base = mul_mod(base, base, modulus);
        exp >>= 1;
    }
    result
}

fn mul_mod(a: u64, b: u64, modulus: u64) -> u64 {
    (u128::from(a) * u128::from(b) % u128::from(modulus)) as u64
}

/// Trial-division primality test, adequate for Hadamard orders.
#[must_use]
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}
