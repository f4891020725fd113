//! Deterministic Miller–Rabin primality test.
//!
//! Testing against the first twelve primes as witnesses is known to be exact
//! for every integer below $3.3 \times 10^{24}$, which covers all 64-bit
//! candidates. No randomness is involved: the same candidate always gets the
//! same answer.
//!
//! See: <https://en.wikipedia.org/wiki/Miller%E2%80%93Rabin_primality_test#Testing_against_small_sets_of_bases>

use super::modular::{mul_mod, pow_mod};
use crate::Word;

/// Witness bases, sorted so small candidates can be looked up directly.
pub const WITNESSES: [u8; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Returns true if `candidate` is prime.
///
/// Candidates up to the largest witness are answered by lookup in
/// [`WITNESSES`]. Even candidates above it are rejected outright.
///
/// # Example
///
/// ```
/// use sophie_core::is_prime;
///
/// assert!(is_prime(37u16));
/// assert!(!is_prime(2047u32)); // strong pseudoprime to base 2
/// assert!(is_prime(18_446_744_073_709_551_557u64));
/// ```
pub fn is_prime<W: Word>(candidate: W) -> bool {
    let largest = WITNESSES[WITNESSES.len() - 1];
    if candidate <= W::from_small(largest) {
        return candidate
            .to_u8()
            .is_some_and(|small| WITNESSES.binary_search(&small).is_ok());
    }
    if (candidate & W::one()).is_zero() {
        return false;
    }

    // candidate - 1 = 2^r * d, d odd
    let n_minus_one = candidate - W::one();
    let r = n_minus_one.trailing_zeros();
    let d = n_minus_one >> r as usize;

    WITNESSES
        .iter()
        .all(|&witness| passes_witness(candidate, d, r, W::from_small(witness)))
}

/// Runs a single Miller–Rabin round of `witness` against `candidate`.
///
/// `candidate` must be odd and greater than `witness`, with
/// $2^r \cdot d = \text{candidate} - 1$ and `d` odd.
/// Returns true when the witness fails to prove compositeness.
pub fn passes_witness<W: Word>(candidate: W, d: W, r: u32, witness: W) -> bool {
    let n_minus_one = candidate - W::one();

    let mut x = pow_mod(witness, d, candidate);
    if x.is_one() || x == n_minus_one {
        return true;
    }

    for _ in 1..r {
        x = mul_mod(x, x, candidate);
        if x == n_minus_one {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Trial division reference.
    fn is_prime_naive(n: u32) -> bool {
        if n < 2 {
            return false;
        }
        let mut i = 2u32;
        while i * i <= n {
            if n % i == 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    #[test]
    fn witness_table_is_sorted() {
        assert!(WITNESSES.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn small_candidates_use_lookup() {
        let primes: Vec<u16> = (0u16..=37).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37]);
    }

    #[test]
    fn matches_trial_division_below_ten_thousand() {
        for n in 0u32..10_000 {
            assert_eq!(is_prime(n), is_prime_naive(n), "n={}", n);
        }
    }

    #[test]
    fn agrees_across_word_widths() {
        for n in 38u16..5_000 {
            assert_eq!(is_prime(n), is_prime(n as u64), "n={}", n);
        }
    }

    #[test]
    fn even_candidates_rejected() {
        assert!(!is_prime(38u32));
        assert!(!is_prime(1u64 << 40));
        assert!(!is_prime(u64::MAX - 1));
    }

    #[test]
    fn strong_pseudoprimes_rejected() {
        // Strong pseudoprimes to ever larger prefixes of the witness set
        assert!(!is_prime(2_047u64));
        assert!(!is_prime(1_373_653u64));
        assert!(!is_prime(3_215_031_751u64));
        assert!(!is_prime(3_825_123_056_546_413_051u64));
    }

    #[test]
    fn carmichael_numbers_rejected() {
        for n in [561u32, 1_105, 1_729, 2_465, 2_821, 6_601, 8_911] {
            assert!(!is_prime(n), "n={}", n);
        }
    }

    #[test]
    fn large_primes_accepted() {
        assert!(is_prime(65_521u16)); // largest 16-bit prime
        assert!(is_prime(4_294_967_291u32)); // largest 32-bit prime
        assert!(is_prime(18_446_744_073_709_551_557u64)); // largest 64-bit prime
        assert!(is_prime(4_515_994_607u64));
        assert!(is_prime(2_257_997_303u64));
    }

    #[test]
    fn word_max_values_are_composite() {
        assert!(!is_prime(u16::MAX));
        assert!(!is_prime(u32::MAX));
        assert!(!is_prime(u64::MAX));
    }

    #[test]
    fn passes_witness_single_round() {
        // 221 = 13 * 17: 174 is a strong liar, 137 a witness
        let n = 221u32;
        let (d, r) = (55u32, 2u32);
        assert!(passes_witness(n, d, r, 174));
        assert!(!passes_witness(n, d, r, 137));
    }
}
