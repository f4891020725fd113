use crate::Word;

/// Computes $(x \cdot y) \bmod p$ without overflowing the word.
///
/// The product is formed in `W::Wide` and reduced there, so the result is
/// exact for every `x, y < p <= W::MAX`.
///
/// # Example
///
/// ```
/// use sophie_core::algo::modular::mul_mod;
///
/// let p = u64::MAX - 58; // largest 64-bit prime
/// assert_eq!(mul_mod(p - 1, p - 1, p), 1);
/// ```
#[inline]
pub fn mul_mod<W: Word>(x: W, y: W, p: W) -> W {
    W::narrow((x.widen() * y.widen()) % p.widen())
}

/// Computes $x^y \bmod p$ by square-and-multiply.
///
/// Runs in $O(\log y)$ calls to [`mul_mod`]. The base is reduced modulo `p`
/// first. When `p == 1` every residue collapses to 0.
///
/// # Example
///
/// ```
/// use sophie_core::algo::modular::pow_mod;
///
/// assert_eq!(pow_mod(2u32, 10, 1000), 24);
/// assert_eq!(pow_mod(5u16, 3, 1), 0);
/// ```
pub fn pow_mod<W: Word>(x: W, y: W, p: W) -> W {
    if p.is_one() {
        return W::zero();
    }

    let mut result = W::one();
    let mut base = x % p;
    let mut exp = y;
    while !exp.is_zero() {
        if (exp & W::one()).is_one() {
            result = mul_mod(result, base, p);
        }
        base = mul_mod(base, base, p);
        exp = exp >> 1;
    }
    result
}
