use super::primality::is_prime;
use crate::Word;

/// A Sophie-Germain safe prime `q = 2p + 1` whose reciprocal has maximal decimal period.
///
/// Built only by [`locate`] and [`locate_within`], so both `q` and `p` are
/// known to be prime and `p mod 20` is one of 3, 9 or 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SafePrime<W: Word> {
    /// The safe prime, used as the long-division modulus.
    pub q: W,
    /// The Sophie-Germain prime, `(q - 1) / 2`.
    pub p: W,
}

impl<W: Word> SafePrime<W> {
    /// Decimal period of $1/q$, which is $q - 1$.
    #[inline]
    pub fn period(&self) -> W {
        self.q - W::one()
    }
}

/// Returns true if `p mod 20` is 3, 9 or 11.
///
/// Under this condition 10 is a primitive root modulo `q = 2p + 1`, so the
/// decimal expansion of $1/q$ has period exactly $q - 1$.
#[inline]
fn has_maximal_period<W: Word>(p: W) -> bool {
    let residue = p % W::from_small(20);
    residue == W::from_small(3) || residue == W::from_small(9) || residue == W::from_small(11)
}

/// Checks whether `q` is a Sophie-Germain safe prime with a maximally periodic reciprocal.
///
/// The cheap period filter runs before either primality test.
///
/// # Example
///
/// ```
/// use sophie_core::is_sophie_germain_safe_prime;
///
/// assert!(is_sophie_germain_safe_prime(863u16)); // p = 431, 431 mod 20 = 11
/// assert!(!is_sophie_germain_safe_prime(83u16)); // p = 41 is prime, but 41 mod 20 = 1
/// ```
pub fn is_sophie_germain_safe_prime<W: Word>(q: W) -> bool {
    let p = q.saturating_sub(W::one()) >> 1;
    has_maximal_period(p) && is_prime(q) && is_prime(p)
}

/// Returns the first qualifying safe prime in `[lower, upper]`, if any.
pub fn locate_within<W: Word>(lower: W, upper: W) -> Option<SafePrime<W>> {
    let mut q = lower;
    while q <= upper {
        if is_sophie_germain_safe_prime(q) {
            return Some(SafePrime {
                q,
                p: (q - W::one()) >> 1,
            });
        }
        if q == upper {
            break;
        }
        q = q + W::one();
    }
    None
}

/// Returns the first qualifying safe prime at or above `lower_bound`.
///
/// The scan stops short of `W::MAX`, which is reserved as the "not found"
/// sentinel; `None` is returned if nothing qualifies before it.
///
/// # Example
///
/// ```
/// use sophie_core::locate;
///
/// let prime = locate(511u16).unwrap();
/// assert_eq!(prime.q, 863);
/// assert_eq!(prime.p, 431);
/// ```
pub fn locate<W: Word>(lower_bound: W) -> Option<SafePrime<W>> {
    let sentinel = W::max_value();
    if lower_bound >= sentinel {
        return None;
    }
    locate_within(lower_bound, sentinel - W::one())
}
