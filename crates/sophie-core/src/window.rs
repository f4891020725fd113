//! Mapping from a seed to its safe prime search window.
//!
//! # Layout
//!
//! The searched range is split into `seed_max + 1` consecutive windows of
//! width `gap_max`, all above a common base:
//!
//! $$\text{lower}(s) = \text{OBSERVATIONS\_MAX} \cdot \text{DIGITS} + 1 + s \cdot \text{GAP\_MAX}$$
//!
//! - The base keeps every `q` above the largest number of digits a run can
//!   request, so the expansion of $1/q$ never wraps within a run.
//! - Window `s` starts exactly `gap_max` after window `s - 1`, so the half-open
//!   spans $[\text{lower}(s), \text{lower}(s) + \text{GAP\_MAX})$ never overlap.
//! - `gap_max` bounds the distance between qualifying safe primes, so each
//!   window holds at least one. The located prime is checked against the
//!   inclusive limit $\text{lower}(s) + \text{GAP\_MAX}$.
//!
//! The window depends only on the seed, never on the number of observations.

use crate::config::SophieConfig;
use crate::Word;

/// Search window of a single seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeedWindow<W: Word> {
    /// The seed this window belongs to.
    pub seed: W,
    /// First candidate scanned.
    pub lower_bound: W,
    /// Largest admissible safe prime: `lower_bound + gap_max`.
    pub upper_bound: W,
}

impl<W: Word> SeedWindow<W> {
    /// Computes the window of `seed`.
    ///
    /// `config` must have passed [`SophieConfig::validate`] and `seed` must not
    /// exceed `config.seed_max`; under those conditions no step can overflow.
    pub(crate) fn new(config: &SophieConfig<W>, seed: W) -> Self {
        let lower_bound = config.base_lower_bound() + seed * config.gap_max;
        Self {
            seed,
            lower_bound,
            upper_bound: lower_bound + config.gap_max,
        }
    }

    /// Returns true if `q` lies within the window, bounds included.
    #[inline]
    pub fn contains(&self, q: W) -> bool {
        self.lower_bound <= q && q <= self.upper_bound
    }

    /// Distance from the lower bound to `q`.
    #[inline]
    pub fn offset_of(&self, q: W) -> W {
        q.saturating_sub(self.lower_bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_windows() {
        let config = SophieConfig::reference();

        let w0 = SeedWindow::new(&config, 0);
        assert_eq!(w0.lower_bound, 64_424_509_426);
        assert_eq!(w0.upper_bound, 64_424_509_426 + 17_904);

        let w = SeedWindow::new(&config, 12_345);
        assert_eq!(w.lower_bound, 64_645_534_306);
        assert_eq!(w.seed, 12_345);
    }

    #[test]
    fn last_reference_window_fits() {
        let config = SophieConfig::reference();
        let w = SeedWindow::new(&config, config.seed_max);
        assert_eq!(w.lower_bound, 65_597_848_066);
        assert_eq!(w.upper_bound, 65_597_865_970);
    }

    #[test]
    fn compact_windows() {
        let config = SophieConfig::compact();
        assert_eq!(SeedWindow::new(&config, 0).lower_bound, 511);
        assert_eq!(SeedWindow::new(&config, 15).lower_bound, 9_751);
        assert_eq!(SeedWindow::new(&config, 15).upper_bound, 10_367);
    }

    #[test]
    fn consecutive_windows_are_gap_apart() {
        let config = SophieConfig::compact();
        for seed in 0..config.seed_max {
            let this = SeedWindow::new(&config, seed);
            let next = SeedWindow::new(&config, seed + 1);
            assert_eq!(this.lower_bound + config.gap_max, next.lower_bound);
            assert_eq!(this.upper_bound, next.lower_bound);
        }
    }

    #[test]
    fn contains_is_inclusive() {
        let w = SeedWindow::new(&SophieConfig::compact(), 0);
        assert!(w.contains(511));
        assert!(w.contains(511 + 616));
        assert!(!w.contains(510));
        assert!(!w.contains(511 + 617));
    }

    #[test]
    fn offset_of_located_prime() {
        let w = SeedWindow::new(&SophieConfig::compact(), 0);
        assert_eq!(w.offset_of(863), 352);
        assert_eq!(w.offset_of(100), 0);
    }
}
