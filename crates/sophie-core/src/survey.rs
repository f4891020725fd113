//! Empirical check of the configured gap bound.
//!
//! `GAP_MAX` is supplied from outside, not derived. A survey scans every seed
//! window of a configuration and reports whether each one really holds a
//! qualifying safe prime, and how close the widest window came to the bound.
//!
//! Windows are independent and side-effect free, so they are scanned in
//! parallel with Rayon. This never generates digits.

use crate::algo::safe_prime::locate_within;
use crate::generator::SophieGenerator;
use crate::window::SeedWindow;
use crate::Word;

use rayon::prelude::*;
use std::sync::{Mutex, PoisonError};

/// Function type for reporting progress updates (0.0 to 1.0).
pub type ProgressReporter = Box<dyn Fn(f64) + Send + Sync>;

/// Outcome of scanning one seed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowReport<W: Word> {
    pub window: SeedWindow<W>,
    /// First qualifying safe prime in the window, if any.
    pub found: Option<W>,
}

/// Summary of a survey over all seeds of a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapSurvey<W: Word> {
    /// Number of windows scanned (`seed_max + 1`).
    pub seeds_checked: u64,
    /// Configured gap bound.
    pub gap_max: W,
    /// Largest distance from a lower bound to its prime.
    pub widest_offset: W,
    /// Seed with the largest distance.
    pub widest_seed: W,
    /// Seeds whose window holds no qualifying prime.
    pub violations: Vec<W>,
    /// Seeds whose prime equals the previous seed's prime.
    ///
    /// Only possible when a prime sits exactly on the shared endpoint of two windows.
    pub duplicates: Vec<W>,
}

impl<W: Word> GapSurvey<W> {
    /// True if every window holds a prime and no two seeds share one.
    pub fn is_sound(&self) -> bool {
        self.violations.is_empty() && self.duplicates.is_empty()
    }

    /// Unused part of the gap bound for the widest window.
    pub fn slack(&self) -> W {
        self.gap_max.saturating_sub(self.widest_offset)
    }
}

/// Scans every seed window of `generator` in parallel.
///
/// # Arguments
///
/// * `generator` - Validated generator whose windows are scanned.
/// * `reporter` - Optional callback receiving the completed fraction.
///
/// # Example
///
/// ```
/// use sophie_core::{survey_gaps, SophieConfig, SophieGenerator};
///
/// let generator = SophieGenerator::new(SophieConfig::compact()).unwrap();
/// let survey = survey_gaps(&generator, None);
/// assert!(survey.is_sound());
/// assert_eq!(survey.seeds_checked, 16);
/// ```
pub fn survey_gaps<W: Word>(
    generator: &SophieGenerator<W>,
    reporter: Option<ProgressReporter>,
) -> GapSurvey<W> {
    let config = *generator.config();
    let total = config.seed_max.as_u128() as u64 + 1;
    // Counted under the lock so reported fractions never move backwards.
    let done = Mutex::new(0u64);

    let mut reports: Vec<WindowReport<W>> = (0..total)
        .into_par_iter()
        .filter_map(W::from_u64)
        .map(|seed| {
            let window = SeedWindow::new(&config, seed);
            let found = locate_within(window.lower_bound, window.upper_bound).map(|sp| sp.q);

            if let Some(report) = &reporter {
                let mut finished = done.lock().unwrap_or_else(PoisonError::into_inner);
                *finished += 1;
                report(*finished as f64 / total as f64);
            }

            WindowReport { window, found }
        })
        .collect();
    reports.sort_unstable_by_key(|r| r.window.seed);

    summarize(&reports, config.gap_max)
}

/// Folds per-window reports, ordered by seed, into a survey summary.
pub fn summarize<W: Word>(reports: &[WindowReport<W>], gap_max: W) -> GapSurvey<W> {
    let mut survey = GapSurvey {
        seeds_checked: reports.len() as u64,
        gap_max,
        widest_offset: W::zero(),
        widest_seed: W::zero(),
        violations: Vec::new(),
        duplicates: Vec::new(),
    };

    let mut previous: Option<W> = None;
    for report in reports {
        match report.found {
            Some(q) => {
                let offset = report.window.offset_of(q);
                if offset > survey.widest_offset {
                    survey.widest_offset = offset;
                    survey.widest_seed = report.window.seed;
                }
                if previous == Some(q) {
                    survey.duplicates.push(report.window.seed);
                }
                previous = Some(q);
            }
            None => {
                tracing::warn!(seed = %report.window.seed, lower_bound = %report.window.lower_bound, "no safe prime within gap bound");
                survey.violations.push(report.window.seed);
                previous = None;
            }
        }
    }

    survey
}
