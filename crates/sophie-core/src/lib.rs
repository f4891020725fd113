//! # Sophie Core
//!
//! Deterministic, seed-controlled pseudorandom uniform samples on $[0, 1)$,
//! read off the decimal expansion of $1/q$ for a Sophie-Germain safe prime $q$.
//!
//! **Not cryptographically secure.** The output is a pure function of the seed.
//!
//! ## Pipeline
//!
//! 1. **Seed window** ([`SeedWindow`]): the seed selects a numeric window of width `GAP_MAX`
//!    above the largest digit budget. Distinct seeds get non-overlapping windows.
//! 2. **Safe prime search** ([`locate`]): the first $q$ in the window such that $q$ and
//!    $p = (q-1)/2$ are prime (deterministic Miller–Rabin) and $p \bmod 20 \in \{3, 9, 11\}$,
//!    which makes the period of $1/q$ exactly $q - 1$.
//! 3. **Digit extraction** ([`DigitStream`]): exact long division of 1 by $q$, one remainder
//!    carried across all observations of a run.
//!
//! ## Usage
//!
//! ```rust
//! use sophie_core::{SophieConfig, SophieGenerator};
//!
//! let generator = SophieGenerator::new(SophieConfig::reference())?;
//! let located = generator.locate(12_345)?;
//! assert_eq!(located.prime.q, 64_645_534_379);
//!
//! for line in generator.observations_from(&located, 3)? {
//!     println!("{}", line);
//! }
//! # Ok::<(), sophie_core::SophieError>(())
//! ```
//!
//! ### Word widths
//!
//! Everything is generic over [`Word`], implemented for `u16`, `u32` and `u64`. Each
//! carries a double-width companion used for products, so no intermediate ever overflows.

pub mod algo;
pub mod config;
pub mod generator;
pub mod survey;
pub mod types;
pub mod window;

// Re-export types
pub use config::SophieConfig;
pub use types::{ConfigError, Preset, SophieError, Word};

// Re-export algorithms
pub use algo::{
    is_prime, is_sophie_germain_safe_prime, locate, locate_within, mul_mod, pow_mod, DigitStream,
    Observations, SafePrime,
};

pub use generator::{Located, SophieGenerator};
pub use survey::{survey_gaps, GapSurvey, ProgressReporter};
pub use window::SeedWindow;
