//! Configuration limits for the generator and their startup validation.
//!
//! The four limits must be chosen together: the seed windows, the digit budget
//! and the largest search bound all have to fit in the configured word, and
//! `GAP_MAX` has to be at least the widest distance between consecutive
//! qualifying safe primes in the searched range.
//!
//! [`SophieConfig::validate`] checks all of this once, before any search begins.

use crate::types::{ConfigError, Preset, Word};

/// Limits of the reference configuration (64-bit words).
pub mod reference {
    /// Maximum number of observations per run.
    pub const OBSERVATIONS_MAX: u64 = u32::MAX as u64;

    /// Maximum seed value.
    pub const SEED_MAX: u64 = u16::MAX as u64;

    /// Decimal digits per observation.
    pub const DIGITS_PER_OBSERVATION: u64 = 15;

    /// Widest distance between consecutive qualifying safe primes below
    /// `2 * (OBSERVATIONS_MAX + SEED_MAX)`.
    ///
    /// Empirically established, not derived. Every run re-checks that the prime
    /// it found lies within this distance of its lower bound.
    ///
    /// The windows sit near `6.5e10`, well above the measured range, and two
    /// seeds overshoot: 5287 needs 21013 and 52091 needs 20209. Requests for
    /// those seeds fail with `GapBoundExceeded`.
    pub const GAP_MAX: u64 = 17_904;
}

/// Limits of the compact configuration (16-bit words).
pub mod compact {
    /// Maximum number of observations per run.
    pub const OBSERVATIONS_MAX: u16 = 255;

    /// Maximum seed value.
    pub const SEED_MAX: u16 = 15;

    /// Decimal digits per observation.
    pub const DIGITS_PER_OBSERVATION: u16 = 2;

    /// Widest distance between consecutive qualifying safe primes in the compact range.
    pub const GAP_MAX: u16 = 616;
}

/// The four tunable limits of a generator over words of type `W`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SophieConfig<W: Word> {
    /// Maximum number of observations a single run may request.
    pub observations_max: W,
    /// Maximum seed value.
    pub seed_max: W,
    /// Decimal digits in each observation.
    pub digits_per_observation: W,
    /// Upper bound on the distance between consecutive qualifying safe primes.
    pub gap_max: W,
}

impl SophieConfig<u64> {
    /// The reference configuration: 64-bit words, 15 digits per observation.
    pub fn reference() -> Self {
        Self {
            observations_max: reference::OBSERVATIONS_MAX,
            seed_max: reference::SEED_MAX,
            digits_per_observation: reference::DIGITS_PER_OBSERVATION,
            gap_max: reference::GAP_MAX,
        }
    }
}

impl SophieConfig<u16> {
    /// The compact configuration: 16-bit words, 2 digits per observation.
    pub fn compact() -> Self {
        Self {
            observations_max: compact::OBSERVATIONS_MAX,
            seed_max: compact::SEED_MAX,
            digits_per_observation: compact::DIGITS_PER_OBSERVATION,
            gap_max: compact::GAP_MAX,
        }
    }
}

impl<W: Word> SophieConfig<W> {
    /// Checks every configuration invariant the generator relies on.
    ///
    /// # Errors
    ///
    /// Returns the first invariant that does not hold, in this order:
    /// wide type width, non-zero limits, `seed_max * gap_max`,
    /// `observations_max * digits_per_observation`, the largest lower bound,
    /// and the largest window end.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bits = W::BITS;
        if W::WIDE_BITS < 2 * bits {
            return Err(ConfigError::WideTypeTooNarrow {
                bits,
                wide_bits: W::WIDE_BITS,
                required_bits: 2 * bits,
            });
        }

        if self.digits_per_observation.is_zero() {
            return Err(ConfigError::ZeroLimit {
                name: "DIGITS_PER_OBSERVATION",
            });
        }
        if self.gap_max.is_zero() {
            return Err(ConfigError::ZeroLimit { name: "GAP_MAX" });
        }

        let seed_span = self
            .seed_max
            .checked_mul(&self.gap_max)
            .ok_or(ConfigError::SeedSpanOverflow { bits })?;

        let digit_budget = self
            .observations_max
            .checked_mul(&self.digits_per_observation)
            .ok_or(ConfigError::DigitBudgetOverflow { bits })?;

        let last_lower_bound = digit_budget
            .checked_add(&W::one())
            .and_then(|base| base.checked_add(&seed_span))
            .ok_or(ConfigError::LowerBoundOverflow { bits })?;

        last_lower_bound
            .checked_add(&self.gap_max)
            .ok_or(ConfigError::WindowEndOverflow { bits })?;

        Ok(())
    }

    /// Smallest lower bound, shared by seed 0.
    ///
    /// Only meaningful on a validated configuration.
    pub(crate) fn base_lower_bound(&self) -> W {
        self.observations_max * self.digits_per_observation + W::one()
    }
}

impl Preset {
    /// Human-readable limits of the preset, for usage messages.
    pub fn limits(&self) -> (u128, u128) {
        match self {
            Preset::Reference => (
                reference::OBSERVATIONS_MAX as u128,
                reference::SEED_MAX as u128,
            ),
            Preset::Compact => (
                compact::OBSERVATIONS_MAX as u128,
                compact::SEED_MAX as u128,
            ),
        }
    }
}
