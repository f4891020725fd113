use crate::algo::digits::{DigitStream, Observations};
use crate::algo::safe_prime::{locate, SafePrime};
use crate::config::SophieConfig;
use crate::types::{ConfigError, SophieError};
use crate::window::SeedWindow;
use crate::Word;

/// A seed's window together with the safe prime found in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located<W: Word> {
    /// Search window derived from the seed.
    pub window: SeedWindow<W>,
    /// First qualifying safe prime at or above the window's lower bound.
    pub prime: SafePrime<W>,
}

impl<W: Word> Located<W> {
    /// Distance between the window's lower bound and `q`.
    pub fn offset(&self) -> W {
        self.window.offset_of(self.prime.q)
    }
}

/// Pseudorandom uniform sample generator over a validated configuration.
///
/// The only constructor runs [`SophieConfig::validate`], so every method can
/// rely on the overflow invariants holding.
///
/// This generator is **not** cryptographically secure: its output is fully
/// determined by the seed and trivially predictable.
///
/// # Example
///
/// ```
/// use sophie_core::{SophieConfig, SophieGenerator};
///
/// let generator = SophieGenerator::new(SophieConfig::compact())?;
/// let lines: Vec<String> = generator.observations(4, 0)?.collect();
/// assert_eq!(lines, vec!["0.00", "0.11", "0.58", "0.74"]);
/// # Ok::<(), sophie_core::SophieError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SophieGenerator<W: Word> {
    config: SophieConfig<W>,
}

impl<W: Word> SophieGenerator<W> {
    /// Validates `config` and builds a generator from it.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found by [`SophieConfig::validate`].
    pub fn new(config: SophieConfig<W>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration.
    pub fn config(&self) -> &SophieConfig<W> {
        &self.config
    }

    /// Checks a request against the configured limits.
    ///
    /// # Errors
    ///
    /// * `SophieError::ObservationsOutOfRange` if `num_observations > observations_max`.
    /// * `SophieError::SeedOutOfRange` if `seed > seed_max`.
    pub fn check_request(&self, num_observations: W, seed: W) -> Result<(), SophieError> {
        if num_observations > self.config.observations_max {
            return Err(SophieError::ObservationsOutOfRange {
                value: num_observations.as_u128(),
                max: self.config.observations_max.as_u128(),
            });
        }
        self.check_seed(seed)
    }

    fn check_seed(&self, seed: W) -> Result<(), SophieError> {
        if seed > self.config.seed_max {
            return Err(SophieError::SeedOutOfRange {
                value: seed.as_u128(),
                max: self.config.seed_max.as_u128(),
            });
        }
        Ok(())
    }

    /// Returns the search window of `seed`.
    ///
    /// # Errors
    ///
    /// Returns `SophieError::SeedOutOfRange` if `seed > seed_max`.
    pub fn window(&self, seed: W) -> Result<SeedWindow<W>, SophieError> {
        self.check_seed(seed)?;
        Ok(SeedWindow::new(&self.config, seed))
    }

    /// Finds the safe prime of `seed` and checks it against the gap bound.
    ///
    /// # Errors
    ///
    /// * `SophieError::SeedOutOfRange` if `seed > seed_max`.
    /// * `ConfigError::SearchExhausted` if no qualifying prime exists below the word maximum.
    /// * `ConfigError::GapBoundExceeded` if the prime lies beyond `lower_bound + gap_max`.
    ///
    /// The last two mean the configured `gap_max` is wrong. They are fatal and
    /// must not be retried.
    pub fn locate(&self, seed: W) -> Result<Located<W>, SophieError> {
        let window = self.window(seed)?;
        tracing::debug!(
            seed = %seed,
            lower_bound = %window.lower_bound,
            upper_bound = %window.upper_bound,
            "scanning seed window"
        );

        let prime = locate(window.lower_bound).ok_or(ConfigError::SearchExhausted {
            lower_bound: window.lower_bound.as_u128(),
        })?;

        if !window.contains(prime.q) {
            return Err(ConfigError::GapBoundExceeded {
                lower_bound: window.lower_bound.as_u128(),
                found: prime.q.as_u128(),
                gap_max: self.config.gap_max.as_u128(),
            }
            .into());
        }

        tracing::debug!(q = %prime.q, p = %prime.p, offset = %window.offset_of(prime.q), "safe prime located");
        Ok(Located { window, prime })
    }

    /// Starts the observation stream for an already located prime.
    ///
    /// # Errors
    ///
    /// Returns `SophieError::ObservationsOutOfRange` if `num_observations > observations_max`.
    pub fn observations_from(
        &self,
        located: &Located<W>,
        num_observations: W,
    ) -> Result<Observations<W>, SophieError> {
        self.check_request(num_observations, located.window.seed)?;
        Ok(Observations::new(
            DigitStream::new(located.prime.q),
            num_observations.as_u128() as u64,
            self.config.digits_per_observation.as_u128() as usize,
        ))
    }

    /// Runs the full pipeline: window, safe prime search, then digit extraction.
    ///
    /// A request for zero observations still locates the prime and yields nothing.
    ///
    /// # Errors
    ///
    /// Any error from [`check_request`](Self::check_request) or [`locate`](Self::locate).
    pub fn observations(&self, num_observations: W, seed: W) -> Result<Observations<W>, SophieError> {
        self.check_request(num_observations, seed)?;
        let located = self.locate(seed)?;
        self.observations_from(&located, num_observations)
    }
}
