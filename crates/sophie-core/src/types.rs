use num_traits::{FromPrimitive, PrimInt, Unsigned};
use std::fmt::{Debug, Display};
use thiserror::Error;

// ============================================================================
// Numeric Domain
// ============================================================================

/// Fixed-width unsigned integer the generator works over.
///
/// Every `Word` carries a `Wide` companion type, at least twice as wide, which
/// holds the intermediate product of two words before it is reduced. This is the
/// only place wider arithmetic is allowed to happen.
///
/// Implemented for `u16` (wide `u32`), `u32` (wide `u64`) and `u64` (wide `u128`).
pub trait Word:
    PrimInt + Unsigned + FromPrimitive + Debug + Display + Send + Sync + 'static
{
    /// Double-width type used for products.
    type Wide: PrimInt + Unsigned + Debug;

    /// Bit width of `Self`.
    const BITS: u32;

    /// Bit width of `Self::Wide`.
    const WIDE_BITS: u32;

    /// Losslessly widens a word.
    fn widen(self) -> Self::Wide;

    /// Narrows a wide value back to a word.
    ///
    /// Callers only pass values already reduced below some word-sized modulus.
    fn narrow(wide: Self::Wide) -> Self;

    /// Small literal, used for constants like 10 and 20.
    fn from_small(value: u8) -> Self;

    /// Value as `u128`, for diagnostics and error reporting.
    fn as_u128(self) -> u128;
}

macro_rules! impl_word {
    ($word:ty, $wide:ty) => {
        impl Word for $word {
            type Wide = $wide;

            const BITS: u32 = <$word>::BITS;
            const WIDE_BITS: u32 = <$wide>::BITS;

            #[inline]
            fn widen(self) -> $wide {
                self as $wide
            }

            #[inline]
            fn narrow(wide: $wide) -> $word {
                wide as $word
            }

            #[inline]
            fn from_small(value: u8) -> $word {
                value as $word
            }

            #[inline]
            fn as_u128(self) -> u128 {
                self as u128
            }
        }
    };
}

impl_word!(u16, u32);
impl_word!(u32, u64);
impl_word!(u64, u128);

// ============================================================================
// Errors
// ============================================================================

/// Broken configuration invariants.
///
/// These are defects in the chosen limits or in the gap bound, never runtime
/// conditions: they must halt the run and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The wide type cannot hold the product of two words.
    #[error("Invalid configuration: wide type has {wide_bits} bits, needs at least {required_bits} for {bits}-bit words")]
    WideTypeTooNarrow {
        bits: u32,
        wide_bits: u32,
        required_bits: u32,
    },

    /// A limit that is used as a multiplier or step is zero.
    #[error("Invalid configuration: {name} must be non-zero")]
    ZeroLimit { name: &'static str },

    /// `seed_max * gap_max` overflows the word.
    #[error("Invalid configuration: (SEED_MAX * GAP_MAX) overflows {bits}-bit words")]
    SeedSpanOverflow { bits: u32 },

    /// `observations_max * digits_per_observation` overflows the word.
    #[error("Invalid configuration: (OBSERVATIONS_MAX * DIGITS_PER_OBSERVATION) overflows {bits}-bit words")]
    DigitBudgetOverflow { bits: u32 },

    /// The largest search lower bound overflows the word.
    #[error("Invalid configuration: (SEED_MAX * GAP_MAX + OBSERVATIONS_MAX * DIGITS_PER_OBSERVATION + 1) overflows {bits}-bit words")]
    LowerBoundOverflow { bits: u32 },

    /// The largest search window end overflows the word.
    #[error("Invalid configuration: the last seed window end (lower bound + GAP_MAX) overflows {bits}-bit words")]
    WindowEndOverflow { bits: u32 },

    /// The scan reached the domain maximum without a qualifying prime.
    #[error("Invalid configuration: no Sophie-Germain safe prime found at or above {lower_bound}")]
    SearchExhausted { lower_bound: u128 },

    /// The prime found lies beyond the configured gap bound.
    #[error("Invalid configuration: safe prime q = {found} lies beyond {lower_bound} + GAP_MAX ({gap_max}); GAP_MAX is too small")]
    GapBoundExceeded {
        lower_bound: u128,
        found: u128,
        gap_max: u128,
    },
}

/// Errors returned by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SophieError {
    /// Requested more observations than the configuration allows.
    #[error("num_observations={value} is out of range (max supported: {max})")]
    ObservationsOutOfRange { value: u128, max: u128 },

    /// Requested a seed beyond the configured maximum.
    #[error("seed={value} is out of range (max supported: {max})")]
    SeedOutOfRange { value: u128, max: u128 },

    /// A configuration invariant failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SophieError {
    /// Returns true for caller mistakes, which can be fixed by re-invoking with other input.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, SophieError::Config(_))
    }
}

// ============================================================================
// Preset Selection
// ============================================================================

/// Named configuration preset.
///
/// Shared by the CLI and library users so both agree on preset naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Preset {
    /// 64-bit words, 15 digits per observation, 65536 seeds.
    #[default]
    Reference,

    /// 16-bit words, 2 digits per observation, 16 seeds.
    ///
    /// Small enough to survey exhaustively in tests.
    Compact,
}

impl Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Preset::Reference => write!(f, "reference"),
            Preset::Compact => write!(f, "compact"),
        }
    }
}
