//! Numeric building blocks of the generator.
//!
//! # Components
//!
//! - **Modular arithmetic (`modular`)**: overflow-safe `mul_mod` and `pow_mod` over any [`Word`](crate::Word).
//! - **Primality (`primality`)**: deterministic Miller–Rabin with a fixed witness set.
//! - **Safe primes (`safe_prime`)**: the Sophie-Germain safe prime predicate and the upward scan.
//! - **Digits (`digits`)**: long-division digit stream of $1/q$ and its observation formatter.

pub mod digits;
pub mod modular;
pub mod primality;
pub mod safe_prime;

pub use digits::{DigitStream, Observations};
pub use modular::{mul_mod, pow_mod};
pub use primality::{is_prime, WITNESSES};
pub use safe_prime::{is_sophie_germain_safe_prime, locate, locate_within, SafePrime};
