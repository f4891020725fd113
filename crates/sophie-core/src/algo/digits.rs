use crate::Word;

// ============================================================================
// Digit Stream
// ============================================================================

/// Lazy stream of the decimal digits of $1/q$, by long division.
///
/// # Performance
/// - **State**: a single remainder `r` with $0 \le r < q$, starting at 1.
/// - **Iteration**: one widened multiply, one division and one remainder per digit.
/// - **Exactness**: integer arithmetic only, so output is bit-for-bit reproducible.
///
/// The stream never ends; since $q$ is maximally periodic it repeats after $q - 1$ digits.
///
/// # Example
/// ```
/// use sophie_core::DigitStream;
///
/// // 1/7 = 0.142857...
/// let digits: Vec<u8> = DigitStream::new(7u16).take(6).collect();
/// assert_eq!(digits, vec![1, 4, 2, 8, 5, 7]);
/// ```
#[derive(Debug, Clone)]
pub struct DigitStream<W: Word> {
    modulus: W,
    remainder: W,
}

impl<W: Word> DigitStream<W> {
    /// Creates a stream at the start of the expansion of $1/q$.
    ///
    /// `modulus` must be greater than 1.
    pub fn new(modulus: W) -> Self {
        Self {
            modulus,
            remainder: W::one(),
        }
    }

    /// The modulus `q`.
    #[inline]
    pub fn modulus(&self) -> W {
        self.modulus
    }

    /// The current remainder, which fully determines all future digits.
    #[inline]
    pub fn remainder(&self) -> W {
        self.remainder
    }

    /// Extracts the next digit and advances the remainder.
    #[inline]
    pub fn next_digit(&mut self) -> u8 {
        let scaled = self.remainder.widen() * W::from_small(10).widen();
        let q = self.modulus.widen();
        let digit = W::narrow(scaled / q);
        self.remainder = W::narrow(scaled % q);
        // remainder < q, so digit < 10
        digit.as_u128() as u8
    }
}

impl<W: Word> Iterator for DigitStream<W> {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        Some(self.next_digit())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

// ============================================================================
// Observations
// ============================================================================

/// Iterator over formatted observations: `"0."` followed by a fixed number of digits.
///
/// All observations drain one shared [`DigitStream`], so the remainder carries
/// over from one observation to the next. Requesting two observations of `D`
/// digits yields the first `2D` digits of $1/q$, split in two.
///
/// # Example
/// ```
/// use sophie_core::{DigitStream, Observations};
///
/// let lines: Vec<String> = Observations::new(DigitStream::new(7u16), 3, 2).collect();
/// assert_eq!(lines, vec!["0.14", "0.28", "0.57"]);
/// ```
#[derive(Debug, Clone)]
pub struct Observations<W: Word> {
    stream: DigitStream<W>,
    remaining: u64,
    digits_per_observation: usize,
}

impl<W: Word> Observations<W> {
    /// Creates an iterator yielding `count` observations of `digits_per_observation` digits each.
    pub fn new(stream: DigitStream<W>, count: u64, digits_per_observation: usize) -> Self {
        Self {
            stream,
            remaining: count,
            digits_per_observation,
        }
    }

    /// The underlying digit stream, positioned after the last emitted observation.
    pub fn stream(&self) -> &DigitStream<W> {
        &self.stream
    }

    /// Writes the next observation into `buf`, replacing its contents.
    ///
    /// Returns false once every observation has been produced. This lets a
    /// caller reuse one buffer for the whole run.
    pub fn next_into(&mut self, buf: &mut String) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;

        buf.clear();
        buf.reserve(self.digits_per_observation + 2);
        buf.push_str("0.");
        for _ in 0..self.digits_per_observation {
            buf.push(char::from(b'0' + self.stream.next_digit()));
        }
        true
    }
}

impl<W: Word> Iterator for Observations<W> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut line = String::new();
        self.next_into(&mut line).then_some(line)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl<W: Word> ExactSizeIterator for Observations<W> {}
