//! Repetition code with hard-decision majority-vote decoding

use serde::Serialize;

use crate::{Bit, Error};

/// Repetition code in which every information bit is transmitted `n` times
#[derive(Clone, Eq, PartialEq, Debug, Copy, Serialize)]
pub struct Repetition {
    /// Number of copies of each information bit
    pub(crate) n: usize,
}

impl Repetition {
    /// Returns repetition code with given number of copies per bit.
    ///
    /// # Errors
    ///
    /// Returns an error if `n` is `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fecsim::repetition::Repetition;
    ///
    /// let code = Repetition::new(3)?;
    /// assert_eq!(code.n(), 3);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(n: usize) -> Result<Self, Error> {
        if n == 0 {
            return Err(Error::InvalidCodeParameters(
                "Repetition factor must be a positive integer".to_string(),
            ));
        }
        Ok(Self { n })
    }

    /// Returns number of copies per information bit.
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns code bits, with each information bit repeated `n` times contiguously.
    ///
    /// # Examples
    ///
    /// ```
    /// use fecsim::{repetition::Repetition, Bit};
    /// use Bit::{One, Zero};
    ///
    /// let code = Repetition::new(2)?;
    /// assert_eq!(code.encode(&[One, Zero]), [One, One, Zero, Zero]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn encode(&self, info_bits: &[Bit]) -> Vec<Bit> {
        info_bits
            .iter()
            .flat_map(|&bit| itertools::repeat_n(bit, self.n))
            .collect()
    }

    /// Returns information bit decisions by majority vote over consecutive blocks of `n` bits.
    ///
    /// A trailing block shorter than `n` is dropped. A block decodes to `One` only if its number of
    /// ones is strictly greater than `n / 2`, so an exact tie (possible for even `n`) decodes to
    /// `Zero`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fecsim::{repetition::Repetition, Bit};
    /// use Bit::{One, Zero};
    ///
    /// let code = Repetition::new(3)?;
    /// assert_eq!(code.decode(&[One, Zero, One, Zero, Zero, One, One]), [One, Zero]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn decode(&self, code_bits: &[Bit]) -> Vec<Bit> {
        code_bits
            .chunks_exact(self.n)
            .map(|block| {
                let num_ones = block.iter().filter(|&&b| b == Bit::One).count();
                // Strict majority, so ties go to `Zero`
                Bit::from(2 * num_ones > self.n)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Bit::{One, Zero};

    #[test]
    fn test_new() {
        // Invalid input
        assert!(matches!(
            Repetition::new(0),
            Err(Error::InvalidCodeParameters(_))
        ));
        // Valid input
        assert_eq!(Repetition::new(5).unwrap().n(), 5);
    }

    #[test]
    fn test_encode() {
        let code = Repetition::new(3).unwrap();
        assert!(code.encode(&[]).is_empty());
        assert_eq!(
            code.encode(&[One, Zero, One]),
            [One, One, One, Zero, Zero, Zero, One, One, One]
        );
        let code = Repetition::new(1).unwrap();
        assert_eq!(code.encode(&[Zero, One]), [Zero, One]);
    }

    #[test]
    fn test_decode() {
        let code = Repetition::new(3).unwrap();
        assert!(code.decode(&[]).is_empty());
        assert_eq!(
            code.decode(&[One, One, Zero, Zero, Zero, One, Zero, Zero, Zero]),
            [One, Zero, Zero]
        );
        // Trailing partial block is dropped
        assert_eq!(code.decode(&[One, Zero, One, One, One]), [One]);
        assert!(code.decode(&[One, One]).is_empty());
    }

    #[test]
    fn test_decode_even_tie() {
        let code = Repetition::new(2).unwrap();
        assert_eq!(code.decode(&[One, Zero]), [Zero]);
        assert_eq!(code.decode(&[Zero, One]), [Zero]);
        assert_eq!(code.decode(&[One, One]), [One]);
        let code = Repetition::new(4).unwrap();
        assert_eq!(code.decode(&[One, One, Zero, Zero]), [Zero]);
        assert_eq!(code.decode(&[One, One, One, Zero]), [One]);
    }

    #[test]
    fn test_noiseless_round_trip() {
        let info_bits = [One, Zero, Zero, One, One, Zero, One];
        for n in 1 .. 8 {
            let code = Repetition::new(n).unwrap();
            let code_bits = code.encode(&info_bits);
            assert_eq!(code_bits.len(), n * info_bits.len());
            assert_eq!(code.decode(&code_bits), info_bits);
        }
    }

    #[test]
    fn test_single_error_correction() {
        let code = Repetition::new(3).unwrap();
        let mut code_bits = code.encode(&[One, Zero]);
        code_bits[1] = code_bits[1].flip();
        code_bits[5] = code_bits[5].flip();
        assert_eq!(code.decode(&code_bits), [One, Zero]);
    }
}
