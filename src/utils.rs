//! # Bit sequence utilities used by the simulator
//!
//! The [`random_bits`] function returns a given number of random bits; the [`bpsk_modulate`]
//! function maps bits to antipodal amplitudes; the [`hard_decision`] function slices received
//! samples back to bits; and the [`error_count`] function compares a sequence with a reference
//! sequence.
//!
//! # Examples
//!
//! The code below illustrates the usage of the functions in this module.
//! ```
//! use fecsim::utils;
//!
//! let mut rng = rand::rng();
//! let bits = utils::random_bits(40, &mut rng);
//! let syms = utils::bpsk_modulate(&bits);
//! let bits_hat = utils::hard_decision(&syms);
//! assert_eq!(utils::error_count(&bits_hat, &bits), 0);
//! ```

use rand::Rng;

use crate::Bit;

/// Returns given number of independent, equiprobable random bits.
///
/// # Parameters
///
/// - `num_bits`: Number of random bits to be generated.
///
/// - `rng`: Random number generator to be used.
///
/// # Returns
///
/// - `bits`: Random bits.
pub fn random_bits<R: Rng + ?Sized>(num_bits: usize, rng: &mut R) -> Vec<Bit> {
    (0 .. num_bits)
        .map(|_| Bit::from(rng.random_bool(0.5)))
        .collect()
}

/// Returns antipodal amplitude `2 * bit - 1` for a single bit.
#[must_use]
pub fn bpsk_symbol(bit: Bit) -> f64 {
    match bit {
        Bit::Zero => -1.0,
        Bit::One => 1.0,
    }
}

/// Returns antipodal (BPSK) amplitudes for given bits, with `One` mapped to `+1.0` and `Zero` to
/// `-1.0`.
#[must_use]
pub fn bpsk_modulate(bits: &[Bit]) -> Vec<f64> {
    bits.iter().map(|&b| bpsk_symbol(b)).collect()
}

/// Returns hard decision on a single received sample: `One` if the sample is strictly positive,
/// `Zero` otherwise.
#[must_use]
pub fn hard_decision_bit(sample: f64) -> Bit {
    Bit::from(sample > 0.0)
}

/// Returns hard decisions on received samples.
///
/// # Parameters
///
/// - `samples`: Received samples. Strictly positive values are mapped to `One`, and all other
///   values (including `0.0`) to `Zero`.
///
/// # Returns
///
/// - `bits_hat`: Bits obtained by slicing the given samples.
#[must_use]
pub fn hard_decision(samples: &[f64]) -> Vec<Bit> {
    samples.iter().map(|&y| hard_decision_bit(y)).collect()
}

/// Returns number of errors in a sequence with respect to a reference sequence.
///
/// # Parameters
///
/// - `seq`: Sequence in which errors must be counted.
///
/// - `ref_seq`: Reference sequence to which the given sequence is compared.
///
/// # Returns
///
/// - `err_count`: Number of positions in which the two sequences differ. If they are of different
///   lengths, then the longer sequence is effectively truncated to the length of the shorter one.
pub fn error_count<T: PartialEq>(seq: &[T], ref_seq: &[T]) -> usize {
    ref_seq
        .iter()
        .zip(seq.iter())
        .filter(|&(x, y)| x != y)
        .count()
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use Bit::{One, Zero};

    #[test]
    fn test_random_bits() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(random_bits(0, &mut rng).is_empty());
        let num_bits = 10000;
        let bits = random_bits(num_bits, &mut rng);
        assert_eq!(bits.len(), num_bits);
        let num_zeros = bits.iter().filter(|&b| *b == Zero).count();
        let num_ones = bits.iter().filter(|&b| *b == One).count();
        assert!(num_zeros > 9 * num_bits / 20 && num_ones > 9 * num_bits / 20);
    }

    #[test]
    fn test_random_bits_seeded() {
        let bits_a = random_bits(64, &mut StdRng::seed_from_u64(11));
        let bits_b = random_bits(64, &mut StdRng::seed_from_u64(11));
        assert_eq!(bits_a, bits_b);
    }

    #[test]
    fn test_bpsk_modulate() {
        assert!(bpsk_modulate(&[]).is_empty());
        assert_float_eq!(
            bpsk_modulate(&[One, Zero, Zero, One]),
            vec![1.0, -1.0, -1.0, 1.0],
            abs_all <= 1e-12
        );
    }

    #[test]
    fn test_hard_decision() {
        assert!(hard_decision(&[]).is_empty());
        assert_eq!(hard_decision(&[0.0, 0.01, -0.01, 3.5]), [Zero, One, Zero, One]);
    }

    #[test]
    fn test_error_count() {
        assert_eq!(error_count(&[], &[One, Zero]), 0);
        assert_eq!(error_count(&[One, Zero], &[]), 0);
        // Longer `seq`
        let ref_seq = [One, Zero, Zero, One, One, One, Zero, Zero];
        let seq = [One, One, Zero, Zero, One, One, Zero, Zero, Zero, One];
        assert_eq!(error_count(&seq, &ref_seq), 2);
        // Shorter `seq`
        let ref_seq = [One, Zero, Zero, One, One, One, Zero, Zero, Zero, One];
        let seq = [One, One, Zero, Zero, One, One, Zero, Zero];
        assert_eq!(error_count(&seq, &ref_seq), 2);
    }
}
