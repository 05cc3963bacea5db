//! Generic binary Hamming code with parity bits at power-of-two positions
//!
//! Codeword positions are numbered `1, 2, ..., n`. Positions that are powers of two hold parity
//! bits, and the remaining positions hold data bits in ascending order. Parity bit `p` is the XOR
//! of all codeword positions `q` with `q & p != 0`, so that for a received block the parity
//! checks that fail spell out, in binary, the position of a single flipped bit.

use serde::Serialize;

use crate::{Bit, Error};

/// Parameters of a Hamming code
#[derive(Clone, Eq, PartialEq, Debug, Copy, Serialize)]
pub struct HammingParams {
    /// Codeword length, of the form `2^m - 1`
    pub(crate) n: usize,
    /// Number of data bits per codeword
    pub(crate) k: usize,
    /// Number of parity bits
    pub(crate) m: usize,
}

impl HammingParams {
    /// Returns Hamming code parameters for given codeword length and number of data bits.
    ///
    /// # Parameters
    ///
    /// - `n`: Codeword length. Must be of the form `2^m - 1` for a positive integer `m`.
    ///
    /// - `k`: Number of data bits per codeword, or `None` for the classical `n - m`. A value
    ///   smaller than `n - m` leaves the highest data positions fixed at zero.
    ///
    /// # Errors
    ///
    /// Returns an error if `n` is not of the form `2^m - 1`, if `k` is `0`, or if `k` exceeds
    /// either `n` or the number `n - m` of data positions in a codeword.
    ///
    /// # Examples
    ///
    /// ```
    /// use fecsim::hamming::HammingParams;
    ///
    /// let params = HammingParams::new(15, None)?;
    /// assert_eq!((params.n(), params.k(), params.m()), (15, 11, 4));
    /// assert!(HammingParams::new(6, Some(3)).is_err());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(n: usize, k: Option<usize>) -> Result<Self, Error> {
        let m = num_parity_bits(n)?;
        let num_data_positions = n - m;
        let k = k.unwrap_or(num_data_positions);
        if k == 0 {
            return Err(Error::InvalidCodeParameters(format!(
                "Number of data bits for Hamming code of length {n} must be positive"
            )));
        }
        if k > n {
            return Err(Error::InvalidCodeParameters(format!(
                "Number of data bits ({k}) exceeds codeword length ({n})"
            )));
        }
        if k > num_data_positions {
            return Err(Error::InvalidCodeParameters(format!(
                "Hamming code of length {n} has only {num_data_positions} data positions \
                 (requested {k} data bits)"
            )));
        }
        Ok(Self { n, k, m })
    }

    /// Returns codeword length.
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns number of data bits per codeword.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns number of parity bits per codeword.
    #[must_use]
    pub fn m(&self) -> usize {
        self.m
    }

    /// Returns code bits for given information bits.
    ///
    /// The information bits are split into blocks of `k` bits, the last block being zero-padded to
    /// `k` bits if necessary, and each block is encoded into an `n`-bit codeword.
    ///
    /// # Examples
    ///
    /// ```
    /// use fecsim::{hamming::HammingParams, Bit};
    /// use Bit::{One, Zero};
    ///
    /// let params = HammingParams::new(7, None)?;
    /// assert_eq!(
    ///     params.encode(&[One, Zero, One, One]),
    ///     [Zero, One, One, Zero, Zero, One, One]
    /// );
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn encode(&self, info_bits: &[Bit]) -> Vec<Bit> {
        let num_blocks = info_bits.len().div_ceil(self.k);
        let mut code_bits = Vec::with_capacity(num_blocks * self.n);
        let mut codeword = vec![Bit::Zero; self.n];
        for data_block in info_bits.chunks(self.k) {
            codeword.fill(Bit::Zero);
            for (pos, &bit) in data_positions(self.n).zip(data_block) {
                codeword[pos - 1] = bit;
            }
            for p in parity_positions(self.m) {
                codeword[p - 1] = parity_check(&codeword, p);
            }
            code_bits.extend_from_slice(&codeword);
        }
        code_bits
    }

    /// Returns information bit decisions for given code bits.
    ///
    /// The code bits are split into blocks of `n` bits, and a trailing block shorter than `n` is
    /// dropped. In each block, a nonzero syndrome is taken as the position of a single bit error
    /// and that bit is flipped before the `k` data bits are read out.
    ///
    /// # Examples
    ///
    /// ```
    /// use fecsim::{hamming::HammingParams, Bit};
    /// use Bit::{One, Zero};
    ///
    /// let params = HammingParams::new(7, None)?;
    /// // Codeword for [One, Zero, One, One] with position 5 flipped
    /// let code_bits = [Zero, One, One, Zero, One, One, One];
    /// assert_eq!(params.decode(&code_bits), [One, Zero, One, One]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn decode(&self, code_bits: &[Bit]) -> Vec<Bit> {
        let num_blocks = code_bits.len() / self.n;
        let mut info_bits_hat = Vec::with_capacity(num_blocks * self.k);
        let mut block = Vec::with_capacity(self.n);
        for received in code_bits.chunks_exact(self.n) {
            block.clear();
            block.extend_from_slice(received);
            let s = syndrome(&block, self.m);
            if s != 0 && s <= self.n {
                block[s - 1] = block[s - 1].flip();
            }
            info_bits_hat.extend(data_positions(self.n).take(self.k).map(|pos| block[pos - 1]));
        }
        info_bits_hat
    }
}

/// Returns syndrome of a received block: the OR of all parity positions whose check fails.
///
/// # Parameters
///
/// - `block`: Received block, with `block[q - 1]` holding codeword position `q`.
///
/// - `m`: Number of parity bits.
///
/// # Returns
///
/// - `syndrome`: `0` if all parity checks pass, else the 1-indexed position of the single bit
///   error that would explain the failed checks.
#[must_use]
pub fn syndrome(block: &[Bit], m: usize) -> usize {
    parity_positions(m)
        .filter(|&p| parity_check(block, p) == Bit::One)
        .fold(0, |s, p| s | p)
}

/// Returns number of parity bits `m` for codeword length `n = 2^m - 1`.
fn num_parity_bits(n: usize) -> Result<usize, Error> {
    match n.checked_add(1) {
        Some(n_plus_one) if n >= 1 && n_plus_one.is_power_of_two() => {
            Ok(n_plus_one.trailing_zeros() as usize)
        }
        _ => Err(Error::InvalidCodeParameters(format!(
            "Hamming codeword length must be of the form 2^m - 1 (found {n})"
        ))),
    }
}

/// Returns parity positions `1, 2, 4, ..., 2^(m-1)`.
fn parity_positions(m: usize) -> impl Iterator<Item = usize> {
    (0 .. m).map(|i| 1 << i)
}

/// Returns data positions (those in `[1, n]` that are not powers of two) in ascending order.
fn data_positions(n: usize) -> impl Iterator<Item = usize> {
    (1 ..= n).filter(|pos| !pos.is_power_of_two())
}

/// Returns XOR of all positions `q` of `block` with `q & p != 0`.
fn parity_check(block: &[Bit], p: usize) -> Bit {
    block
        .iter()
        .enumerate()
        .filter(|&(i, _)| (i + 1) & p != 0)
        .fold(Bit::Zero, |acc, (_, &bit)| acc ^ bit)
}
