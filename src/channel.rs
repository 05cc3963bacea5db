//! Channel models for antipodal (BPSK) transmission
//!
//! A [`Channel`] maps a transmitted amplitude `x` to the received sample `h * x + w`, where `w` is
//! zero-mean noise and `h` is a fading gain (`1.0` on the AWGN channel). The noise standard
//! deviation is normalized by the code rate, so that coded and uncoded transmissions are compared
//! at the same energy per information bit.
//!
//! # Examples
//!
//! ```
//! use fecsim::{channel::Channel, utils, ChannelType, CodeRate, Sampler};
//!
//! let mut rng = rand::rng();
//! let rate = CodeRate::new(4, 7)?;
//! let channel = Channel::new(ChannelType::Awgn, Sampler::Approximate, 60.0, rate);
//! let bits = utils::random_bits(100, &mut rng);
//! assert_eq!(channel.transmit_bits(&bits, &mut rng), bits);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::{utils, Bit, CodeRate, Error};

/// Enumeration of channel impairments
#[derive(Clone, Eq, Hash, PartialEq, Debug, Copy, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    /// Additive white Gaussian noise only
    #[default]
    Awgn,
    /// Flat Rayleigh fading followed by additive noise
    Rayleigh,
}

impl std::str::FromStr for ChannelType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "awgn" => Ok(ChannelType::Awgn),
            "rayleigh" => Ok(ChannelType::Rayleigh),
            _ => Err(Error::InvalidInput(format!("Unknown channel type: {s}"))),
        }
    }
}

impl std::fmt::Display for ChannelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelType::Awgn => write!(f, "AWGN"),
            ChannelType::Rayleigh => write!(f, "Rayleigh"),
        }
    }
}

/// Enumeration of random samplers for noise and fading
#[derive(Clone, Eq, Hash, PartialEq, Debug, Copy, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sampler {
    /// Noise is `u1 + u2 + u3 + u4 - 2` (Irwin-Hall, variance `1/3`) and the fading gain is
    /// `sqrt((u1^2 + u2^2) / 2)`, with all `u`'s uniform on `[0, 1)`
    #[default]
    Approximate,
    /// Noise is standard normal and the fading gain is `sqrt((g1^2 + g2^2) / 2)` with `g1`, `g2`
    /// standard normal, i.e., Rayleigh with unit mean-square value
    Exact,
}

impl std::str::FromStr for Sampler {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "approximate" => Ok(Sampler::Approximate),
            "exact" => Ok(Sampler::Exact),
            _ => Err(Error::InvalidInput(format!("Unknown sampler: {s}"))),
        }
    }
}

impl Sampler {
    /// Returns a zero-mean noise sample of unit scale.
    fn noise<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        match self {
            Sampler::Approximate => {
                rng.random::<f64>() + rng.random::<f64>() + rng.random::<f64>()
                    + rng.random::<f64>()
                    - 2.0
            }
            Sampler::Exact => rng.sample(StandardNormal),
        }
    }

    /// Returns a fading gain magnitude.
    fn fading_gain<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        let (u1, u2): (f64, f64) = match self {
            Sampler::Approximate => (rng.random(), rng.random()),
            Sampler::Exact => (rng.sample(StandardNormal), rng.sample(StandardNormal)),
        };
        ((u1 * u1 + u2 * u2) / 2.0).sqrt()
    }
}

/// Returns noise standard deviation `sqrt(1 / (2 * snr * rate))` for given SNR and code rate.
///
/// # Parameters
///
/// - `snr_db`: Ratio (dB) of energy per information bit to noise power spectral density.
///
/// - `rate`: Code rate, in `(0, 1]`.
#[must_use]
pub fn noise_std_dev(snr_db: f64, rate: f64) -> f64 {
    let snr = 10f64.powf(snr_db / 10.0);
    (1.0 / (2.0 * snr * rate)).sqrt()
}

/// Noisy channel at a fixed SNR
#[derive(Clone, PartialEq, Debug, Copy)]
pub struct Channel {
    /// Channel impairment
    channel_type: ChannelType,
    /// Sampler for noise and fading
    sampler: Sampler,
    /// Noise scale
    sigma: f64,
}

impl Channel {
    /// Returns channel of given type at given SNR for a code of given rate.
    #[must_use]
    pub fn new(channel_type: ChannelType, sampler: Sampler, snr_db: f64, rate: CodeRate) -> Self {
        Self {
            channel_type,
            sampler,
            sigma: noise_std_dev(snr_db, rate.value()),
        }
    }

    /// Returns the noise scale `sigma` of the channel.
    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Returns received sample for given transmitted amplitude.
    pub fn transmit<R: Rng + ?Sized>(&self, x: f64, rng: &mut R) -> f64 {
        let noise = self.sigma * self.sampler.noise(rng);
        let h = match self.channel_type {
            ChannelType::Awgn => 1.0,
            ChannelType::Rayleigh => self.sampler.fading_gain(rng),
        };
        h * x + noise
    }

    /// Returns hard decisions on the received samples for given transmitted bits.
    pub fn transmit_bits<R: Rng + ?Sized>(&self, bits: &[Bit], rng: &mut R) -> Vec<Bit> {
        let samples: Vec<f64> = utils::bpsk_modulate(bits)
            .into_iter()
            .map(|x| self.transmit(x, rng))
            .collect();
        utils::hard_decision(&samples)
    }
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    const NUM_SAMPLES: u32 = 100_000;

    fn unit_rate() -> CodeRate {
        CodeRate::new(1, 1).unwrap()
    }

    /// Returns sample mean of `f` over `NUM_SAMPLES` draws.
    fn sample_mean(mut f: impl FnMut() -> f64) -> f64 {
        (0 .. NUM_SAMPLES).map(|_| f()).sum::<f64>() / f64::from(NUM_SAMPLES)
    }

    #[test]
    fn test_from_str() {
        assert_eq!("awgn".parse::<ChannelType>().unwrap(), ChannelType::Awgn);
        assert_eq!(
            "rayleigh".parse::<ChannelType>().unwrap(),
            ChannelType::Rayleigh
        );
        assert!("rician".parse::<ChannelType>().is_err());
        assert_eq!("exact".parse::<Sampler>().unwrap(), Sampler::Exact);
        assert!("fast".parse::<Sampler>().is_err());
    }

    #[test]
    fn test_noise_std_dev() {
        assert_float_eq!(noise_std_dev(0.0, 1.0), 0.5f64.sqrt(), abs <= 1e-12);
        assert_float_eq!(noise_std_dev(10.0, 1.0), 0.05f64.sqrt(), abs <= 1e-12);
        assert_float_eq!(noise_std_dev(0.0, 0.5), 1.0, abs <= 1e-12);
        let channel = Channel::new(
            ChannelType::Awgn,
            Sampler::Approximate,
            0.0,
            CodeRate::new(1, 3).unwrap(),
        );
        assert_float_eq!(channel.sigma(), 1.5f64.sqrt(), abs <= 1e-12);
    }

    #[test]
    fn test_approximate_noise() {
        let mut rng = StdRng::seed_from_u64(1);
        let channel = Channel::new(ChannelType::Awgn, Sampler::Approximate, 0.0, unit_rate());
        let sigma = channel.sigma();
        let mean = sample_mean(|| channel.transmit(1.0, &mut rng) - 1.0);
        assert!(mean.abs() < 0.01);
        // Sum of four uniforms has variance 1/3
        let var = sample_mean(|| (channel.transmit(1.0, &mut rng) - 1.0).powi(2));
        assert_float_eq!(var, sigma * sigma / 3.0, r2nd <= 0.05);
        // Irwin-Hall noise is bounded by 2 sigma
        assert!((0 .. 1000).all(|_| (channel.transmit(0.0, &mut rng)).abs() <= 2.0 * sigma));
    }

    #[test]
    fn test_exact_noise() {
        let mut rng = StdRng::seed_from_u64(2);
        let channel = Channel::new(ChannelType::Awgn, Sampler::Exact, 3.0, unit_rate());
        let sigma = channel.sigma();
        let var = sample_mean(|| (channel.transmit(-1.0, &mut rng) + 1.0).powi(2));
        assert_float_eq!(var, sigma * sigma, r2nd <= 0.05);
    }

    #[test]
    fn test_fading_gain() {
        let mut rng = StdRng::seed_from_u64(3);
        let mean_sq = sample_mean(|| Sampler::Approximate.fading_gain(&mut rng).powi(2));
        assert_float_eq!(mean_sq, 1.0 / 3.0, r2nd <= 0.05);
        assert!((0 .. 1000).all(|_| {
            let h = Sampler::Approximate.fading_gain(&mut rng);
            (0.0 ..= 1.0).contains(&h)
        }));
        let mean_sq = sample_mean(|| Sampler::Exact.fading_gain(&mut rng).powi(2));
        assert_float_eq!(mean_sq, 1.0, r2nd <= 0.05);
    }

    #[test]
    fn test_rayleigh_channel() {
        let mut rng = StdRng::seed_from_u64(4);
        // With negligible noise, the received sample keeps the sign of `x` and shrinks by `h`
        let channel = Channel::new(ChannelType::Rayleigh, Sampler::Approximate, 200.0, unit_rate());
        let mean = sample_mean(|| channel.transmit(1.0, &mut rng));
        // E[h] for the uniform approximation is about 0.5410
        assert!(mean > 0.50 && mean < 0.58);
    }

    #[test]
    fn test_transmit_bits() {
        let mut rng = StdRng::seed_from_u64(5);
        let bits = utils::random_bits(1000, &mut rng);
        for channel_type in [ChannelType::Awgn, ChannelType::Rayleigh] {
            for sampler in [Sampler::Approximate, Sampler::Exact] {
                let channel = Channel::new(channel_type, sampler, 100.0, unit_rate());
                assert_eq!(channel.transmit_bits(&bits, &mut rng), bits);
            }
        }
        // At very low SNR, hard decisions are close to coin flips
        let channel = Channel::new(ChannelType::Awgn, Sampler::Exact, -40.0, unit_rate());
        let bits_hat = channel.transmit_bits(&bits, &mut rng);
        let num_errors = utils::error_count(&bits_hat, &bits);
        assert!(num_errors > 400 && num_errors < 600);
    }

    #[test]
    fn test_transmit_bits_slices_received_samples() {
        let bits = utils::random_bits(500, &mut StdRng::seed_from_u64(9));
        for channel_type in [ChannelType::Awgn, ChannelType::Rayleigh] {
            let channel = Channel::new(channel_type, Sampler::Approximate, 0.0, unit_rate());
            let mut rng = StdRng::seed_from_u64(21);
            let samples: Vec<f64> = utils::bpsk_modulate(&bits)
                .into_iter()
                .map(|x| channel.transmit(x, &mut rng))
                .collect();
            let bits_hat = channel.transmit_bits(&bits, &mut StdRng::seed_from_u64(21));
            assert_eq!(bits_hat, utils::hard_decision(&samples));
            assert!(utils::error_count(&bits_hat, &bits) > 0);
        }
    }
}
