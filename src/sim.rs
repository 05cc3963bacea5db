//! Monte Carlo bit-error-rate simulation of block codes over noisy channels
//!
//! A trial generates random information bits, encodes them, sends the code bits over a
//! [`Channel`] with hard decisions at the receiver, decodes, and counts errors against the
//! transmitted information bits. A sweep runs trials at every integer SNR in a range, for the
//! selected codec and for uncoded transmission, and returns a [`BerCurve`].
//!
//! # Examples
//!
//! ```
//! use fecsim::{build_codec, sim, ChannelType, CodecKind, CodecParams};
//!
//! let codec = build_codec(CodecKind::Hamming, CodecParams { n: Some(7), k: None })?;
//! let params = sim::SimParams {
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! let curve = sim::run_sweep(0, 4, ChannelType::Awgn, &codec, &params)?;
//! assert_eq!(curve.len(), 5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fs::File;
use std::io::BufWriter;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{channel::Channel, utils, ChannelType, Codec, CodecDescriptor, Error, Sampler};

/// Value reported in place of a BER of exactly zero, so that curves stay plottable on a
/// logarithmic scale
pub const BER_FLOOR: f64 = 1e-6;

/// Parameters for bit-error-rate simulation
#[derive(Clone, PartialEq, Debug, Copy, Deserialize, Serialize)]
pub struct SimParams {
    /// Number of information bits generated per trial
    pub num_bits: usize,
    /// Number of trials per SNR value (error counts are pooled over trials)
    pub num_trials: u32,
    /// Sampler for channel noise and fading
    pub sampler: Sampler,
    /// Seed for reproducible results (fresh entropy if `None`)
    pub seed: Option<u64>,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            num_bits: 1000,
            num_trials: 1,
            sampler: Sampler::Approximate,
            seed: None,
        }
    }
}

/// Error count from one or more trials
#[derive(Clone, Eq, PartialEq, Debug, Copy, Default, Deserialize, Serialize)]
pub struct TrialOutcome {
    /// Number of decoded bits that differ from the transmitted bits
    pub num_errors: usize,
    /// Number of bit positions compared
    pub num_compared: usize,
}

impl TrialOutcome {
    /// Returns bit error rate, or `0.0` if no bits were compared.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ber(&self) -> f64 {
        if self.num_compared == 0 {
            0.0
        } else {
            self.num_errors as f64 / self.num_compared as f64
        }
    }
}

impl std::ops::Add for TrialOutcome {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            num_errors: self.num_errors + rhs.num_errors,
            num_compared: self.num_compared + rhs.num_compared,
        }
    }
}

/// BER values at a single SNR
#[derive(Clone, PartialEq, Debug, Copy, Deserialize, Serialize)]
pub struct BerPoint {
    /// Ratio (dB) of energy per information bit to noise power spectral density
    pub snr_db: i32,
    /// BER with the selected codec
    pub ber_coded: f64,
    /// BER without coding
    pub ber_uncoded: f64,
}

/// BER values in ascending order of SNR
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct BerCurve {
    /// Points on the curve
    points: Vec<BerPoint>,
}

impl BerCurve {
    /// Returns points on the curve.
    #[must_use]
    pub fn points(&self) -> &[BerPoint] {
        &self.points
    }

    /// Returns number of points on the curve.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the curve has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Simulation results, as saved to file
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct SweepReport {
    /// Codec that was simulated
    pub codec: CodecDescriptor,
    /// Channel impairment
    pub channel: ChannelType,
    /// First SNR (dB)
    pub snr_start_db: i32,
    /// Last SNR (dB)
    pub snr_end_db: i32,
    /// Simulation parameters
    pub params: SimParams,
    /// BER values
    pub curve: BerCurve,
}

/// Checks validity of simulation parameters.
fn check_sim_params(params: &SimParams) -> Result<(), Error> {
    if params.num_bits == 0 {
        return Err(Error::InvalidInput(
            "Number of bits per trial cannot be zero".to_string(),
        ));
    }
    if params.num_trials == 0 {
        return Err(Error::InvalidInput(
            "Number of trials per SNR cannot be zero".to_string(),
        ));
    }
    Ok(())
}

/// Runs one trial and returns its error count.
///
/// # Parameters
///
/// - `codec`: Codec to be used.
///
/// - `channel`: Channel over which the code bits are sent. Its noise level should have been set
///   for the rate of `codec`.
///
/// - `num_bits`: Number of information bits to be generated.
///
/// - `rng`: Random number generator to be used.
///
/// # Returns
///
/// - `outcome`: Number of errors among the first `min(num_bits, decoded length)` decoded bits,
///   and that number of compared bits.
pub fn run_trial<R: Rng + ?Sized>(
    codec: &Codec,
    channel: &Channel,
    num_bits: usize,
    rng: &mut R,
) -> TrialOutcome {
    let info_bits = utils::random_bits(num_bits, rng);
    let code_bits = codec.encode(&info_bits);
    let code_bits_hat = channel.transmit_bits(&code_bits, rng);
    let info_bits_hat = codec.decode(&code_bits_hat);
    TrialOutcome {
        num_errors: utils::error_count(&info_bits_hat, &info_bits),
        num_compared: info_bits_hat.len().min(info_bits.len()),
    }
}

/// Returns BER curves for a codec and for uncoded transmission over a range of SNR values.
///
/// # Parameters
///
/// - `snr_start_db`: First SNR (dB).
///
/// - `snr_end_db`: Last SNR (dB). SNR values run from `snr_start_db` to `snr_end_db` inclusive in
///   steps of `1`; the curve is empty if `snr_start_db > snr_end_db`.
///
/// - `channel_type`: Channel impairment.
///
/// - `codec`: Codec to be evaluated.
///
/// - `params`: Simulation parameters.
///
/// # Returns
///
/// - `curve`: One point per SNR value, in ascending order. Coded and uncoded trials use
///   independent random bits. A BER of exactly zero is reported as [`BER_FLOOR`].
///
/// # Errors
///
/// Returns an error if `params.num_bits` or `params.num_trials` is `0`.
pub fn run_sweep(
    snr_start_db: i32,
    snr_end_db: i32,
    channel_type: ChannelType,
    codec: &Codec,
    params: &SimParams,
) -> Result<BerCurve, Error> {
    check_sim_params(params)?;
    info!(
        "Simulating {codec} over {channel_type} channel, SNR {snr_start_db} to {snr_end_db} dB"
    );
    let all_snr_db: Vec<i32> = (snr_start_db ..= snr_end_db).collect();
    let mut rng = StdRng::seed_from_u64(params.seed.unwrap_or_else(|| rand::rng().random()));
    // Seeds are drawn up front so that results do not depend on thread scheduling
    let all_trial_seeds: Vec<Vec<(u64, u64)>> = all_snr_db
        .iter()
        .map(|_| {
            (0 .. params.num_trials)
                .map(|_| (rng.random(), rng.random()))
                .collect()
        })
        .collect();
    let points: Vec<BerPoint> = all_snr_db
        .par_iter()
        .zip(all_trial_seeds.par_iter())
        .map(|(&snr_db, trial_seeds)| sweep_point(snr_db, channel_type, codec, params, trial_seeds))
        .collect();
    info!("Finished {} SNR values", points.len());
    Ok(BerCurve { points })
}

/// Returns BER point at given SNR, pooling errors over trials run with given seeds.
fn sweep_point(
    snr_db: i32,
    channel_type: ChannelType,
    codec: &Codec,
    params: &SimParams,
    trial_seeds: &[(u64, u64)],
) -> BerPoint {
    let snr = f64::from(snr_db);
    let uncoded = Codec::Uncoded;
    let coded_channel = Channel::new(channel_type, params.sampler, snr, codec.rate());
    let uncoded_channel = Channel::new(channel_type, params.sampler, snr, uncoded.rate());
    let (coded_outcome, uncoded_outcome) = trial_seeds
        .par_iter()
        .map(|&(coded_seed, uncoded_seed)| {
            let mut coded_rng = StdRng::seed_from_u64(coded_seed);
            let mut uncoded_rng = StdRng::seed_from_u64(uncoded_seed);
            (
                run_trial(codec, &coded_channel, params.num_bits, &mut coded_rng),
                run_trial(&uncoded, &uncoded_channel, params.num_bits, &mut uncoded_rng),
            )
        })
        .reduce(
            || (TrialOutcome::default(), TrialOutcome::default()),
            |(c1, u1), (c2, u2)| (c1 + c2, u1 + u2),
        );
    debug!(
        "SNR {snr_db} dB: {} coded and {} uncoded errors in {} bits",
        coded_outcome.num_errors, uncoded_outcome.num_errors, uncoded_outcome.num_compared
    );
    BerPoint {
        snr_db,
        ber_coded: floored_ber(coded_outcome),
        ber_uncoded: floored_ber(uncoded_outcome),
    }
}

/// Returns BER from error count, with exact zero replaced by [`BER_FLOOR`].
fn floored_ber(outcome: TrialOutcome) -> f64 {
    if outcome.num_errors == 0 {
        BER_FLOOR
    } else {
        outcome.ber()
    }
}

/// Saves simulation results to a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_report(report: &SweepReport, json_filename: &str) -> Result<(), Error> {
    let writer = BufWriter::new(File::create(json_filename)?);
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}
