//! This crate implements simple forward-error-correction (FEC) block codes and a Monte Carlo
//! simulator for their bit error rate (BER). The codes are uncoded transmission, repetition codes
//! with majority-vote decoding, and generic binary Hamming codes with single-error correction.
//! Code bits are sent as antipodal (BPSK) symbols over an AWGN or Rayleigh fading channel, sliced
//! with hard decisions, and decoded; sweeping the SNR yields coded and uncoded BER curves.
//!
//! # Examples
//!
//! ```
//! use fecsim::{build_codec, sim, ChannelType, CodecKind, CodecParams};
//!
//! let codec = build_codec(CodecKind::Repetition, CodecParams { n: Some(3), k: None })?;
//! let curve = sim::run_sweep(0, 2, ChannelType::Rayleigh, &codec, &sim::SimParams::default())?;
//! for point in curve.points() {
//!     assert!(point.ber_coded > 0.0 && point.ber_uncoded > 0.0);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(
    clippy::complexity,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_allocation,
    unused_import_braces,
    unused_qualifications
)]

pub mod channel;
mod codec;
mod common;
pub mod hamming;
pub mod repetition;
pub mod sim;
pub mod utils;

pub use channel::{ChannelType, Sampler};
pub use codec::{
    build_codec, list_codecs, presets, CodeRate, Codec, CodecDescriptor, CodecKind, CodecParams,
};
pub use common::{Bit, Error};
