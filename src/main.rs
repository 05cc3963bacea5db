//! This crate simulates the BER-versus-SNR performance of a block code (uncoded, repetition, or
//! Hamming) over an AWGN or Rayleigh fading channel with BPSK and hard decisions, alongside the
//! uncoded reference. Simulation parameters are specified on the command line, and simulation
//! results are saved to a JSON file.
//!
//! Build the executable with `cargo build --release` and then run `./target/release/fecsim -h`
//! for help on the command-line interface. Set `RUST_LOG=debug` to log error counts per SNR.

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

use std::time::Instant;

use anyhow::Result;
use clap::{crate_name, crate_version, value_parser, Arg, ArgAction, ArgMatches, Command};
use fecsim::{build_codec, list_codecs, sim, ChannelType, CodecKind, CodecParams, Sampler};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Log level used when `RUST_LOG` is not set
const DEFAULT_LOG_LEVEL: &str = "info";

/// Main function
fn main() -> Result<()> {
    init_logging()?;
    let timer = Instant::now();
    let matches = command_line_parser().get_matches();
    if matches.get_flag("list_codecs") {
        for descriptor in list_codecs() {
            println!(
                "{:<16}{:<20}rate {}",
                descriptor.id, descriptor.label, descriptor.rate
            );
        }
        return Ok(());
    }
    let codec = build_codec(
        code_kind_from_matches(&matches)?,
        codec_params_from_matches(&matches),
    )?;
    let channel = channel_type_from_matches(&matches)?;
    let (snr_start_db, snr_end_db) = snr_range_from_matches(&matches);
    let params = sim_params_from_matches(&matches)?;
    let curve = sim::run_sweep(snr_start_db, snr_end_db, channel, &codec, &params)?;
    for point in curve.points() {
        println!(
            "{:>4} dB  coded {:.3e}  uncoded {:.3e}",
            point.snr_db, point.ber_coded, point.ber_uncoded
        );
    }
    let report = sim::SweepReport {
        codec: codec.descriptor(),
        channel,
        snr_start_db,
        snr_end_db,
        params,
        curve,
    };
    let json_filename = json_filename_from_matches(&matches);
    sim::save_report(&report, &json_filename)?;
    info!("Saved results to {json_filename}");
    info!("Elapsed time: {:.3?}", timer.elapsed());
    Ok(())
}

/// Installs log subscriber with level taken from `RUST_LOG` if set.
fn init_logging() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_LOG_LEVEL))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Returns command line parser.
fn command_line_parser() -> Command {
    Command::new(crate_name!())
        .version(crate_version!())
        .about("Evaluates the BER of a block code over a BPSK channel with hard decisions")
        .arg(code_kind())
        .arg(block_len())
        .arg(num_data_bits())
        .arg(channel_type())
        .arg(first_snr_db())
        .arg(last_snr_db())
        .arg(num_bits())
        .arg(num_trials())
        .arg(sampler())
        .arg(seed())
        .arg(json_filename())
        .arg(list_codecs_flag())
}

/// Returns argument for code kind.
fn code_kind() -> Arg {
    Arg::new("code_kind")
        .short('c')
        .value_parser(["uncoded", "repetition", "hamming"])
        .default_value("hamming")
        .help("Code kind")
}

/// Returns argument for block length.
fn block_len() -> Arg {
    Arg::new("block_len")
        .short('n')
        .value_parser(value_parser!(usize))
        .default_value("7")
        .help("Block length (repetition factor or Hamming codeword length)")
}

/// Returns argument for number of data bits per Hamming codeword.
fn num_data_bits() -> Arg {
    Arg::new("num_data_bits")
        .short('k')
        .value_parser(value_parser!(usize))
        .help("Number of data bits per Hamming codeword [default: n - log2(n + 1)]")
}

/// Returns argument for channel type.
fn channel_type() -> Arg {
    Arg::new("channel_type")
        .short('m')
        .value_parser(["awgn", "rayleigh"])
        .default_value("awgn")
        .help("Channel type")
}

/// Returns argument for first Eb/N0 (dB).
fn first_snr_db() -> Arg {
    Arg::new("first_snr_db")
        .short('r')
        .value_parser(value_parser!(i32))
        .allow_negative_numbers(true)
        .default_value("0")
        .help("First Eb/N0 (dB)")
}

/// Returns argument for last Eb/N0 (dB).
fn last_snr_db() -> Arg {
    Arg::new("last_snr_db")
        .short('s')
        .value_parser(value_parser!(i32))
        .allow_negative_numbers(true)
        .default_value("12")
        .help("Last Eb/N0 (dB), simulated in steps of 1 dB from the first")
}

/// Returns argument for number of information bits per trial.
fn num_bits() -> Arg {
    Arg::new("num_bits")
        .short('b')
        .value_parser(value_parser!(usize))
        .default_value("1000")
        .help("Number of information bits per trial")
}

/// Returns argument for number of trials per Eb/N0 value.
fn num_trials() -> Arg {
    Arg::new("num_trials")
        .short('t')
        .value_parser(value_parser!(u32))
        .default_value("1")
        .help("Number of trials per Eb/N0 value")
}

/// Returns argument for noise and fading sampler.
fn sampler() -> Arg {
    Arg::new("sampler")
        .short('g')
        .value_parser(["approximate", "exact"])
        .default_value("approximate")
        .help("Noise and fading sampler")
}

/// Returns argument for random seed.
fn seed() -> Arg {
    Arg::new("seed")
        .short('d')
        .value_parser(value_parser!(u64))
        .help("Seed for reproducible results")
}

/// Returns argument for name of JSON file to which results must be saved.
fn json_filename() -> Arg {
    Arg::new("json_filename")
        .short('f')
        .default_value("results.json")
        .help("Name of JSON file to which results must be saved")
}

/// Returns flag for listing predefined codecs.
fn list_codecs_flag() -> Arg {
    Arg::new("list_codecs")
        .short('l')
        .action(ArgAction::SetTrue)
        .help("List predefined codecs and exit")
}

/// Returns code kind.
fn code_kind_from_matches(matches: &ArgMatches) -> Result<CodecKind> {
    Ok(string_from_matches(matches, "code_kind").parse()?)
}

/// Returns codec parameters.
fn codec_params_from_matches(matches: &ArgMatches) -> CodecParams {
    CodecParams {
        n: matches.get_one("block_len").copied(),
        k: matches.get_one("num_data_bits").copied(),
    }
}

/// Returns channel type.
fn channel_type_from_matches(matches: &ArgMatches) -> Result<ChannelType> {
    Ok(string_from_matches(matches, "channel_type").parse()?)
}

/// Returns first and last Eb/N0 (dB) values.
fn snr_range_from_matches(matches: &ArgMatches) -> (i32, i32) {
    // OK to unwrap: Both arguments have default values.
    (
        *matches.get_one("first_snr_db").unwrap(),
        *matches.get_one("last_snr_db").unwrap(),
    )
}

/// Returns simulation parameters.
fn sim_params_from_matches(matches: &ArgMatches) -> Result<sim::SimParams> {
    // OK to unwrap: Both count arguments have default values.
    Ok(sim::SimParams {
        num_bits: *matches.get_one("num_bits").unwrap(),
        num_trials: *matches.get_one("num_trials").unwrap(),
        sampler: string_from_matches(matches, "sampler").parse::<Sampler>()?,
        seed: matches.get_one("seed").copied(),
    })
}

/// Returns name of JSON file to which simulation results must be saved.
fn json_filename_from_matches(matches: &ArgMatches) -> String {
    string_from_matches(matches, "json_filename")
}

/// Returns value of a string argument that has a default value.
fn string_from_matches(matches: &ArgMatches, id: &str) -> String {
    matches
        .get_one::<String>(id)
        .map(String::to_string)
        .unwrap_or_default()
}
