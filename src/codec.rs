//! Closed set of block codes selectable by the simulator
//!
//! A [`Codec`] is built once from a [`CodecKind`] and [`CodecParams`] (or taken from
//! [`presets`]), carries no mutable state, and can be shared freely between simulation trials.

use serde::{Deserialize, Serialize};

use crate::{hamming::HammingParams, repetition::Repetition, Bit, Error};

/// Code rate as an exact fraction `k/n`, kept in lowest terms
#[derive(Clone, Eq, PartialEq, Debug, Copy, Deserialize, Serialize)]
#[serde(try_from = "RawCodeRate")]
pub struct CodeRate {
    /// Numerator
    k: usize,
    /// Denominator
    n: usize,
}

impl CodeRate {
    /// Returns rate `k/n` reduced to lowest terms.
    ///
    /// # Errors
    ///
    /// Returns an error unless `0 < k <= n`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fecsim::CodeRate;
    ///
    /// assert_eq!(CodeRate::new(2, 6)?, CodeRate::new(1, 3)?);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(k: usize, n: usize) -> Result<Self, Error> {
        if k == 0 || k > n {
            return Err(Error::InvalidInput(format!(
                "Code rate {k}/{n} is not in (0, 1]"
            )));
        }
        let g = gcd(k, n);
        Ok(Self { k: k / g, n: n / g })
    }

    /// Returns numerator.
    #[must_use]
    pub fn numerator(&self) -> usize {
        self.k
    }

    /// Returns denominator.
    #[must_use]
    pub fn denominator(&self) -> usize {
        self.n
    }

    /// Returns rate as a floating-point value.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value(&self) -> f64 {
        self.k as f64 / self.n as f64
    }
}

/// Unvalidated code rate as read from JSON
#[derive(Deserialize)]
struct RawCodeRate {
    k: usize,
    n: usize,
}

impl TryFrom<RawCodeRate> for CodeRate {
    type Error = Error;

    fn try_from(raw: RawCodeRate) -> Result<Self, Error> {
        CodeRate::new(raw.k, raw.n)
    }
}

impl std::fmt::Display for CodeRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.k, self.n)
    }
}

/// Returns greatest common divisor of two positive integers.
fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Enumeration of code families
#[derive(Clone, Eq, Hash, PartialEq, Debug, Copy, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    /// No coding
    Uncoded,
    /// Repetition code
    Repetition,
    /// Hamming code
    Hamming,
}

impl std::str::FromStr for CodecKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "uncoded" | "none" => Ok(CodecKind::Uncoded),
            "repetition" => Ok(CodecKind::Repetition),
            "hamming" => Ok(CodecKind::Hamming),
            _ => Err(Error::InvalidInput(format!("Unknown code kind: {s}"))),
        }
    }
}

/// Parameters accompanying a [`CodecKind`] when building a codec
#[derive(Clone, Eq, PartialEq, Debug, Copy, Default, Deserialize, Serialize)]
pub struct CodecParams {
    /// Block length (repetition factor, or Hamming codeword length)
    pub n: Option<usize>,
    /// Number of data bits per Hamming codeword (defaults to `n - m`)
    pub k: Option<usize>,
}

/// Block code used to protect transmitted bits
#[derive(Clone, Eq, PartialEq, Debug, Copy, Serialize)]
pub enum Codec {
    /// Identity mapping
    Uncoded,
    /// Repetition code
    Repetition(Repetition),
    /// Hamming code
    Hamming(HammingParams),
}

/// Descriptor of a codec for selection lists and reports
#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
pub struct CodecDescriptor {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub label: String,
    /// Code rate
    pub rate: CodeRate,
}

impl Codec {
    /// Returns stable identifier of the codec.
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            Codec::Uncoded => "none".to_string(),
            Codec::Repetition(code) => format!("rep-1/{}", code.n()),
            Codec::Hamming(params) => format!("hamming-{}-{}", params.n(), params.k()),
        }
    }

    /// Returns display name of the codec.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Codec::Uncoded => "Uncoded (Raw)".to_string(),
            Codec::Repetition(code) => format!("Repetition 1/{}", code.n()),
            Codec::Hamming(params) => format!("Hamming ({},{})", params.n(), params.k()),
        }
    }

    /// Returns code rate `k/n`.
    #[must_use]
    pub fn rate(&self) -> CodeRate {
        let (k, n) = match self {
            Codec::Uncoded => (1, 1),
            Codec::Repetition(code) => (1, code.n()),
            Codec::Hamming(params) => (params.k(), params.n()),
        };
        // Parameters are validated at construction, so `0 < k <= n` holds
        let g = gcd(k, n);
        CodeRate { k: k / g, n: n / g }
    }

    /// Returns length `n` of the code blocks produced by the encoder.
    #[must_use]
    pub fn block_len(&self) -> usize {
        match self {
            Codec::Uncoded => 1,
            Codec::Repetition(code) => code.n(),
            Codec::Hamming(params) => params.n(),
        }
    }

    /// Returns descriptor of the codec.
    #[must_use]
    pub fn descriptor(&self) -> CodecDescriptor {
        CodecDescriptor {
            id: self.id(),
            label: self.label(),
            rate: self.rate(),
        }
    }

    /// Returns code bits for given information bits.
    #[must_use]
    pub fn encode(&self, info_bits: &[Bit]) -> Vec<Bit> {
        match self {
            Codec::Uncoded => info_bits.to_vec(),
            Codec::Repetition(code) => code.encode(info_bits),
            Codec::Hamming(params) => params.encode(info_bits),
        }
    }

    /// Returns information bit decisions for given (hard-decision) code bits.
    #[must_use]
    pub fn decode(&self, code_bits: &[Bit]) -> Vec<Bit> {
        match self {
            Codec::Uncoded => code_bits.to_vec(),
            Codec::Repetition(code) => code.decode(code_bits),
            Codec::Hamming(params) => params.decode(code_bits),
        }
    }
}

impl std::fmt::Display for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, rate {}", self.label(), self.rate())
    }
}

/// Returns codec of given kind with given parameters.
///
/// # Parameters
///
/// - `kind`: Code family.
///
/// - `params`: Code parameters. Ignored for [`CodecKind::Uncoded`]; `n` is required for the other
///   kinds, and `k` is used only by [`CodecKind::Hamming`].
///
/// # Errors
///
/// Returns an error if a required parameter is missing or if the parameters do not define a valid
/// code of the given kind.
///
/// # Examples
///
/// ```
/// use fecsim::{build_codec, CodecKind, CodecParams, CodeRate};
///
/// let codec = build_codec(CodecKind::Hamming, CodecParams { n: Some(7), k: None })?;
/// assert_eq!(codec.rate(), CodeRate::new(4, 7)?);
/// assert!(build_codec(CodecKind::Hamming, CodecParams { n: Some(6), k: None }).is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn build_codec(kind: CodecKind, params: CodecParams) -> Result<Codec, Error> {
    match kind {
        CodecKind::Uncoded => Ok(Codec::Uncoded),
        CodecKind::Repetition => Ok(Codec::Repetition(Repetition::new(
            required_n(kind, params)?,
        )?)),
        CodecKind::Hamming => Ok(Codec::Hamming(HammingParams::new(
            required_n(kind, params)?,
            params.k,
        )?)),
    }
}

/// Returns block length from parameters, or an error if it is missing.
fn required_n(kind: CodecKind, params: CodecParams) -> Result<usize, Error> {
    params.n.ok_or_else(|| {
        Error::InvalidCodeParameters(format!("Block length n is required for {kind:?} code"))
    })
}

/// Returns the predefined codecs: uncoded, repetition 1/3 and 1/5, Hamming (7,4) and (15,11).
#[must_use]
pub fn presets() -> Vec<Codec> {
    vec![
        Codec::Uncoded,
        Codec::Repetition(Repetition { n: 3 }),
        Codec::Repetition(Repetition { n: 5 }),
        Codec::Hamming(HammingParams { n: 7, k: 4, m: 3 }),
        Codec::Hamming(HammingParams { n: 15, k: 11, m: 4 }),
    ]
}

/// Returns descriptors of the predefined codecs, in the order of [`presets`].
#[must_use]
pub fn list_codecs() -> Vec<CodecDescriptor> {
    presets().iter().map(Codec::descriptor).collect()
}
