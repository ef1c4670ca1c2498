// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Quantity Value Object
//!
//! Fixed-point resource amounts in the notation the Kubernetes resource
//! model uses: `2`, `500m`, `4Gi`, `1e3`. Values are held with nano
//! precision and rendered back in canonical form, which is also the
//! external schema format (`1.5Gi` renders as `1536Mi`).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

const NANOS_PER_UNIT: i128 = 1_000_000_000;

const BINARY_SUFFIXES: [&str; 7] = ["", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei"];

/// Quantity validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuantityError {
    #[error("Quantity is empty")]
    Empty,

    #[error("Quantity has no numeric part: {0:?}")]
    MissingNumber(String),

    #[error("Unknown quantity suffix {suffix:?} in {input:?}")]
    InvalidSuffix { input: String, suffix: String },

    #[error("Quantity out of range: {0:?}")]
    OutOfRange(String),
}

/// Notation a quantity was written in, kept for canonical rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QuantityFormat {
    /// Powers of 1000 with `n`, `u`, `m`, `k`, `M`, `G`, `T`, `P`, `E`
    #[default]
    DecimalSI,
    /// Powers of 1024 with `Ki`, `Mi`, `Gi`, `Ti`, `Pi`, `Ei`
    BinarySI,
    /// Scientific notation with `e<exp>`
    DecimalExponent,
}

/// Fixed-point resource quantity
///
/// Equality, ordering and hashing consider only the magnitude, so
/// `1Ki` equals `1024`.
///
/// # Examples
///
/// ```rust
/// use servconf::domain::Quantity;
///
/// let ram: Quantity = "1.5Gi".parse().unwrap();
/// assert_eq!(ram.to_string(), "1536Mi");
///
/// let cpu: Quantity = "0.5".parse().unwrap();
/// assert_eq!(cpu.to_string(), "500m");
/// assert_eq!(cpu, "500m".parse::<Quantity>().unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Quantity {
    nanos: i128,
    format: QuantityFormat,
}

impl Quantity {
    /// Whole-number quantity in the given format
    pub fn new(value: i64, format: QuantityFormat) -> Self {
        Self {
            nanos: i128::from(value) * NANOS_PER_UNIT,
            format,
        }
    }

    /// Parse a quantity string
    ///
    /// Grammar: `[+-]? digits [. digits]? suffix`, where suffix is empty,
    /// a decimal SI suffix, a binary SI suffix or `e`/`E` followed by a
    /// signed exponent. Precision finer than `1n` is rounded up.
    pub fn parse(input: &str) -> Result<Self, QuantityError> {
        if input.is_empty() {
            return Err(QuantityError::Empty);
        }

        let (negative, unsigned) = match input.as_bytes()[0] {
            b'-' => (true, &input[1..]),
            b'+' => (false, &input[1..]),
            _ => (false, input),
        };

        let whole_len = count_digits(unsigned);
        let (whole, rest) = unsigned.split_at(whole_len);
        let (fraction, suffix) = match rest.strip_prefix('.') {
            Some(after_dot) => after_dot.split_at(count_digits(after_dot)),
            None => ("", rest),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(QuantityError::MissingNumber(input.to_string()));
        }

        let (format, exp10, pow1024) =
            parse_suffix(suffix).ok_or_else(|| QuantityError::InvalidSuffix {
                input: input.to_string(),
                suffix: suffix.to_string(),
            })?;

        let out_of_range = || QuantityError::OutOfRange(input.to_string());

        // Trailing fractional zeros carry no value
        let fraction = fraction.trim_end_matches('0');
        let digits = format!("{whole}{fraction}");
        let digits = digits.trim_start_matches('0');
        let multiplier: i128 = 1 << (10 * pow1024);

        let fraction_len = i32::try_from(fraction.len()).map_err(|_| out_of_range())?;
        let scale = exp10
            .checked_add(9)
            .and_then(|s| s.checked_sub(fraction_len))
            .ok_or_else(out_of_range)?;

        let nanos = if digits.is_empty() {
            0
        } else if scale >= 0 {
            let mantissa = parse_digits(digits).ok_or_else(out_of_range)?;
            let factor = pow10(scale).ok_or_else(out_of_range)?;
            mantissa
                .checked_mul(multiplier)
                .and_then(|m| m.checked_mul(factor))
                .ok_or_else(out_of_range)?
        } else {
            // Digits past the nano position only decide rounding
            let dropped_len = usize::try_from(scale.unsigned_abs()).map_err(|_| out_of_range())?;
            let (integer, dropped) = digits.split_at(digits.len().saturating_sub(dropped_len));
            let (carry, inexact) =
                scale_fraction(dropped, dropped_len - dropped.len(), multiplier);

            let integer = if integer.is_empty() {
                0
            } else {
                parse_digits(integer).ok_or_else(out_of_range)?
            };
            let truncated = integer
                .checked_mul(multiplier)
                .and_then(|n| n.checked_add(carry))
                .ok_or_else(out_of_range)?;

            // Round toward positive infinity
            if inexact && !negative {
                truncated.checked_add(1).ok_or_else(out_of_range)?
            } else {
                truncated
            }
        };

        Ok(Self {
            nanos: if negative { -nanos } else { nanos },
            format,
        })
    }

    /// Notation this quantity renders in
    pub fn format(&self) -> QuantityFormat {
        self.format
    }

    /// Magnitude in units of 10^-9
    pub fn as_nanos(&self) -> i128 {
        self.nanos
    }

    /// Magnitude in whole units, rounded up
    pub fn value(&self) -> i128 {
        let whole = self.nanos.div_euclid(NANOS_PER_UNIT);
        if self.nanos.rem_euclid(NANOS_PER_UNIT) != 0 {
            whole + 1
        } else {
            whole
        }
    }

    /// Check if the magnitude is zero
    pub fn is_zero(&self) -> bool {
        self.nanos == 0
    }

    /// Canonical string form
    pub fn to_canonical_string(&self) -> String {
        if self.nanos == 0 {
            return "0".to_string();
        }

        // Binary notation only for whole numbers of at least 1Ki
        if self.format == QuantityFormat::BinarySI
            && self.nanos.abs() >= 1024 * NANOS_PER_UNIT
            && self.nanos % NANOS_PER_UNIT == 0
        {
            let mut units = self.nanos / NANOS_PER_UNIT;
            let mut index = 0;
            while index < BINARY_SUFFIXES.len() - 1 && units % 1024 == 0 {
                units /= 1024;
                index += 1;
            }
            return format!("{units}{}", BINARY_SUFFIXES[index]);
        }

        let mut mantissa = self.nanos;
        let mut exponent: i32 = -9;
        while mantissa % 1000 == 0
            && (self.format == QuantityFormat::DecimalExponent || exponent < 18)
        {
            mantissa /= 1000;
            exponent += 3;
        }

        match self.format {
            QuantityFormat::DecimalExponent if exponent == 0 => mantissa.to_string(),
            QuantityFormat::DecimalExponent => format!("{mantissa}e{exponent}"),
            QuantityFormat::DecimalSI | QuantityFormat::BinarySI => {
                format!("{mantissa}{}", decimal_suffix(exponent))
            }
        }
    }

    /// Convert to the Kubernetes API wire type
    pub fn to_k8s(&self) -> k8s_openapi::apimachinery::pkg::api::resource::Quantity {
        k8s_openapi::apimachinery::pkg::api::resource::Quantity(self.to_canonical_string())
    }
}

fn count_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

fn parse_digits(digits: &str) -> Option<i128> {
    digits.parse().ok()
}

/// Multiply the fraction `0.<leading_zeros zeros><digits>` by `multiplier`
///
/// Returns the whole part of the product and whether a fractional part
/// remained.
fn scale_fraction(digits: &str, leading_zeros: usize, multiplier: i128) -> (i128, bool) {
    let mut carry: i128 = 0;
    let mut inexact = false;

    for digit in digits.bytes().rev() {
        let product = i128::from(digit - b'0') * multiplier + carry;
        inexact |= product % 10 != 0;
        carry = product / 10;
    }

    for _ in 0..leading_zeros {
        if carry == 0 {
            break;
        }
        inexact |= carry % 10 != 0;
        carry /= 10;
    }

    (carry, inexact)
}

fn pow10(exp: i32) -> Option<i128> {
    u32::try_from(exp).ok().and_then(|e| 10i128.checked_pow(e))
}

/// Map a suffix to (format, power of ten, power of 1024)
fn parse_suffix(suffix: &str) -> Option<(QuantityFormat, i32, u32)> {
    use QuantityFormat::{BinarySI, DecimalExponent, DecimalSI};

    let parsed = match suffix {
        "" => (DecimalSI, 0, 0),
        "n" => (DecimalSI, -9, 0),
        "u" => (DecimalSI, -6, 0),
        "m" => (DecimalSI, -3, 0),
        "k" => (DecimalSI, 3, 0),
        "M" => (DecimalSI, 6, 0),
        "G" => (DecimalSI, 9, 0),
        "T" => (DecimalSI, 12, 0),
        "P" => (DecimalSI, 15, 0),
        "E" => (DecimalSI, 18, 0),
        "Ki" => (BinarySI, 0, 1),
        "Mi" => (BinarySI, 0, 2),
        "Gi" => (BinarySI, 0, 3),
        "Ti" => (BinarySI, 0, 4),
        "Pi" => (BinarySI, 0, 5),
        "Ei" => (BinarySI, 0, 6),
        _ => {
            let exponent = suffix
                .strip_prefix('e')
                .or_else(|| suffix.strip_prefix('E'))?;
            let starts_ok = exponent
                .bytes()
                .next()
                .is_some_and(|b| b.is_ascii_digit() || b == b'-' || b == b'+');
            if !starts_ok {
                return None;
            }
            (DecimalExponent, exponent.parse().ok()?, 0)
        }
    };

    Some(parsed)
}

fn decimal_suffix(exponent: i32) -> &'static str {
    match exponent {
        -9 => "n",
        -6 => "u",
        -3 => "m",
        3 => "k",
        6 => "M",
        9 => "G",
        12 => "T",
        15 => "P",
        18 => "E",
        _ => "",
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.nanos == other.nanos
    }
}

impl Eq for Quantity {}

impl Hash for Quantity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.nanos.hash(state);
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quantity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.nanos.cmp(&other.nanos)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Quantity {
    type Error = QuantityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Serialize for Quantity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_canonical_string())
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
