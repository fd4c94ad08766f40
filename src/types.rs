//! Chain-native scalar types referenced by contract parameter schemas.
//!
//! These are the fixed-width building blocks the value encoder delegates to:
//! account addresses (32 bytes), CCD amounts (8 bytes), contract addresses
//! (16 bytes), millisecond timestamps, and human-readable durations.

use crate::error::{Result, SerializationError};

/// An address of an account. 32 bytes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountAddress([u8; 32]);

impl AccountAddress {
    /// Number of bytes in the wire representation.
    pub const BYTES: usize = 32;

    /// Construct an address from its raw 32 bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The raw address bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Append the fixed-width wire representation to `out`.
    pub fn serial(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.0);
    }
}

impl From<[u8; 32]> for AccountAddress {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// An amount of CCD, stored in micro-CCD. 8 bytes little-endian on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    micro_ccd: u64,
}

impl Amount {
    /// Micro-CCD per CCD.
    pub const MICRO_CCD_PER_CCD: u64 = 1_000_000;

    /// Construct an amount from micro-CCD.
    pub const fn from_micro_ccd(micro_ccd: u64) -> Self {
        Self { micro_ccd }
    }

    /// Construct an amount from whole CCD. Returns `None` on overflow.
    pub const fn from_ccd(ccd: u64) -> Option<Self> {
        match ccd.checked_mul(Self::MICRO_CCD_PER_CCD) {
            Some(micro_ccd) => Some(Self { micro_ccd }),
            None => None,
        }
    }

    /// The amount in micro-CCD.
    pub const fn micro_ccd(&self) -> u64 {
        self.micro_ccd
    }

    /// Append the fixed-width wire representation to `out`.
    pub fn serial(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.micro_ccd.to_le_bytes());
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{:06} CCD",
            self.micro_ccd / Self::MICRO_CCD_PER_CCD,
            self.micro_ccd % Self::MICRO_CCD_PER_CCD
        )
    }
}

/// An address of a contract instance: an index and a subindex.
/// 16 bytes on the wire, both halves little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContractAddress {
    pub index: u64,
    pub subindex: u64,
}

impl ContractAddress {
    /// Construct a contract address from its index and subindex.
    pub const fn new(index: u64, subindex: u64) -> Self {
        Self { index, subindex }
    }

    /// Append the fixed-width wire representation to `out`.
    pub fn serial(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.index.to_le_bytes());
        out.extend_from_slice(&self.subindex.to_le_bytes());
    }
}

impl std::fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{},{}>", self.index, self.subindex)
    }
}

/// A point in time, in milliseconds since the Unix epoch.
/// Encoded as a signed 64-bit little-endian tick count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    millis: i64,
}

impl Timestamp {
    /// Construct a timestamp from milliseconds since the Unix epoch.
    pub const fn from_timestamp_millis(millis: i64) -> Self {
        Self { millis }
    }

    /// Milliseconds since the Unix epoch.
    pub const fn timestamp_millis(&self) -> i64 {
        self.millis
    }

    /// Append the fixed-width wire representation to `out`.
    pub fn serial(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.millis.to_le_bytes());
    }
}

/// A span of time, in milliseconds. Encoded as an unsigned 64-bit
/// little-endian count.
///
/// Parsed from a composite string of `<number><unit>` terms where the unit
/// is one of `d`, `h`, `m`, `s`, `ms`. Terms may appear in any order and
/// repeat; repeated terms are summed.
///
/// ```
/// use ccd_params::Duration;
///
/// let d: Duration = "1d 2h 3m 4s 5ms".parse()?;
/// assert_eq!(d.millis(), 93_784_005);
/// # Ok::<(), ccd_params::SerializationError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration {
    millis: u64,
}

impl Duration {
    const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1000;
    const MILLIS_PER_HOUR: u64 = 60 * 60 * 1000;
    const MILLIS_PER_MINUTE: u64 = 60 * 1000;
    const MILLIS_PER_SECOND: u64 = 1000;

    /// Construct a duration from a total millisecond count.
    pub const fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// Total milliseconds.
    pub const fn millis(&self) -> u64 {
        self.millis
    }

    /// Append the fixed-width wire representation to `out`.
    pub fn serial(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.millis.to_le_bytes());
    }

    fn unit_millis(unit: &str) -> Option<u64> {
        match unit {
            "d" => Some(Self::MILLIS_PER_DAY),
            "h" => Some(Self::MILLIS_PER_HOUR),
            "m" => Some(Self::MILLIS_PER_MINUTE),
            "s" => Some(Self::MILLIS_PER_SECOND),
            "ms" => Some(1),
            _ => None,
        }
    }
}

impl std::str::FromStr for Duration {
    type Err = SerializationError;

    fn from_str(s: &str) -> Result<Self> {
        let mut millis: u64 = 0;
        let mut rest = s.trim_start();
        while !rest.is_empty() {
            let digits_end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            let (digits, after_digits) = rest.split_at(digits_end);
            let count: u64 = digits
                .parse()
                .map_err(|_| SerializationError::mismatch("duration term like '10d' or '250ms'", s))?;
            // whitespace may separate a number from its unit
            let after_digits = after_digits.trim_start();
            let unit_end = after_digits
                .find(|c: char| !c.is_ascii_alphabetic())
                .unwrap_or(after_digits.len());
            let (unit, after_unit) = after_digits.split_at(unit_end);
            let scale = Duration::unit_millis(unit).ok_or_else(|| {
                SerializationError::mismatch("duration unit 'd', 'h', 'm', 's' or 'ms'", unit)
            })?;
            let term = count
                .checked_mul(scale)
                .and_then(|t| millis.checked_add(t))
                .ok_or_else(|| SerializationError::out_of_range("duration in u64 milliseconds", s))?;
            millis = term;
            rest = after_unit.trim_start();
        }
        Ok(Self { millis })
    }
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.millis)
    }
}
