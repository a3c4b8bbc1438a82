use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Utc};

use crate::{Decimal, EPOCH_MILLIS, Gene, ParseIdError, Result};

/// A 64-bit gene snowflake ID.
///
/// - 1 bit sign (always zero for generated IDs)
/// - 41 bits timestamp (ms since [`EPOCH`])
/// - 6 bits gene ([`Gene`])
/// - 3 bits datacenter
/// - 3 bits node
/// - 10 bits sequence
///
/// ```text
///  Bit Index:  63     63 62            22 21      16 15            13 12       10 9             0
///              +--------+----------------+----------+----------------+-----------+---------------+
///  Field:      | sign(1)| timestamp (41) | gene (6) | datacenter (3) | node (3)  | sequence (10) |
///              +--------+----------------+----------+----------------+-----------+---------------+
///              |<---------- MSB ------------------- 64 bits ------------------------ LSB ------>|
/// ```
///
/// Accessors are plain bit slices and are defined for every `i64`, including
/// values this crate never produced. The zero value means "unset".
///
/// [`EPOCH`]: crate::EPOCH
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnowflakeId {
    id: i64,
}

impl SnowflakeId {
    /// The unset ID.
    pub const ZERO: Self = Self { id: 0 };

    /// Width of the timestamp field.
    pub const TIMESTAMP_BITS: u32 = 41;
    /// Width of the gene field.
    pub const GENE_BITS: u32 = 6;
    /// Width of the datacenter field.
    pub const DATACENTER_BITS: u32 = 3;
    /// Width of the node field.
    pub const NODE_BITS: u32 = 3;
    /// Width of the sequence field.
    pub const SEQUENCE_BITS: u32 = 10;

    /// Bitmask for the 41-bit timestamp field. Occupies bits 22 through 62.
    pub const TIMESTAMP_MASK: i64 = (1 << Self::TIMESTAMP_BITS) - 1;
    /// Bitmask for the 6-bit gene field. Occupies bits 16 through 21.
    pub const GENE_MASK: i64 = (1 << Self::GENE_BITS) - 1;
    /// Bitmask for the 3-bit datacenter field. Occupies bits 13 through 15.
    pub const DATACENTER_MASK: i64 = (1 << Self::DATACENTER_BITS) - 1;
    /// Bitmask for the 3-bit node field. Occupies bits 10 through 12.
    pub const NODE_MASK: i64 = (1 << Self::NODE_BITS) - 1;
    /// Bitmask for the 10-bit sequence field. Occupies bits 0 through 9.
    pub const SEQUENCE_MASK: i64 = (1 << Self::SEQUENCE_BITS) - 1;

    pub const SEQUENCE_SHIFT: u32 = 0;
    pub const NODE_SHIFT: u32 = Self::SEQUENCE_SHIFT + Self::SEQUENCE_BITS;
    pub const DATACENTER_SHIFT: u32 = Self::NODE_SHIFT + Self::NODE_BITS;
    pub const GENE_SHIFT: u32 = Self::DATACENTER_SHIFT + Self::DATACENTER_BITS;
    pub const TIMESTAMP_SHIFT: u32 = Self::GENE_SHIFT + Self::GENE_BITS;

    /// Packs the given fields, truncating each to its width.
    pub const fn from_parts(
        timestamp: i64,
        gene: Gene,
        datacenter: i64,
        node: i64,
        sequence: i64,
    ) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let gene = (gene.to_raw() & Self::GENE_MASK) << Self::GENE_SHIFT;
        let datacenter = (datacenter & Self::DATACENTER_MASK) << Self::DATACENTER_SHIFT;
        let node = (node & Self::NODE_MASK) << Self::NODE_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | gene | datacenter | node | sequence,
        }
    }

    /// Packs the given fields, asserting in debug builds that none overflows.
    pub fn from_components(
        timestamp: i64,
        gene: Gene,
        datacenter: i64,
        node: i64,
        sequence: i64,
    ) -> Self {
        debug_assert!(
            (0..=Self::TIMESTAMP_MASK).contains(&timestamp),
            "timestamp overflow"
        );
        debug_assert!(gene.is_valid(), "gene overflow");
        debug_assert!(
            (0..=Self::DATACENTER_MASK).contains(&datacenter),
            "datacenter overflow"
        );
        debug_assert!((0..=Self::NODE_MASK).contains(&node), "node overflow");
        debug_assert!(
            (0..=Self::SEQUENCE_MASK).contains(&sequence),
            "sequence overflow"
        );
        Self::from_parts(timestamp, gene, datacenter, node, sequence)
    }

    /// Wraps a raw value without validation.
    pub const fn from_raw(raw: i64) -> Self {
        Self { id: raw }
    }

    /// Returns the raw integer.
    pub const fn to_raw(&self) -> i64 {
        self.id
    }

    /// Alias of [`Self::to_raw`].
    pub const fn to_i64(&self) -> i64 {
        self.id
    }

    /// Milliseconds since [`EPOCH`](crate::EPOCH).
    pub const fn timestamp(&self) -> i64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Milliseconds since the Unix epoch.
    pub const fn unix_millis(&self) -> i64 {
        self.timestamp() + EPOCH_MILLIS
    }

    /// The creation instant embedded in the ID.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.unix_millis()).unwrap_or_default()
    }

    pub const fn gene(&self) -> Gene {
        Gene::from_raw((self.id >> Self::GENE_SHIFT) & Self::GENE_MASK)
    }

    pub const fn datacenter(&self) -> i64 {
        (self.id >> Self::DATACENTER_SHIFT) & Self::DATACENTER_MASK
    }

    pub const fn node(&self) -> i64 {
        (self.id >> Self::NODE_SHIFT) & Self::NODE_MASK
    }

    pub const fn sequence(&self) -> i64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    /// Returns `true` for the unset value.
    pub const fn is_zero(&self) -> bool {
        self.id == 0
    }

    /// Parses a strict base-10 `i64`. An optional leading `+` or `-` is
    /// accepted; whitespace is not.
    ///
    /// # Errors
    ///
    /// Returns [`ParseIdError`] on empty or malformed input.
    pub fn parse(s: &str) -> Result<Self, ParseIdError> {
        if s.is_empty() {
            return Err(ParseIdError::Empty);
        }
        s.parse::<i64>()
            .map(Self::from_raw)
            .map_err(|source| ParseIdError::InvalidDecimal {
                input: s.to_owned(),
                source,
            })
    }

    pub(crate) fn decimal(&self) -> Decimal {
        Decimal::new(self.id)
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeId")
            .field("id", &self.id)
            .field("timestamp", &self.timestamp())
            .field("gene", &self.gene())
            .field("datacenter", &self.datacenter())
            .field("node", &self.node())
            .field("sequence", &self.sequence())
            .finish()
    }
}

impl FromStr for SnowflakeId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<i64> for SnowflakeId {
    fn from(raw: i64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<SnowflakeId> for i64 {
    fn from(id: SnowflakeId) -> Self {
        id.to_raw()
    }
}

/// Parses a decimal ID, panicking on malformed input.
///
/// # Panics
///
/// Panics if `s` is not a valid base-10 `i64`.
pub fn must_parse_id(s: &str) -> SnowflakeId {
    match SnowflakeId::parse(s) {
        Ok(id) => id,
        Err(e) => panic!("{e}"),
    }
}

/// Parses a decimal ID.
///
/// # Errors
///
/// Returns [`Error::Parse`](crate::Error::Parse) on empty or malformed input.
pub fn parse_id(s: &str) -> Result<SnowflakeId> {
    Ok(SnowflakeId::parse(s)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_shifts() {
        assert_eq!(SnowflakeId::NODE_SHIFT, 10);
        assert_eq!(SnowflakeId::DATACENTER_SHIFT, 13);
        assert_eq!(SnowflakeId::GENE_SHIFT, 16);
        assert_eq!(SnowflakeId::TIMESTAMP_SHIFT, 22);
        assert_eq!(
            SnowflakeId::TIMESTAMP_SHIFT + SnowflakeId::TIMESTAMP_BITS,
            63,
            "sign bit must stay clear"
        );
    }

    #[test]
    fn fields_round_trip() {
        let timestamps = [0, 1, 1_234_567, SnowflakeId::TIMESTAMP_MASK];
        let genes = [0, 1, 15, 16, 42, 63];
        let coords = [0, 3, 7];
        let sequences = [0, 1, 512, 1023];

        for &ts in &timestamps {
            for &g in &genes {
                for &dc in &coords {
                    for &n in &coords {
                        for &seq in &sequences {
                            let id =
                                SnowflakeId::from_components(ts, Gene::from_raw(g), dc, n, seq);
                            assert_eq!(id.timestamp(), ts);
                            assert_eq!(id.gene().to_raw(), g);
                            assert_eq!(id.datacenter(), dc);
                            assert_eq!(id.node(), n);
                            assert_eq!(id.sequence(), seq);
                            assert!(id.to_raw() >= 0);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn max_fields_fill_63_bits() {
        let id = SnowflakeId::from_components(
            SnowflakeId::TIMESTAMP_MASK,
            Gene::from_raw(63),
            7,
            7,
            1023,
        );
        assert_eq!(id.to_raw(), i64::MAX);
    }

    #[test]
    fn accessors_are_total_over_foreign_values() {
        let id = SnowflakeId::from_raw(-1);
        assert_eq!(id.timestamp(), SnowflakeId::TIMESTAMP_MASK);
        assert_eq!(id.gene().to_raw(), 63);
        assert_eq!(id.datacenter(), 7);
        assert_eq!(id.node(), 7);
        assert_eq!(id.sequence(), 1023);

        let id = SnowflakeId::from_raw(i64::MIN);
        assert_eq!(id.timestamp(), 0);
        assert_eq!(id.sequence(), 0);
    }

    #[test]
    fn zero_is_unset() {
        assert!(SnowflakeId::ZERO.is_zero());
        assert!(SnowflakeId::default().is_zero());
        assert!(!SnowflakeId::from_raw(1).is_zero());
    }

    #[test]
    fn unix_millis_adds_epoch() {
        let id = SnowflakeId::from_components(1000, Gene::DEFAULT, 0, 0, 0);
        assert_eq!(id.unix_millis(), EPOCH_MILLIS + 1000);
        assert_eq!(id.datetime().timestamp_millis(), EPOCH_MILLIS + 1000);
    }

    #[test]
    fn string_round_trip() {
        let id = SnowflakeId::from_raw(1234567890);
        assert_eq!(id.to_string(), "1234567890");
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert_eq!(parse_id("+42").unwrap(), SnowflakeId::from_raw(42));
        assert_eq!(parse_id("-42").unwrap(), SnowflakeId::from_raw(-42));
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert_eq!(SnowflakeId::parse(""), Err(ParseIdError::Empty));
        for bad in [" 1", "1 ", "12a", "0x10", "9223372036854775808", "--1", "+"] {
            assert!(
                matches!(
                    parse_id(bad),
                    Err(crate::Error::Parse(ParseIdError::InvalidDecimal { .. }))
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    #[should_panic(expected = "empty snowflake id")]
    fn must_parse_panics() {
        must_parse_id("");
    }

    #[test]
    #[should_panic(expected = "sequence overflow")]
    fn sequence_overflow_panics() {
        SnowflakeId::from_components(0, Gene::DEFAULT, 0, 0, 1024);
    }

    #[test]
    #[should_panic(expected = "node overflow")]
    fn node_overflow_panics() {
        SnowflakeId::from_components(0, Gene::DEFAULT, 0, 8, 0);
    }
}
