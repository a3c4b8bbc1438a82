use core::fmt;
use core::str::FromStr;

use crate::{Error, Result};

/// A 6-bit business-type tag embedded in every [`SnowflakeId`].
///
/// - `0..=15` are reserved for framework-level tags.
/// - `16..=63` are available to applications.
///
/// A `Gene` may hold any `i64` so that out-of-range input can be checked with
/// [`Gene::is_valid`]; generation rejects invalid genes. Applications extend
/// the catalogue by declaring their own constants:
///
/// ```
/// use genoflake::Gene;
///
/// const WAREHOUSE: Gene = Gene::from_raw(40);
/// assert!(WAREHOUSE.is_business());
/// assert_eq!(WAREHOUSE.name(), "Custom(40)");
/// ```
///
/// [`SnowflakeId`]: crate::SnowflakeId
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "i64", into = "i64")
)]
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Gene(i64);

impl Gene {
    pub const MIN: i64 = 0;
    pub const MAX: i64 = 63;
    /// Last value of the framework-reserved range.
    pub const SYSTEM_MAX: i64 = 15;

    pub const DEFAULT: Self = Self(0);
    pub const SYSTEM: Self = Self(1);
    pub const USER: Self = Self(2);
    pub const ROLE: Self = Self(3);
    pub const LOG: Self = Self(4);
    pub const CONFIG: Self = Self(5);
    pub const FILE: Self = Self(6);
    pub const SESSION: Self = Self(7);
    pub const TOKEN: Self = Self(8);
    pub const CACHE: Self = Self(9);

    pub const ORDER: Self = Self(16);
    pub const PRODUCT: Self = Self(17);
    pub const PAYMENT: Self = Self(18);
    pub const INVENTORY: Self = Self(19);
    pub const CUSTOMER: Self = Self(20);
    pub const VENDOR: Self = Self(21);
    pub const CONTRACT: Self = Self(22);
    pub const INVOICE: Self = Self(23);
    pub const SHIPMENT: Self = Self(24);
    pub const REFUND: Self = Self(25);
    pub const COUPON: Self = Self(26);
    pub const PROMOTION: Self = Self(27);
    pub const REVIEW: Self = Self(28);
    pub const MESSAGE: Self = Self(29);
    pub const NOTIFY: Self = Self(30);
    pub const TASK: Self = Self(31);

    const REGISTERED: [(Self, &'static str); 26] = [
        (Self::DEFAULT, "Default"),
        (Self::SYSTEM, "System"),
        (Self::USER, "User"),
        (Self::ROLE, "Role"),
        (Self::LOG, "Log"),
        (Self::CONFIG, "Config"),
        (Self::FILE, "File"),
        (Self::SESSION, "Session"),
        (Self::TOKEN, "Token"),
        (Self::CACHE, "Cache"),
        (Self::ORDER, "Order"),
        (Self::PRODUCT, "Product"),
        (Self::PAYMENT, "Payment"),
        (Self::INVENTORY, "Inventory"),
        (Self::CUSTOMER, "Customer"),
        (Self::VENDOR, "Vendor"),
        (Self::CONTRACT, "Contract"),
        (Self::INVOICE, "Invoice"),
        (Self::SHIPMENT, "Shipment"),
        (Self::REFUND, "Refund"),
        (Self::COUPON, "Coupon"),
        (Self::PROMOTION, "Promotion"),
        (Self::REVIEW, "Review"),
        (Self::MESSAGE, "Message"),
        (Self::NOTIFY, "Notify"),
        (Self::TASK, "Task"),
    ];

    /// Wraps a raw value without validation.
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Wraps a raw value, rejecting anything outside `0..=63`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGene`] for out-of-range values.
    pub fn new(raw: i64) -> Result<Self> {
        let gene = Self(raw);
        if gene.is_valid() {
            Ok(gene)
        } else {
            Err(Error::InvalidGene { gene: raw })
        }
    }

    pub const fn to_raw(&self) -> i64 {
        self.0
    }

    /// `0..=15`
    pub const fn is_system(&self) -> bool {
        self.0 >= Self::MIN && self.0 <= Self::SYSTEM_MAX
    }

    /// `16..=63`
    pub const fn is_business(&self) -> bool {
        self.0 > Self::SYSTEM_MAX && self.0 <= Self::MAX
    }

    /// `0..=63`
    pub const fn is_valid(&self) -> bool {
        self.0 >= Self::MIN && self.0 <= Self::MAX
    }

    /// The registered label, if any.
    pub fn label(&self) -> Option<&'static str> {
        Self::REGISTERED
            .iter()
            .find(|(gene, _)| gene == self)
            .map(|&(_, label)| label)
    }

    /// The registered label, `Custom(n)` for unnamed valid genes, or
    /// `Invalid(n)` for out-of-range values.
    pub fn name(&self) -> GeneName {
        match self.label() {
            Some(label) => GeneName::Registered(label),
            None if self.is_valid() => GeneName::Custom(self.0),
            None => GeneName::Invalid(self.0),
        }
    }
}

/// Printable name of a [`Gene`], see [`Gene::name`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GeneName {
    Registered(&'static str),
    Custom(i64),
    Invalid(i64),
}

impl fmt::Display for GeneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registered(label) => f.write_str(label),
            Self::Custom(n) => write!(f, "Custom({n})"),
            Self::Invalid(n) => write!(f, "Invalid({n})"),
        }
    }
}

impl PartialEq<&str> for GeneName {
    fn eq(&self, other: &&str) -> bool {
        match self {
            Self::Registered(label) => label == other,
            _ => self.to_string() == *other,
        }
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.name(), f)
    }
}

impl fmt::Debug for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gene({}: {})", self.0, self.name())
    }
}

impl FromStr for Gene {
    type Err = Error;

    /// Accepts a registered name (case-insensitive) or a decimal value.
    fn from_str(s: &str) -> Result<Self> {
        if let Some(&(gene, _)) = Self::REGISTERED
            .iter()
            .find(|(_, label)| label.eq_ignore_ascii_case(s))
        {
            return Ok(gene);
        }
        let raw = s.parse::<i64>().map_err(|source| crate::ParseIdError::InvalidDecimal {
            input: s.to_owned(),
            source,
        })?;
        Self::new(raw)
    }
}

impl TryFrom<i64> for Gene {
    type Error = Error;

    fn try_from(raw: i64) -> Result<Self> {
        Self::new(raw)
    }
}

impl From<Gene> for i64 {
    fn from(gene: Gene) -> Self {
        gene.0
    }
}
