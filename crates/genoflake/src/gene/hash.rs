use core::hash::Hasher;

use crate::{Gene, SnowflakeId};

/// 64-bit FNV-1a.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a(u64);

impl Fnv1a {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    pub(crate) const fn new() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    /// Hashes `bytes` in one shot.
    pub(crate) fn digest(bytes: &[u8]) -> u64 {
        let mut hasher = Self::new();
        hasher.write(bytes);
        hasher.finish()
    }

    fn gene(&self) -> Gene {
        Gene::from_raw((self.0 & SnowflakeId::GENE_MASK as u64) as i64)
    }
}

impl Default for Fnv1a {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Fnv1a {
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.0 ^= u64::from(byte);
            self.0 = self.0.wrapping_mul(Self::PRIME);
        }
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// Derives a gene from the decimal form of `id`.
///
/// Rows keyed by the same parent ID land on the same gene, which lets a
/// child entity share its parent's shard:
///
/// ```
/// use genoflake::{SnowflakeId, hash_id};
///
/// let user = SnowflakeId::from_raw(1234567890);
/// assert_eq!(hash_id(user), hash_id(user));
/// assert!(hash_id(user).is_valid());
/// ```
///
/// The zero ID maps to [`Gene::DEFAULT`].
pub fn hash_id(id: SnowflakeId) -> Gene {
    if id.is_zero() {
        return Gene::DEFAULT;
    }
    let mut hasher = Fnv1a::new();
    hasher.write(id.decimal().as_bytes());
    hasher.gene()
}

/// Derives a gene from several IDs.
///
/// The decimal forms are fed, in order, into one running hash, so the result
/// depends on ordering. An empty slice maps to [`Gene::DEFAULT`].
pub fn hash_ids(ids: &[SnowflakeId]) -> Gene {
    if ids.is_empty() {
        return Gene::DEFAULT;
    }
    let mut hasher = Fnv1a::new();
    for id in ids {
        hasher.write(id.decimal().as_bytes());
    }
    hasher.gene()
}

/// Derives a gene from the UTF-8 bytes of `key`. The empty string maps to
/// [`Gene::DEFAULT`].
pub fn hash_string(key: &str) -> Gene {
    if key.is_empty() {
        return Gene::DEFAULT;
    }
    let mut hasher = Fnv1a::new();
    hasher.write(key.as_bytes());
    hasher.gene()
}
