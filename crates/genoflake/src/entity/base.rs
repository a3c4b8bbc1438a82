use chrono::{DateTime, Utc};

use crate::{Gene, SnowflakeId};

/// Records that derive their gene from their own data, typically by hashing
/// a parent ID with [`hash_id`](crate::hash_id).
pub trait GeneProvider {
    fn gene(&self) -> Gene;
}

/// The primary key and audit columns every persisted record carries.
pub trait EntityBase {
    fn id(&self) -> SnowflakeId;
    fn set_id(&mut self, id: SnowflakeId);
    fn set_created_at(&mut self, at: DateTime<Utc>);
    fn set_updated_at(&mut self, at: DateTime<Utc>);
}

/// A persisted record, as seen by the insert and update hooks.
///
/// ```
/// use genoflake::{BaseEntity, Entity, Gene, GeneProvider, SnowflakeId, hash_id};
///
/// struct Order {
///     base: BaseEntity,
///     user_id: SnowflakeId,
/// }
///
/// impl GeneProvider for Order {
///     fn gene(&self) -> Gene {
///         hash_id(self.user_id)
///     }
/// }
///
/// impl Entity for Order {
///     type Base = BaseEntity;
///
///     fn base(&self) -> &BaseEntity {
///         &self.base
///     }
///
///     fn base_mut(&mut self) -> &mut BaseEntity {
///         &mut self.base
///     }
///
///     fn gene_provider(&self) -> Option<&dyn GeneProvider> {
///         Some(self)
///     }
/// }
/// ```
pub trait Entity {
    type Base: EntityBase;

    fn base(&self) -> &Self::Base;
    fn base_mut(&mut self) -> &mut Self::Base;

    /// The record's gene capability, if it has one. Records without one are
    /// stamped with [`Gene::DEFAULT`].
    fn gene_provider(&self) -> Option<&dyn GeneProvider> {
        None
    }
}

/// Primary key plus creation and update timestamps.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BaseEntity {
    pub id: SnowflakeId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// [`BaseEntity`] with a nullable deletion marker.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SoftDeleteEntity {
    pub id: SnowflakeId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl SoftDeleteEntity {
    /// Marks the record deleted as of now.
    pub fn soft_delete(&mut self) {
        self.deleted_at = Some(Utc::now());
    }

    pub fn restore(&mut self) {
        self.deleted_at = None;
    }

    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

macro_rules! impl_entity_base {
    ($($ty:ty),*) => {
        $(
            impl EntityBase for $ty {
                fn id(&self) -> SnowflakeId {
                    self.id
                }

                fn set_id(&mut self, id: SnowflakeId) {
                    self.id = id;
                }

                fn set_created_at(&mut self, at: DateTime<Utc>) {
                    self.created_at = at;
                }

                fn set_updated_at(&mut self, at: DateTime<Utc>) {
                    self.updated_at = at;
                }
            }

            impl Entity for $ty {
                type Base = Self;

                fn base(&self) -> &Self {
                    self
                }

                fn base_mut(&mut self) -> &mut Self {
                    self
                }
            }
        )*
    };
}

impl_entity_base!(BaseEntity, SoftDeleteEntity);
