use chrono::Utc;

use crate::{Entity, EntityBase, Gene, GeneProvider, Node, Result, SnowflakeId, TimeSource, default_node};

/// Insert hook backed by the [`default_node`].
///
/// A zero ID is replaced by a fresh one carrying the record's gene; a set ID
/// is kept. Both audit timestamps are set to now.
///
/// # Errors
///
/// Fails, leaving the record unchanged, if bootstrap failed, the provided
/// gene is outside `0..=63`, or generation fails. The caller must abort the
/// insert.
pub fn on_before_create<E>(record: &mut E) -> Result<()>
where
    E: Entity + ?Sized,
{
    stamp_create(record, |gene| default_node()?.generate(gene))
}

/// [`on_before_create`] against an explicit node.
///
/// # Errors
///
/// See [`on_before_create`].
pub fn on_before_create_with<T, E>(node: &Node<T>, record: &mut E) -> Result<()>
where
    T: TimeSource,
    E: Entity + ?Sized,
{
    stamp_create(record, |gene| node.generate(gene))
}

/// Update hook: refreshes the update timestamp only.
pub fn on_before_update<E>(record: &mut E)
where
    E: Entity + ?Sized,
{
    record.base_mut().set_updated_at(Utc::now());
}

fn stamp_create<E, F>(record: &mut E, generate: F) -> Result<()>
where
    E: Entity + ?Sized,
    F: FnOnce(Gene) -> Result<SnowflakeId>,
{
    if record.base().id().is_zero() {
        let gene = record
            .gene_provider()
            .map_or(Gene::DEFAULT, GeneProvider::gene);
        let id = generate(gene)?;
        record.base_mut().set_id(id);
    }

    let now = Utc::now();
    let base = record.base_mut();
    base.set_created_at(now);
    base.set_updated_at(now);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BaseEntity, ClockPolicy, Error, SoftDeleteEntity};
    use core::sync::atomic::{AtomicI64, Ordering};

    struct ManualTime(AtomicI64);

    impl TimeSource for ManualTime {
        fn current_millis(&self) -> i64 {
            self.0.load(Ordering::Relaxed)
        }
    }

    struct Order {
        base: BaseEntity,
        gene: Gene,
    }

    impl GeneProvider for Order {
        fn gene(&self) -> Gene {
            self.gene
        }
    }

    impl Entity for Order {
        type Base = BaseEntity;

        fn base(&self) -> &BaseEntity {
            &self.base
        }

        fn base_mut(&mut self) -> &mut BaseEntity {
            &mut self.base
        }

        fn gene_provider(&self) -> Option<&dyn GeneProvider> {
            Some(self)
        }
    }

    fn order(gene: Gene) -> Order {
        Order {
            base: BaseEntity::default(),
            gene,
        }
    }

    #[test]
    fn stamps_zero_id_with_provided_gene() {
        let node = Node::new(1, 2).unwrap();
        let mut record = order(Gene::ORDER);

        on_before_create_with(&node, &mut record).unwrap();

        let id = record.base.id;
        assert!(!id.is_zero());
        assert_eq!(id.gene(), Gene::from_raw(16));
        assert_eq!((id.datacenter(), id.node()), (1, 2));
        let now = Utc::now();
        assert!((now - record.base.created_at).num_seconds().abs() < 1);
        assert_eq!(record.base.created_at, record.base.updated_at);
    }

    #[test]
    fn keeps_existing_id() {
        let node = Node::new(0, 0).unwrap();
        let preset = SnowflakeId::from_raw(4242);
        let mut record = order(Gene::ORDER);
        record.base.id = preset;

        on_before_create_with(&node, &mut record).unwrap();

        assert_eq!(record.base.id, preset);
        assert!((Utc::now() - record.base.updated_at).num_seconds().abs() < 1);
    }

    #[test]
    fn records_without_provider_get_default_gene() {
        let node = Node::new(0, 3).unwrap();
        let mut record = SoftDeleteEntity::default();

        on_before_create_with(&node, &mut record).unwrap();

        assert_eq!(record.id.gene(), Gene::DEFAULT);
        assert_eq!(record.id.node(), 3);
        assert!(!record.is_deleted());
    }

    #[test]
    fn invalid_gene_aborts_without_changes() {
        let node = Node::new(0, 0).unwrap();
        let mut record = order(Gene::from_raw(64));

        assert_eq!(
            on_before_create_with(&node, &mut record),
            Err(Error::InvalidGene { gene: 64 })
        );
        assert!(record.base.id.is_zero());
        assert_eq!(record.base, BaseEntity::default());
    }

    #[test]
    fn clock_before_epoch_aborts_without_changes() {
        let clock = ManualTime(AtomicI64::new(-1));
        let node = Node::with_clock(0, 0, &clock).unwrap();
        let mut record = order(Gene::ORDER);

        assert_eq!(
            on_before_create_with(&node, &mut record),
            Err(Error::ClockBeforeEpoch { now_ms: -1 })
        );
        assert_eq!(record.base, BaseEntity::default());
    }

    #[test]
    fn rejected_clock_regression_aborts_without_changes() {
        let clock = ManualTime(AtomicI64::new(100));
        let node = Node::with_clock(4, 4, &clock)
            .unwrap()
            .with_policy(ClockPolicy::Reject);

        let mut first = order(Gene::PAYMENT);
        on_before_create_with(&node, &mut first).unwrap();
        assert_eq!(first.base.id.timestamp(), 100);

        clock.0.store(50, Ordering::Relaxed);
        let mut second = order(Gene::PAYMENT);
        assert_eq!(
            on_before_create_with(&node, &mut second),
            Err(Error::ClockBackward {
                last_ms: 100,
                now_ms: 50
            })
        );
        assert_eq!(second.base, BaseEntity::default());
    }

    #[test]
    fn update_only_touches_updated_at() {
        let mut record = BaseEntity {
            id: SnowflakeId::from_raw(5),
            ..BaseEntity::default()
        };
        on_before_update(&mut record);

        assert_eq!(record.id, SnowflakeId::from_raw(5));
        assert_eq!(record.created_at, BaseEntity::default().created_at);
        assert!((Utc::now() - record.updated_at).num_seconds().abs() < 1);
    }
}
