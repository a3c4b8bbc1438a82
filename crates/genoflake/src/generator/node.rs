use core::cmp::Ordering;
use core::fmt;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    ClockPolicy, Coordinate, Error, Gene, IdGenStatus, Result, SnowflakeId, TimeSource, WallClock,
    generator::{Mutex, MutexGuard},
};

/// Mutable part of a [`Node`], only touched under its lock.
#[derive(Clone, Copy, Debug, Default)]
struct State {
    last_ms: i64,
    sequence: i64,
}

/// What the node would do with a given clock reading.
enum Step {
    Issue { timestamp: i64, sequence: i64 },
    Exhausted,
    Behind { last_ms: i64 },
}

/// A thread-safe ID generator bound to one `(datacenter, node)` coordinate.
///
/// Each call takes the state lock, reads the clock, and either advances the
/// sequence within the current millisecond or starts a new millisecond at
/// sequence zero. Within one node, successful calls with the same gene return
/// strictly increasing IDs as long as the clock does not move backward (see
/// [`ClockPolicy`]). The gene bits sit above the sequence, so IDs with
/// different genes issued in the same millisecond only order by gene; across
/// milliseconds the timestamp dominates.
///
/// Up to 1024 IDs are issued per millisecond. Once the sequence is exhausted,
/// [`Node::generate`] spins until the next millisecond and
/// [`Node::try_generate`] returns [`IdGenStatus::Pending`].
///
/// # Example
///
/// ```
/// use genoflake::{Gene, Node};
///
/// let node = Node::new(3, 5).unwrap();
/// let a = node.generate(Gene::PAYMENT).unwrap();
/// let b = node.generate(Gene::PAYMENT).unwrap();
/// assert!(a < b);
/// assert_eq!(b.gene(), Gene::PAYMENT);
/// assert_eq!((b.datacenter(), b.node()), (3, 5));
///
/// let c = node.next_id().unwrap();
/// assert_eq!(c.gene(), Gene::DEFAULT);
/// ```
pub struct Node<T = WallClock>
where
    T: TimeSource,
{
    datacenter: i64,
    node: i64,
    policy: ClockPolicy,
    state: Mutex<State>,
    time: T,
}

impl Node<WallClock> {
    /// Creates a node on the system wall clock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoordinate`] if either coordinate is outside
    /// `0..=7`.
    pub fn new(datacenter: i64, node: i64) -> Result<Self> {
        Self::with_clock(datacenter, node, WallClock)
    }
}

impl<T> Node<T>
where
    T: TimeSource,
{
    /// Creates a node reading time from `time`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoordinate`] if either coordinate is outside
    /// `0..=7`.
    pub fn with_clock(datacenter: i64, node: i64, time: T) -> Result<Self> {
        check_coordinate(Coordinate::Datacenter, datacenter, SnowflakeId::DATACENTER_MASK)?;
        check_coordinate(Coordinate::Node, node, SnowflakeId::NODE_MASK)?;
        Ok(Self {
            datacenter,
            node,
            policy: ClockPolicy::default(),
            state: Mutex::new(State::default()),
            time,
        })
    }

    /// Replaces the clock-backward policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ClockPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub const fn datacenter(&self) -> i64 {
        self.datacenter
    }

    pub const fn node(&self) -> i64 {
        self.node
    }

    pub const fn policy(&self) -> ClockPolicy {
        self.policy
    }

    /// Generates an ID carrying `gene`, spinning through sequence exhaustion
    /// and, under [`ClockPolicy::Wait`], through clock regressions.
    ///
    /// A failed call leaves the node state unchanged.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidGene`] if `gene` is outside `0..=63`
    /// - [`Error::ClockBackward`] under [`ClockPolicy::Reject`]
    /// - [`Error::ClockBeforeEpoch`] / [`Error::TimestampOverflow`] if the
    ///   clock is outside the 41-bit window
    /// - [`Error::LockPoisoned`] if another thread panicked while holding the
    ///   lock (std mutex only)
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self, gene: Gene) -> Result<SnowflakeId> {
        check_gene(gene)?;
        let mut state = self.lock()?;
        loop {
            let now = self.time.current_millis();
            match self.step(&state, now)? {
                Step::Issue {
                    timestamp,
                    sequence,
                } => return Ok(self.commit(&mut state, gene, timestamp, sequence)),
                Step::Exhausted | Step::Behind { .. } => core::hint::spin_loop(),
            }
        }
    }

    /// Generates an ID with [`Gene::DEFAULT`].
    ///
    /// # Errors
    ///
    /// See [`Node::generate`].
    pub fn next_id(&self) -> Result<SnowflakeId> {
        self.generate(Gene::DEFAULT)
    }

    /// Generates an ID, panicking on failure.
    ///
    /// # Panics
    ///
    /// Panics on any error [`Node::generate`] returns: an out-of-range
    /// `gene`, and also [`Error::ClockBackward`] under [`ClockPolicy::Reject`],
    /// a clock outside the 41-bit window ([`Error::ClockBeforeEpoch`],
    /// [`Error::TimestampOverflow`]) or a poisoned lock.
    pub fn must_generate(&self, gene: Gene) -> SnowflakeId {
        match self.generate(gene) {
            Ok(id) => id,
            Err(e) => panic!("{e}"),
        }
    }

    /// Attempts one generation without spinning.
    ///
    /// # Returns
    ///
    /// - `Ok(IdGenStatus::Ready { id })`: a new ID was issued
    /// - `Ok(IdGenStatus::Pending { yield_for })`: the sequence is exhausted
    ///   (`yield_for == 1`) or, under [`ClockPolicy::Wait`], the clock is
    ///   `yield_for` milliseconds behind
    ///
    /// # Errors
    ///
    /// Same as [`Node::generate`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_generate(&self, gene: Gene) -> Result<IdGenStatus> {
        check_gene(gene)?;
        let mut state = self.lock()?;
        let now = self.time.current_millis();
        match self.step(&state, now)? {
            Step::Issue {
                timestamp,
                sequence,
            } => Ok(IdGenStatus::Ready {
                id: self.commit(&mut state, gene, timestamp, sequence),
            }),
            Step::Exhausted => Ok(IdGenStatus::Pending { yield_for: 1 }),
            Step::Behind { last_ms } => Ok(IdGenStatus::Pending {
                yield_for: last_ms - now,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        #[cfg(feature = "parking-lot")]
        {
            Ok(self.state.lock())
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            Ok(self.state.lock()?)
        }
    }

    fn step(&self, state: &State, now: i64) -> Result<Step> {
        if now < 0 {
            return Err(Error::ClockBeforeEpoch { now_ms: now });
        }
        if now > SnowflakeId::TIMESTAMP_MASK {
            return Err(Error::TimestampOverflow { now_ms: now });
        }

        match now.cmp(&state.last_ms) {
            Ordering::Equal => {
                let sequence = (state.sequence + 1) & SnowflakeId::SEQUENCE_MASK;
                if sequence == 0 {
                    Ok(Step::Exhausted)
                } else {
                    Ok(Step::Issue {
                        timestamp: now,
                        sequence,
                    })
                }
            }
            Ordering::Greater => Ok(Step::Issue {
                timestamp: now,
                sequence: 0,
            }),
            Ordering::Less => self.cold_clock_behind(state.last_ms, now),
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(&self, last_ms: i64, now: i64) -> Result<Step> {
        match self.policy {
            ClockPolicy::Adopt => Ok(Step::Issue {
                timestamp: now,
                sequence: 0,
            }),
            ClockPolicy::Wait => Ok(Step::Behind { last_ms }),
            ClockPolicy::Reject => Err(Error::ClockBackward {
                last_ms,
                now_ms: now,
            }),
        }
    }

    fn commit(&self, state: &mut State, gene: Gene, timestamp: i64, sequence: i64) -> SnowflakeId {
        state.last_ms = timestamp;
        state.sequence = sequence;
        SnowflakeId::from_components(timestamp, gene, self.datacenter, self.node, sequence)
    }
}

impl<T> fmt::Debug for Node<T>
where
    T: TimeSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("datacenter", &self.datacenter)
            .field("node", &self.node)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

fn check_coordinate(coordinate: Coordinate, value: i64, mask: i64) -> Result<()> {
    if value < 0 || value > mask {
        return Err(Error::InvalidCoordinate { coordinate, value });
    }
    Ok(())
}

fn check_gene(gene: Gene) -> Result<()> {
    if !gene.is_valid() {
        return Err(Error::InvalidGene {
            gene: gene.to_raw(),
        });
    }
    Ok(())
}
