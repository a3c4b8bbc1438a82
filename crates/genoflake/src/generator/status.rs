use crate::SnowflakeId;

/// Outcome of a single non-blocking generation attempt.
///
/// Returned by [`Node::try_generate`](crate::Node::try_generate):
///
/// - [`IdGenStatus::Ready`] carries a freshly issued ID.
/// - [`IdGenStatus::Pending`] means the node cannot issue an ID for the
///   current millisecond; retry after `yield_for` milliseconds.
///
/// A `Pending` attempt leaves the node untouched.
///
/// # Example
///
/// ```
/// use genoflake::{Gene, IdGenStatus, Node};
///
/// let node = Node::new(2, 3).unwrap();
/// let id = loop {
///     match node.try_generate(Gene::ORDER).unwrap() {
///         IdGenStatus::Ready { id } => break id,
///         IdGenStatus::Pending { .. } => std::thread::yield_now(),
///     }
/// };
/// assert_eq!(id.node(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: SnowflakeId,
    },
    /// No ID could be generated at this instant, either because the sequence
    /// is exhausted for the current millisecond or because the clock is
    /// behind the last issued timestamp under [`ClockPolicy::Wait`].
    ///
    /// [`ClockPolicy::Wait`]: crate::ClockPolicy::Wait
    Pending {
        /// Milliseconds to wait before trying again.
        yield_for: i64,
    },
}
