use std::sync::OnceLock;

#[cfg(feature = "tracing")]
use tracing::info;

use crate::{
    Environment, Error, Gene, HostSource, Node, Result, SnowflakeId, SystemEnv, SystemHost,
    resolve_coordinates,
};

static DEFAULT_NODE: OnceLock<Result<Node>> = OnceLock::new();

/// Builds a wall-clock node from `env`, falling back to the `host`
/// fingerprint.
///
/// # Errors
///
/// Returns [`Error::Bootstrap`] wrapping the construction error.
pub fn bootstrap_node<E, H>(env: &E, host: &H) -> Result<Node>
where
    E: Environment + ?Sized,
    H: HostSource + ?Sized,
{
    let (coordinates, source) = resolve_coordinates(env, host);
    let node = Node::new(coordinates.datacenter, coordinates.node).map_err(|e| Error::Bootstrap {
        source: Box::new(e),
    })?;

    #[cfg(feature = "tracing")]
    info!(
        datacenter = node.datacenter(),
        node = node.node(),
        %source,
        "default snowflake node ready"
    );
    #[cfg(not(feature = "tracing"))]
    let _ = source;

    Ok(node)
}

fn default_slot() -> &'static Result<Node> {
    DEFAULT_NODE.get_or_init(|| bootstrap_node(&SystemEnv, &SystemHost))
}

/// Brings up the process-wide default node.
///
/// Runs at most once; later calls, and calls made after a later change to the
/// environment, observe the first outcome.
///
/// # Errors
///
/// Returns the cached [`Error::Bootstrap`] if the first attempt failed.
pub fn init_default() -> Result<()> {
    default_slot().as_ref().map(|_| ()).map_err(Clone::clone)
}

/// The process-wide default node, initialised on first use.
///
/// ```
/// let node = genoflake::default_node().unwrap();
/// assert!((0..=7).contains(&node.datacenter()));
/// ```
///
/// # Errors
///
/// Returns the cached [`Error::Bootstrap`] if initialisation failed.
pub fn default_node() -> Result<&'static Node> {
    default_slot().as_ref().map_err(Clone::clone)
}

/// Generates an ID on the [`default_node`].
///
/// # Errors
///
/// Returns bootstrap errors and everything [`Node::generate`] returns.
pub fn generate_id(gene: Gene) -> Result<SnowflakeId> {
    default_node()?.generate(gene)
}

/// Generates an ID on the [`default_node`], panicking on failure.
///
/// # Panics
///
/// Panics if bootstrap failed or if `gene` is outside `0..=63`.
pub fn must_generate_id(gene: Gene) -> SnowflakeId {
    match generate_id(gene) {
        Ok(id) => id,
        Err(e) => panic!("{e}"),
    }
}
