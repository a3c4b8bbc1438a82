/// Datacenter coordinate, an integer in `0..=7`.
pub const DATACENTER_ENV: &str = "SNOWFLAKE_DATACENTER_ID";

/// Node coordinate, an integer in `0..=7`.
pub const NODE_ENV: &str = "SNOWFLAKE_NODE_ID";

/// A read-only view of configuration variables.
///
/// Closures implement this too, which keeps bootstrap tests away from the
/// process environment:
///
/// ```
/// use genoflake::{Coordinates, Environment, NODE_ENV, DATACENTER_ENV};
///
/// let env = |key: &str| match key {
///     DATACENTER_ENV => Some("3".to_owned()),
///     NODE_ENV => Some("5".to_owned()),
///     _ => None,
/// };
/// assert_eq!(env.var(NODE_ENV).as_deref(), Some("5"));
/// assert_eq!(
///     Coordinates::from_env(&env),
///     Some(Coordinates { datacenter: 3, node: 5 })
/// );
/// ```
pub trait Environment {
    /// Returns the value of `key`, or `None` if unset or not valid unicode.
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemEnv;

impl Environment for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<F> Environment for F
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, key: &str) -> Option<String> {
        self(key)
    }
}
