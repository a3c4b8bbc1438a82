use core::fmt;
use core::str::FromStr;

/// How a [`Node`](crate::Node) reacts when the clock reports a time earlier
/// than the last issued timestamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClockPolicy {
    /// Take the earlier time and restart the sequence at zero.
    ///
    /// The node never stalls, but IDs issued after the regression may sort
    /// below earlier ones and may collide with IDs issued before it.
    #[default]
    Adopt,
    /// Spin until the clock catches up with the last issued timestamp.
    Wait,
    /// Fail with [`Error::ClockBackward`](crate::Error::ClockBackward).
    Reject,
}

impl ClockPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Adopt => "adopt",
            Self::Wait => "wait",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for ClockPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`ClockPolicy`] name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown clock policy {0:?}, expected adopt, wait or reject")]
pub struct ParseClockPolicyError(String);

impl FromStr for ClockPolicy {
    type Err = ParseClockPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Adopt, Self::Wait, Self::Reject]
            .into_iter()
            .find(|policy| policy.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseClockPolicyError(s.to_owned()))
    }
}
