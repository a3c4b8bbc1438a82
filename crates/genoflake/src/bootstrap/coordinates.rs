use core::fmt;

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::{
    DATACENTER_ENV, Environment, HostSource, NODE_ENV, SnowflakeId, fingerprint, gene::Fnv1a,
};

/// A `(datacenter, node)` pair in `0..=7 × 0..=7`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Coordinates {
    pub datacenter: i64,
    pub node: i64,
}

/// Where a pair of [`Coordinates`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CoordinateSource {
    /// Both [`DATACENTER_ENV`] and [`NODE_ENV`] held valid values.
    Environment,
    /// Derived from the host [`fingerprint`].
    Fingerprint,
}

impl fmt::Display for CoordinateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => f.write_str("environment"),
            Self::Fingerprint => f.write_str("fingerprint"),
        }
    }
}

impl Coordinates {
    /// Reads both coordinates from `env`. Returns `None` unless both are
    /// present, decimal, and in range.
    pub fn from_env<E>(env: &E) -> Option<Self>
    where
        E: Environment + ?Sized,
    {
        let datacenter = env_coordinate(env, DATACENTER_ENV, SnowflakeId::DATACENTER_MASK);
        let node = env_coordinate(env, NODE_ENV, SnowflakeId::NODE_MASK);
        Some(Self {
            datacenter: datacenter?,
            node: node?,
        })
    }

    /// Hashes `bytes` with FNV-1a and slices the digest into coordinates:
    /// `datacenter = h % 8`, `node = (h >> 3) % 8`.
    pub fn from_fingerprint(bytes: &[u8]) -> Self {
        let h = Fnv1a::digest(bytes);
        let datacenter_span = SnowflakeId::DATACENTER_MASK as u64 + 1;
        let node_span = SnowflakeId::NODE_MASK as u64 + 1;
        Self {
            datacenter: (h % datacenter_span) as i64,
            node: ((h >> SnowflakeId::DATACENTER_BITS) % node_span) as i64,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "datacenter={} node={}", self.datacenter, self.node)
    }
}

fn env_coordinate<E>(env: &E, key: &str, max: i64) -> Option<i64>
where
    E: Environment + ?Sized,
{
    let raw = env.var(key)?;
    match raw.parse::<i64>() {
        Ok(value) if (0..=max).contains(&value) => Some(value),
        _ => {
            #[cfg(feature = "tracing")]
            debug!(key, value = %raw, "ignoring out-of-range or malformed coordinate");
            None
        }
    }
}

/// Resolves node coordinates from `env`, falling back to `host` for both
/// when either variable is missing or invalid.
pub fn resolve_coordinates<E, H>(env: &E, host: &H) -> (Coordinates, CoordinateSource)
where
    E: Environment + ?Sized,
    H: HostSource + ?Sized,
{
    match Coordinates::from_env(env) {
        Some(coordinates) => (coordinates, CoordinateSource::Environment),
        None => (
            Coordinates::from_fingerprint(&fingerprint(host)),
            CoordinateSource::Fingerprint,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Interface, UNKNOWN_HOST};

    #[derive(Default)]
    struct FakeHost {
        interfaces: Vec<Interface>,
        hostname: Option<String>,
    }

    impl HostSource for FakeHost {
        fn interfaces(&self) -> Vec<Interface> {
            self.interfaces.clone()
        }

        fn hostname(&self) -> Option<String> {
            self.hostname.clone()
        }
    }

    fn named(name: &str) -> FakeHost {
        FakeHost {
            hostname: Some(name.to_owned()),
            ..FakeHost::default()
        }
    }

    fn vars(pairs: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let pairs = pairs.to_vec();
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_owned())
        }
    }

    const MAC: [u8; 6] = [0x02, 0x42, 0xac, 0x11, 0x00, 0x02];

    #[test]
    fn fingerprint_slices_hash() {
        assert_eq!(
            Coordinates::from_fingerprint(b"host-a"),
            Coordinates { datacenter: 5, node: 4 }
        );
        assert_eq!(
            Coordinates::from_fingerprint(b"host-b"),
            Coordinates { datacenter: 4, node: 1 }
        );
        assert_eq!(
            Coordinates::from_fingerprint(&MAC),
            Coordinates { datacenter: 0, node: 7 }
        );
        assert_eq!(
            Coordinates::from_fingerprint(UNKNOWN_HOST.as_bytes()),
            Coordinates { datacenter: 6, node: 5 }
        );
    }

    #[test]
    fn fingerprint_prefers_first_usable_interface() {
        let host = FakeHost {
            interfaces: vec![
                Interface {
                    name: "lo".into(),
                    loopback: true,
                    hardware_addr: vec![0; 6],
                },
                Interface {
                    name: "tun0".into(),
                    loopback: false,
                    hardware_addr: Vec::new(),
                },
                Interface {
                    name: "eth0".into(),
                    loopback: false,
                    hardware_addr: MAC.to_vec(),
                },
                Interface {
                    name: "eth1".into(),
                    loopback: false,
                    hardware_addr: vec![0xaa; 6],
                },
            ],
            hostname: Some("host-a".into()),
        };
        assert_eq!(fingerprint(&host), MAC.to_vec());
    }

    #[test]
    fn fingerprint_falls_back_to_hostname() {
        let host = FakeHost {
            interfaces: vec![Interface {
                name: "lo".into(),
                loopback: true,
                hardware_addr: vec![1, 2, 3, 4, 5, 6],
            }],
            hostname: Some("host-b".into()),
        };
        assert_eq!(fingerprint(&host), b"host-b".to_vec());
        assert_eq!(fingerprint(&named("")), UNKNOWN_HOST.as_bytes().to_vec());
        assert_eq!(fingerprint(&FakeHost::default()), UNKNOWN_HOST.as_bytes().to_vec());
    }

    #[test]
    fn environment_wins_when_both_valid() {
        let env = vars(&[(DATACENTER_ENV, "3"), (NODE_ENV, "5")]);
        assert_eq!(
            resolve_coordinates(&env, &named("host-a")),
            (
                Coordinates { datacenter: 3, node: 5 },
                CoordinateSource::Environment
            )
        );
    }

    #[test]
    fn any_invalid_variable_rederives_both() {
        let host = named("host-a");
        let derived = (
            Coordinates { datacenter: 5, node: 4 },
            CoordinateSource::Fingerprint,
        );
        for env in [
            vars(&[(DATACENTER_ENV, "3")]),
            vars(&[(NODE_ENV, "5")]),
            vars(&[(DATACENTER_ENV, "3"), (NODE_ENV, "8")]),
            vars(&[(DATACENTER_ENV, "-1"), (NODE_ENV, "5")]),
            vars(&[(DATACENTER_ENV, "three"), (NODE_ENV, "5")]),
            vars(&[(DATACENTER_ENV, " 3"), (NODE_ENV, "5")]),
            vars(&[]),
        ] {
            assert_eq!(resolve_coordinates(&env, &host), derived);
        }
    }

    #[test]
    fn same_host_resolves_to_same_coordinates() {
        let env = vars(&[]);
        let first = resolve_coordinates(&env, &named("host-a"));
        let second = resolve_coordinates(&env, &named("host-a"));
        assert_eq!(first, second);

        let (other, _) = resolve_coordinates(&env, &named("host-b"));
        assert_ne!(first.0, other);
        assert!((0..=7).contains(&other.datacenter));
        assert!((0..=7).contains(&other.node));
    }
}
