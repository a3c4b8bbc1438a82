/// A network interface as seen by [`HostSource`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Interface {
    pub name: String,
    pub loopback: bool,
    /// Link-layer address, empty if the interface has none.
    pub hardware_addr: Vec<u8>,
}

impl Interface {
    /// Whether this interface can identify the host.
    pub fn is_fingerprint_candidate(&self) -> bool {
        !self.loopback && self.hardware_addr.len() >= 6
    }
}

/// Host facts used to derive node coordinates.
pub trait HostSource {
    /// Network interfaces in system order. Enumeration failures yield an
    /// empty list.
    fn interfaces(&self) -> Vec<Interface>;

    /// The host name, if it can be read.
    fn hostname(&self) -> Option<String>;
}

/// The running host.
///
/// On Linux, Android and macOS interfaces come from `getifaddrs(3)`; other
/// platforms report none and fall back to the host name.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemHost;

impl HostSource for SystemHost {
    #[cfg(any(target_os = "linux", target_os = "android", target_os = "macos"))]
    fn interfaces(&self) -> Vec<Interface> {
        use nix::ifaddrs::getifaddrs;
        use nix::net::if_::InterfaceFlags;

        let Ok(addrs) = getifaddrs() else {
            return Vec::new();
        };

        let mut interfaces: Vec<Interface> = Vec::new();
        for ifaddr in addrs {
            let hardware_addr = ifaddr
                .address
                .as_ref()
                .and_then(|address| address.as_link_addr())
                .and_then(|link| link.addr())
                .map(|mac| mac.to_vec())
                .unwrap_or_default();

            match interfaces
                .iter_mut()
                .find(|known| known.name == ifaddr.interface_name)
            {
                Some(known) if known.hardware_addr.is_empty() => known.hardware_addr = hardware_addr,
                Some(_) => {}
                None => interfaces.push(Interface {
                    name: ifaddr.interface_name,
                    loopback: ifaddr.flags.contains(InterfaceFlags::IFF_LOOPBACK),
                    hardware_addr,
                }),
            }
        }
        interfaces
    }

    #[cfg(not(any(target_os = "linux", target_os = "android", target_os = "macos")))]
    fn interfaces(&self) -> Vec<Interface> {
        Vec::new()
    }

    #[cfg(unix)]
    fn hostname(&self) -> Option<String> {
        nix::unistd::gethostname()
            .ok()
            .and_then(|name| name.into_string().ok())
    }

    #[cfg(not(unix))]
    fn hostname(&self) -> Option<String> {
        std::env::var("COMPUTERNAME")
            .or_else(|_| std::env::var("HOSTNAME"))
            .ok()
    }
}

/// Host name used when nothing better identifies the host.
pub const UNKNOWN_HOST: &str = "unknown-host";

/// Bytes identifying `host`: the hardware address of the first non-loopback
/// interface that has one of at least six bytes, else the host name, else
/// [`UNKNOWN_HOST`].
pub fn fingerprint<H>(host: &H) -> Vec<u8>
where
    H: HostSource + ?Sized,
{
    if let Some(iface) = host
        .interfaces()
        .into_iter()
        .find(Interface::is_fingerprint_candidate)
    {
        return iface.hardware_addr;
    }
    match host.hostname() {
        Some(name) if !name.is_empty() => name.into_bytes(),
        _ => UNKNOWN_HOST.as_bytes().to_vec(),
    }
}
