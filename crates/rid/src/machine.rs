use crate::crc4;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Hardware address checksummed when no interface qualifies.
pub const SENTINEL_HARDWARE_ADDR: [u8; 6] = [0, 0, 0, 0, 0, 0x80];

/// A network interface as seen by the machine id resolver.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Interface {
    pub name: String,
    pub up: bool,
    pub hardware_addr: Vec<u8>,
}

impl Interface {
    /// An interface qualifies when it is up and has a hardware address.
    #[must_use]
    pub fn qualifies(&self) -> bool {
        self.up && !self.hardware_addr.is_empty()
    }
}

/// Derives a machine id from the first qualifying interface in `interfaces`,
/// or from [`SENTINEL_HARDWARE_ADDR`] when none qualifies.
///
/// # Example
/// ```
/// use rid::{Interface, machine_id_from};
///
/// let lo = Interface { name: "lo".into(), up: true, hardware_addr: vec![] };
/// assert_eq!(machine_id_from([lo]), rid::crc4(&rid::SENTINEL_HARDWARE_ADDR));
/// ```
pub fn machine_id_from<I>(interfaces: I) -> u8
where
    I: IntoIterator<Item = Interface>,
{
    match interfaces.into_iter().find(Interface::qualifies) {
        Some(iface) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(interface = %iface.name, "machine id from hardware address");
            crc4(&iface.hardware_addr)
        }
        None => {
            #[cfg(feature = "tracing")]
            tracing::debug!("no qualifying interface, using sentinel hardware address");
            crc4(&SENTINEL_HARDWARE_ADDR)
        }
    }
}

/// Resolves this host's machine id from its network interfaces.
///
/// Enumeration failure is not an error: the sentinel address is used instead.
#[cfg_attr(feature = "tracing", instrument(level = "debug"))]
#[must_use]
pub fn resolve_machine_id() -> u8 {
    match interfaces() {
        Ok(list) => machine_id_from(list),
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_err, "interface enumeration failed");
            crc4(&SENTINEL_HARDWARE_ADDR)
        }
    }
}

/// Lists interfaces in kernel order, one entry per interface name.
///
/// Link-layer addresses that are all zero (e.g. loopback) are reported as
/// empty.
#[cfg(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "dragonfly"
))]
pub fn interfaces() -> std::io::Result<Vec<Interface>> {
    use nix::{ifaddrs::getifaddrs, net::if_::InterfaceFlags};

    let mut list: Vec<Interface> = Vec::new();
    for ifaddr in getifaddrs().map_err(std::io::Error::from)? {
        let hw = ifaddr
            .address
            .as_ref()
            .and_then(|addr| addr.as_link_addr())
            .and_then(|link| Some((link.addr()?, link_addr_len(link))))
            .and_then(|(bytes, len)| hardware_addr_from(bytes, len));

        let idx = match list.iter().position(|i| i.name == ifaddr.interface_name) {
            Some(idx) => idx,
            None => {
                list.push(Interface {
                    name: ifaddr.interface_name.clone(),
                    up: ifaddr.flags.contains(InterfaceFlags::IFF_UP),
                    hardware_addr: Vec::new(),
                });
                list.len() - 1
            }
        };
        if let Some(mac) = hw {
            if list[idx].hardware_addr.is_empty() {
                list[idx].hardware_addr = mac;
            }
        }
    }
    Ok(list)
}

/// Length of the link-layer address as reported by the kernel.
#[cfg(any(target_os = "linux", target_os = "android"))]
fn link_addr_len(link: &nix::sys::socket::LinkAddr) -> usize {
    usize::try_from(link.halen()).unwrap_or(0)
}

/// BSD-style `sockaddr_dl` addresses are only exposed as 6-byte MACs.
#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "dragonfly"
))]
fn link_addr_len(_link: &nix::sys::socket::LinkAddr) -> usize {
    6
}

/// Trims a fixed 6-byte link address buffer to its real length `len`.
///
/// Tunnels carry shorter addresses (an ipip link address is the 4-byte IPv4
/// endpoint). Empty and all-zero addresses yield `None`.
#[cfg_attr(not(unix), allow(dead_code))]
fn hardware_addr_from(bytes: [u8; 6], len: usize) -> Option<Vec<u8>> {
    let addr = &bytes[..len.min(bytes.len())];
    addr.iter().any(|&b| b != 0).then(|| addr.to_vec())
}

/// Interface enumeration is unsupported here; the resolver falls back to the
/// sentinel address.
#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "dragonfly"
)))]
pub fn interfaces() -> std::io::Result<Vec<Interface>> {
    Ok(Vec::new())
}
