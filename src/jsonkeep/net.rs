//! Host address helpers.

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};

/// Loopback addresses treated as local. Only these exact addresses, not the
/// whole 127.0.0.0/8 block.
pub const LOCAL_IPS: [IpAddr; 2] = [
    IpAddr::V4(Ipv4Addr::LOCALHOST),
    IpAddr::V6(Ipv6Addr::LOCALHOST),
];

/// RFC 1918 private networks, as (network, prefix length).
pub const LOCAL_NETWORKS: [(Ipv4Addr, u8); 3] = [
    (Ipv4Addr::new(10, 0, 0, 0), 8),
    (Ipv4Addr::new(172, 16, 0, 0), 12),
    (Ipv4Addr::new(192, 168, 0, 0), 16),
];

const ROUTE_CHECK_ADDR: (Ipv4Addr, u16) = (Ipv4Addr::new(8, 8, 8, 8), 80);

pub fn is_local(address: IpAddr) -> bool {
    if LOCAL_IPS.contains(&address) {
        return true;
    }
    match address {
        IpAddr::V4(v4) => LOCAL_NETWORKS
            .iter()
            .any(|(network, prefix)| in_network(v4, *network, *prefix)),
        IpAddr::V6(_) => false,
    }
}

fn in_network(address: Ipv4Addr, network: Ipv4Addr, prefix: u8) -> bool {
    let mask = u32::MAX.checked_shl(32 - u32::from(prefix)).unwrap_or(0);
    u32::from(address) & mask == u32::from(network) & mask
}

/// Best guess at the address other hosts can reach this machine on.
///
/// Asks the OS which interface would route to a public address (a UDP
/// connect sends nothing), then resolves the OS host name, then gives up
/// with `127.0.0.1`.
pub fn local_ip() -> IpAddr {
    match outbound_ip(ROUTE_CHECK_ADDR.into()) {
        Ok(ip) => return ip,
        Err(e) => tracing::debug!("outbound address lookup failed: {}", e),
    }
    match hostname_ip() {
        Ok(ip) => return ip,
        Err(e) => tracing::debug!("hostname lookup failed: {}", e),
    }
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn outbound_ip(remote: SocketAddr) -> io::Result<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.connect(remote)?;
    Ok(socket.local_addr()?.ip())
}

fn hostname_ip() -> io::Result<IpAddr> {
    let host = hostname::get()?;
    let host = host.to_str().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidData, "host name is not valid UTF-8")
    })?;
    resolve_ipv4(host)
}

fn resolve_ipv4(host: &str) -> io::Result<IpAddr> {
    (host, 0)
        .to_socket_addrs()?
        .map(|addr| addr.ip())
        .find(IpAddr::is_ipv4)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no IPv4 address for host"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_loopback_is_local() {
        assert!(is_local(ip("127.0.0.1")));
        assert!(is_local(ip("::1")));
    }

    #[test]
    fn test_only_exact_loopback() {
        assert!(!is_local(ip("127.0.0.2")));
    }

    #[test]
    fn test_private_ranges() {
        assert!(is_local(ip("10.0.0.1")));
        assert!(is_local(ip("10.255.255.255")));
        assert!(is_local(ip("172.16.0.1")));
        assert!(is_local(ip("172.31.255.254")));
        assert!(is_local(ip("192.168.1.20")));
    }

    #[test]
    fn test_range_edges() {
        assert!(!is_local(ip("172.15.255.255")));
        assert!(!is_local(ip("172.32.0.0")));
        assert!(!is_local(ip("192.169.0.1")));
        assert!(!is_local(ip("11.0.0.1")));
    }

    #[test]
    fn test_public_and_v6() {
        assert!(!is_local(ip("8.8.8.8")));
        assert!(!is_local(ip("fe80::1")));
        assert!(!is_local(ip("::ffff:192.168.1.1")));
    }

    #[test]
    fn test_resolve_ipv4_localhost() {
        assert_eq!(resolve_ipv4("localhost").unwrap(), ip("127.0.0.1"));
    }

    #[test]
    fn test_hostname_comes_from_the_os() {
        assert!(!hostname::get().unwrap().is_empty());
    }

    #[test]
    fn test_local_ip_is_ipv4() {
        assert!(local_ip().is_ipv4());
    }
}
