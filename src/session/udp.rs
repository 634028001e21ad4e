//! # UDP Session
//!
//! The sign accepts protocol datagrams on a fixed UDP port. The socket is
//! connected once at startup so every send is a single non-blocking write.
//!
//! ## Failure Behavior
//!
//! - Address resolution and socket setup errors are returned from
//!   [`UdpSession::connect`]; without a socket the bridge cannot work.
//! - Write errors (host down, ICMP unreachable, full send buffer) are logged
//!   and dropped.

use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

use tracing::{debug, error, info};

use super::DeviceSession;
use crate::error::LedboardError;

/// Default UDP port of the sign
pub const DEFAULT_PORT: u16 = 9520;

/// Session over a connected, non-blocking UDP socket.
#[derive(Debug)]
pub struct UdpSession {
    socket: UdpSocket,
    peer: SocketAddr,
}

impl UdpSession {
    /// Resolve the sign's address and open a socket to it.
    ///
    /// IPv4 addresses are preferred when the host resolves to both families.
    ///
    /// ## Errors
    ///
    /// Returns [`LedboardError::Transport`] if the host does not resolve or
    /// the socket cannot be created.
    pub fn connect(host: &str, port: u16) -> Result<Self, LedboardError> {
        let addrs: Vec<SocketAddr> = (host, port)
            .to_socket_addrs()
            .map_err(|e| {
                LedboardError::Transport(format!("Failed to resolve {}:{}: {}", host, port, e))
            })?
            .collect();

        let peer = addrs
            .iter()
            .find(|addr| addr.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
            .ok_or_else(|| {
                LedboardError::Transport(format!("No address found for {}:{}", host, port))
            })?;

        let local: SocketAddr = if peer.is_ipv4() {
            ([0u8; 4], 0).into()
        } else {
            ([0u16; 8], 0).into()
        };

        let socket = UdpSocket::bind(local)
            .map_err(|e| LedboardError::Transport(format!("Failed to bind UDP socket: {}", e)))?;
        socket.connect(peer).map_err(|e| {
            LedboardError::Transport(format!("Failed to connect UDP socket to {}: {}", peer, e))
        })?;
        socket.set_nonblocking(true)?;

        info!(%peer, "sign session ready");
        Ok(Self { socket, peer })
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }
}

impl DeviceSession for UdpSession {
    fn send(&mut self, datagram: &[u8]) {
        debug!(peer = %self.peer, bytes = %datagram.escape_ascii(), "sending datagram");

        if let Err(e) = self.socket.send(datagram) {
            error!(peer = %self.peer, error = %e, "failed sending datagram to sign");
        }
    }
}
