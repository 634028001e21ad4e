//! TCP connect check against the sign's echo port.
//!
//! ICMP needs raw sockets (root or `CAP_NET_RAW`); a TCP handshake with the
//! echo service does not, and the sign's network module answers on port 7.

use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;

use super::ReachabilityCheck;

/// Default port of the echo service
pub const DEFAULT_ECHO_PORT: u16 = 7;

/// Reachable iff a TCP connection is established within the timeout.
#[derive(Debug, Clone)]
pub struct TcpEchoCheck {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpEchoCheck {
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }
}

#[async_trait]
impl ReachabilityCheck for TcpEchoCheck {
    async fn check(&self) -> bool {
        let connect = TcpStream::connect((self.host.as_str(), self.port));
        matches!(tokio::time::timeout(self.timeout, connect).await, Ok(Ok(_)))
    }

    fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
