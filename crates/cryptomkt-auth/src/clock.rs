//! Clock sources for request timestamps
//!
//! CryptoMarket rejects requests whose `X-MKT-TIMESTAMP` is outside a small
//! window around server time. A host with a drifting clock can use
//! [`NtpClock`] to take the time from an NTP server instead of the local clock.
//!
//! A failed network time lookup is returned as an error. There is no fallback
//! to the local clock.

use async_trait::async_trait;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::net::UdpSocket;
use tracing::{debug, instrument, warn};

use crate::error::{ClockError, ClockResult};

/// Default NTP server
pub const DEFAULT_NTP_SERVER: &str = "2.cl.pool.ntp.org:123";

/// Default time to wait for an NTP reply
pub const DEFAULT_NTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Seconds between 1900-01-01 (NTP era 0) and 1970-01-01
const NTP_UNIX_OFFSET: u64 = 2_208_988_800;

const PACKET_LEN: usize = 48;

/// LI = 0, VN = 4, Mode = 3 (client)
const CLIENT_HEADER: u8 = 0b00_100_011;

const MODE_SERVER: u8 = 4;

/// Source of the current time in Unix seconds
#[async_trait]
pub trait ClockSource: Send + Sync + std::fmt::Debug {
    /// Current Unix time in seconds
    async fn now(&self) -> ClockResult<u64>;
}

/// Local system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl ClockSource for SystemClock {
    async fn now(&self) -> ClockResult<u64> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .map_err(|_| ClockError::BeforeEpoch)
    }
}

/// SNTP (RFC 4330) client clock
///
/// Every call to [`ClockSource::now`] performs one request/reply exchange.
#[derive(Debug, Clone)]
pub struct NtpClock {
    server: String,
    timeout: Duration,
}

impl Default for NtpClock {
    fn default() -> Self {
        Self::new()
    }
}

impl NtpClock {
    /// Clock backed by [`DEFAULT_NTP_SERVER`]
    pub fn new() -> Self {
        Self {
            server: DEFAULT_NTP_SERVER.to_string(),
            timeout: DEFAULT_NTP_TIMEOUT,
        }
    }

    /// Use a different server (`host:port`)
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    /// Set the reply timeout (covers DNS, send and receive)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Server being queried
    pub fn server(&self) -> &str {
        &self.server
    }

    async fn exchange(&self) -> ClockResult<u64> {
        let addr = tokio::net::lookup_host(self.server.as_str())
            .await?
            .next()
            .ok_or_else(|| ClockError::Unresolved(self.server.clone()))?;

        let local = if addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };

        let socket = UdpSocket::bind(local).await?;
        socket.connect(addr).await?;
        let sent = transmit_stamp();
        socket.send(&request_packet(sent)).await?;

        let mut buf = [0u8; PACKET_LEN];
        let len = socket.recv(&mut buf).await?;
        parse_response(&buf[..len], sent)
    }
}

#[async_trait]
impl ClockSource for NtpClock {
    #[instrument(skip(self), fields(server = %self.server))]
    async fn now(&self) -> ClockResult<u64> {
        let result = tokio::time::timeout(self.timeout, self.exchange())
            .await
            .map_err(|_| ClockError::Timeout {
                server: self.server.clone(),
                after: self.timeout,
            })?;

        match &result {
            Ok(secs) => debug!(unix = secs, "Network time received"),
            Err(e) => warn!(error = %e, "Network time lookup failed"),
        }
        result
    }
}

/// Local time in NTP timestamp format, used to match the reply to the request
fn transmit_stamp() -> [u8; 8] {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    // Wraps at the era boundary
    let secs = (now.as_secs() + NTP_UNIX_OFFSET) as u32;
    let frac = ((u64::from(now.subsec_nanos()) << 32) / 1_000_000_000) as u32;

    let mut stamp = [0u8; 8];
    stamp[..4].copy_from_slice(&secs.to_be_bytes());
    stamp[4..].copy_from_slice(&(frac | 1).to_be_bytes());
    stamp
}

fn request_packet(transmit: [u8; 8]) -> [u8; PACKET_LEN] {
    let mut packet = [0u8; PACKET_LEN];
    packet[0] = CLIENT_HEADER;
    packet[40..48].copy_from_slice(&transmit);
    packet
}

/// Extract the server transmit time from an SNTP reply, as Unix seconds
///
/// The reply's originate timestamp must echo `sent`, the transmit timestamp
/// of the request.
fn parse_response(packet: &[u8], sent: [u8; 8]) -> ClockResult<u64> {
    if packet.len() < PACKET_LEN {
        return Err(ClockError::InvalidResponse(format!(
            "short packet: {} bytes",
            packet.len()
        )));
    }

    let mode = packet[0] & 0x07;
    if mode != MODE_SERVER {
        return Err(ClockError::InvalidResponse(format!("unexpected mode {mode}")));
    }

    if packet[1] == 0 {
        let code = String::from_utf8_lossy(&packet[12..16]).trim_end_matches('\0').to_string();
        return Err(ClockError::KissOfDeath(code));
    }

    if packet[24..32] != sent {
        return Err(ClockError::InvalidResponse(
            "originate timestamp does not match the request".to_string(),
        ));
    }

    let secs = u32::from_be_bytes([packet[40], packet[41], packet[42], packet[43]]);
    let frac = u32::from_be_bytes([packet[44], packet[45], packet[46], packet[47]]);
    if secs == 0 && frac == 0 {
        return Err(ClockError::InvalidResponse("transmit timestamp is zero".to_string()));
    }

    // RFC 4330 section 3: MSB clear means era 1 (after 2036-02-07)
    let ntp_secs = if secs & 0x8000_0000 == 0 {
        u64::from(secs) + (1u64 << 32)
    } else {
        u64::from(secs)
    };

    ntp_secs
        .checked_sub(NTP_UNIX_OFFSET)
        .ok_or_else(|| ClockError::InvalidResponse("transmit time before 1970".to_string()))
}
