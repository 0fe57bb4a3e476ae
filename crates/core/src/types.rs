//! Wire-level type vocabulary.

/// All persisted and wire timestamps are milliseconds since the Unix epoch.
pub type UnixMillis = i64;

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_ms() -> UnixMillis {
    chrono::Utc::now().timestamp_millis()
}

/// Transport a DNS query arrived over.
///
/// The integer values are part of the wire and storage contract and must
/// not be reordered: 0 = UDP, 1 = TCP, 2 = DoT, 3 = DoH, 4 = DoQ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Transport {
    Udp = 0,
    Tcp = 1,
    Dot = 2,
    Doh = 3,
    Doq = 4,
}

impl Transport {
    /// The stored/wire integer for this transport.
    pub fn as_wire(self) -> u8 {
        self as u8
    }
}

impl TryFrom<i64> for Transport {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Transport::Udp),
            1 => Ok(Transport::Tcp),
            2 => Ok(Transport::Dot),
            3 => Ok(Transport::Doh),
            4 => Ok(Transport::Doq),
            other => Err(other),
        }
    }
}
