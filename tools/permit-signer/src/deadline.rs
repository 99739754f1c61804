use ethers::types::U256;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::{debug, info, warn};

/// How a permit deadline relates to the local clock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeadlineStatus {
    /// Still in the future; carries the RFC 3339 rendering.
    Open(String),
    /// Already passed; the token will reject the permit.
    Expired(String),
    /// Sentinel past any timestamp (eg `type(uint256).max`), never expires.
    Unbounded,
    /// A valid timestamp, but beyond the calendar range (after year 9999).
    OutOfRange,
}

pub fn deadline_status(deadline: U256, now: OffsetDateTime) -> DeadlineStatus {
    if deadline > U256::from(i64::MAX as u64) {
        return DeadlineStatus::Unbounded;
    }
    let seconds = deadline.as_u64() as i64;
    let Ok(at) = OffsetDateTime::from_unix_timestamp(seconds) else {
        return DeadlineStatus::OutOfRange;
    };
    let rendered = at.format(&Rfc3339).unwrap_or_else(|_| seconds.to_string());
    if at < now {
        DeadlineStatus::Expired(rendered)
    } else {
        DeadlineStatus::Open(rendered)
    }
}

/// Signing still proceeds for an expired deadline.
pub fn log_deadline(deadline: U256) {
    match deadline_status(deadline, OffsetDateTime::now_utc()) {
        DeadlineStatus::Open(at) => info!(%deadline, %at, "permit deadline"),
        DeadlineStatus::Expired(at) => {
            warn!(%deadline, %at, "permit deadline has already passed")
        }
        DeadlineStatus::Unbounded => debug!(%deadline, "permit deadline never expires"),
        DeadlineStatus::OutOfRange => {
            debug!(%deadline, "permit deadline is beyond the calendar range")
        }
    }
}
