use crate::error::Error;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Twitter's snowflake epoch, 2010-11-04T01:42:54.657Z.
pub const TWITTER_EPOCH: UnixMillis = UnixMillis(1_288_834_974_657);

/// 2015-01-01T00:00:00Z.
pub const DEFAULT_EPOCH: UnixMillis = UnixMillis(1_420_070_400_000);

/// A point in time as signed milliseconds since the Unix epoch.
///
/// Used both for a generator's epoch and for the timestamps ids are minted
/// at. Converts from a [`Timestamp`], from raw milliseconds, and parses from
/// either an integer string or an RFC 3339 timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnixMillis(i64);

impl UnixMillis {
    pub const fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Converts back into a [`Timestamp`], failing outside jiff's supported
    /// range (roughly years -9999 to 9999).
    pub fn to_timestamp(self) -> Result<Timestamp, Error> {
        Timestamp::from_millisecond(self.0).map_err(|err| Error::TimestampOutOfRange {
            millis: self.0,
            reason: err.to_string(),
        })
    }
}

impl From<Timestamp> for UnixMillis {
    fn from(value: Timestamp) -> Self {
        Self(value.as_millisecond())
    }
}

impl From<i64> for UnixMillis {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<UnixMillis> for i64 {
    fn from(value: UnixMillis) -> Self {
        value.0
    }
}

impl FromStr for UnixMillis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(millis) = s.parse::<i64>() {
            return Ok(Self(millis));
        }
        s.parse::<Timestamp>()
            .map(Self::from)
            .map_err(|_| Error::InvalidTimestamp(s.to_string()))
    }
}

impl fmt::Display for UnixMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
