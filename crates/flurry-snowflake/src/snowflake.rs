use crate::{error::Error, node_id::NodeId};
use modular_bitfield::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub(crate) const ELAPSED_BITS: u32 = 42;
pub(crate) const NODE_ID_BITS: u32 = 10;
pub(crate) const SEQUENCE_BITS: u32 = 12;

pub(crate) const ELAPSED_MASK: u64 = (1 << ELAPSED_BITS) - 1;
pub(crate) const MAX_SEQUENCE: u16 = (1 << SEQUENCE_BITS) - 1;

/// Bit layout of a snowflake, least significant field first.
#[bitfield]
#[derive(Clone, Copy, PartialEq, Eq)]
struct Layout {
    /// 12 bits for the per-generator sequence.
    sequence: B12,
    /// 10 bits for the node id.
    node_id: B10,
    /// 42 bits for milliseconds since the generator's epoch.
    elapsed: B42,
}

impl Layout {
    fn from_raw(raw: u64) -> Self {
        Self::from_bytes(raw.to_le_bytes())
    }

    fn into_raw(self) -> u64 {
        u64::from_le_bytes(self.into_bytes())
    }
}

/// A 64-bit snowflake id.
///
/// The canonical wire form is the base-10 string produced by [`Display`],
/// which survives transport through systems without 64-bit integer
/// precision (JSON numbers in JavaScript, for one). [`FromStr`] accepts the
/// same form back.
///
/// [`Display`]: fmt::Display
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Snowflake(u64);

impl Snowflake {
    /// Packs the three fields into an id.
    ///
    /// `elapsed` is truncated to its low 42 bits and `sequence` to its low
    /// 12 bits.
    pub fn from_parts(elapsed: u64, node_id: NodeId, sequence: u16) -> Self {
        let layout = Layout::new()
            .with_sequence(sequence & MAX_SEQUENCE)
            .with_node_id(node_id.get())
            .with_elapsed(elapsed & ELAPSED_MASK);
        Self(layout.into_raw())
    }

    pub const fn from_u64(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Milliseconds between the generator's epoch and the mint time.
    pub fn elapsed(self) -> u64 {
        Layout::from_raw(self.0).elapsed()
    }

    pub fn node_id(self) -> NodeId {
        NodeId::from(Layout::from_raw(self.0).node_id())
    }

    pub fn sequence(self) -> u16 {
        Layout::from_raw(self.0).sequence()
    }
}

impl fmt::Debug for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snowflake")
            .field("id", &self.0)
            .field("elapsed", &self.elapsed())
            .field("node_id", &self.node_id().get())
            .field("sequence", &self.sequence())
            .finish()
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Snowflake {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|source| Error::InvalidIdentifier {
                input: s.to_string(),
                source,
            })
    }
}

impl TryFrom<&str> for Snowflake {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Snowflake {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<u64> for Snowflake {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Snowflake> for u64 {
    fn from(value: Snowflake) -> Self {
        value.0
    }
}

impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
