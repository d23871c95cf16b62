use crate::{
    error::{Error, Result},
    snowflake::NODE_ID_BITS,
};
use mac_address::MacAddressIterator;
use serde::{Deserialize, Serialize};
use std::fmt;

const NODE_ID_SPACE: u32 = 1 << NODE_ID_BITS;

/// A 10-bit node id in `[0, 1023]`.
///
/// Construction never fails: out-of-range input is reduced modulo 1024, so
/// `1024` becomes `0` and `2047` becomes `1023`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u16")]
pub struct NodeId(u16);

impl NodeId {
    pub const MAX: NodeId = NodeId((NODE_ID_SPACE - 1) as u16);

    pub fn new(raw: u32) -> Self {
        Self((raw % NODE_ID_SPACE) as u16)
    }

    pub const fn get(self) -> u16 {
        self.0
    }
}

impl From<u32> for NodeId {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<u16> for NodeId {
    fn from(value: u16) -> Self {
        Self::new(u32::from(value))
    }
}

impl From<NodeId> for u16 {
    fn from(value: NodeId) -> Self {
        value.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supplies the node id for a generator constructed without an explicit one.
///
/// Implementations either return a value in range or report
/// [`Error::NodeIdUnavailable`]; the generator falls back to node `0` on
/// error rather than failing.
pub trait NodeIdResolver {
    fn resolve(&self) -> Result<NodeId>;
}

/// Always resolves to the same node id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedNodeId(pub NodeId);

impl NodeIdResolver for FixedNodeId {
    fn resolve(&self) -> Result<NodeId> {
        Ok(self.0)
    }
}

/// Derives the node id from the host's network interfaces.
///
/// Takes the first interface whose MAC address is not all zeros, reads its
/// six bytes as a big-endian 48-bit integer and reduces it modulo 1024.
/// Hosts that share a NIC vendor suffix can collide; assign node ids
/// explicitly when that matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacAddressResolver;

impl NodeIdResolver for MacAddressResolver {
    fn resolve(&self) -> Result<NodeId> {
        let addresses =
            MacAddressIterator::new().map_err(|err| Error::NodeIdUnavailable(err.to_string()))?;
        node_id_from_macs(addresses.map(|mac| mac.bytes()))
    }
}

fn node_id_from_macs(macs: impl IntoIterator<Item = [u8; 6]>) -> Result<NodeId> {
    let mac = macs
        .into_iter()
        .find(|bytes| bytes.iter().any(|&b| b != 0))
        .ok_or_else(|| Error::NodeIdUnavailable("no non-zero MAC address found".to_string()))?;

    let value = mac
        .iter()
        .fold(0_u64, |acc, &byte| (acc << 8) | u64::from(byte));
    Ok(NodeId::new((value % u64::from(NODE_ID_SPACE)) as u32))
}
