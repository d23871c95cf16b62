//! Coordination-free, time-sortable 64-bit snowflake identifiers.
//!
//! Each [`Snowflake`] packs milliseconds since a custom epoch (42 bits), a
//! node id (10 bits) and a per-generator sequence (12 bits). A [`Generator`]
//! mints them and turns them back into their parts with
//! [`Generator::deconstruct`].

mod clock;
pub mod error;
mod generator;
mod node_id;
mod snowflake;
mod time;

pub use clock::{Clock, SystemClock};
pub use error::{Error, Result};
pub use generator::{DeconstructedSnowflake, GenerateOptions, Generator, GeneratorSettings};
pub use node_id::{FixedNodeId, MacAddressResolver, NodeId, NodeIdResolver};
pub use snowflake::Snowflake;
pub use time::{UnixMillis, DEFAULT_EPOCH, TWITTER_EPOCH};
