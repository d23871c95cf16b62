use crate::{
    clock::{Clock, SystemClock},
    error::{Error, Result},
    node_id::{MacAddressResolver, NodeId, NodeIdResolver},
    snowflake::{Snowflake, ELAPSED_MASK, MAX_SEQUENCE},
    time::UnixMillis,
};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU16, Ordering};
use tracing::{debug, warn};
use typed_builder::TypedBuilder;

/// Configures a snowflake generator instance.
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct GeneratorSettings {
    /// Zero point of the 42-bit elapsed-milliseconds field.
    ///
    /// Accepts a [`Timestamp`], raw Unix milliseconds, or a [`UnixMillis`].
    #[builder(setter(into))]
    pub epoch: UnixMillis,
    /// Explicit node id, reduced modulo 1024. When absent the generator asks
    /// its [`NodeIdResolver`].
    #[builder(default, setter(strip_option))]
    pub node_id: Option<u32>,
}

/// Per-call options for [`Generator::generate`].
#[derive(Debug, Clone, Copy, Default, TypedBuilder)]
pub struct GenerateOptions {
    /// Mint time; defaults to the generator clock's current time.
    #[builder(default, setter(strip_option, into))]
    pub timestamp: Option<UnixMillis>,
}

/// The fields of a snowflake, interpreted against a generator's epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeconstructedSnowflake {
    pub id: u64,
    /// Absolute mint time in Unix milliseconds.
    pub timestamp: i64,
    pub node_id: u16,
    pub seq: u16,
    pub epoch: i64,
}

impl DeconstructedSnowflake {
    fn new(id: Snowflake, epoch: UnixMillis) -> Self {
        Self {
            id: id.as_u64(),
            timestamp: (id.elapsed() as i64).wrapping_add(epoch.as_millis()),
            node_id: id.node_id().get(),
            seq: id.sequence(),
            epoch: epoch.as_millis(),
        }
    }

    /// Packs the fields back into the id they were read from.
    pub fn to_snowflake(&self) -> Snowflake {
        let elapsed = self.timestamp.wrapping_sub(self.epoch) as u64;
        Snowflake::from_parts(elapsed, NodeId::from(self.node_id), self.seq)
    }

    /// Mint time as a [`Timestamp`].
    pub fn created_at(&self) -> Result<Timestamp> {
        UnixMillis::new(self.timestamp).to_timestamp()
    }
}

/// Snowflake generator with a free-running 12-bit sequence.
///
/// The sequence is consumed once per id and is not tied to the millisecond:
/// ids stay unique as long as a single generator mints at most 4096 ids per
/// millisecond. Past that the counter wraps silently and ids can repeat.
/// Nothing blocks and nothing waits for the clock.
pub struct Generator<C: Clock = SystemClock> {
    epoch: UnixMillis,
    node_id: NodeId,
    clock: C,
    sequence: AtomicU16,
}

impl Generator<SystemClock> {
    /// Creates a generator backed by the system clock, deriving the node id
    /// from the host's MAC address when the settings carry none.
    pub fn new(settings: GeneratorSettings) -> Self {
        Self::with_resolver(settings, &MacAddressResolver)
    }

    /// Creates a generator backed by the system clock, asking `resolver` for
    /// the node id when the settings carry none.
    pub fn with_resolver<R: NodeIdResolver + ?Sized>(
        settings: GeneratorSettings,
        resolver: &R,
    ) -> Self {
        Self::with_clock(settings, resolver, SystemClock)
    }
}

impl<C: Clock> Generator<C> {
    pub fn with_clock<R: NodeIdResolver + ?Sized>(
        settings: GeneratorSettings,
        resolver: &R,
        clock: C,
    ) -> Self {
        let node_id = match settings.node_id {
            Some(raw) => NodeId::new(raw),
            None => resolve_node_id(resolver),
        };

        Self {
            epoch: settings.epoch,
            node_id,
            clock,
            sequence: AtomicU16::new(0),
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn epoch(&self) -> UnixMillis {
        self.epoch
    }

    /// Raw counter value the next id will read. May briefly be 4096, which
    /// the next call treats as a reset to 0.
    pub fn sequence(&self) -> u16 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// Mints an id and returns its decimal wire form.
    pub fn generate(&self, options: GenerateOptions) -> String {
        let timestamp = options
            .timestamp
            .unwrap_or_else(|| UnixMillis::from(self.clock.now()));
        self.next_id_at(timestamp).to_string()
    }

    /// Mints an id at the clock's current time.
    pub fn next_id(&self) -> Snowflake {
        self.next_id_at(self.clock.now())
    }

    /// Mints an id at `timestamp`.
    ///
    /// Timestamps before the epoch are not rejected: the negative offset is
    /// kept in two's complement and truncated to 42 bits, so the id decodes
    /// to a far-future time and sorts after every regular id. Deconstructing
    /// such an id does not give `timestamp` back; it reports
    /// `epoch + 2^42 - 1` for one millisecond before the epoch.
    pub fn next_id_at(&self, timestamp: impl Into<UnixMillis>) -> Snowflake {
        let timestamp = timestamp.into();
        let elapsed = timestamp.as_millis().wrapping_sub(self.epoch.as_millis());
        if elapsed < 0 {
            warn!(
                %timestamp,
                epoch = %self.epoch,
                "timestamp precedes the generator epoch; id will not sort by time"
            );
        } else if elapsed as u64 > ELAPSED_MASK {
            warn!(
                %timestamp,
                epoch = %self.epoch,
                "elapsed time overflows 42 bits; truncating"
            );
        }

        let sequence = self.next_sequence();
        Snowflake::from_parts(elapsed as u64, self.node_id, sequence)
    }

    /// Decodes `id` against this generator's epoch.
    ///
    /// Accepts a [`Snowflake`], a `u64`, or its decimal string form; strings
    /// that are not a base-10 `u64` fail with [`Error::InvalidIdentifier`].
    pub fn deconstruct<I>(&self, id: I) -> Result<DeconstructedSnowflake>
    where
        I: TryInto<Snowflake>,
        Error: From<I::Error>,
    {
        let id = id.try_into()?;
        Ok(DeconstructedSnowflake::new(id, self.epoch))
    }

    // Reads the counter and stores the successor in one step. A read above
    // MAX_SEQUENCE means the previous call handed out 4095, so this call
    // restarts at 0.
    fn next_sequence(&self) -> u16 {
        let previous = self
            .sequence
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                Some(if current > MAX_SEQUENCE { 1 } else { current + 1 })
            })
            .unwrap_or_else(|current| current);

        if previous > MAX_SEQUENCE {
            0
        } else {
            previous
        }
    }
}

fn resolve_node_id<R: NodeIdResolver + ?Sized>(resolver: &R) -> NodeId {
    match resolver.resolve() {
        Ok(node_id) => {
            debug!(%node_id, "resolved node id");
            node_id
        }
        Err(error) => {
            warn!(%error, "could not resolve node id; falling back to 0");
            NodeId::default()
        }
    }
}
