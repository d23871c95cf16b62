use clap::{Parser, Subcommand, ValueEnum};
use flurry_snowflake::UnixMillis;
use std::fmt::{Display, Formatter};

pub const EPOCH_ENV: &str = "FLURRY_EPOCH";
pub const NODE_ID_ENV: &str = "FLURRY_NODE_ID";
pub const LOG_FORMAT_ENV: &str = "FLURRY_LOG_FORMAT";

/// 2015-01-01T00:00:00Z
pub const DEFAULT_EPOCH: &str = "1420070400000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormatArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormatArg::Text => write!(f, "text"),
            LogFormatArg::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "flurry", about = "Generate and decode snowflake ids")]
pub struct CLI {
    /// Epoch as Unix milliseconds or an RFC 3339 timestamp.
    #[arg(long, env = EPOCH_ENV, default_value = DEFAULT_EPOCH, global = true)]
    pub epoch: UnixMillis,

    /// Node id, reduced modulo 1024. Derived from the host MAC address when unset.
    #[arg(long, env = NODE_ID_ENV, global = true)]
    pub node_id: Option<u32>,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Text,
        global = true
    )]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print new ids, one per line.
    Generate {
        #[arg(long, default_value_t = 1)]
        count: u32,
        /// Mint time as Unix milliseconds or an RFC 3339 timestamp. Defaults to now.
        #[arg(long)]
        timestamp: Option<UnixMillis>,
    },
    /// Print the fields of each id as a JSON object.
    Deconstruct {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Print the node id this configuration resolves to.
    NodeId,
}
