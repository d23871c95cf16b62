mod cli;

use crate::cli::{Command, LogFormatArg, CLI};
use clap::Parser;
use flurry_snowflake::{GenerateOptions, Generator, GeneratorSettings};
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CLI::parse();
    init_tracing(config.log_format);

    info!(
        epoch = %config.epoch,
        node_id = ?config.node_id,
        "starting snowflake generator"
    );

    let generator = Generator::new(GeneratorSettings {
        epoch: config.epoch,
        node_id: config.node_id,
    });

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match config.command {
        Command::Generate { count, timestamp } => {
            let options = GenerateOptions { timestamp };
            for _ in 0..count {
                writeln!(out, "{}", generator.generate(options))?;
            }
        }
        Command::Deconstruct { ids } => {
            for id in ids {
                let parts = generator.deconstruct(id.as_str())?;
                writeln!(out, "{}", serde_json::to_string(&parts)?)?;
            }
        }
        Command::NodeId => {
            writeln!(out, "{}", generator.node_id())?;
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only ids.
fn init_tracing(format: LogFormatArg) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    match format {
        LogFormatArg::Text => subscriber.init(),
        LogFormatArg::Json => subscriber.json().init(),
    }
}
