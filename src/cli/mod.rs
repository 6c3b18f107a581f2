//! CLI module for keyed-filter
//!
//! Provides subcommands for working with cache keys:
//! - `inspect`: show hash, fingerprint and text decoding of a key

pub mod inspect;

use clap::{Parser, Subcommand};

/// keyed-filter - content-addressed cache keys for search filters
#[derive(Parser)]
#[command(name = "keyed-filter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Inspect a cache key built from text or hex bytes
    Inspect(inspect::InspectArgs),
}
