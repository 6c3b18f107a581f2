//! Inspect command - prints the identity of a cache key

use clap::{ArgGroup, Args};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::domain::{CacheKey, DomainError};
use crate::infrastructure::logging;

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["text", "hex"])))]
pub struct InspectArgs {
    /// Key text, encoded as UTF-8
    #[arg(long)]
    pub text: Option<String>,

    /// Key bytes as a hex string
    #[arg(long)]
    pub hex: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Summary of a cache key
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct KeyReport {
    pub len: usize,
    pub hash: String,
    pub fingerprint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decode_error: Option<String>,
}

impl KeyReport {
    pub fn new(key: &CacheKey, fingerprint_len: usize) -> Self {
        let (text, decode_error) = match key.utf8_to_string() {
            Ok(text) => (Some(text), None),
            Err(e) => (None, Some(e.to_string())),
        };

        Self {
            len: key.len(),
            hash: format!("{:016x}", key.hash_value()),
            fingerprint: key.short_fingerprint(fingerprint_len),
            text,
            decode_error,
        }
    }

    pub fn render(&self) -> String {
        let mut lines = vec![
            format!("length:      {}", self.len),
            format!("hash:        {}", self.hash),
            format!("fingerprint: {}", self.fingerprint),
        ];

        match (&self.text, &self.decode_error) {
            (Some(text), _) => lines.push(format!("text:        {:?}", text)),
            (None, Some(error)) => lines.push(format!("text:        <{}>", error)),
            (None, None) => {}
        }

        lines.join("\n")
    }
}

/// Builds the key described by the arguments
pub fn build_key(args: &InspectArgs) -> Result<CacheKey, DomainError> {
    match (&args.text, &args.hex) {
        (Some(text), _) => Ok(CacheKey::from(text.as_str())),
        (None, Some(hex)) => {
            let bytes = hex::decode(hex.trim())
                .map_err(|e| DomainError::decoding(format!("Invalid hex input: {}", e)))?;
            Ok(CacheKey::from(bytes))
        }
        (None, None) => Err(DomainError::configuration(
            "Either --text or --hex is required",
        )),
    }
}

fn logging_config(config: &AppConfig) -> logging::LoggingConfig {
    logging::LoggingConfig {
        level: config.logging.level.clone(),
        format: config.logging.format.clone(),
    }
}

/// Run the inspect command
pub async fn run(args: InspectArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    logging::init_logging(&logging_config(&config));

    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load configuration, using defaults");
    }

    let key = build_key(&args)?;
    debug!(len = key.len(), "Built cache key");

    let report = KeyReport::new(&key, config.keys.fingerprint_len());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.render());
    }

    Ok(())
}
