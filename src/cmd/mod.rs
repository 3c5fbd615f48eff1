//! CLI subcommand implementations.

pub mod identify;
pub mod screen;
pub mod waveform;

use anyhow::{bail, Context, Result};
use scopegrab::config::Config;
use scopegrab::{InstrumentId, ScpiClient};

/// Resolve the target hostname from the argument or the config default.
pub fn resolve_hostname(arg: Option<&str>, config: &Config) -> Result<String> {
    match arg {
        Some(host) if host != "default" => Ok(host.to_string()),
        _ => config
            .default_hostname
            .clone()
            .context("no hostname given and no default_hostname in config.toml"),
    }
}

/// Connect and identify, refusing unrecognized models unless overridden.
pub async fn connect_checked(host: &str, any_model: bool) -> Result<(ScpiClient, InstrumentId)> {
    eprintln!("🔌 Connecting to {host}...");
    let mut client = ScpiClient::connect(host)
        .await
        .with_context(|| format!("failed to connect to {host}:{}", scopegrab::instrument::SCPI_PORT))?;

    let id = client.identify().await.context("instrument identification failed")?;
    eprintln!("🔬 Instrument: {} {} (firmware {})", id.company, id.model, id.firmware);

    if !id.is_ds1000z() {
        if any_model {
            eprintln!("⚠️  Not a DS1000Z-series scope; continuing because --any-model is set");
        } else {
            bail!(
                "found \"{}\" from \"{}\", not a DS1000Z-series scope; \
                 pass --any-model to capture anyway",
                id.model,
                id.company
            );
        }
    }

    Ok((client, id))
}
