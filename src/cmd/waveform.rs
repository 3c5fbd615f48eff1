use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Local;

use scopegrab::waveform::{to_csv, ChannelData};

pub async fn cmd_waveform(
    hostname: Option<&str>,
    filename: Option<&Path>,
    any_model: bool,
) -> Result<()> {
    let config = scopegrab::config::load()?;
    let host = super::resolve_hostname(hostname, &config)?;
    let (mut client, id) = super::connect_checked(&host, any_model).await?;

    let timestamp = Local::now().naive_local();

    let displayed = client.displayed_channels().await?;
    if displayed.is_empty() {
        bail!("no channels are displayed on the instrument");
    }

    client.prepare_waveform_read().await?;

    let mut channels = Vec::with_capacity(displayed.len());
    for channel in displayed {
        eprintln!("📈 {channel}: receiving displayed points...");
        let points = client
            .waveform_points(channel)
            .await
            .with_context(|| format!("waveform read failed for {channel}"))?;
        eprintln!("   {} points", points.len());
        channels.push(ChannelData::new(channel, points));
    }

    let csv = to_csv(&channels);
    let path: PathBuf = match filename {
        Some(path) => path.to_path_buf(),
        None => scopegrab::output::build_filename(
            &config.save_dir(),
            &id.model,
            &timestamp,
            None,
            "csv",
        ),
    };
    std::fs::write(&path, csv).with_context(|| format!("failed to write {}", path.display()))?;

    eprintln!("✅ Saved {}", path.display());
    Ok(())
}
