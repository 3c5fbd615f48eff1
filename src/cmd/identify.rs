use anyhow::{Context, Result};

use scopegrab::ScpiClient;

pub async fn cmd_identify(hostname: Option<&str>) -> Result<()> {
    let config = scopegrab::config::load()?;
    let host = super::resolve_hostname(hostname, &config)?;

    eprintln!("🔌 Connecting to {host}...");
    let mut client = ScpiClient::connect(&host).await?;
    let id = client.identify().await.context("instrument identification failed")?;

    println!("Company:  {}", id.company);
    println!("Model:    {}", id.model);
    println!("Serial:   {}", id.serial);
    println!("Firmware: {}", id.firmware);

    if let Ok(depth) = client.memory_depth().await {
        println!("Memory:   {depth} samples");
    }

    if !id.is_ds1000z() {
        eprintln!("⚠️  Not a DS1000Z-series scope; screen capture needs --any-model");
    }
    Ok(())
}
