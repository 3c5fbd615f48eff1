use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use scopegrab::postprocess::{AnnotationSpec, PostProcessor, RenderOptions};

use crate::OutputFormat;

#[allow(clippy::too_many_arguments)]
pub async fn cmd_screen(
    hostname: Option<&str>,
    filename: Option<&Path>,
    format: OutputFormat,
    note: Option<&str>,
    labels: [Option<&str>; 4],
    raw: bool,
    any_model: bool,
) -> Result<()> {
    let config = scopegrab::config::load()?;
    let host = super::resolve_hostname(hostname, &config)?;
    let (mut client, id) = super::connect_checked(&host, any_model).await?;

    let timestamp = Local::now().naive_local();

    eprintln!("📸 Receiving screen capture...");
    let png = client.screenshot().await.context("screen capture failed")?;
    let capture = image::load_from_memory(&png)
        .context("instrument sent an undecodable screen image")?
        .to_rgb8();

    let mut spec = AnnotationSpec::at(timestamp);
    if let Some(note) = note {
        spec = spec.with_note(note);
    }
    for (index, label) in labels.iter().enumerate() {
        if let Some(label) = label {
            spec = spec.with_label(index + 1, *label);
        }
    }

    let options = RenderOptions { raw };
    if raw {
        eprintln!("   Raw mode: keeping menus and skipping annotation");
    }

    let finished = PostProcessor::ds1000z().process(capture, &spec, &options)?;

    let path: PathBuf = match filename {
        Some(path) => path.to_path_buf(),
        None => scopegrab::output::build_filename(
            &config.save_dir(),
            &id.model,
            &timestamp,
            note,
            format.extension(),
        ),
    };
    finished
        .save(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    eprintln!("✅ Saved {}", path.display());
    Ok(())
}
