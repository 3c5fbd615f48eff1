//! `scopegrab` - LAN screen capture for Rigol DS1000Z-series oscilloscopes
//!
//! # Features
//!
//! - **Screen capture**: fetch the display over SCPI-on-LAN as PNG/BMP/JPEG
//! - **Decluttering**: erase the on-screen menus, logo, and status icons
//! - **Annotation**: timestamp, free-form note, and per-channel labels
//! - **Waveform export**: displayed channel data merged into one CSV table
//!
//! # Example
//!
//! ```rust,no_run
//! use scopegrab::postprocess::{AnnotationSpec, PostProcessor, RenderOptions};
//! use scopegrab::ScpiClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut scope = ScpiClient::connect("192.168.1.23").await?;
//!     let png = scope.screenshot().await?;
//!
//!     let capture = image::load_from_memory(&png)?.to_rgb8();
//!     let spec = AnnotationSpec::now().with_note("power-on ripple");
//!     let finished =
//!         PostProcessor::ds1000z().process(capture, &spec, &RenderOptions::default())?;
//!     finished.save("ripple.png")?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod instrument;
pub mod output;
pub mod postprocess;
pub mod waveform;

pub use instrument::{Channel, InstrumentError, InstrumentId, ScpiClient};
pub use postprocess::{
    AnnotationSpec, PostProcessError, PostProcessor, Region, RegionCatalog, RegionKind,
    RenderOptions,
};
pub use waveform::ChannelData;

/// Version of scopegrab
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
