//! Screenshot post-processing pipeline
//!
//! Turns a raw screen capture into a finished image:
//! - **Region catalog** - named clutter/anchor rectangles for one screen layout
//! - **Decluttering** - erase menus, logo, and status icons
//! - **Annotation** - timestamp, optional note, optional channel labels
//! - **Raw mode** - byte-identical pass-through when requested
//!
//! # Example
//!
//! ```rust
//! use scopegrab::postprocess::{AnnotationSpec, PostProcessor, RenderOptions};
//!
//! let processor = PostProcessor::ds1000z();
//! let capture = image::RgbImage::new(800, 480);
//! let spec = AnnotationSpec::now().with_note("bring-up test");
//! let finished = processor.process(capture, &spec, &RenderOptions::default())?;
//! # let _ = finished;
//! # Ok::<(), scopegrab::postprocess::PostProcessError>(())
//! ```

pub mod annotate;
pub mod catalog;
pub mod declutter;
pub mod font;
pub mod pipeline;

use thiserror::Error;

pub use annotate::{annotate, AnnotationSpec, CHANNEL_COLORS, NOTE_COLOR, TIMESTAMP_COLOR};
pub use catalog::{Region, RegionCatalog, RegionKind, ANCHOR_LABELS, ANCHOR_NOTE, ANCHOR_TIMESTAMP};
pub use declutter::declutter;
pub use font::Font;
pub use pipeline::{PostProcessor, RenderOptions};

/// Post-processing errors.
///
/// Configuration defects (bad region bounds, missing anchors) and input
/// defects (wrong bitmap resolution) both fail hard; nothing here is
/// retried or papered over, since drawing at wrong offsets would silently
/// corrupt the trace area.
#[derive(Error, Debug)]
pub enum PostProcessError {
    #[error("region '{name}' exceeds the {width}x{height} screen bounds")]
    RegionOutOfBounds { name: String, width: u32, height: u32 },

    #[error("catalog has no '{0}' anchor")]
    MissingAnchor(&'static str),

    #[error("bitmap is {got_width}x{got_height} but the catalog expects {want_width}x{want_height}")]
    ResolutionMismatch {
        got_width: u32,
        got_height: u32,
        want_width: u32,
        want_height: u32,
    },
}

pub type Result<T> = std::result::Result<T, PostProcessError>;
