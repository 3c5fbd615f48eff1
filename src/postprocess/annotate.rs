//! Annotation engine: draw timestamp, note, and channel labels onto a
//! decluttered screen capture.
//!
//! All text uses the fixed built-in typeface. Every string is clipped to its
//! own anchor box, so annotations can never spill into the trace area. When
//! two annotations are configured onto overlapping anchors, the one drawn
//! later simply lands on top — there is no automatic repositioning.

use chrono::{Local, NaiveDateTime};
use image::{Rgb, RgbImage};
use tracing::debug;

use super::catalog::{RegionCatalog, ANCHOR_LABELS, ANCHOR_NOTE, ANCHOR_TIMESTAMP};
use super::font::Font;
use super::Result;

/// Timestamp text color (white on the black instrument background).
pub const TIMESTAMP_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
/// Note text color (light gray).
pub const NOTE_COLOR: Rgb<u8> = Rgb([0xB0, 0xB0, 0xB0]);
/// Label colors matching the instrument's channel trace colors:
/// CH1 yellow, CH2 cyan, CH3 magenta, CH4 blue.
pub const CHANNEL_COLORS: [Rgb<u8>; 4] = [
    Rgb([0xF7, 0xFA, 0x52]),
    Rgb([0x00, 0xE1, 0xDD]),
    Rgb([0xDD, 0x00, 0xDD]),
    Rgb([0x00, 0x7F, 0xF5]),
];

/// Typeface scale for the two-line timestamp, sized to fit the erased logo box.
const TIMESTAMP_FONT: Font = Font::with_scale(1);
/// Typeface scale for the note and channel labels.
const LABEL_FONT: Font = Font::with_scale(2);

/// The annotation strings for one capture.
///
/// The timestamp is always drawn; every other field only produces a drawing
/// operation when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationSpec {
    /// Wall-clock time of the capture moment.
    pub timestamp: NaiveDateTime,
    /// Free-form note, drawn top-center.
    pub note: Option<String>,
    /// Per-channel labels, drawn near each channel's legend position.
    pub labels: [Option<String>; 4],
}

impl AnnotationSpec {
    /// Spec with only the mandatory timestamp.
    #[must_use]
    pub fn at(timestamp: NaiveDateTime) -> Self {
        Self { timestamp, note: None, labels: [None, None, None, None] }
    }

    /// Spec timestamped with the current local wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        Self::at(Local::now().naive_local())
    }

    /// Attach a note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Attach a label for `channel` (1-4). Out-of-range channels are ignored.
    #[must_use]
    pub fn with_label(mut self, channel: usize, label: impl Into<String>) -> Self {
        if (1..=4).contains(&channel) {
            self.labels[channel - 1] = Some(label.into());
        }
        self
    }
}

/// Draw every configured annotation onto the bitmap.
///
/// # Errors
///
/// Fails fast on a malformed or incomplete catalog
/// ([`RegionOutOfBounds`](super::PostProcessError::RegionOutOfBounds),
/// [`MissingAnchor`](super::PostProcessError::MissingAnchor)) and on a
/// bitmap whose resolution does not match the catalog
/// ([`ResolutionMismatch`](super::PostProcessError::ResolutionMismatch)).
pub fn annotate(image: &mut RgbImage, spec: &AnnotationSpec, catalog: &RegionCatalog) -> Result<()> {
    catalog.validate()?;
    catalog.check_dimensions(image)?;

    draw_timestamp(image, spec.timestamp, catalog)?;

    if let Some(ref note) = spec.note {
        let anchor = catalog.anchor(ANCHOR_NOTE)?;
        debug!(%note, "drawing note annotation");
        LABEL_FONT.draw_text(
            image,
            (anchor.x, anchor.y),
            (anchor.x, anchor.y, anchor.width, anchor.height),
            note,
            NOTE_COLOR,
        );
    }

    for (index, label) in spec.labels.iter().enumerate() {
        let Some(label) = label else { continue };
        let anchor = catalog.anchor(ANCHOR_LABELS[index])?;
        let text = format!("CH{}: {label}", index + 1);
        debug!(channel = index + 1, %label, "drawing channel label");
        LABEL_FONT.draw_text(
            image,
            (anchor.x, anchor.y),
            (anchor.x, anchor.y, anchor.width, anchor.height),
            &text,
            CHANNEL_COLORS[index],
        );
    }

    Ok(())
}

/// The timestamp goes where the vendor logo used to be, split over two
/// lines (date above time) to fit the narrow box.
fn draw_timestamp(image: &mut RgbImage, timestamp: NaiveDateTime, catalog: &RegionCatalog) -> Result<()> {
    let anchor = catalog.anchor(ANCHOR_TIMESTAMP)?;
    let clip = (anchor.x, anchor.y, anchor.width, anchor.height);

    let date = timestamp.format("%Y-%m-%d").to_string();
    let time = timestamp.format("%H:%M:%S").to_string();
    debug!(%date, %time, "drawing timestamp");

    TIMESTAMP_FONT.draw_text(image, (anchor.x, anchor.y), clip, &date, TIMESTAMP_COLOR);
    TIMESTAMP_FONT.draw_text(
        image,
        (anchor.x, anchor.y + TIMESTAMP_FONT.line_height()),
        clip,
        &time,
        TIMESTAMP_COLOR,
    );
    Ok(())
}
