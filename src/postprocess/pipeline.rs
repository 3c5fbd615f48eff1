//! Capture post-processor: declutter-then-annotate, or raw pass-through.

use image::RgbImage;
use tracing::debug;

use super::annotate::{annotate, AnnotationSpec};
use super::catalog::RegionCatalog;
use super::declutter::declutter;
use super::Result;

/// Rendering switches supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Skip decluttering and annotation entirely; the capture is returned
    /// byte-identical.
    pub raw: bool,
}

impl RenderOptions {
    /// Options for an untouched capture.
    #[must_use]
    pub const fn raw() -> Self {
        Self { raw: true }
    }
}

/// Sequences the decluttering and annotation engines over one capture.
///
/// The processor owns a validated [`RegionCatalog`]; the same processor can
/// be reused across captures since each call receives and returns its own
/// bitmap.
#[derive(Debug, Clone)]
pub struct PostProcessor {
    catalog: RegionCatalog,
}

impl PostProcessor {
    /// Build a processor over an explicit catalog, rejecting malformed
    /// region bounds up front.
    pub fn new(catalog: RegionCatalog) -> Result<Self> {
        catalog.validate()?;
        Ok(Self { catalog })
    }

    /// Processor for the DS1000Z screen layout.
    #[must_use]
    pub fn ds1000z() -> Self {
        Self { catalog: RegionCatalog::ds1000z() }
    }

    /// The catalog this processor draws against.
    #[must_use]
    pub const fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    /// Run the pipeline over one captured bitmap.
    ///
    /// With `options.raw` the bitmap is returned unchanged. Otherwise the
    /// clutter regions are erased and the annotations drawn; the result is
    /// deterministic for identical inputs.
    pub fn process(
        &self,
        image: RgbImage,
        spec: &AnnotationSpec,
        options: &RenderOptions,
    ) -> Result<RgbImage> {
        if options.raw {
            debug!("raw mode, passing capture through unmodified");
            return Ok(image);
        }

        let mut image = image;
        declutter(&mut image, &self.catalog)?;
        annotate(&mut image, spec, &self.catalog)?;
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postprocess::annotate::{CHANNEL_COLORS, NOTE_COLOR, TIMESTAMP_COLOR};
    use crate::postprocess::catalog::{ANCHOR_LABELS, ANCHOR_NOTE, ANCHOR_TIMESTAMP};
    use chrono::{NaiveDate, NaiveDateTime};
    use image::Rgb;

    const GRAY: Rgb<u8> = Rgb([128, 128, 128]);

    fn gray_screen() -> RgbImage {
        RgbImage::from_pixel(800, 480, GRAY)
    }

    fn fixed_timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 4, 14)
            .unwrap()
            .and_hms_opt(9, 53, 13)
            .unwrap()
    }

    #[test]
    fn test_raw_mode_is_a_byte_identical_pass_through() {
        let processor = PostProcessor::ds1000z();
        let input = gray_screen();
        let spec = AnnotationSpec::at(fixed_timestamp()).with_note("ignored in raw mode");

        let output = processor
            .process(input.clone(), &spec, &RenderOptions::raw())
            .unwrap();
        assert_eq!(output.as_raw(), input.as_raw());
    }

    #[test]
    fn test_processing_is_deterministic() {
        let processor = PostProcessor::ds1000z();
        let spec = AnnotationSpec::at(fixed_timestamp())
            .with_note("repeatable")
            .with_label(1, "clk");

        let first = processor
            .process(gray_screen(), &spec, &RenderOptions::default())
            .unwrap();
        let second = processor
            .process(gray_screen(), &spec, &RenderOptions::default())
            .unwrap();
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn test_malformed_catalog_is_rejected_at_construction() {
        use crate::postprocess::catalog::Region;

        let result = RegionCatalog::new(
            800,
            480,
            Rgb([0, 0, 0]),
            vec![Region::clutter("oob", 0, 470, 10, 20)],
        )
        .and_then(PostProcessor::new);
        assert!(result.is_err());
    }

    // The worked example from the capture workflow: gray 800x480 screen,
    // note and CH1 label set, default options.
    #[test]
    fn test_full_pipeline_scenario() {
        let processor = PostProcessor::ds1000z();
        let catalog = processor.catalog().clone();
        let spec = AnnotationSpec::at(fixed_timestamp())
            .with_note("Test Capture")
            .with_label(1, "CH1");

        let input = gray_screen();
        let output = processor
            .process(input.clone(), &spec, &RenderOptions::default())
            .unwrap();

        // Clutter regions erased to the instrument background.
        for region in catalog.clutter_regions() {
            assert_eq!(*output.get_pixel(region.x + 1, region.y + 1), catalog.background());
        }

        // Timestamp, note, and CH1 label all present in their anchors.
        let has_color = |name: &'static str, color: Rgb<u8>| {
            let anchor = catalog.anchor(name).unwrap();
            output
                .enumerate_pixels()
                .any(|(x, y, p)| anchor.contains(x, y) && *p == color)
        };
        assert!(has_color(ANCHOR_TIMESTAMP, TIMESTAMP_COLOR));
        assert!(has_color(ANCHOR_NOTE, NOTE_COLOR));
        assert!(has_color(ANCHOR_LABELS[0], CHANNEL_COLORS[0]));

        // Trace-area pixels unchanged from the input.
        let untouched = |x: u32, y: u32| {
            let in_any_region = catalog.regions().iter().any(|r| r.contains(x, y));
            assert!(!in_any_region, "pick probe points outside all regions");
            assert_eq!(output.get_pixel(x, y), input.get_pixel(x, y));
        };
        untouched(400, 240);
        untouched(100, 100);
        untouched(650, 400);
    }
}
