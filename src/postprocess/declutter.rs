//! Decluttering engine: erase instrument chrome from a captured screen.

use image::{Rgb, RgbImage};
use tracing::debug;

use super::catalog::{Region, RegionCatalog};
use super::Result;

/// Overwrite every clutter region with the catalog's background color.
///
/// Pixels outside declared clutter regions are never touched, so the trace
/// area survives unchanged. Filling an already-erased region is a no-op,
/// which makes the pass idempotent.
///
/// # Errors
///
/// [`PostProcessError::RegionOutOfBounds`](super::PostProcessError::RegionOutOfBounds)
/// for a malformed catalog, or
/// [`PostProcessError::ResolutionMismatch`](super::PostProcessError::ResolutionMismatch)
/// when the bitmap does not match the catalog's expected resolution.
pub fn declutter(image: &mut RgbImage, catalog: &RegionCatalog) -> Result<()> {
    catalog.validate()?;
    catalog.check_dimensions(image)?;

    for region in catalog.clutter_regions() {
        debug!(
            region = region.name,
            x = region.x,
            y = region.y,
            width = region.width,
            height = region.height,
            "erasing clutter region"
        );
        fill_region(image, region, catalog.background());
    }
    Ok(())
}

fn fill_region(image: &mut RgbImage, region: &Region, fill: Rgb<u8>) {
    for y in region.y..region.bottom() {
        for x in region.x..region.right() {
            image.put_pixel(x, y, fill);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postprocess::PostProcessError;

    const GRAY: Rgb<u8> = Rgb([128, 128, 128]);

    fn gray_screen() -> RgbImage {
        RgbImage::from_pixel(800, 480, GRAY)
    }

    #[test]
    fn test_clutter_regions_are_filled_with_background() {
        let catalog = RegionCatalog::ds1000z();
        let mut image = gray_screen();
        declutter(&mut image, &catalog).unwrap();

        for region in catalog.clutter_regions() {
            assert_eq!(
                *image.get_pixel(region.x, region.y),
                catalog.background(),
                "region {} not filled",
                region.name
            );
            assert_eq!(
                *image.get_pixel(region.right() - 1, region.bottom() - 1),
                catalog.background()
            );
        }
    }

    #[test]
    fn test_pixels_outside_regions_are_untouched() {
        let catalog = RegionCatalog::ds1000z();
        let original = gray_screen();
        let mut image = original.clone();
        declutter(&mut image, &catalog).unwrap();

        for (x, y, pixel) in image.enumerate_pixels() {
            let in_clutter = catalog.clutter_regions().any(|r| r.contains(x, y));
            if !in_clutter {
                assert_eq!(pixel, original.get_pixel(x, y), "pixel changed at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_declutter_is_idempotent() {
        let catalog = RegionCatalog::ds1000z();
        let mut once = gray_screen();
        declutter(&mut once, &catalog).unwrap();

        let mut twice = once.clone();
        declutter(&mut twice, &catalog).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_wrong_resolution_is_rejected() {
        let catalog = RegionCatalog::ds1000z();
        let mut image = RgbImage::new(1024, 600);
        assert!(matches!(
            declutter(&mut image, &catalog),
            Err(PostProcessError::ResolutionMismatch { .. })
        ));
    }
}
