//! Region catalog: named pixel rectangles on the captured screen.
//!
//! The catalog is plain immutable data describing one instrument model's
//! fixed screen layout — which rectangles hold menu/status chrome to erase,
//! and which rectangles annotations are drawn into. It is passed into the
//! engines explicitly so a future model with a different layout only needs
//! a different catalog, not different engine code.

use image::{Rgb, RgbImage};

use super::{PostProcessError, Result};

/// Anchor name for the always-drawn timestamp (top-left).
pub const ANCHOR_TIMESTAMP: &str = "timestamp";
/// Anchor name for the optional note (top-center).
pub const ANCHOR_NOTE: &str = "note";
/// Anchor names for the four channel labels, in channel order.
pub const ANCHOR_LABELS: [&str; 4] = ["label1", "label2", "label3", "label4"];

/// What a region means on the captured screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// Instrument chrome to erase (menus, logo, status icons).
    Clutter,
    /// Drawing target for one annotation string.
    Anchor,
}

/// A named rectangle on the captured bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub kind: RegionKind,
}

impl Region {
    #[must_use]
    pub const fn clutter(name: &'static str, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { name, x, y, width, height, kind: RegionKind::Clutter }
    }

    #[must_use]
    pub const fn anchor(name: &'static str, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { name, x, y, width, height, kind: RegionKind::Anchor }
    }

    /// One past the rightmost column.
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// One past the bottom row.
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Whether the pixel at (`x`, `y`) falls inside this region.
    #[must_use]
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Immutable screen layout for one instrument model: expected resolution,
/// background fill color, and all clutter/anchor regions.
#[derive(Debug, Clone)]
pub struct RegionCatalog {
    width: u32,
    height: u32,
    background: Rgb<u8>,
    regions: Vec<Region>,
}

impl RegionCatalog {
    /// Build a catalog from explicit regions, rejecting any region that
    /// exceeds the screen bounds.
    pub fn new(width: u32, height: u32, background: Rgb<u8>, regions: Vec<Region>) -> Result<Self> {
        let catalog = Self { width, height, background, regions };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Screen layout of the DS1000Z series (800x480, black background).
    ///
    /// Clutter rectangles match the chrome the instrument draws: the vendor
    /// logo, both on-screen menus, the right menu's tab title, and the
    /// speaker icon in the lower-right status corner. The timestamp anchor
    /// sits inside the erased logo box; the note anchor uses the free
    /// top-center strip; label anchors sit over the per-channel legend
    /// boxes in the bottom status bar.
    #[must_use]
    pub fn ds1000z() -> Self {
        Self {
            width: 800,
            height: 480,
            background: Rgb([0, 0, 0]),
            regions: vec![
                Region::clutter("logo", 3, 8, 78, 21),
                Region::clutter("left_menu", 0, 37, 60, 414),
                Region::clutter("right_menu", 705, 38, 95, 399),
                Region::clutter("right_menu_tab", 690, 39, 15, 79),
                Region::clutter("speaker_icon", 762, 456, 38, 24),
                Region::anchor(ANCHOR_TIMESTAMP, 4, 9, 62, 19),
                Region::anchor(ANCHOR_NOTE, 300, 9, 240, 16),
                Region::anchor(ANCHOR_LABELS[0], 64, 456, 96, 16),
                Region::anchor(ANCHOR_LABELS[1], 164, 456, 96, 16),
                Region::anchor(ANCHOR_LABELS[2], 264, 456, 96, 16),
                Region::anchor(ANCHOR_LABELS[3], 364, 456, 96, 16),
            ],
        }
    }

    /// Expected bitmap width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Expected bitmap height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Neutral fill used when erasing clutter regions.
    #[must_use]
    pub const fn background(&self) -> Rgb<u8> {
        self.background
    }

    /// All regions, clutter and anchors alike.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Clutter regions only, in declaration order.
    pub fn clutter_regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(|r| r.kind == RegionKind::Clutter)
    }

    /// Look up an anchor region by name.
    ///
    /// # Errors
    ///
    /// [`PostProcessError::MissingAnchor`] if the catalog has no anchor of
    /// that name — a catalog defect, surfaced instead of skipping the
    /// annotation silently.
    pub fn anchor(&self, name: &'static str) -> Result<&Region> {
        self.regions
            .iter()
            .find(|r| r.kind == RegionKind::Anchor && r.name == name)
            .ok_or(PostProcessError::MissingAnchor(name))
    }

    /// Check every region against the screen bounds.
    pub fn validate(&self) -> Result<()> {
        for region in &self.regions {
            let fits = region.width > 0
                && region.height > 0
                && region.right() <= self.width
                && region.bottom() <= self.height;
            if !fits {
                return Err(PostProcessError::RegionOutOfBounds {
                    name: region.name.to_string(),
                    width: self.width,
                    height: self.height,
                });
            }
        }
        Ok(())
    }

    /// Refuse bitmaps whose resolution differs from the catalog's.
    ///
    /// Drawing at wrong offsets would silently corrupt the trace area, so a
    /// mismatch is a hard stop.
    pub fn check_dimensions(&self, image: &RgbImage) -> Result<()> {
        let (got_width, got_height) = image.dimensions();
        if (got_width, got_height) == (self.width, self.height) {
            Ok(())
        } else {
            Err(PostProcessError::ResolutionMismatch {
                got_width,
                got_height,
                want_width: self.width,
                want_height: self.height,
            })
        }
    }
}
