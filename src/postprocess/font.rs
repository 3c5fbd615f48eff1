//! Fixed 5x7 monospace typeface for screenshot annotation.
//!
//! The glyph table is compiled into the binary, so the annotation engine can
//! never fail to load its typeface at runtime. Glyphs cover printable ASCII
//! (32..=126); anything else renders as a filled fallback block.

use image::{Rgb, RgbImage};

/// Unscaled glyph width in pixels.
pub const GLYPH_WIDTH: u32 = 5;
/// Unscaled glyph height in pixels.
pub const GLYPH_HEIGHT: u32 = 7;

/// Horizontal gap between glyphs, in unscaled pixels.
const GLYPH_SPACING: u32 = 1;
/// Vertical gap between lines, in unscaled pixels.
const LINE_SPACING: u32 = 2;

/// Rendered for characters outside the table's ASCII range.
const FALLBACK_GLYPH: [u8; 7] = [0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F];

/// The fixed annotation typeface at an integer pixel scale.
///
/// Scale 1 draws 5x7 glyphs; scale 2 draws 10x14, and so on. One `Font`
/// value is cheap to copy and carries no heap state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    scale: u32,
}

impl Font {
    /// Create a font at the given integer scale (clamped to at least 1).
    #[must_use]
    pub const fn with_scale(scale: u32) -> Self {
        Self {
            scale: if scale == 0 { 1 } else { scale },
        }
    }

    /// Horizontal distance from one glyph origin to the next.
    #[must_use]
    pub const fn advance(&self) -> u32 {
        (GLYPH_WIDTH + GLYPH_SPACING) * self.scale
    }

    /// Vertical distance from one text line origin to the next.
    #[must_use]
    pub const fn line_height(&self) -> u32 {
        (GLYPH_HEIGHT + LINE_SPACING) * self.scale
    }

    /// Rendered height of a single line of glyphs.
    #[must_use]
    pub const fn glyph_height(&self) -> u32 {
        GLYPH_HEIGHT * self.scale
    }

    /// Width in pixels of `text` rendered on one line.
    #[must_use]
    pub fn text_width(&self, text: &str) -> u32 {
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        if chars == 0 {
            0
        } else {
            chars * self.advance() - GLYPH_SPACING * self.scale
        }
    }

    /// Draw one line of text with its top-left corner at `origin`, writing
    /// only pixels inside the `clip` rectangle (x, y, width, height).
    ///
    /// Pixels that fall outside `clip` or outside the image are dropped, so
    /// overlong strings are truncated at the clip edge instead of spilling
    /// into neighbouring screen areas.
    pub fn draw_text(
        &self,
        image: &mut RgbImage,
        origin: (u32, u32),
        clip: (u32, u32, u32, u32),
        text: &str,
        color: Rgb<u8>,
    ) {
        let (img_w, img_h) = image.dimensions();
        let (clip_x, clip_y, clip_w, clip_h) = clip;
        let clip_right = clip_x.saturating_add(clip_w).min(img_w);
        let clip_bottom = clip_y.saturating_add(clip_h).min(img_h);

        let mut pen_x = origin.0;
        for ch in text.chars() {
            if pen_x >= clip_right {
                break;
            }
            self.draw_glyph(image, ch, pen_x, origin.1, (clip_x, clip_y, clip_right, clip_bottom), color);
            pen_x = pen_x.saturating_add(self.advance());
        }
    }

    fn draw_glyph(
        &self,
        image: &mut RgbImage,
        ch: char,
        x: u32,
        y: u32,
        clip: (u32, u32, u32, u32),
        color: Rgb<u8>,
    ) {
        let glyph = glyph_rows(ch);
        let (clip_x, clip_y, clip_right, clip_bottom) = clip;
        for (row, &bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (0x10 >> col) == 0 {
                    continue;
                }
                // Each font pixel becomes a scale x scale block.
                for sy in 0..self.scale {
                    for sx in 0..self.scale {
                        let px = x + col * self.scale + sx;
                        let py = y + row as u32 * self.scale + sy;
                        if px >= clip_x && px < clip_right && py >= clip_y && py < clip_bottom {
                            image.put_pixel(px, py, color);
                        }
                    }
                }
            }
        }
    }
}

fn glyph_rows(ch: char) -> &'static [u8; 7] {
    let code = ch as u32;
    if (32..=126).contains(&code) {
        &GLYPHS[(code - 32) as usize]
    } else {
        &FALLBACK_GLYPH
    }
}

/// Printable ASCII, 5 bits per row, MSB-first from the left pixel column.
const GLYPHS: [[u8; 7]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // 32 ' '
    [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04], // 33 '!'
    [0x0A, 0x0A, 0x0A, 0x00, 0x00, 0x00, 0x00], // 34 '"'
    [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A], // 35 '#'
    [0x04, 0x0F, 0x14, 0x0E, 0x05, 0x1E, 0x04], // 36 '$'
    [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03], // 37 '%'
    [0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D], // 38 '&'
    [0x04, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00], // 39 '''
    [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02], // 40 '('
    [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08], // 41 ')'
    [0x00, 0x04, 0x15, 0x0E, 0x15, 0x04, 0x00], // 42 '*'
    [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00], // 43 '+'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x08], // 44 ','
    [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00], // 45 '-'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04], // 46 '.'
    [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00], // 47 '/'
    [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E], // 48 '0'
    [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E], // 49 '1'
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F], // 50 '2'
    [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E], // 51 '3'
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02], // 52 '4'
    [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E], // 53 '5'
    [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E], // 54 '6'
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08], // 55 '7'
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E], // 56 '8'
    [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C], // 57 '9'
    [0x00, 0x00, 0x04, 0x00, 0x00, 0x04, 0x00], // 58 ':'
    [0x00, 0x00, 0x04, 0x00, 0x00, 0x04, 0x08], // 59 ';'
    [0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02], // 60 '<'
    [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00], // 61 '='
    [0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08], // 62 '>'
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04], // 63 '?'
    [0x0E, 0x11, 0x17, 0x15, 0x17, 0x10, 0x0E], // 64 '@'
    [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // 65 'A'
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E], // 66 'B'
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E], // 67 'C'
    [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C], // 68 'D'
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F], // 69 'E'
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10], // 70 'F'
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F], // 71 'G'
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // 72 'H'
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // 73 'I'
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C], // 74 'J'
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11], // 75 'K'
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F], // 76 'L'
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11], // 77 'M'
    [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11], // 78 'N'
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // 79 'O'
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10], // 80 'P'
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D], // 81 'Q'
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11], // 82 'R'
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E], // 83 'S'
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // 84 'T'
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // 85 'U'
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04], // 86 'V'
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x1B, 0x11], // 87 'W'
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11], // 88 'X'
    [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04], // 89 'Y'
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F], // 90 'Z'
    [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E], // 91 '['
    [0x00, 0x10, 0x08, 0x04, 0x02, 0x01, 0x00], // 92 '\'
    [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E], // 93 ']'
    [0x04, 0x0A, 0x11, 0x00, 0x00, 0x00, 0x00], // 94 '^'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F], // 95 '_'
    [0x08, 0x04, 0x02, 0x00, 0x00, 0x00, 0x00], // 96 '`'
    [0x00, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F], // 97 'a'
    [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x1E], // 98 'b'
    [0x00, 0x00, 0x0E, 0x10, 0x10, 0x11, 0x0E], // 99 'c'
    [0x01, 0x01, 0x0D, 0x13, 0x11, 0x11, 0x0F], // 100 'd'
    [0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E], // 101 'e'
    [0x06, 0x09, 0x08, 0x1C, 0x08, 0x08, 0x08], // 102 'f'
    [0x00, 0x00, 0x0F, 0x11, 0x0F, 0x01, 0x0E], // 103 'g'
    [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x11], // 104 'h'
    [0x04, 0x00, 0x0C, 0x04, 0x04, 0x04, 0x0E], // 105 'i'
    [0x02, 0x00, 0x06, 0x02, 0x02, 0x12, 0x0C], // 106 'j'
    [0x10, 0x10, 0x12, 0x14, 0x18, 0x14, 0x12], // 107 'k'
    [0x0C, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // 108 'l'
    [0x00, 0x00, 0x1A, 0x15, 0x15, 0x11, 0x11], // 109 'm'
    [0x00, 0x00, 0x16, 0x19, 0x11, 0x11, 0x11], // 110 'n'
    [0x00, 0x00, 0x0E, 0x11, 0x11, 0x11, 0x0E], // 111 'o'
    [0x00, 0x00, 0x1E, 0x11, 0x1E, 0x10, 0x10], // 112 'p'
    [0x00, 0x00, 0x0D, 0x13, 0x0F, 0x01, 0x01], // 113 'q'
    [0x00, 0x00, 0x16, 0x19, 0x10, 0x10, 0x10], // 114 'r'
    [0x00, 0x00, 0x0E, 0x10, 0x0E, 0x01, 0x1E], // 115 's'
    [0x08, 0x08, 0x1C, 0x08, 0x08, 0x09, 0x06], // 116 't'
    [0x00, 0x00, 0x11, 0x11, 0x11, 0x13, 0x0D], // 117 'u'
    [0x00, 0x00, 0x11, 0x11, 0x11, 0x0A, 0x04], // 118 'v'
    [0x00, 0x00, 0x11, 0x11, 0x15, 0x15, 0x0A], // 119 'w'
    [0x00, 0x00, 0x11, 0x0A, 0x04, 0x0A, 0x11], // 120 'x'
    [0x00, 0x00, 0x11, 0x11, 0x0F, 0x01, 0x0E], // 121 'y'
    [0x00, 0x00, 0x1F, 0x02, 0x04, 0x08, 0x1F], // 122 'z'
    [0x02, 0x04, 0x04, 0x08, 0x04, 0x04, 0x02], // 123 '{'
    [0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // 124 '|'
    [0x08, 0x04, 0x04, 0x02, 0x04, 0x04, 0x08], // 125 '}'
    [0x00, 0x00, 0x08, 0x15, 0x02, 0x00, 0x00], // 126 '~'
];

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    fn blank(width: u32, height: u32) -> RgbImage {
        RgbImage::new(width, height)
    }

    #[test]
    fn test_text_width_scales_with_length_and_scale() {
        let font = Font::with_scale(1);
        assert_eq!(font.text_width(""), 0);
        assert_eq!(font.text_width("A"), 5);
        assert_eq!(font.text_width("AB"), 11);

        let doubled = Font::with_scale(2);
        assert_eq!(doubled.text_width("AB"), 22);
    }

    #[test]
    fn test_zero_scale_is_clamped() {
        assert_eq!(Font::with_scale(0), Font::with_scale(1));
    }

    #[test]
    fn test_space_draws_nothing() {
        let mut image = blank(40, 20);
        let before = image.clone();
        Font::with_scale(1).draw_text(&mut image, (2, 2), (0, 0, 40, 20), " ", WHITE);
        assert_eq!(image, before);
    }

    #[test]
    fn test_drawing_stays_inside_clip() {
        let mut image = blank(100, 40);
        let clip = (10, 10, 20, 12);
        Font::with_scale(2).draw_text(&mut image, (10, 10), clip, "WWWWWWWW", WHITE);

        for (x, y, pixel) in image.enumerate_pixels() {
            let inside = x >= 10 && x < 30 && y >= 10 && y < 22;
            if !inside {
                assert_eq!(*pixel, Rgb([0, 0, 0]), "pixel outside clip at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_visible_glyph_sets_pixels() {
        let mut image = blank(40, 20);
        Font::with_scale(1).draw_text(&mut image, (0, 0), (0, 0, 40, 20), "H", WHITE);
        let lit = image.pixels().filter(|p| **p == WHITE).count();
        assert!(lit > 0, "glyph 'H' should set at least one pixel");
    }

    #[test]
    fn test_non_ascii_renders_fallback_block() {
        let mut image = blank(40, 20);
        Font::with_scale(1).draw_text(&mut image, (0, 0), (0, 0, 40, 20), "\u{00e9}", WHITE);
        // The fallback block is fully lit: 5x7 pixels.
        let lit = image.pixels().filter(|p| **p == WHITE).count();
        assert_eq!(lit, 35);
    }
}
