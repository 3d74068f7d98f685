//! Bitmap fonts for the software renderer.
//! - `Font` is the capability surfaces draw text through
//! - `BitmapFont::builtin` is a 5x7 ASCII face compiled into the binary
//! - `BitmapFont::from_sheet` slices a 16-column glyph grid out of an image file
//! - Glyphs are 8-bit coverage masks positioned relative to the baseline

use std::path::Path;

use image::RgbaImage;
use log::{debug, info};
use rustc_hash::FxHashMap;
use thiserror::Error;

const BUILTIN_COLS: u32 = 5;
const BUILTIN_ROWS: u32 = 7;
const BUILTIN_ADVANCE: u32 = 6;
const BUILTIN_LINE_HEIGHT: u32 = 9;

/// Glyph sheets are laid out in rows of this many cells.
pub const SHEET_COLUMNS: u32 = 16;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font sheet: {0}")]
    Image(#[from] image::ImageError),
    #[error("font sheet {width}x{height} cannot hold {cell_width}x{cell_height} cells")]
    InvalidSheet {
        width: u32,
        height: u32,
        cell_width: u32,
        cell_height: u32,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub width: u32,
    pub height: u32,
    /// Rows from the top of the mask down to the baseline.
    pub bearing_y: i32,
    pub advance: i32,
    coverage: Vec<u8>,
}

impl Glyph {
    /// Builds a glyph from a row-major coverage mask, enlarged `scale` times.
    fn from_mask(width: u32, height: u32, mask: &[u8], scale: u32) -> Self {
        let scale = scale.max(1);
        let (sw, sh) = (width * scale, height * scale);
        let mut coverage = Vec::with_capacity((sw * sh) as usize);
        for y in 0..sh {
            let row = (y / scale) * width;
            for x in 0..sw {
                coverage.push(mask[(row + x / scale) as usize]);
            }
        }
        Self {
            width: sw,
            height: sh,
            bearing_y: sh as i32,
            advance: sw as i32,
            coverage,
        }
    }

    fn from_rows(rows: &[u8; BUILTIN_ROWS as usize], scale: u32) -> Self {
        let mut mask = [0u8; (BUILTIN_COLS * BUILTIN_ROWS) as usize];
        for (y, bits) in rows.iter().enumerate() {
            for x in 0..BUILTIN_COLS {
                if bits & (1 << (BUILTIN_COLS - 1 - x)) != 0 {
                    mask[y * BUILTIN_COLS as usize + x as usize] = u8::MAX;
                }
            }
        }
        let mut glyph = Self::from_mask(BUILTIN_COLS, BUILTIN_ROWS, &mask, scale);
        glyph.advance = (BUILTIN_ADVANCE * scale.max(1)) as i32;
        glyph
    }

    fn outline(width: u32, height: u32, scale: u32) -> Self {
        let mut mask = vec![0u8; (width * height) as usize];
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                    mask[(y * width + x) as usize] = u8::MAX;
                }
            }
        }
        Self::from_mask(width, height, &mask, scale)
    }

    #[inline(always)]
    pub fn coverage_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.coverage[(y * self.width + x) as usize]
    }
}

/// Text-shaping capability used by [`crate::core::gfx::Surface::draw_text`].
pub trait Font {
    fn glyph(&self, ch: char) -> Option<&Glyph>;

    /// Drawn in place of characters the face does not cover.
    fn fallback(&self) -> &Glyph;

    /// Vertical distance between successive baselines.
    fn line_height(&self) -> u32;
}

pub struct BitmapFont {
    glyphs: FxHashMap<char, Glyph>,
    fallback: Glyph,
    line_height: u32,
}

impl BitmapFont {
    pub fn builtin(scale: u32) -> Self {
        let scale = scale.max(1);
        let glyphs = BUILTIN_GLYPHS
            .iter()
            .map(|(ch, rows)| (*ch, Glyph::from_rows(rows, scale)))
            .collect::<FxHashMap<_, _>>();
        let mut fallback = Glyph::outline(BUILTIN_COLS, BUILTIN_ROWS, scale);
        fallback.advance = (BUILTIN_ADVANCE * scale) as i32;
        debug!("Built-in font ready: {} glyphs at scale {scale}.", glyphs.len());
        Self {
            glyphs,
            fallback,
            line_height: BUILTIN_LINE_HEIGHT * scale,
        }
    }

    pub fn from_sheet(
        path: &Path,
        cell_width: u32,
        cell_height: u32,
        first_char: u32,
        scale: u32,
    ) -> Result<Self, FontError> {
        let sheet = image::open(path)?.to_rgba8();
        let font = Self::from_image(&sheet, cell_width, cell_height, first_char, scale)?;
        info!(
            "Loaded font sheet '{}' ({} glyphs, {cell_width}x{cell_height} cells).",
            path.display(),
            font.glyphs.len()
        );
        Ok(font)
    }

    /// Slices a glyph grid out of `sheet`. Cell `i` (row-major, 16 per row)
    /// holds the character `first_char + i`, its baseline on the cell's
    /// bottom edge. Coverage is the pixel's luminance weighted by its alpha.
    pub fn from_image(
        sheet: &RgbaImage,
        cell_width: u32,
        cell_height: u32,
        first_char: u32,
        scale: u32,
    ) -> Result<Self, FontError> {
        let invalid = FontError::InvalidSheet {
            width: sheet.width(),
            height: sheet.height(),
            cell_width,
            cell_height,
        };
        if cell_width == 0 || cell_height == 0 {
            return Err(invalid);
        }
        let cols = (sheet.width() / cell_width).min(SHEET_COLUMNS);
        let rows = sheet.height() / cell_height;
        if cols == 0 || rows == 0 {
            return Err(invalid);
        }

        let mut glyphs = FxHashMap::default();
        let mut mask = vec![0u8; (cell_width * cell_height) as usize];
        for index in 0..cols * rows {
            let Some(ch) = char::from_u32(first_char + index) else {
                continue;
            };
            let (cx, cy) = ((index % cols) * cell_width, (index / cols) * cell_height);
            for y in 0..cell_height {
                for x in 0..cell_width {
                    let [r, g, b, a] = sheet.get_pixel(cx + x, cy + y).0;
                    let luma = (u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000;
                    mask[(y * cell_width + x) as usize] = (luma * u32::from(a) / 255) as u8;
                }
            }
            glyphs.insert(ch, Glyph::from_mask(cell_width, cell_height, &mask, scale));
        }

        Ok(Self {
            glyphs,
            fallback: Glyph::outline(cell_width, cell_height, scale),
            line_height: cell_height * scale.max(1),
        })
    }
}

impl Font for BitmapFont {
    #[inline(always)]
    fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    fn fallback(&self) -> &Glyph {
        &self.fallback
    }

    fn line_height(&self) -> u32 {
        self.line_height
    }
}

/* ------------------------------ 5x7 face ------------------------------ */

// One byte per row, bit 4 is the leftmost column.
#[rustfmt::skip]
static BUILTIN_GLYPHS: &[(char, [u8; 7])] = &[
    (' ', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('!', [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04]),
    ('\'', [0x0C, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00]),
    ('(', [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02]),
    (')', [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08]),
    ('+', [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00]),
    (',', [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08]),
    ('-', [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00]),
    ('.', [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C]),
    ('/', [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00]),
    ('0', [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E]),
    ('1', [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    ('2', [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F]),
    ('3', [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E]),
    ('4', [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02]),
    ('5', [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E]),
    ('6', [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E]),
    ('7', [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08]),
    ('8', [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E]),
    ('9', [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C]),
    (':', [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00]),
    ('=', [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00]),
    ('?', [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04]),
    ('A', [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]),
    ('B', [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E]),
    ('C', [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E]),
    ('D', [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C]),
    ('E', [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F]),
    ('F', [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10]),
    ('G', [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F]),
    ('H', [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]),
    ('I', [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    ('J', [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C]),
    ('K', [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11]),
    ('L', [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F]),
    ('M', [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11]),
    ('N', [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11]),
    ('O', [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E]),
    ('P', [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10]),
    ('Q', [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D]),
    ('R', [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11]),
    ('S', [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E]),
    ('T', [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04]),
    ('U', [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E]),
    ('V', [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04]),
    ('W', [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A]),
    ('X', [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11]),
    ('Y', [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04]),
    ('Z', [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F]),
    ('_', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F]),
    ('a', [0x00, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F]),
    ('b', [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x1E]),
    ('c', [0x00, 0x00, 0x0E, 0x10, 0x10, 0x11, 0x0E]),
    ('d', [0x01, 0x01, 0x0D, 0x13, 0x11, 0x11, 0x0F]),
    ('e', [0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E]),
    ('f', [0x06, 0x09, 0x08, 0x1C, 0x08, 0x08, 0x08]),
    ('g', [0x00, 0x0F, 0x11, 0x11, 0x0F, 0x01, 0x0E]),
    ('h', [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x11]),
    ('i', [0x04, 0x00, 0x0C, 0x04, 0x04, 0x04, 0x0E]),
    ('j', [0x02, 0x00, 0x06, 0x02, 0x02, 0x12, 0x0C]),
    ('k', [0x10, 0x10, 0x12, 0x14, 0x18, 0x14, 0x12]),
    ('l', [0x0C, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    ('m', [0x00, 0x00, 0x1A, 0x15, 0x15, 0x11, 0x11]),
    ('n', [0x00, 0x00, 0x16, 0x19, 0x11, 0x11, 0x11]),
    ('o', [0x00, 0x00, 0x0E, 0x11, 0x11, 0x11, 0x0E]),
    ('p', [0x00, 0x00, 0x1E, 0x11, 0x1E, 0x10, 0x10]),
    ('q', [0x00, 0x00, 0x0D, 0x13, 0x0F, 0x01, 0x01]),
    ('r', [0x00, 0x00, 0x16, 0x19, 0x10, 0x10, 0x10]),
    ('s', [0x00, 0x00, 0x0E, 0x10, 0x0E, 0x01, 0x1E]),
    ('t', [0x08, 0x08, 0x1C, 0x08, 0x08, 0x09, 0x06]),
    ('u', [0x00, 0x00, 0x11, 0x11, 0x11, 0x13, 0x0D]),
    ('v', [0x00, 0x00, 0x11, 0x11, 0x11, 0x0A, 0x04]),
    ('w', [0x00, 0x00, 0x11, 0x11, 0x15, 0x15, 0x0A]),
    ('x', [0x00, 0x00, 0x11, 0x0A, 0x04, 0x0A, 0x11]),
    ('y', [0x00, 0x00, 0x11, 0x11, 0x0F, 0x01, 0x0E]),
    ('z', [0x00, 0x00, 0x1F, 0x02, 0x04, 0x08, 0x1F]),
];
