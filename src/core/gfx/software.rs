use image::{Rgba, RgbaImage};

use crate::core::gfx::{Surface, SurfaceError, check_dimensions};
use crate::ui::font::{Font, Glyph};

/// CPU-side RGBA surface. Colors are straight (non-premultiplied) alpha.
#[derive(Clone, Debug)]
pub struct Image {
    pixels: RgbaImage,
}

impl Image {
    #[inline(always)]
    pub const fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.pixels.get_pixel(x, y)
    }

    fn draw_glyph(&mut self, glyph: &Glyph, left: i64, top: i64, color: Rgba<u8>) {
        let (w, h) = (i64::from(self.pixels.width()), i64::from(self.pixels.height()));
        let x0 = left.max(0);
        let y0 = top.max(0);
        let x1 = (left + i64::from(glyph.width)).min(w);
        let y1 = (top + i64::from(glyph.height)).min(h);
        for y in y0..y1 {
            for x in x0..x1 {
                let coverage = glyph.coverage_at((x - left) as u32, (y - top) as u32);
                if coverage == 0 {
                    continue;
                }
                let dst = self.pixels.get_pixel_mut(x as u32, y as u32);
                blend_over(dst, color, coverage);
            }
        }
    }
}

/// Source-over blend of `src` onto `dst`, with `coverage` scaling the
/// source alpha.
#[inline(always)]
fn blend_over(dst: &mut Rgba<u8>, src: Rgba<u8>, coverage: u8) {
    if coverage == u8::MAX && src.0[3] == u8::MAX {
        *dst = src;
        return;
    }

    let sa = (f32::from(src.0[3]) / 255.0) * (f32::from(coverage) / 255.0);
    if sa <= 0.0 {
        return;
    }
    let inv = 1.0 - sa;
    let da = f32::from(dst.0[3]) / 255.0;

    let mix = |s: u8, d: u8| -> u8 {
        let s = f32::from(s) / 255.0;
        let d = f32::from(d) / 255.0;
        s.mul_add(sa, d * inv).clamp(0.0, 1.0).mul_add(255.0, 0.5) as u8
    };

    let out_a = (sa + da * inv).clamp(0.0, 1.0).mul_add(255.0, 0.5) as u8;
    *dst = Rgba([
        mix(src.0[0], dst.0[0]),
        mix(src.0[1], dst.0[1]),
        mix(src.0[2], dst.0[2]),
        out_a,
    ]);
}

impl Surface for Image {
    fn allocate(width: u32, height: u32) -> Result<Self, SurfaceError> {
        check_dimensions(width, height)?;
        Ok(Self {
            pixels: RgbaImage::new(width, height),
        })
    }

    #[inline(always)]
    fn size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    fn fill(&mut self, color: Rgba<u8>) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = color;
        }
    }

    fn draw_text(&mut self, text: &str, font: &dyn Font, x: i32, y: i32, color: Rgba<u8>) {
        if color.0[3] == 0 {
            return;
        }
        // Pen math runs in i64 so offsets near the i32 edges just clip.
        let mut pen_x = i64::from(x);
        let mut baseline = i64::from(y);
        for ch in text.chars() {
            if ch == '\n' {
                pen_x = i64::from(x);
                baseline += i64::from(font.line_height());
                continue;
            }
            let glyph = font.glyph(ch).unwrap_or_else(|| font.fallback());
            self.draw_glyph(glyph, pen_x, baseline - i64::from(glyph.bearing_y), color);
            pen_x += i64::from(glyph.advance);
        }
    }

    fn draw_surface(&mut self, src: &Self, tx: f32, ty: f32) {
        let left = tx.round() as i64;
        let top = ty.round() as i64;
        let (dw, dh) = (i64::from(self.pixels.width()), i64::from(self.pixels.height()));
        let (sw, sh) = (i64::from(src.pixels.width()), i64::from(src.pixels.height()));

        let x0 = left.max(0);
        let y0 = top.max(0);
        let x1 = (left + sw).min(dw);
        let y1 = (top + sh).min(dh);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                let s = *src.pixels.get_pixel((x - left) as u32, (y - top) as u32);
                if s.0[3] == 0 {
                    continue;
                }
                blend_over(self.pixels.get_pixel_mut(x as u32, y as u32), s, u8::MAX);
            }
        }
    }
}
