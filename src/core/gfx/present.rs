use std::{error::Error, num::NonZeroU32, sync::Arc};

use image::{Rgba, RgbaImage};
use log::info;
use winit::{dpi::PhysicalSize, window::Window};

/// Pushes finished frames to the window through softbuffer, upscaling the
/// logical frame by the largest integer factor that fits and letterboxing
/// the remainder.
pub struct Presenter {
    _context: softbuffer::Context<Arc<Window>>,
    surface: softbuffer::Surface<Arc<Window>, Arc<Window>>,
    window_size: PhysicalSize<u32>,
}

impl Presenter {
    pub fn new(window: Arc<Window>) -> Result<Self, Box<dyn Error>> {
        info!("Initializing software presenter (softbuffer)...");
        let window_size = window.inner_size();
        let context = softbuffer::Context::new(window.clone())?;
        let surface = softbuffer::Surface::new(&context, window)?;
        Ok(Self {
            _context: context,
            surface,
            window_size,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.window_size = PhysicalSize::new(width, height);
    }

    pub fn present(&mut self, frame: &RgbaImage) -> Result<(), Box<dyn Error>> {
        let PhysicalSize { width, height } = self.window_size;
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return Ok(());
        };
        self.surface.resize(w, h)?;

        let mut buffer = self.surface.buffer_mut()?;
        scale_into(frame, &mut buffer, width as usize, height as usize);
        buffer.present()?;
        Ok(())
    }
}

#[inline(always)]
const fn pack_rgb(c: Rgba<u8>) -> u32 {
    ((c.0[0] as u32) << 16) | ((c.0[1] as u32) << 8) | c.0[2] as u32
}

/// Nearest-neighbour upscale of `frame` into a `width`x`height` 0RGB buffer.
fn scale_into(frame: &RgbaImage, buffer: &mut [u32], width: usize, height: usize) {
    let (fw, fh) = (frame.width() as usize, frame.height() as usize);
    for pixel in buffer.iter_mut() {
        *pixel = 0;
    }
    if fw == 0 || fh == 0 || width == 0 || height == 0 {
        return;
    }

    let scale = (width / fw).min(height / fh).max(1);
    let out_w = (fw * scale).min(width);
    let out_h = (fh * scale).min(height);
    let off_x = (width - out_w) / 2;
    let off_y = (height - out_h) / 2;

    for y in 0..out_h {
        let row = (off_y + y) * width + off_x;
        let src_y = (y / scale) as u32;
        for x in 0..out_w {
            buffer[row + x] = pack_rgb(*frame.get_pixel((x / scale) as u32, src_y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_to_0rgb() {
        assert_eq!(pack_rgb(Rgba([0x12, 0x34, 0x56, 0x00])), 0x0012_3456);
    }

    #[test]
    fn upscales_by_integer_factor_and_centers() {
        let mut frame = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
        frame.put_pixel(1, 0, Rgba([255, 0, 0, 255]));

        // 2x1 into 5x3: factor 2 → 4x2 image, offset (0, 0) after centering.
        let (w, h) = (5, 3);
        let mut buffer = vec![0xDEAD_BEEF; w * h];
        scale_into(&frame, &mut buffer, w, h);
        assert_eq!(buffer[0], 0x0000_0000);
        assert_eq!(buffer[2], 0x00FF_0000);
        assert_eq!(buffer[3], 0x00FF_0000);
        assert_eq!(buffer[w + 3], 0x00FF_0000);
        // Letterbox column and row stay black.
        assert_eq!(buffer[4], 0);
        assert_eq!(buffer[2 * w + 2], 0);
    }

    #[test]
    fn windows_smaller_than_the_frame_are_cropped() {
        let frame = RgbaImage::from_pixel(8, 8, Rgba([0, 255, 0, 255]));
        let mut buffer = vec![0; 4 * 2];
        scale_into(&frame, &mut buffer, 4, 2);
        assert!(buffer.iter().all(|p| *p == 0x0000_FF00));
    }
}
