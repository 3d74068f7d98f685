pub mod present;
pub mod software;

use image::Rgba;
use thiserror::Error;

use crate::ui::font::Font;

pub use software::Image;

/// Largest edge, in pixels, any off-screen surface may have.
pub const MAX_SURFACE_DIMENSION: u32 = 8192;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("surface size {width}x{height} exceeds the {max}px limit")]
    TooLarge { width: u32, height: u32, max: u32 },
}

/// Checks a requested surface size against the renderer limits.
pub const fn check_dimensions(width: u32, height: u32) -> Result<(), SurfaceError> {
    if width == 0 || height == 0 {
        return Err(SurfaceError::InvalidSize { width, height });
    }
    if width > MAX_SURFACE_DIMENSION || height > MAX_SURFACE_DIMENSION {
        return Err(SurfaceError::TooLarge {
            width,
            height,
            max: MAX_SURFACE_DIMENSION,
        });
    }
    Ok(())
}

/// A renderable pixel target.
///
/// Widgets draw through this trait so they never depend on how pixels reach
/// the window. The software [`Image`] is the only backend the binary ships.
pub trait Surface: Sized {
    fn allocate(width: u32, height: u32) -> Result<Self, SurfaceError>;

    fn size(&self) -> (u32, u32);

    /// Overwrites every pixel with `color`.
    fn fill(&mut self, color: Rgba<u8>);

    /// Draws `text` with its baseline at `y`, starting at `x`.
    fn draw_text(&mut self, text: &str, font: &dyn Font, x: i32, y: i32, color: Rgba<u8>);

    /// Composites `src` onto this surface with its top-left corner at
    /// (`tx`, `ty`), rounded to the nearest pixel.
    fn draw_surface(&mut self, src: &Self, tx: f32, ty: f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimensions_are_invalid() {
        assert_eq!(
            check_dimensions(0, 36),
            Err(SurfaceError::InvalidSize {
                width: 0,
                height: 36
            })
        );
        assert!(matches!(
            check_dimensions(128, 0),
            Err(SurfaceError::InvalidSize { .. })
        ));
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        let err = check_dimensions(MAX_SURFACE_DIMENSION + 1, 4).unwrap_err();
        assert!(matches!(err, SurfaceError::TooLarge { max: MAX_SURFACE_DIMENSION, .. }));
        assert!(err.to_string().contains("exceeds"));
        assert!(check_dimensions(MAX_SURFACE_DIMENSION, MAX_SURFACE_DIMENSION).is_ok());
    }
}
