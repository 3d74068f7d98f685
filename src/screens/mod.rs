pub mod options;
pub mod play;
pub mod title;

use image::Rgba;
use log::warn;

use crate::core::gfx::{Image, Surface};
use crate::ui::color;
use crate::ui::font::Font;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    None,
    Navigate(Screen),
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Title,
    Play,
    Options,
}

impl Screen {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Play => "Play",
            Self::Options => "Options",
        }
    }
}

const CAPTION_X: i32 = 4;
const SQUARE_SIZE: u32 = 32;
const SQUARE_POS: (f32, f32) = (64.0, 64.0);

/// Top-left debug caption naming the current screen.
pub(crate) fn draw_caption(frame: &mut Image, font: &dyn Font, text: &str) {
    frame.draw_text(text, font, CAPTION_X, font.line_height() as i32, color::DEBUG_TEXT);
}

/// Draws the placeholder square, allocating and filling it on first use.
pub(crate) fn draw_square(cache: &mut Option<Image>, fill: Rgba<u8>, frame: &mut Image) {
    if cache.is_none() {
        match Image::allocate(SQUARE_SIZE, SQUARE_SIZE) {
            Ok(mut square) => {
                square.fill(fill);
                *cache = Some(square);
            }
            Err(e) => {
                warn!("Could not allocate placeholder square: {e}");
                return;
            }
        }
    }
    if let Some(square) = cache.as_ref() {
        frame.draw_surface(square, SQUARE_POS.0, SQUARE_POS.1);
    }
}

#[cfg(test)]
pub(crate) mod test_keys {
    use crate::core::input::{KeySource, VirtualAction};

    /// Reports exactly the listed actions as pressed this frame.
    pub struct Pressed(pub &'static [VirtualAction]);

    impl KeySource for Pressed {
        fn just_pressed(&self, action: VirtualAction) -> bool {
            self.0.contains(&action)
        }
    }
}
