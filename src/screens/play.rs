use crate::core::gfx::Image;
use crate::core::input::{KeySource, VirtualAction};
use crate::screens::{Screen, ScreenAction, draw_caption, draw_square};
use crate::ui::color;
use crate::ui::font::Font;

#[derive(Default)]
pub struct State {
    square: Option<Image>,
}

pub fn init() -> State {
    State::default()
}

pub fn update(_state: &mut State, keys: &dyn KeySource) -> ScreenAction {
    if keys.just_pressed(VirtualAction::Back) {
        ScreenAction::Navigate(Screen::Title)
    } else {
        ScreenAction::None
    }
}

pub fn draw(state: &mut State, frame: &mut Image, font: &dyn Font) {
    draw_caption(frame, font, "Play screen");
    draw_square(&mut state.square, color::PLAY_SQUARE, frame);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gfx::Surface;
    use crate::core::input::VirtualAction as A;
    use crate::screens::test_keys::Pressed;
    use crate::ui::font::BitmapFont;

    #[test]
    fn back_returns_to_title() {
        let mut state = init();
        assert_eq!(update(&mut state, &Pressed(&[])), ScreenAction::None);
        assert_eq!(update(&mut state, &Pressed(&[A::Start, A::MenuDown])), ScreenAction::None);
        assert_eq!(
            update(&mut state, &Pressed(&[A::Back])),
            ScreenAction::Navigate(Screen::Title)
        );
    }

    #[test]
    fn square_is_created_on_first_draw() {
        let mut state = init();
        assert!(state.square.is_none());
        let mut frame = Image::allocate(400, 300).expect("frame");
        frame.fill(color::CLEAR);
        draw(&mut state, &mut frame, &BitmapFont::builtin(2));
        assert!(state.square.is_some());
        assert_eq!(frame.pixel(80, 80), color::PLAY_SQUARE);
    }
}
