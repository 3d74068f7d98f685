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
        return ScreenAction::Navigate(Screen::Title);
    }
    ScreenAction::None
}

pub fn draw(state: &mut State, frame: &mut Image, font: &dyn Font) {
    draw_caption(frame, font, "Options screen");
    draw_square(&mut state.square, color::OPTIONS_SQUARE, frame);
}
