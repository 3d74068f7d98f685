use log::debug;

use crate::core::gfx::Image;
use crate::core::input::{KeySource, VirtualAction};
use crate::screens::{Screen, ScreenAction, draw_caption};
use crate::ui::color;
use crate::ui::font::Font;
use crate::ui::menu_list::{MenuError, MenuItemInput, MenuList, MenuListInput};

pub const PLAY_BUTTON: &str = "playButton";
pub const OPTION_BUTTON: &str = "optionButton";
pub const QUIT_BUTTON: &str = "quitButton";

// Layout
const MENU_X: f32 = 128.0;
const MENU_Y: f32 = 128.0;
const BUTTON_W: u32 = 128;
const BUTTON_H: u32 = 36;

pub struct State {
    pub menu: MenuList<Image>,
}

/// Three stacked buttons in the green palette, purple when highlighted.
pub fn main_menu() -> MenuListInput {
    MenuListInput {
        tx: MENU_X,
        ty: MENU_Y,
        width: BUTTON_W,
        height: BUTTON_H,
        default_selected_background: Some(color::PURPLE[2]),
        items: vec![
            MenuItemInput::new(PLAY_BUTTON, "PLAY")
                .with_text_offset(36, 25)
                .with_background(color::GREEN[0]),
            MenuItemInput::new(OPTION_BUTTON, "OPTIONS")
                .with_text_offset(12, 25)
                .with_background(color::GREEN[1]),
            MenuItemInput::new(QUIT_BUTTON, "QUIT")
                .with_text_offset(36, 25)
                .with_background(color::GREEN[2]),
        ],
        ..MenuListInput::default()
    }
}

pub fn init() -> Result<State, MenuError> {
    let menu = MenuList::new(main_menu())?;
    debug!("Title menu ready: {menu:?}");
    Ok(State { menu })
}

pub fn update(state: &mut State, keys: &dyn KeySource) -> ScreenAction {
    if keys.just_pressed(VirtualAction::MenuUp) {
        state.menu.decrement_selection();
    }
    if keys.just_pressed(VirtualAction::MenuDown) {
        state.menu.increment_selection();
    }
    if !keys.just_pressed(VirtualAction::Start) {
        return ScreenAction::None;
    }

    let selected = state.menu.selected_item_name();
    debug!("Title menu confirmed '{selected}'.");
    match selected {
        PLAY_BUTTON => ScreenAction::Navigate(Screen::Play),
        OPTION_BUTTON => ScreenAction::Navigate(Screen::Options),
        QUIT_BUTTON => ScreenAction::Exit,
        _ => ScreenAction::None,
    }
}

pub fn draw(state: &mut State, frame: &mut Image, font: &dyn Font) {
    draw_caption(frame, font, "Title screen");
    state.menu.render(frame, font);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gfx::Surface;
    use crate::core::input::VirtualAction as A;
    use crate::screens::test_keys::Pressed;
    use crate::ui::font::BitmapFont;

    fn title() -> State {
        init().expect("main menu is valid")
    }

    #[test]
    fn main_menu_resolves_palette_colors() {
        let state = title();
        let items = state.menu.items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].colors().background, color::GREEN[0]);
        assert_eq!(items[1].colors().background, color::GREEN[1]);
        assert_eq!(items[2].colors().background, color::GREEN[2]);
        for item in items {
            assert_eq!(item.colors().selected_background, color::PURPLE[2]);
            assert_eq!(item.colors().text, color::MENU_TEXT);
        }
        assert_eq!(items[1].text_offset(), (12, 25));
        assert_eq!(state.menu.item_offset(), (0.0, 36.0));
    }

    #[test]
    fn start_follows_the_selected_button() {
        let mut state = title();
        assert_eq!(
            update(&mut state, &Pressed(&[A::Start])),
            ScreenAction::Navigate(Screen::Play)
        );
        assert_eq!(
            update(&mut state, &Pressed(&[A::MenuDown, A::Start])),
            ScreenAction::Navigate(Screen::Options)
        );
        assert_eq!(
            update(&mut state, &Pressed(&[A::MenuDown, A::Start])),
            ScreenAction::Exit
        );
    }

    #[test]
    fn navigation_without_start_stays_on_title() {
        let mut state = title();
        assert_eq!(update(&mut state, &Pressed(&[A::MenuUp])), ScreenAction::None);
        assert_eq!(state.menu.selected_item_name(), PLAY_BUTTON);
        for _ in 0..5 {
            update(&mut state, &Pressed(&[A::MenuDown]));
        }
        assert_eq!(state.menu.selected_item_name(), QUIT_BUTTON);
        assert_eq!(update(&mut state, &Pressed(&[A::Back])), ScreenAction::None);
    }

    #[test]
    fn draw_places_buttons_below_each_other() {
        let mut state = title();
        let font = BitmapFont::builtin(2);
        let mut frame = Image::allocate(400, 300).expect("frame");
        frame.fill(color::CLEAR);
        update(&mut state, &Pressed(&[A::MenuDown]));
        draw(&mut state, &mut frame, &font);

        assert_eq!(frame.pixel(128, 128), color::GREEN[0]);
        assert_eq!(frame.pixel(128, 164), color::PURPLE[2]);
        assert_eq!(frame.pixel(255, 235), color::GREEN[2]);
        assert_eq!(frame.pixel(128, 236), color::CLEAR);
    }
}
