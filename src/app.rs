use crate::config::Config;
use crate::core::gfx::present::Presenter;
use crate::core::gfx::{Image, Surface};
use crate::core::input::InputState;
use crate::screens::{Screen, ScreenAction, options, play, title};
use crate::ui::color;
use crate::ui::font::{BitmapFont, Font};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use log::{error, info, warn};
use std::{error::Error, sync::Arc};

/// Everything a frame needs: the screen being shown, every screen's state,
/// this frame's input edges, the text face and the logical frame buffer.
pub struct AppState {
    pub current_screen: Screen,
    pub title_state: title::State,
    pub play_state: play::State,
    pub options_state: options::State,
    pub input: InputState,
    font: Box<dyn Font>,
    frame: Image,
}

impl AppState {
    pub fn new(config: &Config, font: Box<dyn Font>) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            current_screen: Screen::Title,
            title_state: title::init()?,
            play_state: play::init(),
            options_state: options::init(),
            input: InputState::new(config.keymap.clone()),
            font,
            frame: Image::allocate(config.screen_width, config.screen_height)?,
        })
    }

    /// Clears the frame, draws the current screen, then lets it react to
    /// this frame's input. A navigation shows from the next frame on.
    pub fn step(&mut self) -> ScreenAction {
        self.frame.fill(color::CLEAR);
        let font = self.font.as_ref();
        let action = match self.current_screen {
            Screen::Title => {
                title::draw(&mut self.title_state, &mut self.frame, font);
                title::update(&mut self.title_state, &self.input)
            }
            Screen::Play => {
                play::draw(&mut self.play_state, &mut self.frame, font);
                play::update(&mut self.play_state, &self.input)
            }
            Screen::Options => {
                options::draw(&mut self.options_state, &mut self.frame, font);
                options::update(&mut self.options_state, &self.input)
            }
        };
        self.handle_action(action);
        action
    }

    fn handle_action(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::Navigate(screen) => {
                info!(
                    "Screen {} -> {}",
                    self.current_screen.name(),
                    screen.name()
                );
                self.current_screen = screen;
            }
            ScreenAction::Exit => info!("Exit action received. Shutting down."),
            ScreenAction::None => {}
        }
    }

    #[inline(always)]
    pub const fn frame(&self) -> &Image {
        &self.frame
    }
}

/// The configured glyph sheet, or the built-in face when there is none or it
/// fails to load.
pub fn load_font(config: &Config) -> BitmapFont {
    let Some(path) = config.font_sheet.as_deref() else {
        return BitmapFont::builtin(config.font_scale);
    };
    match BitmapFont::from_sheet(
        path,
        config.font_cell_width,
        config.font_cell_height,
        config.font_first_char,
        config.font_scale,
    ) {
        Ok(font) => font,
        Err(e) => {
            warn!(
                "Font sheet '{}' unusable ({e}); using the built-in font.",
                path.display()
            );
            BitmapFont::builtin(config.font_scale)
        }
    }
}

pub struct App {
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    state: AppState,
    window_title: String,
    window_size: PhysicalSize<u32>,
}

impl App {
    fn new(config: &Config, state: AppState) -> Self {
        Self {
            window: None,
            presenter: None,
            state,
            window_title: config.window_title.clone(),
            window_size: PhysicalSize::new(
                config.screen_width * config.scale,
                config.screen_height * config.scale,
            ),
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Box<dyn Error>> {
        let window_attributes = Window::default_attributes()
            .with_title(self.window_title.as_str())
            .with_resizable(true)
            .with_inner_size(self.window_size);

        let window = Arc::new(event_loop.create_window(window_attributes)?);
        let presenter = Presenter::new(window.clone())?;

        let (frame_w, frame_h) = self.state.frame().size();
        info!(
            "Presenting a {frame_w}x{frame_h} frame in a {}x{} window.",
            self.window_size.width, self.window_size.height
        );
        self.window = Some(window);
        self.presenter = Some(presenter);
        info!("Starting event loop...");
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.step() == ScreenAction::Exit {
            event_loop.exit();
            return;
        }
        if let Some(presenter) = &mut self.presenter
            && let Err(e) = presenter.present(self.state.frame().pixels())
        {
            error!("Failed to present frame: {e}");
        }
        self.state.input.end_frame();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none()
            && let Err(e) = self.init_graphics(event_loop)
        {
            error!("Failed to initialize graphics: {e}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        if window_id != window.id() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested. Shutting down.");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                self.state.input.handle_key_event(&key_event);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

pub fn run(config: &Config) -> Result<(), Box<dyn Error>> {
    let font = load_font(config);
    let state = AppState::new(config, Box::new(font)).inspect_err(|e| {
        error!("Failed to build the title screen: {e}");
    })?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, state);
    event_loop.run_app(&mut app)?;
    Ok(())
}
