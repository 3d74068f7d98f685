use crate::core::gfx::MAX_SURFACE_DIMENSION;
use crate::core::input::{ALL_VIRTUAL_ACTIONS, Keymap};
use ini::Ini;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use winit::keyboard::KeyCode;

const CONFIG_PATH: &str = "menustate.ini";

const OPTIONS: Option<&str> = Some("Options");
const KEYMAPS: Option<&str> = Some("Keymaps");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Error => "Error",
            Self::Warn => "Warn",
            Self::Info => "Info",
            Self::Debug => "Debug",
            Self::Trace => "Trace",
        }
    }

    pub const fn as_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Off => log::LevelFilter::Off,
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Logical frame size; the window is this times `scale`.
    pub screen_width: u32,
    pub screen_height: u32,
    pub scale: u32,
    pub window_title: String,
    pub log_level: LogLevel,
    /// `None` selects the built-in 5x7 face.
    pub font_sheet: Option<PathBuf>,
    pub font_cell_width: u32,
    pub font_cell_height: u32,
    pub font_first_char: u32,
    pub font_scale: u32,
    pub keymap: Keymap,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: 400,
            screen_height: 300,
            scale: 2,
            window_title: "State!".to_string(),
            log_level: LogLevel::Warn,
            font_sheet: None,
            font_cell_width: 8,
            font_cell_height: 8,
            font_first_char: 32,
            font_scale: 2,
            keymap: Keymap::default(),
        }
    }
}

impl Config {
    /// Reads every known key from `conf`, keeping the default for anything
    /// missing or malformed.
    pub fn from_ini(conf: &Ini) -> Self {
        let default = Self::default();
        let get = |key: &str| conf.get_from(OPTIONS, key).map(str::trim);
        let positive = |key: &str, fallback: u32| {
            get(key)
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(fallback)
        };

        let dimension = |key: &str, fallback: u32| {
            positive(key, fallback).min(MAX_SURFACE_DIMENSION)
        };

        Self {
            screen_width: dimension("ScreenWidth", default.screen_width),
            screen_height: dimension("ScreenHeight", default.screen_height),
            scale: get("Scale")
                .and_then(|v| v.parse::<u32>().ok())
                .map_or(default.scale, |v| v.clamp(1, 8)),
            window_title: get("WindowTitle")
                .filter(|v| !v.is_empty())
                .map_or(default.window_title, str::to_string),
            log_level: get("LogLevel")
                .and_then(|v| LogLevel::from_str(v).ok())
                .unwrap_or(default.log_level),
            font_sheet: get("FontSheet")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            font_cell_width: positive("FontCellWidth", default.font_cell_width),
            font_cell_height: positive("FontCellHeight", default.font_cell_height),
            font_first_char: get("FontFirstChar")
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|v| char::from_u32(*v).is_some())
                .unwrap_or(default.font_first_char),
            font_scale: get("FontScale")
                .and_then(|v| v.parse::<u32>().ok())
                .map_or(default.font_scale, |v| v.clamp(1, 4)),
            keymap: load_keymap_from_ini(conf),
        }
    }

    pub fn to_ini(&self) -> Ini {
        let mut conf = Ini::new();
        conf.with_section(OPTIONS)
            .set("ScreenWidth", self.screen_width.to_string())
            .set("ScreenHeight", self.screen_height.to_string())
            .set("Scale", self.scale.to_string())
            .set("WindowTitle", self.window_title.as_str())
            .set("LogLevel", self.log_level.as_str())
            .set(
                "FontSheet",
                self.font_sheet
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            )
            .set("FontCellWidth", self.font_cell_width.to_string())
            .set("FontCellHeight", self.font_cell_height.to_string())
            .set("FontFirstChar", self.font_first_char.to_string())
            .set("FontScale", self.font_scale.to_string());

        for action in ALL_VIRTUAL_ACTIONS {
            let tokens = self
                .keymap
                .bindings(action)
                .iter()
                .map(|code| format!("KeyCode::{code:?}"))
                .collect::<Vec<_>>()
                .join(",");
            conf.with_section(KEYMAPS).set(action.ini_key(), tokens);
        }
        conf
    }
}

// --- File I/O ---

fn create_default_config_file(path: &Path) -> Result<(), std::io::Error> {
    info!("'{}' not found, creating with default values.", path.display());
    Config::default().to_ini().write_to_file(path)
}

/// Loads `menustate.ini`, writing a default file first if there is none.
pub fn load() -> Config {
    load_from(Path::new(CONFIG_PATH))
}

pub fn load_from(path: &Path) -> Config {
    if !path.exists()
        && let Err(e) = create_default_config_file(path)
    {
        warn!("Failed to create default config file: {e}");
    }

    match Ini::load_from_file(path) {
        Ok(conf) => {
            let cfg = Config::from_ini(&conf);
            info!("Configuration loaded from '{}'.", path.display());
            cfg
        }
        Err(e) => {
            warn!(
                "Failed to load '{}': {e}. Using default configuration.",
                path.display()
            );
            Config::default()
        }
    }
}

// --- Keymaps ---

/// Builds a keymap from the `[Keymaps]` section. Each present action replaces
/// its default bindings; tokens that do not parse are skipped with a warning.
pub fn load_keymap_from_ini(conf: &Ini) -> Keymap {
    let mut km = Keymap::default();
    let Some(section) = conf.section(KEYMAPS) else {
        return km;
    };

    for action in ALL_VIRTUAL_ACTIONS {
        let Some(value) = section.get(action.ini_key()) else {
            continue;
        };
        let mut keys = Vec::new();
        for tok in value.split(',').filter(|t| !t.trim().is_empty()) {
            match parse_binding_token(tok) {
                Some(code) => keys.push(code),
                None => warn!("Unknown key binding '{}' for {}.", tok.trim(), action.ini_key()),
            }
        }
        km.bind(action, &keys);
    }
    km
}

fn parse_binding_token(tok: &str) -> Option<KeyCode> {
    let rest = tok.trim().strip_prefix("KeyCode::")?;
    let code = match rest {
        // Special keys
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Escape,
        "Space" => KeyCode::Space,
        "Backspace" => KeyCode::Backspace,
        "Tab" => KeyCode::Tab,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        // Numpad keys
        "Numpad0" => KeyCode::Numpad0,
        "Numpad1" => KeyCode::Numpad1,
        "Numpad2" => KeyCode::Numpad2,
        "Numpad3" => KeyCode::Numpad3,
        "Numpad4" => KeyCode::Numpad4,
        "Numpad5" => KeyCode::Numpad5,
        "Numpad6" => KeyCode::Numpad6,
        "Numpad7" => KeyCode::Numpad7,
        "Numpad8" => KeyCode::Numpad8,
        "Numpad9" => KeyCode::Numpad9,
        "NumpadEnter" => KeyCode::NumpadEnter,
        // Digits
        "Digit0" => KeyCode::Digit0,
        "Digit1" => KeyCode::Digit1,
        "Digit2" => KeyCode::Digit2,
        "Digit3" => KeyCode::Digit3,
        "Digit4" => KeyCode::Digit4,
        "Digit5" => KeyCode::Digit5,
        "Digit6" => KeyCode::Digit6,
        "Digit7" => KeyCode::Digit7,
        "Digit8" => KeyCode::Digit8,
        "Digit9" => KeyCode::Digit9,
        // Letters
        "KeyA" => KeyCode::KeyA,
        "KeyB" => KeyCode::KeyB,
        "KeyC" => KeyCode::KeyC,
        "KeyD" => KeyCode::KeyD,
        "KeyE" => KeyCode::KeyE,
        "KeyF" => KeyCode::KeyF,
        "KeyG" => KeyCode::KeyG,
        "KeyH" => KeyCode::KeyH,
        "KeyI" => KeyCode::KeyI,
        "KeyJ" => KeyCode::KeyJ,
        "KeyK" => KeyCode::KeyK,
        "KeyL" => KeyCode::KeyL,
        "KeyM" => KeyCode::KeyM,
        "KeyN" => KeyCode::KeyN,
        "KeyO" => KeyCode::KeyO,
        "KeyP" => KeyCode::KeyP,
        "KeyQ" => KeyCode::KeyQ,
        "KeyR" => KeyCode::KeyR,
        "KeyS" => KeyCode::KeyS,
        "KeyT" => KeyCode::KeyT,
        "KeyU" => KeyCode::KeyU,
        "KeyV" => KeyCode::KeyV,
        "KeyW" => KeyCode::KeyW,
        "KeyX" => KeyCode::KeyX,
        "KeyY" => KeyCode::KeyY,
        "KeyZ" => KeyCode::KeyZ,
        _ => return None,
    };
    Some(code)
}
