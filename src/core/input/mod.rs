use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use rustc_hash::FxHashMap;

/* ------------------------ Virtual Keymap system ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VirtualAction {
    MenuUp,
    MenuDown,
    Start,
    Back,
}

pub const ALL_VIRTUAL_ACTIONS: [VirtualAction; 4] = [
    VirtualAction::MenuUp,
    VirtualAction::MenuDown,
    VirtualAction::Start,
    VirtualAction::Back,
];

impl VirtualAction {
    #[inline(always)]
    pub const fn ix(self) -> usize {
        self as usize
    }

    /// Key used for this action in the `[Keymaps]` config section.
    #[inline(always)]
    pub const fn ini_key(self) -> &'static str {
        match self {
            Self::MenuUp => "MenuUp",
            Self::MenuDown => "MenuDown",
            Self::Start => "Start",
            Self::Back => "Back",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Keymap {
    map: FxHashMap<VirtualAction, Vec<KeyCode>>,
    key_rev: FxHashMap<KeyCode, Vec<VirtualAction>>,
}

impl Default for Keymap {
    fn default() -> Self {
        use VirtualAction as A;
        let mut km = Self::empty();
        km.bind(A::MenuUp, &[KeyCode::ArrowUp, KeyCode::KeyW]);
        km.bind(A::MenuDown, &[KeyCode::ArrowDown, KeyCode::KeyS]);
        km.bind(
            A::Start,
            &[KeyCode::Enter, KeyCode::NumpadEnter, KeyCode::Space],
        );
        km.bind(A::Back, &[KeyCode::Escape, KeyCode::Backspace]);
        km
    }
}

impl Keymap {
    pub fn empty() -> Self {
        Self {
            map: FxHashMap::default(),
            key_rev: FxHashMap::default(),
        }
    }

    /// Replaces every binding of `action` with `keys`.
    pub fn bind(&mut self, action: VirtualAction, keys: &[KeyCode]) {
        if let Some(prev) = self.map.remove(&action) {
            for code in prev {
                if let Some(actions) = self.key_rev.get_mut(&code) {
                    actions.retain(|a| *a != action);
                    if actions.is_empty() {
                        self.key_rev.remove(&code);
                    }
                }
            }
        }
        for &code in keys {
            let actions = self.key_rev.entry(code).or_default();
            if !actions.contains(&action) {
                actions.push(action);
            }
        }
        self.map.insert(action, keys.to_vec());
    }

    pub fn bindings(&self, action: VirtualAction) -> &[KeyCode] {
        self.map.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    #[inline(always)]
    pub fn actions_for_key(&self, code: KeyCode) -> &[VirtualAction] {
        self.key_rev.get(&code).map(Vec::as_slice).unwrap_or(&[])
    }
}

/* ------------------------- Per-frame key edges ------------------------- */

/// "Was this logical key newly pressed this frame" queries.
pub trait KeySource {
    fn just_pressed(&self, action: VirtualAction) -> bool;
}

/// Collects keyboard events between frames.
///
/// A press only registers as an edge when the action was not already held,
/// so OS auto-repeat never re-triggers navigation.
#[derive(Clone, Debug)]
pub struct InputState {
    keymap: Keymap,
    held: [bool; ALL_VIRTUAL_ACTIONS.len()],
    pressed_this_frame: [bool; ALL_VIRTUAL_ACTIONS.len()],
}

impl InputState {
    pub fn new(keymap: Keymap) -> Self {
        Self {
            keymap,
            held: [false; ALL_VIRTUAL_ACTIONS.len()],
            pressed_this_frame: [false; ALL_VIRTUAL_ACTIONS.len()],
        }
    }

    pub fn handle_key_event(&mut self, ev: &KeyEvent) {
        if ev.state == ElementState::Pressed && ev.repeat {
            return;
        }
        let PhysicalKey::Code(code) = ev.physical_key else {
            return;
        };
        self.handle_key(code, ev.state == ElementState::Pressed);
    }

    pub fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        // Copied out so `press` can borrow self mutably.
        let actions: Vec<VirtualAction> = self.keymap.actions_for_key(code).to_vec();
        for action in actions {
            if pressed {
                self.press(action);
            } else {
                self.release(action);
            }
        }
    }

    pub fn press(&mut self, action: VirtualAction) {
        let ix = action.ix();
        if !self.held[ix] {
            self.pressed_this_frame[ix] = true;
        }
        self.held[ix] = true;
    }

    pub fn release(&mut self, action: VirtualAction) {
        self.held[action.ix()] = false;
    }

    /// Forgets this frame's edges; held state carries over.
    pub fn end_frame(&mut self) {
        self.pressed_this_frame = [false; ALL_VIRTUAL_ACTIONS.len()];
    }
}

impl KeySource for InputState {
    #[inline(always)]
    fn just_pressed(&self, action: VirtualAction) -> bool {
        self.pressed_this_frame[action.ix()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keymap_covers_arrows_enter_and_escape() {
        let km = Keymap::default();
        assert_eq!(km.actions_for_key(KeyCode::ArrowUp), &[VirtualAction::MenuUp]);
        assert_eq!(km.actions_for_key(KeyCode::ArrowDown), &[VirtualAction::MenuDown]);
        assert_eq!(km.actions_for_key(KeyCode::Enter), &[VirtualAction::Start]);
        assert_eq!(km.actions_for_key(KeyCode::Escape), &[VirtualAction::Back]);
        assert!(km.actions_for_key(KeyCode::KeyQ).is_empty());
    }

    #[test]
    fn rebinding_drops_previous_keys() {
        let mut km = Keymap::default();
        km.bind(VirtualAction::Start, &[KeyCode::KeyZ]);
        assert!(km.actions_for_key(KeyCode::Enter).is_empty());
        assert_eq!(km.actions_for_key(KeyCode::KeyZ), &[VirtualAction::Start]);
        assert_eq!(km.bindings(VirtualAction::Start), &[KeyCode::KeyZ]);
    }

    #[test]
    fn one_key_may_drive_several_actions() {
        let mut km = Keymap::empty();
        km.bind(VirtualAction::Start, &[KeyCode::Space]);
        km.bind(VirtualAction::MenuDown, &[KeyCode::Space]);
        let mut input = InputState::new(km);
        input.handle_key(KeyCode::Space, true);
        assert!(input.just_pressed(VirtualAction::Start));
        assert!(input.just_pressed(VirtualAction::MenuDown));
    }

    #[test]
    fn presses_are_edges_that_last_one_frame() {
        let mut input = InputState::new(Keymap::default());
        input.handle_key(KeyCode::ArrowDown, true);
        assert!(input.just_pressed(VirtualAction::MenuDown));
        assert!(!input.just_pressed(VirtualAction::MenuUp));

        input.end_frame();
        assert!(!input.just_pressed(VirtualAction::MenuDown));

        // Still held: a second press event is not a new edge.
        input.handle_key(KeyCode::ArrowDown, true);
        assert!(!input.just_pressed(VirtualAction::MenuDown));

        input.handle_key(KeyCode::ArrowDown, false);
        input.handle_key(KeyCode::ArrowDown, true);
        assert!(input.just_pressed(VirtualAction::MenuDown));
    }

    #[test]
    fn press_and_release_within_a_frame_still_counts() {
        let mut input = InputState::new(Keymap::default());
        input.handle_key(KeyCode::Enter, true);
        input.handle_key(KeyCode::Enter, false);
        assert!(input.just_pressed(VirtualAction::Start));
    }
}
