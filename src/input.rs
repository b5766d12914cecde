//! Per-frame input snapshot
//!
//! The host polls its devices once per frame and hands the result to the
//! screen manager as a [`DeviceSnapshot`]. [`InputState`] keeps the current and
//! previous snapshots so screens can ask edge questions ("was Enter pressed
//! this frame?") instead of level questions ("is Enter held?").

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Keys the menu layer understands
///
/// The host maps its native keycodes onto these; anything else is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Escape,
    Back,
}

/// Identifies which local player a screen listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerIndex {
    One,
    Two,
    Three,
    Four,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Released,
    Pressed,
}

/// Pointer position and primary button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerState {
    pub x: i32,
    pub y: i32,
    pub left_button: ButtonState,
}

/// Raw device state for one frame, built by the host
#[derive(Debug, Clone, Default)]
pub struct DeviceSnapshot {
    pub keys: HashSet<Key>,
    pub pointer: PointerState,
}

impl DeviceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder helper: snapshot with the given keys held
    pub fn with_keys(keys: &[Key]) -> Self {
        DeviceSnapshot {
            keys: keys.iter().copied().collect(),
            pointer: PointerState::default(),
        }
    }

    /// Builder helper: snapshot with the pointer at `(x, y)`
    pub fn with_pointer(x: i32, y: i32, left_button: ButtonState) -> Self {
        DeviceSnapshot {
            keys: HashSet::new(),
            pointer: PointerState { x, y, left_button },
        }
    }
}

/// Current and previous device snapshots
///
/// # Architecture
///
/// `update()` is called once per frame by the screen manager:
/// 1. The current snapshot becomes the previous one
/// 2. The host's new snapshot becomes current
/// 3. Screens query edges (`is_new_key_press`, `is_pointer_pressed`, ...)
///
/// Keyboard and pointer are single devices, so queries report the
/// controlling player when one is set, and `PlayerIndex::One` otherwise.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    current: DeviceSnapshot,
    previous: DeviceSnapshot,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rolls the current snapshot into `previous` and stores the new one
    pub fn update(&mut self, snapshot: DeviceSnapshot) {
        self.previous = std::mem::replace(&mut self.current, snapshot);
    }

    /// Key held now but not last frame
    ///
    /// Returns the player that pressed it, or None if it was not a new press.
    pub fn is_new_key_press(
        &self,
        key: Key,
        controlling_player: Option<PlayerIndex>,
    ) -> Option<PlayerIndex> {
        if self.current.keys.contains(&key) && !self.previous.keys.contains(&key) {
            Some(controlling_player.unwrap_or(PlayerIndex::One))
        } else {
            None
        }
    }

    /// Up or Left (menus are laid out in a row)
    pub fn is_menu_up(&self, controlling_player: Option<PlayerIndex>) -> bool {
        self.is_new_key_press(Key::Up, controlling_player).is_some()
            || self.is_new_key_press(Key::Left, controlling_player).is_some()
    }

    /// Down or Right
    pub fn is_menu_down(&self, controlling_player: Option<PlayerIndex>) -> bool {
        self.is_new_key_press(Key::Down, controlling_player).is_some()
            || self.is_new_key_press(Key::Right, controlling_player).is_some()
    }

    /// Enter or Space
    pub fn is_menu_select(&self, controlling_player: Option<PlayerIndex>) -> Option<PlayerIndex> {
        self.is_new_key_press(Key::Enter, controlling_player)
            .or_else(|| self.is_new_key_press(Key::Space, controlling_player))
    }

    /// Escape or the Back button
    pub fn is_menu_cancel(&self, controlling_player: Option<PlayerIndex>) -> Option<PlayerIndex> {
        self.is_new_key_press(Key::Escape, controlling_player)
            .or_else(|| self.is_new_key_press(Key::Back, controlling_player))
    }

    /// Primary pointer button went down this frame
    pub fn is_pointer_pressed(&self) -> bool {
        self.current.pointer.left_button == ButtonState::Pressed
            && self.previous.pointer.left_button == ButtonState::Released
    }

    /// Primary pointer button went up this frame
    pub fn is_pointer_released(&self) -> bool {
        self.current.pointer.left_button == ButtonState::Released
            && self.previous.pointer.left_button == ButtonState::Pressed
    }

    pub fn pointer_position(&self) -> (i32, i32) {
        (self.current.pointer.x, self.current.pointer.y)
    }
}
