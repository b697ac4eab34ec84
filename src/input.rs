//! Input tracker
//!
//! Holds the live set of pressed keys and the current pointer/touch press.
//! Press/release events update it as they arrive; the frame loop reads it
//! once per frame through [`InputState::frame`], which also drains the
//! one-shot commands (start, reset, debug toggle).

use std::collections::BTreeSet;

use glam::Vec2;

use crate::sim::{ControlMode, TickInput};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowDown,
    Space,
    A,
    S,
    D,
    R,
    F2,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "ArrowDown" => Some(Key::ArrowDown),
            " " | "Spacebar" => Some(Key::Space),
            "a" | "A" => Some(Key::A),
            "s" | "S" => Some(Key::S),
            "d" | "D" => Some(Key::D),
            "r" | "R" => Some(Key::R),
            "F2" => Some(Key::F2),
            _ => None,
        }
    }

    pub fn is_dive(self) -> bool {
        matches!(self, Key::ArrowDown | Key::Space | Key::S)
    }

    pub fn is_left(self) -> bool {
        matches!(self, Key::ArrowLeft | Key::A)
    }

    pub fn is_right(self) -> bool {
        matches!(self, Key::ArrowRight | Key::D)
    }

    /// Any movement key starts a keyboard session
    pub fn starts_game(self) -> bool {
        self.is_dive() || self.is_left() || self.is_right()
    }
}

/// Live input state
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: BTreeSet<Key>,
    /// Active press in world coordinates (y up)
    press: Option<Vec2>,
    start: Option<ControlMode>,
    reset: bool,
    toggle_debug: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    pub fn press(&self) -> Option<Vec2> {
        self.press
    }

    /// Key pressed; auto-repeat of a held key is ignored
    pub fn key_down(&mut self, key: Key) {
        if !self.keys.insert(key) {
            return;
        }
        if key.starts_game() {
            self.request_start(ControlMode::Keyboard);
        }
        match key {
            Key::R => self.reset = true,
            Key::F2 => self.toggle_debug = !self.toggle_debug,
            _ => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    /// Pointer/touch went down at `pos`
    pub fn press_down(&mut self, pos: Vec2) {
        self.press = Some(pos);
        self.request_start(ControlMode::Press);
    }

    /// Pointer/touch moved while down
    pub fn press_move(&mut self, pos: Vec2) {
        if self.press.is_some() {
            self.press = Some(pos);
        }
    }

    pub fn press_up(&mut self) {
        self.press = None;
    }

    /// Explicit retry (e.g. a "try again" button)
    pub fn request_reset(&mut self) {
        self.reset = true;
    }

    /// Drop all held input (window lost focus)
    pub fn release_all(&mut self) {
        self.keys.clear();
        self.press = None;
    }

    fn request_start(&mut self, mode: ControlMode) {
        // First input of the frame decides the control mode
        if self.start.is_none() {
            self.start = Some(mode);
        }
    }

    /// Snapshot held input for one frame and drain one-shot commands
    pub fn frame(&mut self) -> TickInput {
        TickInput {
            dive: self.keys.iter().any(|k| k.is_dive()),
            left: self.keys.iter().any(|k| k.is_left()),
            right: self.keys.iter().any(|k| k.is_right()),
            press: self.press,
            start: self.start.take(),
            reset: std::mem::take(&mut self.reset),
            toggle_debug: std::mem::take(&mut self.toggle_debug),
        }
    }
}
