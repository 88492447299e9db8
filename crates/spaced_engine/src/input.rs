//! Input state tracking
//!
//! The OS input layer is external; whatever windowing glue hosts the game
//! feeds key transitions and mouse coordinates in here, and gameplay reads
//! the per-frame snapshot back out. `end_frame` must be called once per
//! frame for tap detection to work.

use std::collections::HashSet;

use crate::foundation::math::Vec2;

/// Key codes the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// W key
    W,
    /// A key
    A,
    /// S key
    S,
    /// D key
    D,
    /// Space bar
    Space,
}

/// Current keyboard and mouse state
#[derive(Debug, Default)]
pub struct InputState {
    pressed: HashSet<KeyCode>,
    previous: HashSet<KeyCode>,
    mouse_ndc: Vec2,
}

impl InputState {
    /// Create an empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press
    pub fn press(&mut self, key: KeyCode) {
        self.pressed.insert(key);
    }

    /// Record a key release
    pub fn release(&mut self, key: KeyCode) {
        self.pressed.remove(&key);
    }

    /// Whether a key is currently held
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Whether a key went down this frame
    pub fn is_tapped(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key) && !self.previous.contains(&key)
    }

    /// Update the mouse position in normalized device coordinates
    pub fn set_mouse_ndc(&mut self, ndc: Vec2) {
        self.mouse_ndc = ndc;
    }

    /// Mouse position in normalized device coordinates
    pub fn mouse_ndc(&self) -> Vec2 {
        self.mouse_ndc
    }

    /// Roll per-frame state over; call once at the end of each frame
    pub fn end_frame(&mut self) {
        self.previous = self.pressed.clone();
    }
}
