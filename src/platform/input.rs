//! Keyboard and touch steering
//!
//! Both adapters reduce raw shell events to the held left/right pair the
//! session consumes.

use crate::sim::TickInput;

/// Horizontal drag needed before a swipe changes direction (px)
pub const SWIPE_THRESHOLD: f32 = 20.0;

/// Arrow-key state
#[derive(Debug, Clone, Copy, Default)]
pub struct Keyboard {
    held: TickInput,
}

impl Keyboard {
    /// Key pressed; only honoured while a run is active.
    ///
    /// Returns true if the key is a steering key.
    pub fn key_down(&mut self, key: &str, playing: bool) -> bool {
        if !playing {
            return false;
        }
        match key {
            "ArrowLeft" => self.held.left = true,
            "ArrowRight" => self.held.right = true,
            _ => return false,
        }
        true
    }

    /// Key released; always honoured so keys never stick
    pub fn key_up(&mut self, key: &str) -> bool {
        match key {
            "ArrowLeft" => self.held.left = false,
            "ArrowRight" => self.held.right = false,
            _ => return false,
        }
        true
    }

    pub fn held(&self) -> TickInput {
        self.held
    }

    pub fn release_all(&mut self) {
        self.held = TickInput::default();
    }
}

/// Touch swipe steering: drag past the threshold to pick a side
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeTracker {
    anchor_x: Option<f32>,
    held: TickInput,
}

impl SwipeTracker {
    pub fn touch_start(&mut self, x: f32, playing: bool) {
        if playing {
            self.anchor_x = Some(x);
        }
    }

    /// Returns true when the steering direction was (re)set
    pub fn touch_move(&mut self, x: f32, playing: bool) -> bool {
        if !playing {
            return false;
        }
        let Some(anchor) = self.anchor_x else {
            self.anchor_x = Some(x);
            return false;
        };

        let diff = x - anchor;
        if diff.abs() <= SWIPE_THRESHOLD {
            return false;
        }
        self.held = TickInput {
            left: diff < 0.0,
            right: diff > 0.0,
        };
        self.anchor_x = Some(x);
        true
    }

    pub fn touch_end(&mut self) {
        self.anchor_x = None;
        self.held = TickInput::default();
    }

    pub fn held(&self) -> TickInput {
        self.held
    }
}
