//! Keyboard input, split into the two shapes the game logic consumes:
//! - `KeyState`: the continuous held-keys snapshot, queried every update
//! - `KeyEvent`: discrete press/release occurrences, consumed once each
//!
//! Browser key events land in an mpsc channel from the keydown/keyup
//! listeners; `process_input` drains it once per rendered frame, folding the
//! events into the snapshot and handing the discrete sequence back.

use crate::browser;
use anyhow::Result;
use futures::channel::mpsc::{unbounded, UnboundedReceiver};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use wasm_bindgen::JsCast;

/// Key codes the player understands (browser `KeyboardEvent.code` values).
pub mod keys {
    pub const LEFT: &str = "ArrowLeft";
    pub const RIGHT: &str = "ArrowRight";
    pub const DOWN: &str = "ArrowDown";
    pub const JUMP: &str = "Space";
    pub const CROUCH: &str = "ShiftLeft";
    pub const ATTACK: &str = "KeyX";
}

/// Everything else (browser shortcuts, dead keys) never enters the channel.
static CAPTURED_KEYS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        keys::LEFT,
        keys::RIGHT,
        keys::DOWN,
        keys::JUMP,
        keys::CROUCH,
        keys::ATTACK,
    ])
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    Down(String),
    Up(String),
}

#[derive(Debug, Default, Clone)]
pub struct KeyState {
    pressed: HashSet<String>,
}

impl KeyState {
    pub fn new() -> Self {
        KeyState::default()
    }

    pub fn is_pressed(&self, code: &str) -> bool {
        self.pressed.contains(code)
    }

    pub fn set_pressed(&mut self, code: &str) {
        self.pressed.insert(code.into());
    }

    pub fn set_released(&mut self, code: &str) {
        self.pressed.remove(code);
    }
}

/// Attach keydown/keyup listeners to the canvas and return the receiving
/// end of the event channel.
pub fn prepare_input() -> Result<UnboundedReceiver<KeyEvent>> {
    let (sender, receiver) = unbounded();
    let keyup_sender = sender.clone();

    let onkeydown = browser::closure_wrap(Box::new(move |event: web_sys::KeyboardEvent| {
        if CAPTURED_KEYS.contains(event.code().as_str()) {
            let _ = sender.unbounded_send(KeyEvent::Down(event.code()));
        }
    }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);

    let onkeyup = browser::closure_wrap(Box::new(move |event: web_sys::KeyboardEvent| {
        if CAPTURED_KEYS.contains(event.code().as_str()) {
            let _ = keyup_sender.unbounded_send(KeyEvent::Up(event.code()));
        }
    }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);

    let canvas = browser::canvas()?;
    canvas.set_onkeydown(Some(onkeydown.as_ref().unchecked_ref()));
    canvas.set_onkeyup(Some(onkeyup.as_ref().unchecked_ref()));
    // The listeners live for the whole session.
    onkeydown.forget();
    onkeyup.forget();

    Ok(receiver)
}

/// Drain all pending key events: fold them into the held-keys snapshot and
/// return the discrete sequence for this frame.
pub fn process_input(
    state: &mut KeyState,
    receiver: &mut UnboundedReceiver<KeyEvent>,
) -> Vec<KeyEvent> {
    let mut events = Vec::new();
    while let Ok(Some(event)) = receiver.try_next() {
        match &event {
            KeyEvent::Down(code) => state.set_pressed(code),
            KeyEvent::Up(code) => state.set_released(code),
        }
        events.push(event);
    }
    events
}
