//! Sprite-sheet frame playback.
//!
//! Each state builds its own `Animation` at entry (frame rects + speed) and
//! advances it every update; the player only ever asks for the current frame
//! rect to hand to the renderer.

use crate::physics::Rect;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    /// Wrap back to the first frame at the end.
    #[default]
    Loop,
    /// Clamp to the last frame and hold it.
    Once,
}

#[derive(Debug, Default, Clone)]
pub struct Animation {
    frames: Vec<Rect>,
    frames_per_second: f32,
    elapsed: f32,
    playback: Playback,
}

impl Animation {
    pub fn new(playback: Playback) -> Self {
        Animation {
            playback,
            ..Animation::default()
        }
    }

    pub fn set_speed(&mut self, frames_per_second: f32) {
        self.frames_per_second = frames_per_second;
    }

    pub fn add_frame(&mut self, frame: Rect) {
        self.frames.push(frame);
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Sheet rect of the frame currently on display.
    pub fn current_frame(&self) -> Rect {
        if self.frames.is_empty() {
            return Rect::default();
        }
        let cursor = (self.elapsed * self.frames_per_second) as usize;
        let index = match self.playback {
            Playback::Loop => cursor % self.frames.len(),
            Playback::Once => cursor.min(self.frames.len() - 1),
        };
        self.frames[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_frames(playback: Playback) -> Animation {
        let mut animation = Animation::new(playback);
        animation.set_speed(10.0);
        animation.add_frame(Rect::new(0.0, 0.0, 16.0, 16.0));
        animation.add_frame(Rect::new(16.0, 0.0, 16.0, 16.0));
        animation.add_frame(Rect::new(32.0, 0.0, 16.0, 16.0));
        animation
    }

    #[test]
    fn looping_wraps_past_the_last_frame() {
        let mut animation = three_frames(Playback::Loop);
        animation.advance(0.35); // frame cursor 3.5 -> wraps to index 0
        assert_eq!(animation.current_frame().x, 0.0);
    }

    #[test]
    fn play_once_holds_the_last_frame() {
        let mut animation = three_frames(Playback::Once);
        animation.advance(2.0);
        assert_eq!(animation.current_frame().x, 32.0);
    }

    #[test]
    fn advances_at_the_configured_speed() {
        let mut animation = three_frames(Playback::Loop);
        assert_eq!(animation.current_frame().x, 0.0);
        animation.advance(0.15); // cursor 1.5 -> index 1
        assert_eq!(animation.current_frame().x, 16.0);
    }
}
