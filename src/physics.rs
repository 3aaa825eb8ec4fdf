//! Geometry primitives and the minimum-overlap collision resolver.
//!
//! Coordinates are screen-style: origin top-left, y grows downward. A `Rect`
//! is axis-aligned and stores its top-left corner plus extent. `resolve` is a
//! pure function over two rects; everything stateful (velocity zeroing,
//! ground/hook callbacks) lives in `player`.

use std::ops::{Add, AddAssign, Mul};

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Same rect moved by `offset` (hurtboxes are authored relative to the
    /// player's center and translated into world space each frame).
    pub fn translated(&self, offset: Vec2) -> Rect {
        Rect::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// All four components scaled by `factor` (sprite units -> world units).
    pub fn scaled(&self, factor: f32) -> Rect {
        Rect::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.right() >= other.x
            && other.right() >= self.x
            && self.bottom() >= other.y
            && other.bottom() >= self.y
    }
}

/// Axis-aligned push that separates the player from an obstacle, named by the
/// direction the player must move. The payload is the raw overlap along that
/// axis; the caller applies the anti-jitter bias.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Push {
    Left(f32),
    Right(f32),
    /// Ground contact.
    Up(f32),
    /// Head bump.
    Down(f32),
}

/// Minimum-overlap separation of `player` from `obstacle`.
///
/// Four candidate overlaps, evaluated in a fixed order; any negative one
/// means the rects do not intersect. The smallest wins, ties going to the
/// earliest candidate (strict less-than chain):
///
///   1. push left  : player.right  - obstacle.x
///   2. push right : obstacle.right - player.x
///   3. push up    : player.bottom - obstacle.y   (ground)
///   4. push down  : obstacle.bottom - player.y   (head bump)
pub fn resolve(player: &Rect, obstacle: &Rect) -> Option<Push> {
    let overlap_left = player.right() - obstacle.x;
    let overlap_right = obstacle.right() - player.x;
    let overlap_up = player.bottom() - obstacle.y;
    let overlap_down = obstacle.bottom() - player.y;

    if overlap_left < 0.0 || overlap_right < 0.0 || overlap_up < 0.0 || overlap_down < 0.0 {
        return None;
    }

    let mut push = Push::Left(overlap_left);
    let mut min_overlap = overlap_left;
    if overlap_right < min_overlap {
        push = Push::Right(overlap_right);
        min_overlap = overlap_right;
    }
    if overlap_up < min_overlap {
        push = Push::Up(overlap_up);
        min_overlap = overlap_up;
    }
    if overlap_down < min_overlap {
        push = Push::Down(overlap_down);
    }

    Some(push)
}
