//! The nine player states and the machine that holds exactly one of them.
//!
//! ┌──────────────────── State Transition Flow ─────────────────────────┐
//! │  From         →  Trigger                     →  To                 │
//! ├────────────────────────────────────────────────────────────────────┤
//! │  Idle         →  left/right held or pressed  →  Running            │
//! │  Idle         →  crouch held or pressed      →  Sitting            │
//! │  Idle         →  attack key                  →  FirstAttack        │
//! │  Idle         →  no ground contact           →  Falling            │
//! │  Running      →  both horizontals released   →  Idle               │
//! │  Running      →  crouch pressed              →  Sliding            │
//! │  Running      →  attack key                  →  FirstAttack        │
//! │  Sliding      →  timer up + grounded         →  Running / Idle     │
//! │  Falling      →  on_hit_ground              →  Idle                │
//! │  Falling      →  on_ledge_hook              →  Hooked              │
//! │  Hooked       →  jump / down key             →  Falling            │
//! │  Hooked       →  on_hit_ground              →  Idle                │
//! │  Sitting      →  horizontal / crouch release →  Running / Idle     │
//! │  Attack 1/2/3 →  timer up + chain queued     →  next attack        │
//! │  Attack 1/2/3 →  timer up, no chain          →  Running / Idle     │
//! │  any grounded →  jump                        →  Falling            │
//! └────────────────────────────────────────────────────────────────────┘
//!
//! Every state reacts through the same capability set (`update`,
//! `handle_input`, `on_hit_ground`, `on_ledge_hook`, `on_start_falling`)
//! and answers with `Some(successor)` to transition or `None` to stay. The
//! check order inside each handler is the tie-break: the first condition
//! that fires wins, and at most one transition happens per trigger.
//!
//! States own policy: each entry constructor decides the hurtbox shape, the
//! sword hitbox, and any velocity override. `Player` never does.

use crate::engine::input::{keys, KeyEvent, KeyState};
use crate::physics::{Rect, Vec2};
use crate::player::animation::{Animation, Playback};

// Movement constants (world units; the sprite sheet is authored at 1/4
// world scale, so hurtboxes below go through `scaled(SPRITE_SCALE)`).
const RUNNING_SPEED: f32 = 900.0;
const JUMP_SPEED: f32 = 1300.0;
const SLIDING_SPEED: f32 = 1200.0;
const FALLING_MOVE_SPEED: f32 = 600.0;
const HOOK_PUSH_OFF_SPEED: f32 = 100.0;
/// Per-frame multiplicative decay applied to vx while sliding or attacking.
const VELOCITY_DECAY: f32 = 0.97;
const SLIDING_TIME: f32 = 0.4;
const ATTACK_TIME: f32 = 0.4;
/// A jump press this many held-frames into a fall still counts as a
/// double-jump request.
const DOUBLE_JUMP_WINDOW_FRAMES: u32 = 5;

pub const SPRITE_SCALE: f32 = 4.0;
/// Vertical band around an obstacle's top edge within which a horizontal
/// push while descending counts as a ledge grab.
pub const MAX_HOOK_OFFSET: f32 = 40.0;

const STAND_HURTBOX: Rect = Rect::new(-10.0, -15.0, 20.0, 30.0);
const SLIDE_HURTBOX: Rect = Rect::new(-20.0, -5.0, 40.0, 20.0);
const SIT_HURTBOX: Rect = Rect::new(-10.0, 0.0, 20.0, 15.0);

/// Everything the states read and write on the player. Owned by `Player`,
/// lent mutably to the active state for the duration of one dispatch.
#[derive(Debug, Clone, Copy)]
pub struct PlayerContext {
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing_right: bool,
    /// Hurtbox relative to `position`; replaced wholesale at every entry.
    pub hurtbox: Rect,
    /// Active sword hitbox relative to `position`; `None` while no attack
    /// is out.
    pub sword_hitbox: Option<Rect>,
    /// True iff at least one obstacle intersected the player during the
    /// last collision pass.
    pub is_colliding: bool,
}

impl PlayerContext {
    pub fn new(position: Vec2) -> Self {
        PlayerContext {
            position,
            velocity: Vec2::ZERO,
            facing_right: true,
            hurtbox: STAND_HURTBOX.scaled(SPRITE_SCALE),
            sword_hitbox: None,
            is_colliding: false,
        }
    }
}

/// Shared jump routine: escape the current overlap by one unit, launch
/// upward. Every caller transitions to Falling right after.
fn jump(ctx: &mut PlayerContext) {
    ctx.position.y -= 1.0;
    ctx.velocity.y = -JUMP_SPEED;
}

fn build_animation(playback: Playback, speed: f32, frames: &[[f32; 4]]) -> Animation {
    let mut animation = Animation::new(playback);
    animation.set_speed(speed);
    for &[x, y, w, h] in frames {
        animation.add_frame(Rect::new(x, y, w, h));
    }
    animation
}

#[derive(Debug, Clone)]
pub struct Idle {
    animation: Animation,
}

impl Idle {
    pub fn enter(ctx: &mut PlayerContext) -> Self {
        ctx.velocity = Vec2::ZERO;
        ctx.hurtbox = STAND_HURTBOX.scaled(SPRITE_SCALE);
        Idle {
            animation: build_animation(
                Playback::Loop,
                6.0,
                &[
                    [14.0, 6.0, 21.0, 30.0],
                    [64.0, 6.0, 21.0, 30.0],
                    [114.0, 6.0, 21.0, 30.0],
                    [164.0, 6.0, 21.0, 30.0],
                ],
            ),
        }
    }

    fn update(
        &mut self,
        ctx: &mut PlayerContext,
        held: &KeyState,
        dt: f32,
    ) -> Option<PlayerStateMachine> {
        self.animation.advance(dt);
        if held.is_pressed(keys::LEFT) || held.is_pressed(keys::RIGHT) {
            Some(Running::enter(ctx).into())
        } else if held.is_pressed(keys::CROUCH) {
            Some(Sitting::enter(ctx).into())
        } else if held.is_pressed(keys::ATTACK) {
            Some(PlayerStateMachine::FirstAttack(Attack::first(ctx)))
        } else {
            None
        }
    }

    fn handle_input(
        &mut self,
        ctx: &mut PlayerContext,
        event: &KeyEvent,
    ) -> Option<PlayerStateMachine> {
        match event {
            KeyEvent::Down(code) if code == keys::LEFT || code == keys::RIGHT => {
                Some(Running::enter(ctx).into())
            }
            KeyEvent::Down(code) if code == keys::JUMP => {
                jump(ctx);
                Some(Falling::enter(ctx).into())
            }
            KeyEvent::Down(code) if code == keys::CROUCH => Some(Sitting::enter(ctx).into()),
            KeyEvent::Down(code) if code == keys::ATTACK => {
                Some(PlayerStateMachine::FirstAttack(Attack::first(ctx)))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Running {
    animation: Animation,
}

impl Running {
    pub fn enter(ctx: &mut PlayerContext) -> Self {
        ctx.hurtbox = STAND_HURTBOX.scaled(SPRITE_SCALE);
        Running {
            animation: build_animation(
                Playback::Loop,
                12.0,
                &[
                    [67.0, 45.0, 20.0, 27.0],
                    [116.0, 46.0, 20.0, 27.0],
                    [166.0, 48.0, 20.0, 27.0],
                    [217.0, 45.0, 20.0, 27.0],
                    [266.0, 46.0, 20.0, 27.0],
                    [316.0, 48.0, 20.0, 27.0],
                ],
            ),
        }
    }

    fn update(
        &mut self,
        ctx: &mut PlayerContext,
        held: &KeyState,
        dt: f32,
    ) -> Option<PlayerStateMachine> {
        self.animation.advance(dt);
        if held.is_pressed(keys::LEFT) {
            ctx.velocity.x = -RUNNING_SPEED;
            ctx.facing_right = false;
        }
        if held.is_pressed(keys::RIGHT) {
            ctx.velocity.x = RUNNING_SPEED;
            ctx.facing_right = true;
        }
        if held.is_pressed(keys::ATTACK) {
            return Some(PlayerStateMachine::FirstAttack(Attack::first(ctx)));
        }
        None
    }

    fn handle_input(
        &mut self,
        ctx: &mut PlayerContext,
        event: &KeyEvent,
        held: &KeyState,
    ) -> Option<PlayerStateMachine> {
        match event {
            KeyEvent::Down(code) if code == keys::JUMP => {
                jump(ctx);
                Some(Falling::enter(ctx).into())
            }
            KeyEvent::Down(code) if code == keys::CROUCH => Some(Sliding::enter(ctx).into()),
            KeyEvent::Down(code) if code == keys::ATTACK => {
                Some(PlayerStateMachine::FirstAttack(Attack::first(ctx)))
            }
            KeyEvent::Up(code) if code == keys::LEFT && !held.is_pressed(keys::RIGHT) => {
                Some(Idle::enter(ctx).into())
            }
            KeyEvent::Up(code) if code == keys::RIGHT && !held.is_pressed(keys::LEFT) => {
                Some(Idle::enter(ctx).into())
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Sliding {
    animation: Animation,
    time_left: f32,
}

impl Sliding {
    pub fn enter(ctx: &mut PlayerContext) -> Self {
        // Clamp to the slide speed, preserving the direction of travel.
        if ctx.velocity.x > 0.0 {
            ctx.velocity.x = SLIDING_SPEED;
        } else if ctx.velocity.x < 0.0 {
            ctx.velocity.x = -SLIDING_SPEED;
        }
        ctx.hurtbox = SLIDE_HURTBOX.scaled(SPRITE_SCALE);
        Sliding {
            animation: build_animation(
                Playback::Once,
                10.0,
                &[
                    [155.0, 119.0, 34.0, 28.0],
                    [205.0, 119.0, 34.0, 28.0],
                    [255.0, 119.0, 34.0, 28.0],
                    [307.0, 119.0, 34.0, 28.0],
                    [9.0, 156.0, 34.0, 28.0],
                ],
            ),
            time_left: SLIDING_TIME,
        }
    }

    fn update(
        &mut self,
        ctx: &mut PlayerContext,
        held: &KeyState,
        dt: f32,
    ) -> Option<PlayerStateMachine> {
        self.animation.advance(dt);
        ctx.velocity.x *= VELOCITY_DECAY;
        self.time_left -= dt;
        if self.time_left < 0.0 && ctx.is_colliding {
            if held.is_pressed(keys::LEFT) || held.is_pressed(keys::RIGHT) {
                return Some(Running::enter(ctx).into());
            }
            return Some(Idle::enter(ctx).into());
        }
        None
    }

    fn handle_input(
        &mut self,
        ctx: &mut PlayerContext,
        event: &KeyEvent,
    ) -> Option<PlayerStateMachine> {
        match event {
            // Jumping out of a slide only works while grounded.
            KeyEvent::Down(code) if code == keys::JUMP && ctx.is_colliding => {
                jump(ctx);
                Some(Falling::enter(ctx).into())
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Falling {
    animation: Animation,
    has_double_jumped: bool,
    jump_held_frames: u32,
}

impl Falling {
    pub fn enter(ctx: &mut PlayerContext) -> Self {
        ctx.hurtbox = STAND_HURTBOX.scaled(SPRITE_SCALE);
        Falling {
            animation: build_animation(Playback::Loop, 12.0, &[[321.0, 155.0, 15.0, 26.0]]),
            has_double_jumped: false,
            jump_held_frames: 0,
        }
    }

    fn update(
        &mut self,
        ctx: &mut PlayerContext,
        held: &KeyState,
        dt: f32,
    ) -> Option<PlayerStateMachine> {
        self.animation.advance(dt);
        if held.is_pressed(keys::LEFT) {
            ctx.velocity.x = -FALLING_MOVE_SPEED;
            ctx.facing_right = false;
        }
        if held.is_pressed(keys::RIGHT) {
            ctx.velocity.x = FALLING_MOVE_SPEED;
            ctx.facing_right = true;
        }
        // The counter distinguishes a fresh jump press from the key still
        // being held since before the fall started.
        if held.is_pressed(keys::JUMP) && self.jump_held_frames < 100 {
            self.jump_held_frames += 1;
        } else {
            self.jump_held_frames = 0;
        }
        None
    }

    fn handle_input(
        &mut self,
        ctx: &mut PlayerContext,
        event: &KeyEvent,
    ) -> Option<PlayerStateMachine> {
        if let KeyEvent::Down(code) = event {
            if code == keys::JUMP
                && !self.has_double_jumped
                && self.jump_held_frames < DOUBLE_JUMP_WINDOW_FRAMES
            {
                ctx.position.y -= 1.0;
                // Partial boost when already sailing upward, full re-launch
                // at 70% jump speed otherwise.
                if -ctx.velocity.y > JUMP_SPEED * 0.7 {
                    ctx.velocity.y -= JUMP_SPEED * 0.15;
                } else {
                    ctx.velocity.y = -JUMP_SPEED * 0.7;
                }
                self.has_double_jumped = true;
            }
        }
        None
    }
}

#[derive(Debug, Clone)]
pub struct Hooked {
    animation: Animation,
}

impl Hooked {
    pub fn enter(ctx: &mut PlayerContext) -> Self {
        ctx.hurtbox = STAND_HURTBOX.scaled(SPRITE_SCALE);
        Hooked {
            animation: build_animation(
                Playback::Once,
                12.0,
                &[
                    [70.0, 151.0, 16.0, 34.0],
                    [119.0, 151.0, 16.0, 34.0],
                    [169.0, 151.0, 16.0, 34.0],
                    [219.0, 151.0, 16.0, 34.0],
                ],
            ),
        }
    }

    fn update(
        &mut self,
        ctx: &mut PlayerContext,
        _held: &KeyState,
        dt: f32,
    ) -> Option<PlayerStateMachine> {
        // Suspended on the ledge; gravity applied by the world is cancelled
        // every frame.
        ctx.velocity = Vec2::ZERO;
        self.animation.advance(dt);
        None
    }

    fn handle_input(
        &mut self,
        ctx: &mut PlayerContext,
        event: &KeyEvent,
    ) -> Option<PlayerStateMachine> {
        match event {
            KeyEvent::Down(code) if code == keys::JUMP => {
                jump(ctx);
                Some(Falling::enter(ctx).into())
            }
            KeyEvent::Down(code) if code == keys::DOWN => {
                // Let go and push off away from the wall.
                ctx.velocity.x = if ctx.facing_right {
                    -HOOK_PUSH_OFF_SPEED
                } else {
                    HOOK_PUSH_OFF_SPEED
                };
                Some(Falling::enter(ctx).into())
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Sitting {
    animation: Animation,
}

impl Sitting {
    pub fn enter(ctx: &mut PlayerContext) -> Self {
        ctx.velocity = Vec2::ZERO;
        ctx.hurtbox = SIT_HURTBOX.scaled(SPRITE_SCALE);
        Sitting {
            animation: build_animation(
                Playback::Once,
                25.0,
                &[
                    [65.0, 340.0, 19.0, 29.0],
                    [116.0, 340.0, 22.0, 29.0],
                    [168.0, 340.0, 20.0, 29.0],
                    [221.0, 340.0, 15.0, 29.0],
                ],
            ),
        }
    }

    fn update(
        &mut self,
        ctx: &mut PlayerContext,
        held: &KeyState,
        dt: f32,
    ) -> Option<PlayerStateMachine> {
        self.animation.advance(dt);
        if held.is_pressed(keys::LEFT) || held.is_pressed(keys::RIGHT) {
            return Some(Running::enter(ctx).into());
        }
        None
    }

    fn handle_input(
        &mut self,
        ctx: &mut PlayerContext,
        event: &KeyEvent,
    ) -> Option<PlayerStateMachine> {
        match event {
            KeyEvent::Down(code) if code == keys::LEFT || code == keys::RIGHT => {
                Some(Running::enter(ctx).into())
            }
            KeyEvent::Down(code) if code == keys::JUMP => {
                jump(ctx);
                Some(Falling::enter(ctx).into())
            }
            KeyEvent::Up(code) if code == keys::CROUCH => Some(Idle::enter(ctx).into()),
            _ => None,
        }
    }
}

/// Which attack a finishing combo stage may chain into.
#[derive(Debug, Clone, Copy)]
enum Chain {
    Second,
    Third,
}

/// Data shared by the three combo stages; the machine variant carries the
/// stage identity, this struct carries the countdown and the chain flag.
#[derive(Debug, Clone)]
pub struct Attack {
    animation: Animation,
    time_left: f32,
    chain_queued: bool,
}

impl Attack {
    pub fn first(ctx: &mut PlayerContext) -> Self {
        Attack::enter(
            ctx,
            build_animation(
                Playback::Once,
                12.0,
                &[
                    [58.0, 238.0, 25.0, 20.0],
                    [115.0, 222.0, 34.0, 36.0],
                    [215.0, 226.0, 20.0, 32.0],
                    [265.0, 232.0, 18.0, 26.0],
                ],
            ),
            Rect::new(-15.0, -20.0, 38.0, 35.0),
            Rect::new(-23.0, -20.0, 38.0, 35.0),
        )
    }

    pub fn second(ctx: &mut PlayerContext) -> Self {
        Attack::enter(
            ctx,
            build_animation(
                Playback::Once,
                12.0,
                &[
                    [13.0, 268.0, 20.0, 27.0],
                    [60.0, 266.0, 37.0, 29.0],
                    [102.0, 274.0, 32.0, 21.0],
                    [152.0, 273.0, 31.0, 22.0],
                ],
            ),
            Rect::new(-15.0, -15.0, 45.0, 30.0),
            Rect::new(-30.0, -15.0, 45.0, 30.0),
        )
    }

    pub fn third(ctx: &mut PlayerContext) -> Self {
        Attack::enter(
            ctx,
            build_animation(
                Playback::Once,
                14.0,
                &[
                    [152.0, 273.0, 31.0, 22.0],
                    [219.0, 269.0, 20.0, 26.0],
                    [270.0, 269.0, 20.0, 26.0],
                    [302.0, 272.0, 48.0, 23.0],
                    [3.0, 313.0, 31.0, 19.0],
                    [50.0, 312.0, 34.0, 20.0],
                    [100.0, 312.0, 34.0, 20.0],
                ],
            ),
            Rect::new(-23.0, -15.0, 65.0, 30.0),
            Rect::new(-37.0, -15.0, 65.0, 30.0),
        )
    }

    fn enter(
        ctx: &mut PlayerContext,
        animation: Animation,
        sword_facing_right: Rect,
        sword_facing_left: Rect,
    ) -> Self {
        ctx.hurtbox = STAND_HURTBOX.scaled(SPRITE_SCALE);
        let sword = if ctx.facing_right {
            sword_facing_right
        } else {
            sword_facing_left
        };
        ctx.sword_hitbox = Some(sword.scaled(SPRITE_SCALE));
        Attack {
            animation,
            time_left: ATTACK_TIME,
            chain_queued: false,
        }
    }

    fn update(
        &mut self,
        ctx: &mut PlayerContext,
        held: &KeyState,
        dt: f32,
        chain: Option<Chain>,
    ) -> Option<PlayerStateMachine> {
        self.animation.advance(dt);
        ctx.velocity.x *= VELOCITY_DECAY;
        self.time_left -= dt;
        if self.time_left < 0.0 && ctx.is_colliding {
            if self.chain_queued {
                match chain {
                    // The successor's entry overwrites the sword hitbox.
                    Some(Chain::Second) => {
                        return Some(PlayerStateMachine::SecondAttack(Attack::second(ctx)))
                    }
                    Some(Chain::Third) => {
                        return Some(PlayerStateMachine::ThirdAttack(Attack::third(ctx)))
                    }
                    None => {}
                }
            }
            ctx.sword_hitbox = None;
            if held.is_pressed(keys::LEFT) || held.is_pressed(keys::RIGHT) {
                return Some(Running::enter(ctx).into());
            }
            return Some(Idle::enter(ctx).into());
        }
        None
    }

    fn handle_input(
        &mut self,
        ctx: &mut PlayerContext,
        event: &KeyEvent,
    ) -> Option<PlayerStateMachine> {
        if let KeyEvent::Down(code) = event {
            if code == keys::JUMP && ctx.is_colliding {
                ctx.sword_hitbox = None;
                jump(ctx);
                return Some(Falling::enter(ctx).into());
            }
            if code == keys::ATTACK {
                self.chain_queued = true;
            }
        }
        None
    }
}

/// Exactly one of these is alive per player. Replacing the variant IS the
/// transition; the old state (and its animation) drops on assignment.
#[derive(Debug, Clone)]
pub enum PlayerStateMachine {
    Idle(Idle),
    Running(Running),
    Sliding(Sliding),
    Falling(Falling),
    Hooked(Hooked),
    Sitting(Sitting),
    FirstAttack(Attack),
    SecondAttack(Attack),
    ThirdAttack(Attack),
}

impl From<Idle> for PlayerStateMachine {
    fn from(state: Idle) -> Self {
        PlayerStateMachine::Idle(state)
    }
}

impl From<Running> for PlayerStateMachine {
    fn from(state: Running) -> Self {
        PlayerStateMachine::Running(state)
    }
}

impl From<Sliding> for PlayerStateMachine {
    fn from(state: Sliding) -> Self {
        PlayerStateMachine::Sliding(state)
    }
}

impl From<Falling> for PlayerStateMachine {
    fn from(state: Falling) -> Self {
        PlayerStateMachine::Falling(state)
    }
}

impl From<Hooked> for PlayerStateMachine {
    fn from(state: Hooked) -> Self {
        PlayerStateMachine::Hooked(state)
    }
}

impl From<Sitting> for PlayerStateMachine {
    fn from(state: Sitting) -> Self {
        PlayerStateMachine::Sitting(state)
    }
}

impl PlayerStateMachine {
    pub fn update(
        &mut self,
        ctx: &mut PlayerContext,
        held: &KeyState,
        dt: f32,
    ) -> Option<PlayerStateMachine> {
        use PlayerStateMachine::*;
        match self {
            Idle(state) => state.update(ctx, held, dt),
            Running(state) => state.update(ctx, held, dt),
            Sliding(state) => state.update(ctx, held, dt),
            Falling(state) => state.update(ctx, held, dt),
            Hooked(state) => state.update(ctx, held, dt),
            Sitting(state) => state.update(ctx, held, dt),
            FirstAttack(state) => state.update(ctx, held, dt, Some(Chain::Second)),
            SecondAttack(state) => state.update(ctx, held, dt, Some(Chain::Third)),
            ThirdAttack(state) => state.update(ctx, held, dt, None),
        }
    }

    pub fn handle_input(
        &mut self,
        ctx: &mut PlayerContext,
        event: &KeyEvent,
        held: &KeyState,
    ) -> Option<PlayerStateMachine> {
        use PlayerStateMachine::*;
        match self {
            Idle(state) => state.handle_input(ctx, event),
            Running(state) => state.handle_input(ctx, event, held),
            Sliding(state) => state.handle_input(ctx, event),
            Falling(state) => state.handle_input(ctx, event),
            Hooked(state) => state.handle_input(ctx, event),
            Sitting(state) => state.handle_input(ctx, event),
            FirstAttack(state) | SecondAttack(state) | ThirdAttack(state) => {
                state.handle_input(ctx, event)
            }
        }
    }

    /// Ground contact reported by the collision pass.
    pub fn on_hit_ground(&mut self, ctx: &mut PlayerContext) -> Option<PlayerStateMachine> {
        use PlayerStateMachine::*;
        match self {
            Falling(_) | Hooked(_) => Some(self::Idle::enter(ctx).into()),
            _ => None,
        }
    }

    /// Ledge-grab opportunity reported by the collision pass.
    pub fn on_ledge_hook(&mut self, ctx: &mut PlayerContext) -> Option<PlayerStateMachine> {
        use PlayerStateMachine::*;
        match self {
            Falling(_) => Some(self::Hooked::enter(ctx).into()),
            _ => None,
        }
    }

    /// No obstacle intersected the player this frame. Sliding and the
    /// attacks deliberately ignore this: a slide or swing can carry off a
    /// ledge without interrupting itself.
    pub fn on_start_falling(&mut self, ctx: &mut PlayerContext) -> Option<PlayerStateMachine> {
        use PlayerStateMachine::*;
        match self {
            Idle(_) | Running(_) | Hooked(_) | Sitting(_) => {
                Some(self::Falling::enter(ctx).into())
            }
            _ => None,
        }
    }

    pub fn animation(&self) -> &Animation {
        use PlayerStateMachine::*;
        match self {
            Idle(state) => &state.animation,
            Running(state) => &state.animation,
            Sliding(state) => &state.animation,
            Falling(state) => &state.animation,
            Hooked(state) => &state.animation,
            Sitting(state) => &state.animation,
            FirstAttack(state) | SecondAttack(state) | ThirdAttack(state) => &state.animation,
        }
    }

    pub fn name(&self) -> &'static str {
        use PlayerStateMachine::*;
        match self {
            Idle(_) => "idle",
            Running(_) => "running",
            Sliding(_) => "sliding",
            Falling(_) => "falling",
            Hooked(_) => "hooked",
            Sitting(_) => "sitting",
            FirstAttack(_) => "first_attack",
            SecondAttack(_) => "second_attack",
            ThirdAttack(_) => "third_attack",
        }
    }
}
