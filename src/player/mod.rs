//! The player aggregate: one context, one exclusively-owned state.
//!
//! All behavioral decisions live in `states`; this module drives the
//! per-frame update, integrates position, and runs the collision pass that
//! feeds physics events (`on_hit_ground` / `on_ledge_hook` /
//! `on_start_falling`) back into the active state.

pub mod animation;
pub mod states;

use crate::engine::input::{KeyEvent, KeyState};
use crate::physics::{self, Push, Rect, Vec2};
use states::{Idle, PlayerContext, PlayerStateMachine, MAX_HOOK_OFFSET};

/// Corrections are shortened by one unit so the player stays overlapping
/// the obstacle it rests against; that residual contact is what keeps
/// `is_colliding` true while standing on ground or pressed to a wall.
const COLLISION_BIAS: f32 = 1.0;

pub struct Player {
    context: PlayerContext,
    state: PlayerStateMachine,
}

impl Player {
    pub fn new(position: Vec2) -> Self {
        let mut context = PlayerContext::new(position);
        let state = PlayerStateMachine::Idle(Idle::enter(&mut context));
        Player { context, state }
    }

    /// One logical tick: state behavior, then position integration.
    pub fn update(&mut self, held: &KeyState, dt: f32) {
        if let Some(next) = self.state.update(&mut self.context, held, dt) {
            self.replace_state(next);
        }
        self.context.position += self.context.velocity * dt;
    }

    /// One discrete key event, consumed once.
    pub fn handle_input(&mut self, event: &KeyEvent, held: &KeyState) {
        if let Some(next) = self.state.handle_input(&mut self.context, event, held) {
            self.replace_state(next);
        }
    }

    /// Accumulate external acceleration (the world applies gravity here).
    pub fn apply_velocity(&mut self, delta: Vec2) {
        self.context.velocity += delta;
    }

    /// Collision pass, once per frame: every block, then every enemy. Sets
    /// `is_colliding` to the OR across all pairs; a contact-free frame
    /// notifies the state so walking off a platform edge reliably falls.
    pub fn handle_all_collisions(&mut self, blocks: &[Rect], enemies: &[Rect]) {
        self.context.is_colliding = false;
        for block in blocks {
            if self.handle_collision(block) {
                self.context.is_colliding = true;
            }
        }
        for enemy in enemies {
            if self.handle_collision(enemy) {
                self.context.is_colliding = true;
            }
        }
        if !self.context.is_colliding {
            if let Some(next) = self.state.on_start_falling(&mut self.context) {
                self.replace_state(next);
            }
        }
    }

    /// Does the active sword hitbox overlap `enemy`? Pure query; damage
    /// handling is the world's business.
    pub fn attack_hits(&self, enemy: &Rect) -> bool {
        match self.sword_hitbox() {
            Some(sword) => sword.intersects(enemy),
            None => false,
        }
    }

    fn handle_collision(&mut self, obstacle: &Rect) -> bool {
        let hurtbox = self.hurtbox();
        let Some(push) = physics::resolve(&hurtbox, obstacle) else {
            return false;
        };

        match push {
            Push::Left(overlap) => {
                self.context.position.x -= overlap - COLLISION_BIAS;
                self.check_ledge_hook(&hurtbox, obstacle);
            }
            Push::Right(overlap) => {
                self.context.position.x += overlap - COLLISION_BIAS;
                self.check_ledge_hook(&hurtbox, obstacle);
            }
            Push::Up(overlap) => {
                self.context.position.y -= overlap - COLLISION_BIAS;
                self.context.velocity.y = 0.0;
                if let Some(next) = self.state.on_hit_ground(&mut self.context) {
                    self.replace_state(next);
                }
            }
            Push::Down(overlap) => {
                self.context.position.y += overlap - COLLISION_BIAS;
                // Head bump: kill upward motion, no state notification.
                if self.context.velocity.y < 0.0 {
                    self.context.velocity.y = 0.0;
                }
            }
        }
        true
    }

    /// A horizontal push while descending, with the player's top edge
    /// inside the tolerance band around the obstacle's top, is a
    /// ledge-grab opportunity.
    fn check_ledge_hook(&mut self, hurtbox: &Rect, obstacle: &Rect) {
        if self.context.velocity.y > 0.0
            && hurtbox.y < obstacle.y + MAX_HOOK_OFFSET
            && hurtbox.y > obstacle.y - MAX_HOOK_OFFSET
        {
            if let Some(next) = self.state.on_ledge_hook(&mut self.context) {
                self.replace_state(next);
            }
        }
    }

    fn replace_state(&mut self, next: PlayerStateMachine) {
        #[cfg(all(debug_assertions, target_arch = "wasm32"))]
        log!("player state -> {}", next.name());
        self.state = next;
    }

    pub fn position(&self) -> Vec2 {
        self.context.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.context.velocity
    }

    pub fn facing_right(&self) -> bool {
        self.context.facing_right
    }

    pub fn is_colliding(&self) -> bool {
        self.context.is_colliding
    }

    /// World-space hurtbox.
    pub fn hurtbox(&self) -> Rect {
        self.context.hurtbox.translated(self.context.position)
    }

    /// World-space sword hitbox, if an attack is out.
    pub fn sword_hitbox(&self) -> Option<Rect> {
        self.context
            .sword_hitbox
            .map(|sword| sword.translated(self.context.position))
    }

    /// Sheet rect of the frame the active state is displaying.
    pub fn display_frame(&self) -> Rect {
        self.state.animation().current_frame()
    }

    pub fn state_name(&self) -> &'static str {
        self.state.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::keys;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    // Wide slab whose top sits just under the spawn point's feet: the idle
    // hurtbox bottom (y + 60) overlaps it slightly, so the first collision
    // pass settles into the stable 1-unit contact.
    fn ground() -> Vec<Rect> {
        vec![Rect::new(-1000.0, 59.0, 4000.0, 200.0)]
    }

    fn grounded_player() -> Player {
        let mut player = Player::new(Vec2::ZERO);
        player.handle_all_collisions(&ground(), &[]);
        assert_eq!(player.state_name(), "idle");
        assert!(player.is_colliding());
        player
    }

    fn held(codes: &[&str]) -> KeyState {
        let mut state = KeyState::new();
        for code in codes {
            state.set_pressed(code);
        }
        state
    }

    fn press(code: &str) -> KeyEvent {
        KeyEvent::Down(code.to_string())
    }

    fn release(code: &str) -> KeyEvent {
        KeyEvent::Up(code.to_string())
    }

    /// Run `frames` ticks with the given held keys, keeping the ground
    /// collision pass in the loop like the game does.
    fn run_frames(player: &mut Player, held: &KeyState, frames: usize) {
        for _ in 0..frames {
            player.update(held, DT);
            player.handle_all_collisions(&ground(), &[]);
        }
    }

    #[test]
    fn no_spurious_transitions_without_matching_input() {
        let mut player = grounded_player();
        let no_keys = KeyState::new();
        player.update(&no_keys, DT);
        player.handle_input(&press(keys::DOWN), &no_keys);
        player.handle_input(&release(keys::ATTACK), &no_keys);
        player.handle_all_collisions(&ground(), &[]);
        assert_eq!(player.state_name(), "idle");

        // Airborne: keys the fall ignores must not interrupt it.
        player.handle_all_collisions(&[], &[]);
        assert_eq!(player.state_name(), "falling");
        player.update(&no_keys, DT);
        player.handle_input(&press(keys::CROUCH), &no_keys);
        player.handle_input(&press(keys::DOWN), &no_keys);
        player.handle_input(&release(keys::ATTACK), &no_keys);
        assert_eq!(player.state_name(), "falling");

        // Mid-swing: unrelated keys must not cut the first attack short.
        let mut player = grounded_player();
        player.update(&held(&[keys::ATTACK]), DT);
        assert_eq!(player.state_name(), "first_attack");
        player.update(&no_keys, DT);
        player.handle_input(&press(keys::DOWN), &no_keys);
        player.handle_input(&release(keys::CROUCH), &no_keys);
        player.handle_all_collisions(&ground(), &[]);
        assert_eq!(player.state_name(), "first_attack");
    }

    #[test]
    fn idle_runs_when_a_horizontal_key_is_held() {
        let mut player = grounded_player();
        player.update(&held(&[keys::RIGHT]), DT);
        assert_eq!(player.state_name(), "running");
        player.update(&held(&[keys::RIGHT]), DT);
        assert!(player.velocity().x > 0.0);
        assert!(player.facing_right());
    }

    #[test]
    fn running_stops_when_both_horizontals_are_released() {
        let mut player = grounded_player();
        player.update(&held(&[keys::LEFT]), DT);
        player.update(&held(&[keys::LEFT]), DT);
        assert_eq!(player.state_name(), "running");
        assert!(!player.facing_right());
        player.handle_input(&release(keys::LEFT), &KeyState::new());
        assert_eq!(player.state_name(), "idle");
        assert_relative_eq!(player.velocity().x, 0.0);
    }

    #[test]
    fn losing_ground_contact_transitions_to_falling() {
        let mut player = grounded_player();
        player.handle_all_collisions(&[], &[]);
        assert_eq!(player.state_name(), "falling");
    }

    #[test]
    fn ground_contact_lands_with_one_unit_of_overlap() {
        let mut player = Player::new(Vec2::ZERO);
        player.handle_all_collisions(&[], &[]); // airborne -> falling
        player.apply_velocity(Vec2::new(0.0, 300.0));

        // Ground top at y = 80; the hurtbox bottom (60) is 20 units lower
        // after falling a few frames.
        let ground = vec![Rect::new(-1000.0, 80.0, 4000.0, 200.0)];
        let no_keys = KeyState::new();
        for _ in 0..10 {
            player.update(&no_keys, DT);
            player.handle_all_collisions(&ground, &[]);
            if player.state_name() == "idle" {
                break;
            }
        }
        assert_eq!(player.state_name(), "idle");
        assert_relative_eq!(player.velocity().y, 0.0);
        // Resolution leaves the feet exactly COLLISION_BIAS below the top.
        assert_relative_eq!(player.hurtbox().bottom(), 81.0);
    }

    #[test]
    fn slide_speed_decays_monotonically_and_keeps_its_sign() {
        let mut player = grounded_player();
        let right = held(&[keys::RIGHT]);
        player.update(&right, DT); // -> running
        player.update(&right, DT); // vx = running speed
        player.handle_input(&press(keys::CROUCH), &right);
        assert_eq!(player.state_name(), "sliding");

        let mut previous = player.velocity().x;
        assert!(previous > 0.0);
        for _ in 0..20 {
            player.update(&KeyState::new(), DT);
            player.handle_all_collisions(&ground(), &[]);
            let current = player.velocity().x;
            assert!(current > 0.0, "slide must not change direction");
            assert!(current < previous, "slide speed must strictly decay");
            previous = current;
        }
    }

    #[test]
    fn slide_ends_in_running_when_a_horizontal_is_still_held() {
        let mut player = grounded_player();
        let right = held(&[keys::RIGHT]);
        player.update(&right, DT);
        player.update(&right, DT);
        player.handle_input(&press(keys::CROUCH), &right);
        assert_eq!(player.state_name(), "sliding");
        // 0.4 s countdown at 1/60 steps.
        run_frames(&mut player, &right, 30);
        assert_eq!(player.state_name(), "running");
    }

    #[test]
    fn slide_ends_in_idle_with_no_keys_held() {
        let mut player = grounded_player();
        let right = held(&[keys::RIGHT]);
        player.update(&right, DT);
        player.update(&right, DT);
        player.handle_input(&press(keys::CROUCH), &right);
        run_frames(&mut player, &KeyState::new(), 30);
        assert_eq!(player.state_name(), "idle");
    }

    #[test]
    fn attack_chain_advances_on_a_queued_press() {
        let mut player = grounded_player();
        let no_keys = KeyState::new();
        player.handle_input(&press(keys::ATTACK), &no_keys);
        assert_eq!(player.state_name(), "first_attack");
        assert!(player.sword_hitbox().is_some());

        // Queue the chain inside the window, then let the countdown expire.
        player.handle_input(&press(keys::ATTACK), &no_keys);
        run_frames(&mut player, &no_keys, 30);
        assert_eq!(player.state_name(), "second_attack");

        // No further press: the combo drops back to idle and the sword
        // hitbox clears.
        run_frames(&mut player, &no_keys, 30);
        assert_eq!(player.state_name(), "idle");
        assert!(player.sword_hitbox().is_none());
    }

    #[test]
    fn full_combo_reaches_the_third_attack_and_stops_there() {
        let mut player = grounded_player();
        let no_keys = KeyState::new();
        player.handle_input(&press(keys::ATTACK), &no_keys);
        player.handle_input(&press(keys::ATTACK), &no_keys);
        run_frames(&mut player, &no_keys, 30);
        assert_eq!(player.state_name(), "second_attack");
        player.handle_input(&press(keys::ATTACK), &no_keys);
        run_frames(&mut player, &no_keys, 30);
        assert_eq!(player.state_name(), "third_attack");
        // A queued press past the end of the chain is ignored.
        player.handle_input(&press(keys::ATTACK), &no_keys);
        run_frames(&mut player, &no_keys, 30);
        assert_eq!(player.state_name(), "idle");
    }

    #[test]
    fn sword_hitbox_mirrors_when_facing_left() {
        let mut player = grounded_player();
        let right_sword = {
            let mut p = grounded_player();
            p.handle_input(&press(keys::ATTACK), &KeyState::new());
            p.sword_hitbox().unwrap()
        };
        // Face left first, then attack.
        player.update(&held(&[keys::LEFT]), DT);
        player.update(&held(&[keys::LEFT]), DT);
        player.handle_input(&release(keys::LEFT), &KeyState::new());
        assert!(!player.facing_right());
        player.handle_input(&press(keys::ATTACK), &KeyState::new());
        let left_sword = player.sword_hitbox().unwrap();
        assert!(left_sword.x < right_sword.x);
        assert_relative_eq!(left_sword.width, right_sword.width);
    }

    #[test]
    fn double_jump_boosts_exactly_once() {
        let mut player = grounded_player();
        player.handle_all_collisions(&[], &[]); // -> falling
        player.apply_velocity(Vec2::new(0.0, 100.0));
        let no_keys = KeyState::new();
        player.update(&no_keys, DT);

        player.handle_input(&press(keys::JUMP), &no_keys);
        let boosted = player.velocity().y;
        assert!(boosted < 0.0, "double jump must launch upward");

        // Second press before landing grants nothing.
        player.handle_input(&press(keys::JUMP), &no_keys);
        assert_relative_eq!(player.velocity().y, boosted);
        assert_eq!(player.state_name(), "falling");
    }

    #[test]
    fn double_jump_expires_after_the_held_frame_window() {
        let mut player = grounded_player();
        player.handle_all_collisions(&[], &[]);
        let jump_held = held(&[keys::JUMP]);
        // Hold jump past the 5-frame window, then press.
        for _ in 0..6 {
            player.update(&jump_held, DT);
        }
        let before = player.velocity().y;
        player.handle_input(&press(keys::JUMP), &jump_held);
        assert_relative_eq!(player.velocity().y, before);
    }

    #[test]
    fn jump_from_idle_enters_falling_with_upward_velocity() {
        let mut player = grounded_player();
        let y_before = player.position().y;
        player.handle_input(&press(keys::JUMP), &KeyState::new());
        assert_eq!(player.state_name(), "falling");
        assert!(player.velocity().y < 0.0);
        // The shared jump routine nudges the player up one unit first.
        assert_relative_eq!(player.position().y, y_before - 1.0);
    }

    #[test]
    fn descending_wall_contact_within_the_band_hooks() {
        let mut player = Player::new(Vec2::ZERO);
        player.handle_all_collisions(&[], &[]); // -> falling
        player.apply_velocity(Vec2::new(0.0, 50.0));
        // Wall to the right: shallow horizontal overlap, top edge within
        // the hook tolerance of the player's top (-60).
        let wall = Rect::new(30.0, -80.0, 400.0, 400.0);
        player.handle_all_collisions(&[wall], &[]);
        assert_eq!(player.state_name(), "hooked");

        // Hanging: velocity forced to zero every update.
        player.apply_velocity(Vec2::new(0.0, 33.0));
        player.update(&KeyState::new(), DT);
        assert_relative_eq!(player.velocity().y, 0.0);
    }

    #[test]
    fn wall_contact_outside_the_band_does_not_hook() {
        let mut player = Player::new(Vec2::ZERO);
        player.handle_all_collisions(&[], &[]);
        player.apply_velocity(Vec2::new(0.0, 50.0));
        // Same wall but with its top far above the player's top edge.
        let wall = Rect::new(30.0, -300.0, 400.0, 700.0);
        player.handle_all_collisions(&[wall], &[]);
        assert_eq!(player.state_name(), "falling");
    }

    #[test]
    fn hooked_down_key_pushes_off_away_from_the_wall() {
        let mut player = Player::new(Vec2::ZERO);
        player.handle_all_collisions(&[], &[]);
        player.apply_velocity(Vec2::new(0.0, 50.0));
        let wall = Rect::new(30.0, -80.0, 400.0, 400.0);
        player.handle_all_collisions(&[wall], &[]);
        assert_eq!(player.state_name(), "hooked");
        assert!(player.facing_right());

        player.handle_input(&press(keys::DOWN), &KeyState::new());
        assert_eq!(player.state_name(), "falling");
        assert!(player.velocity().x < 0.0, "push-off moves away from the wall");
    }

    #[test]
    fn sitting_follows_the_crouch_modifier() {
        let mut player = grounded_player();
        player.handle_input(&press(keys::CROUCH), &KeyState::new());
        assert_eq!(player.state_name(), "sitting");
        // Crouched hurtbox is shorter than the standing one.
        assert!(player.hurtbox().height < 120.0);
        player.handle_input(&release(keys::CROUCH), &KeyState::new());
        assert_eq!(player.state_name(), "idle");
    }

    #[test]
    fn head_bump_zeroes_upward_velocity_only() {
        let mut player = grounded_player();
        player.handle_input(&press(keys::JUMP), &KeyState::new());
        assert!(player.velocity().y < 0.0);
        // Ceiling slab overlapping the player's head by 5 units from above.
        let ceiling = Rect::new(-1000.0, -256.0, 4000.0, 200.0);
        player.handle_all_collisions(&[ceiling], &[]);
        assert_relative_eq!(player.velocity().y, 0.0);
        assert_eq!(player.state_name(), "falling");
    }

    #[test]
    fn attack_hits_requires_an_active_sword_hitbox() {
        let mut player = grounded_player();
        let enemy = Rect::new(60.0, -40.0, 50.0, 50.0);
        assert!(!player.attack_hits(&enemy));
        player.handle_input(&press(keys::ATTACK), &KeyState::new());
        assert!(player.attack_hits(&enemy));
        let far_enemy = Rect::new(600.0, -40.0, 50.0, 50.0);
        assert!(!player.attack_hits(&far_enemy));
    }
}
