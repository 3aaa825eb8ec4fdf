//! The game itself: loading, the world, and the per-frame wiring between
//! input, the player and the collision pass.
//!
//! Update order per logical step:
//!   1. discrete key events -> active state (consumed once)
//!   2. gravity             -> player velocity
//!   3. state update + position integration
//!   4. collision pass over every block and enemy rect
//!   5. sword-hitbox query culls hit enemies
//!
//! Draw order matters : blocks -> enemies -> player.

use crate::browser;
#[cfg(debug_assertions)]
use crate::engine::DebugDraw;
use crate::engine::input::{KeyEvent, KeyState};
use crate::engine::{self, Game, Renderer};
use crate::physics::{Rect, Vec2};
use crate::player::states::SPRITE_SCALE;
use crate::player::Player;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use futures::join;
use serde::Deserialize;
use web_sys::HtmlImageElement;

const GRAVITY: f32 = 2000.0;

const CANVAS: Rect = Rect::new(0.0, 0.0, 1200.0, 900.0);

pub enum SwordHero {
    /// Waiting for the sprite sheet and level description.
    Loading,
    /// Active game with a populated world.
    Loaded(World),
}

impl SwordHero {
    const IMAGE_PATH: &'static str = "hero.png";
    const LEVEL_PATH: &'static str = "level.json";

    pub fn new() -> Self {
        SwordHero::Loading
    }

    async fn load_level() -> Result<Level> {
        browser::fetch_json::<Level>(Self::LEVEL_PATH)
            .await
            .with_context(|| format!("Failed to load level from : {}", Self::LEVEL_PATH))
    }

    async fn load_sprite_image() -> Result<HtmlImageElement> {
        engine::load_image(Self::IMAGE_PATH).await.with_context(|| {
            format!(
                "Failed to load sprite image resource from : {}",
                Self::IMAGE_PATH
            )
        })
    }
}

impl Default for SwordHero {
    fn default() -> Self {
        SwordHero::new()
    }
}

#[async_trait(?Send)]
impl Game for SwordHero {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self {
            SwordHero::Loading => {
                // Independent resources load in parallel; total time is the
                // slowest of the two.
                let (level_result, image_result) =
                    join!(Self::load_level(), Self::load_sprite_image());
                let level = level_result?;
                let image = image_result?;
                log!(
                    "level loaded : {} blocks, {} enemies",
                    level.blocks.len(),
                    level.enemies.len()
                );
                Ok(Box::new(SwordHero::Loaded(World::new(level, image))))
            }
            SwordHero::Loaded(_) => Err(anyhow!("Game is already initialized")),
        }
    }

    fn update(&mut self, keystate: &KeyState, events: &[KeyEvent]) {
        if let SwordHero::Loaded(world) = self {
            world.update(keystate, events);
        }
    }

    fn draw(&mut self, renderer: &Renderer) {
        if let SwordHero::Loaded(world) = self {
            world.draw(renderer);
        }
    }
}

/// Level geometry as served next to the wasm bundle; rects are
/// `[x, y, width, height]` in world units.
#[derive(Debug, Deserialize, Clone)]
pub struct Level {
    spawn: [f32; 2],
    blocks: Vec<[f32; 4]>,
    enemies: Vec<[f32; 4]>,
}

fn to_rects(raw: &[[f32; 4]]) -> Vec<Rect> {
    raw.iter()
        .map(|&[x, y, w, h]| Rect::new(x, y, w, h))
        .collect()
}

pub struct World {
    player: Player,
    blocks: Vec<Rect>,
    enemies: Vec<Rect>,
    sheet: HtmlImageElement,
}

impl World {
    fn new(level: Level, sheet: HtmlImageElement) -> Self {
        World {
            player: Player::new(Vec2::new(level.spawn[0], level.spawn[1])),
            blocks: to_rects(&level.blocks),
            enemies: to_rects(&level.enemies),
            sheet,
        }
    }

    fn update(&mut self, keystate: &KeyState, events: &[KeyEvent]) {
        for event in events {
            self.player.handle_input(event, keystate);
        }
        self.player
            .apply_velocity(Vec2::new(0.0, GRAVITY * engine::FRAME_DT));
        self.player.update(keystate, engine::FRAME_DT);
        self.player
            .handle_all_collisions(&self.blocks, &self.enemies);

        // Combat is just the overlap query; hit enemies vanish.
        let player = &self.player;
        self.enemies.retain(|enemy| !player.attack_hits(enemy));
    }

    fn draw(&self, renderer: &Renderer) {
        renderer.clear(&CANVAS);
        for block in &self.blocks {
            renderer.fill_rect(block, "rgb(80, 80, 90)");
        }
        for enemy in &self.enemies {
            renderer.fill_rect(enemy, "rgb(170, 40, 40)");
        }

        // Sprite frame centered on the player position, mirrored when
        // facing left.
        let frame = self.player.display_frame();
        let destination = Rect::new(
            self.player.position().x - frame.width * SPRITE_SCALE / 2.0,
            self.player.position().y - frame.height * SPRITE_SCALE / 2.0,
            frame.width * SPRITE_SCALE,
            frame.height * SPRITE_SCALE,
        );
        if self.player.facing_right() {
            renderer.draw_image(&self.sheet, &frame, &destination);
        } else {
            renderer.draw_image_flipped(&self.sheet, &frame, &destination);
        }

        #[cfg(debug_assertions)]
        {
            self.player.hurtbox().draw_debug(renderer);
            if let Some(sword) = self.player.sword_hitbox() {
                sword.draw_debug(renderer);
            }
        }
    }
}
