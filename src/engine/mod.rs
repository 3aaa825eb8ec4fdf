//! Frame loop, renderer and asset loading: the machinery between the
//! browser and the game.
//!
//! ┌─────────────┐          ┌─────────────┐          ┌─────────────┐
//! │   lib.rs    │  start   │  engine     │  update  │   game.rs   │
//! │  main_js()  ├─────────►│  GameLoop   ├─────────►│  SwordHero  │
//! └─────────────┘          └──────┬──────┘          └─────────────┘
//!                                 │
//!                          ┌──────┴──────┐
//!                          │  KeyState + │
//!                          │  KeyEvents  │
//!                          └─────────────┘
//!
//! The loop runs on requestAnimationFrame and advances game logic in fixed
//! 1/60 s steps from an accumulated delta, so update count is independent
//! of display refresh. Discrete key events are drained every rendered frame
//! and queued until a logical step runs; the first step consumes the queue.

pub mod input;

use crate::browser;
use anyhow::{anyhow, Error, Result};
use async_trait::async_trait;
use futures::channel::oneshot::channel;
use input::{KeyEvent, KeyState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

pub use crate::physics::{Rect, Vec2};

#[async_trait(?Send)]
pub trait Game {
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    fn update(&mut self, keystate: &KeyState, events: &[KeyEvent]);
    fn draw(&mut self, renderer: &Renderer);
}

/// Logical timestep in seconds; every `Game::update` advances exactly this.
pub const FRAME_DT: f32 = 1.0 / 60.0;
// length of a logical frame in milliseconds
const FRAME_SIZE: f32 = FRAME_DT * 1000.0;

pub struct GameLoop {
    last_frame: f64,
    accumulated_delta: f32,
    pending_events: Vec<KeyEvent>,
}

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;

impl GameLoop {
    pub async fn start(game: impl Game + 'static) -> Result<()> {
        let mut keyevent_receiver = input::prepare_input()?;
        let mut game = game.initialize().await?;
        let mut game_loop = GameLoop {
            last_frame: browser::now()?,
            accumulated_delta: 0.0,
            pending_events: Vec::new(),
        };
        let renderer = Renderer {
            context: browser::context()?,
        };
        let mut keystate = KeyState::new();
        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(browser::create_raf_closure(move |perf: f64| {
            let events = input::process_input(&mut keystate, &mut keyevent_receiver);
            game_loop.advance(&mut *game, &keystate, events, perf);
            game.draw(&renderer);
            let _ = browser::request_animation_frame(f.borrow().as_ref().unwrap());
        }));

        browser::request_animation_frame(
            g.borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?,
        )?;

        Ok(())
    }

    /// Fold this callback's drained events into the pending queue, then run
    /// as many fixed steps as the accumulated delta affords. The first step
    /// consumes the whole queue; a callback that affords no step (display
    /// refresh above 60 Hz) leaves it queued for the next one.
    fn advance(&mut self, game: &mut dyn Game, keystate: &KeyState, events: Vec<KeyEvent>, perf: f64) {
        self.pending_events.extend(events);
        self.accumulated_delta += (perf - self.last_frame) as f32;
        while self.accumulated_delta > FRAME_SIZE {
            game.update(keystate, &self.pending_events);
            self.pending_events.clear();
            self.accumulated_delta -= FRAME_SIZE;
        }
        self.last_frame = perf;
    }
}

pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn clear(&self, rect: &Rect) {
        self.context.clear_rect(
            rect.x.into(),
            rect.y.into(),
            rect.width.into(),
            rect.height.into(),
        );
    }

    pub fn draw_image(&self, image: &HtmlImageElement, frame: &Rect, destination: &Rect) {
        self.context
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                image,
                frame.x.into(),
                frame.y.into(),
                frame.width.into(),
                frame.height.into(),
                destination.x.into(),
                destination.y.into(),
                destination.width.into(),
                destination.height.into(),
            )
            .expect("Drawing is throwing exceptions! Unrecoverable error");
    }

    /// `draw_image` mirrored around the destination's vertical center line
    /// (sprites are authored facing right).
    pub fn draw_image_flipped(&self, image: &HtmlImageElement, frame: &Rect, destination: &Rect) {
        self.context.save();
        let _ = self
            .context
            .translate((destination.x + destination.width).into(), 0.0);
        let _ = self.context.scale(-1.0, 1.0);
        let mirrored = Rect::new(0.0, destination.y, destination.width, destination.height);
        self.draw_image(image, frame, &mirrored);
        self.context.restore();
    }

    pub fn fill_rect(&self, rect: &Rect, style: &str) {
        self.context.set_fill_style_str(style);
        self.context.fill_rect(
            rect.x.into(),
            rect.y.into(),
            rect.width.into(),
            rect.height.into(),
        );
    }

    pub fn stroke_rect(&self, rect: &Rect, style: &str) {
        self.context.set_stroke_style_str(style);
        self.context.stroke_rect(
            rect.x.into(),
            rect.y.into(),
            rect.width.into(),
            rect.height.into(),
        );
    }
}

#[cfg(debug_assertions)]
pub trait DebugDraw {
    fn draw_debug(&self, renderer: &Renderer);
}

#[cfg(debug_assertions)]
impl DebugDraw for Rect {
    fn draw_debug(&self, renderer: &Renderer) {
        renderer.stroke_rect(self, "rgba(255, 80, 80, 0.8)");
    }
}

/// Asynchronously load an image from a given source path.
pub async fn load_image(source: &str) -> Result<HtmlImageElement> {
    let image = browser::new_image()?;
    let (tx, rx) = channel::<Result<(), Error>>();
    let success_tx = Rc::new(RefCell::new(Some(tx)));
    let error_tx = success_tx.clone();

    let success_callback = browser::closure_once(move || {
        if let Some(tx) = success_tx.borrow_mut().take() {
            let _ = tx.send(Ok(()));
        }
    });

    let error_callback = browser::closure_once(move |err: JsValue| {
        if let Some(tx) = error_tx.borrow_mut().take() {
            let _ = tx.send(Err(anyhow!("Error loading image: {:#?}", err)));
        }
    });

    image.set_onload(Some(success_callback.as_ref().unchecked_ref()));
    image.set_onerror(Some(error_callback.as_ref().unchecked_ref()));
    image.set_src(source);

    // keep callbacks alive until the image loads or errors
    success_callback.forget();
    error_callback.forget();

    // outer ? is the channel, inner ? the load result
    rx.await??;

    Ok(image)
}
