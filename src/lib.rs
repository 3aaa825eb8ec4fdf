#[macro_use]
pub mod browser;
pub mod engine;
pub mod game;
pub mod physics;
pub mod player;

use engine::GameLoop;
use game::SwordHero;
use wasm_bindgen::prelude::*;

/// Main entry for the WebAssembly module: install the panic hook and hand
/// control to the game loop. Load failures surface on the console instead
/// of tearing the page down.
#[wasm_bindgen]
pub fn main_js() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    browser::spawn_local(async move {
        if let Err(err) = GameLoop::start(SwordHero::new()).await {
            log!("Could not start game loop : {:#?}", err);
        }
    });

    Ok(())
}
