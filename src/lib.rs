//! For You core crate.
//!
//! A decorative greeting view compiled to WebAssembly: a cycling gradient
//! backdrop, floating heart emoji, and a 10-second arcade mini-game where
//! falling hearts are clicked for points. `start_app()` mounts the view into
//! the host page; `stop_app()` tears it down and cancels every timer it owns.
//! The game engine itself is plain Rust (`app::session`), so the native test
//! suite drives it without a browser.

use wasm_bindgen::prelude::*;

pub mod app;

pub use app::session::{
    COUNTDOWN_PERIOD_MS, HEART_FALL_MAX_SECS, HEART_FALL_MIN_SECS, HEART_LEFT_MAX_PCT,
    HEART_LEFT_MIN_PCT, Heart, LINGER_MS, Phase, SESSION_SECONDS, SPAWN_DEADLINE_MS,
    SPAWN_PERIOD_MS, Session,
};
pub use app::theme::{GRADIENT_THEMES, GradientTheme, THEME_PERIOD_MS, ThemeCycle};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    {
        let _ = console_log::init_with_level(log::Level::Info);
    }
}

// -----------------------------------------------------------------------------
// Greeting copy shared by the view and the native tests
// -----------------------------------------------------------------------------

/// Line under the title; reflects the most recently finished game.
pub fn greeting_line(last_score: u32) -> String {
    if last_score > 0 {
        format!("You caught {last_score} hearts! You're amazing!")
    } else {
        "Click the button for a surprise!".to_string()
    }
}

/// Start-button label.
pub fn start_button_label(last_score: u32) -> &'static str {
    if last_score > 0 {
        "Play Again!"
    } else {
        "Click for a Game!"
    }
}

/// Line on the game-over card.
pub fn game_over_line(score: u32) -> String {
    format!("You caught {score} hearts!")
}

// -----------------------------------------------------------------------------
// JS-callable entrypoints
// -----------------------------------------------------------------------------

/// Mount the greeting view into the host page. Idempotent: calling it again
/// while the view is already up is a no-op.
#[wasm_bindgen]
pub fn start_app() -> Result<(), JsValue> {
    app::mount()
}

/// Unmount the view and cancel every timer it owns. Safe to call when the
/// view is not mounted.
#[wasm_bindgen]
pub fn stop_app() {
    app::unmount();
}
