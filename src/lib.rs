//! Folio widgets core crate.
//!
//! Interactive pieces of a portfolio page, compiled to WASM: a canvas skills
//! radar chart, a 30 second reaction mini-game, and a visitor recommendation
//! panel. The page calls `configure()` once (optional), then mounts widgets on
//! its own `<canvas>` elements and unmounts them on teardown.
//!
//! Pure logic (`radar::render`, `game::GameSession`, `game::clock`,
//! `recommend`) has no browser dependency and is tested natively.

use wasm_bindgen::prelude::*;

pub mod config;
mod dom;
pub mod error;
pub mod game;
mod logging;
pub mod radar;
pub mod recommend;
pub mod skills;

pub use error::WidgetError;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    logging::init(level);
}

// -----------------------------------------------------------------------------
// Configuration
// -----------------------------------------------------------------------------

/// Install site configuration (skills, radar options, game rules) from JSON.
/// Widgets mounted afterwards use it.
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    let cfg = config::SiteConfig::from_json(json)?;
    config::install(cfg);
    Ok(())
}

// -----------------------------------------------------------------------------
// Radar chart
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn mount_radar(canvas_id: &str) -> Result<(), JsValue> {
    let cfg = config::current();
    radar::canvas::mount(canvas_id, cfg.skills, cfg.radar)?;
    Ok(())
}

#[wasm_bindgen]
pub fn unmount_radar() -> bool {
    radar::canvas::unmount()
}

// -----------------------------------------------------------------------------
// Reaction game
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn mount_game(canvas_id: &str) -> Result<(), JsValue> {
    let cfg = config::current();
    game::canvas::mount(canvas_id, skills::skill_names(&cfg.skills), cfg.game)?;
    Ok(())
}

/// Start (or restart) a session. Returns false if one is already running.
#[wasm_bindgen]
pub fn start_game() -> Result<bool, JsValue> {
    Ok(game::canvas::start()?)
}

/// Stop the running session early. Returns false if none was running.
#[wasm_bindgen]
pub fn end_game() -> Result<bool, JsValue> {
    Ok(game::canvas::end()?)
}

#[wasm_bindgen]
pub fn unmount_game() -> bool {
    game::canvas::unmount()
}

/// Current game state as JSON (phase, score, time, active skill, targets).
#[wasm_bindgen]
pub fn game_snapshot() -> Result<String, JsValue> {
    let snap = game::canvas::snapshot()?;
    serde_json::to_string(&snap).map_err(|e| WidgetError::from(e).into())
}

// -----------------------------------------------------------------------------
// Recommendations
// -----------------------------------------------------------------------------

/// Recommendation panel for `visitor` ("recruiter", "peer", "client", or
/// anything else for the general list) as JSON `{visitor, label, items}`.
#[wasm_bindgen]
pub fn recommendations(visitor: &str) -> Result<String, JsValue> {
    let visitor: recommend::VisitorType = visitor.parse().unwrap_or_default();
    serde_json::to_string(&recommend::panel(visitor)).map_err(|e| WidgetError::from(e).into())
}

#[wasm_bindgen]
pub fn device_type(viewport_width: f64) -> String {
    recommend::DeviceType::from_width(viewport_width)
        .as_str()
        .to_string()
}
