//! Browser adapter for the reaction game: one animation-frame loop drives the
//! [`SessionDriver`], draws the play area, and mirrors score / time / active
//! skill into optional overlay elements provided by the page.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, window};

use super::clock::SessionDriver;
use super::{EffectFrame, EffectKind, GameRules, GameSession, GameSnapshot, Phase, PlayArea, Target};
use crate::dom;
use crate::error::{Result, WidgetError};

/// Overlay element ids; each is optional.
pub const SCORE_ID: &str = "fw-game-score";
pub const TIME_ID: &str = "fw-game-time";
pub const ACTIVE_ID: &str = "fw-game-active";

// Transient hit feedback; the target itself is already gone from the session.
struct HitEffect {
    target: Target,
    kind: EffectKind,
    start_ms: f64,
}

struct GameState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    session: GameSession,
    driver: SessionDriver,
    rng: StdRng,
    area: PlayArea,
    effects: Vec<HitEffect>,
    raf_id: Option<i32>,
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

struct Hooks {
    frame: FrameCallback,
    on_click: Closure<dyn FnMut(web_sys::MouseEvent)>,
}

thread_local! {
    static GAME_STATE: RefCell<Option<GameState>> = const { RefCell::new(None) };
    static GAME_HOOKS: RefCell<Option<Hooks>> = const { RefCell::new(None) };
}

pub fn mount(canvas_id: &str, skills: Vec<String>, rules: GameRules) -> Result<()> {
    unmount();
    let (canvas, ctx) = dom::canvas_2d(canvas_id)?;
    let size = dom::fit_to_container(&canvas);
    log::info!(
        "game mounted on #{canvas_id}: {} skills, {}x{}",
        skills.len(),
        size.width,
        size.height
    );
    let frame: FrameCallback = Rc::new(RefCell::new(None));
    let next = frame.clone();
    // Ticks, clicks and effects all read `performance.now()`; the frame
    // timestamp can lag behind a click handled in the same frame.
    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        let mounted = GAME_STATE.with(|cell| match cell.borrow_mut().as_mut() {
            Some(state) => {
                state.raf_id = None;
                game_tick(state, dom::performance_now());
                true
            }
            None => false,
        });
        if mounted {
            request_frame(&next);
        }
    }) as Box<dyn FnMut(f64)>));

    let on_click = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
        let (x, y) = (evt.offset_x() as f64, evt.offset_y() as f64);
        GAME_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                on_pointer(state, x, y);
            }
        });
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;

    GAME_STATE.with(|cell| {
        cell.replace(Some(GameState {
            canvas,
            ctx,
            session: GameSession::new(skills, rules),
            driver: SessionDriver::new(),
            rng: StdRng::from_entropy(),
            area: PlayArea::new(size.width, size.height),
            effects: Vec::new(),
            raf_id: None,
        }))
    });

    request_frame(&frame);
    GAME_HOOKS.with(|cell| cell.replace(Some(Hooks { frame, on_click })));
    Ok(())
}

/// Tear down: disarm the session clocks, cancel the frame, detach the click
/// listener. Returns whether a game was mounted.
pub fn unmount() -> bool {
    let state = GAME_STATE.with(|cell| cell.borrow_mut().take());
    let hooks = GAME_HOOKS.with(|cell| cell.borrow_mut().take());
    let Some(mut state) = state else {
        if let Some(h) = hooks {
            h.frame.borrow_mut().take();
        }
        return false;
    };
    state.driver.disarm();
    if let (Some(id), Some(win)) = (state.raf_id, window()) {
        let _ = win.cancel_animation_frame(id);
    }
    if let Some(h) = hooks {
        let _ = state
            .canvas
            .remove_event_listener_with_callback("click", h.on_click.as_ref().unchecked_ref());
        // Breaks the frame closure's self reference.
        h.frame.borrow_mut().take();
    }
    log::info!("game unmounted");
    true
}

pub fn start() -> Result<bool> {
    with_game(|state| {
        let now = dom::performance_now();
        state.area = current_area(&state.canvas);
        state.effects.clear();
        state.driver.start(&mut state.session, now, &mut state.rng)
    })
}

pub fn end() -> Result<bool> {
    with_game(|state| state.driver.end(&mut state.session))
}

pub fn snapshot() -> Result<GameSnapshot> {
    with_game(|state| state.session.snapshot())
}

fn with_game<T>(f: impl FnOnce(&mut GameState) -> T) -> Result<T> {
    GAME_STATE.with(|cell| {
        cell.borrow_mut()
            .as_mut()
            .map(f)
            .ok_or(WidgetError::NotMounted("game"))
    })
}

fn request_frame(frame: &FrameCallback) {
    let Some(win) = window() else { return };
    let id = frame
        .borrow()
        .as_ref()
        .and_then(|cb| win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    GAME_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            state.raf_id = id;
        }
    });
}

fn current_area(canvas: &HtmlCanvasElement) -> PlayArea {
    let size = dom::fit_to_container(canvas);
    PlayArea::new(size.width, size.height)
}

fn on_pointer(state: &mut GameState, x: f64, y: f64) {
    let Some(id) = state.session.target_at(x, y) else {
        return;
    };
    if let Some(outcome) = state.session.hit(id) {
        state.effects.push(HitEffect {
            kind: outcome.effect(),
            target: outcome.target,
            start_ms: dom::performance_now(),
        });
    }
}

// --- Tick & Rendering -----------------------------------------------------------

fn game_tick(state: &mut GameState, now: f64) {
    state.area = current_area(&state.canvas);
    state
        .driver
        .advance(now, &mut state.session, state.area, &mut state.rng);
    state
        .effects
        .retain(|e| e.kind.frame_at(e.start_ms, now).is_some());
    render_game(state, now);
    update_overlays(&state.session);
}

fn update_overlays(session: &GameSession) {
    dom::set_text(SCORE_ID, &session.score().to_string());
    dom::set_text(TIME_ID, &format!("{}s", session.time_remaining()));
    let active = match session.phase() {
        Phase::Running => session.active_skill().unwrap_or("Get ready..."),
        Phase::Idle | Phase::Completed => "Waiting to start",
    };
    dom::set_text(ACTIVE_ID, active);
}

fn render_game(state: &GameState, now: f64) {
    let ctx = &state.ctx;
    let (w, h) = (state.area.width, state.area.height);
    ctx.clear_rect(0.0, 0.0, w, h);
    ctx.set_fill_style_str("#111827");
    ctx.fill_rect(0.0, 0.0, w, h);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    let diameter = state.session.rules().target_diameter;
    let active = state.session.active_skill();
    for t in state.session.targets() {
        draw_bubble(ctx, t, diameter, active, None);
    }
    for e in &state.effects {
        if let Some(frame) = e.kind.frame_at(e.start_ms, now) {
            draw_bubble(ctx, &e.target, diameter, active, Some(frame));
        }
    }

    match state.session.phase() {
        Phase::Idle => {
            ctx.set_fill_style_str("#9ca3af");
            ctx.set_font("20px sans-serif");
            ctx.fill_text("Press start to play", w / 2.0, h / 2.0).ok();
        }
        Phase::Completed => {
            ctx.set_fill_style_str("rgba(17, 24, 39, 0.9)");
            ctx.fill_rect(0.0, 0.0, w, h);
            ctx.set_fill_style_str("#ffffff");
            ctx.set_font("bold 24px sans-serif");
            ctx.fill_text("Game over!", w / 2.0, h / 2.0 - 20.0).ok();
            ctx.set_fill_style_str("#3b82f6");
            ctx.set_font("20px sans-serif");
            let line = format!("Final score: {}", state.session.score());
            ctx.fill_text(&line, w / 2.0, h / 2.0 + 16.0).ok();
        }
        Phase::Running => {}
    }
}

fn draw_bubble(
    ctx: &CanvasRenderingContext2d,
    t: &Target,
    diameter: f64,
    active: Option<&str>,
    effect: Option<EffectFrame>,
) {
    let fx = effect.unwrap_or(EffectFrame {
        scale: 1.0,
        alpha: 1.0,
        offset_x: 0.0,
    });
    let (cx, cy) = t.center(diameter);
    let cx = cx + fx.offset_x;
    let r = t.radius(diameter) * fx.scale;
    ctx.set_global_alpha(fx.alpha.clamp(0.0, 1.0));
    ctx.begin_path();
    ctx.arc(cx, cy, r, 0.0, TAU).ok();
    let matches = active == Some(t.skill_name.as_str());
    ctx.set_fill_style_str(if matches { "#22c55e" } else { "#3b82f6" });
    ctx.fill();
    ctx.set_fill_style_str("#ffffff");
    ctx.set_font(&format!("{}px sans-serif", (12.0 * t.scale * fx.scale).round()));
    ctx.fill_text(&t.skill_name, cx, cy).ok();
    ctx.set_global_alpha(1.0);
}
