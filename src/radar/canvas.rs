//! Browser adapter for the radar chart: replays [`DrawCommand`]s onto a 2d
//! context, runs the reveal animation on `requestAnimationFrame`, and redraws
//! whenever the container's measured size changes.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, ResizeObserver, window};

use super::{DrawCommand, RadarOptions, RevealTween, SurfaceSize, render};
use crate::dom;
use crate::error::Result;
use crate::skills::Skill;

struct RadarState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    skills: Vec<Skill>,
    options: RadarOptions,
    tween: RevealTween,
    size: SurfaceSize,
    raf_id: Option<i32>,
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Callbacks that must stay alive while mounted and be detached on unmount.
struct Hooks {
    frame: FrameCallback,
    on_resize: Closure<dyn FnMut()>,
    observer: ResizeObserver,
}

thread_local! {
    static RADAR_STATE: RefCell<Option<RadarState>> = const { RefCell::new(None) };
    static RADAR_HOOKS: RefCell<Option<Hooks>> = const { RefCell::new(None) };
}

pub fn mount(canvas_id: &str, skills: Vec<Skill>, options: RadarOptions) -> Result<()> {
    unmount();
    let (canvas, ctx) = dom::canvas_2d(canvas_id)?;
    let size = dom::fit_to_container(&canvas);
    let tween = RevealTween::new(dom::performance_now(), options.reveal_ms);
    log::info!(
        "radar mounted on #{canvas_id}: {} skills, {}x{}",
        skills.len(),
        size.width,
        size.height
    );
    let frame: FrameCallback = Rc::new(RefCell::new(None));
    let next = frame.clone();
    // Same clock as the tween start and the resize redraws.
    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        let again = RADAR_STATE.with(|cell| match cell.borrow_mut().as_mut() {
            Some(state) => {
                let now = dom::performance_now();
                state.raf_id = None;
                draw(state, now);
                !state.tween.finished(now)
            }
            None => false,
        });
        if again {
            request_frame(&next);
        }
    }) as Box<dyn FnMut(f64)>));

    let on_resize = Closure::wrap(Box::new(move || {
        RADAR_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                state.size = dom::fit_to_container(&state.canvas);
                log::debug!("radar resized to {}x{}", state.size.width, state.size.height);
                draw(state, dom::performance_now());
            }
        });
    }) as Box<dyn FnMut()>);
    // fit_to_container measures the parent, so that is what gets observed.
    let observed: Element = match canvas.parent_element() {
        Some(parent) => parent,
        None => canvas.clone().into(),
    };
    let observer = ResizeObserver::new(on_resize.as_ref().unchecked_ref())?;
    observer.observe(&observed);

    RADAR_STATE.with(|cell| {
        cell.replace(Some(RadarState {
            canvas,
            ctx,
            skills,
            options,
            tween,
            size,
            raf_id: None,
        }))
    });

    request_frame(&frame);
    RADAR_HOOKS.with(|cell| {
        cell.replace(Some(Hooks {
            frame,
            on_resize,
            observer,
        }))
    });
    Ok(())
}

/// Cancel the pending frame, disconnect the resize observer, drop all state.
/// Returns whether a chart was mounted.
pub fn unmount() -> bool {
    let state = RADAR_STATE.with(|cell| cell.borrow_mut().take());
    let hooks = RADAR_HOOKS.with(|cell| cell.borrow_mut().take());
    if let (Some(id), Some(win)) = (state.as_ref().and_then(|s| s.raf_id), window()) {
        let _ = win.cancel_animation_frame(id);
    }
    if let Some(h) = hooks {
        h.observer.disconnect();
        // Breaks the frame closure's self reference.
        h.frame.borrow_mut().take();
    }
    if state.is_some() {
        log::info!("radar unmounted");
    }
    state.is_some()
}

fn request_frame(frame: &FrameCallback) {
    let Some(win) = window() else { return };
    let id = frame
        .borrow()
        .as_ref()
        .and_then(|cb| win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    RADAR_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            state.raf_id = id;
        }
    });
}

fn draw(state: &RadarState, now: f64) {
    let cmds = render(
        &state.skills,
        state.tween.progress(now),
        state.size,
        &state.options,
    );
    replay(&state.ctx, &cmds);
}

fn replay(ctx: &CanvasRenderingContext2d, cmds: &[DrawCommand]) {
    for cmd in cmds {
        match cmd {
            DrawCommand::Clear { width, height } => ctx.clear_rect(0.0, 0.0, *width, *height),
            DrawCommand::Ring {
                center,
                radius,
                alpha,
            } => {
                ctx.begin_path();
                ctx.arc(center.x, center.y, *radius, 0.0, TAU).ok();
                ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {alpha:.2})"));
                ctx.set_line_width(1.0);
                ctx.stroke();
            }
            DrawCommand::Axis { from, to } => {
                ctx.set_stroke_style_str("rgba(255, 255, 255, 0.2)");
                ctx.set_line_width(1.0);
                dom::line(ctx, from.x, from.y, to.x, to.y);
            }
            DrawCommand::Label { text, at } => {
                ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
                ctx.set_font("12px Arial");
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                ctx.fill_text(text, at.x, at.y).ok();
            }
            DrawCommand::Polygon { vertices } => {
                let Some((first, rest)) = vertices.split_first() else {
                    continue;
                };
                ctx.begin_path();
                ctx.move_to(first.x, first.y);
                for v in rest {
                    ctx.line_to(v.x, v.y);
                }
                ctx.close_path();
                ctx.set_fill_style_str("rgba(79, 156, 255, 0.3)");
                ctx.fill();
                ctx.set_stroke_style_str("rgba(79, 156, 255, 0.8)");
                ctx.set_line_width(2.0);
                ctx.stroke();
            }
            DrawCommand::Marker { at, radius } => {
                ctx.begin_path();
                ctx.arc(at.x, at.y, *radius, 0.0, TAU).ok();
                ctx.set_fill_style_str("#4f9cff");
                ctx.fill();
            }
        }
    }
}
