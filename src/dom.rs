//! Small browser helpers shared by the canvas widgets.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window, window};

use crate::error::{Result, WidgetError};
use crate::radar::SurfaceSize;

pub(crate) fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

pub(crate) fn browser_window() -> Result<Window> {
    window().ok_or(WidgetError::NoWindow)
}

/// Look up `<canvas id=...>` and its 2d context.
pub(crate) fn canvas_2d(id: &str) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d)> {
    let doc = browser_window()?
        .document()
        .ok_or(WidgetError::NoDocument)?;
    let canvas: HtmlCanvasElement = doc
        .get_element_by_id(id)
        .ok_or_else(|| WidgetError::MissingElement(id.to_string()))?
        .dyn_into()
        .map_err(|_| WidgetError::NotACanvas(id.to_string()))?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| WidgetError::NoContext(id.to_string()))?
        .dyn_into()
        .map_err(|_| WidgetError::NoContext(id.to_string()))?;
    Ok((canvas, ctx))
}

/// Match the canvas backing store to its container's measured size and return
/// the new surface size. The canvas is cleared by the browser when resized.
pub(crate) fn fit_to_container(canvas: &HtmlCanvasElement) -> SurfaceSize {
    let (w, h) = match canvas.parent_element() {
        Some(parent) => (parent.client_width(), parent.client_height()),
        None => (canvas.client_width(), canvas.client_height()),
    };
    let (w, h) = (w.max(0) as u32, h.max(0) as u32);
    if canvas.width() != w {
        canvas.set_width(w);
    }
    if canvas.height() != h {
        canvas.set_height(h);
    }
    SurfaceSize::new(w as f64, h as f64)
}

pub(crate) fn line(ctx: &CanvasRenderingContext2d, x1: f64, y1: f64, x2: f64, y2: f64) {
    ctx.begin_path();
    ctx.move_to(x1, y1);
    ctx.line_to(x2, y2);
    ctx.stroke();
}

/// Set the text of an overlay element if the page provides one.
pub(crate) fn set_text(id: &str, text: &str) {
    if let Some(el) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    {
        el.set_text_content(Some(text));
    }
}
