//! Skills radar chart.
//!
//! `render` is a pure function from (skills, reveal progress, surface size) to a
//! list of [`DrawCommand`]s. It keeps no state between calls: every call starts
//! with a full `Clear`, so a changed dataset or viewport never leaves stale
//! pixels behind. The browser side (`canvas`) only replays commands and owns the
//! animation loop / resize wiring.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::skills::Skill;

pub mod canvas;

/// Fraction of the half-extent used by the rim.
pub const AXIS_FRACTION: f64 = 0.8;
/// Number of concentric background rings.
pub const RING_COUNT: u32 = 5;
/// Data point marker radius in pixels.
pub const MARKER_RADIUS: f64 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Drawing surface size in device pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.width / 2.0,
            y: self.height / 2.0,
        }
    }

    pub fn axis_length(&self) -> f64 {
        (self.width / 2.0).min(self.height / 2.0) * AXIS_FRACTION
    }
}

/// Tunables supplied through the site configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarOptions {
    /// Length of the reveal animation played on mount.
    pub reveal_ms: f64,
    /// Distance of labels beyond the rim.
    pub label_offset: f64,
}

impl Default for RadarOptions {
    fn default() -> Self {
        Self {
            reveal_ms: 1500.0,
            label_offset: 20.0,
        }
    }
}

/// Immediate-mode drawing instructions, in paint order.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    Ring { center: Point, radius: f64, alpha: f64 },
    Axis { from: Point, to: Point },
    Label { text: String, at: Point },
    /// Closed polygon: the last vertex connects back to the first.
    Polygon { vertices: Vec<Point> },
    Marker { at: Point, radius: f64 },
}

/// Ring `k` (1-based, innermost first) gets a fainter stroke the further out it is.
pub fn ring_alpha(k: u32) -> f64 {
    0.1 * (RING_COUNT + 1 - k.clamp(1, RING_COUNT)) as f64
}

fn on_axis(center: Point, angle: f64, radius: f64) -> Point {
    Point {
        x: center.x + radius * angle.cos(),
        y: center.y + radius * angle.sin(),
    }
}

/// Axis angle for skill `index` of `count`, starting at 0 rad.
pub fn axis_angle(index: usize, count: usize) -> f64 {
    index as f64 * TAU / count as f64
}

/// Polygon vertex positions for the given progress (clamped to [0, 1]).
pub fn vertices(skills: &[Skill], progress: f64, size: SurfaceSize) -> Vec<Point> {
    if skills.is_empty() || size.is_degenerate() {
        return Vec::new();
    }
    let progress = progress.clamp(0.0, 1.0);
    let center = size.center();
    let axis = size.axis_length();
    skills
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let r = axis * (s.level.min(100) as f64 / 100.0) * progress;
            on_axis(center, axis_angle(i, skills.len()), r)
        })
        .collect()
}

pub fn render(
    skills: &[Skill],
    progress: f64,
    size: SurfaceSize,
    options: &RadarOptions,
) -> Vec<DrawCommand> {
    if size.is_degenerate() {
        return Vec::new();
    }
    let mut out = vec![DrawCommand::Clear {
        width: size.width,
        height: size.height,
    }];
    if skills.is_empty() {
        return out;
    }

    let center = size.center();
    let axis = size.axis_length();
    let n = skills.len();

    for k in 1..=RING_COUNT {
        out.push(DrawCommand::Ring {
            center,
            radius: axis * k as f64 / RING_COUNT as f64,
            alpha: ring_alpha(k),
        });
    }
    for i in 0..n {
        out.push(DrawCommand::Axis {
            from: center,
            to: on_axis(center, axis_angle(i, n), axis),
        });
    }
    for (i, skill) in skills.iter().enumerate() {
        out.push(DrawCommand::Label {
            text: skill.name.clone(),
            at: on_axis(center, axis_angle(i, n), axis + options.label_offset),
        });
    }

    let verts = vertices(skills, progress, size);
    out.push(DrawCommand::Polygon {
        vertices: verts.clone(),
    });
    out.extend(verts.into_iter().map(|at| DrawCommand::Marker {
        at,
        radius: MARKER_RADIUS,
    }));
    out
}

// --- Reveal animation ----------------------------------------------------------

/// Drives the ease-in reveal from timestamps; the renderer stays stateless.
#[derive(Clone, Copy, Debug)]
pub struct RevealTween {
    start_ms: f64,
    duration_ms: f64,
}

impl RevealTween {
    pub fn new(start_ms: f64, duration_ms: f64) -> Self {
        Self {
            start_ms,
            duration_ms,
        }
    }

    fn linear(&self, now: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Eased progress in [0, 1].
    pub fn progress(&self, now: f64) -> f64 {
        ease_out_cubic(self.linear(now))
    }

    pub fn finished(&self, now: f64) -> bool {
        self.linear(now) >= 1.0
    }
}

pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}
