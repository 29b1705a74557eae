//! Reaction mini-game: click the bubble that matches the active skill before the
//! clock runs out.
//!
//! [`GameSession`] is the whole state machine (`Idle -> Running -> Completed ->
//! Running ...`) and knows nothing about time. Periodic processes arrive as
//! [`GameEvent`]s from [`clock::SessionDriver`], which turns timestamps into
//! ordered ticks; the browser adapter in [`canvas`] only feeds it
//! `performance.now()` and clicks. Every transition is total: calls that do not
//! make sense in the current phase are ignored.

use std::collections::VecDeque;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WidgetError};

pub mod canvas;
pub mod clock;

pub type TargetId = u64;

/// Game tunables. Defaults are the shipped rules: 30 s round, one spawn per
/// second, new active skill every 3 s, at most 10 live bubbles, +10 / -5.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub duration_secs: u32,
    pub countdown_ms: f64,
    pub spawn_ms: f64,
    pub rotate_ms: f64,
    pub max_targets: usize,
    pub correct_points: u32,
    pub wrong_penalty: u32,
    /// Spawn positions stay this far from the right / bottom edge.
    pub edge_margin: f64,
    /// Bubble diameter at scale 1.0.
    pub target_diameter: f64,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            duration_secs: 30,
            countdown_ms: 1000.0,
            spawn_ms: 1000.0,
            rotate_ms: 3000.0,
            max_targets: 10,
            correct_points: 10,
            wrong_penalty: 5,
            edge_margin: 100.0,
            target_diameter: 64.0,
        }
    }
}

impl GameRules {
    pub fn validate(&self) -> Result<()> {
        if self.duration_secs == 0 {
            return Err(WidgetError::InvalidRules("duration_secs must be positive"));
        }
        if !(self.countdown_ms > 0.0 && self.spawn_ms > 0.0 && self.rotate_ms > 0.0) {
            return Err(WidgetError::InvalidRules("intervals must be positive"));
        }
        if self.max_targets == 0 {
            return Err(WidgetError::InvalidRules("max_targets must be positive"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub id: TargetId,
    pub skill_name: String,
    /// Top-left corner of the bubble's unscaled box.
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Target {
    pub fn radius(&self, diameter: f64) -> f64 {
        diameter / 2.0 * self.scale
    }

    pub fn center(&self, diameter: f64) -> (f64, f64) {
        (self.x + diameter / 2.0, self.y + diameter / 2.0)
    }
}

/// Playable region in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayArea {
    pub width: f64,
    pub height: f64,
}

impl PlayArea {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Largest top-left x / y a new target may get.
    pub fn spawn_bounds(&self, margin: f64) -> (f64, f64) {
        ((self.width - margin).max(0.0), (self.height - margin).max(0.0))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Start,
    CountdownTick,
    SpawnTick,
    ActiveSkillTick,
    Hit(TargetId),
    End,
}

/// Result of clicking a live target during a running session.
#[derive(Clone, Debug, PartialEq)]
pub struct HitOutcome {
    pub target: Target,
    pub correct: bool,
    /// Score change actually applied (after clamping at zero).
    pub score_delta: i64,
}

impl HitOutcome {
    pub fn effect(&self) -> EffectKind {
        if self.correct {
            EffectKind::Pop
        } else {
            EffectKind::Shake
        }
    }
}

/// Read-only view handed to the page (`game_snapshot`).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub phase: Phase,
    pub score: u32,
    pub time_remaining: u32,
    pub active_skill: Option<String>,
    pub targets: Vec<Target>,
}

pub struct GameSession {
    rules: GameRules,
    skills: Vec<String>,
    phase: Phase,
    score: u32,
    time_remaining: u32,
    active_skill: Option<String>,
    targets: VecDeque<Target>,
    /// Never reset between sessions so stale ids cannot hit new targets.
    next_id: TargetId,
}

impl GameSession {
    pub fn new(skills: Vec<String>, rules: GameRules) -> Self {
        let time_remaining = rules.duration_secs;
        Self {
            rules,
            skills,
            phase: Phase::Idle,
            score: 0,
            time_remaining,
            active_skill: None,
            targets: VecDeque::new(),
            next_id: 1,
        }
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
    pub fn score(&self) -> u32 {
        self.score
    }
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }
    pub fn active_skill(&self) -> Option<&str> {
        self.active_skill.as_deref()
    }
    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }
    pub fn target(&self, id: TargetId) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            score: self.score,
            time_remaining: self.time_remaining,
            active_skill: self.active_skill.clone(),
            targets: self.targets.iter().cloned().collect(),
        }
    }

    /// Dispatch one event. Only `Hit` produces an outcome.
    pub fn apply<R: Rng>(
        &mut self,
        event: GameEvent,
        area: PlayArea,
        rng: &mut R,
    ) -> Option<HitOutcome> {
        match event {
            GameEvent::Start => {
                self.start(rng);
                None
            }
            GameEvent::CountdownTick => {
                self.countdown_tick();
                None
            }
            GameEvent::SpawnTick => {
                self.spawn(area, rng);
                None
            }
            GameEvent::ActiveSkillTick => {
                self.rotate_active(rng);
                None
            }
            GameEvent::Hit(id) => self.hit(id),
            GameEvent::End => {
                self.end();
                None
            }
        }
    }

    /// Begin a fresh session from `Idle` or `Completed`. Returns whether it started.
    pub fn start<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.phase == Phase::Running {
            log::warn!("start ignored: session already running");
            return false;
        }
        let Some(first) = self.skills.choose(rng).cloned() else {
            log::warn!("start ignored: no skills configured");
            return false;
        };
        self.score = 0;
        self.time_remaining = self.rules.duration_secs;
        self.targets.clear();
        self.active_skill = Some(first);
        self.phase = Phase::Running;
        log::info!(
            "game started: {}s, active skill {:?}",
            self.time_remaining,
            self.active_skill
        );
        true
    }

    pub fn countdown_tick(&mut self) {
        if !self.is_running() {
            return;
        }
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            self.end();
        }
    }

    /// Add one target and evict the oldest beyond the cap.
    pub fn spawn<R: Rng>(&mut self, area: PlayArea, rng: &mut R) -> Option<TargetId> {
        if !self.is_running() {
            return None;
        }
        let skill_name = self.skills.choose(rng)?.clone();
        let (max_x, max_y) = area.spawn_bounds(self.rules.edge_margin);
        let id = self.next_id;
        self.next_id += 1;
        self.targets.push_back(Target {
            id,
            skill_name,
            x: rng.gen_range(0.0..=max_x),
            y: rng.gen_range(0.0..=max_y),
            scale: rng.gen_range(0.5..=1.0),
        });
        while self.targets.len() > self.rules.max_targets {
            if let Some(old) = self.targets.pop_front() {
                log::trace!("target {} expired", old.id);
            }
        }
        Some(id)
    }

    pub fn rotate_active<R: Rng>(&mut self, rng: &mut R) {
        if !self.is_running() {
            return;
        }
        if let Some(next) = self.skills.choose(rng) {
            log::debug!("active skill -> {next}");
            self.active_skill = Some(next.clone());
        }
    }

    /// Score a click on target `id`. Unknown ids and clicks outside a running
    /// session are ignored.
    pub fn hit(&mut self, id: TargetId) -> Option<HitOutcome> {
        if !self.is_running() {
            return None;
        }
        let pos = self.targets.iter().position(|t| t.id == id)?;
        let target = self.targets.remove(pos)?;
        let correct = self.active_skill.as_deref() == Some(target.skill_name.as_str());
        let before = self.score;
        if correct {
            self.score = self.score.saturating_add(self.rules.correct_points);
        } else {
            self.score = self.score.saturating_sub(self.rules.wrong_penalty);
        }
        let score_delta = self.score as i64 - before as i64;
        log::debug!(
            "hit target {id} ({}) correct={correct} delta={score_delta}",
            target.skill_name
        );
        Some(HitOutcome {
            target,
            correct,
            score_delta,
        })
    }

    /// Stop the session and freeze the score. Only valid while running.
    pub fn end(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.phase = Phase::Completed;
        self.active_skill = None;
        log::info!("game over: final score {}", self.score);
        true
    }

    /// Topmost (newest) live target under the point, if any.
    pub fn target_at(&self, x: f64, y: f64) -> Option<TargetId> {
        let d = self.rules.target_diameter;
        self.targets
            .iter()
            .rev()
            .find(|t| {
                let (cx, cy) = t.center(d);
                (x - cx).hypot(y - cy) <= t.radius(d)
            })
            .map(|t| t.id)
    }
}

// --- Hit feedback -------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    /// Correct hit: grow and fade out.
    Pop,
    /// Wrong hit: jitter sideways.
    Shake,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectFrame {
    pub scale: f64,
    pub alpha: f64,
    pub offset_x: f64,
}

const POP_MS: f64 = 300.0;
const SHAKE_LEG_MS: f64 = 100.0;
const SHAKE_LEGS: u32 = 4;
const SHAKE_PX: f64 = 10.0;

impl EffectKind {
    pub fn duration_ms(self) -> f64 {
        match self {
            EffectKind::Pop => POP_MS,
            EffectKind::Shake => SHAKE_LEG_MS * SHAKE_LEGS as f64,
        }
    }

    /// Transform at `now` for an effect stamped `start_ms`. A stamp slightly
    /// ahead of `now` reads as age zero, so the first frame is always drawn.
    pub fn frame_at(self, start_ms: f64, now: f64) -> Option<EffectFrame> {
        self.frame((now - start_ms).max(0.0))
    }

    /// Transform for an effect `age_ms` old; `None` once it has played out.
    pub fn frame(self, age_ms: f64) -> Option<EffectFrame> {
        if !(0.0..self.duration_ms()).contains(&age_ms) {
            return None;
        }
        Some(match self {
            EffectKind::Pop => {
                let t = age_ms / POP_MS;
                EffectFrame {
                    scale: 1.0 + 0.5 * t,
                    alpha: 1.0 - t,
                    offset_x: 0.0,
                }
            }
            EffectKind::Shake => {
                let leg = (age_ms / SHAKE_LEG_MS).floor() as u32;
                let frac = (age_ms % SHAKE_LEG_MS) / SHAKE_LEG_MS;
                // out on even legs, back on odd ones
                let offset_x = if leg % 2 == 0 {
                    SHAKE_PX * frac
                } else {
                    SHAKE_PX * (1.0 - frac)
                };
                EffectFrame {
                    scale: 1.0,
                    alpha: 1.0,
                    offset_x,
                }
            }
        })
    }
}
