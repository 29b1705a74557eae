//! Interval scheduling for a game session.
//!
//! Instead of three independent `setInterval` handles, each periodic process is
//! an [`IntervalClock`] that is polled with the current timestamp (from the
//! animation loop in the browser, or from plain numbers in tests). A frame that
//! arrives late fires every tick it skipped, in timestamp order, so results do
//! not depend on frame rate.

use rand::Rng;

use super::{GameEvent, GameSession, PlayArea};

/// Fixed-period tick source: tick `k` (k >= 1) is due at `start + k * period`.
#[derive(Clone, Copy, Debug)]
pub struct IntervalClock {
    period_ms: f64,
    start_ms: f64,
    last_tick: u64, // index of last tick handed out
}

impl IntervalClock {
    pub fn new(period_ms: f64, now: f64) -> Self {
        Self {
            period_ms,
            start_ms: now,
            last_tick: 0,
        }
    }

    fn elapsed_ticks(&self, now: f64) -> u64 {
        if self.period_ms <= 0.0 || now <= self.start_ms {
            return 0;
        }
        ((now - self.start_ms) / self.period_ms).floor() as u64
    }

    /// Timestamps of ticks that became due since the previous call.
    pub fn due(&mut self, now: f64) -> Vec<f64> {
        let reached = self.elapsed_ticks(now);
        if reached <= self.last_tick {
            return Vec::new();
        }
        let ticks = (self.last_tick + 1..=reached)
            .map(|k| self.start_ms + k as f64 * self.period_ms)
            .collect();
        self.last_tick = reached;
        ticks
    }
}

struct Clocks {
    countdown: IntervalClock,
    spawn: IntervalClock,
    rotate: IntervalClock,
}

/// Owns the three periodic processes of a running session. Disarming drops
/// them, so nothing can tick a session after it ended or the widget went away.
#[derive(Default)]
pub struct SessionDriver {
    clocks: Option<Clocks>,
}

impl SessionDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.clocks.is_some()
    }

    /// Start the session and its clocks at `now`. Does nothing if the session
    /// refuses to start.
    pub fn start<R: Rng>(&mut self, session: &mut GameSession, now: f64, rng: &mut R) -> bool {
        if !session.start(rng) {
            return false;
        }
        let rules = session.rules();
        self.clocks = Some(Clocks {
            countdown: IntervalClock::new(rules.countdown_ms, now),
            spawn: IntervalClock::new(rules.spawn_ms, now),
            rotate: IntervalClock::new(rules.rotate_ms, now),
        });
        true
    }

    /// End the session early (player pressed stop).
    pub fn end(&mut self, session: &mut GameSession) -> bool {
        self.disarm();
        session.end()
    }

    pub fn disarm(&mut self) {
        self.clocks = None;
    }

    /// Fire every tick due by `now` against `session`. Ties are broken
    /// countdown, then spawn, then active-skill. Returns the number of events
    /// applied.
    pub fn advance<R: Rng>(
        &mut self,
        now: f64,
        session: &mut GameSession,
        area: PlayArea,
        rng: &mut R,
    ) -> usize {
        let Some(clocks) = self.clocks.as_mut() else {
            return 0;
        };
        if !session.is_running() {
            self.disarm();
            return 0;
        }

        let mut events: Vec<(f64, u8, GameEvent)> = Vec::new();
        let ticks = [
            (clocks.countdown.due(now), GameEvent::CountdownTick),
            (clocks.spawn.due(now), GameEvent::SpawnTick),
            (clocks.rotate.due(now), GameEvent::ActiveSkillTick),
        ];
        for (rank, (due, event)) in ticks.into_iter().enumerate() {
            events.extend(due.into_iter().map(|t| (t, rank as u8, event.clone())));
        }
        events.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut applied = 0;
        for (_, _, event) in events {
            session.apply(event, area, rng);
            applied += 1;
            if !session.is_running() {
                self.disarm();
                break;
            }
        }
        applied
    }
}
