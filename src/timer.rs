// ============================================
// src/timer.rs
// The one-second countdown that drives a round
// ============================================

use std::time::{Duration, Instant};

use crate::session::{GameSession, Phase, TickOutcome};

/// How often the countdown ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);
/// How long the event loop waits for input when no tick is scheduled
pub const IDLE_POLL: Duration = Duration::from_millis(250);

/// The parts of the session a scheduled tick depends on.
/// If any of them changes, the pending tick is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Armed {
    phase: Phase,
    paused: bool,
    time_remaining: u32,
}

impl Armed {
    fn of(session: &GameSession<'_>) -> Self {
        Self {
            phase: session.phase(),
            paused: session.is_paused(),
            time_remaining: session.time_remaining(),
        }
    }

    fn should_run(&self) -> bool {
        self.phase == Phase::Playing && !self.paused && self.time_remaining > 0
    }
}

/// A single scheduled tick with cancel-and-reschedule semantics.
///
/// The event loop calls `sync` after every state change and `fire` when
/// `timeout` has elapsed. Time is passed in explicitly so the driver can
/// be tested without sleeping.
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    period: Duration,
    deadline: Option<Instant>,
    armed_for: Option<Armed>,
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl CountdownTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            deadline: None,
            armed_for: None,
        }
    }

    /// Is a tick currently scheduled?
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
        self.armed_for = None;
    }

    /// Bring the schedule in line with the session. Anything that changed
    /// phase, pause state or remaining time cancels the pending tick; a new
    /// one is scheduled a full period from `now` if the clock should run.
    pub fn sync(&mut self, session: &GameSession<'_>, now: Instant) {
        let state = Armed::of(session);
        if self.armed_for == Some(state) {
            return;
        }

        self.cancel();
        if state.should_run() {
            self.deadline = Some(now + self.period);
            self.armed_for = Some(state);
        }
    }

    /// Run the scheduled tick if it is due. Returns what the tick did, or
    /// `None` when nothing was due.
    pub fn fire(&mut self, session: &mut GameSession<'_>, now: Instant) -> Option<TickOutcome> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }

        // a tick armed for an older state never runs
        if self.armed_for != Some(Armed::of(session)) {
            self.sync(session, now);
            return None;
        }

        let outcome = session.tick();
        self.cancel();
        if Armed::of(session).should_run() {
            // keep a steady cadence instead of drifting by the loop latency
            let next = deadline + self.period;
            self.deadline = Some(if next > now { next } else { now + self.period });
            self.armed_for = Some(Armed::of(session));
        }
        Some(outcome)
    }

    /// How long the event loop may block on input before the next tick
    pub fn timeout(&self, now: Instant) -> Duration {
        match self.deadline {
            Some(deadline) => deadline.saturating_duration_since(now),
            None => IDLE_POLL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionPolicy;
    use crate::vocabulary::WordStore;

    fn store() -> WordStore {
        WordStore::from_json(r#"{"a": [{"german": "Haus", "english": "house"}]}"#).unwrap()
    }

    #[test]
    fn test_not_armed_in_menu() {
        let store = store();
        let session = GameSession::new(&store, SelectionPolicy::new(Some(1)), 180);
        let mut timer = CountdownTimer::default();
        let now = Instant::now();

        timer.sync(&session, now);
        assert!(!timer.is_armed());
        assert_eq!(timer.timeout(now), IDLE_POLL);
    }

    #[test]
    fn test_ticks_once_per_period() {
        let store = store();
        let mut session = GameSession::new(&store, SelectionPolicy::new(Some(1)), 180);
        let mut timer = CountdownTimer::default();
        let t0 = Instant::now();

        session.start_game();
        timer.sync(&session, t0);
        assert_eq!(timer.deadline(), Some(t0 + TICK_PERIOD));
        assert_eq!(timer.timeout(t0), TICK_PERIOD);

        assert_eq!(timer.fire(&mut session, t0 + Duration::from_millis(500)), None);
        assert_eq!(session.time_remaining(), 180);

        assert_eq!(
            timer.fire(&mut session, t0 + TICK_PERIOD),
            Some(TickOutcome::Counted(179))
        );
        // the sync after a tick must not push the next deadline back
        timer.sync(&session, t0 + TICK_PERIOD + Duration::from_millis(10));
        assert_eq!(timer.deadline(), Some(t0 + TICK_PERIOD * 2));
    }

    #[test]
    fn test_pause_cancels_pending_tick() {
        let store = store();
        let mut session = GameSession::new(&store, SelectionPolicy::new(Some(1)), 180);
        let mut timer = CountdownTimer::default();
        let t0 = Instant::now();

        session.start_game();
        timer.sync(&session, t0);

        // answer lands just before the tick would have fired
        session.submit_answer("house");
        timer.sync(&session, t0 + Duration::from_millis(999));
        assert!(!timer.is_armed());

        assert_eq!(timer.fire(&mut session, t0 + TICK_PERIOD * 10), None);
        assert_eq!(session.time_remaining(), 180);
    }

    #[test]
    fn test_stale_tick_never_fires() {
        let store = store();
        let mut session = GameSession::new(&store, SelectionPolicy::new(Some(1)), 180);
        let mut timer = CountdownTimer::default();
        let t0 = Instant::now();

        session.start_game();
        timer.sync(&session, t0);
        // pause without telling the timer
        session.submit_answer("house");

        assert_eq!(timer.fire(&mut session, t0 + TICK_PERIOD), None);
        assert_eq!(session.time_remaining(), 180);
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_resume_schedules_full_period() {
        let store = store();
        let mut session = GameSession::new(&store, SelectionPolicy::new(Some(1)), 180);
        let mut timer = CountdownTimer::default();
        let t0 = Instant::now();

        session.start_game();
        timer.sync(&session, t0);
        session.submit_answer("house");
        timer.sync(&session, t0);

        let resume = t0 + Duration::from_secs(30);
        session.confirm_advance();
        timer.sync(&session, resume);
        assert_eq!(timer.deadline(), Some(resume + TICK_PERIOD));
    }

    #[test]
    fn test_runs_round_to_game_over() {
        let store = store();
        let mut session = GameSession::new(&store, SelectionPolicy::new(Some(1)), 3);
        let mut timer = CountdownTimer::default();
        let t0 = Instant::now();

        session.start_game();
        timer.sync(&session, t0);

        let mut outcomes = Vec::new();
        for i in 1..=5 {
            let now = t0 + TICK_PERIOD * i;
            if let Some(outcome) = timer.fire(&mut session, now) {
                outcomes.push(outcome);
            }
            timer.sync(&session, now);
        }

        assert_eq!(
            outcomes,
            [
                TickOutcome::Counted(2),
                TickOutcome::Counted(1),
                TickOutcome::Expired
            ]
        );
        assert_eq!(session.phase(), Phase::GameOver);
        assert!(!timer.is_armed());
    }
}
