//! The session: single owner of today's state.
//!
//! ```text
//! StatsStore::load -> derive today -> input (tap / add / timer poll)
//!     -> apply_progress_update -> history upsert -> debounced save
//! ```
//!
//! A session does no I/O on its own schedule. The front-end calls
//! [`Session::poll`] on a short interval; that is where running timers are
//! sampled, focus countdowns expire, the date rolls over and due writes
//! happen. Every mutation returns the events it produced.

use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::{self, Section};
use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::events::{Event, FocusEndReason, TimerStopReason};
use crate::feedback::{Feedback, NoFeedback, SoundCue};
use crate::model::{DailyProgress, UserProfile, UserStats};
use crate::storage::{DebouncedWrite, StatsStore};
use crate::timer::{NoWakeLock, TimedAccumulator, WakeLock, WakeLockGuard};
use crate::tracker::{
    self, apply_progress_update, completion_edge, day_completion_edge, derive_daily_progress,
    ChallengeMode, DayMode, FocusSession, Transition,
};

pub const DEFAULT_PERSIST_DEBOUNCE_MS: u64 = 2500;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TimerKey {
    section: Section,
    exercise_id: String,
}

#[derive(Debug)]
struct RunningTimer {
    acc: TimedAccumulator,
    _wake_lock: WakeLockGuard,
}

pub struct SessionBuilder {
    clock: Arc<dyn Clock>,
    feedback: Arc<dyn Feedback>,
    wake_lock: Arc<dyn WakeLock>,
    persist_debounce_ms: u64,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            feedback: Arc::new(NoFeedback),
            wake_lock: Arc::new(NoWakeLock),
            persist_debounce_ms: DEFAULT_PERSIST_DEBOUNCE_MS,
        }
    }
}

impl SessionBuilder {
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn feedback(mut self, feedback: Arc<dyn Feedback>) -> Self {
        self.feedback = feedback;
        self
    }

    pub fn wake_lock(mut self, wake_lock: Arc<dyn WakeLock>) -> Self {
        self.wake_lock = wake_lock;
        self
    }

    pub fn persist_debounce_ms(mut self, ms: u64) -> Self {
        self.persist_debounce_ms = ms;
        self
    }

    /// Load the stored aggregate and derive today's record.
    ///
    /// A date seen for the first time gets its fresh record added to the
    /// history right away, with a write scheduled.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn open(self, store: StatsStore) -> Result<Session> {
        let stats = store.load()?;
        let focus = store.load_focus()?;
        let now_ms = self.clock.now_ms();
        let today = derive_daily_progress(&stats, self.clock.today());
        let mode = DayMode::from_parts(today.is_rest_day, focus, now_ms);

        let mut session = Session {
            store,
            clock: self.clock,
            feedback: self.feedback,
            wake_lock: self.wake_lock,
            stats,
            today,
            mode,
            debounce: DebouncedWrite::new(self.persist_debounce_ms),
            timers: HashMap::new(),
        };
        session.adopt_today();

        // A stored focus session that ran out while we were closed.
        if focus.is_some() && session.mode.focus().is_none() {
            session.store.save_focus(None)?;
        }
        Ok(session)
    }
}

pub struct Session {
    store: StatsStore,
    clock: Arc<dyn Clock>,
    feedback: Arc<dyn Feedback>,
    wake_lock: Arc<dyn WakeLock>,
    stats: UserStats,
    today: DailyProgress,
    mode: DayMode,
    debounce: DebouncedWrite,
    timers: HashMap<TimerKey, RunningTimer>,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn today(&self) -> &DailyProgress {
        &self.today
    }

    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    pub fn mode(&self) -> &DayMode {
        &self.mode
    }

    pub fn value(&self, exercise_id: &str, section: Section) -> u32 {
        self.today.value_of(section, exercise_id)
    }

    pub fn is_timer_running(&self, exercise_id: &str, section: Section) -> bool {
        self.timers.contains_key(&key(exercise_id, section))
    }

    pub fn has_pending_write(&self) -> bool {
        self.debounce.is_pending()
    }

    pub fn focus_remaining_secs(&self) -> Option<u64> {
        self.mode
            .focus()
            .map(|f| f.remaining_secs(self.clock.now_ms()))
    }

    // ── Progress input ───────────────────────────────────────────────

    /// Merge a raw value for one exercise. Rejected silently on a rest day
    /// or for an id missing from the section's catalog.
    pub fn update_progress(&mut self, exercise_id: &str, raw_value: u32, section: Section) -> Vec<Event> {
        let mut events = Vec::new();
        self.merge_update(exercise_id, raw_value, section, &mut events);
        events
    }

    /// One tap on a counter card.
    pub fn tap(&mut self, exercise_id: &str, section: Section) -> Vec<Event> {
        let Some(exercise) = catalog::find(section, exercise_id) else {
            return Vec::new();
        };
        match tracker::tap_value(exercise, section, self.value(exercise_id, section)) {
            Some(next) => self.update_progress(exercise_id, next, section),
            None => Vec::new(),
        }
    }

    pub fn bulk_add(&mut self, exercise_id: &str, section: Section, amount: u32) -> Vec<Event> {
        let Some(exercise) = catalog::find(section, exercise_id) else {
            return Vec::new();
        };
        let next = tracker::bulk_add_value(
            exercise,
            section,
            self.value(exercise_id, section),
            amount,
        );
        self.update_progress(exercise_id, next, section)
    }

    pub fn update_profile(&mut self, profile: UserProfile) {
        self.stats.profile = Some(profile);
        self.schedule_write();
    }

    // ── Exercise timers ──────────────────────────────────────────────

    /// Start the wall-clock timer of a timer exercise. Does nothing on a
    /// rest day, for a finished warm-up, or when already running.
    pub fn start_timer(&mut self, exercise_id: &str, section: Section) -> Vec<Event> {
        let mut events = Vec::new();
        let Some(exercise) = catalog::find(section, exercise_id) else {
            return events;
        };
        let current = self.value(exercise_id, section);
        let timer_key = key(exercise_id, section);
        if self.mode.is_resting()
            || self.timers.contains_key(&timer_key)
            || !tracker::can_start_timer(exercise, section, current)
        {
            return events;
        }

        let now_ms = self.clock.now_ms();
        let running = RunningTimer {
            acc: TimedAccumulator::start(now_ms, current),
            _wake_lock: WakeLockGuard::acquire(&self.wake_lock),
        };
        self.timers.insert(timer_key, running);
        tracing::debug!(exercise_id, %section, from = current, "timer started");

        self.emit(
            &mut events,
            Event::TimerStarted {
                section,
                exercise_id: exercise_id.to_string(),
                from_value: current,
                at: self.clock.now(),
            },
        );
        events
    }

    pub fn pause_timer(&mut self, exercise_id: &str, section: Section) -> Vec<Event> {
        let mut events = Vec::new();
        self.stop_timer(&key(exercise_id, section), TimerStopReason::Paused, &mut events);
        events
    }

    // ── Modes ────────────────────────────────────────────────────────

    /// Flip today's rest day. Entering rest stops running timers and
    /// cancels focus mode.
    ///
    /// # Errors
    /// Returns an error if clearing the stored focus session fails.
    pub fn toggle_rest_day(&mut self) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        let transition = self.mode.toggle_rest();
        if self.mode.is_resting() {
            self.stop_all_timers(TimerStopReason::Teardown, &mut events);
        }
        self.apply_transition(transition, FocusEndReason::RestDay, &mut events)?;
        Ok(events)
    }

    /// Enter focus mode with a timed challenge. Clears a rest day and
    /// replaces a running focus countdown.
    ///
    /// # Errors
    /// Returns an error for an untimed mode or if the focus session cannot
    /// be stored.
    pub fn start_focus(&mut self, challenge: ChallengeMode) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        let session = FocusSession::start(challenge, self.clock.now_ms())?;
        let transition = self.mode.start_focus(session);
        self.apply_transition(transition, FocusEndReason::Cancelled, &mut events)?;
        self.store.save_focus(Some(&session))?;

        let ends_at = chrono::DateTime::<chrono::Utc>::from_timestamp_millis(
            session.ends_at_ms() as i64,
        )
        .unwrap_or_default();
        self.emit(
            &mut events,
            Event::FocusStarted {
                mode: challenge,
                duration_secs: session.duration_secs,
                ends_at,
                at: self.clock.now(),
            },
        );
        Ok(events)
    }

    /// # Errors
    /// Returns an error if the stored focus session cannot be cleared.
    pub fn stop_focus(&mut self) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        if let Some(session) = self.mode.stop_focus() {
            self.end_focus(session, FocusEndReason::Cancelled, &mut events)?;
        }
        Ok(events)
    }

    // ── Driving ──────────────────────────────────────────────────────

    /// Advance everything time-driven: day rollover, focus expiry, running
    /// timers, then a due write.
    ///
    /// # Errors
    /// Returns an error if a store write fails.
    pub fn poll(&mut self) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        let now_ms = self.clock.now_ms();

        if self.clock.today() != self.today.date {
            self.roll_over(&mut events)?;
        }

        if let Some(session) = self.mode.expire(now_ms) {
            self.end_focus(session, FocusEndReason::Expired, &mut events)?;
        }

        let ticks: Vec<(TimerKey, u32)> = self
            .timers
            .iter_mut()
            .filter_map(|(k, t)| t.acc.poll(now_ms).map(|v| (k.clone(), v)))
            .collect();
        for (timer_key, value) in ticks {
            self.apply_timer_tick(&timer_key, value, &mut events);
        }

        if self.debounce.take_due(now_ms).is_some() {
            self.save_now(&mut events)?;
        }
        Ok(events)
    }

    /// Write a pending save immediately.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn flush(&mut self) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        if self.debounce.take().is_some() {
            self.save_now(&mut events)?;
        }
        Ok(events)
    }

    /// Erase everything stored and start over from an empty history.
    ///
    /// # Errors
    /// Returns an error if the wipe fails.
    pub fn reset_all(&mut self) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        self.timers.clear();
        self.debounce.cancel();
        self.store.wipe()?;

        self.stats = UserStats::default();
        self.today = derive_daily_progress(&self.stats, self.clock.today());
        self.mode = DayMode::Active;
        events.push(Event::DataReset {
            at: self.clock.now(),
        });
        let started = self.adopt_today();
        events.push(started);
        Ok(events)
    }

    /// Hard stop. A pending debounced write is abandoned, not flushed.
    /// Running timers release their wake locks.
    pub fn shutdown(mut self) {
        if let Some(pending) = self.debounce.cancel() {
            tracing::debug!(token = pending.token, "shutdown abandoned pending write");
        }
        self.timers.clear();
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn merge_update(
        &mut self,
        exercise_id: &str,
        raw_value: u32,
        section: Section,
        events: &mut Vec<Event>,
    ) {
        let after = apply_progress_update(&self.today, exercise_id, raw_value, section);
        if after == self.today {
            return;
        }
        let before = std::mem::replace(&mut self.today, after);
        self.stats.upsert_day(self.today.clone());
        self.schedule_write();

        let date = self.today.date;
        let value = self.today.value_of(section, exercise_id);
        let is_complete = self.today.is_complete(section, exercise_id);
        let at = self.clock.now();
        self.emit(
            events,
            Event::ProgressUpdated {
                date,
                section,
                exercise_id: exercise_id.to_string(),
                value,
                is_complete,
                at,
            },
        );

        if completion_edge(&before, &self.today, section, exercise_id) {
            self.emit(
                events,
                Event::ExerciseCompleted {
                    date,
                    section,
                    exercise_id: exercise_id.to_string(),
                    value,
                    at,
                },
            );
            self.stop_timer(&key(exercise_id, section), TimerStopReason::Completed, events);
        }
        if day_completion_edge(&before, &self.today) {
            self.emit(events, Event::DayCompleted { date, at });
        }
    }

    fn apply_timer_tick(&mut self, timer_key: &TimerKey, elapsed: u32, events: &mut Vec<Event>) {
        let Some(exercise) = catalog::find(timer_key.section, &timer_key.exercise_id) else {
            self.timers.remove(timer_key);
            return;
        };
        let (value, at_target) = tracker::timer_tick(exercise, timer_key.section, elapsed);
        if !at_target {
            self.merge_update(exercise.id, value, timer_key.section, events);
            return;
        }
        // Removed before the merge so the completion edge finds nothing to
        // stop; the stop event then reports the clamped value.
        self.timers.remove(timer_key);
        self.merge_update(exercise.id, value, timer_key.section, events);
        self.emit_timer_stopped(timer_key, TimerStopReason::TargetReached, events);
    }

    fn stop_timer(&mut self, timer_key: &TimerKey, reason: TimerStopReason, events: &mut Vec<Event>) {
        // Dropping the entry releases its wake lock.
        if self.timers.remove(timer_key).is_none() {
            return;
        }
        self.emit_timer_stopped(timer_key, reason, events);
    }

    fn emit_timer_stopped(
        &self,
        timer_key: &TimerKey,
        reason: TimerStopReason,
        events: &mut Vec<Event>,
    ) {
        tracing::debug!(exercise_id = %timer_key.exercise_id, ?reason, "timer stopped");
        let value = self
            .today
            .value_of(timer_key.section, &timer_key.exercise_id);
        self.emit(
            events,
            Event::TimerStopped {
                section: timer_key.section,
                exercise_id: timer_key.exercise_id.clone(),
                value,
                reason,
                at: self.clock.now(),
            },
        );
    }

    fn stop_all_timers(&mut self, reason: TimerStopReason, events: &mut Vec<Event>) {
        let keys: Vec<TimerKey> = self.timers.keys().cloned().collect();
        for timer_key in keys {
            self.stop_timer(&timer_key, reason, events);
        }
    }

    fn apply_transition(
        &mut self,
        transition: Transition,
        focus_reason: FocusEndReason,
        events: &mut Vec<Event>,
    ) -> Result<()> {
        if let Some(session) = transition.cancelled_focus {
            self.end_focus(session, focus_reason, events)?;
        }
        if let Some(is_rest_day) = transition.rest_day {
            if self.today.is_rest_day != is_rest_day {
                self.today = tracker::toggle_rest_day(&self.today);
                self.stats.upsert_day(self.today.clone());
                self.schedule_write();
            }
            tracing::debug!(date = %self.today.date, is_rest_day, "rest day toggled");
            self.emit(
                events,
                Event::RestDayToggled {
                    date: self.today.date,
                    is_rest_day,
                    at: self.clock.now(),
                },
            );
        }
        Ok(())
    }

    fn end_focus(
        &mut self,
        session: FocusSession,
        reason: FocusEndReason,
        events: &mut Vec<Event>,
    ) -> Result<()> {
        if self.mode.focus().is_none() {
            self.store.save_focus(None)?;
        }
        tracing::debug!(mode = %session.mode, ?reason, "focus ended");
        self.emit(
            events,
            Event::FocusEnded {
                mode: session.mode,
                reason,
                at: self.clock.now(),
            },
        );
        Ok(())
    }

    fn roll_over(&mut self, events: &mut Vec<Event>) -> Result<()> {
        self.stop_all_timers(TimerStopReason::Teardown, events);
        let previous = self.today.date;
        self.today = derive_daily_progress(&self.stats, self.clock.today());
        let now_ms = self.clock.now_ms();
        let focus = self.mode.focus().copied();
        self.mode = DayMode::from_parts(self.today.is_rest_day, focus, now_ms);
        tracing::info!(from = %previous, to = %self.today.date, "day rolled over");
        let started = self.adopt_today();
        events.push(started);

        // A focus session the new day cannot carry ends here.
        if let Some(session) = focus.filter(|_| self.mode.focus().is_none()) {
            let reason = if session.is_expired(now_ms) {
                FocusEndReason::Expired
            } else {
                FocusEndReason::RestDay
            };
            self.end_focus(session, reason, events)?;
        }
        Ok(())
    }

    /// Put a first-seen record into the history.
    fn adopt_today(&mut self) -> Event {
        let created = self.stats.day(self.today.date).is_none();
        if created {
            self.stats.upsert_day(self.today.clone());
            self.schedule_write();
        }
        Event::DayStarted {
            date: self.today.date,
            created,
            at: self.clock.now(),
        }
    }

    fn schedule_write(&mut self) {
        let pending = self.debounce.schedule(self.clock.now_ms());
        tracing::trace!(token = pending.token, due_at_ms = pending.due_at_ms, "write scheduled");
    }

    fn save_now(&mut self, events: &mut Vec<Event>) -> Result<()> {
        self.store.save(&self.stats)?;
        events.push(Event::ProgressSaved {
            date: self.today.date,
            at: self.clock.now(),
        });
        Ok(())
    }

    fn emit(&self, events: &mut Vec<Event>, event: Event) {
        if let Some(cue) = SoundCue::for_event(&event) {
            self.feedback.play(cue);
        }
        events.push(event);
    }
}

fn key(exercise_id: &str, section: Section) -> TimerKey {
    TimerKey {
        section,
        exercise_id: exercise_id.to_string(),
    }
}
