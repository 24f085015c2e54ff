//! Input adapter rules: how a tap, a bulk add or a timer toggle turns into
//! a raw value for [`apply_progress_update`](super::apply_progress_update).

use crate::catalog::{Exercise, ExerciseKind, Section};

/// Next value after a single tap, `None` when the tap is ignored.
///
/// Taps only count on counter exercises, and a warm-up at target takes no
/// more taps.
pub fn tap_value(exercise: &Exercise, section: Section, current: u32) -> Option<u32> {
    if exercise.kind != ExerciseKind::Counter {
        return None;
    }
    let next = current.saturating_add(1);
    if section.is_warmup() && next > exercise.target {
        return None;
    }
    Some(next)
}

/// Next value after adding `amount` at once. Warm-ups stop at target.
pub fn bulk_add_value(exercise: &Exercise, section: Section, current: u32, amount: u32) -> u32 {
    let next = current.saturating_add(amount);
    if section.is_warmup() {
        next.min(exercise.target)
    } else {
        next
    }
}

/// A finished warm-up timer cannot be restarted.
pub fn can_start_timer(exercise: &Exercise, section: Section, current: u32) -> bool {
    exercise.kind == ExerciseKind::Timer && !(section.is_warmup() && current >= exercise.target)
}

/// Value to record for a timer sample, and whether the timer must stop.
///
/// A warm-up timer stops at its target and records exactly the target.
/// Main timers pass through; they stop on the completion edge instead.
pub fn timer_tick(exercise: &Exercise, section: Section, elapsed_value: u32) -> (u32, bool) {
    if section.is_warmup() && elapsed_value >= exercise.target {
        (exercise.target, true)
    } else {
        (elapsed_value, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find;

    #[test]
    fn tap_increments_counters() {
        let squats = find(Section::Main, "squats").unwrap();
        assert_eq!(tap_value(squats, Section::Main, 0), Some(1));
        assert_eq!(tap_value(squats, Section::Main, 100), Some(101));
    }

    #[test]
    fn tap_ignored_on_full_warmup_and_timers() {
        let tuck = find(Section::Warmup, "head-tuck-l").unwrap();
        assert_eq!(tap_value(tuck, Section::Warmup, 9), Some(10));
        assert_eq!(tap_value(tuck, Section::Warmup, 10), None);

        let plank = find(Section::Main, "plank").unwrap();
        assert_eq!(tap_value(plank, Section::Main, 3), None);
    }

    #[test]
    fn bulk_add_caps_warmups_only() {
        let nods = find(Section::Warmup, "neck-nods-lr").unwrap();
        assert_eq!(bulk_add_value(nods, Section::Warmup, 95, 10), 100);

        let sapate = find(Section::Main, "sapate").unwrap();
        assert_eq!(bulk_add_value(sapate, Section::Main, 995, 10), 1005);
    }

    #[test]
    fn timer_start_rules() {
        let plank = find(Section::Main, "plank").unwrap();
        assert!(can_start_timer(plank, Section::Main, 600));
        assert!(can_start_timer(plank, Section::Main, 0));

        let squats = find(Section::Main, "squats").unwrap();
        assert!(!can_start_timer(squats, Section::Main, 0));
    }

    const HOLD: Exercise = Exercise {
        id: "horse-stance",
        name: "Horse Stance",
        target: 60,
        kind: ExerciseKind::Timer,
        description: "Static low stance.",
    };

    #[test]
    fn finished_warmup_timer_cannot_restart() {
        assert!(can_start_timer(&HOLD, Section::Warmup, 0));
        assert!(can_start_timer(&HOLD, Section::Warmup, 59));
        assert!(!can_start_timer(&HOLD, Section::Warmup, 60));
        assert!(!can_start_timer(&HOLD, Section::Warmup, 75));
        // The same exercise in the main section may run into overtime.
        assert!(can_start_timer(&HOLD, Section::Main, 60));
    }

    #[test]
    fn warmup_timer_clamps_and_stops_at_target() {
        assert_eq!(timer_tick(&HOLD, Section::Warmup, 59), (59, false));
        assert_eq!(timer_tick(&HOLD, Section::Warmup, 60), (60, true));
        assert_eq!(timer_tick(&HOLD, Section::Warmup, 64), (60, true));
    }

    #[test]
    fn main_timer_ticks_pass_through() {
        let plank = find(Section::Main, "plank").unwrap();
        assert_eq!(timer_tick(plank, Section::Main, 599), (599, false));
        assert_eq!(timer_tick(plank, Section::Main, 605), (605, false));
    }
}
