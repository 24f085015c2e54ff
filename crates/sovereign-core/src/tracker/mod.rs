mod daily;
mod input;
mod mode;

pub use daily::{
    apply_progress_update, completion_edge, day_completion_edge, derive_daily_progress,
    fresh_day, toggle_rest_day,
};
pub use input::{bulk_add_value, can_start_timer, tap_value, timer_tick};
pub use mode::{ChallengeMode, DayMode, FocusSession, Transition};
