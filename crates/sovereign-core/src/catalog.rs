//! Static exercise catalog.
//!
//! Two read-only tables, defined at build time: the main protocol and the
//! warm-up. Targets are repetitions for `Counter` exercises and seconds for
//! `Timer` exercises.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    Counter,
    Timer,
}

/// Which catalog table an exercise belongs to.
///
/// Warm-up values are hard-clamped at target; main values may run into
/// overtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Warmup,
    Main,
}

impl Section {
    pub fn from_warmup_flag(is_warmup: bool) -> Self {
        if is_warmup {
            Section::Warmup
        } else {
            Section::Main
        }
    }

    pub fn is_warmup(self) -> bool {
        self == Section::Warmup
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Warmup => "warmup",
            Section::Main => "main",
        }
    }

    /// The catalog table for this section.
    pub fn exercises(self) -> &'static [Exercise] {
        match self {
            Section::Warmup => WARMUP_EXERCISES,
            Section::Main => EXERCISES,
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exercise {
    pub id: &'static str,
    pub name: &'static str,
    pub target: u32,
    pub kind: ExerciseKind,
    pub description: &'static str,
}

impl Exercise {
    pub fn is_timer(&self) -> bool {
        self.kind == ExerciseKind::Timer
    }
}

const fn counter(
    id: &'static str,
    name: &'static str,
    target: u32,
    description: &'static str,
) -> Exercise {
    Exercise {
        id,
        name,
        target,
        kind: ExerciseKind::Counter,
        description,
    }
}

pub static EXERCISES: &[Exercise] = &[
    counter(
        "knuckle-pushups",
        "Knuckle Push Ups",
        100,
        "Strengthen wrists and knuckles while building chest and triceps.",
    ),
    counter("squats", "Squats", 100, "Foundation of lower body strength."),
    counter(
        "crunches",
        "Crunches / Sit Ups",
        100,
        "Core stability and abdominal strength.",
    ),
    counter(
        "sapate",
        "Sapate (Indian Burpees)",
        1000,
        "Combo of Hindu Push Ups & Hindu Squats. The ultimate endurance builder.",
    ),
    counter(
        "skipping",
        "Shadow / Normal Skipping",
        1000,
        "Light on your feet, heavy on your cardio.",
    ),
    Exercise {
        id: "plank",
        name: "Plank",
        // 10 minutes
        target: 600,
        kind: ExerciseKind::Timer,
        description: "Total body isometric hold. Absolute mental discipline.",
    },
];

pub static WARMUP_EXERCISES: &[Exercise] = &[
    counter("neck-nods-lr", "Head Nods (L & R)", 100, "Neck mobility side to side."),
    counter("neck-nods-ud", "Head Nods (U & D)", 100, "Neck mobility up and down."),
    counter(
        "head-tuck-l",
        "Head Tucks (Left)",
        10,
        "Manual head tuck with hands to the left.",
    ),
    counter(
        "head-tuck-r",
        "Head Tucks (Right)",
        10,
        "Manual head tuck with hands to the right.",
    ),
    counter("head-rot-cw", "Head Rotations (CW)", 10, "Rotate head 360° clockwise."),
    counter(
        "head-rot-ccw",
        "Head Rotations (CCW)",
        10,
        "Rotate head 360° anti-clockwise.",
    ),
    counter("belly-tucks", "Belly Tucks", 100, "Pushing the belly in and out."),
    counter(
        "wake-up-stretch",
        "Wake Up Stretches",
        100,
        "Hands overhead, back stretch with forward belly bulge.",
    ),
    counter(
        "boxing-stretch",
        "Boxing Stretch",
        100,
        "Boxing stance, chest wide stretch to the back.",
    ),
    counter("boxing-rot", "Boxing Rotations", 100, "Boxing stance rotations CW & CCW."),
    counter("arm-rotations", "Arm Rotations", 100, "Full arm rotations CW & CCW."),
    counter(
        "palm-slaps",
        "Palm Slaps",
        100,
        "100 slaps with both palms on an object.",
    ),
    counter(
        "finger-punches",
        "Finger Punches",
        100,
        "100 finger strikes with both hands.",
    ),
    counter("knee-strikes", "Knee Strikes", 100, "100 knee strikes with both legs."),
    counter(
        "elbow-strikes",
        "Elbow Strikes",
        100,
        "100 elbow strikes with both hands.",
    ),
    counter(
        "heel-ups",
        "Heel Ups",
        100,
        "Extend heels, weight on toes (fingers of legs).",
    ),
];

/// Look up an exercise definition within one section of the catalog.
pub fn find(section: Section, id: &str) -> Option<&'static Exercise> {
    section.exercises().iter().find(|e| e.id == id)
}

/// Look up an exercise in either table, main first.
pub fn find_any(id: &str) -> Option<(Section, &'static Exercise)> {
    find(Section::Main, id)
        .map(|e| (Section::Main, e))
        .or_else(|| find(Section::Warmup, id).map(|e| (Section::Warmup, e)))
}
