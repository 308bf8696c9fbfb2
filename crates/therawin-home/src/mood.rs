use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CheckinError;

/// A mood score, always in `1..=4` (1 = could be better, 4 = fantastic).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Mood(u8);

impl Mood {
    pub const COULD_BE_BETTER: Mood = Mood(1);
    pub const OKAY: Mood = Mood(2);
    pub const GOOD: Mood = Mood(3);
    pub const FANTASTIC: Mood = Mood(4);

    pub fn new(value: i64) -> Result<Self, CheckinError> {
        match u8::try_from(value) {
            Ok(v @ 1..=4) => Ok(Mood(v)),
            _ => Err(CheckinError::InvalidMood(value)),
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn option(self) -> &'static MoodOption {
        // Mood is always 1..=4, so the index is in bounds.
        &MOOD_OPTIONS[usize::from(self.0 - 1)]
    }
}

impl TryFrom<i64> for Mood {
    type Error = CheckinError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Mood::new(value)
    }
}

impl From<Mood> for i64 {
    fn from(mood: Mood) -> Self {
        i64::from(mood.0)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.option().aria_label)
    }
}

/// Display data for one choice in the check-in panel.
#[derive(Debug, PartialEq, Eq)]
pub struct MoodOption {
    pub mood: Mood,
    pub aria_label: &'static str,
    pub color: &'static str,
    pub hover_color: &'static str,
    pub bg_color: &'static str,
    pub feedback_color: &'static str,
    pub feedback_text: &'static str,
}

pub static MOOD_OPTIONS: [MoodOption; 4] = [
    MoodOption {
        mood: Mood::COULD_BE_BETTER,
        aria_label: "Could be better",
        color: "text-rose-500",
        hover_color: "hover:text-rose-600",
        bg_color: "bg-rose-50",
        feedback_color: "bg-rose-500",
        feedback_text: "Taking a mindful moment can help. We're here for you.",
    },
    MoodOption {
        mood: Mood::OKAY,
        aria_label: "Okay",
        color: "text-amber-500",
        hover_color: "hover:text-amber-600",
        bg_color: "bg-amber-50",
        feedback_color: "bg-amber-500",
        feedback_text: "Every moment is a fresh start.",
    },
    MoodOption {
        mood: Mood::GOOD,
        aria_label: "Good",
        color: "text-green-500",
        hover_color: "hover:text-green-600",
        bg_color: "bg-green-50",
        feedback_color: "bg-green-500",
        feedback_text: "Keep that positive energy flowing!",
    },
    MoodOption {
        mood: Mood::FANTASTIC,
        aria_label: "Fantastic",
        color: "text-blue-500",
        hover_color: "hover:text-blue-600",
        bg_color: "bg-blue-50",
        feedback_color: "bg-blue-500",
        feedback_text: "Fantastic! Your energy is contagious!",
    },
];
