//! Time-of-day classification for the landscape banner.

use std::fmt;

use therawin_core::Interpolate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimePeriod {
    Morning,
    Afternoon,
    Evening,
    Night,
}

/// Sun (or moon) centre as percentages of the banner, `0..=100` on each axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunPosition {
    pub x: f32,
    pub y: f32,
}

impl Interpolate for SunPosition {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        SunPosition {
            x: self.x.interpolate(&other.x, t),
            y: self.y.interpolate(&other.y, t),
        }
    }
}

/// Renderer tokens for one period. The ids are opaque to this crate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub sky_gradient: &'static str,
    pub text_color: &'static str,
    pub accent_color: &'static str,
    pub sun: SunPosition,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    pub period: TimePeriod,
    pub theme: Theme,
}

const MORNING: Theme = Theme {
    sky_gradient: "from-blue-200 via-sky-300 to-cyan-200",
    text_color: "text-blue-900",
    accent_color: "bg-blue-100 text-blue-700",
    sun: SunPosition { x: 30.0, y: 40.0 },
};

const AFTERNOON: Theme = Theme {
    sky_gradient: "from-sky-400 via-blue-300 to-sky-200",
    text_color: "text-sky-900",
    accent_color: "bg-sky-100 text-sky-700",
    sun: SunPosition { x: 50.0, y: 20.0 },
};

const EVENING: Theme = Theme {
    sky_gradient: "from-orange-300 via-rose-300 to-purple-300",
    text_color: "text-rose-900",
    accent_color: "bg-rose-100 text-rose-700",
    sun: SunPosition { x: 80.0, y: 60.0 },
};

const NIGHT: Theme = Theme {
    sky_gradient: "from-slate-900 via-indigo-900 to-slate-800",
    text_color: "text-white",
    accent_color: "bg-slate-800 text-slate-200",
    sun: SunPosition { x: 85.0, y: 30.0 },
};

/// Maps an hour of the day to its period. Ranges are half-open and checked in
/// order; anything not matched (including hours past 23) is night.
pub fn classify(hour: u32) -> Classification {
    let period = match hour {
        6..12 => TimePeriod::Morning,
        12..17 => TimePeriod::Afternoon,
        17..20 => TimePeriod::Evening,
        _ => TimePeriod::Night,
    };
    Classification {
        period,
        theme: period.theme(),
    }
}

impl TimePeriod {
    /// Cycle order used by the banner's toggle.
    pub const ALL: [TimePeriod; 4] = [
        TimePeriod::Morning,
        TimePeriod::Afternoon,
        TimePeriod::Evening,
        TimePeriod::Night,
    ];

    pub fn theme(self) -> Theme {
        match self {
            TimePeriod::Morning => MORNING,
            TimePeriod::Afternoon => AFTERNOON,
            TimePeriod::Evening => EVENING,
            TimePeriod::Night => NIGHT,
        }
    }

    /// Hour shown when the user pins this period.
    pub fn representative_hour(self) -> u32 {
        match self {
            TimePeriod::Morning => 9,
            TimePeriod::Afternoon => 14,
            TimePeriod::Evening => 18,
            TimePeriod::Night => 22,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimePeriod::Morning => "Morning Reflection",
            TimePeriod::Afternoon => "Afternoon Break",
            TimePeriod::Evening => "Evening Wind Down",
            TimePeriod::Night => "Night Reflection",
        }
    }

    pub fn tip(self) -> &'static str {
        match self {
            TimePeriod::Morning => "Start your day mindfully with deep breaths and gentle stretches.",
            TimePeriod::Afternoon => "Take a moment to reset and recharge with a short meditation.",
            TimePeriod::Evening => "Reflect on three positive moments from your day.",
            TimePeriod::Night => "Create a peaceful bedtime routine for better sleep.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimePeriod::Morning => "morning",
            TimePeriod::Afternoon => "afternoon",
            TimePeriod::Evening => "evening",
            TimePeriod::Night => "night",
        }
    }

    pub fn is_night(self) -> bool {
        self == TimePeriod::Night
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
