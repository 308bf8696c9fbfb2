//! Check-in cooldown rules. Everything here is a pure function of its inputs;
//! callers read the clock.

use serde::{Deserialize, Serialize};
use therawin_core::MS_PER_MINUTE;

use crate::{CheckinError, Mood};

pub const DEFAULT_COOLDOWN_MS: i64 = 60 * MS_PER_MINUTE;

/// The most recent mood submission. Stored as `{"mood": 3, "timestamp": 1700000000000}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    pub mood: Mood,
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
}

impl CheckIn {
    pub fn new(mood: Mood, timestamp_ms: i64) -> Self {
        Self { mood, timestamp_ms }
    }

    pub fn to_json(&self) -> Result<String, CheckinError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, CheckinError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CooldownState {
    pub can_check_in: bool,
    /// Whole minutes until the next check-in, rounded up. `None` when open.
    pub minutes_remaining: Option<u32>,
}

impl CooldownState {
    pub const OPEN: CooldownState = CooldownState {
        can_check_in: true,
        minutes_remaining: None,
    };

    pub fn locked(minutes: u32) -> Self {
        Self {
            can_check_in: false,
            minutes_remaining: Some(minutes),
        }
    }
}

pub fn evaluate(now_ms: i64, last: Option<&CheckIn>, cooldown_ms: i64) -> CooldownState {
    let Some(last) = last else {
        return CooldownState::OPEN;
    };

    let elapsed = now_ms.saturating_sub(last.timestamp_ms);
    if elapsed >= cooldown_ms {
        return CooldownState::OPEN;
    }

    let left = cooldown_ms.saturating_sub(elapsed);
    // ceil(left / 1 min); left > 0 here.
    let minutes = left.saturating_add(MS_PER_MINUTE - 1) / MS_PER_MINUTE;
    CooldownState::locked(u32::try_from(minutes).unwrap_or(u32::MAX))
}

/// `"{m}m ago"` under an hour, `"{h}h ago"` after. Future timestamps read as `0m ago`.
pub fn age_label(now_ms: i64, timestamp_ms: i64) -> String {
    let minutes = (now_ms.saturating_sub(timestamp_ms) / MS_PER_MINUTE).max(0);
    if minutes < 60 {
        format!("{minutes}m ago")
    } else {
        format!("{}h ago", minutes / 60)
    }
}

pub fn next_label(minutes_remaining: u32) -> String {
    format!("Next in {minutes_remaining}m")
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: i64 = 1_000_000;

    fn at(ts: i64) -> CheckIn {
        CheckIn::new(Mood::GOOD, ts)
    }

    #[test]
    fn never_checked_in_is_open() {
        assert_eq!(evaluate(T, None, DEFAULT_COOLDOWN_MS), CooldownState::OPEN);
    }

    #[test]
    fn just_checked_in_is_locked_for_sixty() {
        let last = at(T);
        assert_eq!(
            evaluate(T, Some(&last), DEFAULT_COOLDOWN_MS),
            CooldownState::locked(60)
        );
    }

    #[test]
    fn last_millisecond_rounds_up() {
        let last = at(T);
        assert_eq!(
            evaluate(T + 3_599_999, Some(&last), DEFAULT_COOLDOWN_MS),
            CooldownState::locked(1)
        );
        assert_eq!(
            evaluate(T + 60_001, Some(&last), DEFAULT_COOLDOWN_MS),
            CooldownState::locked(59)
        );
        assert_eq!(
            evaluate(T + 60_000, Some(&last), DEFAULT_COOLDOWN_MS),
            CooldownState::locked(59)
        );
        assert_eq!(
            evaluate(T + 59_999, Some(&last), DEFAULT_COOLDOWN_MS),
            CooldownState::locked(60)
        );
    }

    #[test]
    fn opens_exactly_at_window_end() {
        let last = at(T);
        assert!(evaluate(T + 3_600_000, Some(&last), DEFAULT_COOLDOWN_MS).can_check_in);
        assert!(evaluate(T + 90_000_000, Some(&last), DEFAULT_COOLDOWN_MS).can_check_in);
    }

    #[test]
    fn evaluate_is_pure() {
        let last = at(T);
        let a = evaluate(T + 1_234_567, Some(&last), DEFAULT_COOLDOWN_MS);
        let b = evaluate(T + 1_234_567, Some(&last), DEFAULT_COOLDOWN_MS);
        assert_eq!(a, b);
    }

    #[test]
    fn future_timestamp_stays_locked() {
        let last = at(T + 60_000);
        assert_eq!(
            evaluate(T, Some(&last), DEFAULT_COOLDOWN_MS),
            CooldownState::locked(61)
        );
    }

    #[test]
    fn custom_window() {
        let last = at(T);
        assert_eq!(evaluate(T, Some(&last), 90_000), CooldownState::locked(2));
        assert!(evaluate(T + 90_000, Some(&last), 90_000).can_check_in);
        assert!(evaluate(T, Some(&last), 0).can_check_in);
    }

    #[test]
    fn age_labels() {
        assert_eq!(age_label(T + 90_000, T), "1m ago");
        assert_eq!(age_label(T + 3_700_000, T), "1h ago");
        assert_eq!(age_label(T, T), "0m ago");
        assert_eq!(age_label(T + 59 * 60_000 + 59_999, T), "59m ago");
        assert_eq!(age_label(T + 60 * 60_000, T), "1h ago");
        assert_eq!(age_label(T + 26 * 3_600_000, T), "26h ago");
        assert_eq!(age_label(T - 5_000_000, T), "0m ago");
    }

    #[test]
    fn record_wire_format() {
        let record = CheckIn::new(Mood::GOOD, 1_000_000);
        assert_eq!(record.to_json().unwrap(), r#"{"mood":3,"timestamp":1000000}"#);
        assert_eq!(CheckIn::from_json(r#"{"timestamp":5,"mood":1}"#).unwrap(), CheckIn::new(Mood::COULD_BE_BETTER, 5));
    }

    #[test]
    fn malformed_records_fail_to_decode() {
        for text in ["", "null", "{}", r#"{"mood":0,"timestamp":1}"#, r#"{"mood":"3","timestamp":1}"#] {
            assert!(CheckIn::from_json(text).is_err(), "{text:?}");
        }
    }
}
