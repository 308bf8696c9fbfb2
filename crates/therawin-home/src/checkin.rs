//! Mood check-in panel.
//!
//! Holds the latest [`CheckIn`], gates new submissions on the cooldown, and
//! keeps a one-minute tick running while locked so the countdown stays fresh.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use therawin_core::{Dispose, EventLoop, KeyValueStore, Scope, Signal, signal};

use crate::cooldown::{age_label, evaluate, next_label};
use crate::{CheckIn, CheckinError, CooldownState, HomeConfig, MOOD_OPTIONS, Mood, MoodOption};

/// Where a submission goes after it has been stored locally.
pub trait CheckinSink {
    fn save(&self, check_in: &CheckIn) -> Result<(), CheckinError>;
}

impl<F> CheckinSink for F
where
    F: Fn(&CheckIn) -> Result<(), CheckinError>,
{
    fn save(&self, check_in: &CheckIn) -> Result<(), CheckinError> {
        self(check_in)
    }
}

/// Stand-in for the check-in API: accepts everything.
pub struct SimulatedSave;

impl CheckinSink for SimulatedSave {
    fn save(&self, check_in: &CheckIn) -> Result<(), CheckinError> {
        log::debug!("saved check-in {check_in:?}");
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckinState {
    pub last: Option<CheckIn>,
    pub selected: Option<Mood>,
    pub cooldown: CooldownState,
    pub feedback: bool,
}

impl Default for CheckinState {
    fn default() -> Self {
        Self {
            last: None,
            selected: None,
            cooldown: CooldownState::OPEN,
            feedback: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoodChoice {
    pub option: &'static MoodOption,
    pub selected: bool,
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckinView {
    /// "How are you feeling?" with every option clickable.
    Open { choices: Vec<MoodChoice> },
    /// "Current Mood" with the age of the last check-in and the countdown.
    Locked {
        current: &'static MoodOption,
        age_label: String,
        next_label: String,
        minutes_remaining: u32,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckinSnapshot {
    pub body: CheckinView,
    /// Encouragement for the mood just submitted, while the feedback window lasts.
    pub feedback: Option<&'static str>,
}

impl CheckinSnapshot {
    pub fn is_open(&self) -> bool {
        matches!(self.body, CheckinView::Open { .. })
    }
}

impl fmt::Display for CheckinSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            CheckinView::Open { choices } => {
                f.write_str("How are you feeling?")?;
                for choice in choices {
                    let mark = if choice.selected { "*" } else { "" };
                    write!(f, " [{}{mark}]", choice.option.aria_label)?;
                }
            }
            CheckinView::Locked {
                current,
                age_label,
                next_label,
                ..
            } => {
                write!(
                    f,
                    "Current Mood: {} ({age_label}) | {next_label}",
                    current.aria_label
                )?;
            }
        }
        if let Some(text) = self.feedback {
            write!(f, " | {text}")?;
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct CheckinPanel {
    inner: Rc<PanelInner>,
}

struct PanelInner {
    config: HomeConfig,
    events: EventLoop,
    store: Rc<dyn KeyValueStore>,
    sink: Rc<dyn CheckinSink>,
    state: Signal<CheckinState>,
    tick: RefCell<Option<Dispose>>,
    feedback_timer: RefCell<Option<Dispose>>,
    /// Saves still waiting on their delay, keyed by submission.
    saves: RefCell<Vec<(u64, Dispose)>>,
    next_save: Cell<u64>,
}

impl CheckinPanel {
    /// Reads the stored check-in once and starts the countdown if still locked.
    pub fn mount(
        parent: &Scope,
        events: &EventLoop,
        store: Rc<dyn KeyValueStore>,
        sink: Rc<dyn CheckinSink>,
        config: HomeConfig,
    ) -> Self {
        let scope = parent.child();
        let last = load_last(store.as_ref(), &config.storage_key);
        let cooldown = evaluate(events.now_ms(), last.as_ref(), config.cooldown_ms);

        let panel = Self {
            inner: Rc::new(PanelInner {
                config,
                events: events.clone(),
                store,
                sink,
                state: signal(CheckinState {
                    last,
                    selected: last.map(|c| c.mood),
                    cooldown,
                    feedback: false,
                }),
                tick: RefCell::new(None),
                feedback_timer: RefCell::new(None),
                saves: RefCell::new(Vec::new()),
                next_save: Cell::new(0),
            }),
        };

        let weak = Rc::downgrade(&panel.inner);
        scope.add_disposer(move || {
            if let Some(inner) = weak.upgrade() {
                inner.stop_tick();
                let feedback = inner.feedback_timer.borrow_mut().take();
                if let Some(d) = feedback {
                    d.run();
                }
                let saves = std::mem::take(&mut *inner.saves.borrow_mut());
                for (_, d) in saves {
                    d.run();
                }
            }
        });

        if let Some(last) = last {
            log::debug!(
                "restored check-in mood={} at {} ({:?})",
                last.mood.value(),
                last.timestamp_ms,
                cooldown
            );
        }
        if !cooldown.can_check_in {
            panel.inner.start_tick();
        }
        panel
    }

    pub fn state(&self) -> &Signal<CheckinState> {
        &self.inner.state
    }

    pub fn cooldown(&self) -> CooldownState {
        self.inner.state.with(|s| s.cooldown)
    }

    pub fn last_check_in(&self) -> Option<CheckIn> {
        self.inner.state.with(|s| s.last)
    }

    pub fn is_ticking(&self) -> bool {
        self.inner.tick.borrow().is_some()
    }

    /// Records `mood` now. Returns `None` without touching anything while the
    /// cooldown is running.
    pub fn submit(&self, mood: Mood) -> Option<CheckIn> {
        let inner = &self.inner;
        let (can_check_in, previous) = inner.state.with(|s| (s.cooldown.can_check_in, s.last));
        if !can_check_in {
            log::debug!("check-in rejected: cooldown running");
            return None;
        }

        // Keep timestamps non-decreasing even if the wall clock stepped back.
        let now = inner.events.now_ms();
        let timestamp_ms = previous.map_or(now, |p| now.max(p.timestamp_ms));
        let record = CheckIn::new(mood, timestamp_ms);

        if let Err(e) = inner.persist(&record) {
            log::error!("failed to store check-in: {e}");
        }

        let cooldown = evaluate(now, Some(&record), inner.config.cooldown_ms);
        inner.state.set(CheckinState {
            last: Some(record),
            selected: Some(mood),
            cooldown,
            feedback: true,
        });
        log::info!("checked in mood={} ({})", mood.value(), mood);

        if !cooldown.can_check_in {
            inner.start_tick();
        }
        inner.schedule_feedback_clear();
        inner.schedule_save(record);

        Some(record)
    }

    pub fn snapshot(&self) -> CheckinSnapshot {
        let now = self.inner.events.now_ms();
        self.inner.state.with(|s| {
            let locked = match (s.cooldown.minutes_remaining, s.last) {
                (Some(minutes), Some(last)) if !s.cooldown.can_check_in => Some((minutes, last)),
                _ => None,
            };

            let body = match locked {
                Some((minutes, last)) => CheckinView::Locked {
                    current: s.selected.unwrap_or(last.mood).option(),
                    age_label: age_label(now, last.timestamp_ms),
                    next_label: next_label(minutes),
                    minutes_remaining: minutes,
                },
                None => CheckinView::Open {
                    choices: MOOD_OPTIONS
                        .iter()
                        .map(|option| MoodChoice {
                            option,
                            selected: s.selected == Some(option.mood),
                            enabled: true,
                        })
                        .collect(),
                },
            };

            let feedback = match (s.feedback, s.selected) {
                (true, Some(mood)) => Some(mood.option().feedback_text),
                _ => None,
            };

            CheckinSnapshot { body, feedback }
        })
    }
}

impl PanelInner {
    fn persist(&self, record: &CheckIn) -> Result<(), CheckinError> {
        let json = record.to_json()?;
        self.store.set(&self.config.storage_key, &json)?;
        Ok(())
    }

    fn start_tick(self: &Rc<Self>) {
        if self.tick.borrow().is_some() {
            return;
        }
        let weak: Weak<PanelInner> = Rc::downgrade(self);
        let d = self.events.set_interval(self.config.cooldown_tick_ms, move || {
            if let Some(inner) = weak.upgrade() {
                inner.on_tick();
            }
        });
        *self.tick.borrow_mut() = Some(d);
    }

    fn stop_tick(&self) {
        let d = self.tick.borrow_mut().take();
        if let Some(d) = d {
            d.run();
        }
    }

    fn on_tick(&self) {
        let now = self.events.now_ms();
        let last = self.state.with(|s| s.last);
        let cooldown = evaluate(now, last.as_ref(), self.config.cooldown_ms);
        log::debug!("cooldown tick at {now}: {cooldown:?}");

        self.state.update(|s| s.cooldown = cooldown);
        if cooldown.can_check_in {
            log::info!("check-in available again");
            self.stop_tick();
        }
    }

    fn schedule_feedback_clear(self: &Rc<Self>) {
        if let Some(previous) = self.feedback_timer.borrow_mut().take() {
            previous.run();
        }
        let weak = Rc::downgrade(self);
        let d = self.events.set_timeout(self.config.feedback_window_ms, move || {
            if let Some(inner) = weak.upgrade() {
                inner.feedback_timer.borrow_mut().take();
                inner.state.update(|s| s.feedback = false);
            }
        });
        *self.feedback_timer.borrow_mut() = Some(d);
    }

    /// Fire-and-forget; a failure is logged and nothing is rolled back.
    fn schedule_save(self: &Rc<Self>, record: CheckIn) {
        let id = self.next_save.get();
        self.next_save.set(id.wrapping_add(1));

        let sink = self.sink.clone();
        let weak = Rc::downgrade(self);
        let d = self.events.set_timeout(self.config.save_delay_ms, move || {
            if let Some(inner) = weak.upgrade() {
                inner.saves.borrow_mut().retain(|(pending, _)| *pending != id);
            }
            if let Err(e) = sink.save(&record) {
                log::error!("Failed to save mood: {e}");
            }
        });
        self.saves.borrow_mut().push((id, d));
    }
}

/// Missing, unreadable or malformed content all mean "never checked in".
fn load_last(store: &dyn KeyValueStore, key: &str) -> Option<CheckIn> {
    let text = match store.get(key) {
        Ok(Some(text)) => text,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("could not read '{key}': {e}");
            return None;
        }
    };
    match CheckIn::from_json(&text) {
        Ok(record) => Some(record),
        Err(e) => {
            log::warn!("ignoring stored '{key}': {e}");
            None
        }
    }
}
