//! Landscape banner: a sky that follows the clock unless the user pins a period.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use therawin_core::{AnimatedValue, AnimationSpec, EventLoop, Scope, Signal, signal};

use crate::{Classification, HomeConfig, SunPosition, Theme, TimePeriod, classify};

/// Whether the banner tracks the real hour or shows a fixed period.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TimeMode {
    #[default]
    Auto,
    Pinned(TimePeriod),
}

impl TimeMode {
    /// Toggle order: auto, morning, afternoon, evening, night, auto, ...
    pub fn next(self) -> TimeMode {
        match self {
            TimeMode::Auto => TimeMode::Pinned(TimePeriod::Morning),
            TimeMode::Pinned(TimePeriod::Morning) => TimeMode::Pinned(TimePeriod::Afternoon),
            TimeMode::Pinned(TimePeriod::Afternoon) => TimeMode::Pinned(TimePeriod::Evening),
            TimeMode::Pinned(TimePeriod::Evening) => TimeMode::Pinned(TimePeriod::Night),
            TimeMode::Pinned(TimePeriod::Night) => TimeMode::Auto,
        }
    }
}

impl fmt::Display for TimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeMode::Auto => f.write_str("auto"),
            TimeMode::Pinned(period) => write!(f, "pinned {period}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CelestialBody {
    Sun,
    Moon,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Critter {
    Butterfly,
    Firefly,
}

/// Decorative layer choices; positions and animation belong to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decorations {
    pub body: CelestialBody,
    pub critter: Critter,
    pub critter_count: usize,
    pub grass_blades: usize,
}

impl Decorations {
    pub fn for_period(period: TimePeriod) -> Self {
        if period.is_night() {
            Decorations {
                body: CelestialBody::Moon,
                critter: Critter::Firefly,
                critter_count: 8,
                grass_blades: 40,
            }
        } else {
            Decorations {
                body: CelestialBody::Sun,
                critter: Critter::Butterfly,
                critter_count: 5,
                grass_blades: 40,
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LandscapeState {
    pub mode: TimeMode,
    pub classification: Classification,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LandscapeView {
    pub mode: TimeMode,
    pub period: TimePeriod,
    pub theme: Theme,
    pub label: &'static str,
    pub tip: &'static str,
    pub decorations: Decorations,
    /// Where the sun is drawn right now, mid-transition if one is running.
    pub sun: SunPosition,
    /// Icon on the cycle button.
    pub toggle_icon: CelestialBody,
}

impl fmt::Display for LandscapeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}, {}] sun ({:.0}, {:.0}): {}",
            self.label, self.period, self.mode, self.sun.x, self.sun.y, self.tip
        )
    }
}

#[derive(Clone)]
pub struct LandscapeBanner {
    inner: Rc<BannerInner>,
}

struct BannerInner {
    events: EventLoop,
    state: Signal<LandscapeState>,
    sun: RefCell<AnimatedValue<SunPosition>>,
}

impl LandscapeBanner {
    /// Classifies the current hour right away, then re-checks every
    /// `theme_tick_ms` while in auto mode.
    pub fn mount(parent: &Scope, events: &EventLoop, config: &HomeConfig) -> Self {
        let scope = parent.child();
        let classification = classify(events.local_hour());

        let banner = Self {
            inner: Rc::new(BannerInner {
                events: events.clone(),
                state: signal(LandscapeState {
                    mode: TimeMode::Auto,
                    classification,
                }),
                sun: RefCell::new(AnimatedValue::new(
                    classification.theme.sun,
                    AnimationSpec::scene(config.sun_transition_ms),
                )),
            }),
        };
        log::debug!("landscape mounted in {}", classification.period);

        let weak: Weak<BannerInner> = Rc::downgrade(&banner.inner);
        scope.add_dispose(events.set_interval(config.theme_tick_ms, move || {
            if let Some(inner) = weak.upgrade() {
                inner.on_tick();
            }
        }));
        banner
    }

    pub fn state(&self) -> &Signal<LandscapeState> {
        &self.inner.state
    }

    pub fn mode(&self) -> TimeMode {
        self.inner.state.with(|s| s.mode)
    }

    pub fn period(&self) -> TimePeriod {
        self.inner.state.with(|s| s.classification.period)
    }

    /// Advances the toggle one step and returns the new mode.
    pub fn cycle(&self) -> TimeMode {
        let mode = self.mode().next();
        self.set_mode(mode);
        mode
    }

    pub fn set_mode(&self, mode: TimeMode) {
        let hour = match mode {
            TimeMode::Auto => self.inner.events.local_hour(),
            TimeMode::Pinned(period) => period.representative_hour(),
        };
        log::info!("landscape mode -> {mode}");
        self.inner.apply(mode, classify(hour));
    }

    pub fn snapshot(&self) -> LandscapeView {
        let now = self.inner.events.now_ms();
        let sun = {
            let mut sun = self.inner.sun.borrow_mut();
            sun.update(now);
            *sun.get()
        };
        let LandscapeState {
            mode,
            classification,
        } = self.inner.state.get();
        let period = classification.period;
        let decorations = Decorations::for_period(period);

        LandscapeView {
            mode,
            period,
            theme: classification.theme,
            label: period.label(),
            tip: period.tip(),
            decorations,
            sun,
            toggle_icon: decorations.body,
        }
    }
}

impl BannerInner {
    fn on_tick(&self) {
        if self.state.with(|s| s.mode) != TimeMode::Auto {
            return;
        }
        let hour = self.events.local_hour();
        log::debug!("landscape tick: hour {hour}");
        self.apply(TimeMode::Auto, classify(hour));
    }

    fn apply(&self, mode: TimeMode, classification: Classification) {
        let target = classification.theme.sun;
        {
            let mut sun = self.sun.borrow_mut();
            if *sun.target() != target {
                sun.set_target(target, self.events.now_ms());
            }
        }
        self.state.replace_if_changed(LandscapeState {
            mode,
            classification,
        });
    }
}
