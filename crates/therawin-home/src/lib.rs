//! # Therawin home tab
//!
//! State behind the two live widgets on the home screen:
//!
//! - [`landscape::LandscapeBanner`] picks a theme from the time of day
//!   ([`period::classify`]) and lets the user pin a period by cycling.
//! - [`checkin::CheckinPanel`] records a mood at most once per cooldown window
//!   ([`cooldown::evaluate`]) and keeps the latest record in a key/value slot.
//!
//! [`home::HomeTab`] mounts both on one event loop. Everything here produces
//! plain view data; drawing it is the renderer's job.
//!
//! ```rust
//! use std::rc::Rc;
//! use therawin_core::{ManualClock, MemoryStore};
//! use therawin_home::{HomeConfig, HomeTab, Mood};
//!
//! let clock = Rc::new(ManualClock::at_hour(8));
//! let home = HomeTab::mount(HomeConfig::default(), clock.clone(), Rc::new(MemoryStore::new()));
//!
//! let view = home.snapshot();
//! assert_eq!(view.landscape.label, "Morning Reflection");
//! assert!(view.checkin.is_open());
//!
//! home.checkin().submit(Mood::GOOD);
//! assert!(!home.snapshot().checkin.is_open());
//! ```

pub mod checkin;
pub mod config;
pub mod cooldown;
pub mod error;
pub mod home;
pub mod landscape;
pub mod mood;
pub mod period;

pub use checkin::{CheckinPanel, CheckinSink, CheckinSnapshot, CheckinState, CheckinView, SimulatedSave};
pub use config::HomeConfig;
pub use cooldown::{CheckIn, CooldownState, age_label, evaluate, next_label};
pub use error::{CheckinError, ConfigError};
pub use home::{HomeTab, HomeView};
pub use landscape::{LandscapeBanner, LandscapeView, TimeMode};
pub use mood::{MOOD_OPTIONS, Mood, MoodOption};
pub use period::{Classification, SunPosition, Theme, TimePeriod, classify};
