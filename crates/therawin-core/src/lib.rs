//! # Clock, timers, scopes and storage
//!
//! `therawin-core` is the small single-threaded runtime the home screen runs
//! on. Nothing in here knows about moods or sunsets; it only provides the
//! plumbing those widgets need:
//!
//! - [`Clock`]: injectable wall clock (epoch milliseconds + local hour).
//! - [`EventLoop`]: cooperative timer queue (`set_timeout` / `set_interval`).
//! - [`Scope`] / [`Dispose`]: teardown groups; disposing a scope cancels
//!   every timer registered on it.
//! - [`Signal<T>`]: observable value a renderer can subscribe to.
//! - [`AnimatedValue<T>`]: clock-driven tween.
//! - [`KeyValueStore`]: the one durable slot the app writes to.
//!
//! ## Deterministic time
//!
//! Widgets never read the system clock themselves. They ask the event loop,
//! and the event loop asks whatever [`Clock`] it was built with:
//!
//! ```rust
//! use std::rc::Rc;
//! use therawin_core::*;
//!
//! let clock = Rc::new(ManualClock::new(0));
//! let events = EventLoop::new(clock.clone());
//!
//! let fired = signal(0);
//! let _tick = events.set_interval(60_000, {
//!     let fired = fired.clone();
//!     move || fired.update(|n| *n += 1)
//! });
//!
//! events.advance_by(&clock, 180_000);
//! assert_eq!(fired.get(), 3);
//! ```
//!
//! ## Cleanup
//!
//! Timers return a [`Dispose`] guard. Hand it to a [`Scope`] and the timer is
//! cancelled when the scope is torn down:
//!
//! ```rust
//! use std::rc::Rc;
//! use therawin_core::*;
//!
//! let clock = Rc::new(ManualClock::new(0));
//! let events = EventLoop::new(clock.clone());
//! let scope = Scope::new();
//!
//! scope.add_dispose(events.set_interval(1_000, || log::debug!("tick")));
//! assert_eq!(events.pending(), 1);
//!
//! scope.dispose();
//! assert_eq!(events.pending(), 0);
//! ```

pub mod animation;
pub mod clock;
pub mod effects;
pub mod error;
pub mod scope;
pub mod signal;
pub mod store;
pub mod timer;

pub use animation::*;
pub use clock::*;
pub use effects::*;
pub use error::*;
pub use scope::*;
pub use signal::*;
pub use store::*;
pub use timer::*;
