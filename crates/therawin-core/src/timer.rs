//! Cooperative timer loop.
//!
//! All widget state lives on one thread; the only asynchrony is "call me back
//! later". [`EventLoop`] keeps those callbacks in a queue keyed by deadline and
//! fires the due ones whenever the host calls [`EventLoop::run_due`].

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use slotmap::{SlotMap, new_key_type};

use crate::{Clock, Dispose, ManualClock};

new_key_type! {
    pub struct TimerKey;
}

enum Callback {
    Once(Box<dyn FnOnce()>),
    Repeat(Box<dyn FnMut()>),
}

struct Timer {
    deadline_ms: i64,
    period_ms: Option<i64>,
    /// Insertion order; breaks ties between equal deadlines.
    seq: u64,
    /// Taken out while the callback runs.
    callback: Option<Callback>,
}

struct LoopInner {
    clock: Rc<dyn Clock>,
    timers: RefCell<SlotMap<TimerKey, Timer>>,
    next_seq: Cell<u64>,
}

/// Cloneable handle to the timer queue.
#[derive(Clone)]
pub struct EventLoop {
    inner: Rc<LoopInner>,
}

impl EventLoop {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            inner: Rc::new(LoopInner {
                clock,
                timers: RefCell::new(SlotMap::with_key()),
                next_seq: Cell::new(0),
            }),
        }
    }

    pub fn now_ms(&self) -> i64 {
        self.inner.clock.now_ms()
    }

    pub fn local_hour(&self) -> u32 {
        self.inner.clock.local_hour()
    }

    /// Calls `f` once, `delay_ms` from now.
    pub fn set_timeout(&self, delay_ms: i64, f: impl FnOnce() + 'static) -> Dispose {
        self.schedule(delay_ms.max(0), None, Callback::Once(Box::new(f)))
    }

    /// Calls `f` every `period_ms`, first call one period from now. Periods
    /// under 1 ms are treated as 1 ms.
    pub fn set_interval(&self, period_ms: i64, f: impl FnMut() + 'static) -> Dispose {
        let period_ms = period_ms.max(1);
        self.schedule(period_ms, Some(period_ms), Callback::Repeat(Box::new(f)))
    }

    fn schedule(&self, delay_ms: i64, period_ms: Option<i64>, callback: Callback) -> Dispose {
        let seq = self.inner.next_seq.get();
        self.inner.next_seq.set(seq.wrapping_add(1));

        let key = self.inner.timers.borrow_mut().insert(Timer {
            deadline_ms: self.now_ms().saturating_add(delay_ms),
            period_ms,
            seq,
            callback: Some(callback),
        });

        let weak: Weak<LoopInner> = Rc::downgrade(&self.inner);
        Dispose::new(move || {
            if let Some(inner) = weak.upgrade() {
                // Drop the callback outside the borrow; it may own other guards.
                let removed = inner.timers.borrow_mut().remove(key);
                drop(removed);
            }
        })
    }

    /// Number of live timers.
    pub fn pending(&self) -> usize {
        self.inner.timers.borrow().len()
    }

    /// Earliest deadline among live timers.
    pub fn next_deadline(&self) -> Option<i64> {
        self.inner
            .timers
            .borrow()
            .values()
            .filter(|t| t.callback.is_some())
            .map(|t| t.deadline_ms)
            .min()
    }

    /// Fires every timer whose deadline is at or before the clock's current
    /// time, earliest first. An interval that fell behind fires once and
    /// skips the periods it missed. Returns how many callbacks ran.
    pub fn run_due(&self) -> usize {
        let now = self.now_ms();
        let mut fired = 0;

        while let Some((key, callback)) = self.take_next_due(now) {
            match callback {
                Callback::Once(f) => f(),
                Callback::Repeat(mut f) => {
                    f();
                    // Put it back unless it was cancelled from inside.
                    let leftover = {
                        let mut timers = self.inner.timers.borrow_mut();
                        match timers.get_mut(key) {
                            Some(timer) => {
                                timer.callback = Some(Callback::Repeat(f));
                                None
                            }
                            None => Some(f),
                        }
                    };
                    drop(leftover);
                }
            }
            fired += 1;
        }

        if fired > 0 {
            log::trace!("event loop fired {fired} timer(s) at {now}");
        }
        fired
    }

    fn take_next_due(&self, now: i64) -> Option<(TimerKey, Callback)> {
        let mut timers = self.inner.timers.borrow_mut();
        let key = timers
            .iter()
            .filter(|(_, t)| t.callback.is_some() && t.deadline_ms <= now)
            .min_by_key(|(_, t)| (t.deadline_ms, t.seq))
            .map(|(k, _)| k)?;

        let period_ms = timers.get(key)?.period_ms;
        match period_ms {
            None => {
                let callback = timers.remove(key)?.callback?;
                Some((key, callback))
            }
            Some(period) => {
                let timer = timers.get_mut(key)?;
                let behind = now.saturating_sub(timer.deadline_ms);
                let skipped = behind / period;
                timer.deadline_ms = timer
                    .deadline_ms
                    .saturating_add(period.saturating_mul(skipped.saturating_add(1)));
                let callback = timer.callback.take()?;
                Some((key, callback))
            }
        }
    }

    /// Moves `clock` forward by `ms`, stopping at every deadline on the way so
    /// each callback observes the time it was scheduled for.
    pub fn advance_by(&self, clock: &ManualClock, ms: i64) -> usize {
        let target = clock.now_ms().saturating_add(ms.max(0));
        let mut fired = 0;

        while let Some(deadline) = self.next_deadline().filter(|d| *d <= target) {
            if deadline > clock.now_ms() {
                clock.set(deadline);
            }
            fired += self.run_due();
        }

        clock.set(target);
        fired + self.run_due()
    }

    /// Drives the loop against its (real) clock for `duration`, sleeping until
    /// each next deadline.
    pub fn run_for(&self, duration: Duration) -> usize {
        let span = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
        let end = self.now_ms().saturating_add(span);
        let mut fired = 0;

        loop {
            fired += self.run_due();

            let now = self.now_ms();
            if now >= end {
                break;
            }

            let wake = self.next_deadline().map_or(end, |d| d.min(end));
            if wake > now {
                let nap = u64::try_from(wake - now).unwrap_or(0);
                std::thread::sleep(Duration::from_millis(nap));
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(start: i64) -> (Rc<ManualClock>, EventLoop) {
        let clock = Rc::new(ManualClock::new(start));
        let events = EventLoop::new(clock.clone());
        (clock, events)
    }

    fn recorder() -> (Rc<RefCell<Vec<i64>>>, impl Fn(&EventLoop, i64) -> Box<dyn FnMut()>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let make = {
            let log = log.clone();
            move |events: &EventLoop, tag: i64| -> Box<dyn FnMut()> {
                let log = log.clone();
                let events = events.clone();
                Box::new(move || log.borrow_mut().push(events.now_ms() * 10 + tag))
            }
        };
        (log, make)
    }

    #[test]
    fn timeout_fires_once_at_deadline() {
        let (clock, events) = setup(1_000);
        let hits = Rc::new(Cell::new(0));
        let _guard = events.set_timeout(500, {
            let hits = hits.clone();
            move || hits.set(hits.get() + 1)
        });

        events.advance_by(&clock, 499);
        assert_eq!(hits.get(), 0);

        events.advance_by(&clock, 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(events.pending(), 0);

        events.advance_by(&clock, 10_000);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn interval_observes_its_own_deadline() {
        let (clock, events) = setup(0);
        let (log, make) = recorder();
        let mut tick = make(&events, 1);
        let _guard = events.set_interval(60_000, move || tick());

        events.advance_by(&clock, 150_000);
        assert_eq!(*log.borrow(), vec![600_001, 1_200_001]);
        assert_eq!(events.next_deadline(), Some(180_000));
    }

    #[test]
    fn equal_deadlines_fire_in_insertion_order() {
        let (clock, events) = setup(0);
        let (log, make) = recorder();
        let mut a = make(&events, 1);
        let mut b = make(&events, 2);
        let _a = events.set_timeout(100, move || a());
        let _b = events.set_timeout(100, move || b());

        events.advance_by(&clock, 100);
        assert_eq!(*log.borrow(), vec![1_001, 1_002]);
    }

    #[test]
    fn dispose_cancels() {
        let (clock, events) = setup(0);
        let hits = Rc::new(Cell::new(0));
        let guard = events.set_interval(10, {
            let hits = hits.clone();
            move || hits.set(hits.get() + 1)
        });

        events.advance_by(&clock, 30);
        assert_eq!(hits.get(), 3);

        guard.run();
        assert_eq!(events.pending(), 0);
        events.advance_by(&clock, 30);
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn interval_can_cancel_itself() {
        let (clock, events) = setup(0);
        let hits = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Dispose>>> = Rc::new(RefCell::new(None));

        let guard = events.set_interval(10, {
            let hits = hits.clone();
            let slot = slot.clone();
            move || {
                hits.set(hits.get() + 1);
                if hits.get() == 2 {
                    let guard = slot.borrow_mut().take();
                    if let Some(guard) = guard {
                        guard.run();
                    }
                }
            }
        });
        *slot.borrow_mut() = Some(guard);

        events.advance_by(&clock, 100);
        assert_eq!(hits.get(), 2);
        assert_eq!(events.pending(), 0);
    }

    #[test]
    fn late_interval_skips_missed_periods() {
        let (clock, events) = setup(0);
        let hits = Rc::new(Cell::new(0));
        let _guard = events.set_interval(60_000, {
            let hits = hits.clone();
            move || hits.set(hits.get() + 1)
        });

        // Jump without stepping through deadlines.
        clock.set(250_000);
        assert_eq!(events.run_due(), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(events.next_deadline(), Some(300_000));
    }

    #[test]
    fn timers_scheduled_from_callbacks_run_later() {
        let (clock, events) = setup(0);
        let (log, make) = recorder();
        let mut inner = Some(make(&events, 2));
        let mut outer = make(&events, 1);

        let _guard = events.set_timeout(100, {
            let events = events.clone();
            move || {
                outer();
                if let Some(mut inner) = inner.take() {
                    let d = events.set_timeout(50, move || inner());
                    drop(d);
                }
            }
        });

        events.advance_by(&clock, 1_000);
        assert_eq!(*log.borrow(), vec![1_001, 1_502]);
    }

    #[test]
    fn zero_period_interval_does_not_spin() {
        let (clock, events) = setup(0);
        let hits = Rc::new(Cell::new(0));
        let _guard = events.set_interval(0, {
            let hits = hits.clone();
            move || hits.set(hits.get() + 1)
        });

        events.advance_by(&clock, 5);
        assert_eq!(hits.get(), 5);
    }
}
