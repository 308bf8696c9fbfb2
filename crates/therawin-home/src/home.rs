use std::fmt;
use std::rc::Rc;

use therawin_core::{Clock, EventLoop, KeyValueStore, Scope};

use crate::{CheckinPanel, CheckinSink, CheckinSnapshot, HomeConfig, LandscapeBanner, LandscapeView, SimulatedSave};

/// Everything the renderer needs for one frame of the home tab.
#[derive(Clone, Debug, PartialEq)]
pub struct HomeView {
    pub landscape: LandscapeView,
    pub checkin: CheckinSnapshot,
}

impl fmt::Display for HomeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.landscape)?;
        write!(f, "{}", self.checkin)
    }
}

/// The home tab: landscape banner above the mood check-in, both on one event
/// loop and one teardown scope.
pub struct HomeTab {
    events: EventLoop,
    scope: Scope,
    landscape: LandscapeBanner,
    checkin: CheckinPanel,
}

impl HomeTab {
    pub fn mount(config: HomeConfig, clock: Rc<dyn Clock>, store: Rc<dyn KeyValueStore>) -> Self {
        Self::mount_with_sink(config, clock, store, Rc::new(SimulatedSave))
    }

    pub fn mount_with_sink(
        config: HomeConfig,
        clock: Rc<dyn Clock>,
        store: Rc<dyn KeyValueStore>,
        sink: Rc<dyn CheckinSink>,
    ) -> Self {
        let events = EventLoop::new(clock);
        let scope = Scope::new();

        let landscape = LandscapeBanner::mount(&scope, &events, &config);
        let checkin = CheckinPanel::mount(&scope, &events, store, sink, config);
        log::info!("home tab mounted");

        Self {
            events,
            scope,
            landscape,
            checkin,
        }
    }

    /// The loop the host drives (`run_due`, `run_for`, or `advance_by` in tests).
    pub fn events(&self) -> &EventLoop {
        &self.events
    }

    pub fn landscape(&self) -> &LandscapeBanner {
        &self.landscape
    }

    pub fn checkin(&self) -> &CheckinPanel {
        &self.checkin
    }

    pub fn snapshot(&self) -> HomeView {
        HomeView {
            landscape: self.landscape.snapshot(),
            checkin: self.checkin.snapshot(),
        }
    }

    /// Cancels every timer owned by the tab.
    pub fn unmount(self) {
        self.scope.dispose();
        log::info!("home tab unmounted");
    }
}
