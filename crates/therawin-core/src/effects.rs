use std::cell::RefCell;
use std::rc::Rc;

/// Cancellation guard returned by timers and subscriptions.
#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// Runs at most once (safe to call multiple times).
    pub fn run(&self) {
        let f = self.0.borrow_mut().take();
        if let Some(f) = f {
            f()
        }
    }

    pub fn is_spent(&self) -> bool {
        self.0.borrow().is_none()
    }
}

impl std::fmt::Debug for Dispose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispose")
            .field("spent", &self.is_spent())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn dispose_runs_once() {
        let hits = Rc::new(Cell::new(0));
        let d = Dispose::new({
            let hits = hits.clone();
            move || hits.set(hits.get() + 1)
        });
        let d2 = d.clone();

        d.run();
        d2.run();
        d.run();

        assert_eq!(hits.get(), 1);
        assert!(d2.is_spent());
    }
}
