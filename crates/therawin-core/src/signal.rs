use std::cell::RefCell;
use std::rc::Rc;

use crate::Dispose;

/// Observable value. Subscribers run after every write, outside the borrow,
/// so they may read the signal again.
pub struct Signal<T>(Rc<RefCell<Inner<T>>>);

struct Inner<T> {
    value: T,
    subs: Vec<(u64, Rc<dyn Fn(&T)>)>,
    next_sub: u64,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Clone> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            subs: Vec::new(),
            next_sub: 0,
        })))
    }

    pub fn get(&self) -> T {
        self.0.borrow().value.clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow().value)
    }

    pub fn set(&self, v: T) {
        self.0.borrow_mut().value = v;
        self.notify();
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        f(&mut self.0.borrow_mut().value);
        self.notify();
    }

    /// Calls `f` after every write until the returned guard is run.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Dispose
    where
        T: 'static,
    {
        let id = {
            let mut inner = self.0.borrow_mut();
            let id = inner.next_sub;
            inner.next_sub += 1;
            inner.subs.push((id, Rc::new(f)));
            id
        };
        let weak = Rc::downgrade(&self.0);
        Dispose::new(move || {
            if let Some(inner) = weak.upgrade() {
                let removed = {
                    let mut inner = inner.borrow_mut();
                    inner
                        .subs
                        .iter()
                        .position(|(sub, _)| *sub == id)
                        .map(|i| inner.subs.remove(i))
                };
                drop(removed);
            }
        })
    }

    fn notify(&self) {
        let (value, subs) = {
            let inner = self.0.borrow();
            let subs: Vec<_> = inner.subs.iter().map(|(_, f)| f.clone()).collect();
            (inner.value.clone(), subs)
        };
        for s in subs {
            s(&value);
        }
    }
}

impl<T: Clone + PartialEq> Signal<T> {
    /// Writes and notifies only when the value actually changes.
    pub fn replace_if_changed(&self, v: T) -> bool {
        if self.0.borrow().value == v {
            return false;
        }
        self.set(v);
        true
    }
}

pub fn signal<T: Clone>(t: T) -> Signal<T> {
    Signal::new(t)
}
