use std::cell::RefCell;
use std::rc::Rc;

use crate::reactive::{self, SourceId};

pub struct Signal<T: 'static> {
    value: Rc<RefCell<T>>,
    id: SourceId,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            id: reactive::new_source(),
        }
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        reactive::register_read(self.id);
        self.value.borrow().clone()
    }

    /// Reads without registering a dependency.
    pub fn peek(&self) -> T
    where
        T: Clone,
    {
        self.value.borrow().clone()
    }

    pub fn set(&self, v: T) {
        *self.value.borrow_mut() = v;
        reactive::notify_changed(self.id);
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        f(&mut self.value.borrow_mut());
        reactive::notify_changed(self.id);
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            id: self.id,
        }
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
