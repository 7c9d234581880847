use std::cell::RefCell;
use std::rc::Rc;

use crate::reactive::{self, ObserverId, SourceId};

/// Read-only memoized computation over reactive sources.
///
/// A `Derived` caches the result of its compute closure. Writes to any
/// signal (or derived) read during the last compute invalidate the cache
/// and notify downstream dependents; the value itself is recomputed
/// lazily on the next `value()` call, under dependency tracking.
///
/// ```rust
/// use veneer_core::{Derived, signal};
///
/// let first = signal("Jane".to_string());
/// let last = signal("Doe".to_string());
///
/// let full = Derived::new({
///     let (first, last) = (first.clone(), last.clone());
///     move || format!("{} {}", first.get(), last.get())
/// });
///
/// assert_eq!(full.value(), "Jane Doe");
/// first.set("Joan".into());
/// assert_eq!(full.value(), "Joan Doe");
/// ```
pub struct Derived<T: Clone + 'static> {
    inner: Rc<DerivedInner<T>>,
}

struct DerivedInner<T> {
    compute: Box<dyn Fn() -> T>,
    cached: RefCell<Option<T>>,
    id: SourceId,
    observer: ObserverId,
}

impl<T: Clone + 'static> Derived<T> {
    pub fn new(compute: impl Fn() -> T + 'static) -> Self {
        let inner = Rc::new_cyclic(|weak: &std::rc::Weak<DerivedInner<T>>| {
            let weak = weak.clone();
            let observer = reactive::new_observer(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.cached.borrow_mut().take();
                    reactive::notify_changed(inner.id);
                }
            });
            DerivedInner {
                compute: Box::new(compute),
                cached: RefCell::new(None),
                id: reactive::new_source(),
                observer,
            }
        });
        Self { inner }
    }

    /// Current value; recomputes under tracking if the cache was invalidated.
    pub fn value(&self) -> T {
        reactive::register_read(self.inner.id);
        if let Some(v) = self.inner.cached.borrow().as_ref() {
            return v.clone();
        }
        let v = reactive::tracked(self.inner.observer, || (self.inner.compute)());
        *self.inner.cached.borrow_mut() = Some(v.clone());
        v
    }

    /// True if both handles share one underlying memo cell.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }
}

impl<T: Clone + 'static> Clone for Derived<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Drop for DerivedInner<T> {
    fn drop(&mut self) {
        reactive::remove_observer(self.observer);
    }
}
