use std::fmt;
use std::rc::Rc;

use veneer_core::Derived;

use crate::view_model::{ViewModel, ViewModelSource};

/// Reshapes the next resolved view model's field values without changing
/// its field set.
pub type ViewModelOverride = Rc<dyn Fn(&ViewModel) -> ViewModel>;

/// What a factory callback produces.
pub type FactoryResult<P> = anyhow::Result<PresenterConfig<P>>;

/// One presenter definition's output: the view model source, an arbitrary
/// user state payload `P` (actions, counters — whatever the view and the
/// tests need to reach), and optional lifecycle hooks.
pub struct PresenterConfig<P = ()> {
    pub view_model: ViewModelSource,
    pub state: P,
    pub(crate) on_created: Option<Box<dyn FnOnce()>>,
    pub(crate) on_destroy: Option<Box<dyn FnOnce()>>,
}

impl<P> PresenterConfig<P> {
    pub fn new(state: P, view_model: impl Into<ViewModelSource>) -> Self {
        Self {
            view_model: view_model.into(),
            state,
            on_created: None,
            on_destroy: None,
        }
    }

    /// Invoked exactly once, right after the configuration validates.
    pub fn on_created(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_created = Some(Box::new(f));
        self
    }

    /// Invoked exactly once when the enclosing scope ends. Without a scope
    /// it never runs.
    pub fn on_destroy(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_destroy = Some(Box::new(f));
        self
    }
}

struct PresenterInner<P> {
    state: Option<P>,
    view_model: Derived<ViewModel>,
}

/// A resolved presenter instance as handed to callers: the user state and
/// the (possibly override-wrapped) view model, with the internal lifecycle
/// hooks stripped. Clones share the instance; `ptr_eq` tells clones of one
/// instance apart from a later resolution of the same definition.
pub struct Presenter<P> {
    inner: Rc<PresenterInner<P>>,
}

impl<P> Presenter<P> {
    pub(crate) fn new(state: P, view_model: Derived<ViewModel>) -> Self {
        Self {
            inner: Rc::new(PresenterInner {
                state: Some(state),
                view_model,
            }),
        }
    }

    /// The stand-in returned when presenter construction failed inside a
    /// live scope: no state, and a view model that is always empty.
    pub(crate) fn fallback() -> Self {
        Self {
            inner: Rc::new(PresenterInner {
                state: None,
                view_model: Derived::new(ViewModel::new),
            }),
        }
    }

    /// The user state payload; `None` only on a fallback instance.
    pub fn state(&self) -> Option<&P> {
        self.inner.state.as_ref()
    }

    pub fn view_model(&self) -> Derived<ViewModel> {
        self.inner.view_model.clone()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<P> Clone for Presenter<P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

// no P: Debug bound; the payload is opaque here, and reading the derived
// view model from a formatter would force a recompute
impl<P> fmt::Debug for Presenter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Presenter")
            .field("fallback", &self.inner.state.is_none())
            .finish_non_exhaustive()
    }
}

/// What a hook invocation (or a spy) hands back. `view_model` is the same
/// underlying derived as `presenter.view_model()`.
pub struct PresenterOutput<P = ()> {
    pub presenter: Presenter<P>,
    pub view_model: Derived<ViewModel>,
}

impl<P> PresenterOutput<P> {
    pub(crate) fn of(presenter: Presenter<P>) -> Self {
        Self {
            view_model: presenter.view_model(),
            presenter,
        }
    }
}

impl<P> fmt::Debug for PresenterOutput<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresenterOutput")
            .field("presenter", &self.presenter)
            .finish_non_exhaustive()
    }
}
