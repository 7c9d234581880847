use std::cell::RefCell;
use std::rc::Rc;

use veneer_core::{Derived, current_boundary, current_scope, on_mount_complete, try_on_scope_dispose};

use crate::error::PresenterError;
use crate::types::{FactoryResult, Presenter, PresenterConfig, PresenterOutput, ViewModelOverride};
use crate::validators::{validate_presenter_config, validate_view_model_override};
use crate::view_model::ViewModel;

/// Wraps a factory callback into a presenter hook.
///
/// The callback runs once per hook invocation, never at factory time. The
/// hook carries the test capabilities (`spy`, `reset_spy`,
/// `mock_view_model`) on top of plain resolution; the single-slot state
/// behind them is private to this one factory call, so hooks built from
/// separate factory calls never observe each other.
///
/// ```rust
/// use veneer_core::Derived;
/// use veneer_presenter::{PresenterConfig, ViewModel, presenter_factory};
///
/// let use_counter = presenter_factory(|_: (), _: ()| {
///     Ok(PresenterConfig::new(
///         (),
///         Derived::new(|| ViewModel::new().with("count", 0_i32)),
///     ))
/// });
///
/// let out = use_counter.call((), ()).unwrap();
/// assert_eq!(out.view_model.value().get::<i32>("count"), Some(&0));
/// ```
pub fn presenter_factory<P, Props, View, F>(factory: F) -> PresenterHook<P, Props, View>
where
    P: 'static,
    Props: 'static,
    View: 'static,
    F: Fn(Props, View) -> FactoryResult<P> + 'static,
{
    PresenterHook {
        shared: Rc::new(HookShared {
            factory: Box::new(factory),
            cached: RefCell::new(None),
            pending_override: RefCell::new(None),
        }),
    }
}

struct HookShared<P, Props, View> {
    factory: Box<dyn Fn(Props, View) -> FactoryResult<P>>,
    // single-slot: at most one instance survives between invocations
    cached: RefCell<Option<Presenter<P>>>,
    // single-slot: applies to the next invocation only
    pending_override: RefCell<Option<ViewModelOverride>>,
}

/// The invocable hook a `presenter_factory` call returns. Cloneable; all
/// clones share the same cached-instance and pending-override slots.
pub struct PresenterHook<P, Props = (), View = ()> {
    shared: Rc<HookShared<P, Props, View>>,
}

impl<P, Props, View> Clone for PresenterHook<P, Props, View> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<P, Props, View> PresenterHook<P, Props, View>
where
    P: 'static,
    Props: 'static,
    View: 'static,
{
    /// Resolves a presenter instance.
    ///
    /// When the factory callback fails inside a live scope the error is
    /// handed to the current error boundary once the mount completes, and
    /// the caller gets a fallback instance whose view model is always
    /// empty — field reads during the broken render resolve to `None`
    /// instead of crashing. Outside a scope the error propagates as-is.
    pub fn call(&self, props: Props, view: View) -> Result<PresenterOutput<P>, PresenterError> {
        let config = match (self.shared.factory)(props, view) {
            Ok(config) => config,
            Err(err) => {
                if current_scope().is_none() {
                    return Err(PresenterError::Factory(err));
                }
                log::debug!("presenter construction failed, deferring error until mount completes: {err:#}");
                let boundary = current_boundary();
                on_mount_complete(move || boundary(err));
                return Ok(PresenterOutput::of(Presenter::fallback()));
            }
        };

        let view_model = validate_presenter_config(&config)?;

        // Consumed-once: the pending override is taken up front so a
        // failing override never leaks into the following invocation.
        let pending = self.shared.pending_override.borrow_mut().take();
        if let Some(overridden) = &pending {
            validate_view_model_override(overridden, &view_model.value())?;
        }

        let PresenterConfig {
            state,
            on_created,
            on_destroy,
            view_model: _,
        } = config;

        // Teardown: run on_destroy, then release the cache slot only if
        // this resolution is still the cached one.
        let this_instance: Rc<RefCell<Option<Presenter<P>>>> = Rc::new(RefCell::new(None));
        {
            let shared = self.shared.clone();
            let this_instance = this_instance.clone();
            try_on_scope_dispose(move || {
                if let Some(f) = on_destroy {
                    f();
                }
                let still_ours = match (&*shared.cached.borrow(), &*this_instance.borrow()) {
                    (Some(cached), Some(ours)) => cached.ptr_eq(ours),
                    _ => false,
                };
                if still_ours {
                    shared.cached.borrow_mut().take();
                }
            });
        }

        if let Some(f) = on_created {
            f();
        }

        let view_model = match pending {
            Some(overridden) => {
                let base = view_model;
                Derived::new(move || overridden(&base.value()))
            }
            None => view_model,
        };

        let presenter = Presenter::new(state, view_model);
        *this_instance.borrow_mut() = Some(presenter.clone());
        *self.shared.cached.borrow_mut() = Some(presenter.clone());

        Ok(PresenterOutput::of(presenter))
    }

    /// One-time retrieval of the most recently resolved instance; consumes
    /// the slot, so spy right after the invocation you want to inspect.
    ///
    /// ```rust
    /// use veneer_core::Derived;
    /// use veneer_presenter::{PresenterConfig, ViewModel, presenter_factory};
    ///
    /// let use_presenter = presenter_factory(|_: (), _: ()| {
    ///     Ok(PresenterConfig::new((), Derived::new(ViewModel::new)))
    /// });
    ///
    /// let resolved = use_presenter.call((), ()).unwrap();
    /// let spied = use_presenter.spy().unwrap();
    /// assert!(spied.presenter.ptr_eq(&resolved.presenter));
    /// assert!(use_presenter.spy().is_err());
    /// ```
    pub fn spy(&self) -> Result<PresenterOutput<P>, PresenterError> {
        let cached = self.shared.cached.borrow_mut().take();
        let presenter = cached.ok_or(PresenterError::NoPresenterInstance)?;
        Ok(PresenterOutput::of(presenter))
    }

    /// Clears the cached instance. Never fails, empty slot included.
    pub fn reset_spy(&self) {
        self.shared.cached.borrow_mut().take();
    }

    /// Registers a view-model override for exactly the next invocation,
    /// replacing any previous pending one. The override must keep the
    /// field set identical to the real view model's.
    ///
    /// ```rust
    /// use veneer_core::Derived;
    /// use veneer_presenter::{PresenterConfig, ViewModel, presenter_factory};
    ///
    /// let use_presenter = presenter_factory(|_: (), _: ()| {
    ///     Ok(PresenterConfig::new(
    ///         (),
    ///         Derived::new(|| ViewModel::new().with("loading", false)),
    ///     ))
    /// });
    ///
    /// use_presenter.mock_view_model(|_vm| ViewModel::new().with("loading", true));
    ///
    /// let mocked = use_presenter.call((), ()).unwrap();
    /// assert_eq!(mocked.view_model.value().get::<bool>("loading"), Some(&true));
    ///
    /// let real = use_presenter.call((), ()).unwrap();
    /// assert_eq!(real.view_model.value().get::<bool>("loading"), Some(&false));
    /// ```
    pub fn mock_view_model(&self, f: impl Fn(&ViewModel) -> ViewModel + 'static) {
        *self.shared.pending_override.borrow_mut() = Some(Rc::new(f));
    }
}
