//! # Presenter factory
//!
//! Separates presenter logic (state, derived view model, lifecycle hooks)
//! from the view that renders it. A presenter definition is a factory
//! callback producing a [`PresenterConfig`]; wrapping it with
//! [`presenter_factory`] yields a hook that resolves an instance per
//! invocation and carries the test capabilities on the side:
//!
//! - `spy()` — consume-once retrieval of the last resolved instance,
//! - `reset_spy()` — drop it,
//! - `mock_view_model(f)` — reshape the next instance's view model.
//!
//! ```rust
//! use veneer_core::{Derived, signal};
//! use veneer_presenter::{PresenterConfig, ViewModel, presenter_factory};
//!
//! let use_store = presenter_factory(|_: (), _: ()| {
//!     let loading = signal(true);
//!
//!     let view_model = Derived::new({
//!         let loading = loading.clone();
//!         move || {
//!             ViewModel::new()
//!                 .with("headline", if loading.get() { "Loading..." } else { "Ready" })
//!                 .with("show_skeleton", loading.get())
//!         }
//!     });
//!
//!     Ok(PresenterConfig::new(loading, view_model))
//! });
//!
//! let out = use_store.call((), ()).unwrap();
//! assert_eq!(out.view_model.value().get::<&str>("headline"), Some(&"Loading..."));
//!
//! // the state payload is the seam views and tests drive the presenter through
//! out.presenter.state().unwrap().set(false);
//! assert_eq!(out.view_model.value().get::<&str>("headline"), Some(&"Ready"));
//! ```
//!
//! Construction faults are isolated: a factory callback that fails inside
//! a live scope does not take the render down. The caller gets a fallback
//! instance with an always-empty view model, and the original error is
//! delivered to the current error boundary once the mount completes.
//! Outside a scope the error propagates synchronously, value preserved.

pub mod error;
pub mod factory;
pub mod tests;
pub mod types;
pub mod validators;
pub mod view_model;

pub use error::PresenterError;
pub use factory::{PresenterHook, presenter_factory};
pub use types::{FactoryResult, Presenter, PresenterConfig, PresenterOutput, ViewModelOverride};
pub use view_model::{ViewModel, ViewModelSource};
