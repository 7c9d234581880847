//! # Signals, derived values, and lifecycle scopes
//!
//! Veneer's reactive core is deliberately small. There are four pieces:
//!
//! - `Signal<T>` — observable, reactive value.
//! - `Derived<T>` — read-only, memoized computation over signals.
//! - `Scope` / `Composition` — lifecycle brackets with cleanup.
//! - error boundaries — where deferred construction errors land.
//!
//! ## Signals
//!
//! `Signal<T>` is a cloneable handle to a piece of state:
//!
//! ```rust
//! use veneer_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! Reads participate in a dependency graph: when you call `get()` inside a
//! derived computation, future writes invalidate that computation.
//!
//! ## Derived values
//!
//! `Derived::new` builds a memoized, push-invalidated computation. The
//! cache drops as soon as a dependency changes; the value is recomputed on
//! the next read:
//!
//! ```rust
//! use veneer_core::*;
//!
//! let loading = signal(true);
//! let headline = Derived::new({
//!     let loading = loading.clone();
//!     move || if loading.get() { "Loading..." } else { "Ready" }
//! });
//!
//! assert_eq!(headline.value(), "Loading...");
//! loading.set(false);
//! assert_eq!(headline.value(), "Ready");
//! ```
//!
//! ## Scopes and compositions
//!
//! A `Scope` collects cleanup callbacks; `Composition::mount` runs a body
//! inside a fresh scope and then flushes callbacks registered with
//! `on_mount_complete`. `try_on_scope_dispose` registers cleanup against
//! the current scope, or does nothing outside one:
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use veneer_core::*;
//!
//! let torn_down = Rc::new(Cell::new(false));
//! let (comp, _) = Composition::mount({
//!     let torn_down = torn_down.clone();
//!     move || {
//!         try_on_scope_dispose(move || torn_down.set(true));
//!     }
//! });
//!
//! assert!(!torn_down.get());
//! comp.unmount();
//! assert!(torn_down.get());
//! ```
//!
//! ## Error boundaries
//!
//! `with_error_boundary` installs a handler for errors that are reported
//! after the fact (e.g. a presenter whose construction failed mid-mount).
//! Without a boundary, reports go to `log::error!`.

pub mod boundary;
pub mod derived;
pub mod prelude;
pub mod reactive;
pub mod runtime;
pub mod scope;
pub mod signal;

pub use boundary::*;
pub use derived::*;
pub use runtime::*;
pub use scope::*;
pub use signal::*;
