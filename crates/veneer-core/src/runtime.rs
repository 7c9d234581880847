use std::cell::RefCell;

use crate::scope::Scope;

thread_local! {
    static MOUNTS: RefCell<Vec<MountFrame>> = const { RefCell::new(Vec::new()) };
}

#[derive(Default)]
struct MountFrame {
    after_mount: Vec<Box<dyn FnOnce()>>,
}

/// One mounted composition: a scope plus the bracket that runs deferred
/// post-mount callbacks once the body has finished composing.
///
/// ```rust
/// use veneer_core::{Composition, try_on_scope_dispose};
///
/// let (comp, _) = Composition::mount(|| {
///     try_on_scope_dispose(|| log::debug!("torn down"));
/// });
/// comp.unmount();
/// ```
pub struct Composition {
    scope: Scope,
}

impl Composition {
    /// Runs `body` inside a fresh scope with a mount in flight. Callbacks
    /// queued through `on_mount_complete` during `body` run after it
    /// returns, before this call returns.
    pub fn mount<R>(body: impl FnOnce() -> R) -> (Self, R) {
        MOUNTS.with(|m| m.borrow_mut().push(MountFrame::default()));
        let scope = Scope::new();
        let out = scope.run(body);
        let frame = MOUNTS.with(|m| m.borrow_mut().pop()).unwrap_or_default();
        for f in frame.after_mount {
            f();
        }
        (Self { scope }, out)
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Disposes the composition's scope, running every registered disposer.
    pub fn unmount(self) {
        self.scope.dispose();
    }
}

pub fn mount_in_progress() -> bool {
    MOUNTS.with(|m| !m.borrow().is_empty())
}

/// Defers `f` until the innermost in-flight mount finishes composing.
/// With no mount in flight, `f` runs immediately.
pub fn on_mount_complete(f: impl FnOnce() + 'static) {
    if !mount_in_progress() {
        f();
        return;
    }
    MOUNTS.with(|m| {
        if let Some(frame) = m.borrow_mut().last_mut() {
            frame.after_mount.push(Box::new(f));
        }
    });
}
