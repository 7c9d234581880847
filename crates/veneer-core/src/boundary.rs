use std::cell::RefCell;
use std::rc::Rc;

pub type ErrorHandler = Rc<dyn Fn(anyhow::Error)>;

thread_local! {
    static BOUNDARIES: RefCell<Vec<ErrorHandler>> = const { RefCell::new(Vec::new()) };
}

/// Runs `body` with `handler` installed as the innermost error boundary.
/// Errors reported while no boundary is installed go to `log::error!`.
pub fn with_error_boundary<R>(
    handler: impl Fn(anyhow::Error) + 'static,
    body: impl FnOnce() -> R,
) -> R {
    // pop on unwind too
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            BOUNDARIES.with(|b| {
                b.borrow_mut().pop();
            });
        }
    }
    BOUNDARIES.with(|b| b.borrow_mut().push(Rc::new(handler)));
    let _guard = Guard;
    body()
}

/// The innermost installed boundary, captured as a handle that stays valid
/// after the boundary's frame has been left.
pub fn current_boundary() -> ErrorHandler {
    BOUNDARIES.with(|b| {
        b.borrow()
            .last()
            .cloned()
            .unwrap_or_else(|| Rc::new(|err: anyhow::Error| log::error!("unhandled error: {err:#}")))
    })
}
