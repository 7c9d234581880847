pub use crate::boundary::{ErrorHandler, current_boundary, with_error_boundary};
pub use crate::derived::Derived;
pub use crate::runtime::{Composition, mount_in_progress, on_mount_complete};
pub use crate::scope::{Scope, current_scope, try_on_scope_dispose};
pub use crate::signal::{Signal, signal};
