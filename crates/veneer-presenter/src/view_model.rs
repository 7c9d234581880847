use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use veneer_core::{Derived, Signal};

/// A display-ready record: field name to value, with typed reads.
///
/// Reading a field that does not exist (or with the wrong type) resolves
/// to `None` rather than failing, so a view rendering against an empty
/// fallback view model degrades to blanks instead of crashing.
///
/// Ordered (BTreeMap) so key listings in validation errors are stable.
#[derive(Clone, Default)]
pub struct ViewModel {
    fields: BTreeMap<String, Rc<dyn Any>>,
}

impl ViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Any) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Any) {
        self.fields.insert(key.into(), Rc::new(value));
    }

    pub fn get<T: 'static>(&self, key: &str) -> Option<&T> {
        self.fields.get(key)?.downcast_ref()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Debug for ViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.fields.keys()).finish()
    }
}

/// What a presenter declared as its view model. Only the derived form is
/// structurally valid; the mutable and plain forms exist so a presenter
/// that declares the wrong thing fails validation with a precise message
/// instead of compiling into silently non-reactive behavior.
pub enum ViewModelSource {
    Derived(Derived<ViewModel>),
    Mutable(Signal<ViewModel>),
    Plain(ViewModel),
}

impl ViewModelSource {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            ViewModelSource::Derived(_) => "derived value",
            ViewModelSource::Mutable(_) => "mutable signal",
            ViewModelSource::Plain(_) => "plain value",
        }
    }
}

impl From<Derived<ViewModel>> for ViewModelSource {
    fn from(d: Derived<ViewModel>) -> Self {
        ViewModelSource::Derived(d)
    }
}

impl From<Signal<ViewModel>> for ViewModelSource {
    fn from(s: Signal<ViewModel>) -> Self {
        ViewModelSource::Mutable(s)
    }
}

impl From<ViewModel> for ViewModelSource {
    fn from(vm: ViewModel) -> Self {
        ViewModelSource::Plain(vm)
    }
}
