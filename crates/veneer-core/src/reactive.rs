use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

pub type SourceId = usize;
pub type ObserverId = usize;

thread_local! {
    static CURRENT_OBSERVER: RefCell<Option<ObserverId>> = const { RefCell::new(None) };
    static GRAPH: RefCell<DepGraph> = RefCell::new(DepGraph::default());
}

#[derive(Default)]
struct DepGraph {
    next_source: SourceId,
    next_observer: ObserverId,
    // source_id -> observers that depend on it
    edges: HashMap<SourceId, HashSet<ObserverId>>,
    // observer_id -> sources it depends on
    back: HashMap<ObserverId, HashSet<SourceId>>,
    // notification closures
    observers: HashMap<ObserverId, Rc<dyn Fn()>>,
    running: HashSet<ObserverId>,
}

impl DepGraph {
    fn clear_edges_for(&mut self, obs: ObserverId) {
        if let Some(sources) = self.back.remove(&obs) {
            for s in sources {
                if let Some(set) = self.edges.get_mut(&s) {
                    set.remove(&obs);
                }
            }
        }
    }

    fn remove_observer(&mut self, obs: ObserverId) {
        self.observers.remove(&obs);
        self.clear_edges_for(obs);
        self.running.remove(&obs);
    }
}

/// Allocates an id for a new reactive source (signal or derived output).
pub fn new_source() -> SourceId {
    GRAPH.with(|g| {
        let mut g = g.borrow_mut();
        let id = g.next_source;
        g.next_source += 1;
        id
    })
}

/// Records a read of `source` against the currently tracking observer, if any.
pub fn register_read(source: SourceId) {
    CURRENT_OBSERVER.with(|co| {
        if let Some(obs) = *co.borrow() {
            GRAPH.with(|g| {
                let mut g = g.borrow_mut();
                g.edges.entry(source).or_default().insert(obs);
                g.back.entry(obs).or_default().insert(source);
            });
        }
    });
}

/// Notifies every observer of `source`. Each observer's edges are cleared
/// before it runs; a lazy observer re-establishes them on its next tracked
/// recompute, so a source that changes twice before a read only notifies once.
pub fn notify_changed(source: SourceId) {
    GRAPH.with(|gcell| {
        let mut g = gcell.borrow_mut();
        let mut queue: VecDeque<ObserverId> = g
            .edges
            .get(&source)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .collect();
        while let Some(obs) = queue.pop_front() {
            if g.running.contains(&obs) {
                continue;
            }
            g.running.insert(obs);
            g.clear_edges_for(obs);
            let f = g.observers.get(&obs).cloned();
            drop(g);
            if let Some(f) = f {
                // may re-enter notify_changed for downstream sources
                f();
            }
            g = gcell.borrow_mut();
            g.running.remove(&obs);
        }
    });
}

pub fn new_observer(f: impl Fn() + 'static) -> ObserverId {
    GRAPH.with(|g| {
        let mut g = g.borrow_mut();
        let id = g.next_observer;
        g.next_observer += 1;
        g.observers.insert(id, Rc::new(f));
        id
    })
}

/// Removes an observer and all of its dependency edges.
pub fn remove_observer(obs: ObserverId) {
    GRAPH.with(|g| g.borrow_mut().remove_observer(obs));
}

/// Runs `f` with `obs` as the tracking observer: previous edges are dropped
/// and every source read inside `f` becomes a new dependency of `obs`.
pub fn tracked<R>(obs: ObserverId, f: impl FnOnce() -> R) -> R {
    GRAPH.with(|g| g.borrow_mut().clear_edges_for(obs));
    CURRENT_OBSERVER.with(|co| {
        let prev = *co.borrow();
        *co.borrow_mut() = Some(obs);
        let out = f();
        *co.borrow_mut() = prev;
        out
    })
}
