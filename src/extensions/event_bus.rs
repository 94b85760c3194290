use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{trace, warn};

type Listener = Rc<dyn Fn(&Value)>;

#[derive(Default)]
struct BusRegistry {
    next_id: u64,
    topics: IndexMap<String, Vec<(u64, Listener)>>,
}

impl BusRegistry {
    /// Detaches a listener; the caller drops it after releasing the borrow.
    fn remove(&mut self, topic: &str, id: u64) -> Option<Listener> {
        let listeners = self.topics.get_mut(topic)?;
        let position = listeners.iter().position(|(listener_id, _)| *listener_id == id)?;
        let (_, listener) = listeners.remove(position);
        if listeners.is_empty() {
            self.topics.shift_remove(topic);
        }
        Some(listener)
    }
}

thread_local! {
    static GLOBAL_BUS: EventBus = EventBus::new();
}

/// Topic-keyed publish/subscribe channel.
///
/// Cloning shares the same registry. `EventBus::global()` is the per-thread
/// process-wide instance that controls outside a chart publish into.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Rc<RefCell<BusRegistry>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.try_borrow();
        let mut debug = f.debug_struct("EventBus");
        if let Ok(registry) = registry {
            debug.field("topics", &registry.topics.keys().collect::<Vec<_>>());
        }
        debug.finish_non_exhaustive()
    }
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn global() -> Self {
        GLOBAL_BUS.with(Clone::clone)
    }

    /// Registers `handler` on `topic`.
    ///
    /// The listener lives until the returned guard is dropped or
    /// unsubscribed.
    pub fn on<F>(&self, topic: impl Into<String>, handler: F) -> Subscription
    where
        F: Fn(&Value) + 'static,
    {
        let topic = topic.into();
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry
            .topics
            .entry(topic.clone())
            .or_default()
            .push((id, Rc::new(handler)));
        trace!(topic = %topic, id, "listener subscribed");

        Subscription {
            registry: Rc::downgrade(&self.registry),
            topic,
            id,
            active: true,
        }
    }

    /// Invokes every listener of `topic` and returns how many ran.
    ///
    /// Listeners are snapshotted first, so handlers may subscribe or
    /// unsubscribe while the dispatch is running.
    pub fn dispatch(&self, topic: &str, payload: &Value) -> usize {
        let listeners: Vec<Listener> = match self.registry.try_borrow() {
            Ok(registry) => registry
                .topics
                .get(topic)
                .map(|listeners| listeners.iter().map(|(_, l)| Rc::clone(l)).collect())
                .unwrap_or_default(),
            Err(_) => {
                warn!(topic, "event bus busy; dispatch skipped");
                return 0;
            }
        };
        trace!(topic, listeners = listeners.len(), "dispatch");
        for listener in &listeners {
            listener(payload);
        }
        listeners.len()
    }

    #[must_use]
    pub fn listener_count(&self, topic: &str) -> usize {
        self.registry
            .borrow()
            .topics
            .get(topic)
            .map_or(0, Vec::len)
    }

    #[must_use]
    pub fn topic_count(&self) -> usize {
        self.registry.borrow().topics.len()
    }
}

/// Scoped listener registration; dropping it removes exactly that listener.
#[must_use = "dropping a subscription removes its listener"]
pub struct Subscription {
    registry: Weak<RefCell<BusRegistry>>,
    topic: String,
    id: u64,
    active: bool,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("topic", &self.topic)
            .field("id", &self.id)
            .field("active", &self.active)
            .finish()
    }
}

impl Subscription {
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active && self.registry.strong_count() > 0
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let removed = match registry.try_borrow_mut() {
            Ok(mut registry) => registry.remove(&self.topic, self.id),
            Err(_) => {
                warn!(topic = %self.topic, id = self.id, "event bus busy; listener leaked");
                None
            }
        };
        if removed.is_some() {
            trace!(topic = %self.topic, id = self.id, "listener removed");
        }
        drop(removed);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use serde_json::Value;

    use super::EventBus;

    #[test]
    fn drop_removes_only_own_listener() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let first_hits = Rc::clone(&hits);
        let second_hits = Rc::clone(&hits);

        let first = bus.on("c1-selectAll", move |_| first_hits.set(first_hits.get() + 1));
        let _second = bus.on("c1-selectAll", move |_| second_hits.set(second_hits.get() + 10));
        assert_eq!(bus.listener_count("c1-selectAll"), 2);

        drop(first);
        assert_eq!(bus.listener_count("c1-selectAll"), 1);
        assert_eq!(bus.dispatch("c1-selectAll", &Value::Null), 1);
        assert_eq!(hits.get(), 10);
    }

    #[test]
    fn handler_may_subscribe_during_dispatch() {
        let bus = EventBus::new();
        let inner_bus = bus.clone();
        let held = Rc::new(std::cell::RefCell::new(Vec::new()));
        let held_in_handler = Rc::clone(&held);
        let _outer = bus.on("topic", move |_| {
            held_in_handler
                .borrow_mut()
                .push(inner_bus.on("topic", |_| {}));
        });

        assert_eq!(bus.dispatch("topic", &Value::Null), 1);
        assert_eq!(bus.listener_count("topic"), 2);
    }

    #[test]
    fn unknown_topic_dispatches_nothing() {
        let bus = EventBus::new();
        assert_eq!(bus.dispatch("missing", &Value::Null), 0);
        assert_eq!(bus.topic_count(), 0);
    }
}
