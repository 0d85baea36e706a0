use crate::element::{Face, HalfEdge, Vertex};

/**
 * Token identifying one registered callback. Returned by the `on_*` methods
 * of the store and accepted by `unsubscribe`. Tokens are never reused within
 * the lifetime of a map.
 */
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Subscription(u64);

pub(crate) struct SubscriberSet<T> {
    entries: Vec<(Subscription, Box<dyn FnMut(&T)>)>,
}

impl<T> Default for SubscriberSet<T> {
    fn default() -> Self {
        SubscriberSet {
            entries: Vec::new(),
        }
    }
}

impl<T> SubscriberSet<T> {
    pub fn subscribe(&mut self, token: Subscription, callback: Box<dyn FnMut(&T)>) {
        self.entries.push((token, callback));
    }

    pub fn unsubscribe(&mut self, token: Subscription) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != token);
        self.entries.len() != before
    }

    /// Run every callback, in registration order, on the given entity.
    pub fn emit(&mut self, entity: &T) {
        for (_, callback) in self.entries.iter_mut() {
            callback(entity);
        }
    }
}

#[derive(Default)]
pub(crate) struct EventHub {
    next_token: u64,
    pub vertex_added: SubscriberSet<Vertex>,
    pub vertex_removed: SubscriberSet<Vertex>,
    pub edge_added: SubscriberSet<HalfEdge>,
    pub edge_removed: SubscriberSet<HalfEdge>,
    pub face_added: SubscriberSet<Face>,
    pub face_removed: SubscriberSet<Face>,
}

impl EventHub {
    pub fn issue(&mut self) -> Subscription {
        self.next_token += 1;
        Subscription(self.next_token)
    }

    /// A token belongs to exactly one set, so the first hit wins.
    pub fn unsubscribe(&mut self, token: Subscription) -> bool {
        self.vertex_added.unsubscribe(token)
            || self.vertex_removed.unsubscribe(token)
            || self.edge_added.unsubscribe(token)
            || self.edge_removed.unsubscribe(token)
            || self.face_added.unsubscribe(token)
            || self.face_removed.unsubscribe(token)
    }
}
