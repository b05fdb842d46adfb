//! Per-object event subscriptions.
//!
//! Objects do not own callbacks. The session keeps a registry of which
//! reactions each object subscribes to, keyed by `ObjectId`, and drops an
//! object's entries when it is removed from the scene.

use bd_core::id::ObjectId;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Something that happened to a single object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectEvent {
    /// The object is being dragged (fires on every pointer move).
    Moving,
    /// The object became part of the active selection.
    Selected,
    /// The object left the active selection.
    Deselected,
    /// In-place label editing started.
    EditingEntered,
    /// In-place label editing ended.
    EditingExited,
}

/// A reaction an object can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    /// Recompute block outlines while a block is dragged.
    ContainmentHighlight,
    /// Lock movement while the label is being edited.
    EditLock,
    /// Show a dashed stroke while a line is selected.
    DashOnSelect,
}

impl Handler {
    pub fn listens_to(&self, event: ObjectEvent) -> bool {
        match self {
            Self::ContainmentHighlight => event == ObjectEvent::Moving,
            Self::EditLock => matches!(
                event,
                ObjectEvent::EditingEntered | ObjectEvent::EditingExited
            ),
            Self::DashOnSelect => {
                matches!(event, ObjectEvent::Selected | ObjectEvent::Deselected)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Subscriptions {
    handlers: HashMap<ObjectId, SmallVec<[Handler; 2]>>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `id` to `handler`. Subscribing twice is a no-op.
    pub fn subscribe(&mut self, id: ObjectId, handler: Handler) {
        let entry = self.handlers.entry(id).or_default();
        if !entry.contains(&handler) {
            entry.push(handler);
        }
    }

    /// Drop every subscription of `id`. Returns how many were removed.
    pub fn unsubscribe_all(&mut self, id: ObjectId) -> usize {
        self.handlers.remove(&id).map_or(0, |h| h.len())
    }

    /// Handlers of `id` that react to `event`.
    pub fn handlers_for(&self, id: ObjectId, event: ObjectEvent) -> SmallVec<[Handler; 2]> {
        self.handlers
            .get(&id)
            .map(|hs| hs.iter().copied().filter(|h| h.listens_to(event)).collect())
            .unwrap_or_default()
    }

    pub fn is_subscribed(&self, id: ObjectId, handler: Handler) -> bool {
        self.handlers
            .get(&id)
            .is_some_and(|hs| hs.contains(&handler))
    }

    /// Number of objects with at least one subscription.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
