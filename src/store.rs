use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::DashMap;

/// Concurrent id-keyed collection that still remembers listing order.
/// Entries pushed to the front sort before every existing entry.
pub struct Listing<T> {
    entries: DashMap<String, (i64, T)>,
    next_back: AtomicI64,
    next_front: AtomicI64,
}

impl<T: Clone> Default for Listing<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Listing<T> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_back: AtomicI64::new(0),
            next_front: AtomicI64::new(-1),
        }
    }

    /// Returns false, leaving the listing untouched, if `id` is taken.
    pub fn push_back(&self, id: String, value: T) -> bool {
        self.insert_with(id, value, &self.next_back, 1)
    }

    pub fn push_front(&self, id: String, value: T) -> bool {
        self.insert_with(id, value, &self.next_front, -1)
    }

    fn insert_with(&self, id: String, value: T, counter: &AtomicI64, step: i64) -> bool {
        match self.entries.entry(id) {
            dashmap::mapref::entry::Entry::Occupied(_) => false,
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                let seq = counter.fetch_add(step, Ordering::Relaxed);
                slot.insert((seq, value));
                true
            }
        }
    }

    /// Atomic: of two concurrent removals of the same id, one gets the value.
    pub fn remove(&self, id: &str) -> Option<T> {
        self.entries.remove(id).map(|(_, (_, value))| value)
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.entries.get(id).map(|entry| entry.value().1.clone())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Values in listing order.
    pub fn snapshot(&self) -> Vec<T> {
        let mut ordered: Vec<(i64, T)> = self
            .entries
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        ordered.sort_by_key(|(seq, _)| *seq);
        ordered.into_iter().map(|(_, value)| value).collect()
    }
}
