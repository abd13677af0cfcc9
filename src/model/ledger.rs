use indexmap::IndexSet;

use crate::model::structures::event_key::EventKey;

/// Ordered record of committed contest keys. A key appears at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayLedger {
    keys: IndexSet<EventKey>
}

impl ReplayLedger {
    pub fn new() -> ReplayLedger {
        ReplayLedger { keys: IndexSet::new() }
    }

    pub fn contains(&self, key: &EventKey) -> bool {
        self.keys.contains(key)
    }

    /// Appends `key`. Returns false, leaving the ledger unchanged, if it was already recorded.
    pub fn record(&mut self, key: EventKey) -> bool {
        self.keys.insert(key)
    }

    /// Removes `key` while preserving the order of the remaining keys.
    pub fn remove(&mut self, key: &EventKey) -> bool {
        self.keys.shift_remove(key)
    }

    /// Position of `key` in commit order.
    pub fn position(&self, key: &EventKey) -> Option<usize> {
        self.keys.get_index_of(key)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &EventKey> + ExactSizeIterator {
        self.keys.iter()
    }

    pub fn last(&self) -> Option<&EventKey> {
        self.keys.last()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<EventKey> for ReplayLedger {
    fn from_iter<T: IntoIterator<Item = EventKey>>(iter: T) -> Self {
        ReplayLedger {
            keys: iter.into_iter().collect()
        }
    }
}
