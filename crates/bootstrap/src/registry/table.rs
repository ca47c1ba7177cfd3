//! Ordered table of listener entries.

use std::collections::TryReserveError;
use std::slice;

use crate::compose::compose_network_ids;
use crate::registry::entry::ListenerEntry;
use crate::transport::TransportHandle;

/// Listener entries in bind order.
///
/// Entries are appended as handles are adopted and removed only by
/// teardown (see [`crate::teardown::close_all`]).
#[derive(Debug)]
pub struct ListenerTable<H: TransportHandle> {
    entries: Vec<ListenerEntry<H>>,
}

impl<H: TransportHandle> ListenerTable<H> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adopt a bound handle as a new entry at the end of the table.
    ///
    /// Hands the handle back, unclosed, if it has no usable network id.
    pub fn adopt(&mut self, handle: H) -> Result<&mut ListenerEntry<H>, H> {
        let entry = ListenerEntry::from_bound(handle)?;
        self.entries.push(entry);
        let last = self.entries.len() - 1;
        Ok(&mut self.entries[last])
    }

    /// Reserve room for `additional` entries without aborting on failure.
    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.entries.try_reserve(additional)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ListenerEntry<H>> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ListenerEntry<H>> {
        self.entries.get_mut(index)
    }

    /// Find the entry advertising `network_id`.
    pub fn find(&self, network_id: &str) -> Option<&ListenerEntry<H>> {
        self.entries
            .iter()
            .find(|entry| entry.is_open() && entry.network_id() == network_id)
    }

    pub fn find_mut(&mut self, network_id: &str) -> Option<&mut ListenerEntry<H>> {
        self.entries
            .iter_mut()
            .find(|entry| entry.is_open() && entry.network_id() == network_id)
    }

    pub fn iter(&self) -> slice::Iter<'_, ListenerEntry<H>> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, ListenerEntry<H>> {
        self.entries.iter_mut()
    }

    /// Local-first, comma-joined network ids of the open entries.
    pub fn network_ids(&self) -> String {
        compose_network_ids(self)
    }

    /// Drop every entry. Entries still open are closed by their destructor.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<H: TransportHandle> Default for ListenerTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, H: TransportHandle> IntoIterator for &'a ListenerTable<H> {
    type Item = &'a ListenerEntry<H>;
    type IntoIter = slice::Iter<'a, ListenerEntry<H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, H: TransportHandle> IntoIterator for &'a mut ListenerTable<H> {
    type Item = &'a mut ListenerEntry<H>;
    type IntoIter = slice::IterMut<'a, ListenerEntry<H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
