//! Network id composition.
//!
//! Peers try the advertised ids in order, so local transports come first:
//! every open local entry in table order, then every other open entry in
//! table order. Ids are joined with `,` and never repeated.

use std::collections::HashSet;

use crate::registry::ListenerTable;
use crate::transport::TransportHandle;

/// Separator between ids in a composed list.
pub const SEPARATOR: &str = ",";

/// Build the exportable, local-first id list of `table`.
///
/// An empty table yields an empty string.
pub fn compose_network_ids<H: TransportHandle>(table: &ListenerTable<H>) -> String {
    let (local, other): (Vec<_>, Vec<_>) = table
        .iter()
        .filter(|entry| entry.is_open())
        .partition(|entry| entry.is_local());

    let mut seen = HashSet::new();
    let ids: Vec<&str> = local
        .into_iter()
        .chain(other)
        .map(|entry| entry.network_id())
        .filter(|id| seen.insert(*id))
        .collect();
    ids.join(SEPARATOR)
}

/// Split a composed list back into ids, in advertised order.
///
/// Ids come back byte for byte; only empty segments are dropped.
pub fn split_network_ids(list: &str) -> impl Iterator<Item = &str> {
    list.split(SEPARATOR).filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{close_log, FakeHandle};

    fn table(ids: &[(&str, bool)]) -> ListenerTable<FakeHandle> {
        let log = close_log();
        let mut table = ListenerTable::new();
        for (id, local) in ids {
            table.adopt(FakeHandle::new(id, *local, &log)).unwrap();
        }
        table
    }

    #[test]
    fn test_local_entries_first() {
        let table = table(&[("A", true), ("B", false), ("C", true)]);
        assert_eq!(compose_network_ids(&table), "A,C,B");
    }

    #[test]
    fn test_empty_table() {
        let table = table(&[]);
        assert_eq!(compose_network_ids(&table), "");
    }

    #[test]
    fn test_compose_is_stable() {
        let table = table(&[("tcp/h:1", false), ("local/h:/a", true)]);
        assert_eq!(compose_network_ids(&table), compose_network_ids(&table));
        assert_eq!(table.network_ids(), "local/h:/a,tcp/h:1");
    }

    #[test]
    fn test_duplicate_ids_are_listed_once() {
        let table = table(&[("X", false), ("Y", true), ("X", false)]);
        assert_eq!(compose_network_ids(&table), "Y,X");
    }

    #[test]
    fn test_closed_entries_are_skipped() {
        let mut table = table(&[("A", true), ("B", false)]);
        table.get_mut(0).unwrap().close().unwrap();
        assert_eq!(compose_network_ids(&table), "B");
    }

    #[test]
    fn test_split_skips_empty_segments() {
        let ids: Vec<&str> = split_network_ids("a,b,,c,").collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(split_network_ids("").count(), 0);
    }

    #[test]
    fn test_split_keeps_whitespace_inside_ids() {
        let table = table(&[("tcp/h:1 ", false), (" local/h:/tmp/a b", true)]);
        let composed = compose_network_ids(&table);
        let ids: Vec<&str> = split_network_ids(&composed).collect();
        assert_eq!(ids, [" local/h:/tmp/a b", "tcp/h:1 "]);
    }
}
