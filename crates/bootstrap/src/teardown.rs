//! Teardown of listener tables.

use tracing::{debug, warn};

use crate::error::TeardownWarning;
use crate::registry::ListenerTable;
use crate::transport::TransportHandle;

/// Outcome of closing a table.
#[derive(Debug, Default)]
pub struct TeardownReport {
    /// Handles closed without error during this call.
    pub closed: usize,
    /// Close failures. They never stop the remaining closes.
    pub warnings: Vec<TeardownWarning>,
}

impl TeardownReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Close every listener in `table` and empty it.
///
/// Safe to call repeatedly: entries already closed are skipped, and a
/// second call on the same table performs no OS-level operation.
pub fn close_all<H: TransportHandle>(table: &mut ListenerTable<H>) -> TeardownReport {
    let mut report = TeardownReport::default();

    for entry in table.iter_mut() {
        let network_id = entry.network_id().to_owned();
        match entry.close() {
            Ok(true) => report.closed += 1,
            Ok(false) => {}
            Err(source) => {
                warn!(%network_id, error = %source, "failed to close listener");
                report.warnings.push(TeardownWarning { network_id, source });
            }
        }
    }
    table.clear();

    debug!(
        closed = report.closed,
        warnings = report.warnings.len(),
        "listener table torn down"
    );
    report
}
