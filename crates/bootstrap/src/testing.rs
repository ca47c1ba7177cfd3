//! In-memory transports for unit tests.

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::TransportError;
use crate::transport::{TransportHandle, TransportKind};

/// Shared log of close calls, one network id per close.
pub(crate) type CloseLog = Arc<Mutex<Vec<String>>>;

#[derive(Debug)]
pub(crate) struct FakeHandle {
    pub id: String,
    pub local: bool,
    pub open: bool,
    pub fail_close: bool,
    pub log: CloseLog,
}

impl FakeHandle {
    pub fn new(id: &str, local: bool, log: &CloseLog) -> Self {
        Self {
            id: id.to_owned(),
            local,
            open: true,
            fail_close: false,
            log: Arc::clone(log),
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail_close = true;
        self
    }
}

impl TransportHandle for FakeHandle {
    fn kind(&self) -> TransportKind {
        if self.local {
            TransportKind::Local
        } else {
            TransportKind::Tcp
        }
    }

    fn connection_number(&self) -> Option<i32> {
        self.open.then_some(7)
    }

    fn network_id(&self) -> Option<String> {
        self.open.then(|| self.id.clone())
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.log.lock().push(self.id.clone());
        self.open = false;
        if self.fail_close {
            return Err(TransportError::Io {
                kind: self.kind(),
                source: io::Error::new(io::ErrorKind::Other, "close failed"),
            });
        }
        Ok(())
    }
}

pub(crate) fn close_log() -> CloseLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub(crate) fn closed(log: &CloseLog) -> Vec<String> {
    log.lock().clone()
}
