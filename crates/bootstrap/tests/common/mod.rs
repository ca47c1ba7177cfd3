//! Scripted transports shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use bootstrap::transport::{BindReport, TransportEnumerator, TransportHandle, TransportKind, TransportSet};
use bootstrap::{SessionToken, TransportBindError, TransportError};
use parking_lot::Mutex;

/// Everything the OS would have seen: one line per close.
#[derive(Clone, Default)]
pub struct OsLog(Arc<Mutex<Vec<String>>>);

impl OsLog {
    pub fn closes(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    pub fn close_count(&self) -> usize {
        self.0.lock().len()
    }

    fn record(&self, id: &str) {
        self.0.lock().push(id.to_owned());
    }
}

impl std::fmt::Debug for OsLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("OsLog").field(&self.close_count()).finish()
    }
}

#[derive(Debug)]
pub struct FakeHandle {
    id: String,
    local: bool,
    open: bool,
    fail_close: bool,
    log: OsLog,
}

impl FakeHandle {
    pub fn new(id: &str, local: bool, log: &OsLog) -> Self {
        Self {
            id: id.to_owned(),
            local,
            open: true,
            fail_close: false,
            log: log.clone(),
        }
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
        self.open.then_some(3)
    }

    fn network_id(&self) -> Option<String> {
        self.open.then(|| self.id.clone())
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.log.record(&self.id);
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

/// One scripted `bind_all` result.
#[derive(Clone, Debug)]
pub enum Attempt {
    /// Bind these `(network_id, is_local)` listeners.
    Bind(Vec<(&'static str, bool)>),
    /// Bind these, and report the given kinds as failed.
    Partial(Vec<(&'static str, bool)>, Vec<TransportKind>),
    /// Same as above, but the handle at this index fails to close.
    FailingClose(Vec<(&'static str, bool)>, usize),
    /// The enumerator itself errors.
    Error,
    /// Block for the duration, then bind these.
    Stall(Duration, Vec<(&'static str, bool)>),
}

/// Enumerator that replays a script and counts its invocations.
pub struct ScriptedEnumerator {
    script: VecDeque<Attempt>,
    pub calls: usize,
    pub tokens: Vec<String>,
    log: OsLog,
}

impl ScriptedEnumerator {
    pub fn new(script: Vec<Attempt>, log: &OsLog) -> Self {
        Self {
            script: script.into(),
            calls: 0,
            tokens: Vec::new(),
            log: log.clone(),
        }
    }

    /// Never binds anything.
    pub fn empty(log: &OsLog) -> Self {
        Self::new(Vec::new(), log)
    }

    fn handles(&self, ids: Vec<(&'static str, bool)>) -> Vec<FakeHandle> {
        ids.into_iter()
            .map(|(id, local)| FakeHandle::new(id, local, &self.log))
            .collect()
    }
}

impl TransportEnumerator for ScriptedEnumerator {
    type Handle = FakeHandle;

    fn bind_all(
        &mut self,
        token: &SessionToken,
        _transports: &TransportSet,
    ) -> Result<BindReport<FakeHandle>, TransportError> {
        self.calls += 1;
        self.tokens.push(token.to_string());

        match self.script.pop_front() {
            None => Ok(BindReport::empty()),
            Some(Attempt::Bind(ids)) => Ok(BindReport::new(self.handles(ids), Vec::new())),
            Some(Attempt::Partial(ids, failed)) => {
                let failures = failed
                    .into_iter()
                    .map(|kind| TransportBindError::new(kind, "address in use"))
                    .collect();
                Ok(BindReport::new(self.handles(ids), failures))
            }
            Some(Attempt::FailingClose(ids, index)) => {
                let mut handles = self.handles(ids);
                handles[index].fail_close = true;
                Ok(BindReport::new(handles, Vec::new()))
            }
            Some(Attempt::Error) => Err(TransportError::Unavailable("no transports".into())),
            Some(Attempt::Stall(duration, ids)) => {
                thread::sleep(duration);
                Ok(BindReport::new(self.handles(ids), Vec::new()))
            }
        }
    }
}

/// Route `tracing` output through the test harness.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}
