//! Retrying listener registry.
//!
//! # Algorithm
//!
//! 1. For each attempt (at most `max_retries`), generate a fresh token and
//!    ask the enumerator to bind every selected transport under it
//! 2. An attempt that binds nothing, or whose enumerator fails outright,
//!    moves on to the next token
//! 3. Once anything binds, stop retrying, even if the bind was partial
//! 4. Adopt each bound handle; handles without a usable network id are
//!    closed and dropped on their own
//! 5. If no entry survives and no attempt is left, fail with
//!    [`ListenError::ExhaustedRetries`]
//!
//! Every handle acquired by a failed call is closed before it returns.

use std::fmt;
use std::iter;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::config::ListenerConfig;
use crate::error::{ListenError, Result, TransportError};
use crate::registry::entry::ListenerEntry;
use crate::registry::state::RegistryState;
use crate::registry::table::ListenerTable;
use crate::teardown::{close_all, TeardownReport};
use crate::token::{SessionToken, SessionTokenGenerator};
use crate::transport::{BindReport, TransportEnumerator, TransportHandle};

/// Creates listeners through a transport enumerator and owns the result.
pub struct ListenerRegistry<E: TransportEnumerator> {
    config: ListenerConfig,
    enumerator: E,
    tokens: Option<SessionTokenGenerator>,
    state: RegistryState,
    table: ListenerTable<E::Handle>,
    token: Option<SessionToken>,
}

impl<E: TransportEnumerator> ListenerRegistry<E> {
    /// Registry with the default configuration.
    pub fn new(enumerator: E) -> Self {
        Self::with_config(enumerator, ListenerConfig::default())
    }

    /// Registry with an explicit configuration.
    ///
    /// The configuration is validated when listeners are created.
    pub fn with_config(enumerator: E, config: ListenerConfig) -> Self {
        Self {
            config,
            enumerator,
            tokens: None,
            state: RegistryState::Unstarted,
            table: ListenerTable::new(),
            token: None,
        }
    }

    /// Use `generator` instead of one derived from `token_prefix`.
    pub fn with_token_generator(mut self, generator: SessionTokenGenerator) -> Self {
        self.tokens = Some(generator);
        self
    }

    pub fn config(&self) -> &ListenerConfig {
        &self.config
    }

    pub fn state(&self) -> RegistryState {
        self.state
    }

    pub fn enumerator(&self) -> &E {
        &self.enumerator
    }

    pub fn table(&self) -> &ListenerTable<E::Handle> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut ListenerTable<E::Handle> {
        &mut self.table
    }

    pub fn entry_mut(&mut self, index: usize) -> Option<&mut ListenerEntry<E::Handle>> {
        self.table.get_mut(index)
    }

    /// Token of the attempt that bound the current table.
    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    /// Local-first, comma-joined network ids of the current table.
    pub fn network_ids(&self) -> String {
        self.table.network_ids()
    }

    /// Bind listeners, retrying under fresh tokens up to `max_retries` times.
    pub fn create_listeners(&mut self) -> Result<&mut ListenerTable<E::Handle>> {
        self.create(None)
    }

    /// Like [`create_listeners`](Self::create_listeners), but gives up once
    /// `deadline` has passed. The deadline is only checked between attempts.
    pub fn create_listeners_until(
        &mut self,
        deadline: Instant,
    ) -> Result<&mut ListenerTable<E::Handle>> {
        self.create(Some(deadline))
    }

    /// Bind listeners under a caller-chosen name, in a single attempt.
    pub fn create_well_known_listeners(
        &mut self,
        name: &str,
    ) -> Result<&mut ListenerTable<E::Handle>> {
        self.begin()?;
        let token = SessionToken::new(name).map_err(invalid_input)?;
        self.run(iter::once(token), None)?;
        Ok(&mut self.table)
    }

    /// Close every listener and make the registry reusable.
    pub fn teardown(&mut self) -> TeardownReport {
        let report = close_all(&mut self.table);
        self.state = RegistryState::Unstarted;
        self.token = None;
        report
    }

    /// Give up the table without closing it.
    pub fn into_table(self) -> ListenerTable<E::Handle> {
        self.table
    }

    fn create(&mut self, deadline: Option<Instant>) -> Result<&mut ListenerTable<E::Handle>> {
        self.begin()?;
        let generator = match &self.tokens {
            Some(generator) => generator.clone(),
            None => SessionTokenGenerator::new(self.config.token_prefix.as_str())
                .map_err(invalid_input)?,
        };
        let attempts = generator.attempts().take(self.config.max_retries as usize);
        self.run(attempts, deadline)?;
        Ok(&mut self.table)
    }

    /// Input checks shared by every create call. Nothing changes on failure.
    fn begin(&self) -> Result<()> {
        if self.state != RegistryState::Unstarted {
            return Err(ListenError::RegistryInUse { state: self.state });
        }
        self.config.validate()
    }

    fn run(
        &mut self,
        tokens: impl Iterator<Item = SessionToken>,
        deadline: Option<Instant>,
    ) -> Result<()> {
        self.state = RegistryState::Attempting;
        let mut attempts = 0u32;

        for token in tokens {
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                self.state = RegistryState::Failed;
                warn!(attempts, "listener deadline expired");
                return Err(ListenError::DeadlineExceeded { attempts });
            }
            attempts += 1;
            debug!(attempt = attempts, %token, "binding transports");

            let report = match self.enumerator.bind_all(&token, &self.config.transport_set) {
                Ok(report) => report,
                Err(err) => {
                    warn!(attempt = attempts, %token, error = %err, "transport enumeration failed");
                    continue;
                }
            };

            if self.adopt_all(report)? > 0 {
                self.state = RegistryState::Bound;
                info!(
                    %token,
                    attempts,
                    listeners = self.table.len(),
                    network_ids = %self.table.network_ids(),
                    "listeners bound"
                );
                self.token = Some(token);
                return Ok(());
            }
            debug!(attempt = attempts, %token, "no usable listeners, retrying");
        }

        self.state = RegistryState::Failed;
        error!(attempts, "no listening endpoints available");
        Err(ListenError::ExhaustedRetries { attempts })
    }

    /// Move the handles of one attempt into the table; returns how many were usable.
    fn adopt_all(&mut self, report: BindReport<E::Handle>) -> Result<usize> {
        for failure in &report.failures {
            warn!(kind = %failure.kind, reason = %failure.reason, "transport failed to bind");
        }
        if report.partial && !report.handles.is_empty() {
            debug!(
                bound = report.handles.len(),
                failed = report.failures.len(),
                "partial bind accepted"
            );
        }

        let requested = report.handles.len();
        if let Err(source) = self.table.try_reserve(requested) {
            for handle in report.handles {
                discard(handle, "rollback");
            }
            self.state = RegistryState::Failed;
            error!(requested, "cannot allocate listener table");
            return Err(ListenError::ResourceAllocation { requested, source });
        }

        let mut usable = 0;
        for handle in report.handles {
            match self.table.adopt(handle) {
                Ok(entry) => {
                    debug!(
                        network_id = %entry.network_id(),
                        kind = ?entry.kind(),
                        local = entry.is_local(),
                        "listener adopted"
                    );
                    usable += 1;
                }
                Err(handle) => discard(handle, "no network id"),
            }
        }
        Ok(usable)
    }
}

fn invalid_input(err: TransportError) -> ListenError {
    ListenError::InvalidConfig(err.to_string())
}

/// Close a handle that never made it into the table.
fn discard<H: TransportHandle>(mut handle: H, reason: &str) {
    let kind = handle.kind();
    warn!(%kind, reason, "dropping bound listener");
    if let Err(err) = handle.close() {
        warn!(%kind, error = %err, "failed to close dropped listener");
    }
}

impl<E> fmt::Debug for ListenerRegistry<E>
where
    E: TransportEnumerator + fmt::Debug,
    E::Handle: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("config", &self.config)
            .field("enumerator", &self.enumerator)
            .field("state", &self.state)
            .field("table", &self.table)
            .field("token", &self.token)
            .finish()
    }
}
