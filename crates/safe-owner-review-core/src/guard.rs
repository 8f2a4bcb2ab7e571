//! Last-request-wins discipline for estimates that cannot be aborted.
//!
//! Every change of [`RequestKey`] bumps an epoch. A result is applied only if
//! the epoch it was issued under is still current when it resolves, so an
//! older request finishing late is dropped instead of overwriting a newer one.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::RequestKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    epoch: u64,
    key: RequestKey,
}

impl RequestToken {
    pub fn key(&self) -> RequestKey {
        self.key
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum GuardOutcome<E> {
    Applied,
    /// Superseded by a newer key or by teardown. Not an error.
    Stale,
    Failed(E),
    /// The key is already live, or the guard was torn down; nothing was run.
    Skipped,
}

#[derive(Debug, Default)]
struct GuardState {
    epoch: u64,
    current: Option<RequestKey>,
    torn_down: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CancellationGuard {
    state: Arc<Mutex<GuardState>>,
}

impl CancellationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, GuardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issues a token for `key`, invalidating every token issued for an older key.
    pub fn begin(&self, key: RequestKey) -> Option<RequestToken> {
        let mut g = self.state();
        if g.torn_down || g.current == Some(key) {
            return None;
        }
        g.epoch = g.epoch.saturating_add(1);
        g.current = Some(key);
        Some(RequestToken {
            epoch: g.epoch,
            key,
        })
    }

    pub fn is_live(&self, token: &RequestToken) -> bool {
        let g = self.state();
        !g.torn_down && g.epoch == token.epoch
    }

    pub fn is_torn_down(&self) -> bool {
        self.state().torn_down
    }

    pub fn teardown(&self) {
        let mut g = self.state();
        g.torn_down = true;
        g.epoch = g.epoch.saturating_add(1);
        g.current = None;
    }

    /// Applies `value` through `on_success` if `token` is still live.
    ///
    /// The liveness check and the callback run under the guard lock, so a
    /// concurrent `begin` or `teardown` cannot slip in between them.
    pub fn apply<T, S>(&self, token: &RequestToken, value: T, on_success: S) -> bool
    where
        S: FnOnce(T),
    {
        let g = self.state();
        if g.torn_down || g.epoch != token.epoch {
            return false;
        }
        on_success(value);
        true
    }

    /// Runs `op` for `key` and hands its result to `on_success` unless the
    /// request went stale in the meantime. The token is taken when this is
    /// called, not when the returned future is first polled.
    pub fn run_guarded<T, E, F, Fut, S>(
        &self,
        key: RequestKey,
        op: F,
        on_success: S,
    ) -> impl Future<Output = GuardOutcome<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        S: FnOnce(T),
    {
        let guard = self.clone();
        let token = self.begin(key);
        async move {
            let Some(token) = token else {
                return GuardOutcome::Skipped;
            };
            match op().await {
                Ok(value) => {
                    if guard.apply(&token, value, on_success) {
                        GuardOutcome::Applied
                    } else {
                        tracing::trace!(key = ?token.key, "discarding stale result");
                        GuardOutcome::Stale
                    }
                }
                Err(_) if !guard.is_live(&token) => {
                    tracing::trace!(key = ?token.key, "discarding stale failure");
                    GuardOutcome::Stale
                }
                Err(e) => GuardOutcome::Failed(e),
            }
        }
    }
}
