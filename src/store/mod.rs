//! Observable state containers.
//!
//! A [`Store`] owns one state value behind a `watch` channel. Front-ends
//! either read snapshots after an operation or subscribe and react to every
//! change. The shells do the former.

use std::future::Future;
use tokio::sync::watch;

use crate::api::ApiError;

/// Loading and error flags mirrored by every store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    pub loading: bool,
    pub error: Option<String>,
}

pub trait HasStatus {
    fn status(&self) -> &Status;
    fn status_mut(&mut self) -> &mut Status;
}

pub struct Store<S> {
    state: watch::Sender<S>,
}

impl<S: Default> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> Store<S> {
    pub fn new(initial: S) -> Self {
        let (state, _) = watch::channel(initial);
        Self { state }
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.state.subscribe()
    }

    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Mutates the state in place and notifies subscribers.
    pub fn update(&self, f: impl FnOnce(&mut S)) {
        self.state.send_modify(f);
    }
}

impl<S: Clone> Store<S> {
    pub fn snapshot(&self) -> S {
        self.state.borrow().clone()
    }
}

impl<S: HasStatus> Store<S> {
    pub fn status(&self) -> Status {
        self.read(|s| s.status().clone())
    }

    pub fn is_loading(&self) -> bool {
        self.read(|s| s.status().loading)
    }

    pub fn error(&self) -> Option<String> {
        self.read(|s| s.status().error.clone())
    }

    pub fn clear_error(&self) {
        self.update(|s| s.status_mut().error = None);
    }

    /// Runs one backend round trip with the shared bookkeeping.
    ///
    /// Sets `loading` and clears `error`, awaits `request`, then either
    /// applies the value into the state or stores `describe(&err)` as the
    /// error message. `loading` is cleared in both cases and the original
    /// result is handed back to the caller.
    pub async fn track<T, Fut, D, A>(
        &self,
        request: Fut,
        describe: D,
        apply: A,
    ) -> Result<T, ApiError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
        D: FnOnce(&ApiError) -> String,
        A: FnOnce(&mut S, &T),
    {
        self.update(|s| {
            let status = s.status_mut();
            status.loading = true;
            status.error = None;
        });

        let result = request.await;

        self.update(|s| {
            match &result {
                Ok(value) => apply(s, value),
                Err(err) => s.status_mut().error = Some(describe(err)),
            }
            s.status_mut().loading = false;
        });
        result
    }
}

/// Server `detail` when present, otherwise the fixed fallback.
pub fn detail_or(fallback: &'static str) -> impl FnOnce(&ApiError) -> String {
    move |err| {
        err.detail()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }
}
