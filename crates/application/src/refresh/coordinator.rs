//! Single-flight refresh coordinator.
//!
//! At most one refresh call may be in flight at a time. The first caller
//! of an episode (the leader) performs the call; callers arriving while it
//! runs wait on the same episode and share its result. The pending slot is
//! checked and set under one lock acquisition with no await inside the
//! critical section, so two leaders can never start concurrently.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};

use aegis_domain::AuthError;

use crate::ports::Authenticator;

/// Outcome of a refresh episode, shared by every caller waiting on it.
type EpisodeOutcome = Option<Result<(), AuthError>>;

/// What a caller found in the pending slot.
enum Entry {
    /// Slot was empty; this caller runs the refresh and publishes here.
    Leader(watch::Sender<EpisodeOutcome>),
    /// An episode is in flight; this caller waits on its outcome.
    Waiter(watch::Receiver<EpisodeOutcome>),
}

/// Coordinates credential refresh so that concurrent unauthorized failures
/// produce exactly one outbound refresh call.
///
/// Constructed once and shared (it is cheap to wrap in an `Arc`) with every
/// call site that can hit a 401; that preserves the single-instance
/// semantics without global state.
pub struct RefreshCoordinator<A> {
    authenticator: Arc<A>,
    /// Bound on the refresh call. Exceeding it is a refresh failure.
    refresh_timeout: Duration,
    /// The in-flight episode, if any. `None` means no refresh is running.
    pending: Mutex<Option<watch::Receiver<EpisodeOutcome>>>,
}

impl<A: Authenticator> RefreshCoordinator<A> {
    /// Creates a coordinator over the given authenticator.
    pub fn new(authenticator: Arc<A>, refresh_timeout: Duration) -> Self {
        Self {
            authenticator,
            refresh_timeout,
            pending: Mutex::new(None),
        }
    }

    /// Ensures a credential refresh has completed, joining the in-flight
    /// episode if one exists.
    ///
    /// On failure (including timeout) the session is torn down once for
    /// the whole episode, before any waiter observes the outcome.
    ///
    /// # Errors
    ///
    /// Returns the episode's [`AuthError`] — the same value for every
    /// caller that waited on it.
    pub async fn refresh(&self) -> Result<(), AuthError> {
        let entry = {
            let mut pending = self.pending.lock().await;
            // No await between reading and writing the slot: the lock is
            // held across both, so a second leader cannot sneak in.
            if let Some(receiver) = pending.as_ref() {
                Entry::Waiter(receiver.clone())
            } else {
                let (sender, receiver) = watch::channel(None);
                *pending = Some(receiver);
                Entry::Leader(sender)
            }
        };

        match entry {
            Entry::Leader(sender) => self.lead_episode(sender).await,
            Entry::Waiter(receiver) => Self::await_episode(receiver).await,
        }
    }

    /// Runs the refresh call and publishes the outcome to waiters.
    async fn lead_episode(&self, sender: watch::Sender<EpisodeOutcome>) -> Result<(), AuthError> {
        tracing::debug!(timeout_ms = self.refresh_timeout.as_millis() as u64, "refresh episode started");

        let outcome =
            match tokio::time::timeout(self.refresh_timeout, self.authenticator.refresh()).await {
                Ok(result) => result,
                Err(_) => Err(AuthError::RefreshTimedOut {
                    timeout_ms: self.refresh_timeout.as_millis() as u64,
                }),
            };

        // Clear the slot before publishing: once waiters wake, a new 401
        // must be able to start a fresh episode.
        {
            let mut pending = self.pending.lock().await;
            *pending = None;
        }

        match &outcome {
            Ok(()) => tracing::debug!("refresh episode succeeded"),
            Err(error) => {
                tracing::warn!(%error, "refresh episode failed; tearing session down");
                // Exactly one teardown per failed episode, done by the
                // leader before the outcome fans out.
                self.authenticator.log_out().await;
            }
        }

        let _ = sender.send(Some(outcome.clone()));
        outcome
    }

    /// Waits on an in-flight episode and returns its outcome.
    async fn await_episode(
        mut receiver: watch::Receiver<EpisodeOutcome>,
    ) -> Result<(), AuthError> {
        match receiver.wait_for(Option::is_some).await {
            Ok(outcome) => outcome
                .clone()
                .map_or(Err(AuthError::RefreshAbandoned), |result| result),
            // Sender dropped without publishing: the leader was cancelled.
            Err(_) => Err(AuthError::RefreshAbandoned),
        }
    }
}

impl<A> std::fmt::Debug for RefreshCoordinator<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshCoordinator")
            .field("refresh_timeout", &self.refresh_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Authenticator stub with a controllable delay and outcome.
    struct StubAuthenticator {
        refresh_calls: AtomicUsize,
        logout_calls: AtomicUsize,
        delay: Duration,
        fail: bool,
    }

    impl StubAuthenticator {
        fn succeeding(delay: Duration) -> Self {
            Self {
                refresh_calls: AtomicUsize::new(0),
                logout_calls: AtomicUsize::new(0),
                delay,
                fail: false,
            }
        }

        fn failing(delay: Duration) -> Self {
            Self {
                fail: true,
                ..Self::succeeding(delay)
            }
        }
    }

    #[async_trait]
    impl Authenticator for StubAuthenticator {
        async fn refresh(&self) -> Result<(), AuthError> {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.fail {
                Err(AuthError::RefreshFailed {
                    message: "refresh token expired".to_string(),
                })
            } else {
                Ok(())
            }
        }

        async fn log_out(&self) {
            self.logout_calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_single_caller_refreshes_once() {
        let auth = Arc::new(StubAuthenticator::succeeding(Duration::ZERO));
        let coordinator = RefreshCoordinator::new(Arc::clone(&auth), TIMEOUT);

        coordinator.refresh().await.unwrap();
        assert_eq!(auth.refresh_calls.load(Ordering::SeqCst), 1);
        assert_eq!(auth.logout_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_refresh() {
        let auth = Arc::new(StubAuthenticator::succeeding(Duration::from_millis(50)));
        let coordinator = Arc::new(RefreshCoordinator::new(Arc::clone(&auth), TIMEOUT));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let coordinator = Arc::clone(&coordinator);
                tokio::spawn(async move { coordinator.refresh().await })
            })
            .collect();

        for task in tasks {
            task.await.unwrap().unwrap();
        }
        assert_eq!(auth.refresh_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_fans_out_and_tears_down_once() {
        let auth = Arc::new(StubAuthenticator::failing(Duration::from_millis(50)));
        let coordinator = Arc::new(RefreshCoordinator::new(Arc::clone(&auth), TIMEOUT));

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let coordinator = Arc::clone(&coordinator);
                tokio::spawn(async move { coordinator.refresh().await })
            })
            .collect();

        for task in tasks {
            let result = task.await.unwrap();
            assert!(matches!(result, Err(AuthError::RefreshFailed { .. })));
        }
        assert_eq!(auth.refresh_calls.load(Ordering::SeqCst), 1);
        assert_eq!(auth.logout_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_new_episode_after_settlement() {
        let auth = Arc::new(StubAuthenticator::succeeding(Duration::ZERO));
        let coordinator = RefreshCoordinator::new(Arc::clone(&auth), TIMEOUT);

        coordinator.refresh().await.unwrap();
        coordinator.refresh().await.unwrap();

        // Sequential episodes each refresh; only concurrent ones coalesce.
        assert_eq!(auth.refresh_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_a_refresh_failure() {
        let auth = Arc::new(StubAuthenticator::succeeding(Duration::from_secs(60)));
        let coordinator =
            RefreshCoordinator::new(Arc::clone(&auth), Duration::from_millis(100));

        let result = coordinator.refresh().await;
        assert_eq!(
            result,
            Err(AuthError::RefreshTimedOut { timeout_ms: 100 })
        );
        // Timeout takes the same teardown path as a rejected refresh.
        assert_eq!(auth.logout_calls.load(Ordering::SeqCst), 1);
    }
}
