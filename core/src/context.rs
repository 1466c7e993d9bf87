//! Per-call cancellation and deadline.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::TransportError;

/// Governs how long a single call may run and lets the caller abort it.
///
/// Cloning shares the cancellation token, so cancelling any clone cancels
/// every call running under it.
#[derive(Debug, Clone)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancel: CancellationToken,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            deadline: None,
            cancel: CancellationToken::new(),
        }
    }
}

impl RequestContext {
    /// A context with no deadline that is never cancelled unless asked to.
    pub fn background() -> Self {
        Self::default()
    }

    /// Sets the deadline to `timeout` from now, keeping an earlier existing
    /// deadline if there is one.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Fails if the context is already cancelled or past its deadline.
    pub fn check(&self) -> Result<(), TransportError> {
        if self.cancel.is_cancelled() {
            return Err(TransportError::Cancelled);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(TransportError::DeadlineExceeded);
        }
        Ok(())
    }

    /// Drives `fut` until it finishes or the context is done, whichever
    /// comes first. `fut` is dropped in the latter case.
    pub async fn run<F, T>(&self, fut: F) -> Result<T, TransportError>
    where
        F: Future<Output = Result<T, TransportError>>,
    {
        self.check()?;

        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(TransportError::Cancelled),
            () = deadline => Err(TransportError::DeadlineExceeded),
            out = fut => out,
        }
    }
}
