//! Cancellation and deadlines for API calls.

use crate::error::ApiError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Carries a cancellation token and an optional deadline through every request.
///
/// Clones share the same token, so cancelling any clone cancels them all. Use
/// [`RequestContext::child`] for a scope that can be cancelled on its own.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new().with_deadline(Instant::now() + timeout)
    }

    /// Keep the earlier of the current deadline and `deadline`.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) if current < deadline => current,
            _ => deadline,
        });
        self
    }

    /// A context cancelled with this one, but cancellable separately.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fail fast when the context is already cancelled or past its deadline.
    pub fn check(&self) -> Result<(), ApiError> {
        if self.token.is_cancelled() {
            return Err(ApiError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(ApiError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Run `fut` until it completes, the context is cancelled, or the deadline passes.
    pub async fn run<T, F>(&self, fut: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        self.check()?;
        let bounded = async {
            match self.deadline {
                Some(deadline) => tokio::time::timeout_at(deadline, fut)
                    .await
                    .map_err(|_| ApiError::DeadlineExceeded)?,
                None => fut.await,
            }
        };
        tokio::select! {
            _ = self.token.cancelled() => Err(ApiError::Cancelled),
            result = bounded => result,
        }
    }
}
