//! Scripted endpoints for tests.
//!
//! A [`MockEndpoint`] answers requests from a queue of prepared responses and
//! records every request it receives, so a test can drive the stream operators
//! or a [`ResourceStore`](crate::ResourceStore) without any transport.

use crate::{Request, ResourceError};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

struct MockInner<P, R> {
    responses: VecDeque<Result<R, ResourceError>>,
    requests: Vec<Request<P>>,
}

/// An endpoint that replies with queued responses in order.
///
/// Clones share the same queue and request log. Once the queue runs dry every
/// call fails with a [`ResourceError::Transport`].
pub struct MockEndpoint<P, R> {
    inner: Arc<Mutex<MockInner<P, R>>>,
    delay: Option<Duration>,
}

impl<P, R> Clone for MockEndpoint<P, R> {
    fn clone(&self) -> Self {
        MockEndpoint {
            inner: self.inner.clone(),
            delay: self.delay,
        }
    }
}

impl<P, R> Default for MockEndpoint<P, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, R> MockEndpoint<P, R> {
    pub fn new() -> Self {
        MockEndpoint {
            inner: Arc::new(Mutex::new(MockInner {
                responses: VecDeque::new(),
                requests: Vec::new(),
            })),
            delay: None,
        }
    }

    /// Every response is held back for `delay` before it is delivered.
    pub fn with_delay(self, delay: Duration) -> Self {
        MockEndpoint {
            delay: Some(delay),
            ..self
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockInner<P, R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push_ok(&self, response: R) -> &Self {
        self.lock().responses.push_back(Ok(response));
        self
    }

    pub fn push_err(&self, error: ResourceError) -> &Self {
        self.lock().responses.push_back(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        self.lock().requests.len()
    }

    pub fn pending_responses(&self) -> usize {
        self.lock().responses.len()
    }

    pub fn requests(&self) -> Vec<Request<P>>
    where
        P: Clone,
    {
        self.lock().requests.clone()
    }

    /// Records `request` and resolves to the next queued response.
    pub fn call(
        &self,
        request: Request<P>,
    ) -> impl Future<Output = Result<R, ResourceError>> + Send + 'static
    where
        R: Send + 'static,
    {
        let response = {
            let mut inner = self.lock();
            inner.requests.push(request);
            inner.responses.pop_front()
        };
        let delay = self.delay;
        async move {
            if let Some(delay) = delay {
                sleep(delay).await;
            }
            response.unwrap_or_else(|| Err(ResourceError::transport("no mocked response left")))
        }
    }
}

/// Assertion helpers for resource values.
pub mod assert {
    use crate::{Lifecycle, Resource};
    use std::fmt::Debug;

    /// Panics unless `resource` is an `Error` whose messages include `message`.
    pub fn error_contains<T: Debug, P: Debug, M: Debug>(
        resource: &Resource<T, P, M>,
        message: &str,
    ) {
        match resource.messages() {
            Some(messages) => assert!(
                messages.iter().any(|recorded| recorded == message),
                "expected message {message:?} in {messages:?}"
            ),
            None => panic!("expected an Error resource, got {resource:?}"),
        }
    }

    /// Panics unless both resources are in the same variant with equal params.
    pub fn same_request<T: Debug, P: Debug + PartialEq, M: Debug>(
        left: &Resource<T, P, M>,
        right: &Resource<T, P, M>,
    ) {
        assert_eq!(left.tag(), right.tag(), "variants differ: {left:?} vs {right:?}");
        assert_eq!(left.params(), right.params(), "params differ");
    }
}
