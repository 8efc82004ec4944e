use std::fmt::{Debug, Display};
use std::future::Future;

/// The shape shared by every request-lifecycle union in this crate.
///
/// A union has a closed set of variants named by a fieldless `Tag`, and one of
/// those variants carries the failure messages. Stream operators and the store
/// rely only on this trait when they need to branch on "which state is this".
pub trait Lifecycle {
    type Tag: Copy + Eq + Debug + Display;

    fn tag(&self) -> Self::Tag;

    /// Failure messages, present only on the failure variant.
    fn messages(&self) -> Option<&[String]>;

    fn is_failure(&self) -> bool {
        self.messages().is_some()
    }
}

/// Waits for `pending` and converts its outcome with exactly one of the two
/// callbacks, handing that callback the `context` (usually the request
/// params).
///
/// This is the only place where the asynchronous collaborators meet the
/// synchronous unions: `Resource::map_promise`, `Resource::map_promise_blob`
/// and `Field::map_promise` are all built on it.
pub async fn settle<C, Fut, R, E, U, S, F>(
    context: C,
    pending: Fut,
    on_success: S,
    on_failure: F,
) -> U
where
    Fut: Future<Output = Result<R, E>>,
    S: FnOnce(C, R) -> U,
    F: FnOnce(C, E) -> U,
{
    match pending.await {
        Ok(result) => on_success(context, result),
        Err(error) => on_failure(context, error),
    }
}
