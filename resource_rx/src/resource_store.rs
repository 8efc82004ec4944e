use crate::{
    Lifecycle, MergeParams, Payload, Request, RequestOptions, Resource, ResourceError,
    ResourceStreamExt, UntilSettled,
};
use futures_signals::signal::{Mutable, MutableSignalCloned, SignalExt, SignalStream};
use std::fmt::Display;
use std::future::Future;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

type Reducer<T, P, M> = Box<dyn FnOnce(Resource<T, P, M>) -> Resource<T, P, M> + Send>;
type Action<T, P, M> = Box<dyn FnOnce(Resource<T, P, M>) + Send>;
type ResourceStream<T, P, M> = SignalStream<MutableSignalCloned<Resource<T, P, M>>>;

/// An observable cell holding one [`Resource`].
///
/// Updates go through an ordered queue processed on a tokio task, so reducers
/// always see the result of every reducer queued before them. Observers follow
/// the cell through [`to_signal`](Self::to_signal) or
/// [`to_stream`](Self::to_stream).
///
/// Fetches settle asynchronously. A settlement is only applied while the cell
/// still holds the `Query` that issued it; if the request was re-described in
/// the meantime (or the fetch was cancelled) the settlement is dropped.
///
/// Dropping the store (or calling [`close`](Self::close)) stops the queue;
/// pending settlements are then discarded.
pub struct ResourceStore<T, P, M = ()> {
    resource: Mutable<Resource<T, P, M>>,
    options: RequestOptions,
    reducers: UnboundedSender<Reducer<T, P, M>>,
    readers: UnboundedSender<Action<T, P, M>>,
    shutdown: CancellationToken,
}

/// The receiving half of a store: applies reducers to the cell and runs
/// read actions against it, reducers first.
struct StoreQueue<T, P, M> {
    resource: Mutable<Resource<T, P, M>>,
    reducers: UnboundedReceiver<Reducer<T, P, M>>,
    readers: UnboundedReceiver<Action<T, P, M>>,
    shutdown: CancellationToken,
}

impl<T, P, M> StoreQueue<T, P, M>
where
    T: Clone,
    P: Clone,
    M: Clone,
{
    async fn run(mut self) {
        let mut applied = 0usize;
        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                Some(reducer) = self.reducers.recv() => {
                    let next = reducer(self.resource.get_cloned());
                    applied += 1;
                    trace!(tag = %next.tag(), applied, "resource updated");
                    self.resource.set(next);
                }
                Some(read) = self.readers.recv() => read(self.resource.get_cloned()),
                else => break,
            }
        }
        debug!(applied, "resource store queue closed");
    }
}

impl<T, P, M> ResourceStore<T, P, M>
where
    T: Clone + Send + Sync + 'static,
    P: Clone + PartialEq + Send + Sync + 'static,
    M: Clone + Send + Sync + 'static,
{
    /// Creates the store and spawns its queue. Must be called inside a tokio
    /// runtime.
    pub fn new(initial: Resource<T, P, M>) -> Self {
        Self::with_options(initial, RequestOptions::default())
    }

    /// Like [`new`](Self::new), with options attached to every request the
    /// store issues.
    pub fn with_options(initial: Resource<T, P, M>, options: RequestOptions) -> Self {
        let (reducers, reducer_rx) = unbounded_channel();
        let (readers, reader_rx) = unbounded_channel();
        let store = ResourceStore {
            resource: Mutable::new(initial),
            options,
            reducers,
            readers,
            shutdown: CancellationToken::new(),
        };
        let queue = StoreQueue {
            resource: store.resource.clone(),
            reducers: reducer_rx,
            readers: reader_rx,
            shutdown: store.shutdown.clone(),
        };
        tokio::spawn(queue.run());
        store
    }

    /// Every value the cell takes from now on, starting with the current one.
    /// Intermediate values may be skipped when updates arrive faster than the
    /// stream is polled.
    pub fn to_stream(&self) -> ResourceStream<T, P, M> {
        self.to_signal().to_stream()
    }

    pub fn to_signal(&self) -> MutableSignalCloned<Resource<T, P, M>> {
        self.resource.signal_cloned()
    }

    /// The cell's values until the pending query, if any, settles.
    pub fn settled(&self) -> UntilSettled<ResourceStream<T, P, M>> {
        self.to_stream().until_settled()
    }

    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// Stops the queue. Later updates and reads fail with
    /// [`ResourceError::StoreClosed`].
    pub fn close(&self) {
        self.shutdown.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    pub fn set_resource<F>(&self, reducer: F) -> Result<(), ResourceError>
    where
        F: FnOnce(Resource<T, P, M>) -> Resource<T, P, M> + Send + 'static,
    {
        if self.is_closed() {
            return Err(ResourceError::StoreClosed);
        }
        self.reducers.send(Box::new(reducer))?;
        Ok(())
    }

    pub fn with_resource<F>(&self, action: F) -> Result<(), ResourceError>
    where
        F: FnOnce(Resource<T, P, M>) + Send + 'static,
    {
        if self.is_closed() {
            return Err(ResourceError::StoreClosed);
        }
        self.readers.send(Box::new(action))?;
        Ok(())
    }

    /// The current value, without waiting for queued reducers.
    pub fn get_resource(&self) -> Resource<T, P, M> {
        self.resource.get_cloned()
    }

    /// The value once every reducer queued so far has run.
    pub async fn await_resource(&self) -> Result<Resource<T, P, M>, ResourceError> {
        let (tx, rx) = oneshot::channel();
        self.with_resource(move |resource| {
            let _ = tx.send(resource);
        })?;
        Ok(rx.await?)
    }

    /// Re-describes the request, see [`Resource::update`].
    pub fn update(&self, params: P) -> Result<(), ResourceError>
    where
        P: MergeParams,
    {
        self.set_resource(move |resource| resource.update(params))
    }

    pub fn reset(&self) -> Result<(), ResourceError> {
        self.set_resource(Resource::empty)
    }

    pub fn retry(&self) -> Result<(), ResourceError> {
        self.set_resource(Resource::query)
    }

    pub fn fail(&self, message: impl Into<String>) -> Result<(), ResourceError> {
        let message = message.into();
        self.set_resource(move |resource| resource.fail(message))
    }

    /// Issues the pending `Query` through `endpoint` and stores the settled
    /// resource. Does nothing unless the store currently holds a `Query`.
    pub fn fetch<F, Fut, E>(&self, endpoint: F) -> Result<(), ResourceError>
    where
        F: FnOnce(Request<P>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<Option<T>, E>> + Send + 'static,
        T: Payload,
        E: Display + Send + 'static,
        M: From<E>,
    {
        let options = self.options.clone();
        self.fetch_core(
            move |params| {
                let pending = endpoint(Request::new(params.clone()).with_options(options));
                Resource::map_promise(params, pending)
            },
            None,
        )
    }

    /// Like [`fetch`](Self::fetch) for binary bodies; an empty blob is still
    /// stored as `Data`.
    pub fn fetch_blob<F, Fut, E>(&self, endpoint: F) -> Result<(), ResourceError>
    where
        F: FnOnce(Request<P>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Display + Send + 'static,
        M: From<E>,
    {
        let options = self.options.clone();
        self.fetch_core(
            move |params| {
                let pending = endpoint(Request::new(params.clone()).with_options(options));
                Resource::map_promise_blob(params, pending)
            },
            None,
        )
    }

    /// Like [`fetch`](Self::fetch), but once `cancellation_token` fires the
    /// settlement is discarded and the store keeps whatever it holds.
    pub fn fetch_cancellable<F, Fut, E>(
        &self,
        cancellation_token: CancellationToken,
        endpoint: F,
    ) -> Result<(), ResourceError>
    where
        F: FnOnce(Request<P>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<Option<T>, E>> + Send + 'static,
        T: Payload,
        E: Display + Send + 'static,
        M: From<E>,
    {
        let options = self.options.clone();
        self.fetch_core(
            move |params| {
                let pending = endpoint(Request::new(params.clone()).with_options(options));
                Resource::map_promise(params, pending)
            },
            Some(cancellation_token),
        )
    }

    fn fetch_core<F, Fut>(
        &self,
        start: F,
        cancellation_token: Option<CancellationToken>,
    ) -> Result<(), ResourceError>
    where
        F: FnOnce(P) -> Fut + Send + 'static,
        Fut: Future<Output = Resource<T, P, M>> + Send + 'static,
    {
        let reducers = self.reducers.clone();
        self.with_resource(move |current| {
            let params = match current {
                Resource::Query { params, .. } => params,
                other => {
                    debug!(tag = %other.tag(), "fetch skipped, resource is not a query");
                    return;
                }
            };
            tokio::spawn(async move {
                let pending = start(params.clone());
                let settled = match cancellation_token {
                    Some(token) => {
                        tokio::select! {
                            biased;
                            _ = token.cancelled() => {
                                debug!("fetch cancelled, settlement discarded");
                                return;
                            }
                            settled = pending => settled,
                        }
                    }
                    None => pending.await,
                };
                trace!(tag = %settled.tag(), "fetch settled");
                let _ = reducers.send(Box::new(move |latest| {
                    let still_queried = matches!(
                        &latest,
                        Resource::Query { params: latest_params, .. } if *latest_params == params
                    );
                    if still_queried {
                        settled
                    } else {
                        debug!(tag = %latest.tag(), "stale settlement discarded");
                        latest
                    }
                }));
            });
        })
    }
}

impl<T, P, M> Drop for ResourceStore<T, P, M> {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
