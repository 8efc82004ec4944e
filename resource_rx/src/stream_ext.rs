use crate::{
    Field, FieldResponse, Lifecycle, MergeParams, Payload, Request, RequestOptions, Resource,
};
use futures::StreamExt;
use futures_core::stream::Stream;
use pin_project::pin_project;
use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::debug;

/// How many requests a `make_*_request` operator keeps pending at once.
pub const MAX_IN_FLIGHT_REQUESTS: usize = 16;

/// A union value that may describe a request waiting to be issued.
///
/// A `Resource` asks for a request while it is a `Query`; a `Field` while it is
/// `Saving`, in which case the saved value is the request params.
pub trait IntoRequest {
    type Params;

    fn into_request(self) -> Option<Request<Self::Params>>;
}

impl<T, P, M> IntoRequest for Resource<T, P, M> {
    type Params = P;

    fn into_request(self) -> Option<Request<P>> {
        match self {
            Resource::Query { params, .. } => Some(Request::new(params)),
            _ => None,
        }
    }
}

impl<T> IntoRequest for Field<T> {
    type Params = T;

    fn into_request(self) -> Option<Request<T>> {
        match self {
            Field::Saving { value } => Some(Request::new(value)),
            _ => None,
        }
    }
}

/// Stream operators over a flow of [`Resource`] values.
pub trait ResourceStreamExt<T, P, M>: Stream<Item = Resource<T, P, M>> {
    /// Keeps only the `Query` resources and turns each into the request it
    /// describes.
    fn to_params(self) -> ToRequests<Self>
    where
        Self: Sized,
    {
        ToRequests { stream: self }
    }

    /// Yields resources up to and including the first one that is no longer a
    /// `Query`, then ends.
    ///
    /// ## Examples
    ///
    /// ```
    /// use futures::StreamExt;
    /// use resource_rx::{Resource, ResourceStreamExt};
    ///
    /// let flow = futures::stream::iter(vec![
    ///     Resource::<u32, &str>::new_query("page=1"),
    ///     Resource::new_data(7, "page=1"),
    ///     Resource::new_query("page=2"),
    /// ]);
    /// let seen: Vec<_> = futures::executor::block_on(flow.until_settled().collect());
    /// assert_eq!(seen.len(), 2);
    /// ```
    fn until_settled(self) -> UntilSettled<Self>
    where
        Self: Sized,
    {
        UntilSettled {
            stream: self,
            settled: false,
        }
    }
}

impl<S, T, P, M> ResourceStreamExt<T, P, M> for S where S: Stream<Item = Resource<T, P, M>> {}

/// Stream operators over a flow of [`Field`] values.
pub trait FieldStreamExt<T>: Stream<Item = Field<T>> {
    /// Keeps only the `Saving` fields and turns each into a request whose
    /// params are the value being saved.
    fn to_body(self) -> ToRequests<Self>
    where
        Self: Sized,
    {
        ToRequests { stream: self }
    }
}

impl<S, T> FieldStreamExt<T> for S where S: Stream<Item = Field<T>> {}

/// Stream operators that send a flow of [`Request`]s to an endpoint.
///
/// An endpoint is any `FnMut(Request<P>) -> Future`; the transport behind it
/// is up to the caller. Each request is issued as soon as it arrives, with up
/// to [`MAX_IN_FLIGHT_REQUESTS`] pending at once, and settlements come out in
/// the order the requests went in.
pub trait RequestStreamExt<P>: Stream<Item = Request<P>> {
    /// Merges the options produced by `options` into every request as it
    /// passes. The closure runs per item, so it can read the latest session
    /// state (an access token, for instance).
    fn with_options<F>(self, mut options: F) -> impl Stream<Item = Request<P>>
    where
        F: FnMut() -> RequestOptions,
        Self: Sized,
    {
        self.map(move |request| Request {
            options: request.options.merged(options()),
            ..request
        })
    }

    fn make_request<T, M, E, F, Fut>(
        self,
        mut endpoint: F,
    ) -> impl Stream<Item = Resource<T, P, M>>
    where
        F: FnMut(Request<P>) -> Fut,
        Fut: Future<Output = Result<Option<T>, E>>,
        P: Clone,
        T: Payload,
        E: Display,
        M: From<E>,
        Self: Sized,
    {
        self.map(move |request| {
            let params = request.params.clone();
            let pending = endpoint(request);
            async move {
                let resource = Resource::map_promise(params, pending).await;
                debug!(tag = %resource.tag(), "request settled");
                resource
            }
        })
        .buffered(MAX_IN_FLIGHT_REQUESTS)
    }

    fn make_blob_request<T, M, E, F, Fut>(
        self,
        mut endpoint: F,
    ) -> impl Stream<Item = Resource<T, P, M>>
    where
        F: FnMut(Request<P>) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Clone,
        E: Display,
        M: From<E>,
        Self: Sized,
    {
        self.map(move |request| {
            let params = request.params.clone();
            let pending = endpoint(request);
            async move {
                let resource = Resource::map_promise_blob(params, pending).await;
                debug!(tag = %resource.tag(), "blob request settled");
                resource
            }
        })
        .buffered(MAX_IN_FLIGHT_REQUESTS)
    }

    /// Sends field saves. The request params are the value being saved and
    /// become the field value of the settled [`Field`].
    fn make_field_request<E, F, Fut>(self, mut endpoint: F) -> impl Stream<Item = Field<P>>
    where
        F: FnMut(Request<P>) -> Fut,
        Fut: Future<Output = Result<FieldResponse<P>, E>>,
        P: Clone,
        E: Display,
        Self: Sized,
    {
        self.map(move |request| {
            let value = request.params.clone();
            let pending = endpoint(request);
            async move {
                let field = Field::map_promise(value, pending).await;
                debug!(tag = %field.tag(), "field save settled");
                field
            }
        })
        .buffered(MAX_IN_FLIGHT_REQUESTS)
    }
}

impl<S, P> RequestStreamExt<P> for S where S: Stream<Item = Request<P>> {}

/// Turns request-describing items into [`Request`]s, dropping the others.
///
/// Created by [`ResourceStreamExt::to_params`] and [`FieldStreamExt::to_body`].
#[pin_project(project = ToRequestsProj)]
#[derive(Debug)]
#[must_use = "Streams do nothing unless polled"]
pub struct ToRequests<S> {
    #[pin]
    stream: S,
}

impl<S> Stream for ToRequests<S>
where
    S: Stream,
    S::Item: IntoRequest,
{
    type Item = Request<<S::Item as IntoRequest>::Params>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let ToRequestsProj { mut stream } = self.project();

        loop {
            match stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    if let Some(request) = item.into_request() {
                        return Poll::Ready(Some(request));
                    }
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.stream.size_hint();
        (0, upper)
    }
}

/// Created by [`ResourceStreamExt::until_settled`].
#[pin_project(project = UntilSettledProj)]
#[derive(Debug)]
#[must_use = "Streams do nothing unless polled"]
pub struct UntilSettled<S> {
    #[pin]
    stream: S,
    settled: bool,
}

impl<S, T, P, M> Stream for UntilSettled<S>
where
    S: Stream<Item = Resource<T, P, M>>,
{
    type Item = Resource<T, P, M>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let UntilSettledProj { stream, settled } = self.project();

        if *settled {
            return Poll::Ready(None);
        }

        match stream.poll_next(cx) {
            Poll::Ready(Some(resource)) => {
                if !resource.is_query() {
                    *settled = true;
                }
                Poll::Ready(Some(resource))
            }
            Poll::Ready(None) => {
                *settled = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
