use crate::lifecycle::settle;
use crate::{Lifecycle, MergeParams, Payload};
use std::fmt::{self, Display};
use std::future::Future;

/// The request lifecycle of a network-backed value.
///
/// Every variant carries the `params` needed to issue the request again and an
/// optional `meta` (pagination, a captured error, ...). Operations consume the
/// receiver and return a new value; an operation that does not apply to the
/// current variant hands the receiver back unchanged, so calls can be chained
/// without checking the variant first.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum Resource<T, P, M = ()> {
    /// Described but not yet executed.
    Query { params: P, meta: Option<M> },
    /// Executed, nothing meaningful came back.
    Empty { params: P, meta: Option<M> },
    /// Executed and produced a value.
    Data { value: T, params: P, meta: Option<M> },
    /// Failed, with one or more human readable causes.
    Error {
        messages: Vec<String>,
        params: P,
        meta: Option<M>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceTag {
    Query,
    Empty,
    Data,
    Error,
}

impl Display for ResourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceTag::Query => "Query",
            ResourceTag::Empty => "Empty",
            ResourceTag::Data => "Data",
            ResourceTag::Error => "Error",
        };
        f.write_str(name)
    }
}

/// One handler per [`Resource`] variant, used with [`Resource::match_with`].
///
/// All four methods are required, so a dispatch can never miss a variant.
pub trait ResourcePattern<T, P, M> {
    type Output;

    fn query(self, params: &P, meta: Option<&M>) -> Self::Output;

    fn empty(self, params: &P, meta: Option<&M>) -> Self::Output;

    fn data(self, value: &T, params: &P, meta: Option<&M>) -> Self::Output;

    fn error(self, messages: &[String], params: &P, meta: Option<&M>) -> Self::Output;
}

impl<T, P, M> Lifecycle for Resource<T, P, M> {
    type Tag = ResourceTag;

    fn tag(&self) -> ResourceTag {
        match self {
            Resource::Query { .. } => ResourceTag::Query,
            Resource::Empty { .. } => ResourceTag::Empty,
            Resource::Data { .. } => ResourceTag::Data,
            Resource::Error { .. } => ResourceTag::Error,
        }
    }

    fn messages(&self) -> Option<&[String]> {
        match self {
            Resource::Error { messages, .. } => Some(messages),
            _ => None,
        }
    }
}

variant_predicates!(Resource[T, P, M] => ResourceTag {
    Query => is_query,
    Empty => is_empty,
    Data => is_data,
    Error => is_error,
});

impl<T, P, M> Resource<T, P, M> {
    pub fn new_query(params: P) -> Self {
        Resource::Query { params, meta: None }
    }

    pub fn new_empty(params: P) -> Self {
        Resource::Empty { params, meta: None }
    }

    pub fn new_data(value: T, params: P) -> Self {
        Resource::Data {
            value,
            params,
            meta: None,
        }
    }

    pub fn new_error<I, S>(messages: I, params: P) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Resource::Error {
            messages: messages.into_iter().map(Into::into).collect(),
            params,
            meta: None,
        }
    }

    /// Replaces the meta of whichever variant this is.
    pub fn with_meta(self, meta: M) -> Self {
        let meta = Some(meta);
        match self {
            Resource::Query { params, .. } => Resource::Query { params, meta },
            Resource::Empty { params, .. } => Resource::Empty { params, meta },
            Resource::Data { value, params, .. } => Resource::Data {
                value,
                params,
                meta,
            },
            Resource::Error {
                messages, params, ..
            } => Resource::Error {
                messages,
                params,
                meta,
            },
        }
    }

    pub fn params(&self) -> &P {
        match self {
            Resource::Query { params, .. }
            | Resource::Empty { params, .. }
            | Resource::Data { params, .. }
            | Resource::Error { params, .. } => params,
        }
    }

    pub fn meta(&self) -> Option<&M> {
        match self {
            Resource::Query { meta, .. }
            | Resource::Empty { meta, .. }
            | Resource::Data { meta, .. }
            | Resource::Error { meta, .. } => meta.as_ref(),
        }
    }

    pub fn value_ref(&self) -> Option<&T> {
        match self {
            Resource::Data { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn value(self) -> Option<T> {
        match self {
            Resource::Data { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn into_params(self) -> P {
        match self {
            Resource::Query { params, .. }
            | Resource::Empty { params, .. }
            | Resource::Data { params, .. }
            | Resource::Error { params, .. } => params,
        }
    }

    fn into_parts(self) -> (P, Option<M>) {
        match self {
            Resource::Query { params, meta }
            | Resource::Empty { params, meta }
            | Resource::Data { params, meta, .. }
            | Resource::Error { params, meta, .. } => (params, meta),
        }
    }

    /// Classifies a settled result. Absent or structurally empty payloads
    /// become `Empty`, anything else becomes `Data`.
    pub fn from_result(params: P, raw: Option<T>) -> Self
    where
        T: Payload,
    {
        match raw {
            Some(value) if !value.is_empty_payload() => Resource::new_data(value, params),
            _ => Resource::new_empty(params),
        }
    }

    /// Captures a failure. The error's message is recorded and the error
    /// itself is kept as the meta of the result.
    pub fn from_error<E>(params: P, error: E) -> Self
    where
        E: Display,
        M: From<E>,
    {
        Resource::Error {
            messages: vec![error.to_string()],
            params,
            meta: Some(M::from(error)),
        }
    }

    /// Wraps a binary body. Blobs are never collapsed, a zero-length blob is
    /// still a valid response.
    pub fn from_blob(params: P, blob: T) -> Self {
        Resource::new_data(blob, params)
    }

    pub async fn map_promise<Fut, E>(params: P, pending: Fut) -> Self
    where
        Fut: Future<Output = Result<Option<T>, E>>,
        T: Payload,
        E: Display,
        M: From<E>,
    {
        settle(params, pending, Self::from_result, Self::from_error).await
    }

    pub async fn map_promise_blob<Fut, E>(params: P, pending: Fut) -> Self
    where
        Fut: Future<Output = Result<T, E>>,
        E: Display,
        M: From<E>,
    {
        settle(params, pending, Self::from_blob, Self::from_error).await
    }

    pub fn run<F, E>(self, f: F) -> Self
    where
        F: FnOnce(&P) -> Result<T, E>,
        E: Display,
    {
        match self {
            Resource::Query { params, meta } => match f(&params) {
                Ok(value) => Resource::Data {
                    value,
                    params,
                    meta,
                },
                Err(error) => Resource::Error {
                    messages: vec![error.to_string()],
                    params,
                    meta,
                },
            },
            other @ (Resource::Empty { .. } | Resource::Data { .. } | Resource::Error { .. }) => {
                other
            }
        }
    }

    pub async fn run_promise<F, Fut, E>(self, f: F) -> Self
    where
        F: FnOnce(&P) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        match self {
            Resource::Query { params, meta } => match f(&params).await {
                Ok(value) => Resource::Data {
                    value,
                    params,
                    meta,
                },
                Err(error) => Resource::Error {
                    messages: vec![error.to_string()],
                    params,
                    meta,
                },
            },
            other @ (Resource::Empty { .. } | Resource::Data { .. } | Resource::Error { .. }) => {
                other
            }
        }
    }

    pub fn map<U, F, E>(self, f: F) -> Resource<U, P, M>
    where
        F: FnOnce(T) -> Result<U, E>,
        E: Display,
    {
        match self {
            Resource::Data {
                value,
                params,
                meta,
            } => match f(value) {
                Ok(value) => Resource::Data {
                    value,
                    params,
                    meta,
                },
                Err(error) => Resource::Error {
                    messages: vec![error.to_string()],
                    params,
                    meta,
                },
            },
            Resource::Query { params, meta } => Resource::Query { params, meta },
            Resource::Empty { params, meta } => Resource::Empty { params, meta },
            Resource::Error {
                messages,
                params,
                meta,
            } => Resource::Error {
                messages,
                params,
                meta,
            },
        }
    }

    pub fn map_params<F, E>(self, f: F) -> Self
    where
        F: FnOnce(&P) -> Result<P, E>,
        E: Display,
    {
        match self {
            Resource::Data {
                value,
                params,
                meta,
            } => match f(&params) {
                Ok(params) => Resource::Data {
                    value,
                    params,
                    meta,
                },
                Err(error) => Resource::Error {
                    messages: vec![error.to_string()],
                    params,
                    meta,
                },
            },
            other @ (Resource::Query { .. } | Resource::Empty { .. } | Resource::Error { .. }) => {
                other
            }
        }
    }

    pub fn map_empty_params<F, E>(self, f: F) -> Self
    where
        F: FnOnce(&P) -> Result<P, E>,
        E: Display,
    {
        match self {
            Resource::Empty { params, meta } => match f(&params) {
                Ok(params) => Resource::Empty { params, meta },
                Err(error) => Resource::Error {
                    messages: vec![error.to_string()],
                    params,
                    meta,
                },
            },
            other @ (Resource::Query { .. } | Resource::Data { .. } | Resource::Error { .. }) => {
                other
            }
        }
    }

    /// Monadic bind over `Data`. `f` receives the whole resource and builds
    /// the next one itself, including any `Error`.
    pub fn chain<U, F>(self, f: F) -> Resource<U, P, M>
    where
        F: FnOnce(Self) -> Resource<U, P, M>,
    {
        match self {
            data @ Resource::Data { .. } => f(data),
            Resource::Query { params, meta } => Resource::Query { params, meta },
            Resource::Empty { params, meta } => Resource::Empty { params, meta },
            Resource::Error {
                messages,
                params,
                meta,
            } => Resource::Error {
                messages,
                params,
                meta,
            },
        }
    }

    /// Runs a check against the value. A failing check turns `Data` into
    /// `Error` holding `message` followed by the check's own message.
    pub fn validate<F, E>(self, f: F, message: impl Into<String>) -> Self
    where
        F: FnOnce(&T) -> Result<(), E>,
        E: Display,
    {
        match self {
            Resource::Data {
                value,
                params,
                meta,
            } => match f(&value) {
                Ok(()) => Resource::Data {
                    value,
                    params,
                    meta,
                },
                Err(error) => Resource::Error {
                    messages: vec![message.into(), error.to_string()],
                    params,
                    meta,
                },
            },
            other @ (Resource::Query { .. } | Resource::Empty { .. } | Resource::Error { .. }) => {
                other
            }
        }
    }

    /// Re-describes the request: `new_params` entries override the current
    /// ones and the result is a fresh `Query` without meta.
    pub fn update(self, new_params: P) -> Self
    where
        P: MergeParams,
    {
        let params = self.into_params();
        Resource::new_query(params.merged(new_params))
    }

    /// Resets to `Empty` with the given params folded in. Unlike
    /// [`update`](Self::update), the current params win on a key conflict.
    pub fn change_params(self, new_params: P) -> Self
    where
        P: MergeParams,
    {
        let params = self.into_params();
        Resource::new_empty(new_params.merged(params))
    }

    pub fn empty(self) -> Self {
        let (params, meta) = self.into_parts();
        Resource::Empty { params, meta }
    }

    pub fn query(self) -> Self {
        let (params, meta) = self.into_parts();
        Resource::Query { params, meta }
    }

    pub fn fail(self, message: impl Into<String>) -> Self {
        let (params, meta) = self.into_parts();
        Resource::Error {
            messages: vec![message.into()],
            params,
            meta,
        }
    }

    pub fn tap<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Resource::Data { value, .. } = &self {
            f(value);
        }
        self
    }

    pub fn get_data_or(self, default: T) -> T {
        match self {
            Resource::Data { value, .. } => value,
            Resource::Query { .. } | Resource::Empty { .. } | Resource::Error { .. } => default,
        }
    }

    pub fn on_data<F>(&self, f: F)
    where
        F: FnOnce(&T),
    {
        if let Resource::Data { value, .. } = self {
            f(value);
        }
    }

    pub fn match_with<R>(&self, pattern: R) -> R::Output
    where
        R: ResourcePattern<T, P, M>,
    {
        match self {
            Resource::Query { params, meta } => pattern.query(params, meta.as_ref()),
            Resource::Empty { params, meta } => pattern.empty(params, meta.as_ref()),
            Resource::Data {
                value,
                params,
                meta,
            } => pattern.data(value, params, meta.as_ref()),
            Resource::Error {
                messages,
                params,
                meta,
            } => pattern.error(messages, params, meta.as_ref()),
        }
    }
}
