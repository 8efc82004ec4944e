use thiserror::Error;

/// Errors produced around a resource request.
///
/// Endpoints, decoders and the [`ResourceStore`](crate::ResourceStore) report
/// failures with this type. When it is captured by a
/// [`Resource::Error`](crate::Resource::Error) its `Display` output becomes the
/// recorded message.
#[derive(Error, Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ResourceError {
    /// A plain failure message.
    #[error("{0}")]
    Message(String),

    /// The endpoint could not complete the request.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response arrived but its body could not be decoded.
    #[error("response could not be decoded: {0}")]
    Decode(String),

    /// The store's update queue has shut down.
    #[error("resource store is closed")]
    StoreClosed,
}

impl ResourceError {
    pub fn message(message: impl Into<String>) -> Self {
        ResourceError::Message(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        ResourceError::Transport(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        ResourceError::Decode(message.into())
    }

    pub fn is_message(&self) -> bool {
        matches!(self, ResourceError::Message(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ResourceError::Transport(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, ResourceError::Decode(_))
    }

    pub fn is_store_closed(&self) -> bool {
        matches!(self, ResourceError::StoreClosed)
    }
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for ResourceError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        ResourceError::StoreClosed
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for ResourceError {
    fn from(_: tokio::sync::oneshot::error::RecvError) -> Self {
        ResourceError::StoreClosed
    }
}
