use crate::lifecycle::settle;
use crate::Lifecycle;
use std::fmt::{self, Display};
use std::future::Future;

/// The editing lifecycle of a single form field backed by a save request.
///
/// `value` is the last committed value. While editing, `temp` holds what the
/// user has typed so far; saving sends `temp` and waits for the response.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum Field<T> {
    Editable { value: T, temp: T },
    ReadOnly { value: T },
    Saving { value: T },
    /// A rejected save. The field stays editable from the user's point of view.
    Error { messages: Vec<String>, value: T },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldTag {
    Editable,
    ReadOnly,
    Saving,
    Error,
}

impl Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldTag::Editable => "Editable",
            FieldTag::ReadOnly => "ReadOnly",
            FieldTag::Saving => "Saving",
            FieldTag::Error => "Error",
        };
        f.write_str(name)
    }
}

/// Response body of a field save: `success` decides between the saved `data`
/// and the rejection `messages`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldResponse<T> {
    pub success: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub data: Option<T>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub messages: Vec<String>,
}

impl<T> FieldResponse<T> {
    pub fn accepted(data: T) -> Self {
        FieldResponse {
            success: true,
            data: Some(data),
            messages: Vec::new(),
        }
    }

    pub fn rejected<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldResponse {
            success: false,
            data: None,
            messages: messages.into_iter().map(Into::into).collect(),
        }
    }
}

/// One handler per [`Field`] variant, used with [`Field::match_with`].
pub trait FieldPattern<T> {
    type Output;

    fn editable(self, value: &T, temp: &T) -> Self::Output;

    fn read_only(self, value: &T) -> Self::Output;

    fn saving(self, value: &T) -> Self::Output;

    fn error(self, messages: &[String], value: &T) -> Self::Output;
}

impl<T> Lifecycle for Field<T> {
    type Tag = FieldTag;

    fn tag(&self) -> FieldTag {
        match self {
            Field::Editable { .. } => FieldTag::Editable,
            Field::ReadOnly { .. } => FieldTag::ReadOnly,
            Field::Saving { .. } => FieldTag::Saving,
            Field::Error { .. } => FieldTag::Error,
        }
    }

    fn messages(&self) -> Option<&[String]> {
        match self {
            Field::Error { messages, .. } => Some(messages),
            _ => None,
        }
    }
}

variant_predicates!(Field[T] => FieldTag {
    Editable => is_editable,
    ReadOnly => is_read_only,
    Saving => is_saving,
    Error => is_error,
});

impl<T> Field<T> {
    pub fn editable(value: T) -> Self
    where
        T: Clone,
    {
        let temp = value.clone();
        Field::Editable { value, temp }
    }

    pub fn editable_with(value: T, temp: T) -> Self {
        Field::Editable { value, temp }
    }

    pub fn read_only(value: T) -> Self {
        Field::ReadOnly { value }
    }

    pub fn saving(value: T) -> Self {
        Field::Saving { value }
    }

    pub fn error<I, S>(messages: I, value: T) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Field::Error {
            messages: messages.into_iter().map(Into::into).collect(),
            value,
        }
    }

    pub fn value_ref(&self) -> &T {
        match self {
            Field::Editable { value, .. }
            | Field::ReadOnly { value }
            | Field::Saving { value }
            | Field::Error { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Field::Editable { value, .. }
            | Field::ReadOnly { value }
            | Field::Saving { value }
            | Field::Error { value, .. } => value,
        }
    }

    /// The value a form should display: the pending edit while editing,
    /// the committed value otherwise.
    pub fn display_ref(&self) -> &T {
        match self {
            Field::Editable { temp, .. } => temp,
            other => other.value_ref(),
        }
    }

    /// Interprets a save response. A rejected save keeps the submitted value so
    /// the user can correct it; an accepted one without data commits it.
    pub fn from_result(value: T, response: FieldResponse<T>) -> Self {
        let FieldResponse {
            success,
            data,
            messages,
        } = response;
        if success {
            Field::ReadOnly {
                value: data.unwrap_or(value),
            }
        } else {
            Field::Error { messages, value }
        }
    }

    pub fn from_error<E: Display>(value: T, error: E) -> Self {
        Field::Error {
            messages: vec![error.to_string()],
            value,
        }
    }

    pub async fn map_promise<Fut, E>(value: T, pending: Fut) -> Self
    where
        Fut: Future<Output = Result<FieldResponse<T>, E>>,
        E: Display,
    {
        settle(value, pending, Self::from_result, Self::from_error).await
    }

    /// Edits the pending value. Only an `Editable` field changes.
    pub fn map<F>(self, f: F) -> Self
    where
        F: FnOnce(T) -> T,
    {
        match self {
            Field::Editable { value, temp } => Field::Editable {
                value,
                temp: f(temp),
            },
            other @ (Field::ReadOnly { .. } | Field::Saving { .. } | Field::Error { .. }) => other,
        }
    }

    /// Replaces the committed value in any state. An `Editable` field drops its
    /// pending edit.
    pub fn map_value<F>(self, f: F) -> Self
    where
        F: FnOnce(T) -> T,
        T: Clone,
    {
        match self {
            Field::Editable { value, .. } => Field::editable(f(value)),
            Field::ReadOnly { value } => Field::ReadOnly { value: f(value) },
            Field::Saving { value } => Field::Saving { value: f(value) },
            Field::Error { messages, value } => Field::Error {
                messages,
                value: f(value),
            },
        }
    }

    pub fn save(self) -> Self {
        match self {
            Field::Editable { temp, .. } => Field::Saving { value: temp },
            Field::ReadOnly { value } => Field::Saving { value },
            other @ (Field::Saving { .. } | Field::Error { .. }) => other,
        }
    }

    pub fn edit(self) -> Self
    where
        T: Clone,
    {
        match self {
            Field::ReadOnly { value } => Field::editable(value),
            other @ (Field::Editable { .. } | Field::Saving { .. } | Field::Error { .. }) => other,
        }
    }

    pub fn revert(self) -> Self {
        match self {
            Field::Editable { value, .. } | Field::Error { value, .. } => Field::ReadOnly { value },
            other @ (Field::ReadOnly { .. } | Field::Saving { .. }) => other,
        }
    }

    pub fn tap<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        f(self.value_ref());
        self
    }

    pub fn to_validation(self) -> Result<T, Vec<String>> {
        match self {
            Field::Error { messages, .. } => Err(messages),
            other => Ok(other.into_value()),
        }
    }

    pub fn match_with<R>(&self, pattern: R) -> R::Output
    where
        R: FieldPattern<T>,
    {
        match self {
            Field::Editable { value, temp } => pattern.editable(value, temp),
            Field::ReadOnly { value } => pattern.read_only(value),
            Field::Saving { value } => pattern.saving(value),
            Field::Error { messages, value } => pattern.error(messages, value),
        }
    }
}
