use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// Structural emptiness of a settled result.
///
/// [`Resource::from_result`](crate::Resource::from_result) collapses a payload
/// that reports itself empty into [`Resource::Empty`](crate::Resource::Empty),
/// so a [`Resource::Data`](crate::Resource::Data) never wraps an empty string,
/// collection or JSON `null`.
///
/// Scalars are never empty: `0`, `false` and `'\0'` are values.
pub trait Payload {
    fn is_empty_payload(&self) -> bool;
}

macro_rules! scalar_payload {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Payload for $ty {
                fn is_empty_payload(&self) -> bool {
                    false
                }
            }
        )+
    };
}

scalar_payload!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl Payload for () {
    fn is_empty_payload(&self) -> bool {
        true
    }
}

impl Payload for String {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl Payload for &str {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Payload for Vec<T> {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Payload for VecDeque<T> {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Payload for &[T] {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> Payload for HashMap<K, V, S> {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Payload for BTreeMap<K, V> {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl<T, S> Payload for HashSet<T, S> {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Payload for BTreeSet<T> {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Payload> Payload for Option<T> {
    fn is_empty_payload(&self) -> bool {
        self.as_ref().map_or(true, Payload::is_empty_payload)
    }
}

impl<T: Payload + ?Sized> Payload for Box<T> {
    fn is_empty_payload(&self) -> bool {
        (**self).is_empty_payload()
    }
}

impl<T: Payload + ?Sized> Payload for Arc<T> {
    fn is_empty_payload(&self) -> bool {
        (**self).is_empty_payload()
    }
}

impl<T: Payload + ?Sized> Payload for Rc<T> {
    fn is_empty_payload(&self) -> bool {
        (**self).is_empty_payload()
    }
}

#[cfg(feature = "serde")]
impl Payload for serde_json::Value {
    fn is_empty_payload(&self) -> bool {
        use serde_json::Value;
        match self {
            Value::Null => true,
            Value::String(text) => text.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(fields) => fields.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        }
    }
}

#[cfg(feature = "serde")]
impl Payload for serde_json::Map<String, serde_json::Value> {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}
