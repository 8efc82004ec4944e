use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Shallow merge of request parameters.
///
/// `base.merged(overrides)` keeps every entry of `base` and writes every entry
/// of `overrides` over it, so on a key conflict the override wins.
pub trait MergeParams: Sized {
    fn merged(self, overrides: Self) -> Self;
}

impl MergeParams for () {
    fn merged(self, _overrides: Self) -> Self {}
}

impl<K: Ord, V> MergeParams for BTreeMap<K, V> {
    fn merged(mut self, overrides: Self) -> Self {
        self.extend(overrides);
        self
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> MergeParams for HashMap<K, V, S> {
    fn merged(mut self, overrides: Self) -> Self {
        self.extend(overrides);
        self
    }
}

#[cfg(feature = "serde")]
impl MergeParams for serde_json::Map<String, serde_json::Value> {
    fn merged(mut self, overrides: Self) -> Self {
        self.extend(overrides);
        self
    }
}

#[cfg(feature = "serde")]
impl MergeParams for serde_json::Value {
    fn merged(self, overrides: Self) -> Self {
        use serde_json::Value;
        match (self, overrides) {
            (Value::Object(base), Value::Object(overrides)) => {
                Value::Object(base.merged(overrides))
            }
            (base, Value::Null) => base,
            (_, overrides) => overrides,
        }
    }
}
