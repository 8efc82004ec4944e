use crate::{Resource, ResourceError};
use std::collections::BTreeMap;

mod field_test;
mod payload_test;
mod render_test;

pub type Params = BTreeMap<String, String>;

#[derive(Clone, Debug, PartialEq)]
pub enum TestMeta {
    Page(u32),
    Failure(ResourceError),
}

impl From<ResourceError> for TestMeta {
    fn from(error: ResourceError) -> Self {
        TestMeta::Failure(error)
    }
}

pub type TestResource = Resource<Params, Params, TestMeta>;

pub const MESSAGE: &str = "This should be an error message";

pub fn params_of(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

pub fn params() -> Params {
    params_of(&[("value", "value ")])
}

pub fn meta() -> TestMeta {
    TestMeta::Page(1)
}

pub fn value() -> Params {
    params_of(&[("foo", "bar")])
}

pub fn ok<T>(value: T) -> Result<T, ResourceError> {
    Ok(value)
}

pub fn err<T>(_value: T) -> Result<T, ResourceError> {
    Err(ResourceError::message(MESSAGE))
}
