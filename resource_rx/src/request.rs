use crate::MergeParams;
use std::collections::BTreeMap;
use std::fmt::{self, Display};

/// Header carrying the session token on authenticated requests.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

const ACCEPT: &str = "Accept";
const CONTENT_TYPE: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "UPPERCASE")
)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Transport options handed to an endpoint alongside the params.
///
/// Options merge like params: the overriding side's method wins when it sets
/// one and its headers are written over the base headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub headers: BTreeMap<String, String>,
}

impl RequestOptions {
    pub fn get() -> Self {
        RequestOptions {
            method: Some(Method::Get),
            headers: BTreeMap::new(),
        }
    }

    pub fn post() -> Self {
        RequestOptions {
            method: Some(Method::Post),
            headers: BTreeMap::new(),
        }
        .with_header(ACCEPT, APPLICATION_JSON)
    }

    pub fn json_post() -> Self {
        Self::post().with_header(CONTENT_TYPE, APPLICATION_JSON)
    }

    pub fn json_put() -> Self {
        Self::json_post().with_method(Method::Put)
    }

    pub fn json_delete() -> Self {
        Self::json_post().with_method(Method::Delete)
    }

    pub fn with_method(self, method: Method) -> Self {
        RequestOptions {
            method: Some(method),
            ..self
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_access_token(self, token: impl Into<String>) -> Self {
        self.with_header(ACCESS_TOKEN_HEADER, token)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

impl MergeParams for RequestOptions {
    fn merged(self, overrides: Self) -> Self {
        RequestOptions {
            method: overrides.method.or(self.method),
            headers: self.headers.merged(overrides.headers),
        }
    }
}

/// What an endpoint receives: the resource params plus transport options.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Request<P> {
    pub params: P,
    pub options: RequestOptions,
}

impl<P> Request<P> {
    pub fn new(params: P) -> Self {
        Request {
            params,
            options: RequestOptions::default(),
        }
    }

    pub fn with_options(self, options: RequestOptions) -> Self {
        Request {
            options: self.options.merged(options),
            ..self
        }
    }
}
