//! Request lifecycle states as closed tagged unions.
//!
//! [`Resource`] models a network-backed value (`Query`, `Empty`, `Data`,
//! `Error`) and [`Field`] an editable form field (`Editable`, `ReadOnly`,
//! `Saving`, `Error`). Both are plain immutable values with pure transitions;
//! the surrounding modules connect them to streams, endpoints, an observable
//! store and a view layer.

#[macro_use]
mod macros;

mod field;
mod lifecycle;
mod params;
mod payload;
mod render;
mod request;
mod resource;
mod resource_error;
mod resource_store;
mod stream_ext;
pub mod mock;

pub use field::*;
pub use lifecycle::*;
pub use params::*;
pub use payload::*;
pub use render::*;
pub use request::*;
pub use resource::*;
pub use resource_error::*;
pub use resource_store::*;
pub use stream_ext::*;

#[cfg(test)]
mod unit_tests;
