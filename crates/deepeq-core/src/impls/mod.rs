//! [`Inspect`](crate::Inspect) implementations for std, chrono and uuid types.

mod collections;
mod terminal;
mod tuples;
mod wrappers;

pub use wrappers::DynValue;
