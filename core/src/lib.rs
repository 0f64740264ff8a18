//! An optional value that is either present, holding exactly one payload, or absent, with a combinator API that
//! makes handling absence explicit.

pub mod maybe;
pub mod error;
pub mod nullable;
pub mod iter;

pub mod app;

pub use error::UnwrapError;
pub use maybe::{absent, present, Maybe};
pub use nullable::Nullable;
