//! Shared error and result definitions, relied upon by all tessella-* crates.

pub mod error;
pub mod result;

pub use error::{Error, ErrorKind};
pub use result::Result;
