//! Page buffer module
//!
//! A page is one decoded batch of rows plus the continuation token the
//! service returned with it. Cursors own exactly one page at a time and
//! replace it wholesale on every fetch.

mod json;
mod types;

pub use json::{JsonPage, JsonPageDecoder};
pub use types::{PageBuffer, PageDecoder};

#[cfg(test)]
mod tests;
