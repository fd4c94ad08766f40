//! Module schemas: the binary artifact describing a deployed module's
//! contracts and their parameter types.
//!
//! # Module Organization
//!
//! - [`types`]: the immutable type tree ([`Module`], [`Contract`], [`Type`],
//!   [`Fields`], [`SizeLength`])
//! - [`decode`]: parsing schema bytes into the tree
//! - [`encode`]: re-serializing the tree into schema bytes

mod decode;
mod encode;
mod types;

pub use decode::MAX_TYPE_DEPTH;
pub use types::{Contract, Fields, Module, SizeLength, Type};
