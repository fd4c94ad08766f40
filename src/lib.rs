//! Schema-guided parameter serialization for Concordium smart contracts.
//!
//! This library decodes the binary module schema a contract build tool
//! emits alongside the compiled module, and uses the resulting type tree to
//! encode runtime parameter values into the exact byte layout the chain
//! runtime expects for init and update transactions.
//!
//! # Quick Start
//!
//! ```
//! use ccd_params::prelude::*;
//!
//! # fn schema_bytes() -> Vec<u8> {
//! #     let module = Module {
//! #         contracts: vec![("auction".into(), Contract {
//! #             state: None,
//! #             init: None,
//! #             receive: vec![("bid".into(), Type::Struct(Fields::Named(vec![
//! #                 ("amount".into(), Type::U64),
//! #             ])))],
//! #         })],
//! #     };
//! #     module.to_bytes().unwrap()
//! # }
//! // Decode the module schema once; it is reusable across encode calls.
//! let module = Module::from_bytes(&schema_bytes())?;
//!
//! // Build a parameter value and encode it for an entry point.
//! let value = Value::record([("amount", Value::U64(100))]);
//! let parameter = encode_update_parameter(&module, "auction", "bid", &value)?;
//! assert_eq!(parameter.as_bytes(), [100, 0, 0, 0, 0, 0, 0, 0]);
//! # Ok::<(), ccd_params::SerializationError>(())
//! ```
//!
//! # Modules
//!
//! - [`schema`] - the module schema type tree and its binary codec
//! - [`value`] - the closed runtime value union callers construct
//! - [`encode`] - type-directed value encoding
//! - [`params`] - init/update parameter entry points
//! - [`types`] - chain-native scalars (addresses, amounts, timestamps)
//! - [`json`] - schema-directed JSON input (requires the `json` feature)
//!
//! # Feature Flags
//!
//! - `json` - build parameter values from `serde_json` values (enabled by
//!   default)
//! - `base64` - accept base64-encoded module schemas
//! - `logging` - library-level tracing (consumers provide their own
//!   subscriber)
//! - `full` - enable all features

pub mod encode;
#[cfg(feature = "json")]
pub mod json;
mod logging;
pub mod params;
pub mod prelude;
pub mod schema;
pub mod types;
pub mod value;

mod error;

// Re-export the unified error type
pub use error::{Result, SerializationError};

// Re-export the codec surface at the crate root for convenience
pub use encode::encode_value;
pub use params::{Parameter, encode_init_parameter, encode_update_parameter};
pub use schema::{Contract, Fields, Module, SizeLength, Type};
pub use value::Value;

// Re-export the chain scalar types
pub use types::{AccountAddress, Amount, ContractAddress, Duration, Timestamp};
