//! Convenient re-exports for common usage patterns.
//!
//! This module provides a single import to bring all commonly used types
//! into scope.
//!
//! # Example
//!
//! ```ignore
//! use ccd_params::prelude::*;
//!
//! let module = Module::from_bytes(&schema_bytes)?;
//! let value = Value::record([("amount", Value::U64(100))]);
//! let parameter = encode_init_parameter(&module, "auction", &value)?;
//! ```

// Unified error handling
pub use crate::error::{Result, SerializationError};

// Schema tree and codec
pub use crate::schema::{Contract, Fields, MAX_TYPE_DEPTH, Module, SizeLength, Type};

// Runtime values and encoding
pub use crate::encode::encode_value;
pub use crate::params::{Parameter, encode_init_parameter, encode_update_parameter};
pub use crate::value::Value;

// Chain scalar types
pub use crate::types::{AccountAddress, Amount, ContractAddress, Duration, Timestamp};

// JSON input (requires the "json" feature)
#[cfg(feature = "json")]
pub use crate::json::from_json;
