//! Runtime parameter values.
//!
//! [`Value`] is a closed union covering every shape a contract parameter
//! can take. Callers construct values directly (or via [`crate::json`] with
//! the `json` feature) and hand them to the encoder together with the
//! schema [`Type`](crate::schema::Type) node that governs their layout.
//!
//! The shape checks the encoder performs (field names and counts, pair
//! arity, array sizes) happen against this union, so a mismatch surfaces as
//! a structured error instead of a reflection failure.

use num_bigint::BigInt;

use crate::types::{AccountAddress, Amount, ContractAddress, Timestamp};

/// A single runtime value to encode against a schema type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// The unit value; encodes to zero bytes.
    Unit,
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    /// A 128-bit integer parameter. Carried as a big integer so that
    /// out-of-range inputs are representable and rejected at encode time.
    BigInt(BigInt),
    String(String),
    /// Elements of a list, set, fixed-size array, or unnamed field tuple.
    Seq(Vec<Value>),
    /// Exactly two values, left then right.
    Pair(Box<Value>, Box<Value>),
    /// Map entries in iteration order. The encoder preserves this order.
    Map(Vec<(Value, Value)>),
    /// Named members of a struct or named-field variant, in any order;
    /// the schema's field order governs the output.
    Record(Vec<(String, Value)>),
    /// One variant of an enum, selected by name.
    Variant {
        name: String,
        payload: Box<Value>,
    },
    Account(AccountAddress),
    Amount(Amount),
    Contract(ContractAddress),
    Timestamp(Timestamp),
    /// A duration in the composite text form, e.g. `"10d 2h 30s"`.
    Duration(String),
    /// A contract name; transmitted with the `init_` prefix.
    ContractName {
        contract: String,
    },
    /// A receive-function name; transmitted as `<contract>.<func>`.
    ReceiveName {
        contract: String,
        func: String,
    },
}

impl Value {
    /// A sequence value from anything iterable.
    pub fn seq(elements: impl IntoIterator<Item = Value>) -> Self {
        Value::Seq(elements.into_iter().collect())
    }

    /// A pair value.
    pub fn pair(left: Value, right: Value) -> Self {
        Value::Pair(Box::new(left), Box::new(right))
    }

    /// A map value from `(key, value)` entries, preserving their order.
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::Map(entries.into_iter().collect())
    }

    /// A record value from `(name, value)` members.
    pub fn record<N: Into<String>>(members: impl IntoIterator<Item = (N, Value)>) -> Self {
        Value::Record(
            members
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }

    /// An enum variant value. Use [`Value::Unit`] as the payload for
    /// variants without fields.
    pub fn variant(name: impl Into<String>, payload: Value) -> Self {
        Value::Variant {
            name: name.into(),
            payload: Box::new(payload),
        }
    }

    /// A contract-name value.
    pub fn contract_name(contract: impl Into<String>) -> Self {
        Value::ContractName {
            contract: contract.into(),
        }
    }

    /// A receive-name value.
    pub fn receive_name(contract: impl Into<String>, func: impl Into<String>) -> Self {
        Value::ReceiveName {
            contract: contract.into(),
            func: func.into(),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::U8(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::U16(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::U32(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::U64(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::I8(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::I16(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::I32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::I64(v)
    }
}

impl From<u128> for Value {
    fn from(v: u128) -> Self {
        Value::BigInt(BigInt::from(v))
    }
}

impl From<i128> for Value {
    fn from(v: i128) -> Self {
        Value::BigInt(BigInt::from(v))
    }
}

impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        Value::BigInt(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<AccountAddress> for Value {
    fn from(v: AccountAddress) -> Self {
        Value::Account(v)
    }
}

impl From<Amount> for Value {
    fn from(v: Amount) -> Self {
        Value::Amount(v)
    }
}

impl From<ContractAddress> for Value {
    fn from(v: ContractAddress) -> Self {
        Value::Contract(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Value::Timestamp(v)
    }
}
