//! The in-memory type tree decoded from a module schema.
//!
//! A [`Module`] maps contract names to [`Contract`] schemas; each contract
//! carries an optional state type, an optional init parameter type, and a
//! mapping from receive-function name to parameter type. The tree is built
//! once from schema bytes and never mutated afterwards, so it can be shared
//! read-only across concurrent encode calls.

use crate::error::{Result, SerializationError};

/// Wire tag bytes shared with the schema-export tool. These values are a
/// fixed external protocol, not an internal choice.
pub(crate) mod tag {
    pub const UNIT: u8 = 0;
    pub const BOOL: u8 = 1;
    pub const U8: u8 = 2;
    pub const U16: u8 = 3;
    pub const U32: u8 = 4;
    pub const U64: u8 = 5;
    pub const I8: u8 = 6;
    pub const I16: u8 = 7;
    pub const I32: u8 = 8;
    pub const I64: u8 = 9;
    pub const AMOUNT: u8 = 10;
    pub const ACCOUNT_ADDRESS: u8 = 11;
    pub const CONTRACT_ADDRESS: u8 = 12;
    pub const TIMESTAMP: u8 = 13;
    pub const DURATION: u8 = 14;
    pub const PAIR: u8 = 15;
    pub const LIST: u8 = 16;
    pub const SET: u8 = 17;
    pub const MAP: u8 = 18;
    pub const ARRAY: u8 = 19;
    pub const STRUCT: u8 = 20;
    pub const ENUM: u8 = 21;
    pub const STRING: u8 = 22;
    pub const U128: u8 = 23;
    pub const I128: u8 = 24;
    pub const CONTRACT_NAME: u8 = 25;
    pub const RECEIVE_NAME: u8 = 26;

    pub const FIELDS_NAMED: u8 = 0;
    pub const FIELDS_UNNAMED: u8 = 1;
    pub const FIELDS_NONE: u8 = 2;

    pub const OPTION_NONE: u8 = 0;
    pub const OPTION_SOME: u8 = 1;
}

/// The byte width of the count prefix in front of a variable-length
/// collection (strings, lists, sets, maps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeLength {
    /// One-byte count prefix.
    U8,
    /// Two-byte little-endian count prefix.
    U16,
    /// Four-byte little-endian count prefix.
    U32,
    /// Eight-byte little-endian count prefix.
    U64,
}

impl SizeLength {
    pub(crate) fn to_tag(self) -> u8 {
        match self {
            SizeLength::U8 => 0,
            SizeLength::U16 => 1,
            SizeLength::U32 => 2,
            SizeLength::U64 => 3,
        }
    }

    pub(crate) fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(SizeLength::U8),
            1 => Some(SizeLength::U16),
            2 => Some(SizeLength::U32),
            3 => Some(SizeLength::U64),
            _ => None,
        }
    }

    /// Append `count` to `out` in this prefix width, little-endian.
    /// Fails with [`SerializationError::RangeError`] if the count does not
    /// fit the width; counts are never truncated.
    pub fn serial_count(self, count: usize, out: &mut Vec<u8>) -> Result<()> {
        let count = count as u64;
        let fits = match self {
            SizeLength::U8 => count <= u64::from(u8::MAX),
            SizeLength::U16 => count <= u64::from(u16::MAX),
            SizeLength::U32 => count <= u64::from(u32::MAX),
            SizeLength::U64 => true,
        };
        if !fits {
            return Err(SerializationError::out_of_range(
                "collection length in count prefix",
                count,
            ));
        }
        match self {
            SizeLength::U8 => out.push(count as u8),
            SizeLength::U16 => out.extend_from_slice(&(count as u16).to_le_bytes()),
            SizeLength::U32 => out.extend_from_slice(&(count as u32).to_le_bytes()),
            SizeLength::U64 => out.extend_from_slice(&count.to_le_bytes()),
        }
        Ok(())
    }
}

/// The fields of a struct or of one enum variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fields {
    /// Named fields, in schema order.
    Named(Vec<(String, Type)>),
    /// Positional fields, in schema order.
    Unnamed(Vec<Type>),
    /// No fields at all.
    None,
}

/// A single parameter type node in a contract schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Unit,
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    I8,
    I16,
    I32,
    I64,
    I128,
    /// A CCD amount in micro-CCD.
    Amount,
    /// An account address, 32 raw bytes.
    AccountAddress,
    /// A contract instance address, index and subindex.
    ContractAddress,
    /// Milliseconds since the Unix epoch, signed.
    Timestamp,
    /// A millisecond duration, unsigned.
    Duration,
    /// A pair of two values, left then right.
    Pair(Box<Type>, Box<Type>),
    /// A variable-length list.
    List(SizeLength, Box<Type>),
    /// A collection of unique elements. Encoded exactly like a list.
    Set(SizeLength, Box<Type>),
    /// A key-value mapping.
    Map(SizeLength, Box<Type>, Box<Type>),
    /// A fixed-size array; the element count is part of the schema.
    Array(u32, Box<Type>),
    /// A struct with the given fields.
    Struct(Fields),
    /// An enum with named variants, each carrying its own fields.
    Enum(Vec<(String, Fields)>),
    /// A UTF-8 string with a length prefix of the given width.
    String(SizeLength),
    /// A contract name, transmitted with the `init_` prefix.
    ContractName(SizeLength),
    /// A receive-function name, transmitted as `<contract>.<func>`.
    ReceiveName(SizeLength),
}

impl Type {
    /// Short human-readable name of this type, for error messages.
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Type::Unit => "unit",
            Type::Bool => "bool",
            Type::U8 => "u8",
            Type::U16 => "u16",
            Type::U32 => "u32",
            Type::U64 => "u64",
            Type::U128 => "u128",
            Type::I8 => "i8",
            Type::I16 => "i16",
            Type::I32 => "i32",
            Type::I64 => "i64",
            Type::I128 => "i128",
            Type::Amount => "amount",
            Type::AccountAddress => "account address",
            Type::ContractAddress => "contract address",
            Type::Timestamp => "timestamp",
            Type::Duration => "duration",
            Type::Pair(..) => "pair",
            Type::List(..) => "list",
            Type::Set(..) => "set",
            Type::Map(..) => "map",
            Type::Array(..) => "array",
            Type::Struct(_) => "struct",
            Type::Enum(_) => "enum",
            Type::String(_) => "string",
            Type::ContractName(_) => "contract name",
            Type::ReceiveName(_) => "receive name",
        }
    }
}

/// The schema of a single contract: its optional state type, its optional
/// init parameter type, and the parameter types of its receive functions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contract {
    /// Type of the contract state, if the schema declares one.
    pub state: Option<Type>,
    /// Parameter type of the init function, if the schema declares one.
    pub init: Option<Type>,
    /// Receive-function name to parameter type, in schema order.
    pub receive: Vec<(String, Type)>,
}

impl Contract {
    /// Look up the parameter type of a receive function by name.
    pub fn receive_type(&self, entry_point: &str) -> Option<&Type> {
        self.receive
            .iter()
            .find(|(name, _)| name == entry_point)
            .map(|(_, ty)| ty)
    }
}

/// The schema of a whole deployed module: one [`Contract`] per contract
/// name, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Module {
    /// Contract name to contract schema, in schema order.
    pub contracts: Vec<(String, Contract)>,
}

impl Module {
    /// Look up a contract schema by name.
    pub fn contract(&self, name: &str) -> Option<&Contract> {
        self.contracts
            .iter()
            .find(|(contract, _)| contract == name)
            .map(|(_, schema)| schema)
    }

    /// Number of contracts in the module.
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Returns `true` if the module declares no contracts.
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}
