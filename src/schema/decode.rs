//! Decoding module schemas from their binary representation.
//!
//! The grammar is read strictly in order with all integers little-endian.
//! Any unrecognized tag byte or read past the end of the buffer aborts the
//! whole decode; partial structures are never returned. Type nesting depth
//! is capped so schema bytes from an untrusted source cannot trigger
//! unbounded recursion.

use crate::error::{Result, SerializationError};
use crate::logging::info;

use super::types::{Contract, Fields, Module, SizeLength, Type, tag};

/// Maximum nesting depth of a single parameter type. Deeper schemas are
/// rejected as malformed.
pub const MAX_TYPE_DEPTH: usize = 64;

/// A reading position inside the schema bytes.
struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn malformed(&self, reason: impl Into<String>) -> SerializationError {
        SerializationError::MalformedSchema {
            offset: self.offset,
            reason: reason.into(),
        }
    }

    fn read_u8(&mut self) -> Result<u8> {
        let byte = self
            .bytes
            .get(self.offset)
            .copied()
            .ok_or_else(|| self.malformed("unexpected end of schema"))?;
        self.offset += 1;
        Ok(byte)
    }

    fn read_u32(&mut self) -> Result<u32> {
        let end = self.offset + 4;
        let slice = self
            .bytes
            .get(self.offset..end)
            .ok_or_else(|| self.malformed("unexpected end of schema"))?;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(slice);
        self.offset = end;
        Ok(u32::from_le_bytes(raw))
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .ok_or_else(|| self.malformed("unexpected end of schema"))?;
        let slice = self
            .bytes
            .get(self.offset..end)
            .ok_or_else(|| self.malformed("unexpected end of schema"))?;
        self.offset = end;
        Ok(slice)
    }

    /// `String` = u32 byte length, then that many UTF-8 bytes.
    fn read_string(&mut self) -> Result<String> {
        let len = self.read_u32()? as usize;
        let start = self.offset;
        let bytes = self.read_bytes(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| SerializationError::MalformedSchema {
            offset: start,
            reason: "string is not valid UTF-8".into(),
        })
    }

    /// `Option<T>` = one tag byte, `1` followed by `T` when present.
    fn read_option_type(&mut self) -> Result<Option<Type>> {
        match self.read_u8()? {
            tag::OPTION_NONE => Ok(None),
            tag::OPTION_SOME => Ok(Some(self.read_type(0)?)),
            other => Err(self.malformed(format!("unknown option tag {other}"))),
        }
    }

    fn read_size_length(&mut self) -> Result<SizeLength> {
        let byte = self.read_u8()?;
        SizeLength::from_tag(byte)
            .ok_or_else(|| self.malformed(format!("unknown length-width tag {byte}")))
    }

    fn read_type(&mut self, depth: usize) -> Result<Type> {
        if depth >= MAX_TYPE_DEPTH {
            return Err(self.malformed(format!("type nesting exceeds depth limit {MAX_TYPE_DEPTH}")));
        }
        let ty = match self.read_u8()? {
            tag::UNIT => Type::Unit,
            tag::BOOL => Type::Bool,
            tag::U8 => Type::U8,
            tag::U16 => Type::U16,
            tag::U32 => Type::U32,
            tag::U64 => Type::U64,
            tag::I8 => Type::I8,
            tag::I16 => Type::I16,
            tag::I32 => Type::I32,
            tag::I64 => Type::I64,
            tag::AMOUNT => Type::Amount,
            tag::ACCOUNT_ADDRESS => Type::AccountAddress,
            tag::CONTRACT_ADDRESS => Type::ContractAddress,
            tag::TIMESTAMP => Type::Timestamp,
            tag::DURATION => Type::Duration,
            tag::PAIR => {
                let left = self.read_type(depth + 1)?;
                let right = self.read_type(depth + 1)?;
                Type::Pair(Box::new(left), Box::new(right))
            }
            tag::LIST => {
                let len = self.read_size_length()?;
                Type::List(len, Box::new(self.read_type(depth + 1)?))
            }
            tag::SET => {
                let len = self.read_size_length()?;
                Type::Set(len, Box::new(self.read_type(depth + 1)?))
            }
            tag::MAP => {
                let len = self.read_size_length()?;
                let key = self.read_type(depth + 1)?;
                let value = self.read_type(depth + 1)?;
                Type::Map(len, Box::new(key), Box::new(value))
            }
            tag::ARRAY => {
                let size = self.read_u32()?;
                Type::Array(size, Box::new(self.read_type(depth + 1)?))
            }
            tag::STRUCT => Type::Struct(self.read_fields(depth + 1)?),
            tag::ENUM => {
                let count = self.read_u32()?;
                if count as usize > crate::encode::MAX_ENUM_VARIANTS {
                    return Err(SerializationError::UnsupportedSchema(format!(
                        "enum with {count} variants exceeds the two-byte discriminant limit"
                    )));
                }
                let mut variants = Vec::new();
                for _ in 0..count {
                    let name = self.read_string()?;
                    let fields = self.read_fields(depth + 1)?;
                    variants.push((name, fields));
                }
                Type::Enum(variants)
            }
            tag::STRING => Type::String(self.read_size_length()?),
            tag::U128 => Type::U128,
            tag::I128 => Type::I128,
            tag::CONTRACT_NAME => Type::ContractName(self.read_size_length()?),
            tag::RECEIVE_NAME => Type::ReceiveName(self.read_size_length()?),
            other => return Err(self.malformed(format!("unknown type tag {other}"))),
        };
        Ok(ty)
    }

    fn read_fields(&mut self, depth: usize) -> Result<Fields> {
        match self.read_u8()? {
            tag::FIELDS_NAMED => {
                let count = self.read_u32()?;
                let mut fields = Vec::new();
                for _ in 0..count {
                    let name = self.read_string()?;
                    let ty = self.read_type(depth)?;
                    fields.push((name, ty));
                }
                Ok(Fields::Named(fields))
            }
            tag::FIELDS_UNNAMED => {
                let count = self.read_u32()?;
                let mut fields = Vec::new();
                for _ in 0..count {
                    fields.push(self.read_type(depth)?);
                }
                Ok(Fields::Unnamed(fields))
            }
            tag::FIELDS_NONE => Ok(Fields::None),
            other => Err(self.malformed(format!("unknown fields tag {other}"))),
        }
    }

    fn read_contract(&mut self) -> Result<Contract> {
        let state = self.read_option_type()?;
        let init = self.read_option_type()?;
        let count = self.read_u32()?;
        let mut receive = Vec::new();
        for _ in 0..count {
            let name = self.read_string()?;
            let ty = self.read_type(0)?;
            receive.push((name, ty));
        }
        Ok(Contract {
            state,
            init,
            receive,
        })
    }

    fn read_module(&mut self) -> Result<Module> {
        let count = self.read_u32()?;
        let mut contracts = Vec::new();
        for _ in 0..count {
            let name = self.read_string()?;
            let contract = self.read_contract()?;
            contracts.push((name, contract));
        }
        Ok(Module { contracts })
    }
}

impl Module {
    /// Decode a module schema from its binary representation.
    ///
    /// Trailing bytes after a well-formed module are ignored, matching the
    /// schema-export tool.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let module = Cursor::new(bytes).read_module()?;
        info!(contracts = module.len(), "decoded module schema");
        Ok(module)
    }

    /// Decode a module schema from its base64 encoding, the form the
    /// schema-export tool conventionally emits.
    #[cfg(feature = "base64")]
    pub fn from_base64(encoded: &str) -> Result<Self> {
        use base64::Engine as _;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| SerializationError::MalformedSchema {
                offset: 0,
                reason: format!("invalid base64: {e}"),
            })?;
        Self::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_module() {
        let module = Module::from_bytes(&[0, 0, 0, 0]).unwrap();
        assert!(module.is_empty());
    }

    #[test]
    fn test_truncated_module_is_malformed() {
        let err = Module::from_bytes(&[1, 0, 0]).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_unknown_type_tag_is_malformed() {
        // one contract named "c", no state, init = Some(tag 27)
        let bytes = [
            1, 0, 0, 0, // contract count
            1, 0, 0, 0, b'c', // name
            0, // state: absent
            1, 27, // init: present, bogus tag
        ];
        let err = Module::from_bytes(&bytes).unwrap_err();
        match err {
            SerializationError::MalformedSchema { reason, .. } => {
                assert!(reason.contains("unknown type tag 27"), "{reason}");
            }
            other => panic!("expected MalformedSchema, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8_contract_name_is_malformed() {
        let bytes = [1, 0, 0, 0, 1, 0, 0, 0, 0xff];
        let err = Module::from_bytes(&bytes).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_depth_limit_rejects_pair_tower() {
        // a contract whose init type is PAIR nested past the depth limit
        let mut bytes = vec![
            1, 0, 0, 0, // contract count
            1, 0, 0, 0, b'c', // name
            0, // state: absent
            1, // init: present
        ];
        for _ in 0..=MAX_TYPE_DEPTH {
            bytes.push(15); // Pair tag
        }
        let err = Module::from_bytes(&bytes).unwrap_err();
        match err {
            SerializationError::MalformedSchema { reason, .. } => {
                assert!(reason.contains("depth"), "{reason}");
            }
            other => panic!("expected MalformedSchema, got {other:?}"),
        }
    }

    #[test]
    fn test_trailing_bytes_are_ignored() {
        let module = Module::from_bytes(&[0, 0, 0, 0, 0xde, 0xad]).unwrap();
        assert!(module.is_empty());
    }
}
