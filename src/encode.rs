//! Encoding runtime values against schema types.
//!
//! [`encode_value`] is a recursive, type-directed walk: each schema
//! [`Type`] node selects the wire layout, and the supplied [`Value`] must
//! have a compatible shape. The first incompatibility aborts the whole
//! encode; no partial output is ever returned.

use crate::error::{Result, SerializationError};
use crate::schema::{Fields, SizeLength, Type};
use crate::types::Duration;
use crate::value::Value;

/// Enums with more variants than this cannot be addressed by the wire
/// format's two-byte discriminant.
pub(crate) const MAX_ENUM_VARIANTS: usize = 256 * 256;

/// Largest variant count still encoded with a single discriminant byte.
const ONE_BYTE_VARIANTS: usize = 256;

/// Encode `value` against the schema type `ty`, returning the exact wire
/// bytes the chain runtime expects.
pub fn encode_value(ty: &Type, value: &Value) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    serial_value(ty, value, &mut out)?;
    Ok(out)
}

fn serial_string(len: SizeLength, s: &str, out: &mut Vec<u8>) -> Result<()> {
    len.serial_count(s.len(), out)?;
    out.extend_from_slice(s.as_bytes());
    Ok(())
}

fn serial_value(ty: &Type, value: &Value, out: &mut Vec<u8>) -> Result<()> {
    match (ty, value) {
        // zero bytes regardless of the supplied value
        (Type::Unit, _) => {}
        (Type::Bool, Value::Bool(v)) => out.push(u8::from(*v)),
        (Type::U8, Value::U8(v)) => out.push(*v),
        (Type::U16, Value::U16(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (Type::U32, Value::U32(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (Type::U64, Value::U64(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (Type::I8, Value::I8(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (Type::I16, Value::I16(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (Type::I32, Value::I32(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (Type::I64, Value::I64(v)) => out.extend_from_slice(&v.to_le_bytes()),
        (Type::U128, Value::BigInt(big)) => {
            let v = u128::try_from(big).map_err(|_| {
                SerializationError::out_of_range("unsigned 128-bit integer", big)
            })?;
            out.extend_from_slice(&v.to_le_bytes());
        }
        (Type::I128, Value::BigInt(big)) => {
            let v = i128::try_from(big).map_err(|_| {
                SerializationError::out_of_range("signed 128-bit integer", big)
            })?;
            out.extend_from_slice(&v.to_le_bytes());
        }
        (Type::Amount, Value::Amount(v)) => v.serial(out),
        (Type::AccountAddress, Value::Account(v)) => v.serial(out),
        (Type::ContractAddress, Value::Contract(v)) => v.serial(out),
        (Type::Timestamp, Value::Timestamp(v)) => v.serial(out),
        (Type::Duration, Value::Duration(text)) => text.parse::<Duration>()?.serial(out),
        (Type::String(len), Value::String(s)) => serial_string(*len, s, out)?,
        (Type::List(len, elem), Value::Seq(items))
        | (Type::Set(len, elem), Value::Seq(items)) => {
            // elements go out in input order, even for sets
            len.serial_count(items.len(), out)?;
            for item in items {
                serial_value(elem, item, out)?;
            }
        }
        (Type::Array(size, elem), Value::Seq(items)) => {
            if items.len() != *size as usize {
                return Err(SerializationError::StructuralMismatch(format!(
                    "array expects exactly {size} elements, value has {}",
                    items.len()
                )));
            }
            for item in items {
                serial_value(elem, item, out)?;
            }
        }
        (Type::Pair(left, right), Value::Pair(a, b)) => {
            serial_value(left, a, out)?;
            serial_value(right, b, out)?;
        }
        (Type::Map(len, key_ty, value_ty), Value::Map(entries)) => {
            // entries go out in input iteration order, not sorted by key
            len.serial_count(entries.len(), out)?;
            for (key, val) in entries {
                serial_value(key_ty, key, out)?;
                serial_value(value_ty, val, out)?;
            }
        }
        (Type::Struct(fields), value) => serial_fields(fields, value, out)?,
        (Type::Enum(variants), Value::Variant { name, payload }) => {
            let (index, fields) = variants
                .iter()
                .enumerate()
                .find_map(|(i, (variant, fields))| (variant == name).then_some((i, fields)))
                .ok_or_else(|| {
                    SerializationError::StructuralMismatch(format!(
                        "enum has no variant named '{name}'"
                    ))
                })?;
            if variants.len() <= ONE_BYTE_VARIANTS {
                out.push(index as u8);
            } else if variants.len() <= MAX_ENUM_VARIANTS {
                out.extend_from_slice(&(index as u16).to_le_bytes());
            } else {
                return Err(SerializationError::UnsupportedSchema(format!(
                    "enum with {} variants exceeds the two-byte discriminant limit",
                    variants.len()
                )));
            }
            serial_fields(fields, payload, out)?;
        }
        (Type::ContractName(len), Value::ContractName { contract }) => {
            serial_string(*len, &format!("init_{contract}"), out)?;
        }
        (Type::ReceiveName(len), Value::ReceiveName { contract, func }) => {
            serial_string(*len, &format!("{contract}.{func}"), out)?;
        }
        (ty, value) => {
            return Err(SerializationError::mismatch(ty.describe(), value));
        }
    }
    Ok(())
}

fn serial_fields(fields: &Fields, value: &Value, out: &mut Vec<u8>) -> Result<()> {
    match (fields, value) {
        // no fields means no bytes; the value shape is not inspected
        (Fields::None, _) => Ok(()),
        (Fields::Named(schema_fields), Value::Record(members)) => {
            if members.len() != schema_fields.len() {
                return Err(SerializationError::StructuralMismatch(format!(
                    "expected {} named fields, value has {}",
                    schema_fields.len(),
                    members.len()
                )));
            }
            // schema order governs the output, not member declaration order
            for (name, field_ty) in schema_fields {
                let member = members
                    .iter()
                    .find(|(member_name, _)| member_name == name)
                    .map(|(_, value)| value)
                    .ok_or_else(|| {
                        SerializationError::StructuralMismatch(format!(
                            "value is missing field '{name}'"
                        ))
                    })?;
                serial_value(field_ty, member, out)?;
            }
            Ok(())
        }
        (Fields::Unnamed(schema_fields), Value::Seq(items)) => {
            if items.len() != schema_fields.len() {
                return Err(SerializationError::StructuralMismatch(format!(
                    "expected {} unnamed fields, value has {}",
                    schema_fields.len(),
                    items.len()
                )));
            }
            for (field_ty, item) in schema_fields.iter().zip(items) {
                serial_value(field_ty, item, out)?;
            }
            Ok(())
        }
        (Fields::Named(_), value) => Err(SerializationError::mismatch(
            "record with named fields",
            value,
        )),
        (Fields::Unnamed(_), value) => Err(SerializationError::mismatch(
            "sequence of unnamed fields",
            value,
        )),
    }
}
