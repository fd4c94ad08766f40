//! Building parameter values from JSON, directed by the schema.
//!
//! JSON is the interchange form the surrounding tooling speaks, but it is
//! not self-describing enough for the wire format (no 128-bit numbers, no
//! byte arrays, no variant tags), so conversion is driven by the schema
//! [`Type`] node the value is destined for. The resulting [`Value`] is then
//! encoded as usual; conversion failures use the same error taxonomy.
//!
//! Conventions:
//!
//! - 128-bit integers and amounts may be given as decimal strings.
//! - Account addresses are 32-element byte arrays.
//! - Contract addresses are `{"index": n, "subindex": n}` objects
//!   (`subindex` defaults to 0).
//! - Maps are arrays of `[key, value]` arrays, preserving entry order.
//! - Enum variants are single-member objects `{"VariantName": fields}`.

use num_bigint::BigInt;

use crate::error::{Result, SerializationError};
use crate::schema::{Fields, Type};
use crate::types::{AccountAddress, Amount, ContractAddress, Timestamp};
use crate::value::Value;

use serde_json::Value as Json;

/// Convert a JSON value into a parameter [`Value`] shaped for the schema
/// type `ty`.
pub fn from_json(ty: &Type, json: &Json) -> Result<Value> {
    let value = match (ty, json) {
        (Type::Unit, Json::Null) => Value::Unit,
        (Type::Bool, Json::Bool(v)) => Value::Bool(*v),
        (Type::U8, _) => Value::U8(unsigned(ty, json)?),
        (Type::U16, _) => Value::U16(unsigned(ty, json)?),
        (Type::U32, _) => Value::U32(unsigned(ty, json)?),
        (Type::U64, _) => Value::U64(unsigned(ty, json)?),
        (Type::I8, _) => Value::I8(signed(ty, json)?),
        (Type::I16, _) => Value::I16(signed(ty, json)?),
        (Type::I32, _) => Value::I32(signed(ty, json)?),
        (Type::I64, _) => Value::I64(signed(ty, json)?),
        (Type::U128 | Type::I128, _) => Value::BigInt(big_integer(ty, json)?),
        (Type::Amount, _) => {
            let micro_ccd = match json {
                Json::String(s) => s.parse::<u64>().ok(),
                _ => json.as_u64(),
            }
            .ok_or_else(|| {
                SerializationError::mismatch("amount in micro-CCD (number or decimal string)", json)
            })?;
            Value::Amount(Amount::from_micro_ccd(micro_ccd))
        }
        (Type::AccountAddress, Json::Array(elements)) => {
            if elements.len() != AccountAddress::BYTES {
                return Err(SerializationError::StructuralMismatch(format!(
                    "account address expects {} bytes, value has {}",
                    AccountAddress::BYTES,
                    elements.len()
                )));
            }
            let mut bytes = [0u8; AccountAddress::BYTES];
            for (slot, element) in bytes.iter_mut().zip(elements) {
                *slot = element
                    .as_u64()
                    .and_then(|b| u8::try_from(b).ok())
                    .ok_or_else(|| SerializationError::mismatch("byte in 0..=255", element))?;
            }
            Value::Account(AccountAddress::from_bytes(bytes))
        }
        (Type::ContractAddress, Json::Object(members)) => {
            let index = members
                .get("index")
                .and_then(Json::as_u64)
                .ok_or_else(|| {
                    SerializationError::mismatch("contract address with an 'index' member", json)
                })?;
            let subindex = match members.get("subindex") {
                Some(subindex) => subindex.as_u64().ok_or_else(|| {
                    SerializationError::mismatch("unsigned 'subindex' member", subindex)
                })?,
                None => 0,
            };
            Value::Contract(ContractAddress::new(index, subindex))
        }
        (Type::Timestamp, _) => {
            let millis = json.as_i64().ok_or_else(|| {
                SerializationError::mismatch("timestamp in milliseconds since the epoch", json)
            })?;
            Value::Timestamp(Timestamp::from_timestamp_millis(millis))
        }
        (Type::Duration, Json::String(text)) => Value::Duration(text.clone()),
        (Type::String(_), Json::String(s)) => Value::String(s.clone()),
        (Type::List(_, elem), Json::Array(elements))
        | (Type::Set(_, elem), Json::Array(elements))
        | (Type::Array(_, elem), Json::Array(elements)) => {
            let items = elements
                .iter()
                .map(|element| from_json(elem, element))
                .collect::<Result<Vec<_>>>()?;
            Value::Seq(items)
        }
        (Type::Pair(left, right), Json::Array(elements)) => match elements.as_slice() {
            [a, b] => Value::pair(from_json(left, a)?, from_json(right, b)?),
            _ => {
                return Err(SerializationError::StructuralMismatch(format!(
                    "pair expects exactly 2 elements, value has {}",
                    elements.len()
                )));
            }
        },
        (Type::Map(_, key_ty, value_ty), Json::Array(entries)) => {
            let entries = entries
                .iter()
                .map(|entry| match entry {
                    Json::Array(pair) => match pair.as_slice() {
                        [key, value] => Ok((from_json(key_ty, key)?, from_json(value_ty, value)?)),
                        _ => Err(SerializationError::mismatch("[key, value] entry", entry)),
                    },
                    _ => Err(SerializationError::mismatch("[key, value] entry", entry)),
                })
                .collect::<Result<Vec<_>>>()?;
            Value::Map(entries)
        }
        (Type::Struct(fields), json) => fields_from_json(fields, json)?,
        (Type::Enum(variants), Json::Object(members)) => {
            let mut members = members.iter();
            let (name, payload) = match (members.next(), members.next()) {
                (Some(member), None) => member,
                _ => {
                    return Err(SerializationError::mismatch(
                        "single-member object selecting an enum variant",
                        json,
                    ));
                }
            };
            let fields = variants
                .iter()
                .find_map(|(variant, fields)| (variant == name).then_some(fields))
                .ok_or_else(|| {
                    SerializationError::StructuralMismatch(format!(
                        "enum has no variant named '{name}'"
                    ))
                })?;
            Value::variant(name.clone(), fields_from_json(fields, payload)?)
        }
        (Type::ContractName(_), Json::Object(members)) => {
            let contract = required_string(members, "contract")?;
            Value::contract_name(contract)
        }
        (Type::ReceiveName(_), Json::Object(members)) => {
            let contract = required_string(members, "contract")?;
            let func = required_string(members, "func")?;
            Value::receive_name(contract, func)
        }
        (ty, json) => return Err(SerializationError::mismatch(ty.describe(), json)),
    };
    Ok(value)
}

fn fields_from_json(fields: &Fields, json: &Json) -> Result<Value> {
    match (fields, json) {
        (Fields::None, Json::Null) => Ok(Value::Unit),
        (Fields::None, Json::Array(elements)) if elements.is_empty() => Ok(Value::Unit),
        (Fields::Named(schema_fields), Json::Object(members)) => {
            if members.len() != schema_fields.len() {
                return Err(SerializationError::StructuralMismatch(format!(
                    "expected {} named fields, value has {}",
                    schema_fields.len(),
                    members.len()
                )));
            }
            let record = schema_fields
                .iter()
                .map(|(name, field_ty)| {
                    let member = members.get(name).ok_or_else(|| {
                        SerializationError::StructuralMismatch(format!(
                            "value is missing field '{name}'"
                        ))
                    })?;
                    Ok((name.clone(), from_json(field_ty, member)?))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::Record(record))
        }
        (Fields::Unnamed(schema_fields), Json::Array(elements)) => {
            if elements.len() != schema_fields.len() {
                return Err(SerializationError::StructuralMismatch(format!(
                    "expected {} unnamed fields, value has {}",
                    schema_fields.len(),
                    elements.len()
                )));
            }
            let items = schema_fields
                .iter()
                .zip(elements)
                .map(|(field_ty, element)| from_json(field_ty, element))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::Seq(items))
        }
        (Fields::None, json) => Err(SerializationError::mismatch("no fields", json)),
        (Fields::Named(_), json) => Err(SerializationError::mismatch(
            "object with named fields",
            json,
        )),
        (Fields::Unnamed(_), json) => Err(SerializationError::mismatch(
            "array of unnamed fields",
            json,
        )),
    }
}

fn required_string(members: &serde_json::Map<String, Json>, name: &str) -> Result<String> {
    members
        .get(name)
        .and_then(Json::as_str)
        .map(str::to_owned)
        .ok_or_else(|| {
            SerializationError::StructuralMismatch(format!(
                "value is missing string member '{name}'"
            ))
        })
}

fn unsigned<T: TryFrom<u64>>(ty: &Type, json: &Json) -> Result<T> {
    json.as_u64()
        .and_then(|v| T::try_from(v).ok())
        .ok_or_else(|| SerializationError::mismatch(ty.describe(), json))
}

fn signed<T: TryFrom<i64>>(ty: &Type, json: &Json) -> Result<T> {
    json.as_i64()
        .and_then(|v| T::try_from(v).ok())
        .ok_or_else(|| SerializationError::mismatch(ty.describe(), json))
}

fn big_integer(ty: &Type, json: &Json) -> Result<BigInt> {
    match json {
        Json::String(s) => s.parse::<BigInt>().ok(),
        Json::Number(_) => json
            .as_i64()
            .map(BigInt::from)
            .or_else(|| json.as_u64().map(BigInt::from)),
        _ => None,
    }
    .ok_or_else(|| SerializationError::mismatch(ty.describe(), json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_value;
    use crate::schema::SizeLength;
    use serde_json::json;

    #[test]
    fn test_struct_from_json() {
        let ty = Type::Struct(Fields::Named(vec![
            ("amount".into(), Type::U64),
            ("memo".into(), Type::String(SizeLength::U8)),
        ]));
        let value = from_json(&ty, &json!({"amount": 100, "memo": "hi"})).unwrap();
        let bytes = encode_value(&ty, &value).unwrap();
        assert_eq!(bytes, [100, 0, 0, 0, 0, 0, 0, 0, 2, b'h', b'i']);
    }

    #[test]
    fn test_u128_from_decimal_string() {
        let value = from_json(&Type::U128, &json!("340282366920938463463374607431768211455"))
            .unwrap();
        let bytes = encode_value(&Type::U128, &value).unwrap();
        assert_eq!(bytes, [0xff; 16]);
    }

    #[test]
    fn test_enum_variant_from_single_member_object() {
        let ty = Type::Enum(vec![
            ("Accept".into(), Fields::None),
            ("Reject".into(), Fields::Unnamed(vec![Type::U8])),
        ]);
        let value = from_json(&ty, &json!({"Reject": [7]})).unwrap();
        assert_eq!(encode_value(&ty, &value).unwrap(), vec![1, 7]);
    }

    #[test]
    fn test_map_preserves_entry_order() {
        let ty = Type::Map(
            SizeLength::U8,
            Box::new(Type::U8),
            Box::new(Type::Bool),
        );
        let value = from_json(&ty, &json!([[9, true], [1, false]])).unwrap();
        assert_eq!(encode_value(&ty, &value).unwrap(), vec![2, 9, 1, 1, 0]);
    }

    #[test]
    fn test_out_of_range_number_is_rejected() {
        let err = from_json(&Type::U8, &json!(300)).unwrap_err();
        assert!(matches!(err, SerializationError::TypeMismatch { .. }));
    }

    #[test]
    fn test_contract_address_defaults_subindex() {
        let value = from_json(&Type::ContractAddress, &json!({"index": 10})).unwrap();
        assert_eq!(
            value,
            Value::Contract(ContractAddress::new(10, 0))
        );
    }
}
