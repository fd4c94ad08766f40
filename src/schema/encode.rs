//! Re-serializing a type tree back into schema bytes.
//!
//! The writer is the exact inverse of the decoder: a decoded [`Module`]
//! re-serializes to the original bytes. It is mainly useful for persisting
//! or forwarding a schema without keeping the raw input around, and for
//! checking decoder fidelity.

use crate::error::{Result, SerializationError};

use super::types::{Contract, Fields, Module, Type, tag};

fn write_u32_count(count: usize, out: &mut Vec<u8>) -> Result<()> {
    let count = u32::try_from(count)
        .map_err(|_| SerializationError::out_of_range("u32 count prefix", count))?;
    out.extend_from_slice(&count.to_le_bytes());
    Ok(())
}

fn write_string(s: &str, out: &mut Vec<u8>) -> Result<()> {
    write_u32_count(s.len(), out)?;
    out.extend_from_slice(s.as_bytes());
    Ok(())
}

fn write_fields(fields: &Fields, out: &mut Vec<u8>) -> Result<()> {
    match fields {
        Fields::Named(named) => {
            out.push(tag::FIELDS_NAMED);
            write_u32_count(named.len(), out)?;
            for (name, ty) in named {
                write_string(name, out)?;
                write_type(ty, out)?;
            }
        }
        Fields::Unnamed(unnamed) => {
            out.push(tag::FIELDS_UNNAMED);
            write_u32_count(unnamed.len(), out)?;
            for ty in unnamed {
                write_type(ty, out)?;
            }
        }
        Fields::None => out.push(tag::FIELDS_NONE),
    }
    Ok(())
}

fn write_type(ty: &Type, out: &mut Vec<u8>) -> Result<()> {
    match ty {
        Type::Unit => out.push(tag::UNIT),
        Type::Bool => out.push(tag::BOOL),
        Type::U8 => out.push(tag::U8),
        Type::U16 => out.push(tag::U16),
        Type::U32 => out.push(tag::U32),
        Type::U64 => out.push(tag::U64),
        Type::U128 => out.push(tag::U128),
        Type::I8 => out.push(tag::I8),
        Type::I16 => out.push(tag::I16),
        Type::I32 => out.push(tag::I32),
        Type::I64 => out.push(tag::I64),
        Type::I128 => out.push(tag::I128),
        Type::Amount => out.push(tag::AMOUNT),
        Type::AccountAddress => out.push(tag::ACCOUNT_ADDRESS),
        Type::ContractAddress => out.push(tag::CONTRACT_ADDRESS),
        Type::Timestamp => out.push(tag::TIMESTAMP),
        Type::Duration => out.push(tag::DURATION),
        Type::Pair(left, right) => {
            out.push(tag::PAIR);
            write_type(left, out)?;
            write_type(right, out)?;
        }
        Type::List(len, elem) => {
            out.push(tag::LIST);
            out.push(len.to_tag());
            write_type(elem, out)?;
        }
        Type::Set(len, elem) => {
            out.push(tag::SET);
            out.push(len.to_tag());
            write_type(elem, out)?;
        }
        Type::Map(len, key, value) => {
            out.push(tag::MAP);
            out.push(len.to_tag());
            write_type(key, out)?;
            write_type(value, out)?;
        }
        Type::Array(size, elem) => {
            out.push(tag::ARRAY);
            out.extend_from_slice(&size.to_le_bytes());
            write_type(elem, out)?;
        }
        Type::Struct(fields) => {
            out.push(tag::STRUCT);
            write_fields(fields, out)?;
        }
        Type::Enum(variants) => {
            out.push(tag::ENUM);
            write_u32_count(variants.len(), out)?;
            for (name, fields) in variants {
                write_string(name, out)?;
                write_fields(fields, out)?;
            }
        }
        Type::String(len) => {
            out.push(tag::STRING);
            out.push(len.to_tag());
        }
        Type::ContractName(len) => {
            out.push(tag::CONTRACT_NAME);
            out.push(len.to_tag());
        }
        Type::ReceiveName(len) => {
            out.push(tag::RECEIVE_NAME);
            out.push(len.to_tag());
        }
    }
    Ok(())
}

fn write_option_type(ty: &Option<Type>, out: &mut Vec<u8>) -> Result<()> {
    match ty {
        None => out.push(tag::OPTION_NONE),
        Some(ty) => {
            out.push(tag::OPTION_SOME);
            write_type(ty, out)?;
        }
    }
    Ok(())
}

fn write_contract(contract: &Contract, out: &mut Vec<u8>) -> Result<()> {
    write_option_type(&contract.state, out)?;
    write_option_type(&contract.init, out)?;
    write_u32_count(contract.receive.len(), out)?;
    for (name, ty) in &contract.receive {
        write_string(name, out)?;
        write_type(ty, out)?;
    }
    Ok(())
}

impl Module {
    /// Serialize this module back into schema bytes. Decoding the result
    /// with [`Module::from_bytes`] yields an identical tree.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        write_u32_count(self.contracts.len(), &mut out)?;
        for (name, contract) in &self.contracts {
            write_string(name, &mut out)?;
            write_contract(contract, &mut out)?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SizeLength;

    #[test]
    fn test_roundtrip_preserves_bytes() {
        let module = Module {
            contracts: vec![(
                "auction".into(),
                Contract {
                    state: None,
                    init: Some(Type::Struct(Fields::Named(vec![(
                        "item".into(),
                        Type::String(SizeLength::U16),
                    )]))),
                    receive: vec![
                        ("bid".into(), Type::Amount),
                        (
                            "close".into(),
                            Type::Enum(vec![
                                ("Early".into(), Fields::None),
                                ("Final".into(), Fields::Unnamed(vec![Type::U64])),
                            ]),
                        ),
                    ],
                },
            )],
        };
        let bytes = module.to_bytes().unwrap();
        let decoded = Module::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, module);
        assert_eq!(decoded.to_bytes().unwrap(), bytes);
    }
}
