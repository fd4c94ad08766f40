//! Entry points for encoding init and update parameters.
//!
//! These look up the governing type in a decoded [`Module`] schema and
//! delegate to the value encoder. The resulting [`Parameter`] bytes are
//! what a transaction builder embeds in an init or update payload.

use crate::encode::encode_value;
use crate::error::{Result, SerializationError};
use crate::logging::{debug, warn};
use crate::schema::{Module, Type};
use crate::value::Value;

/// Serialized parameter bytes for an init or update transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parameter(Vec<u8>);

impl Parameter {
    /// The raw parameter bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the parameter, yielding the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Number of bytes in the parameter.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the parameter carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for Parameter {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Parameter> for Vec<u8> {
    fn from(parameter: Parameter) -> Self {
        parameter.0
    }
}

fn lookup_contract<'a>(module: &'a Module, contract_name: &str) -> Result<&'a crate::schema::Contract> {
    module.contract(contract_name).ok_or_else(|| {
        warn!(contract = contract_name, "contract not present in module schema");
        SerializationError::SchemaNotFound(format!("contract '{contract_name}'"))
    })
}

/// Encode `value` as the init parameter of `contract_name`.
///
/// A contract without a declared init parameter type accepts only the unit
/// parameter, which encodes to zero bytes.
pub fn encode_init_parameter(
    module: &Module,
    contract_name: &str,
    value: &Value,
) -> Result<Parameter> {
    let contract = lookup_contract(module, contract_name)?;
    debug!(contract = contract_name, "encoding init parameter");
    let init_type = contract.init.as_ref().unwrap_or(&Type::Unit);
    encode_value(init_type, value).map(Parameter)
}

/// Encode `value` as the parameter of the receive function `entry_point`
/// on `contract_name`.
pub fn encode_update_parameter(
    module: &Module,
    contract_name: &str,
    entry_point: &str,
    value: &Value,
) -> Result<Parameter> {
    let contract = lookup_contract(module, contract_name)?;
    let receive_type = contract.receive_type(entry_point).ok_or_else(|| {
        warn!(
            contract = contract_name,
            entry_point = entry_point,
            "entry point not present in contract schema"
        );
        SerializationError::SchemaNotFound(format!(
            "entry point '{contract_name}.{entry_point}'"
        ))
    })?;
    debug!(
        contract = contract_name,
        entry_point = entry_point,
        "encoding update parameter"
    );
    encode_value(receive_type, value).map(Parameter)
}
