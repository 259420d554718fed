//! Interchange JSON deserialization into a [`Module`].
//!
//! A module object carries module-level `values` (constants, globals,
//! arguments, composites -- everything that belongs to no function body)
//! and `functions`, each listing its operations in program order.
//! Operand references are by value id and may point forward, so loading
//! is two-pass: declare every value first, then wire operands. Back
//! edges (phi-style cycles) need no special handling.

use crate::error::ModuleError;
use crate::module::{Module, ValueId};
use std::collections::HashMap;

/// Deserialize an interchange JSON module.
pub fn load_module(json: &serde_json::Value) -> Result<Module, ModuleError> {
    let module_id = json
        .get("id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ModuleError::InvalidModule("missing 'id'".to_string()))?;

    let functions = json
        .get("functions")
        .and_then(|f| f.as_array())
        .ok_or_else(|| {
            ModuleError::InvalidModule("missing or invalid 'functions' array".to_string())
        })?;

    let module_values = json
        .get("values")
        .and_then(|v| v.as_array())
        .map(|arr| arr.as_slice())
        .unwrap_or(&[]);

    let mut module = Module::new(module_id);
    let mut by_name: HashMap<String, ValueId> = HashMap::new();
    // (value, declared id, operand ids) collected in pass 1, wired in pass 2.
    let mut pending: Vec<(ValueId, String, Vec<String>)> = Vec::new();

    // Pass 1a: module-level values.
    for obj in module_values {
        declare_value(&mut module, None, obj, &mut by_name, &mut pending)?;
    }

    // Pass 1b: functions and their operations.
    for fobj in functions {
        let fid = fobj
            .get("id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ModuleError::InvalidModule("function missing 'id'".to_string()))?;
        let function = module.add_function(fid);

        let values = fobj
            .get("values")
            .and_then(|v| v.as_array())
            .map(|arr| arr.as_slice())
            .unwrap_or(&[]);
        for obj in values {
            declare_value(&mut module, Some(function), obj, &mut by_name, &mut pending)?;
        }
    }

    // Pass 2: wire operands now that every id is known.
    for (value, name, operand_names) in pending {
        let mut operands = Vec::with_capacity(operand_names.len());
        for operand in &operand_names {
            let id = by_name
                .get(operand)
                .copied()
                .ok_or_else(|| ModuleError::UnknownOperand {
                    value: name.clone(),
                    operand: operand.clone(),
                })?;
            operands.push(id);
        }
        module.set_operands(value, operands);
    }

    Ok(module)
}

/// Create one value's arena node (operands deferred to pass 2) and
/// record its id. `function` is Some for operation positions inside a
/// function body, None for module-level values.
fn declare_value(
    module: &mut Module,
    function: Option<usize>,
    obj: &serde_json::Value,
    by_name: &mut HashMap<String, ValueId>,
    pending: &mut Vec<(ValueId, String, Vec<String>)>,
) -> Result<(), ModuleError> {
    let id = obj
        .get("id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ModuleError::InvalidModule("value missing 'id'".to_string()))?
        .to_string();
    let kind = required_str(obj, "kind", &id)?;

    let (value, operand_names) = match (kind.as_str(), function) {
        ("op", Some(f)) => {
            let opcode = required_str(obj, "opcode", &id)?;
            (module.add_op(f, opcode, &[]), string_list(obj, "operands"))
        }
        ("call", Some(f)) => {
            let callee = required_str(obj, "callee", &id)?;
            (
                module.add_call(f, callee, &[]),
                string_list(obj, "operands"),
            )
        }
        ("op", None) | ("call", None) => {
            return Err(ModuleError::InvalidModule(format!(
                "operation '{}' declared outside a function",
                id
            )));
        }
        ("const", _) => {
            let literal = obj
                .get("literal")
                .cloned()
                .unwrap_or(serde_json::Value::Null);
            (module.add_const(literal), Vec::new())
        }
        ("global", _) => {
            let name = required_str(obj, "name", &id)?;
            (module.add_global(name), Vec::new())
        }
        ("arg", _) => {
            let index = obj
                .get("index")
                .and_then(|v| v.as_u64())
                .ok_or_else(|| ModuleError::MissingField {
                    value: id.clone(),
                    field: "index".to_string(),
                })? as u32;
            (module.add_argument(index), Vec::new())
        }
        ("composite", _) => (module.add_composite(&[]), string_list(obj, "elements")),
        (other, _) => {
            return Err(ModuleError::UnknownKind {
                value: id,
                kind: other.to_string(),
            });
        }
    };

    module.set_name(value, &id);
    if by_name.insert(id.clone(), value).is_some() {
        return Err(ModuleError::DuplicateValue(id));
    }
    if !operand_names.is_empty() {
        pending.push((value, id, operand_names));
    }
    Ok(())
}

/// Extract a required string field from a value object.
fn required_str(
    obj: &serde_json::Value,
    field: &str,
    value_id: &str,
) -> Result<String, ModuleError> {
    obj.get(field)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| ModuleError::MissingField {
            value: value_id.to_string(),
            field: field.to_string(),
        })
}

/// Extract an optional list of strings (absent means empty).
fn string_list(obj: &serde_json::Value, field: &str) -> Vec<String> {
    obj.get(field)
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default()
}
