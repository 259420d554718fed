//! Canonical interchange JSON serialization -- arena-ordered values,
//! sorted keys, byte-stable across runs.

use crate::marks::MarkTable;
use crate::module::{Module, Node, Opcode, ValueId};
use serde_json::{Map, Value};

/// Serialize a module to interchange JSON, without marks.
pub fn to_interchange(module: &Module) -> Value {
    serialize(module, None)
}

/// Serialize a module with every operation carrying its
/// `"verifier_code"` attribute from a completed mark table.
pub fn to_marked_interchange(module: &Module, marks: &MarkTable) -> Value {
    serialize(module, Some(marks))
}

fn serialize(module: &Module, marks: Option<&MarkTable>) -> Value {
    let mut module_values: Vec<Value> = Vec::new();
    for value in module.values() {
        if !module.node(value).is_op() {
            module_values.push(serialize_value(module, value, marks));
        }
    }

    let mut functions: Vec<Value> = Vec::new();
    for function in module.functions() {
        let body: Vec<Value> = function
            .body
            .iter()
            .map(|&op| serialize_value(module, op, marks))
            .collect();

        let mut fobj = Map::new();
        fobj.insert("id".to_owned(), Value::String(function.id.clone()));
        fobj.insert("kind".to_owned(), Value::String("Function".to_owned()));
        fobj.insert("values".to_owned(), Value::Array(body));
        functions.push(Value::Object(fobj));
    }

    let mut obj = Map::new();
    obj.insert("functions".to_owned(), Value::Array(functions));
    obj.insert("id".to_owned(), Value::String(module.id.clone()));
    obj.insert("kind".to_owned(), Value::String("Module".to_owned()));
    obj.insert("values".to_owned(), Value::Array(module_values));
    Value::Object(obj)
}

fn serialize_value(module: &Module, value: ValueId, marks: Option<&MarkTable>) -> Value {
    let mut obj = Map::new();

    match module.node(value) {
        Node::Op(op) => {
            match &op.opcode {
                Opcode::Call { callee } => {
                    obj.insert("callee".to_owned(), Value::String(callee.clone()));
                    obj.insert("id".to_owned(), Value::String(module.name(value).to_owned()));
                    obj.insert("kind".to_owned(), Value::String("call".to_owned()));
                }
                Opcode::Plain(opcode) => {
                    obj.insert("id".to_owned(), Value::String(module.name(value).to_owned()));
                    obj.insert("kind".to_owned(), Value::String("op".to_owned()));
                    obj.insert("opcode".to_owned(), Value::String(opcode.clone()));
                }
            }
            obj.insert(
                "operands".to_owned(),
                Value::Array(id_list(module, &op.operands)),
            );
            if let Some(marks) = marks {
                if let Some(mark) = marks.mark_of(value) {
                    obj.insert("verifier_code".to_owned(), Value::Bool(mark));
                }
            }
        }
        Node::Const(literal) => {
            obj.insert("id".to_owned(), Value::String(module.name(value).to_owned()));
            obj.insert("kind".to_owned(), Value::String("const".to_owned()));
            obj.insert("literal".to_owned(), literal.clone());
        }
        Node::Global(name) => {
            obj.insert("id".to_owned(), Value::String(module.name(value).to_owned()));
            obj.insert("kind".to_owned(), Value::String("global".to_owned()));
            obj.insert("name".to_owned(), Value::String(name.clone()));
        }
        Node::Argument { index } => {
            obj.insert("id".to_owned(), Value::String(module.name(value).to_owned()));
            obj.insert("index".to_owned(), Value::from(*index));
            obj.insert("kind".to_owned(), Value::String("arg".to_owned()));
        }
        Node::Composite { elements } => {
            obj.insert(
                "elements".to_owned(),
                Value::Array(id_list(module, elements)),
            );
            obj.insert("id".to_owned(), Value::String(module.name(value).to_owned()));
            obj.insert("kind".to_owned(), Value::String("composite".to_owned()));
        }
    }

    Value::Object(obj)
}

fn id_list(module: &Module, ids: &[ValueId]) -> Vec<Value> {
    ids.iter()
        .map(|&id| Value::String(module.name(id).to_owned()))
        .collect()
}
