//! The IR data model -- an index-addressed value arena with derived
//! consumer edges.
//!
//! Every value in a module (operation results, constants, globals,
//! arguments, composites) occupies one arena slot and is referenced by
//! [`ValueId`]. Operand (backward) edges are stored on each node;
//! consumer (forward) edges are derived as operands are wired and kept
//! in a parallel list, so the classifier can walk either direction
//! without a separate indexing pass.

use serde::Serialize;

/// Index of a value in the module arena. All cross-references between
/// values (operands, users) are `ValueId`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ValueId(u32);

impl ValueId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Operation discriminant: the classifier only distinguishes calls
/// (classified by callee name) from every other operation kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Opcode {
    /// A call to a named function.
    Call { callee: String },
    /// Any non-call operation (add, load, phi, ...). The opcode string
    /// is carried for serialization and diagnostics only.
    Plain(String),
}

impl Opcode {
    pub fn is_call(&self) -> bool {
        matches!(self, Opcode::Call { .. })
    }
}

/// An operation node: one computation step in the dependency graph.
#[derive(Debug, Clone, Serialize)]
pub struct Operation {
    pub opcode: Opcode,
    pub operands: Vec<ValueId>,
}

/// One arena slot: an operation or a non-operation value.
///
/// Non-operation values carry no verifier-mark of their own; the
/// classifier passes through them to their consumers. `Composite` is the
/// one non-operation kind with inputs -- an opaque value built from
/// other values (constant-expression-like intermediaries, merge points).
#[derive(Debug, Clone, Serialize)]
pub enum Node {
    Op(Operation),
    Const(serde_json::Value),
    Global(String),
    Argument { index: u32 },
    Composite { elements: Vec<ValueId> },
}

impl Node {
    pub fn is_op(&self) -> bool {
        matches!(self, Node::Op(_))
    }

    pub fn as_op(&self) -> Option<&Operation> {
        match self {
            Node::Op(op) => Some(op),
            _ => None,
        }
    }

    /// The node's data-dependency inputs. Empty for leaf values.
    pub fn operands(&self) -> &[ValueId] {
        match self {
            Node::Op(op) => &op.operands,
            Node::Composite { elements } => elements,
            _ => &[],
        }
    }
}

/// A function: its operations in program order. Non-operation values
/// live in the module arena but in no body.
#[derive(Debug, Clone, Serialize)]
pub struct Function {
    pub id: String,
    pub body: Vec<ValueId>,
}

/// An IR module: the value arena, the functions over it, and the derived
/// consumer edges.
#[derive(Debug, Clone)]
pub struct Module {
    pub id: String,
    functions: Vec<Function>,
    nodes: Vec<Node>,
    /// Interchange ids parallel to `nodes`, kept for serialization and
    /// diagnostics.
    names: Vec<String>,
    /// Consumer edges parallel to `nodes`: users[v] lists every node
    /// that has v as an operand, in wiring order.
    users: Vec<Vec<ValueId>>,
}

impl Module {
    pub fn new(id: impl Into<String>) -> Self {
        Module {
            id: id.into(),
            functions: Vec::new(),
            nodes: Vec::new(),
            names: Vec::new(),
            users: Vec::new(),
        }
    }

    /// Declare a function; returns its index for `add_op`/`add_call`.
    pub fn add_function(&mut self, id: impl Into<String>) -> usize {
        self.functions.push(Function {
            id: id.into(),
            body: Vec::new(),
        });
        self.functions.len() - 1
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    fn push(&mut self, name: Option<String>, node: Node) -> ValueId {
        let id = ValueId(self.nodes.len() as u32);
        let name = name.unwrap_or_else(|| format!("v{}", id.0));
        for &operand in node.operands() {
            self.users[operand.index()].push(id);
        }
        self.nodes.push(node);
        self.names.push(name);
        self.users.push(Vec::new());
        id
    }

    pub fn add_const(&mut self, literal: serde_json::Value) -> ValueId {
        self.push(None, Node::Const(literal))
    }

    pub fn add_global(&mut self, name: impl Into<String>) -> ValueId {
        self.push(None, Node::Global(name.into()))
    }

    pub fn add_argument(&mut self, index: u32) -> ValueId {
        self.push(None, Node::Argument { index })
    }

    pub fn add_composite(&mut self, elements: &[ValueId]) -> ValueId {
        self.push(
            None,
            Node::Composite {
                elements: elements.to_vec(),
            },
        )
    }

    /// Append a non-call operation to a function body.
    pub fn add_op(&mut self, function: usize, opcode: impl Into<String>, operands: &[ValueId]) -> ValueId {
        let id = self.push(
            None,
            Node::Op(Operation {
                opcode: Opcode::Plain(opcode.into()),
                operands: operands.to_vec(),
            }),
        );
        self.functions[function].body.push(id);
        id
    }

    /// Append a call operation to a function body.
    pub fn add_call(&mut self, function: usize, callee: impl Into<String>, operands: &[ValueId]) -> ValueId {
        let id = self.push(
            None,
            Node::Op(Operation {
                opcode: Opcode::Call {
                    callee: callee.into(),
                },
                operands: operands.to_vec(),
            }),
        );
        self.functions[function].body.push(id);
        id
    }

    pub(crate) fn set_name(&mut self, value: ValueId, name: impl Into<String>) {
        self.names[value.index()] = name.into();
    }

    /// Wire the operands of a value created with an empty operand list.
    /// Two-step creation is how forward references and back edges
    /// (phi-style cycles) are expressed; the node must not have been
    /// wired already.
    pub fn set_operands(&mut self, value: ValueId, operands: Vec<ValueId>) {
        assert!(
            self.nodes[value.index()].operands().is_empty(),
            "operands of '{}' already wired",
            self.names[value.index()]
        );
        for &operand in &operands {
            self.users[operand.index()].push(value);
        }
        match &mut self.nodes[value.index()] {
            Node::Op(op) => op.operands = operands,
            Node::Composite { elements } => *elements = operands,
            _ => panic!(
                "value '{}' is a leaf and takes no operands",
                self.names[value.index()]
            ),
        }
    }

    pub fn node(&self, value: ValueId) -> &Node {
        &self.nodes[value.index()]
    }

    /// The interchange id of a value.
    pub fn name(&self, value: ValueId) -> &str {
        &self.names[value.index()]
    }

    /// Every node that consumes this value's result.
    pub fn users(&self, value: ValueId) -> &[ValueId] {
        &self.users[value.index()]
    }

    /// Number of arena slots (operations and non-operation values).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All values in arena order.
    pub fn values(&self) -> impl Iterator<Item = ValueId> {
        (0..self.nodes.len() as u32).map(ValueId)
    }

    /// All operations across all functions, in program order.
    pub fn ops(&self) -> impl Iterator<Item = ValueId> + '_ {
        self.functions.iter().flat_map(|f| f.body.iter().copied())
    }
}
