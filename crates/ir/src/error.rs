/// All errors that can be returned when loading an interchange module.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    /// The module JSON is structurally invalid or missing required fields.
    #[error("invalid module: {0}")]
    InvalidModule(String),

    /// A value object is missing a required field.
    #[error("missing field '{field}' in value '{value}'")]
    MissingField { value: String, field: String },

    /// Two values in the same module declare the same id.
    #[error("duplicate value id '{0}'")]
    DuplicateValue(String),

    /// A value declares a kind the interchange format does not define.
    /// An IR value set is closed: a node of unknown kind has no sound
    /// position in the dependency graph, so it is rejected rather than
    /// skipped.
    #[error("unknown value kind '{kind}' for value '{value}'")]
    UnknownKind { value: String, kind: String },

    /// An operand list references a value id that is not declared
    /// anywhere in the module.
    #[error("value '{value}' references unknown operand '{operand}'")]
    UnknownOperand { value: String, operand: String },
}
