//! verimark-ir: IR data model, mark storage, and interchange JSON.
//!
//! Provides the program representation the classifier runs over:
//!
//! - [`Module`] -- an index-addressed value arena with per-function
//!   operation lists and derived consumer (user) edges
//! - [`MarkTable`] -- the out-of-band verifier-mark attribute store,
//!   addressed by [`ValueId`]
//! - [`load_module()`] / [`to_interchange()`] -- interchange JSON
//!   deserialization and canonical serialization
//!
//! The classification engine itself lives in verimark-analyze; this
//! crate owns everything it reads and writes.

pub mod error;
pub mod interchange;
pub mod marks;
pub mod module;
pub mod serialize;

pub use error::ModuleError;
pub use interchange::load_module;
pub use marks::MarkTable;
pub use module::{Function, Module, Node, Opcode, Operation, ValueId};
pub use serialize::{to_interchange, to_marked_interchange};
