//! Runtime model of a traced process as it is produced by the tracing engine.
//!
//! All types here are read-only inputs for the [`crate::api`] conversions.

pub mod address;
pub mod breakpoint;
pub mod expr;
pub mod location;
pub mod register;
pub mod thread;
pub mod variable;

pub use breakpoint::{Breakpoint, BreakpointState};
pub use location::{Function, Location};
pub use register::{Amd64, Arch, DwarfRegister, DwarfRegisters};
pub use thread::{Task, Thread};
pub use variable::{ConstValue, DwarfType, FloatSpecial, Kind, TypeShape, Variable};

/// Limits of a variable loading.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct LoadConfig {
    /// Automatically dereference pointers.
    pub follow_pointers: bool,
    /// How far to recurse when evaluating nested types.
    pub max_variable_recurse: i32,
    /// Maximum number of bytes read from a string.
    pub max_string_len: i32,
    /// Maximum number of elements read from an array, a slice or a map.
    pub max_array_values: i32,
    /// Maximum number of fields read from a structure, -1 means read all fields.
    pub max_struct_fields: i32,
    /// Maximum number of hash map buckets to scan.
    /// Tuned by the engine itself, zero means "choose automatically".
    pub max_map_buckets: i32,
}

/// Disassembled instruction.
#[derive(Clone, Debug, Default)]
pub struct AsmInstruction {
    pub loc: Location,
    /// Destination of a jump or call instruction.
    pub dest_loc: Option<Location>,
    pub bytes: Vec<u8>,
    /// Instruction address has a breakpoint.
    pub breakpoint: bool,
    /// Instruction is at the current program counter.
    pub at_pc: bool,
}

/// Object file loaded into the debugee address space.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Image {
    pub path: String,
    pub static_base: u64,
}

/// Saved state of a recorded execution.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Checkpoint {
    pub id: i32,
    pub when: String,
    pub r#where: String,
}
