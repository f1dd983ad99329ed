//! Serializable snapshot of a debugee state and conversions into it.

pub mod conversion;
mod types;

pub use conversion::{
    convert_asm_instruction, convert_breakpoint, convert_breakpoints, convert_function,
    convert_location, convert_registers, convert_task, convert_thread, convert_var,
    load_config_from_engine, load_config_to_engine,
};
pub use types::{
    AsmInstruction, Breakpoint, Checkpoint, Function, Image, LoadConfig, Location, Register, Task,
    Thread, Variable, VariableFlags,
};
