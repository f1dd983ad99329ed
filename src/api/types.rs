use crate::debugger::variable::Kind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use crate::debugger::variable::VariableFlags;

/// Variable ready for display in a client.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub addr: u64,
    /// Only address of the variable is known, value not loaded.
    pub only_addr: bool,
    /// Declared type name.
    #[serde(rename = "type")]
    pub r#type: String,
    /// Type name after typedef resolution.
    pub real_type: String,
    pub flags: VariableFlags,
    pub kind: Kind,
    /// Rendered value, empty if value is not loaded.
    pub value: String,
    /// Number of elements of an array, slice, map or string, 2 for complex numbers.
    pub len: i64,
    /// Capacity of a slice or a channel.
    pub cap: i64,
    pub children: Vec<Variable>,
    /// Address of an underlying data for strings, slices, maps and channels.
    pub base: u64,
    /// Reason why variable value can not be read, empty if variable is readable.
    pub unreadable: String,
    /// Human readable description of a variable location.
    pub location_expr: String,
    pub decl_line: i64,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    /// Always zero, kept for compatibility with older clients.
    #[serde(rename = "type")]
    pub r#type: u64,
    /// Function entry address.
    pub value: u64,
    /// Always zero, kept for compatibility with older clients.
    pub runtime_type: u64,
    pub optimized: bool,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Location {
    pub pc: u64,
    pub file: String,
    pub line: u64,
    pub function: Option<Function>,
}

/// Variables loading limits.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub follow_pointers: bool,
    pub max_variable_recurse: i32,
    pub max_string_len: i32,
    pub max_array_values: i32,
    pub max_struct_fields: i32,
}

/// Logical (user visible) breakpoint.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Breakpoint {
    pub id: i32,
    pub name: String,
    /// Address of the first physical breakpoint.
    pub addr: u64,
    /// Addresses of all physical breakpoints.
    pub addrs: Vec<u64>,
    pub file: String,
    pub line: u64,
    pub function_name: String,
    /// Condition source text, empty for unconditional breakpoints.
    pub cond: String,
    pub tracepoint: bool,
    pub trace_return: bool,
    pub stacktrace: i32,
    pub task: bool,
    pub variables: Vec<String>,
    pub load_args: Option<LoadConfig>,
    pub load_locals: Option<LoadConfig>,
    /// Hit count per task id.
    pub hit_count: BTreeMap<String, u64>,
    pub total_hit_count: u64,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Thread {
    pub id: u32,
    pub pc: u64,
    pub file: String,
    pub line: u64,
    pub function: Option<Function>,
    /// Id of a running task, zero if there is no task.
    pub task_id: u64,
    /// Breakpoint where thread stopped.
    pub breakpoint: Option<Breakpoint>,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub current_loc: Location,
    /// Current location without async runtime internal frames.
    pub user_current_loc: Location,
    /// Location of a spawn statement.
    pub spawn_loc: Location,
    pub start_loc: Location,
    /// Zero if task is not running now.
    pub thread_id: u32,
    pub labels: IndexMap<String, String>,
    pub unreadable: String,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Register {
    pub name: String,
    pub value: String,
    pub dwarf_number: usize,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct AsmInstruction {
    pub loc: Location,
    /// Destination of a call or a jump.
    pub dest_loc: Option<Location>,
    pub text: String,
    pub bytes: Vec<u8>,
    pub breakpoint: bool,
    pub at_pc: bool,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Image {
    pub path: String,
    pub address: u64,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: i32,
    pub when: String,
    #[serde(rename = "where")]
    pub r#where: String,
}
