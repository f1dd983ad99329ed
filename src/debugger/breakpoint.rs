use crate::debugger::address::RelocatedAddress;
use crate::debugger::expr::Expr;
use crate::debugger::LoadConfig;
use std::collections::HashMap;

/// Physical breakpoint: a single instrumented address.
///
/// One user breakpoint may be backed by several physical breakpoints (for example, when
/// a source line is inlined into several places), all of them share a logical id.
#[derive(Clone, Debug, Default)]
pub struct Breakpoint {
    pub name: String,
    pub logical_id: i32,
    pub function_name: String,
    pub file: String,
    pub line: u64,
    pub addr: RelocatedAddress,
    /// Print a message and continue instead of stopping.
    pub tracepoint: bool,
    /// Trace return values of a traced function.
    pub trace_return: bool,
    /// Number of stack frames to capture on hit.
    pub stacktrace: i32,
    /// Capture information about a current task on hit.
    pub task: bool,
    /// Expressions to evaluate on hit.
    pub variables: Vec<String>,
    pub load_args: Option<LoadConfig>,
    pub load_locals: Option<LoadConfig>,
    /// Breakpoint condition.
    pub cond: Option<Expr>,
    pub total_hit_count: u64,
    /// Hit count per task id.
    pub hit_count: HashMap<u64, u64>,
}

/// Breakpoint where a thread currently stopped.
#[derive(Clone, Debug, Default)]
pub struct BreakpointState {
    pub breakpoint: Option<Breakpoint>,
    /// Breakpoint was hit and its condition is satisfied.
    pub active: bool,
}

impl BreakpointState {
    /// Return breakpoint if it is active.
    pub fn active_breakpoint(&self) -> Option<&Breakpoint> {
        if self.active {
            self.breakpoint.as_ref()
        } else {
            None
        }
    }
}
