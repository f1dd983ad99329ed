use crate::debugger::address::RelocatedAddress;

/// Function resolved from debug information.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Function {
    pub name: String,
    /// Address of the first instruction.
    pub entry: RelocatedAddress,
    /// Function compiled with optimizations.
    pub optimized: bool,
}

/// Place in a program: program counter and a source position that corresponds to it.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Location {
    pub pc: RelocatedAddress,
    pub file: String,
    pub line: u64,
    /// [`None`] if there is no function at this program counter.
    pub function: Option<Function>,
}

impl Location {
    pub fn function_name(&self) -> Option<&str> {
        self.function.as_ref().map(|f| f.name.as_str())
    }
}
