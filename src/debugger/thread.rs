use crate::debugger::breakpoint::BreakpointState;
use crate::debugger::location::Location;
use crate::error::Error;
use indexmap::IndexMap;

/// Functions with these prefixes belong to the async runtime or standard library machinery.
const RUNTIME_PREFIXES: &[&str] = &["tokio::", "std::", "core::", "alloc::"];

/// Thread of a traced process.
///
/// Implemented by the tracing engine, each method may touch debugee memory.
pub trait Thread {
    /// System thread id.
    fn thread_id(&self) -> u32;

    /// Return current location of a thread.
    fn location(&self) -> Result<Location, Error>;

    /// Return breakpoint where thread stopped.
    fn breakpoint(&self) -> &BreakpointState;

    /// Return id of a task which is running on this thread, [`None`] if thread runs no task.
    fn task_id(&self) -> Result<Option<u64>, Error>;
}

/// Async task: a unit of execution scheduled by a user space runtime.
/// Task may be not scheduled on any thread.
#[derive(Clone, Debug, Default)]
pub struct Task {
    pub id: u64,
    /// Location where task currently stopped.
    pub current_loc: Location,
    /// Unwound task stack, innermost frame first.
    pub frames: Vec<Location>,
    /// Location of a statement that spawned the task.
    pub spawn_loc: Location,
    /// Location of a task entry function.
    pub start_loc: Location,
    /// Thread that currently runs the task.
    pub thread_id: Option<u32>,
    pub labels: IndexMap<String, String>,
    /// Reason why task structure can not be read.
    pub unreadable: Option<Error>,
}

impl Task {
    /// Return location of the innermost frame that not belongs to runtime internals.
    /// Fall back to a current location if there is no such frame.
    pub fn user_current(&self) -> &Location {
        self.frames
            .iter()
            .find(|frame| {
                frame.function_name().is_some_and(|name| {
                    !RUNTIME_PREFIXES
                        .iter()
                        .any(|prefix| name.starts_with(prefix))
                })
            })
            .unwrap_or(&self.current_loc)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::debugger::address::RelocatedAddress;
    use crate::debugger::location::Function;

    fn frame(pc: u64, function: Option<&str>) -> Location {
        Location {
            pc: RelocatedAddress::from(pc),
            file: "main.rs".to_string(),
            line: pc,
            function: function.map(|name| Function {
                name: name.to_string(),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_user_current_skip_runtime_frames() {
        let task = Task {
            current_loc: frame(1, Some("tokio::runtime::park")),
            frames: vec![
                frame(1, Some("tokio::runtime::park")),
                frame(2, None),
                frame(3, Some("core::future::poll")),
                frame(4, Some("app::handler")),
                frame(5, Some("app::main")),
            ],
            ..Default::default()
        };
        assert_eq!(task.user_current().pc.as_u64(), 4);
    }

    #[test]
    fn test_user_current_fallback() {
        let task = Task {
            current_loc: frame(1, Some("tokio::runtime::park")),
            frames: vec![frame(1, Some("tokio::runtime::park"))],
            ..Default::default()
        };
        assert_eq!(task.user_current().pc.as_u64(), 1);

        let task = Task {
            current_loc: frame(7, None),
            ..Default::default()
        };
        assert_eq!(task.user_current().pc.as_u64(), 7);
    }
}
