use crate::debugger::address::RelocatedAddress;

/// Errors reported by the tracing engine.
///
/// This layer never returns them from a conversion: they arrive attached to runtime values
/// (as the reason of unreadability) or as results of thread queries and end up
/// rendered into output fields.
#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum Error {
    // --------------------------------- debugger entity not found----------------------------------
    #[error("no debug information for {0}")]
    NoDebugInformation(&'static str),
    #[error("function not found at address {0}")]
    FunctionNotFound(RelocatedAddress),
    #[error("source place not found at address {0}")]
    PlaceNotFound(RelocatedAddress),
    #[error("thread {0} has no associated task")]
    NoTask(u32),

    // --------------------------------- remote memory errors --------------------------------------
    #[error("could not read {len} bytes at {addr}")]
    ReadMemory { addr: RelocatedAddress, len: usize },
    #[error("invalid binary representation of type `{0}`: {1:?}")]
    TypeBinaryRepr(&'static str, Box<[u8]>),

    // --------------------------------- unwind errors ---------------------------------------------
    #[error("unwind: no unwind context")]
    UnwindNoContext,
    #[error("unwind: too deep frame number")]
    UnwindTooDeepFrame,

    // --------------------------------- task errors -----------------------------------------------
    #[error("task {0} structure is corrupted: {1}")]
    CorruptedTask(u64, &'static str),

    // --------------------------------- config errors ---------------------------------------------
    #[error("config: {0}")]
    Config(String),
}

#[macro_export]
macro_rules! _error {
    ($log_fn: path, $res: expr) => {
        match $res {
            Ok(value) => Some(value),
            Err(e) => {
                $log_fn!(target: "debugger", "{:#}", e);
                None
            }
        }
    };
    ($log_fn: path, $res: expr, $msg: tt) => {
        match $res {
            Ok(value) => Some(value),
            Err(e) => {
                $log_fn!(target: "debugger", concat!($msg, " {:#}"), e);
                None
            }
        }
    };
}

/// Transforms `Result` into `Option` and logs an error if it occurs.
#[macro_export]
macro_rules! weak_error {
    ($res: expr) => {
        $crate::_error!(log::warn, $res)
    };
    ($res: expr, $msg: tt) => {
        $crate::_error!(log::warn, $res, $msg)
    };
}

/// Transforms `Result` into `Option` and put error into debug logs if it occurs.
#[macro_export]
macro_rules! muted_error {
    ($res: expr) => {
        $crate::_error!(log::debug, $res)
    };
    ($res: expr, $msg: tt) => {
        $crate::_error!(log::debug, $res, $msg)
    };
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_error_display() {
        struct TestCase {
            error: Error,
            expect: &'static str,
        }
        let test_cases = [
            TestCase {
                error: Error::ReadMemory {
                    addr: RelocatedAddress::from(0x1000_u64),
                    len: 8,
                },
                expect: "could not read 8 bytes at 0x00000000001000",
            },
            TestCase {
                error: Error::NoTask(12),
                expect: "thread 12 has no associated task",
            },
            TestCase {
                error: Error::CorruptedTask(3, "bad status"),
                expect: "task 3 structure is corrupted: bad status",
            },
        ];

        for tc in test_cases {
            assert_eq!(tc.error.to_string(), tc.expect);
        }
    }

    #[test]
    fn test_weak_error_into_option() {
        let ok: Result<u32, Error> = Ok(1);
        assert_eq!(weak_error!(ok), Some(1));
        let err: Result<u32, Error> = Err(Error::UnwindNoContext);
        assert_eq!(muted_error!(err, "unwind:"), None);
    }
}
