#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Report written. Failed benchmark runs are report content, not errors.
    Success = 0,

    /// Invalid CLI input (missing arguments, unusable results directory or timestamp).
    InvalidInput = 30,

    /// Internal/runtime error (report could not be rendered or written).
    RuntimeError = 40,
}

impl ExitCode {
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
