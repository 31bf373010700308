use thiserror::Error;

/// Errors that stop an instruction from executing.
///
/// These are violations of the machine's bounds, not recoverable conditions:
/// the instruction that caused one has no effect, and the host decides
/// whether to keep stepping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmulatorError {
    #[error("memory access out of bounds at address {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    #[error("register index V{index:X} out of bounds")]
    RegisterOutOfBounds { index: usize },

    #[error("key code {key:#04X} out of range")]
    KeyOutOfRange { key: u8 },

    #[error("call stack overflow at address {address:#06X}")]
    StackOverflow { address: u16 },

    #[error("return with an empty call stack at address {address:#06X}")]
    StackUnderflow { address: u16 },
}

pub type Result<T> = std::result::Result<T, EmulatorError>;
