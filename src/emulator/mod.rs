//! The CHIP-8 virtual machine: a CPU and the bus of hardware it runs against.

pub mod bus;
pub mod clock;
pub mod cpu;
pub mod error;
pub mod graphics;
pub mod input;
pub mod instruction;
pub mod machine;
pub mod memory;
pub mod trace;

pub use cpu::Quirks;
pub use error::EmulatorError;
pub use machine::Machine;
