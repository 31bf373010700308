//! Small helpers that are not tied to a particular part of the machine.

pub mod nibbles;
