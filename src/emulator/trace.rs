//! A short history of executed instructions, for debugging frontends.

use std::collections::VecDeque;
use std::fmt;

pub const TRACE_LENGTH: usize = 100;

/// One executed instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    pub address: u16,
    pub opcode: u16,
    pub description: String,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06X}  {:04X}  {}", self.address, self.opcode, self.description)
    }
}

/// The last `TRACE_LENGTH` instructions, newest first.
#[derive(Debug, Default)]
pub struct Trace {
    entries: VecDeque<TraceEntry>,
}

impl Trace {

    pub fn new() -> Trace {
        Trace { entries: VecDeque::with_capacity(TRACE_LENGTH) }
    }

    pub fn push(&mut self, entry: TraceEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(TRACE_LENGTH);
    }

    pub fn iter(&self) -> impl Iterator<Item = &TraceEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&TraceEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
