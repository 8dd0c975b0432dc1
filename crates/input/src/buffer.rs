//! Per-tick command buffer.
//!
//! Key events arrive between ticks; the host collects them here and hands the
//! slice to the session once per tick. Stack-only: a burst beyond the capacity
//! drops the extra commands instead of allocating.

use arrayvec::ArrayVec;

use crate::types::Command;

/// Commands kept per tick
pub const MAX_COMMANDS_PER_TICK: usize = 16;

#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    commands: ArrayVec<Command, MAX_COMMANDS_PER_TICK>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a command; returns false if the buffer is full
    pub fn push(&mut self, command: Command) -> bool {
        self.commands.try_push(command).is_ok()
    }

    pub fn as_slice(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}
