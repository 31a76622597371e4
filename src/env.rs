use crate::history::CommandHistory;
use crate::item::{ItemLog, ItemType};

/// State shared with every command callback.
///
/// - `log`: console output produced by commands and the interpreter.
/// - `history`: lines executed so far.
/// - `should_exit`: a flag that a REPL loop can check to know when to terminate.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub log: ItemLog,
    pub history: CommandHistory,
    pub should_exit: bool,
}

impl Environment {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            log: ItemLog::new(),
            history: CommandHistory::new(history_capacity),
            should_exit: false,
        }
    }

    /// Shorthand for pushing a [`ItemType::Log`] item.
    pub fn print(&mut self, text: impl Into<String>) {
        self.log.push(ItemType::Log, text);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.log.push(ItemType::Info, text);
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.log.push(ItemType::Warning, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.log.push(ItemType::Error, text);
    }
}
