//! Console output entries.
//!
//! Everything the interpreter reports (echoed commands, command output,
//! warnings and errors) is appended to an [`ItemLog`] as an [`Item`]. The
//! embedding application decides how to render them.

use regex::RegexBuilder;
use std::fmt;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    /// An executed command line.
    Command,
    Log,
    Warning,
    Error,
    Info,
    /// Never rendered.
    None,
}

impl ItemType {
    fn prefix(self) -> &'static str {
        match self {
            ItemType::Command => "> ",
            ItemType::Log => "\t",
            ItemType::Warning => "\t[WARNING]: ",
            ItemType::Error => "[ERROR]: ",
            ItemType::Info | ItemType::None => "",
        }
    }
}

/// One line of console output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    kind: ItemType,
    data: String,
    timestamp: u64,
}

impl Item {
    pub fn new(kind: ItemType, timestamp: u64) -> Self {
        Self {
            kind,
            data: String::new(),
            timestamp,
        }
    }

    pub fn kind(&self) -> ItemType {
        self.kind
    }

    /// Raw text without the type prefix.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Milliseconds since the owning log was created.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Text as shown to the user, prefixed according to its type.
    pub fn get(&self) -> String {
        match self.kind {
            ItemType::None => String::new(),
            kind => format!("{}{}", kind.prefix(), self.data),
        }
    }
}

impl fmt::Write for Item {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.data.push_str(s);
        Ok(())
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.get())
    }
}

/// Append-only list of [`Item`]s.
///
/// ```
/// use console_commands::{ItemLog, ItemType};
/// use std::fmt::Write;
///
/// let mut log = ItemLog::new();
/// write!(log.log(ItemType::Log), "{} + {} = {}", 1, 2, 3).unwrap();
/// assert_eq!(log.items()[0].get(), "\t1 + 2 = 3");
/// ```
#[derive(Debug, Clone)]
pub struct ItemLog {
    items: Vec<Item>,
    start: Instant,
}

impl ItemLog {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            start: Instant::now(),
        }
    }

    /// Starts a new item and returns it for writing.
    pub fn log(&mut self, kind: ItemType) -> &mut Item {
        let timestamp = u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.items.push(Item::new(kind, timestamp));
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    /// Appends a complete item. Warnings and errors are also traced.
    pub fn push(&mut self, kind: ItemType, text: impl Into<String>) {
        let text = text.into();
        match kind {
            ItemType::Warning => tracing::warn!("{}", text),
            ItemType::Error => tracing::warn!(error = %text, "command failed"),
            _ => tracing::trace!(?kind, "{}", text),
        }
        self.log(kind).data = text;
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items whose text matches `pattern`, ignoring case.
    pub fn filter(&self, pattern: &str) -> Result<Vec<&Item>, regex::Error> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(self
            .items
            .iter()
            .filter(|item| regex.is_match(&item.data))
            .collect())
    }
}

impl Default for ItemLog {
    fn default() -> Self {
        Self::new()
    }
}
