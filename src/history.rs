//! Bounded record of executed command lines.

use std::fmt;

/// Default number of lines kept.
pub const DEFAULT_CAPACITY: usize = 100;

/// A fixed-capacity ring of command lines.
///
/// Once full, every new line overwrites the oldest one. Indexes returned by
/// [`get_new_index`](Self::get_new_index) and
/// [`get_old_index`](Self::get_old_index) are slot positions accepted by
/// [`get`](Self::get).
#[derive(Debug, Clone)]
pub struct CommandHistory {
    slots: Vec<Option<String>>,
    record: usize,
}

impl CommandHistory {
    /// Creates a history keeping at most `capacity` lines (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity.max(1)],
            record: 0,
        }
    }

    pub fn push_back(&mut self, line: impl Into<String>) {
        let slot = self.record % self.capacity();
        self.slots[slot] = Some(line.into());
        self.record += 1;
    }

    /// Slot of the most recent line.
    pub fn get_new_index(&self) -> Option<usize> {
        self.record.checked_sub(1).map(|last| last % self.capacity())
    }

    pub fn get_new(&self) -> Option<&str> {
        self.get_new_index().and_then(|slot| self.get(slot))
    }

    /// Slot of the oldest line still kept.
    pub fn get_old_index(&self) -> Option<usize> {
        if self.record == 0 {
            None
        } else if self.record <= self.capacity() {
            Some(0)
        } else {
            Some(self.record % self.capacity())
        }
    }

    pub fn get_old(&self) -> Option<&str> {
        self.get_old_index().and_then(|slot| self.get(slot))
    }

    /// Line stored in `slot`, if any.
    pub fn get(&self, slot: usize) -> Option<&str> {
        if slot >= self.len() {
            return None;
        }
        self.slots.get(slot).and_then(|line| line.as_deref())
    }

    /// Number of lines currently kept.
    pub fn len(&self) -> usize {
        self.record.min(self.capacity())
    }

    pub fn is_empty(&self) -> bool {
        self.record == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.record = 0;
    }

    /// Lines from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        let start = self.get_old_index().unwrap_or(0);
        (0..self.len()).filter_map(move |i| self.get((start + i) % self.capacity()))
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl fmt::Display for CommandHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "History:")?;
        for line in self.iter() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
