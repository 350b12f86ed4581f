//! Session command history.
//!
//! A fixed ring of [`HISTORY_CAPACITY`] slots addressed by absolute slot
//! index. Writes go to the cursor, which wraps to slot 0 once every slot has
//! been used, so the 1025th line overwrites slot 0. Listing walks the slots in
//! index order, which after a wrap is not insertion order.

use thiserror::Error;
use tracing::debug;

/// Number of slots in the ring.
pub const HISTORY_CAPACITY: usize = 1024;

/// History ring failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// Index outside `0..HISTORY_CAPACITY`.
    #[error("{}", out_of_range_message(*.0))]
    IndexOutOfRange(i64),
    /// Nothing to store.
    #[error("Cannot store an empty line in history.")]
    EmptyLine,
}

fn out_of_range_message(index: i64) -> String {
    if index < 0 {
        "History index must not be negative.".to_string()
    } else {
        format!("History index must be smaller than {HISTORY_CAPACITY}.")
    }
}

/// Fixed-size circular buffer of executed command lines.
#[derive(Debug, Clone)]
pub struct HistoryRing {
    slots: Vec<Option<String>>,
    cursor: usize,
}

impl Default for HistoryRing {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryRing {
    /// An empty ring.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: vec![None; HISTORY_CAPACITY],
            cursor: 0,
        }
    }

    /// Store a copy of `line` and return the slot it was written to.
    pub fn append(&mut self, line: &str) -> Result<usize, HistoryError> {
        if line.is_empty() {
            return Err(HistoryError::EmptyLine);
        }
        if self.cursor == HISTORY_CAPACITY {
            self.cursor = 0;
        }

        let slot = self.cursor;
        self.slots[slot] = Some(line.to_owned());
        self.cursor += 1;
        debug!(slot, "recorded history entry");
        Ok(slot)
    }

    /// Line stored at `index`, or `None` for a slot never written.
    pub fn get(&self, index: i64) -> Result<Option<&str>, HistoryError> {
        let slot = usize::try_from(index)
            .ok()
            .filter(|slot| *slot < HISTORY_CAPACITY)
            .ok_or(HistoryError::IndexOutOfRange(index))?;
        Ok(self.slots[slot].as_deref())
    }

    /// Occupied slots in slot order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &str)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, line)| line.as_deref().map(|line| (index, line)))
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn append_then_get_returns_line() {
        let mut ring = HistoryRing::new();
        let slot = ring.append("add Buy milk").unwrap();

        assert_eq!(slot, 0);
        assert_eq!(ring.get(0).unwrap(), Some("add Buy milk"));
        assert_eq!(ring.len(), 1);
    }

    #[test]
    fn unwritten_slot_is_none_not_error() {
        let ring = HistoryRing::new();
        assert!(ring.is_empty());
        assert_eq!(ring.get(5).unwrap(), None);
        assert_eq!(ring.get(1023).unwrap(), None);
    }

    #[test]
    fn out_of_range_indices_fail() {
        let ring = HistoryRing::new();

        assert_eq!(ring.get(1024), Err(HistoryError::IndexOutOfRange(1024)));
        assert_eq!(ring.get(-1), Err(HistoryError::IndexOutOfRange(-1)));
        assert_eq!(
            ring.get(-1).unwrap_err().to_string(),
            "History index must not be negative."
        );
        assert_eq!(
            ring.get(5000).unwrap_err().to_string(),
            "History index must be smaller than 1024."
        );
    }

    #[test]
    fn empty_line_is_rejected() {
        let mut ring = HistoryRing::new();
        assert_eq!(ring.append(""), Err(HistoryError::EmptyLine));
        assert!(ring.is_empty());
    }

    #[test]
    fn wraps_after_every_slot_is_used() {
        let mut ring = HistoryRing::new();
        for i in 0..HISTORY_CAPACITY {
            assert_eq!(ring.append(&format!("cmd {i}")).unwrap(), i);
        }
        assert_eq!(ring.get(1023).unwrap(), Some("cmd 1023"));

        let slot = ring.append("cmd 1024").unwrap();

        assert_eq!(slot, 0);
        assert_eq!(ring.get(0).unwrap(), Some("cmd 1024"));
        assert_eq!(ring.get(1).unwrap(), Some("cmd 1"));
        assert_eq!(ring.len(), HISTORY_CAPACITY);
    }

    #[test]
    fn entries_follow_slot_order_after_wrap() {
        let mut ring = HistoryRing::new();
        for i in 0..=HISTORY_CAPACITY {
            ring.append(&format!("cmd {i}")).unwrap();
        }

        let first: Vec<_> = ring.entries().take(2).collect();
        assert_eq!(first, vec![(0, "cmd 1024"), (1, "cmd 1")]);
    }

    proptest! {
        #[test]
        fn appended_line_is_returned_verbatim(line in "[^\\n]{1,200}") {
            let mut ring = HistoryRing::new();
            ring.append("list").unwrap();
            let slot = ring.append(&line).unwrap();
            let stored = ring.get(i64::try_from(slot).unwrap()).unwrap();
            prop_assert_eq!(stored, Some(line.as_str()));
        }
    }
}
