//! Positional argument binding.
//!
//! Commands read their arguments straight out of the raw line into bounded
//! [`ArgSlot`]s. A slot of capacity `n` holds at most `n - 1` characters;
//! anything beyond that is dropped without an error.

use tracing::debug;

/// Longest accepted input line, counted like the slot capacities.
pub const LINE_CAPACITY: usize = 8193;
/// Todo and attachment ids.
pub const ID_CAPACITY: usize = 17;
/// Todo titles.
pub const TITLE_CAPACITY: usize = 65;
/// Todo details.
pub const DETAIL_CAPACITY: usize = 513;
/// `list` filter keyword.
pub const LIST_OPTION_CAPACITY: usize = 17;
/// Yes/no confirmations.
pub const YES_NO_CAPACITY: usize = 3;
/// `search` expression.
pub const SEARCH_CAPACITY: usize = 129;
/// History replay index.
pub const HISTORY_INDEX_CAPACITY: usize = 5;
/// File system paths.
pub const PATH_CAPACITY: usize = 4096;

/// The binder found no argument characters at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingArguments;

/// Bounded destination for one argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSlot {
    capacity: usize,
    chars: usize,
    value: String,
}

impl ArgSlot {
    /// An empty slot holding at most `capacity - 1` characters.
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self {
            capacity,
            chars: 0,
            value: String::new(),
        }
    }

    /// Maximum number of characters the slot accepts.
    #[must_use]
    pub const fn max_chars(&self) -> usize {
        self.capacity.saturating_sub(1)
    }

    /// Whether further writes will be dropped.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.chars >= self.max_chars()
    }

    /// Append one character; returns `false` when it was dropped.
    pub fn push(&mut self, c: char) -> bool {
        if self.is_full() {
            return false;
        }
        self.value.push(c);
        self.chars += 1;
        true
    }

    /// Replace the content with as much of `text` as fits.
    ///
    /// Returns the number of characters written.
    pub fn fill(&mut self, text: &str) -> usize {
        self.clear();
        text.chars().take_while(|c| self.push(*c)).count()
    }

    /// Empty the slot.
    pub fn clear(&mut self) {
        self.value.clear();
        self.chars = 0;
    }

    /// Current content.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Whether nothing has been written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.chars == 0
    }

    /// Number of characters held.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.chars
    }
}

pub(crate) const fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Copy the arguments following the command token of `line` into `slots`.
///
/// `token_len` is the length in characters of the token that resolved the
/// command. The token, the blanks in front of it and one separator are
/// skipped, then any further blanks. With more than one slot a space moves on
/// to the next slot; with a single slot spaces are kept.
///
/// Returns the number of slots that received characters.
pub fn bind(line: &str, token_len: usize, slots: &mut [ArgSlot]) -> Result<usize, MissingArguments> {
    if slots.is_empty() {
        return Err(MissingArguments);
    }

    let leading = line.chars().take_while(|c| is_blank(*c)).count();
    let skip = token_len + leading + 1;
    let split = slots.len() > 1;

    let mut current = 0;
    let mut copied = 0_usize;
    for c in line.chars().skip(skip).skip_while(|c| is_blank(*c)) {
        if split && c == ' ' {
            current += 1;
            if current == slots.len() {
                break;
            }
            continue;
        }
        slots[current].push(c);
        copied += 1;
    }

    if copied == 0 {
        return Err(MissingArguments);
    }

    let populated = slots.iter().filter(|slot| !slot.is_empty()).count();
    debug!(populated, expected = slots.len(), "bound arguments");
    Ok(populated)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn one(capacity: usize) -> [ArgSlot; 1] {
        [ArgSlot::new(capacity)]
    }

    #[test]
    fn single_slot_keeps_spaces() {
        let mut slots = one(TITLE_CAPACITY);
        assert_eq!(bind("add hello world", 3, &mut slots), Ok(1));
        assert_eq!(slots[0].as_str(), "hello world");
    }

    #[test]
    fn short_form_skips_matched_token_only() {
        let mut slots = one(TITLE_CAPACITY);
        assert_eq!(bind("a Buy milk", 1, &mut slots), Ok(1));
        assert_eq!(slots[0].as_str(), "Buy milk");
    }

    #[test]
    fn leading_blanks_before_token_are_skipped() {
        let mut slots = one(ID_CAPACITY);
        assert_eq!(bind(" \tdone 12", 4, &mut slots), Ok(1));
        assert_eq!(slots[0].as_str(), "12");
    }

    #[test]
    fn extra_blanks_after_token_are_skipped() {
        let mut slots = one(TITLE_CAPACITY);
        assert_eq!(bind("add   \t milk", 3, &mut slots), Ok(1));
        assert_eq!(slots[0].as_str(), "milk");
    }

    #[test]
    fn no_arguments_is_missing() {
        let mut slots = one(ID_CAPACITY);
        assert_eq!(bind("remove", 6, &mut slots), Err(MissingArguments));
        assert_eq!(bind("remove ", 6, &mut slots), Err(MissingArguments));
        assert_eq!(bind("remove    ", 6, &mut slots), Err(MissingArguments));
        assert!(slots[0].is_empty());
    }

    #[test]
    fn overlong_argument_is_truncated_but_succeeds() {
        let mut slots = one(ID_CAPACITY);
        let line = format!("remove {}", "9".repeat(40));

        assert_eq!(bind(&line, 6, &mut slots), Ok(1));
        assert_eq!(slots[0].len(), ID_CAPACITY - 1);
        assert!(slots[0].is_full());
    }

    #[test]
    fn argument_exactly_filling_slot_is_kept() {
        let mut slots = one(YES_NO_CAPACITY);
        assert_eq!(bind("x ab", 1, &mut slots), Ok(1));
        assert_eq!(slots[0].as_str(), "ab");
    }

    #[test]
    fn multiple_slots_split_on_spaces() {
        let mut slots = [ArgSlot::new(ID_CAPACITY), ArgSlot::new(PATH_CAPACITY)];
        assert_eq!(bind("cmd 4 /tmp/file name", 3, &mut slots), Ok(2));
        assert_eq!(slots[0].as_str(), "4");
        assert_eq!(slots[1].as_str(), "/tmp/file");
    }

    #[test]
    fn fewer_arguments_than_slots_reports_populated_count() {
        let mut slots = [ArgSlot::new(ID_CAPACITY), ArgSlot::new(PATH_CAPACITY)];
        assert_eq!(bind("cmd 4", 3, &mut slots), Ok(1));
        assert!(slots[1].is_empty());
    }

    #[test]
    fn fill_reports_characters_written() {
        let mut slot = ArgSlot::new(YES_NO_CAPACITY);
        assert_eq!(slot.fill("yes"), 2);
        assert_eq!(slot.as_str(), "ye");
        assert_eq!(slot.fill("y"), 1);
        assert_eq!(slot.as_str(), "y");
    }

    #[test]
    fn multibyte_characters_count_as_one() {
        let mut slot = ArgSlot::new(YES_NO_CAPACITY);
        assert_eq!(slot.fill("ツツツ"), 2);
        assert_eq!(slot.as_str(), "ツツ");
    }

    proptest! {
        #[test]
        fn single_argument_is_prefix_bounded_by_capacity(
            arg in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,200}",
            capacity in 2_usize..150,
        ) {
            let mut slots = [ArgSlot::new(capacity)];
            let line = format!("search {arg}");

            prop_assert_eq!(bind(&line, 6, &mut slots), Ok(1));

            let expected: String = arg.chars().take(capacity - 1).collect();
            prop_assert_eq!(slots[0].as_str(), expected.as_str());
        }
    }
}
