use serde::{Deserialize, Serialize};

use crate::*;

/// Marks and lock state of a single color row.
///
/// The lock flag and the lock cell are coupled: playing the lock cell locks the row, and
/// [`RowState::toggle_lock`] on a marked lock cell clears both.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RowRecord")]
pub struct RowState {
    marks: [bool; ROW_LEN],
    locked: bool,
}

/// Stored shape of a row, also accepting the key names of older saves.
#[derive(Deserialize)]
struct RowRecord {
    #[serde(alias = "checked")]
    marks: [bool; ROW_LEN],
    locked: bool,
}

impl From<RowRecord> for RowState {
    fn from(RowRecord { marks, locked }: RowRecord) -> Self {
        let lock_marked = marks[usize::from(LOCK_INDEX)];
        if lock_marked && !locked {
            log::debug!("stored row has a marked lock cell but is unlocked, locking it");
        }
        Self {
            marks,
            locked: locked || lock_marked,
        }
    }
}

impl RowState {
    pub const fn new() -> Self {
        Self {
            marks: [false; ROW_LEN],
            locked: false,
        }
    }

    pub const fn marks(&self) -> &[bool; ROW_LEN] {
        &self.marks
    }

    pub fn is_marked(&self, index: CellIndex) -> bool {
        self.marks
            .get(usize::from(index))
            .copied()
            .unwrap_or(false)
    }

    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_lock_cell_marked(&self) -> bool {
        self.marks[usize::from(LOCK_INDEX)]
    }

    /// Marks in the regular cells, the lock cell excluded.
    pub fn mark_count(&self) -> u8 {
        self.marks[..usize::from(LOCK_INDEX)]
            .iter()
            .filter(|&&marked| marked)
            .count() as u8
    }

    /// Marks that count towards the row score.
    pub fn credited_marks(&self) -> u8 {
        self.mark_count() + u8::from(self.is_lock_cell_marked())
    }

    pub fn rightmost_marked(&self) -> Option<CellIndex> {
        self.marks
            .iter()
            .rposition(|&marked| marked)
            .map(|index| index as CellIndex)
    }

    /// A marked lock cell stays playable so it can be taken back, everything else in a
    /// locked row is frozen.
    pub fn is_cell_legal_to_toggle(&self, index: CellIndex) -> bool {
        if index == LOCK_INDEX && self.is_lock_cell_marked() {
            return true;
        }
        if self.locked || index > LOCK_INDEX {
            return false;
        }

        if self.rightmost_marked().is_some_and(|rightmost| index < rightmost) {
            return false;
        }

        index != LOCK_INDEX || self.mark_count() >= MARKS_TO_LOCK
    }

    pub fn legal_cells(&self) -> [bool; ROW_LEN] {
        core::array::from_fn(|index| self.is_cell_legal_to_toggle(index as CellIndex))
    }

    pub fn toggle_mark(&mut self, index: CellIndex) -> Result<MarkOutcome> {
        let i = validate_cell(index)?;
        if !self.is_cell_legal_to_toggle(index) {
            return Err(GameError::IllegalMove);
        }

        self.marks[i] = !self.marks[i];
        Ok(match (self.marks[i], index == LOCK_INDEX) {
            (true, true) => {
                self.locked = true;
                MarkOutcome::Locked
            }
            (false, true) => {
                self.locked = false;
                MarkOutcome::Unlocked
            }
            (true, false) => MarkOutcome::Marked,
            (false, false) => MarkOutcome::Unmarked,
        })
    }

    /// Toggles the cell showing `value` in a row printed with `numbering`.
    pub fn toggle_value(&mut self, numbering: Numbering, value: CellValue) -> Result<MarkOutcome> {
        let index = numbering.index_of(value).ok_or(GameError::InvalidIndex)?;
        self.toggle_mark(index)
    }

    /// Dedicated lock control. With the lock cell marked this clears it and unlocks the row,
    /// otherwise it flips the lock flag without checking the mark count.
    pub fn toggle_lock(&mut self) -> MarkOutcome {
        if self.is_lock_cell_marked() {
            self.marks[usize::from(LOCK_INDEX)] = false;
            self.locked = false;
            return MarkOutcome::Unlocked;
        }

        self.locked = !self.locked;
        if self.locked {
            MarkOutcome::Locked
        } else {
            MarkOutcome::Unlocked
        }
    }

    pub fn score(&self) -> Score {
        triangular(self.credited_marks())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_with(indices: &[CellIndex]) -> RowState {
        let mut row = RowState::new();
        for &index in indices {
            row.marks[usize::from(index)] = true;
        }
        row
    }

    #[test]
    fn empty_row_allows_every_regular_cell() {
        let row = RowState::new();
        let legal = row.legal_cells();

        assert!(legal[..10].iter().all(|&cell| cell));
        assert!(!legal[10]);
        assert_eq!(row.score(), 0);
    }

    #[test]
    fn legality_matches_rightmost_and_lock_gate_for_every_unlocked_row() {
        for bits in 0u16..(1 << ROW_LEN) {
            let marks: [bool; ROW_LEN] = core::array::from_fn(|i| bits & (1 << i) != 0);
            let row = RowState {
                marks,
                locked: false,
            };
            let rightmost = row.rightmost_marked();
            for index in 0..=LOCK_INDEX {
                let taking_back_lock = index == LOCK_INDEX && row.is_lock_cell_marked();
                let expected = taking_back_lock
                    || rightmost.is_none_or(|r| index >= r)
                        && (index != LOCK_INDEX || row.mark_count() >= MARKS_TO_LOCK);
                assert_eq!(
                    row.is_cell_legal_to_toggle(index),
                    expected,
                    "bits {bits:#013b}, index {index}"
                );
            }
        }
    }

    #[test]
    fn marks_only_move_rightwards() {
        let mut row = RowState::new();

        assert_eq!(row.toggle_mark(3).unwrap(), MarkOutcome::Marked);
        assert_eq!(row.toggle_mark(1), Err(GameError::IllegalMove));
        assert_eq!(row.toggle_mark(3).unwrap(), MarkOutcome::Unmarked);
        assert_eq!(row.toggle_mark(1).unwrap(), MarkOutcome::Marked);
    }

    #[test]
    fn toggling_any_legal_cell_twice_restores_the_row() {
        let mut closed = row_with(&[0, 1, 2, 3, 4]);
        closed.toggle_mark(LOCK_INDEX).unwrap();
        let rows = [RowState::new(), row_with(&[0, 2]), row_with(&[0, 1, 2, 3, 4]), closed];

        for original in rows {
            for index in 0..=LOCK_INDEX {
                if !original.is_cell_legal_to_toggle(index) {
                    continue;
                }
                let mut row = original;
                row.toggle_mark(index).unwrap();
                row.toggle_mark(index).unwrap();
                assert_eq!(row, original, "index {index}");
            }
        }
    }

    #[test]
    fn clicking_a_marked_lock_cell_reopens_the_row() {
        let mut row = row_with(&[0, 1, 2, 3, 4]);

        assert_eq!(row.toggle_mark(LOCK_INDEX).unwrap(), MarkOutcome::Locked);
        assert_eq!(
            row.legal_cells(),
            core::array::from_fn(|index| index == usize::from(LOCK_INDEX))
        );
        assert_eq!(row.toggle_mark(7), Err(GameError::IllegalMove));

        assert_eq!(row.toggle_mark(LOCK_INDEX).unwrap(), MarkOutcome::Unlocked);
        assert!(!row.is_locked());
        assert!(!row.is_lock_cell_marked());
        assert!(row.is_cell_legal_to_toggle(7));
    }

    #[test]
    fn lock_cell_needs_five_marks() {
        let mut row = row_with(&[0, 1, 2, 3]);
        assert_eq!(row.toggle_mark(LOCK_INDEX), Err(GameError::IllegalMove));

        row.toggle_mark(4).unwrap();
        assert_eq!(row.toggle_mark(LOCK_INDEX).unwrap(), MarkOutcome::Locked);
        assert!(row.is_locked());
        assert!(row.is_lock_cell_marked());
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut row = RowState::new();
        assert_eq!(row.toggle_mark(11), Err(GameError::InvalidIndex));
        assert!(!row.is_cell_legal_to_toggle(11));
        assert_eq!(row, RowState::new());
    }

    #[test]
    fn lock_override_freezes_row_regardless_of_marks() {
        let mut row = row_with(&[2]);

        assert_eq!(row.toggle_lock(), MarkOutcome::Locked);
        assert!(row.is_locked());
        assert!(!row.is_lock_cell_marked());
        assert!(row.legal_cells().iter().all(|&cell| !cell));
        assert_eq!(row.toggle_mark(5), Err(GameError::IllegalMove));

        assert_eq!(row.toggle_lock(), MarkOutcome::Unlocked);
        assert!(!row.is_locked());
    }

    #[test]
    fn lock_control_on_marked_lock_cell_unmarks_it() {
        let mut row = row_with(&[0, 1, 2, 3, 4]);
        row.toggle_mark(LOCK_INDEX).unwrap();

        assert_eq!(row.toggle_lock(), MarkOutcome::Unlocked);
        assert!(!row.is_locked());
        assert!(!row.is_lock_cell_marked());
        assert_eq!(row.mark_count(), 5);
    }

    #[test]
    fn score_is_triangular_in_credited_marks() {
        assert_eq!(row_with(&[0, 1, 2, 3, 4]).score(), 15);
        assert_eq!(row_with(&[0, 1, 2, 3, 4, 10]).score(), 21);
        assert_eq!(row_with(&[10]).score(), 1);
    }

    #[test]
    fn score_never_drops_as_regular_cells_fill() {
        for lock_marked in [false, true] {
            let mut row = RowState::new();
            row.marks[usize::from(LOCK_INDEX)] = lock_marked;
            let mut previous = row.score();
            for index in 0..usize::from(LOCK_INDEX) {
                row.marks[index] = true;
                let score = row.score();
                assert!(score >= previous);
                previous = score;
            }
        }
    }

    #[test]
    fn toggle_value_uses_printed_numbers() {
        let mut row = RowState::new();
        row.toggle_value(Numbering::Descending, 12).unwrap();
        assert!(row.is_marked(0));
        assert_eq!(
            row.toggle_value(Numbering::Descending, 1),
            Err(GameError::InvalidIndex)
        );
    }

    #[test]
    fn stored_row_accepts_legacy_key_and_couples_lock() {
        let json = r#"{"checked":[true,true,true,true,true,false,false,false,false,false,true],"locked":false}"#;
        let row: RowState = serde_json::from_str(json).unwrap();

        assert!(row.is_locked());
        assert_eq!(row.score(), 21);
    }
}
