use serde::{Deserialize, Serialize};

use crate::*;

/// Full scoring sheet of one player: four color rows, the penalty boxes and the
/// score-visibility preference.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BoardRecord", into = "BoardRecord")]
pub struct BoardState {
    rows: [RowState; 4],
    penalty_marks: [bool; PENALTY_COUNT],
    score_hidden: bool,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoardRecord {
    red: RowState,
    yellow: RowState,
    green: RowState,
    blue: RowState,
    #[serde(alias = "penaltyChecked")]
    penalty_marks: [bool; PENALTY_COUNT],
    score_hidden: bool,
}

impl From<BoardRecord> for BoardState {
    fn from(record: BoardRecord) -> Self {
        Self {
            rows: [record.red, record.yellow, record.green, record.blue],
            penalty_marks: record.penalty_marks,
            score_hidden: record.score_hidden,
        }
    }
}

impl From<BoardState> for BoardRecord {
    fn from(board: BoardState) -> Self {
        use RowColor::*;
        Self {
            red: board.rows[Red.index()],
            yellow: board.rows[Yellow.index()],
            green: board.rows[Green.index()],
            blue: board.rows[Blue.index()],
            penalty_marks: board.penalty_marks,
            score_hidden: board.score_hidden,
        }
    }
}

/// Derived totals shown in the summary row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScoreSheet {
    pub rows: [Score; 4],
    pub penalty: Score,
    pub total: Score,
}

impl ScoreSheet {
    pub fn row(&self, color: RowColor) -> Score {
        self.rows[color.index()]
    }
}

impl BoardState {
    pub const fn new() -> Self {
        Self {
            rows: [RowState::new(); 4],
            penalty_marks: [false; PENALTY_COUNT],
            score_hidden: false,
        }
    }

    pub fn row(&self, color: RowColor) -> &RowState {
        &self.rows[color.index()]
    }

    pub fn rows(&self) -> impl Iterator<Item = (RowColor, &RowState)> {
        RowColor::ALL.into_iter().map(|color| (color, self.row(color)))
    }

    pub fn is_cell_legal_to_toggle(&self, color: RowColor, index: CellIndex) -> bool {
        self.row(color).is_cell_legal_to_toggle(index)
    }

    pub fn toggle_row_mark(&mut self, color: RowColor, index: CellIndex) -> Result<MarkOutcome> {
        let outcome = self.rows[color.index()].toggle_mark(index);
        match outcome {
            Ok(outcome) => log::debug!("{} row, cell {}: {:?}", color.name(), index, outcome),
            Err(err) => log::debug!("{} row, cell {} refused: {}", color.name(), index, err),
        }
        outcome
    }

    /// Same as [`Self::toggle_row_mark`], addressing the cell by its printed number.
    pub fn toggle_row_value(&mut self, color: RowColor, value: CellValue) -> Result<MarkOutcome> {
        let index = color
            .numbering()
            .index_of(value)
            .ok_or(GameError::InvalidIndex)?;
        self.toggle_row_mark(color, index)
    }

    pub fn toggle_row_lock(&mut self, color: RowColor) -> MarkOutcome {
        let outcome = self.rows[color.index()].toggle_lock();
        log::debug!("{} row lock control: {:?}", color.name(), outcome);
        outcome
    }

    pub fn penalty_marks(&self) -> &[bool; PENALTY_COUNT] {
        &self.penalty_marks
    }

    /// Flips a penalty box and returns whether it is now marked.
    pub fn toggle_penalty(&mut self, index: PenaltyIndex) -> Result<bool> {
        let i = validate_penalty(index)?;
        self.penalty_marks[i] = !self.penalty_marks[i];
        log::debug!("penalty {}: {}", index, self.penalty_marks[i]);
        Ok(self.penalty_marks[i])
    }

    pub fn penalty_count(&self) -> u8 {
        self.penalty_marks.iter().filter(|&&marked| marked).count() as u8
    }

    pub fn penalty_score(&self) -> Score {
        Score::from(self.penalty_count()) * PENALTY_POINTS
    }

    pub const fn score_hidden(&self) -> bool {
        self.score_hidden
    }

    pub fn toggle_score_hidden(&mut self) -> bool {
        self.score_hidden = !self.score_hidden;
        self.score_hidden
    }

    pub fn row_score(&self, color: RowColor) -> Score {
        self.row(color).score()
    }

    pub fn total_score(&self) -> Score {
        self.rows.iter().map(RowState::score).sum::<Score>() - self.penalty_score()
    }

    pub fn score_sheet(&self) -> ScoreSheet {
        ScoreSheet {
            rows: RowColor::ALL.map(|color| self.row_score(color)),
            penalty: self.penalty_score(),
            total: self.total_score(),
        }
    }

    pub fn locked_colors(&self) -> RowColorSet {
        self.rows()
            .filter(|(_, row)| row.is_locked())
            .map(|(color, _)| color)
            .collect()
    }

    /// Clears every row and penalty, keeping only the score-visibility preference.
    pub fn reset(&mut self) {
        log::debug!("board reset");
        *self = Self {
            score_hidden: self.score_hidden,
            ..Self::new()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark_all(board: &mut BoardState, color: RowColor, indices: &[CellIndex]) {
        for &index in indices {
            board.toggle_row_mark(color, index).unwrap();
        }
    }

    #[test]
    fn row_toggle_leaves_other_rows_alone() {
        let mut board = BoardState::new();

        board.toggle_row_mark(RowColor::Green, 4).unwrap();

        assert!(board.row(RowColor::Green).is_marked(4));
        for color in [RowColor::Red, RowColor::Yellow, RowColor::Blue] {
            assert_eq!(board.row(color), &RowState::new());
        }
    }

    #[test]
    fn total_subtracts_five_per_penalty() {
        let mut board = BoardState::new();
        mark_all(&mut board, RowColor::Red, &[0, 1, 2]);
        mark_all(&mut board, RowColor::Blue, &[5]);
        board.toggle_penalty(1).unwrap();

        let expected = RowColor::ALL
            .iter()
            .map(|&color| board.row_score(color))
            .sum::<Score>()
            - 5;
        assert_eq!(board.total_score(), expected);
        assert_eq!(board.total_score(), 6 + 1 - 5);
    }

    #[test]
    fn total_goes_negative_with_only_penalties() {
        let mut board = BoardState::new();
        for index in 0..4 {
            assert!(board.toggle_penalty(index).unwrap());
        }

        assert_eq!(board.total_score(), -20);
        assert_eq!(board.toggle_penalty(4), Err(GameError::InvalidIndex));
        assert!(!board.toggle_penalty(0).unwrap());
        assert_eq!(board.total_score(), -15);
    }

    #[test]
    fn reset_clears_board_and_keeps_score_visibility() {
        let mut board = BoardState::new();
        mark_all(&mut board, RowColor::Yellow, &[0, 1, 2, 3, 4, 10]);
        board.toggle_row_lock(RowColor::Red);
        board.toggle_penalty(2).unwrap();
        board.toggle_score_hidden();

        board.reset();

        assert!(board.score_hidden());
        for (_, row) in board.rows() {
            assert!(row.marks().iter().all(|&marked| !marked));
            assert!(!row.is_locked());
        }
        assert!(board.penalty_marks().iter().all(|&marked| !marked));
        assert_eq!(board.total_score(), 0);
    }

    #[test]
    fn locked_colors_track_lock_cell_and_override() {
        let mut board = BoardState::new();
        mark_all(&mut board, RowColor::Green, &[0, 1, 2, 3, 4, 10]);
        board.toggle_row_lock(RowColor::Red);

        let locked = board.locked_colors();
        assert!(locked.has(RowColor::Green));
        assert!(locked.has(RowColor::Red));
        assert!(!locked.has(RowColor::Yellow));

        board.toggle_row_lock(RowColor::Green);
        assert_eq!(board.locked_colors(), RowColorSet::RED);
    }

    #[test]
    fn score_sheet_matches_individual_scores() {
        let mut board = BoardState::new();
        mark_all(&mut board, RowColor::Yellow, &[0, 1, 2, 3, 4, 10]);
        board.toggle_penalty(0).unwrap();

        let sheet = board.score_sheet();
        assert_eq!(sheet.row(RowColor::Yellow), 21);
        assert_eq!(sheet.penalty, 5);
        assert_eq!(sheet.total, 16);
    }

    #[test]
    fn printed_values_follow_row_direction() {
        let mut board = BoardState::new();
        board.toggle_row_value(RowColor::Red, 2).unwrap();
        board.toggle_row_value(RowColor::Blue, 12).unwrap();

        assert!(board.row(RowColor::Red).is_marked(0));
        assert!(board.row(RowColor::Blue).is_marked(0));
        assert_eq!(
            board.toggle_row_value(RowColor::Red, 12),
            Err(GameError::IllegalMove)
        );
        assert_eq!(
            board.toggle_row_value(RowColor::Green, 13),
            Err(GameError::InvalidIndex)
        );
    }

    #[test]
    fn stored_board_uses_color_keys() {
        let mut board = BoardState::new();
        board.toggle_row_mark(RowColor::Blue, 3).unwrap();
        board.toggle_score_hidden();

        let json = serde_json::to_value(board).unwrap();
        assert_eq!(json["blue"]["marks"][3], true);
        assert_eq!(json["scoreHidden"], true);
        assert_eq!(json["penaltyMarks"].as_array().unwrap().len(), 4);

        let restored: BoardState = serde_json::from_value(json).unwrap();
        assert_eq!(restored, board);
    }
}
