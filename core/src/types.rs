use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::*;

/// Position of a cell inside a color row, `0..=LOCK_INDEX`.
pub type CellIndex = u8;

/// Position of a penalty box, `0..PENALTY_COUNT`.
pub type PenaltyIndex = u8;

/// Printed number of a row cell, `2..=12`.
pub type CellValue = u8;

/// Points, signed because penalties can push the total below zero.
pub type Score = i32;

/// Cells per color row, including the lock cell.
pub const ROW_LEN: usize = 11;

/// The rightmost cell of every row.
pub const LOCK_INDEX: CellIndex = 10;

/// Marks needed in the regular cells before the lock cell may be played.
pub const MARKS_TO_LOCK: u8 = 5;

pub const PENALTY_COUNT: usize = 4;

pub const PENALTY_POINTS: Score = 5;

const LOWEST_VALUE: CellValue = 2;
const HIGHEST_VALUE: CellValue = 12;

/// Which way the numbers are printed along a row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Numbering {
    /// 2, 3, ..., 12
    Ascending,
    /// 12, 11, ..., 2
    Descending,
}

impl Numbering {
    pub const fn value_at(self, index: CellIndex) -> Option<CellValue> {
        if index > LOCK_INDEX {
            return None;
        }
        Some(match self {
            Self::Ascending => LOWEST_VALUE + index,
            Self::Descending => HIGHEST_VALUE - index,
        })
    }

    pub const fn index_of(self, value: CellValue) -> Option<CellIndex> {
        if value < LOWEST_VALUE || value > HIGHEST_VALUE {
            return None;
        }
        Some(match self {
            Self::Ascending => value - LOWEST_VALUE,
            Self::Descending => HIGHEST_VALUE - value,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowColor {
    Red,
    Yellow,
    Green,
    Blue,
}

impl RowColor {
    /// Board order, top to bottom.
    pub const ALL: [RowColor; 4] = [Self::Red, Self::Yellow, Self::Green, Self::Blue];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        use RowColor::*;
        match self {
            Red => "red",
            Yellow => "yellow",
            Green => "green",
            Blue => "blue",
        }
    }

    pub const fn numbering(self) -> Numbering {
        use RowColor::*;
        match self {
            Red | Yellow => Numbering::Ascending,
            Green | Blue => Numbering::Descending,
        }
    }

    pub const fn die(self) -> DieColor {
        use RowColor::*;
        match self {
            Red => DieColor::Red,
            Yellow => DieColor::Yellow,
            Green => DieColor::Green,
            Blue => DieColor::Blue,
        }
    }

    pub const fn flag(self) -> RowColorSet {
        use RowColor::*;
        match self {
            Red => RowColorSet::RED,
            Yellow => RowColorSet::YELLOW,
            Green => RowColorSet::GREEN,
            Blue => RowColorSet::BLUE,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DieColor {
    White1,
    White2,
    Red,
    Yellow,
    Green,
    Blue,
}

impl DieColor {
    /// Display order of the dice tray.
    pub const ALL: [DieColor; 6] = [
        Self::White1,
        Self::White2,
        Self::Red,
        Self::Yellow,
        Self::Green,
        Self::Blue,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        use DieColor::*;
        match self {
            White1 => "white1",
            White2 => "white2",
            Red => "red",
            Yellow => "yellow",
            Green => "green",
            Blue => "blue",
        }
    }

    /// The row this die scores against, white dice have none.
    pub const fn row(self) -> Option<RowColor> {
        use DieColor::*;
        match self {
            White1 | White2 => None,
            Red => Some(RowColor::Red),
            Yellow => Some(RowColor::Yellow),
            Green => Some(RowColor::Green),
            Blue => Some(RowColor::Blue),
        }
    }

    pub const fn flag(self) -> DiceSet {
        use DieColor::*;
        match self {
            White1 => DiceSet::WHITE1,
            White2 => DiceSet::WHITE2,
            Red => DiceSet::RED,
            Yellow => DiceSet::YELLOW,
            Green => DiceSet::GREEN,
            Blue => DiceSet::BLUE,
        }
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct RowColorSet: u8 {
        const RED    = 1;
        const YELLOW = 1 << 1;
        const GREEN  = 1 << 2;
        const BLUE   = 1 << 3;
    }
}

impl RowColorSet {
    pub fn has(self, color: RowColor) -> bool {
        self.contains(color.flag())
    }

    pub fn colors(self) -> impl Iterator<Item = RowColor> {
        RowColor::ALL.into_iter().filter(move |&color| self.has(color))
    }

    /// The dice of the same colors.
    pub fn dice(self) -> DiceSet {
        self.colors()
            .fold(DiceSet::empty(), |set, color| set | color.die().flag())
    }
}

impl FromIterator<RowColor> for RowColorSet {
    fn from_iter<I: IntoIterator<Item = RowColor>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, color| set | color.flag())
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct DiceSet: u8 {
        const WHITE1 = 1;
        const WHITE2 = 1 << 1;
        const RED    = 1 << 2;
        const YELLOW = 1 << 3;
        const GREEN  = 1 << 4;
        const BLUE   = 1 << 5;
    }
}

impl DiceSet {
    pub fn has(self, color: DieColor) -> bool {
        self.contains(color.flag())
    }

    pub fn colors(self) -> impl Iterator<Item = DieColor> {
        DieColor::ALL.into_iter().filter(move |&color| self.has(color))
    }
}

impl FromIterator<DieColor> for DiceSet {
    fn from_iter<I: IntoIterator<Item = DieColor>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, color| set | color.flag())
    }
}

/// Points for `n` credited marks in one row.
pub const fn triangular(n: u8) -> Score {
    let n = n as Score;
    n * (n + 1) / 2
}

/// Score for every reachable mark count, `1..=12`, as printed under the board.
pub fn score_table() -> [(u8, Score); ROW_LEN + 1] {
    core::array::from_fn(|i| {
        let count = (i + 1) as u8;
        (count, triangular(count))
    })
}

pub(crate) fn validate_cell(index: CellIndex) -> Result<usize> {
    if index <= LOCK_INDEX {
        Ok(index.into())
    } else {
        Err(GameError::InvalidIndex)
    }
}

pub(crate) fn validate_penalty(index: PenaltyIndex) -> Result<usize> {
    let index = usize::from(index);
    if index < PENALTY_COUNT {
        Ok(index)
    } else {
        Err(GameError::InvalidIndex)
    }
}
